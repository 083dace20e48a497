//! # Process Runner
//!
//! Launches the external encoder and streams its output while it runs.
//!
//! stdout and stderr are wired to the *same* OS pipe, so the text reaches the
//! caller in exactly the order the encoder wrote it, with no way (and no
//! need) to tell diagnostics from progress. ffmpeg redraws its progress line
//! with `\r`, so a carriage return ends a line just like `\n` does.
//!
//! ## Esempio:
//! ```rust,no_run
//! use giffy_drop::runner::{ProcessRunner, SystemRunner};
//!
//! let args = vec!["-version".to_string()];
//! let code = SystemRunner.run("ffmpeg", &args, &mut |line| println!("{}", line))?;
//! # Ok::<(), giffy_drop::ConvertError>(())
//! ```

use crate::error::ConvertError;
use crate::platform;
use crate::tool_resolver::EncoderLocator;
use std::io::{self, BufRead, BufReader, Read};
use std::process::Stdio;
use tracing::debug;

/// Exit code reported when the process was terminated by a signal
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// Runs an external program, forwarding each output line as it arrives
pub trait ProcessRunner: Send + Sync {
    /// Blocks until the program exits and returns its exit code.
    ///
    /// Fails with [`ConvertError::Launch`] when the program cannot be started.
    fn run(
        &self,
        program: &str,
        args: &[String],
        on_line: &mut dyn FnMut(&str),
    ) -> Result<i32, ConvertError>;

    /// Whether `program` can be launched at all
    fn is_available(&self, program: &str) -> bool;
}

/// Runs real processes on the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        on_line: &mut dyn FnMut(&str),
    ) -> Result<i32, ConvertError> {
        let launch_error = |source: io::Error| ConvertError::Launch {
            program: program.to_string(),
            source,
        };

        let (reader, writer) = io::pipe().map_err(launch_error)?;
        let mut cmd = platform::new_command(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(writer.try_clone().map_err(launch_error)?)
            .stderr(writer);

        debug!("Spawning {} with args: {:?}", program, args);
        let mut child = cmd.spawn().map_err(launch_error)?;

        // `cmd` still owns the parent's write ends; the reader only sees EOF
        // once they are closed.
        drop(cmd);

        let streamed = for_each_line(reader, on_line);
        let status = child.wait()?;
        streamed?;

        debug!("{} exited with {}", program, status);
        Ok(status.code().unwrap_or(SIGNAL_EXIT_CODE))
    }

    fn is_available(&self, program: &str) -> bool {
        EncoderLocator::new(program).is_available()
    }
}

/// Split a byte stream on `\n` and `\r`, calling `on_line` for every
/// non-empty line as soon as its terminator is read.
pub fn for_each_line<R: Read>(reader: R, on_line: &mut dyn FnMut(&str)) -> io::Result<()> {
    let mut reader = BufReader::new(reader);
    let mut pending = Vec::new();

    loop {
        let buf = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if buf.is_empty() {
            break;
        }

        let consumed = buf.len();
        for &byte in buf {
            if byte == b'\n' || byte == b'\r' {
                flush_line(&mut pending, on_line);
            } else {
                pending.push(byte);
            }
        }
        reader.consume(consumed);
    }

    flush_line(&mut pending, on_line);
    Ok(())
}

fn flush_line(pending: &mut Vec<u8>, on_line: &mut dyn FnMut(&str)) {
    if !pending.is_empty() {
        on_line(&String::from_utf8_lossy(pending));
        pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    fn collect(input: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for_each_line(input, &mut |line| lines.push(line.to_string())).unwrap();
        lines
    }

    #[test]
    fn test_splits_on_newlines_and_carriage_returns() {
        let lines = collect(b"Input #0\nframe=  1\rframe=  2\r\nDone");
        assert_eq!(lines, vec!["Input #0", "frame=  1", "frame=  2", "Done"]);
    }

    #[test]
    fn test_skips_empty_fragments() {
        assert_eq!(collect(b"\n\n\r\nA\n\n"), vec!["A"]);
        assert!(collect(b"").is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let lines = collect(b"caf\xe9\n");
        assert_eq!(lines, vec!["caf\u{FFFD}"]);
    }

    #[test]
    fn test_missing_program_is_launch_failure() {
        let err = SystemRunner
            .run("giffy-drop-no-such-encoder", &[], &mut |_| {})
            .unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {}", err);
    }

    #[cfg(unix)]
    #[test]
    fn test_merges_stdout_and_stderr_in_order() {
        let script = "echo A; echo B 1>&2; printf 'C\\rD\\n'";
        let mut lines = Vec::new();
        let code = SystemRunner
            .run("sh", &args!["-c", script], &mut |line| lines.push(line.to_string()))
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(lines, vec!["A", "B", "C", "D"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_reports_non_zero_exit_code() {
        let mut lines = Vec::new();
        let code = SystemRunner
            .run("sh", &args!["-c", "echo failing 1>&2; exit 3"], &mut |line| {
                lines.push(line.to_string())
            })
            .unwrap();

        assert_eq!(code, 3);
        assert_eq!(lines, vec!["failing"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_signal_termination_maps_to_sentinel() {
        let code = SystemRunner
            .run("sh", &args!["-c", "kill -9 $$"], &mut |_| {})
            .unwrap();
        assert_eq!(code, SIGNAL_EXIT_CODE);
    }
}
