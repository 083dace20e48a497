//! # Utility Functions Module
//!
//! Helpers for building and displaying encoder command lines.

/// Converts a list of string-like items to Vec<String>.
///
/// Accepts any iterable of items that can be converted to String,
/// eliminating repetitive `.to_string()` calls when building argument lists.
///
/// # Example
/// ```rust
/// use giffy_drop::utils::to_string_vec;
///
/// let args = to_string_vec(["-vf", "fps=20,palettegen", "-y"]);
/// assert_eq!(args[0], "-vf");
/// ```
pub fn to_string_vec<T, I>(items: I) -> Vec<String>
where
    T: ToString,
    I: IntoIterator<Item = T>,
{
    items.into_iter().map(|item| item.to_string()).collect()
}

/// Macro for building argument vectors from mixed types.
///
/// # Example
/// ```rust
/// use giffy_drop::args;
///
/// let fps = 20;
/// let args = args!["-r", fps, "-y"];
/// assert_eq!(args, vec!["-r", "20", "-y"]);
/// ```
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        $crate::utils::to_string_vec([$($item.to_string()),*])
    };
}

/// Render a command line for the log, quoting arguments that contain spaces
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|part| {
            if part.is_empty() || part.contains(char::is_whitespace) {
                format!("\"{}\"", part)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
