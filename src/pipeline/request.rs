//! Inputs and outputs of a single conversion attempt.

use crate::file_manager::FileManager;
use crate::filter;
use crate::profile::{FrameRate, WidthSelection};
use std::path::PathBuf;

/// What the caller wants converted; immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub input_path: PathBuf,
    pub width: WidthSelection,
    pub frame_rate: FrameRate,
}

impl ConversionRequest {
    pub fn new(input_path: impl Into<PathBuf>, width: WidthSelection, frame_rate: FrameRate) -> Self {
        Self {
            input_path: input_path.into(),
            width,
            frame_rate,
        }
    }

    pub fn parameters(&self) -> ResolvedParameters {
        ResolvedParameters::from_request(self)
    }
}

/// Encoder parameters derived from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParameters {
    pub filter_expression: String,
}

impl ResolvedParameters {
    pub fn from_request(request: &ConversionRequest) -> Self {
        Self {
            filter_expression: filter::resolve_filter(request.width, request.frame_rate),
        }
    }

    pub fn palette_filter(&self) -> String {
        filter::palette_filter(&self.filter_expression)
    }

    pub fn paletteuse_graph(&self) -> String {
        filter::paletteuse_graph(&self.filter_expression)
    }
}

/// Outcome of [`ConversionPipeline::convert`](super::ConversionPipeline::convert)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub succeeded: bool,
    /// Empty when no path could be derived from the input
    pub final_path: PathBuf,
    /// 0 when the GIF does not exist
    pub final_size_bytes: u64,
}

impl PipelineResult {
    pub fn failed(final_path: PathBuf) -> Self {
        Self {
            succeeded: false,
            final_path,
            final_size_bytes: 0,
        }
    }

    pub fn size_megabytes(&self) -> f64 {
        FileManager::megabytes(self.final_size_bytes)
    }

    /// Inclusive: a GIF of exactly `limit_bytes` is within budget
    pub fn within_budget(&self, limit_bytes: u64) -> bool {
        self.final_size_bytes <= limit_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_follow_request() {
        let request = ConversionRequest::new(
            "/v/clip.mp4",
            "320".parse().unwrap(),
            FrameRate::new(20).unwrap(),
        );
        let params = request.parameters();
        assert_eq!(params.filter_expression, "fps=20,scale=320:-1:flags=lanczos");
        assert_eq!(params, ResolvedParameters::from_request(&request));
    }

    #[test]
    fn test_result_budget() {
        let mut result = PipelineResult {
            succeeded: true,
            final_path: PathBuf::from("out.gif"),
            final_size_bytes: 10 * 1024 * 1024,
        };
        assert!(result.within_budget(10 * 1024 * 1024));
        assert_eq!(result.size_megabytes(), 10.0);

        result.final_size_bytes += 1;
        assert!(!result.within_budget(10 * 1024 * 1024));
    }

    #[test]
    fn test_failed_result_has_no_size() {
        let result = PipelineResult::failed(PathBuf::from("out.gif"));
        assert!(!result.succeeded);
        assert_eq!(result.final_size_bytes, 0);
    }
}
