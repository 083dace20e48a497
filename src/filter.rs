//! # Filter Resolution
//!
//! Builds the ffmpeg filter expressions shared by both passes.

use crate::profile::{FrameRate, WidthSelection};

/// Frame-rate conversion, optionally followed by a lanczos downscale that
/// keeps the aspect ratio (`-1` height).
pub fn resolve_filter(width: WidthSelection, frame_rate: FrameRate) -> String {
    match width {
        WidthSelection::Source => format!("fps={}", frame_rate.get()),
        WidthSelection::Fixed(w) => {
            format!("fps={},scale={}:-1:flags=lanczos", frame_rate.get(), w)
        }
    }
}

/// `-vf` value for the palette pass
pub fn palette_filter(filter: &str) -> String {
    format!("{},palettegen", filter)
}

/// `-lavfi` graph for the encode pass; input 1 is the palette
pub fn paletteuse_graph(filter: &str) -> String {
    format!("{} [x]; [x][1:v] paletteuse", filter)
}
