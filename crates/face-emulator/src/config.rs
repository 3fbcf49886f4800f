//! Emulator configuration.

use std::path::PathBuf;

/// Configuration for the emulator window and asset lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct EmulatorConfig {
    /// Directory holding `background.png`, `minute_hand.png`,
    /// `hour_hand.png`.
    pub assets_dir: PathBuf,
    /// Initial window size in logical pixels (the window is square).
    pub window_size: u32,
    /// Fixed display density; `None` follows the window's scale factor.
    pub density_override: Option<f32>,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            window_size: 480,
            density_override: None,
        }
    }
}
