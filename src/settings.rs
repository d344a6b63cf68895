use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::MuscleParams;

pub const CONFY_APP_NAME: &str = "rigsim-rs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    pub tick_delta: f32,
    pub tick_count: u32,
    /// Peak joint angle of the canonical channels, in degrees
    pub amplitude: f32,
    /// Degrees of wave argument per unit of time
    pub frequency: f32,
    pub solver_mode: String,
    pub muscle: MuscleParams,
    pub emit_snapshots: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            tick_delta: 1.0,
            tick_count: 10,
            amplitude: 1.0,
            frequency: 180.0,
            solver_mode: "IKS".to_string(),
            muscle: MuscleParams::default(),
            emit_snapshots: true,
        }
    }
}

impl PlaybackSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "playback").unwrap_or_else(|e| {
            log::warn!("using default playback settings: {}", e);
            Self::default()
        })
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, confy::ConfyError> {
        confy::load_path(path)
    }

    pub fn save(&self) {
        let saved = confy::get_configuration_file_path(CONFY_APP_NAME, "playback")
            .and_then(|path| self.save_to(path));
        if let Err(e) = saved {
            log::warn!("failed to save playback settings: {}", e);
        }
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), confy::ConfyError> {
        confy::store_path(path, self)
    }
}
