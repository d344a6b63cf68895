use serde::{Deserialize, Serialize};

use super::skeleton::Skeleton;
use crate::error::{Result, RigError};

/// Soft-body muscle parameters handed to the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuscleParams {
    pub pin_enabled: bool,
    /// Resistance to bending, 0 (limp) to 1 (rigid)
    pub bend_stiffness: f32,
    /// Resistance to stretching, 0 to 1
    pub stretch_stiffness: f32,
}

impl Default for MuscleParams {
    fn default() -> Self {
        Self {
            pin_enabled: true,
            bend_stiffness: 0.5,
            stretch_stiffness: 0.8,
        }
    }
}

impl MuscleParams {
    pub fn validate(&self) -> Result<()> {
        check_unit("bend_stiffness", self.bend_stiffness)?;
        check_unit("stretch_stiffness", self.stretch_stiffness)
    }
}

fn check_unit(name: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RigError::invalid_parameter(name, value, "must lie in [0, 1]"))
    }
}

/// Muscle layer attached to a finished skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleLayerConfig {
    /// Name of the skeleton this layer deforms
    pub skeleton: String,
    pub params: MuscleParams,
}

/// Validate `params` and bind them to `skeleton`.
pub fn attach(skeleton: &Skeleton, params: MuscleParams) -> Result<MuscleLayerConfig> {
    params.validate()?;
    if skeleton.is_empty() {
        return Err(RigError::invalid_parameter("skeleton", &skeleton.name, "has no segments"));
    }

    log::debug!(
        "{}: muscles attached (pins {}, bend {}, stretch {})",
        skeleton.name,
        params.pin_enabled,
        params.bend_stiffness,
        params.stretch_stiffness
    );

    Ok(MuscleLayerConfig {
        skeleton: skeleton.name.clone(),
        params,
    })
}
