use std::collections::BTreeMap;

use nalgebra_glm as glm;

use super::{IkChain, IkSolver, SoftBodySimulator};
use crate::error::{Result, RigError};
use crate::model::{MuscleLayerConfig, Pose, Rotation, Skeleton, Target};

/// Deterministic stand-in for an IK engine.
///
/// Verifies the target is within the chain's reach and holds the chain's
/// current angles. Useful headless and as a test double.
#[derive(Debug, Clone, Copy)]
pub struct ReachCheckSolver {
    pub tolerance: f32,
}

impl Default for ReachCheckSolver {
    fn default() -> Self {
        Self { tolerance: 1e-4 }
    }
}

impl IkSolver for ReachCheckSolver {
    fn solve(&self, chain: &IkChain, target: &Target) -> Result<BTreeMap<String, Rotation>> {
        let Some(root) = chain.root() else {
            return Ok(BTreeMap::new());
        };

        let goal = glm::make_vec3(&target.position);
        let distance = glm::distance(&root.head, &goal);
        let reach = chain.reach();
        if !distance.is_finite() || distance > reach + self.tolerance {
            return Err(RigError::UnreachableTarget {
                chain_root: root.id.clone(),
                distance,
                reach,
            });
        }

        Ok(chain
            .links
            .iter()
            .map(|link| (link.id.clone(), link.rotation))
            .collect())
    }
}

/// Muscle layer that never deforms the pose.
///
/// Still rejects non-finite rotations the way a real solver would blow up.
#[derive(Debug, Clone, Copy, Default)]
pub struct RigidMuscles;

impl SoftBodySimulator for RigidMuscles {
    fn simulate_step(&self, _config: &MuscleLayerConfig, _skeleton: &Skeleton, pose: &Pose) -> Result<Pose> {
        if let Some((id, _)) = pose.iter().find(|(_, r)| r.non_finite_axis().is_some()) {
            return Err(RigError::SimulationDivergence { segment: id.to_string() });
        }
        Ok(pose.clone())
    }
}
