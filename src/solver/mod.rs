// Boundaries to the external IK and soft-body engines

use std::collections::BTreeMap;

use nalgebra_glm as glm;

use crate::error::Result;
use crate::model::{MuscleLayerConfig, Pose, Rotation, Skeleton, SolverMode, Target};

mod reference;

pub use reference::{ReachCheckSolver, RigidMuscles};

/// One segment of a constrained chain as seen by the IK solver.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainLink {
    pub id: String,
    pub length: f32,
    pub rotation: Rotation,
    pub head: glm::Vec3,
    pub tail: glm::Vec3,
}

/// Ordered chain, root first, plus the requested solver flavour.
#[derive(Debug, Clone, PartialEq)]
pub struct IkChain {
    pub mode: SolverMode,
    pub links: Vec<ChainLink>,
}

impl IkChain {
    /// Summed segment length
    pub fn reach(&self) -> f32 {
        self.links.iter().map(|l| l.length).sum()
    }

    pub fn root(&self) -> Option<&ChainLink> {
        self.links.first()
    }
}

/// Inverse-kinematics engine.
///
/// Implementations must be deterministic: the same chain and target always
/// produce the same angles. An out-of-reach target is reported as
/// `RigError::UnreachableTarget`.
pub trait IkSolver {
    fn solve(&self, chain: &IkChain, target: &Target) -> Result<BTreeMap<String, Rotation>>;
}

/// Soft-body muscle engine.
///
/// May fail with `RigError::SimulationDivergence`.
pub trait SoftBodySimulator {
    fn simulate_step(&self, config: &MuscleLayerConfig, skeleton: &Skeleton, pose: &Pose) -> Result<Pose>;
}
