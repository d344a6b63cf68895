use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::pose::{Pose, Rotation};
use super::skeleton::Skeleton;
use crate::animation::kinematics;
use crate::error::{Result, RigError};
use crate::solver::{IkChain, IkSolver};

/// IK solver flavour requested from the external solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverMode {
    /// Standard iterative IK solver
    #[serde(rename = "IKS")]
    Iks,
    #[serde(rename = "CCD")]
    Ccd,
    #[serde(rename = "FABRIK")]
    Fabrik,
}

impl SolverMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverMode::Iks => "IKS",
            SolverMode::Ccd => "CCD",
            SolverMode::Fabrik => "FABRIK",
        }
    }
}

impl fmt::Display for SolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverMode {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "IKS" => Ok(SolverMode::Iks),
            "CCD" => Ok(SolverMode::Ccd),
            "FABRIK" => Ok(SolverMode::Fabrik),
            _ => Err(RigError::UnsupportedSolver { mode: s.to_string() }),
        }
    }
}

/// End-effector goal in skeleton space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Target {
    pub position: [f32; 3],
}

impl Target {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }
}

/// IK attached to a connected sub-chain of the skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceBinding {
    /// Segment ids from chain root to end effector
    pub chain: Vec<String>,
    pub mode: SolverMode,
    pub target: Target,
}

impl BalanceBinding {
    pub fn end_effector(&self) -> &str {
        self.chain.last().map(String::as_str).unwrap_or_default()
    }

    /// Ask `solver` for new chain angles given the current pose.
    ///
    /// Only chain segments are returned; the rest of the pose is the caller's.
    pub fn evaluate(
        &self,
        skeleton: &Skeleton,
        pose: &Pose,
        solver: &dyn IkSolver,
    ) -> Result<BTreeMap<String, Rotation>> {
        let chain = IkChain {
            mode: self.mode,
            links: kinematics::chain_links(skeleton, pose, &self.chain)?,
        };
        let mut angles = solver.solve(&chain, &self.target)?;
        angles.retain(|id, _| self.chain.contains(id));
        Ok(angles)
    }
}

/// Bind an IK solver of `mode` to `chain`, ordered root to end effector.
pub fn bind_ik(skeleton: &Skeleton, chain: &[&str], mode: &str, target: Target) -> Result<BalanceBinding> {
    let mode = mode.parse::<SolverMode>()?;

    if chain.is_empty() {
        return Err(RigError::DisconnectedChain {
            from: String::new(),
            to: String::new(),
        });
    }
    for id in chain {
        skeleton.index_of(id)?;
    }
    // a path visits each segment once
    for (i, id) in chain.iter().enumerate().skip(1) {
        if chain[..i].contains(id) {
            return Err(RigError::DisconnectedChain {
                from: chain[i - 1].to_string(),
                to: id.to_string(),
            });
        }
    }
    // siblings share a parent but are not linked to each other
    for pair in chain.windows(2) {
        if !skeleton.is_connected_pair(pair[0], pair[1])? {
            return Err(RigError::DisconnectedChain {
                from: pair[0].to_string(),
                to: pair[1].to_string(),
            });
        }
    }

    log::debug!("{}: bound {} IK over {:?}", skeleton.name, mode, chain);

    Ok(BalanceBinding {
        chain: chain.iter().map(|id| id.to_string()).collect(),
        mode,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legs() -> Skeleton {
        let mut skeleton = Skeleton::new("legs");
        skeleton.add_segment("pelvis", 0.5, None).unwrap();
        for side in ["left", "right"] {
            let thigh = format!("thigh_{side}");
            let shin = format!("shin_{side}");
            skeleton.add_segment(&thigh, 0.5, Some("pelvis")).unwrap();
            skeleton.add_segment(&shin, 0.5, Some(thigh.as_str())).unwrap();
            skeleton.add_segment(&format!("foot_{side}"), 0.3, Some(shin.as_str())).unwrap();
        }
        skeleton
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("IKS".parse::<SolverMode>().unwrap(), SolverMode::Iks);
        assert_eq!("fabrik".parse::<SolverMode>().unwrap(), SolverMode::Fabrik);
        assert_eq!(
            "spline".parse::<SolverMode>().unwrap_err(),
            RigError::UnsupportedSolver { mode: "spline".into() }
        );
    }

    #[test]
    fn test_bind_down_the_leg() {
        let skeleton = legs();
        let binding = bind_ik(
            &skeleton,
            &["pelvis", "thigh_left", "shin_left", "foot_left"],
            "IKS",
            Target::new(0.0, -1.0, 0.0),
        )
        .unwrap();
        assert_eq!(binding.mode, SolverMode::Iks);
        assert_eq!(binding.end_effector(), "foot_left");
    }

    #[test]
    fn test_bind_up_the_leg() {
        let skeleton = legs();
        assert!(bind_ik(&skeleton, &["foot_right", "shin_right", "thigh_right"], "CCD", Target::default()).is_ok());
    }

    #[test]
    fn test_disconnected_chain() {
        let skeleton = legs();
        let err = bind_ik(&skeleton, &["thigh_left", "shin_right"], "IKS", Target::default()).unwrap_err();
        assert_eq!(
            err,
            RigError::DisconnectedChain {
                from: "thigh_left".into(),
                to: "shin_right".into()
            }
        );

        // skipping a joint breaks contiguity too
        assert!(matches!(
            bind_ik(&skeleton, &["pelvis", "shin_left"], "IKS", Target::default()),
            Err(RigError::DisconnectedChain { .. })
        ));
    }

    #[test]
    fn test_revisiting_chain_rejected() {
        let skeleton = legs();
        let err = bind_ik(
            &skeleton,
            &["pelvis", "thigh_left", "pelvis", "thigh_left"],
            "IKS",
            Target::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RigError::DisconnectedChain {
                from: "thigh_left".into(),
                to: "pelvis".into()
            }
        );
    }

    #[test]
    fn test_sibling_pair_rejected() {
        let skeleton = legs();
        assert_eq!(
            bind_ik(&skeleton, &["thigh_left", "thigh_right"], "IKS", Target::default()).unwrap_err(),
            RigError::DisconnectedChain {
                from: "thigh_left".into(),
                to: "thigh_right".into()
            }
        );
    }

    #[test]
    fn test_empty_chain_and_unknown_segment() {
        let skeleton = legs();
        assert!(matches!(
            bind_ik(&skeleton, &[], "IKS", Target::default()),
            Err(RigError::DisconnectedChain { .. })
        ));
        assert_eq!(
            bind_ik(&skeleton, &["pelvis", "tail"], "IKS", Target::default()).unwrap_err(),
            RigError::NotFound { id: "tail".into() }
        );
    }

    #[test]
    fn test_unsupported_mode_rejected_first() {
        let skeleton = legs();
        assert!(matches!(
            bind_ik(&skeleton, &["pelvis"], "???", Target::default()),
            Err(RigError::UnsupportedSolver { .. })
        ));
    }
}
