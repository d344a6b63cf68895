use thiserror::Error;

/// Errors raised while building or playing a rig.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RigError {
    /// A segment with this id already exists in the skeleton.
    #[error("duplicate segment id '{id}'")]
    DuplicateId { id: String },

    /// The parent named by a new segment has not been added yet.
    #[error("segment '{id}' references unknown parent '{parent}'")]
    UnknownParent { id: String, parent: String },

    /// Lookup of a segment that does not exist.
    #[error("segment '{id}' not found")]
    NotFound { id: String },

    /// A numeric parameter is out of its allowed range.
    #[error("invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Two consecutive chain entries are not parent and child.
    /// Empty chains report empty ids.
    #[error("chain is not connected between '{from}' and '{to}'")]
    DisconnectedChain { from: String, to: String },

    #[error("unsupported solver mode '{mode}'")]
    UnsupportedSolver { mode: String },

    /// A channel already drives this segment axis.
    #[error("channel {segment}.{axis} is already registered")]
    DuplicateChannel { segment: String, axis: String },

    /// Configuration change attempted while a playback session is active.
    #[error("cannot {operation} while playback is active")]
    StateConflict { operation: &'static str },

    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// The IK target lies outside the reach of the constrained chain.
    #[error("target unreachable from '{chain_root}': distance {distance:.4} exceeds reach {reach:.4}")]
    UnreachableTarget {
        chain_root: String,
        distance: f32,
        reach: f32,
    },

    /// A simulation stage produced a non-finite angle.
    #[error("simulation diverged at '{segment}'")]
    SimulationDivergence { segment: String },
}

impl RigError {
    pub fn invalid_parameter(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Errors that mean the rig definition itself is malformed.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::DuplicateId { .. }
                | Self::UnknownParent { .. }
                | Self::NotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::DisconnectedChain { .. }
                | Self::UnsupportedSolver { .. }
                | Self::DuplicateChannel { .. }
        )
    }

    /// Errors reported by playback; committed state is left untouched.
    pub fn is_runtime(&self) -> bool {
        !self.is_construction()
    }
}

pub type Result<T> = std::result::Result<T, RigError>;
