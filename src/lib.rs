//! Procedural rig-and-animation pipeline.
//!
//! Builds a bone hierarchy, layers a soft-body muscle configuration and an
//! IK balance binding over it, drives joints with functions of time and
//! plays the result one tick at a time. The IK and soft-body engines are
//! external and plug in through [`solver::IkSolver`] and
//! [`solver::SoftBodySimulator`].

pub mod animation;
pub mod error;
pub mod model;
pub mod rig;
pub mod settings;
pub mod solver;

pub use error::{Result, RigError};
