// Playback controller
// Owns the clock and the committed pose; every tick re-evaluates the whole rig.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::driver::AnimationDriver;
use super::snapshot::PoseSnapshot;
use crate::error::{Result, RigError};
use crate::model::{self, BalanceBinding, MuscleLayerConfig, MuscleParams, Pose, Skeleton, Target};
use crate::solver::{IkSolver, ReachCheckSolver, RigidMuscles, SoftBodySimulator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Stopped,
    Playing,
}

impl PlaybackState {
    fn as_str(&self) -> &'static str {
        match self {
            PlaybackState::Stopped => "stopped",
            PlaybackState::Playing => "playing",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drives a rig through time.
///
/// Starting playback resets the clock to zero and the skeleton to its rest
/// pose. A tick either commits a complete new pose and clock value or leaves
/// both untouched. Calling `start` while already playing is an error.
pub struct PlaybackController {
    skeleton: Skeleton,
    driver: AnimationDriver,
    muscles: Option<MuscleLayerConfig>,
    balance: Option<BalanceBinding>,
    ik_solver: Box<dyn IkSolver>,
    simulator: Box<dyn SoftBodySimulator>,
    clock: f32,
    state: PlaybackState,
}

impl PlaybackController {
    /// Every channel in `driver` must target a segment of `skeleton`.
    pub fn new(skeleton: Skeleton, driver: AnimationDriver) -> Result<Self> {
        if let Some(key) = driver.keys().find(|k| !skeleton.contains(&k.segment)) {
            return Err(RigError::NotFound {
                id: key.segment.clone(),
            });
        }

        Ok(Self {
            skeleton,
            driver,
            muscles: None,
            balance: None,
            ik_solver: Box::new(ReachCheckSolver::default()),
            simulator: Box::new(RigidMuscles),
            clock: 0.0,
            state: PlaybackState::Stopped,
        })
    }

    pub fn with_ik_solver(mut self, solver: impl IkSolver + 'static) -> Self {
        self.ik_solver = Box::new(solver);
        self
    }

    pub fn with_simulator(mut self, simulator: impl SoftBodySimulator + 'static) -> Self {
        self.simulator = Box::new(simulator);
        self
    }

    pub fn attach_muscles(&mut self, params: MuscleParams) -> Result<&MuscleLayerConfig> {
        self.ensure_stopped("attach muscles")?;
        let config = model::attach(&self.skeleton, params)?;
        Ok(&*self.muscles.insert(config))
    }

    pub fn bind_balance(&mut self, chain: &[&str], mode: &str, target: Target) -> Result<&BalanceBinding> {
        self.ensure_stopped("bind IK")?;
        let binding = model::bind_ik(&self.skeleton, chain, mode, target)?;
        Ok(&*self.balance.insert(binding))
    }

    fn ensure_stopped(&self, operation: &'static str) -> Result<()> {
        match self.state {
            PlaybackState::Stopped => Ok(()),
            PlaybackState::Playing => Err(RigError::StateConflict { operation }),
        }
    }

    pub fn start(&mut self) -> Result<()> {
        if self.state == PlaybackState::Playing {
            return Err(RigError::InvalidState {
                operation: "start",
                state: self.state.as_str(),
            });
        }

        self.clock = 0.0;
        let rest = self.skeleton.rest_pose();
        self.skeleton.set_pose(&rest);
        self.state = PlaybackState::Playing;
        log::info!("{}: playback started", self.skeleton.name);
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        if self.state == PlaybackState::Stopped {
            return Err(RigError::InvalidState {
                operation: "stop",
                state: self.state.as_str(),
            });
        }

        self.state = PlaybackState::Stopped;
        log::info!("{}: playback stopped at t={}", self.skeleton.name, self.clock);
        Ok(())
    }

    /// Advance the clock by `delta` and re-evaluate the rig.
    pub fn tick(&mut self, delta: f32) -> Result<()> {
        if self.state != PlaybackState::Playing {
            return Err(RigError::InvalidState {
                operation: "tick",
                state: self.state.as_str(),
            });
        }
        if !(delta.is_finite() && delta >= 0.0) {
            return Err(RigError::invalid_parameter("delta", delta, "must be finite and non-negative"));
        }

        let time = self.clock + delta;
        let pose = self.compute_pose(time).inspect_err(|e| {
            log::warn!("{}: tick to t={} failed: {}", self.skeleton.name, time, e);
        })?;

        self.skeleton.set_pose(&pose);
        self.clock = time;
        log::trace!("{}: t={}", self.skeleton.name, time);
        Ok(())
    }

    /// Pose the rig would have at `time`, without committing anything.
    pub fn evaluate_at(&self, time: f32) -> Result<Pose> {
        self.compute_pose(time)
    }

    fn compute_pose(&self, time: f32) -> Result<Pose> {
        let mut pose = self.skeleton.pose();

        for (key, angle) in self.driver.evaluate(time) {
            if !angle.is_finite() {
                return Err(RigError::SimulationDivergence { segment: key.segment });
            }
            pose.set_axis(&key.segment, key.axis, angle);
        }

        if let Some(muscles) = &self.muscles {
            pose = self.simulator.simulate_step(muscles, &self.skeleton, &pose)?;
        }

        if let Some(balance) = &self.balance {
            let angles = balance.evaluate(&self.skeleton, &pose, self.ik_solver.as_ref())?;
            for (id, rotation) in angles {
                if rotation.non_finite_axis().is_some() {
                    return Err(RigError::SimulationDivergence { segment: id });
                }
                pose.set(id, rotation);
            }
        }

        Ok(pose)
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn muscles(&self) -> Option<&MuscleLayerConfig> {
        self.muscles.as_ref()
    }

    pub fn balance(&self) -> Option<&BalanceBinding> {
        self.balance.as_ref()
    }

    pub fn pose(&self) -> Pose {
        self.skeleton.pose()
    }

    pub fn snapshot(&self) -> PoseSnapshot {
        PoseSnapshot::capture(&self.skeleton, self.clock, self.state)
    }
}
