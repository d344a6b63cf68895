use std::collections::BTreeMap;

use approx::assert_abs_diff_eq;

use rigsim::animation::{AnimationDriver, PlaybackController, PlaybackState};
use rigsim::model::{Axis, MuscleParams, Rotation, Target};
use rigsim::rig;
use rigsim::settings::PlaybackSettings;
use rigsim::solver::{IkChain, IkSolver};
use rigsim::{Result, RigError};

fn rx(playback: &PlaybackController, id: &str) -> f32 {
    playback.pose().get(id).unwrap().x
}

#[test]
fn test_canonical_rig_plays_ten_ticks() {
    let mut playback = rig::build(&PlaybackSettings::default()).unwrap();
    assert_eq!(playback.skeleton().len(), 18);

    let muscles = playback.muscles().unwrap();
    assert!(muscles.params.pin_enabled);
    assert_eq!(muscles.params.bend_stiffness, 0.5);
    assert_eq!(muscles.params.stretch_stiffness, 0.8);
    assert_eq!(playback.balance().unwrap().mode.as_str(), "IKS");

    playback.start().unwrap();
    playback.tick(1.0).unwrap();

    let half_turn = 180.0_f32.to_radians();
    assert_abs_diff_eq!(rx(&playback, "spine_top"), half_turn.sin(), epsilon = 1e-5);
    assert_abs_diff_eq!(rx(&playback, "thigh_left"), half_turn.sin(), epsilon = 1e-5);
    assert_abs_diff_eq!(rx(&playback, "forearm_left"), half_turn.cos(), epsilon = 1e-5);
    assert_abs_diff_eq!(rx(&playback, "shin_right"), -1.0, epsilon = 1e-5);

    for _ in 1..10 {
        playback.tick(1.0).unwrap();
    }
    assert_eq!(playback.clock(), 10.0);
    assert_eq!(playback.state(), PlaybackState::Playing);

    // undriven joints never move
    assert_eq!(playback.pose().get("pelvis"), Some(Rotation::ZERO));
    assert_eq!(playback.pose().get("hand_left"), Some(Rotation::ZERO));
}

#[test]
fn test_stop_start_resets_clock() {
    let mut playback = rig::build(&PlaybackSettings::default()).unwrap();
    for ticks in [0, 3, 12] {
        playback.start().unwrap();
        for _ in 0..ticks {
            playback.tick(0.5).unwrap();
        }
        playback.stop().unwrap();
        playback.start().unwrap();
        assert_eq!(playback.clock(), 0.0);
        playback.stop().unwrap();
    }
}

#[test]
fn test_disconnected_balance_chain() {
    let mut playback = rig::build(&PlaybackSettings::default()).unwrap();
    let err = playback
        .bind_balance(&["hand_left", "foot_right"], "IKS", Target::default())
        .unwrap_err();
    assert_eq!(
        err,
        RigError::DisconnectedChain {
            from: "hand_left".into(),
            to: "foot_right".into()
        }
    );
    assert!(err.is_construction());
}

struct FlakySolver {
    fail_after: f32,
}

impl IkSolver for FlakySolver {
    fn solve(&self, chain: &IkChain, _target: &Target) -> Result<BTreeMap<String, Rotation>> {
        let root = &chain.links[0];
        // driven thigh angle encodes time, fail once it passes the threshold
        if chain.links[1].rotation.x > self.fail_after {
            return Err(RigError::UnreachableTarget {
                chain_root: root.id.clone(),
                distance: 99.0,
                reach: 1.8,
            });
        }
        Ok(chain.links.iter().map(|l| (l.id.clone(), l.rotation)).collect())
    }
}

#[test]
fn test_failed_tick_keeps_committed_pose() {
    let settings = PlaybackSettings {
        amplitude: 45.0,
        ..Default::default()
    };
    let skeleton = rig::build_skeleton().unwrap();
    let driver = rig::build_driver(settings.amplitude, settings.frequency).unwrap();
    let mut playback = PlaybackController::new(skeleton, driver)
        .unwrap()
        .with_ik_solver(FlakySolver { fail_after: 40.0 });
    playback.attach_muscles(MuscleParams::default()).unwrap();
    playback
        .bind_balance(rig::BALANCE_CHAIN, "IKS", Target::new(0.0, -1.0, 0.0))
        .unwrap();

    playback.start().unwrap();
    playback.tick(0.1).unwrap();
    let before = playback.pose();
    let snapshot_before = playback.snapshot();

    // thigh reaches 45 * sin(90) = 45 at t = 0.5
    let err = playback.tick(0.4).unwrap_err();
    assert!(matches!(err, RigError::UnreachableTarget { .. }));
    assert!(err.is_runtime());
    assert_eq!(playback.pose(), before);
    assert_eq!(playback.snapshot(), snapshot_before);
    assert_abs_diff_eq!(playback.clock(), 0.1, epsilon = 1e-6);

    // smaller step still succeeds from the committed state
    playback.tick(0.05).unwrap();
    assert_abs_diff_eq!(playback.clock(), 0.15, epsilon = 1e-6);
}

#[test]
fn test_driver_determinism_on_canonical_channels() {
    let driver = rig::build_driver(1.0, 180.0).unwrap();
    for t in [0.0, 0.3, 1.0, 4.75] {
        assert_eq!(driver.evaluate(t), driver.evaluate(t));
    }
    assert_eq!(driver.len(), rig::CHANNELS.len());
}

#[test]
fn test_custom_closure_channel() {
    let skeleton = rig::build_skeleton().unwrap();
    let mut driver = AnimationDriver::new();
    driver.register_channel("spine_mid", Axis::Z, |t| 2.0 * t).unwrap();
    let mut playback = PlaybackController::new(skeleton, driver).unwrap();

    playback.start().unwrap();
    playback.tick(1.5).unwrap();
    assert_eq!(playback.pose().get("spine_mid"), Some(Rotation::new(0.0, 0.0, 3.0)));

    let snapshot = playback.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"spine_mid\""));
}
