// Canonical gymnastics rig ("horizontal" element)
// Bilateral skeleton, muscle layer, left-leg balance IK and a sinusoidal cycle.

use crate::animation::{AnimationDriver, PlaybackController, WaveKind, Waveform};
use crate::error::Result;
use crate::model::{Axis, Skeleton, Target};
use crate::settings::PlaybackSettings;

pub const SKELETON_NAME: &str = "character_bones";

/// (id, length, parent) in build order.
pub const BONES: &[(&str, f32, Option<&str>)] = &[
    ("spine_root", 0.5, None),
    ("spine_mid", 0.5, Some("spine_root")),
    ("spine_top", 0.5, Some("spine_mid")),
    ("shoulder_left", 0.3, Some("spine_top")),
    ("upper_arm_left", 0.4, Some("shoulder_left")),
    ("forearm_left", 0.4, Some("upper_arm_left")),
    ("hand_left", 0.2, Some("forearm_left")),
    ("shoulder_right", 0.3, Some("spine_top")),
    ("upper_arm_right", 0.4, Some("shoulder_right")),
    ("forearm_right", 0.4, Some("upper_arm_right")),
    ("hand_right", 0.2, Some("forearm_right")),
    ("pelvis", 0.5, Some("spine_root")),
    ("thigh_left", 0.5, Some("pelvis")),
    ("shin_left", 0.5, Some("thigh_left")),
    ("foot_left", 0.3, Some("shin_left")),
    ("thigh_right", 0.5, Some("pelvis")),
    ("shin_right", 0.5, Some("thigh_right")),
    ("foot_right", 0.3, Some("shin_right")),
];

/// Chain held by the balance solver, root to end effector.
pub const BALANCE_CHAIN: &[&str] = &["pelvis", "thigh_left", "shin_left", "foot_left"];

/// Ground contact point for the balance chain, below the pelvis.
pub const BALANCE_TARGET: [f32; 3] = [0.0, -1.0, 0.0];

/// Primary joints swing on sine, their children on cosine.
pub const CHANNELS: &[(&str, WaveKind)] = &[
    ("spine_top", WaveKind::Sine),
    ("upper_arm_left", WaveKind::Sine),
    ("forearm_left", WaveKind::Cosine),
    ("upper_arm_right", WaveKind::Sine),
    ("forearm_right", WaveKind::Cosine),
    ("thigh_left", WaveKind::Sine),
    ("shin_left", WaveKind::Cosine),
    ("thigh_right", WaveKind::Sine),
    ("shin_right", WaveKind::Cosine),
];

pub fn build_skeleton() -> Result<Skeleton> {
    let mut skeleton = Skeleton::new(SKELETON_NAME);
    for &(id, length, parent) in BONES {
        skeleton.add_segment(id, length, parent)?;
    }
    Ok(skeleton)
}

/// X-axis channels for the gait-like cycle.
pub fn build_driver(amplitude: f32, frequency: f32) -> Result<AnimationDriver> {
    let mut driver = AnimationDriver::new();
    for &(id, kind) in CHANNELS {
        let wave = match kind {
            WaveKind::Sine => Waveform::sine(amplitude, frequency),
            WaveKind::Cosine => Waveform::cosine(amplitude, frequency),
        };
        driver.register_waveform(id, Axis::X, wave)?;
    }
    Ok(driver)
}

/// Assemble the full rig, stopped and ready to play.
pub fn build(settings: &PlaybackSettings) -> Result<PlaybackController> {
    let skeleton = build_skeleton()?;
    let driver = build_driver(settings.amplitude, settings.frequency)?;

    let mut playback = PlaybackController::new(skeleton, driver)?;
    playback.attach_muscles(settings.muscle)?;
    let [x, y, z] = BALANCE_TARGET;
    playback.bind_balance(BALANCE_CHAIN, &settings.solver_mode, Target::new(x, y, z))?;

    log::debug!(
        "{}: rig ready ({} segments, {} channels)",
        SKELETON_NAME,
        playback.skeleton().len(),
        playback.driver().len()
    );
    Ok(playback)
}
