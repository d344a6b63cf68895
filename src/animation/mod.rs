// Animation system module
// Channels, forward kinematics and playback

pub mod driver;
pub mod kinematics;
pub mod playback;
pub mod snapshot;
pub mod types;

pub use driver::AnimationDriver;
pub use playback::{PlaybackController, PlaybackState};
pub use snapshot::{PoseSnapshot, SegmentSnapshot};
pub use types::*;
