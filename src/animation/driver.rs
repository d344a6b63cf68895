// Animation driver
// Evaluates every registered channel at a point in time.

use std::collections::BTreeMap;

use super::types::{AnimationChannel, ChannelKey, Waveform};
use crate::error::{Result, RigError};
use crate::model::Axis;

/// Collection of time-driven joint channels.
///
/// Evaluation is a pure function of time: the driver keeps no state
/// between calls.
#[derive(Debug, Default)]
pub struct AnimationDriver {
    channels: Vec<AnimationChannel>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive `axis` of `segment` with `f(t)`.
    pub fn register_channel<F>(&mut self, segment: &str, axis: Axis, f: F) -> Result<()>
    where
        F: Fn(f32) -> f32 + 'static,
    {
        let key = ChannelKey::new(segment, axis);
        if self.channels.iter().any(|c| c.key == key) {
            return Err(RigError::DuplicateChannel {
                segment: segment.to_string(),
                axis: axis.to_string(),
            });
        }

        log::debug!("registered channel {}", key);
        self.channels.push(AnimationChannel {
            key,
            func: Box::new(f),
        });
        Ok(())
    }

    pub fn register_waveform(&mut self, segment: &str, axis: Axis, wave: Waveform) -> Result<()> {
        self.register_channel(segment, axis, move |t| wave.sample(t))
    }

    /// Angle of every channel at time `t`.
    pub fn evaluate(&self, t: f32) -> BTreeMap<ChannelKey, f32> {
        self.channels
            .iter()
            .map(|c| (c.key.clone(), (c.func)(t)))
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ChannelKey> {
        self.channels.iter().map(|c| &c.key)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
