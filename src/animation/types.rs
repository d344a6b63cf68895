// Animation channel types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Axis;

/// Function of time producing a joint angle in degrees.
pub type ChannelFn = Box<dyn Fn(f32) -> f32>;

/// Segment axis driven by one channel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChannelKey {
    pub segment: String,
    pub axis: Axis,
}

impl ChannelKey {
    pub fn new(segment: impl Into<String>, axis: Axis) -> Self {
        Self {
            segment: segment.into(),
            axis,
        }
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.segment, self.axis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveKind {
    Sine,
    Cosine,
}

/// `amplitude * trig(frequency * t + phase)`, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    pub kind: WaveKind,
    pub amplitude: f32,
    /// Degrees of argument per unit of time
    pub frequency: f32,
    pub phase: f32,
}

impl Waveform {
    pub fn sine(amplitude: f32, frequency: f32) -> Self {
        Self {
            kind: WaveKind::Sine,
            amplitude,
            frequency,
            phase: 0.0,
        }
    }

    pub fn cosine(amplitude: f32, frequency: f32) -> Self {
        Self {
            kind: WaveKind::Cosine,
            amplitude,
            frequency,
            phase: 0.0,
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn sample(&self, t: f32) -> f32 {
        let arg = (self.frequency * t + self.phase).to_radians();
        let value = match self.kind {
            WaveKind::Sine => arg.sin(),
            WaveKind::Cosine => arg.cos(),
        };
        self.amplitude * value
    }

    pub fn into_fn(self) -> ChannelFn {
        Box::new(move |t| self.sample(t))
    }
}

/// A registered channel
pub struct AnimationChannel {
    pub key: ChannelKey,
    pub func: ChannelFn,
}

impl fmt::Debug for AnimationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationChannel").field("key", &self.key).finish_non_exhaustive()
    }
}
