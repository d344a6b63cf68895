use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Rotation axis of a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "rx",
            Axis::Y => "ry",
            Axis::Z => "rz",
        };
        f.write_str(name)
    }
}

/// Parent-relative rotation of a segment, Euler angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub const ZERO: Rotation = Rotation {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, angle: f32) {
        match axis {
            Axis::X => self.x = angle,
            Axis::Y => self.y = angle,
            Axis::Z => self.z = angle,
        }
    }

    /// First non-finite axis, if any
    pub fn non_finite_axis(&self) -> Option<Axis> {
        Axis::ALL.into_iter().find(|&a| !self.get(a).is_finite())
    }
}

/// Local rotations of every segment in a skeleton, keyed by segment id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    rotations: BTreeMap<String, Rotation>,
}

impl Pose {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Rotation> {
        self.rotations.get(id).copied()
    }

    pub fn set(&mut self, id: impl Into<String>, rotation: Rotation) {
        self.rotations.insert(id.into(), rotation);
    }

    /// Set a single axis, leaving the other two untouched.
    pub fn set_axis(&mut self, id: &str, axis: Axis, angle: f32) {
        self.rotations
            .entry(id.to_string())
            .or_default()
            .set(axis, angle);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rotation)> {
        self.rotations.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }
}

impl FromIterator<(String, Rotation)> for Pose {
    fn from_iter<I: IntoIterator<Item = (String, Rotation)>>(iter: I) -> Self {
        Self {
            rotations: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_axis_keeps_other_axes() {
        let mut pose = Pose::new();
        pose.set("thigh_left", Rotation::new(1.0, 2.0, 3.0));
        pose.set_axis("thigh_left", Axis::Y, -4.0);
        assert_eq!(pose.get("thigh_left"), Some(Rotation::new(1.0, -4.0, 3.0)));
    }

    #[test]
    fn test_set_axis_on_missing_segment() {
        let mut pose = Pose::new();
        pose.set_axis("shin_left", Axis::X, 0.5);
        assert_eq!(pose.get("shin_left"), Some(Rotation::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_non_finite_axis() {
        assert_eq!(Rotation::ZERO.non_finite_axis(), None);
        assert_eq!(Rotation::new(0.0, f32::NAN, 0.0).non_finite_axis(), Some(Axis::Y));
    }

    #[test]
    fn test_axis_display() {
        assert_eq!(Axis::X.to_string(), "rx");
        assert_eq!(Axis::Z.to_string(), "rz");
    }
}
