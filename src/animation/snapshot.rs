use serde::{Deserialize, Serialize};

use super::kinematics;
use super::playback::PlaybackState;
use crate::model::{Rotation, Skeleton};

/// Read-only view of a rig for hosts and viewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    pub time: f32,
    pub state: PlaybackState,
    pub segments: Vec<SegmentSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSnapshot {
    pub id: String,
    pub parent: Option<String>,
    pub length: f32,
    pub rotation: Rotation,
    pub head: [f32; 3],
    pub tail: [f32; 3],
}

impl PoseSnapshot {
    pub fn capture(skeleton: &Skeleton, time: f32, state: PlaybackState) -> Self {
        let world = kinematics::forward(skeleton, &skeleton.pose());
        let segments = skeleton
            .iter()
            .zip(world)
            .map(|(segment, placed)| SegmentSnapshot {
                id: segment.id.clone(),
                parent: skeleton.parent_of(segment).map(|p| p.id.clone()),
                length: segment.length,
                rotation: segment.rotation,
                head: [placed.head.x, placed.head.y, placed.head.z],
                tail: [placed.tail.x, placed.tail.y, placed.tail.z],
            })
            .collect();

        Self { time, state, segments }
    }

    pub fn segment(&self, id: &str) -> Option<&SegmentSnapshot> {
        self.segments.iter().find(|s| s.id == id)
    }
}
