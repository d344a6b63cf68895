// Bone hierarchy
// Segments are stored parent-first; a parent is referenced by index only.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::pose::{Pose, Rotation};
use crate::error::{Result, RigError};

/// One rigid link of the skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub length: f32,
    /// Index of the parent in the owning skeleton (None for the root)
    pub parent: Option<usize>,
    pub rotation: Rotation,
}

impl Segment {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Single-rooted tree of segments.
///
/// Segments can only be added under a parent that already exists, so the
/// insertion order is always a valid parent-before-child traversal and the
/// tree cannot contain cycles.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    pub name: String,
    segments: Vec<Segment>,
    index: HashMap<String, usize>,
}

impl Skeleton {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            segments: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a segment under `parent` (or as the root when `parent` is None).
    pub fn add_segment(&mut self, id: &str, length: f32, parent: Option<&str>) -> Result<&Segment> {
        if self.index.contains_key(id) {
            return Err(RigError::DuplicateId { id: id.to_string() });
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(RigError::invalid_parameter("length", length, "must be positive"));
        }

        let parent_idx = match parent {
            Some(parent_id) => match self.index.get(parent_id) {
                Some(&idx) => Some(idx),
                None => {
                    return Err(RigError::UnknownParent {
                        id: id.to_string(),
                        parent: parent_id.to_string(),
                    });
                }
            },
            None if !self.segments.is_empty() => {
                // a second root would split the tree
                return Err(RigError::invalid_parameter("parent", "none", "skeleton already has a root"));
            }
            None => None,
        };

        let idx = self.segments.len();
        self.segments.push(Segment {
            id: id.to_string(),
            length,
            parent: parent_idx,
            rotation: Rotation::ZERO,
        });
        self.index.insert(id.to_string(), idx);
        log::debug!("{}: added segment '{}' (length {}, parent {:?})", self.name, id, length, parent);

        Ok(&self.segments[idx])
    }

    pub fn get_segment(&self, id: &str) -> Result<&Segment> {
        self.index_of(id).map(|idx| &self.segments[idx])
    }

    pub fn index_of(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| RigError::NotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn root(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn parent_of(&self, segment: &Segment) -> Option<&Segment> {
        segment.parent.map(|idx| &self.segments[idx])
    }

    /// Segments in parent-before-child order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn children(&self, id: &str) -> Result<Vec<&Segment>> {
        let idx = self.index_of(id)?;
        Ok(self.segments.iter().filter(|s| s.parent == Some(idx)).collect())
    }

    /// Walk parent pointers from `id` (exclusive) up to the root.
    pub fn ancestors(&self, id: &str) -> Result<Ancestors<'_>> {
        let idx = self.index_of(id)?;
        Ok(Ancestors {
            skeleton: self,
            next: self.segments[idx].parent,
        })
    }

    /// True when one of the two segments is the direct parent of the other.
    pub fn is_connected_pair(&self, a: &str, b: &str) -> Result<bool> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        Ok(self.segments[ia].parent == Some(ib) || self.segments[ib].parent == Some(ia))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All rotations zeroed
    pub fn rest_pose(&self) -> Pose {
        self.segments
            .iter()
            .map(|s| (s.id.clone(), Rotation::ZERO))
            .collect()
    }

    pub fn pose(&self) -> Pose {
        self.segments
            .iter()
            .map(|s| (s.id.clone(), s.rotation))
            .collect()
    }

    /// Write every rotation present in `pose` back onto the segments.
    /// Ids the skeleton does not know are ignored.
    pub fn set_pose(&mut self, pose: &Pose) {
        for segment in &mut self.segments {
            if let Some(rotation) = pose.get(&segment.id) {
                segment.rotation = rotation;
            }
        }
    }
}

pub struct Ancestors<'a> {
    skeleton: &'a Skeleton,
    next: Option<usize>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = &self.skeleton.segments[self.next?];
        self.next = segment.parent;
        Some(segment)
    }
}
