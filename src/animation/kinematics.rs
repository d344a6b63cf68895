// Forward kinematics
// Each segment points along its local +Y axis; the root head sits at the origin.

use nalgebra_glm as glm;

use crate::error::Result;
use crate::model::{Pose, Rotation, Skeleton};
use crate::solver::ChainLink;

/// World-space placement of one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub head: glm::Vec3,
    pub tail: glm::Vec3,
    pub orientation: glm::Quat,
}

/// Convert Euler degrees to a quaternion, applying X then Y then Z.
pub fn rotation_to_quat(rotation: &Rotation) -> glm::Quat {
    let qx = glm::quat_angle_axis(rotation.x.to_radians(), &glm::vec3(1.0, 0.0, 0.0));
    let qy = glm::quat_angle_axis(rotation.y.to_radians(), &glm::vec3(0.0, 1.0, 0.0));
    let qz = glm::quat_angle_axis(rotation.z.to_radians(), &glm::vec3(0.0, 0.0, 1.0));
    qz * qy * qx
}

/// Compute world transforms for every segment, indexed like the skeleton.
///
/// Segments missing from `pose` are placed with their stored rotation.
pub fn forward(skeleton: &Skeleton, pose: &Pose) -> Vec<WorldTransform> {
    let mut out: Vec<WorldTransform> = Vec::with_capacity(skeleton.len());
    let up = glm::vec3(0.0, 1.0, 0.0);

    for segment in skeleton.iter() {
        let local = rotation_to_quat(&pose.get(&segment.id).unwrap_or(segment.rotation));

        // parent-first order guarantees the parent is already placed
        let (head, parent_orientation) = match segment.parent {
            Some(p) => (out[p].tail, out[p].orientation),
            None => (glm::vec3(0.0, 0.0, 0.0), glm::quat_identity()),
        };

        let orientation = parent_orientation * local;
        let tail = head + glm::quat_rotate_vec3(&orientation, &up) * segment.length;
        out.push(WorldTransform {
            head,
            tail,
            orientation,
        });
    }

    out
}

/// Resolve `chain` ids into links carrying length, rotation and world head.
pub fn chain_links(skeleton: &Skeleton, pose: &Pose, chain: &[String]) -> Result<Vec<ChainLink>> {
    let world = forward(skeleton, pose);
    chain
        .iter()
        .map(|id| {
            let idx = skeleton.index_of(id)?;
            let segment = skeleton.get_segment(id)?;
            Ok(ChainLink {
                id: id.clone(),
                length: segment.length,
                rotation: pose.get(id).unwrap_or(segment.rotation),
                head: world[idx].head,
                tail: world[idx].tail,
            })
        })
        .collect()
}
