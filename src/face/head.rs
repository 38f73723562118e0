//! Head orientation from the face-plane triangle.

use glam::Vec3;
use std::f32::consts::PI;

use super::Head;
use crate::landmark::{face as idx, LandmarkSet};
use crate::math;

pub(super) fn calc_head(landmarks: &LandmarkSet) -> Head {
    let (top_left, top_right, bottom_mid) = face_plane(landmarks);
    let mut rotate = math::plane_roll_pitch_yaw(top_left, top_right, bottom_mid);

    // Center and rough dimensions of the face detection box
    let mid_point = top_left.lerp(top_right, 0.5);
    let width = top_left.distance(top_right);
    let height = mid_point.distance(bottom_mid);

    // Flip pitch and yaw into the rig's sign convention; roll is kept
    rotate.x *= -1.0;
    rotate.y *= -1.0;

    Head {
        x: rotate.x * PI,
        y: rotate.y * PI,
        z: rotate.z * PI,
        width,
        height,
        position: mid_point.lerp(bottom_mid, 0.5),
        normalized_angles: rotate,
    }
}

/// Three points spanning the face plane: the two outer brow points and
/// the midpoint of the two jaw points.
fn face_plane(landmarks: &LandmarkSet) -> (Vec3, Vec3, Vec3) {
    let top_left = landmarks.point(idx::BROW_OUTER_L);
    let top_right = landmarks.point(idx::BROW_OUTER_R);
    let bottom_mid = landmarks
        .point(idx::JAW_R)
        .lerp(landmarks.point(idx::JAW_L), 0.5);

    (top_left, top_right, bottom_mid)
}
