//! Hip and spine rotation, hip placement, and the torso rigging pass.

use glam::Vec3;
use std::f32::consts::PI;

use super::Hips;
use crate::landmark::{pose as idx, LandmarkSet};
use crate::math::{remap, roll_pitch_yaw};

/// Horizontal anchor the hip offset is measured from
const HIP_ANCHOR_X: f32 = 0.65;

/// Normalized yaw window over which tilt is faded out; past the high
/// bound the two torso points are nearly collinear in the image and the
/// tilt estimate is unreliable
const TURN_DAMP_LOW: f32 = 0.2;
const TURN_DAMP_HIGH: f32 = 0.4;

pub(super) fn calc_hips(landmarks: &LandmarkSet) -> (Hips, Vec3) {
    let p = |i: usize| landmarks.point(i);

    let hip_left_2d = landmarks.point2(idx::HIP_L);
    let hip_right_2d = landmarks.point2(idx::HIP_R);
    let shoulder_left_2d = landmarks.point2(idx::SHOULDER_L);
    let shoulder_right_2d = landmarks.point2(idx::SHOULDER_R);

    // Factor 1.0 reduces these to the right-side points. Kept literally
    // from the reference derivation; see DESIGN.md.
    let hip_center_2d = hip_left_2d.lerp(hip_right_2d, 1.0);
    let shoulder_center_2d = shoulder_left_2d.lerp(shoulder_right_2d, 1.0);
    let spine_length = hip_center_2d.distance(shoulder_center_2d);

    let hips = Hips {
        world_position: Vec3::ZERO,
        position: Vec3::new(
            (-(hip_center_2d.x - HIP_ANCHOR_X)).clamp(-1.0, 1.0),
            0.0,
            (spine_length - 1.0).clamp(-2.0, 0.0),
        ),
        rotation: stabilize_torso(roll_pitch_yaw(p(idx::HIP_L), p(idx::HIP_R))),
    };

    let spine = stabilize_torso(roll_pitch_yaw(p(idx::SHOULDER_L), p(idx::SHOULDER_R)));

    rig_hips(hips, spine)
}

/// Shared cleanup for the hip and shoulder rotation triples.
fn stabilize_torso(mut rotation: Vec3) -> Vec3 {
    // Recenter the yaw seam so a camera-facing torso reads as zero
    if rotation.y > 0.5 {
        rotation.y -= 2.0;
    }
    rotation.y += 0.5;

    // Fold the tilt sign so it does not jump when the left/right point
    // order flips past profile
    if rotation.z > 0.0 {
        rotation.z = 1.0 - rotation.z;
    }
    if rotation.z < 0.0 {
        rotation.z = -1.0 - rotation.z;
    }

    // Fade tilt out as the body turns side-on
    let turn_amount = remap(rotation.y.abs(), TURN_DAMP_LOW, TURN_DAMP_HIGH);
    rotation.z *= 1.0 - turn_amount;

    // Single-camera pitch estimates for the torso are too inaccurate
    rotation.x = 0.0;

    rotation
}

/// Scale rotations to radians and place the hip anchor in world space,
/// correcting for perspective foreshortening from a single camera.
fn rig_hips(mut hips: Hips, mut spine: Vec3) -> (Hips, Vec3) {
    hips.rotation *= PI;

    hips.world_position = Vec3::new(
        hips.position.x * (0.5 + 1.8 * -hips.position.z),
        0.0,
        hips.position.z * (0.1 + hips.position.z * -2.0),
    );

    spine *= PI;

    (hips, spine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::POSE_POINTS;
    use crate::pose::test_support::symmetric_pose;
    use approx::assert_relative_eq;

    fn pose_with(edits: &[(usize, Vec3)]) -> LandmarkSet {
        let base = symmetric_pose();
        let mut points: Vec<Vec3> = (0..POSE_POINTS).map(|i| base.point(i)).collect();
        for &(i, v) in edits {
            points[i] = v;
        }
        LandmarkSet::new(points)
    }

    #[test]
    fn test_camera_facing_torso_is_neutral() {
        let (hips, spine) = calc_hips(&symmetric_pose());
        assert_relative_eq!(hips.rotation.x, 0.0);
        assert_relative_eq!(hips.rotation.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(hips.rotation.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(spine.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(spine.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_hip_center_uses_right_point() {
        // The center lerp factor of 1.0 reduces to the right hip, so the
        // offset is measured from x = 0.45 here, not the 0.5 midpoint
        let (hips, _) = calc_hips(&symmetric_pose());
        assert_relative_eq!(hips.position.x, 0.65 - 0.45, epsilon = 1e-6);
    }

    #[test]
    fn test_small_tilt_folds_to_true_angle() {
        // Hips tilted by atan(0.04/0.1): the raw (x,y)-plane angle sits
        // near the π seam and the sign fold recovers the small angle
        let set = pose_with(&[
            (idx::HIP_L, Vec3::new(0.55, 0.73, 0.0)),
            (idx::HIP_R, Vec3::new(0.45, 0.77, 0.0)),
        ]);
        let (hips, _) = calc_hips(&set);
        let expected = (0.4f32).atan();
        assert_relative_eq!(hips.rotation.z, expected, epsilon = 1e-3);
    }

    #[test]
    fn test_turned_torso_damps_tilt() {
        // Hips rotated well past the turn-damping window, with some tilt
        let set = pose_with(&[
            (idx::HIP_L, Vec3::new(0.52, 0.74, -0.1)),
            (idx::HIP_R, Vec3::new(0.48, 0.76, 0.1)),
        ]);
        let (hips, _) = calc_hips(&set);
        assert_relative_eq!(hips.rotation.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_yaw_seam_recentered() {
        // Depth ordering that lands the raw yaw past 0.5: it wraps by -2
        // before the +0.5 recenter
        let set = pose_with(&[
            (idx::HIP_L, Vec3::new(0.45, 0.75, 0.1)),
            (idx::HIP_R, Vec3::new(0.55, 0.75, 0.0)),
        ]);
        let (hips, _) = calc_hips(&set);
        assert_relative_eq!(hips.rotation.y, -0.75 * PI, epsilon = 1e-4);
    }

    #[test]
    fn test_world_position_from_local() {
        let (hips, _) = calc_hips(&symmetric_pose());
        let expected_x = hips.position.x * (0.5 + 1.8 * -hips.position.z);
        let expected_z = hips.position.z * (0.1 + hips.position.z * -2.0);
        assert_relative_eq!(hips.world_position.x, expected_x);
        assert_relative_eq!(hips.world_position.y, 0.0);
        assert_relative_eq!(hips.world_position.z, expected_z);
        assert!((-1.0..=1.0).contains(&hips.position.x));
        assert!((-2.0..=0.0).contains(&hips.position.z));
    }
}
