//! Arm chain rotations and the arm rigging pass.
//!
//! The camera image is mirrored, so the solver's right arm reads the
//! detector's left-side landmark indices and vice versa. Segment
//! rotations come from normalized rotation triples; the Y component of
//! each is then overwritten with an explicit joint bend angle, which
//! captures flexion much better than the triple alone.

use std::f32::consts::PI;

use super::Arm;
use crate::landmark::{pose as idx, LandmarkSet, Side};
use crate::math::{angle_between, find_rotation};

/// Lower-arm Z rotation floor before rigging, radians
const LOWER_Z_FLOOR: f32 = -2.14;

/// Scale mapping solver-space lower-arm angles into rig space
const LOWER_SCALE: f32 = 2.14;

/// Scale for upper-arm Z and hand Z
const UPPER_Z_SCALE: f32 = -2.3;
const HAND_Z_SCALE: f32 = -2.3;

/// Shoulder X offset applied before clamping
const UPPER_X_OFFSET: f32 = 0.3;

/// Rig joint limits
const UPPER_X_MIN: f32 = -0.5;
const UPPER_X_MAX: f32 = PI;
const LOWER_X_LIMIT: f32 = 0.3;
const HAND_Y_LIMIT: f32 = 0.6;

pub(super) fn calc_arms(landmarks: &LandmarkSet) -> (Arm, Arm) {
    let p = |i: usize| landmarks.point(i);

    let mut right_arm = Arm::default();
    let mut left_arm = Arm::default();

    right_arm.upper = find_rotation(p(idx::SHOULDER_L), p(idx::ELBOW_L), true);
    left_arm.upper = find_rotation(p(idx::SHOULDER_R), p(idx::ELBOW_R), true);
    right_arm.upper.y = angle_between(p(idx::SHOULDER_R), p(idx::SHOULDER_L), p(idx::ELBOW_L));
    left_arm.upper.y = angle_between(p(idx::SHOULDER_L), p(idx::SHOULDER_R), p(idx::ELBOW_R));

    right_arm.lower = find_rotation(p(idx::ELBOW_L), p(idx::WRIST_L), true);
    left_arm.lower = find_rotation(p(idx::ELBOW_R), p(idx::WRIST_R), true);
    right_arm.lower.y = angle_between(p(idx::SHOULDER_L), p(idx::ELBOW_L), p(idx::WRIST_L));
    left_arm.lower.y = angle_between(p(idx::SHOULDER_R), p(idx::ELBOW_R), p(idx::WRIST_R));
    right_arm.lower.z = right_arm.lower.z.clamp(LOWER_Z_FLOOR, 0.0);
    left_arm.lower.z = left_arm.lower.z.clamp(LOWER_Z_FLOOR, 0.0);

    right_arm.hand = find_rotation(
        p(idx::WRIST_L),
        p(idx::PINKY_L).lerp(p(idx::INDEX_L), 0.5),
        true,
    );
    left_arm.hand = find_rotation(
        p(idx::WRIST_R),
        p(idx::PINKY_R).lerp(p(idx::INDEX_R), 0.5),
        true,
    );

    (
        rig_arm(left_arm, Side::Left),
        rig_arm(right_arm, Side::Right),
    )
}

/// Map solver-space arm angles into the humanoid rig's joint-limit space.
///
/// Side-dependent sign inversion mirrors the two arms; shoulder roll is
/// coupled to elbow bend so raised arms keep a natural silhouette. The
/// hand Y axis derives from the doubled, clamped raw hand Z.
pub(super) fn rig_arm(mut arm: Arm, side: Side) -> Arm {
    let invert = side.invert();

    arm.upper.z *= UPPER_Z_SCALE * invert;

    arm.upper.y *= PI * invert;
    arm.upper.y -= arm.lower.x.max(0.0);
    arm.upper.y -= -invert * arm.lower.z.max(0.0);
    arm.upper.x -= UPPER_X_OFFSET * invert;

    arm.lower.z *= -LOWER_SCALE * invert;
    arm.lower.y *= LOWER_SCALE * invert;
    arm.lower.x *= LOWER_SCALE * invert;

    arm.upper.x = arm.upper.x.clamp(UPPER_X_MIN, UPPER_X_MAX);
    arm.lower.x = arm.lower.x.clamp(-LOWER_X_LIMIT, LOWER_X_LIMIT);

    arm.hand.y = (arm.hand.z * 2.0).clamp(-HAND_Y_LIMIT, HAND_Y_LIMIT);
    arm.hand.z *= HAND_Z_SCALE * invert;

    arm
}
