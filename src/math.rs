//! Vector-algebra primitives shared by the face and pose solvers.
//!
//! Angle outputs are normalized scalars in `[-1, 1]` representing a
//! fraction of π radians, matching what the rig layer consumes. The two
//! normalizers are not interchangeable: [`normalize_radians`] is an
//! asymmetric fold tuned for angles expected near zero with occasional
//! wraparound, while [`normalize_angle`] is a plain wrap to `(-π, π]`.

use glam::Vec3;
use std::f32::consts::PI;

/// 2D angle from point `(cx, cy)` to point `(ex, ey)`, in radians `(-π, π]`.
pub fn angle_2d(cx: f32, cy: f32, ex: f32, ey: f32) -> f32 {
    (ey - cy).atan2(ex - cx)
}

/// Clamp `val` into `[min, max]`, then rescale to `[0, 1]`.
///
/// Monotonic non-decreasing in `val`; returns exactly 0 at `val <= min`
/// and 1 at `val >= max`. `min < max` is an unchecked precondition
/// (equal bounds divide by zero).
pub fn remap(val: f32, min: f32, max: f32) -> f32 {
    (val.clamp(min, max) - min) / (max - min)
}

/// Fold an angle in radians into a normalized `[-1, 1]` value.
///
/// Subtracts 2π once when the angle reaches π/2, adds 2π with a sign-flip
/// correction when it drops below -π/2, then divides by π. Not a general
/// modulo; inputs are expected near zero with occasional wraparound.
pub fn normalize_radians(radians: f32) -> f32 {
    let mut r = radians;
    if r >= PI / 2.0 {
        r -= 2.0 * PI;
    }
    if r <= -PI / 2.0 {
        r += 2.0 * PI;
        r = PI - r;
    }
    r / PI
}

/// Wrap an angle in radians to `(-π, π]` and divide by π.
pub fn normalize_angle(radians: f32) -> f32 {
    let two_pi = 2.0 * PI;
    let mut angle = radians % two_pi;
    angle = if angle > PI {
        angle - two_pi
    } else if angle < -PI {
        two_pi + angle
    } else {
        angle
    };
    angle / PI
}

/// Rotation triple between two 3D points: 2D angles in the (z,x), (z,y)
/// and (x,y) planes.
///
/// When `normalize` is set the *triple itself* is unit-normalized as a
/// 3-vector, not each component. Unusual, but this is what the downstream
/// rigging constants are tuned against. Coincident points make the
/// normalized form NaN; real detector output never collapses two distinct
/// landmark indices, so this is an unchecked precondition.
pub fn find_rotation(a: Vec3, b: Vec3, normalize: bool) -> Vec3 {
    let rotation = Vec3::new(
        angle_2d(a.z, a.x, b.z, b.x),
        angle_2d(a.z, a.y, b.z, b.y),
        angle_2d(a.x, a.y, b.x, b.y),
    );

    if normalize {
        rotation.normalize()
    } else {
        rotation
    }
}

/// Angle at vertex `b` between rays `b→a` and `b→c`, as a normalized
/// `[-1, 1]` value.
///
/// Degenerate rays (either endpoint coincident with `b`) propagate NaN;
/// see [`find_rotation`] for the precondition.
pub fn angle_between(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    let v1 = (a - b).normalize();
    let v2 = (c - b).normalize();
    normalize_radians(v1.dot(v2).acos())
}

/// Roll/pitch/yaw between two points: three independent 2D angles in the
/// (z,y), (z,x) and (x,y) planes, each wrapped by [`normalize_angle`].
pub fn roll_pitch_yaw(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        normalize_angle(angle_2d(a.z, a.y, b.z, b.y)),
        normalize_angle(angle_2d(a.z, a.x, b.z, b.x)),
        normalize_angle(angle_2d(a.x, a.y, b.x, b.y)),
    )
}

/// Roll/pitch/yaw of the plane through three points.
///
/// Takes `b - a` as the X axis, the plane normal as the Z axis, and their
/// cross product as Y, then reads Euler angles off that basis. This is
/// the canonical derivation for head orientation from three landmarks.
pub fn plane_roll_pitch_yaw(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let qb = b - a;
    let qc = c - a;
    let n = qb.cross(qc);

    let unit_z = n.normalize();
    let unit_x = qb.normalize();
    let unit_y = unit_z.cross(unit_x);

    let beta = unit_z.x.asin();
    let alpha = (-unit_z.y).atan2(unit_z.z);
    let gamma = (-unit_y.x).atan2(unit_x.x);

    Vec3::new(
        normalize_angle(alpha),
        normalize_angle(beta),
        normalize_angle(gamma),
    )
}
