//! Eye openness, blink stabilization, pupils and brow raise.
//!
//! Everything here needs the iris refinement points, so sets shorter than
//! 478 points take the documented fallbacks: fully open eyes, centered
//! pupils, zero brow raise.

use glam::Vec2;

use super::Eyes;
use crate::config::FaceSettings;
use crate::landmark::{face as idx, LandmarkSet, Side};
use crate::math::remap;

/// Human eye height/width ratio when fully open is roughly this
const EYE_MAX_RATIO: f32 = 0.285;

/// Upper clamp on the openness ratio before remapping
const EYE_RATIO_CEILING: f32 = 2.0;

/// Both eyes below this count as a blink in progress
const CLOSING_THRESHOLD: f32 = 0.3;

/// Both eyes above this count as fully open
const OPENING_THRESHOLD: f32 = 0.6;

/// Left/right difference treated as an intentional wink
const WINK_DIFF_THRESHOLD: f32 = 0.8;

/// Wink threshold when winks are disabled (unreachable after clamping)
const NO_WINK_DIFF_THRESHOLD: f32 = 1.2;

/// Asymmetric averaging weight for blink noise damping
const BLINK_AVERAGE_BIAS: f32 = 0.95;

/// Brow-ring ratio at full raise
const BROW_MAX_RATIO: f32 = 1.15;
const BROW_LOW: f32 = 0.07;
const BROW_HIGH: f32 = 0.125;

/// Downward bias for the natural pupil resting position, as a fraction
/// of eye width
const PUPIL_REST_BIAS: f32 = 0.075;

/// Per-eye openness, or fully open when iris data is missing.
pub(super) fn calc_eyes(landmarks: &LandmarkSet, high: f32, low: f32) -> Eyes {
    if !landmarks.has_iris() {
        return Eyes {
            left: 1.0,
            right: 1.0,
        };
    }

    Eyes {
        left: eye_open(landmarks, Side::Left, high, low),
        right: eye_open(landmarks, Side::Right, high, low),
    }
}

fn eye_ring(side: Side) -> &'static [usize; 8] {
    match side {
        Side::Left => &idx::EYE_LEFT,
        Side::Right => &idx::EYE_RIGHT,
    }
}

fn eye_open(landmarks: &LandmarkSet, side: Side, high: f32, low: f32) -> f32 {
    let ratio = lid_ratio(landmarks, eye_ring(side));
    let openness = (ratio / EYE_MAX_RATIO).clamp(0.0, EYE_RATIO_CEILING);
    remap(openness, low, high)
}

/// Average lid gap over the ring's outer/mid/inner pairs, divided by eye
/// width. 2D distances are used instead of 3D for less jitter.
fn lid_ratio(landmarks: &LandmarkSet, ring: &[usize; 8]) -> f32 {
    let outer_corner = landmarks.point2(ring[0]);
    let inner_corner = landmarks.point2(ring[1]);

    let outer_upper_lid = landmarks.point2(ring[2]);
    let mid_upper_lid = landmarks.point2(ring[3]);
    let inner_upper_lid = landmarks.point2(ring[4]);

    let outer_lower_lid = landmarks.point2(ring[5]);
    let mid_lower_lid = landmarks.point2(ring[6]);
    let inner_lower_lid = landmarks.point2(ring[7]);

    let eye_width = outer_corner.distance(inner_corner);
    let lid_avg = (outer_upper_lid.distance(outer_lower_lid)
        + mid_upper_lid.distance(mid_lower_lid)
        + inner_upper_lid.distance(inner_lower_lid))
        / 3.0;

    lid_avg / eye_width
}

/// Damp blink asymmetry noise while preserving intentional winks.
///
/// Past `max_rotation` of head yaw the far eye is self-occluded and
/// copies the near eye. Otherwise, unless the two eyes differ enough to
/// look like a wink (and are not mid-blink), both are pulled onto a
/// shared asymmetrically-weighted average.
pub fn stabilize_blink(eyes: Eyes, head_y: f32, settings: &FaceSettings) -> Eyes {
    let mut left = eyes.left.clamp(0.0, 1.0);
    let mut right = eyes.right.clamp(0.0, 1.0);

    let blink_diff = (left - right).abs();
    let blink_thresh = if settings.enable_wink {
        WINK_DIFF_THRESHOLD
    } else {
        NO_WINK_DIFF_THRESHOLD
    };

    let is_closing = left < CLOSING_THRESHOLD && right < CLOSING_THRESHOLD;
    let is_opening = left > OPENING_THRESHOLD && right > OPENING_THRESHOLD;

    if head_y > settings.max_rotation {
        return Eyes { left: right, right };
    }
    if head_y < -settings.max_rotation {
        return Eyes { left, right: left };
    }

    if !(blink_diff >= blink_thresh && !is_closing && !is_opening) {
        let t = if right > left {
            BLINK_AVERAGE_BIAS
        } else {
            1.0 - BLINK_AVERAGE_BIAS
        };
        let value = right + (left - right) * t;
        left = value;
        right = value;
    }

    Eyes { left, right }
}

/// Averaged pupil offset from the eye centers, x/y in `[-1, 1]`.
pub(super) fn calc_pupils(landmarks: &LandmarkSet) -> Vec2 {
    if !landmarks.has_iris() {
        return Vec2::ZERO;
    }

    let left = pupil_pos(landmarks, Side::Left);
    let right = pupil_pos(landmarks, Side::Right);

    (left + right) * 0.5
}

fn pupil_pos(landmarks: &LandmarkSet, side: Side) -> Vec2 {
    let ring = eye_ring(side);
    let outer_corner = landmarks.point(ring[0]);
    let inner_corner = landmarks.point(ring[1]);
    let eye_width = landmarks.point2(ring[0]).distance(landmarks.point2(ring[1]));
    let mid_point = outer_corner.lerp(inner_corner, 0.5);

    let pupil_points = match side {
        Side::Left => &idx::PUPIL_LEFT,
        Side::Right => &idx::PUPIL_RIGHT,
    };
    let pupil = landmarks.point(pupil_points[0]);

    let dx = mid_point.x - pupil.x;
    let dy = mid_point.y - pupil.y - eye_width * PUPIL_REST_BIAS;

    // Vertical scale is twice as sensitive as horizontal
    Vec2::new(4.0 * dx / (eye_width / 2.0), 4.0 * dy / (eye_width / 4.0))
}

/// Averaged eyebrow raise, `[0, 1]`.
pub(super) fn calc_brow(landmarks: &LandmarkSet) -> f32 {
    if !landmarks.has_iris() {
        return 0.0;
    }

    (brow_raise(landmarks, Side::Left) + brow_raise(landmarks, Side::Right)) / 2.0
}

fn brow_raise(landmarks: &LandmarkSet, side: Side) -> f32 {
    let ring = match side {
        Side::Left => &idx::BROW_LEFT,
        Side::Right => &idx::BROW_RIGHT,
    };
    let brow_ratio = lid_ratio(landmarks, ring) / BROW_MAX_RATIO - 1.0;

    remap(brow_ratio, BROW_LOW, BROW_HIGH)
}
