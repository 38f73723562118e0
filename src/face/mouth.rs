//! Mouth openness, width and vowel shape.
//!
//! Mouth distances are normalized against eye-corner distances so the
//! ratios stay invariant to face size and camera distance, then remapped
//! through empirically tuned windows.

use super::{Mouth, Phoneme};
use crate::landmark::{face as idx, LandmarkSet};
use crate::math::remap;

/// Vertical open ratio window
const OPEN_LOW: f32 = 0.15;
const OPEN_HIGH: f32 = 0.7;

/// Corner width ratio window
const WIDTH_LOW: f32 = 0.45;
const WIDTH_HIGH: f32 = 0.9;

/// Open ratio window used for the phoneme cascade
const PHONEME_OPEN_LOW: f32 = 0.17;
const PHONEME_OPEN_HIGH: f32 = 0.5;

pub(super) fn calc_mouth(landmarks: &LandmarkSet) -> Mouth {
    let eye_inner_corner_l = landmarks.point(idx::EYE_INNER_CORNER_L);
    let eye_inner_corner_r = landmarks.point(idx::EYE_INNER_CORNER_R);
    let eye_outer_corner_l = landmarks.point(idx::EYE_OUTER_CORNER_L);
    let eye_outer_corner_r = landmarks.point(idx::EYE_OUTER_CORNER_R);

    let eye_inner_distance = eye_inner_corner_l.distance(eye_inner_corner_r);
    let eye_outer_distance = eye_outer_corner_l.distance(eye_outer_corner_r);

    let upper_inner_lip = landmarks.point(idx::UPPER_INNER_LIP);
    let lower_inner_lip = landmarks.point(idx::LOWER_INNER_LIP);
    let mouth_corner_l = landmarks.point(idx::MOUTH_CORNER_L);
    let mouth_corner_r = landmarks.point(idx::MOUTH_CORNER_R);

    let mouth_open = upper_inner_lip.distance(lower_inner_lip);
    let mouth_width = mouth_corner_l.distance(mouth_corner_r);

    let ratio_y = remap(mouth_open / eye_inner_distance, OPEN_LOW, OPEN_HIGH);
    let ratio_x = (remap(mouth_width / eye_outer_distance, WIDTH_LOW, WIDTH_HIGH) - 0.3) * 2.0;

    let mouth_x = ratio_x;
    let mouth_y = remap(
        mouth_open / eye_inner_distance,
        PHONEME_OPEN_LOW,
        PHONEME_OPEN_HIGH,
    );

    // Empirical vowel cascade; I feeds the other four
    let ratio_i = (remap(mouth_x, 0.0, 1.0) * 2.0 * remap(mouth_y, 0.2, 0.7)).clamp(0.0, 1.0);
    let ratio_a = mouth_y * 0.4 + mouth_y * (1.0 - ratio_i) * 0.6;
    let ratio_u = mouth_y * remap(1.0 - ratio_i, 0.0, 0.3) * 0.1;
    let ratio_e = remap(ratio_u, 0.2, 1.0) * (1.0 - ratio_i) * 0.3;
    let ratio_o = (1.0 - ratio_i) * remap(mouth_y, 0.3, 1.0) * 0.4;

    Mouth {
        x: ratio_x,
        y: ratio_y,
        shape: Phoneme {
            a: ratio_a,
            e: ratio_e,
            i: ratio_i,
            o: ratio_o,
            u: ratio_u,
        },
    }
}
