//! Face solver
//!
//! Derives head orientation, eye openness, pupil position, eyebrow raise
//! and mouth shape from one MediaPipe face mesh frame (468 points, or 478
//! with iris refinement). Each sub-step is independent apart from blink
//! stabilization, which reads the solved head yaw.

pub mod eyes;
pub mod head;
pub mod mouth;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::FaceSettings;
use crate::error::SolveError;
use crate::landmark::{LandmarkSet, FACE_BASE};

pub use eyes::stabilize_blink;

/// Solved face parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub head: Head,
    pub eyes: Eyes,
    /// Eyebrow raise averaged across both brows, `[0, 1]`
    pub brow: f32,
    /// Pupil offset averaged across both eyes, x/y in `[-1, 1]`
    pub pupils: Vec2,
    pub mouth: Mouth,
}

/// Head orientation and face-box geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Head {
    /// Pitch in radians
    pub x: f32,
    /// Yaw in radians
    pub y: f32,
    /// Roll in radians
    pub z: f32,
    /// Face-box width in normalized image units
    pub width: f32,
    /// Face-box height in normalized image units
    pub height: f32,
    /// Center of the face box
    pub position: Vec3,
    /// Euler angles normalized to `[-1, 1]` (fractions of π)
    pub normalized_angles: Vec3,
}

/// Per-eye openness, `0` closed to `1` open (may exceed 1 before
/// stabilization clamps it).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eyes {
    pub left: f32,
    pub right: f32,
}

/// Mouth openness, width and vowel shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mouth {
    /// Horizontal mouth shape
    pub x: f32,
    /// Vertical mouth open
    pub y: f32,
    pub shape: Phoneme,
}

/// Vowel blend weights for viseme-driven animation.
///
/// The weights form a plausible but non-orthogonal basis; they are not
/// guaranteed to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phoneme {
    pub a: f32,
    pub e: f32,
    pub i: f32,
    pub o: f32,
    pub u: f32,
}

/// Solve one face frame.
///
/// Requires at least 468 points; sets without iris refinement (fewer than
/// 478 points) fall back to fully-open eyes, centered pupils and zero brow
/// raise.
pub fn solve(landmarks: &LandmarkSet, settings: &FaceSettings) -> Result<Face, SolveError> {
    landmarks.require_at_least(FACE_BASE)?;

    let head = head::calc_head(landmarks);
    let mouth = mouth::calc_mouth(landmarks);

    let mut eyes = eyes::calc_eyes(landmarks, settings.blink_high, settings.blink_low);
    if settings.smooth_blink {
        eyes = eyes::stabilize_blink(eyes, head.y, settings);
    }

    let pupils = eyes::calc_pupils(landmarks);
    let brow = eyes::calc_brow(landmarks);

    Ok(Face {
        head,
        eyes,
        brow,
        pupils,
        mouth,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::landmark::face as idx;

    /// Build a face frame of `n` distinct points with a plausible neutral
    /// layout at the indices the solver reads.
    pub fn neutral_face(n: usize) -> LandmarkSet {
        let mut points: Vec<Vec3> = (0..n)
            .map(|i| {
                Vec3::new(
                    0.1 + (i % 50) as f32 * 0.012,
                    0.1 + (i / 50) as f32 * 0.05,
                    0.02 + (i % 7) as f32 * 0.001,
                )
            })
            .collect();

        // Face plane: symmetric, camera-facing
        points[idx::BROW_OUTER_L] = Vec3::new(0.3, 0.3, 0.1);
        points[idx::BROW_OUTER_R] = Vec3::new(0.7, 0.3, 0.1);
        points[idx::JAW_R] = Vec3::new(0.6, 0.7, 0.1);
        points[idx::JAW_L] = Vec3::new(0.4, 0.7, 0.1);

        // Eye corners
        points[idx::EYE_OUTER_CORNER_L] = Vec3::new(0.35, 0.4, 0.0);
        points[idx::EYE_INNER_CORNER_L] = Vec3::new(0.45, 0.4, 0.0);
        points[idx::EYE_INNER_CORNER_R] = Vec3::new(0.55, 0.4, 0.0);
        points[idx::EYE_OUTER_CORNER_R] = Vec3::new(0.65, 0.4, 0.0);

        // Mouth: slightly open; corner width chosen so the width ratio
        // sits exactly at the neutral point of the remap window
        points[idx::UPPER_INNER_LIP] = Vec3::new(0.5, 0.56, 0.0);
        points[idx::LOWER_INNER_LIP] = Vec3::new(0.5, 0.6, 0.0);
        points[idx::MOUTH_CORNER_L] = Vec3::new(0.5 - 0.08775, 0.58, 0.0);
        points[idx::MOUTH_CORNER_R] = Vec3::new(0.5 + 0.08775, 0.58, 0.0);

        if n >= crate::landmark::FACE_WITH_IRIS {
            set_eye_ring(&mut points, &idx::EYE_LEFT, 0.35, 0.45, 0.015);
            set_eye_ring(&mut points, &idx::EYE_RIGHT, 0.65, 0.55, 0.015);
            // Pupils centered in each eye, offset down by the resting bias
            points[idx::PUPIL_LEFT[0]] = Vec3::new(0.4, 0.4 - 0.1 * 0.075, 0.0);
            points[idx::PUPIL_RIGHT[0]] = Vec3::new(0.6, 0.4 - 0.1 * 0.075, 0.0);
        }

        LandmarkSet::new(points)
    }

    /// Place an eye (or brow) ring: corners at `outer_x`/`inner_x`, upper
    /// and lower lids separated by `half_gap` above/below the corner line.
    pub fn set_eye_ring(points: &mut [Vec3], ring: &[usize; 8], outer_x: f32, inner_x: f32, half_gap: f32) {
        let y = 0.4;
        points[ring[0]] = Vec3::new(outer_x, y, 0.0);
        points[ring[1]] = Vec3::new(inner_x, y, 0.0);
        let mid_x = (outer_x + inner_x) / 2.0;
        let upper_y = y - half_gap;
        let lower_y = y + half_gap;
        points[ring[2]] = Vec3::new(outer_x * 0.75 + inner_x * 0.25, upper_y, 0.0);
        points[ring[3]] = Vec3::new(mid_x, upper_y, 0.0);
        points[ring[4]] = Vec3::new(outer_x * 0.25 + inner_x * 0.75, upper_y, 0.0);
        points[ring[5]] = Vec3::new(outer_x * 0.75 + inner_x * 0.25, lower_y, 0.0);
        points[ring[6]] = Vec3::new(mid_x, lower_y, 0.0);
        points[ring[7]] = Vec3::new(outer_x * 0.25 + inner_x * 0.75, lower_y, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::neutral_face;
    use super::*;
    use crate::landmark::{FACE_BASE, FACE_WITH_IRIS};
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_undersized_set() {
        let set = LandmarkSet::new(vec![Vec3::ONE; 100]);
        assert!(solve(&set, &FaceSettings::default()).is_err());
    }

    #[test]
    fn test_no_iris_fallbacks() {
        let set = neutral_face(FACE_BASE);
        let face = solve(&set, &FaceSettings::default()).unwrap();

        assert_eq!(face.eyes.left, 1.0);
        assert_eq!(face.eyes.right, 1.0);
        assert_eq!(face.pupils, Vec2::ZERO);
        assert_eq!(face.brow, 0.0);
    }

    #[test]
    fn test_symmetric_face_has_zero_rotation() {
        let set = neutral_face(FACE_WITH_IRIS);
        let face = solve(&set, &FaceSettings::default()).unwrap();

        assert_relative_eq!(face.head.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(face.head.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(face.head.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(face.head.width, 0.4, epsilon = 1e-5);
        assert_relative_eq!(face.head.height, 0.4, epsilon = 1e-5);
        assert_relative_eq!(face.head.position.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(face.head.position.y, 0.5, epsilon = 1e-5);

        // Symmetric eyes read identically before stabilization
        assert_relative_eq!(face.eyes.left, face.eyes.right, epsilon = 1e-5);
        // Neutral mouth width lands on the zero point of its window
        assert_relative_eq!(face.mouth.x, 0.0, epsilon = 1e-3);
        // Centered pupils with the resting-position bias cancel out
        assert_relative_eq!(face.pupils.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(face.pupils.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_solve_is_pure() {
        let set = neutral_face(FACE_WITH_IRIS);
        let settings = FaceSettings {
            smooth_blink: true,
            ..Default::default()
        };
        let a = solve(&set, &settings).unwrap();
        let b = solve(&set, &settings).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounded_outputs() {
        let set = neutral_face(FACE_WITH_IRIS);
        let face = solve(&set, &FaceSettings::default()).unwrap();

        assert!((0.0..=1.0).contains(&face.mouth.y));
        assert!((0.0..=1.0).contains(&face.mouth.shape.i));
        assert!((0.0..=1.0).contains(&face.brow));
        assert!(face.head.x.is_finite());
        assert!(face.head.position.is_finite());
        assert!(face.pupils.is_finite());
    }
}
