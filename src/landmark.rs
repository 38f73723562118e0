//! Landmark input model.
//!
//! A [`LandmarkSet`] is the ordered, fixed-layout point sequence a
//! MediaPipe-style detector emits once per frame: up to 478 face points
//! (468 base mesh + 10 iris refinement points) or exactly 33 body points.
//! Coordinates are normalized image space (x, y roughly in `[0, 1]`,
//! z relative depth). The set is read-only input to every solve; the
//! solvers never mutate or cache it.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::SolveError;

/// Face mesh point count including iris refinement.
pub const FACE_WITH_IRIS: usize = 478;

/// Face mesh point count without iris refinement.
pub const FACE_BASE: usize = 468;

/// Body pose landmark count.
pub const POSE_POINTS: usize = 33;

/// Body side selector for the mirrored left/right derivations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign used by the arm rigging pass: +1 for right, -1 for left.
    pub fn invert(self) -> f32 {
        match self {
            Side::Right => 1.0,
            Side::Left => -1.0,
        }
    }
}

/// One frame of detector output.
///
/// Serializes as a plain array of `[x, y, z]` triples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Vec3>,
}

impl LandmarkSet {
    /// Wrap a detector frame.
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Number of points in the set.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the face set carries iris refinement points.
    pub fn has_iris(&self) -> bool {
        self.points.len() >= FACE_WITH_IRIS
    }

    /// Point at a semantic index. Indexing past the declared layout is an
    /// integration error and panics, matching slice indexing.
    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    /// 2D projection of a point (image-plane x, y).
    pub fn point2(&self, index: usize) -> Vec2 {
        let p = self.points[index];
        Vec2::new(p.x, p.y)
    }

    /// Check the set against an exact expected point count.
    pub fn require_len(&self, expected: usize) -> Result<(), SolveError> {
        if self.points.len() != expected {
            return Err(SolveError::LandmarkCount {
                expected,
                got: self.points.len(),
            });
        }
        Ok(())
    }

    /// Check the set against a minimum expected point count.
    pub fn require_at_least(&self, expected: usize) -> Result<(), SolveError> {
        if self.points.len() < expected {
            return Err(SolveError::LandmarkCount {
                expected,
                got: self.points.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<[f32; 3]>> for LandmarkSet {
    fn from(points: Vec<[f32; 3]>) -> Self {
        Self::new(points.into_iter().map(Vec3::from).collect())
    }
}

/// Face mesh index tables.
///
/// Ring layout for the eye/brow tables: outer corner, inner corner,
/// outer/mid/inner upper lid, outer/mid/inner lower lid. Pupil tables
/// start with the iris center.
pub mod face {
    pub const EYE_LEFT: [usize; 8] = [130, 133, 160, 159, 158, 144, 145, 153];
    pub const EYE_RIGHT: [usize; 8] = [263, 362, 387, 386, 385, 373, 374, 380];
    pub const BROW_LEFT: [usize; 8] = [35, 244, 63, 105, 66, 229, 230, 231];
    pub const BROW_RIGHT: [usize; 8] = [265, 464, 293, 334, 296, 449, 450, 451];
    pub const PUPIL_LEFT: [usize; 5] = [468, 469, 470, 471, 472];
    pub const PUPIL_RIGHT: [usize; 5] = [473, 474, 475, 476, 477];

    pub const EYE_INNER_CORNER_L: usize = 133;
    pub const EYE_INNER_CORNER_R: usize = 362;
    pub const EYE_OUTER_CORNER_L: usize = 130;
    pub const EYE_OUTER_CORNER_R: usize = 263;

    pub const UPPER_INNER_LIP: usize = 13;
    pub const LOWER_INNER_LIP: usize = 14;
    pub const MOUTH_CORNER_L: usize = 61;
    pub const MOUTH_CORNER_R: usize = 291;

    /// Corners of the face-plane triangle used for head orientation.
    pub const BROW_OUTER_L: usize = 21;
    pub const BROW_OUTER_R: usize = 251;
    pub const JAW_R: usize = 397;
    pub const JAW_L: usize = 172;
}

/// Body pose index table (MediaPipe Pose layout).
///
/// The camera image is mirrored, so the solver's "right" side reads the
/// detector's left-side indices and vice versa.
pub mod pose {
    pub const SHOULDER_L: usize = 11;
    pub const SHOULDER_R: usize = 12;
    pub const ELBOW_L: usize = 13;
    pub const ELBOW_R: usize = 14;
    pub const WRIST_L: usize = 15;
    pub const WRIST_R: usize = 16;
    pub const PINKY_L: usize = 17;
    pub const PINKY_R: usize = 18;
    pub const INDEX_L: usize = 19;
    pub const INDEX_R: usize = 20;
    pub const HIP_L: usize = 23;
    pub const HIP_R: usize = 24;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_len() {
        let set = LandmarkSet::new(vec![Vec3::ZERO; POSE_POINTS]);
        assert!(set.require_len(POSE_POINTS).is_ok());

        let err = set.require_len(FACE_BASE).unwrap_err();
        assert_eq!(
            err,
            SolveError::LandmarkCount {
                expected: FACE_BASE,
                got: POSE_POINTS
            }
        );
    }

    #[test]
    fn test_has_iris() {
        assert!(!LandmarkSet::new(vec![Vec3::ZERO; FACE_BASE]).has_iris());
        assert!(LandmarkSet::new(vec![Vec3::ZERO; FACE_WITH_IRIS]).has_iris());
    }

    #[test]
    fn test_deserialize_from_arrays() {
        let set: LandmarkSet = serde_json::from_str("[[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.point(1), Vec3::new(0.4, 0.5, 0.6));
    }

    #[test]
    fn test_side_invert() {
        assert_eq!(Side::Right.invert(), 1.0);
        assert_eq!(Side::Left.invert(), -1.0);
    }
}
