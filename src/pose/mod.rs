//! Pose solver
//!
//! Derives arm, hip and spine rotations from one MediaPipe Pose frame
//! (33 points). Rotations come out as angle triples already mapped into
//! humanoid joint-limit space by the rigging passes.

pub mod arms;
pub mod torso;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SolveError;
use crate::landmark::{LandmarkSet, POSE_POINTS};

/// Solved body parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub left_arm: Arm,
    pub right_arm: Arm,
    // TODO: solve legs from the knee/ankle landmarks (25-28); the output
    // shape reserves the fields but no derivation exists yet.
    pub left_leg: Leg,
    pub right_leg: Leg,
    /// Spine rotation triple in radians
    pub spine: Vec3,
    pub hips: Hips,
}

/// One arm chain: upper arm, lower arm and hand rotation triples, in
/// radians after the rigging pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Arm {
    pub upper: Vec3,
    pub lower: Vec3,
    pub hand: Vec3,
}

/// One leg chain. Currently always zero; see the TODO on [`Pose`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Leg {
    pub upper: Vec3,
    pub lower: Vec3,
}

/// Hip placement and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hips {
    /// Rig anchor position in world space, perspective-corrected
    pub world_position: Vec3,
    /// Camera-local position: x offset from center, z from spine length
    pub position: Vec3,
    /// Rotation triple in radians
    pub rotation: Vec3,
}

/// Solve one pose frame. Requires exactly 33 points.
pub fn solve(landmarks: &LandmarkSet) -> Result<Pose, SolveError> {
    landmarks.require_len(POSE_POINTS)?;

    let (left_arm, right_arm) = arms::calc_arms(landmarks);
    let (hips, spine) = torso::calc_hips(landmarks);

    Ok(Pose {
        left_arm,
        right_arm,
        left_leg: Leg::default(),
        right_leg: Leg::default(),
        spine,
        hips,
    })
}
