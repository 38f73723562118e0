//! Kagami - Landmark to rig-parameter solver
//!
//! Converts sparse normalized 3D landmark frames from a MediaPipe-style
//! face/pose detector into compact semantic animation parameters:
//! - Face: head rotation, eye openness, pupil position, brow raise and
//!   a five-vowel mouth shape blend
//! - Pose: arm, hip and spine rotations mapped into humanoid rig space
//!
//! Both solvers are pure functions over one [`LandmarkSet`] frame; they
//! hold no state across calls, so solving frames from multiple threads
//! needs no coordination. Detection, temporal smoothing, rig binding and
//! rendering are all left to the caller.
//!
//! ```
//! use kagami::{face, FaceSettings, LandmarkSet};
//! use glam::Vec3;
//!
//! let points: Vec<Vec3> = (0..468)
//!     .map(|i| Vec3::new((i % 32) as f32 / 32.0, (i / 32) as f32 / 16.0, 0.01))
//!     .collect();
//! let frame = LandmarkSet::new(points);
//! let solved = face::solve(&frame, &FaceSettings::default()).unwrap();
//! // Without iris refinement points the eyes fall back to fully open
//! assert_eq!(solved.eyes.left, 1.0);
//! ```

pub mod config;
pub mod error;
pub mod face;
pub mod landmark;
pub mod math;
pub mod pose;

pub use config::{Config, FaceSettings};
pub use error::{KagamiError, Result, SolveError};
pub use face::Face;
pub use landmark::{LandmarkSet, Side, FACE_BASE, FACE_WITH_IRIS, POSE_POINTS};
pub use pose::Pose;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
