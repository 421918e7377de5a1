//! # Path Engine
//!
//! Fits a quadratic curve through three control points and animates the
//! selected object along it, one step per frame.
//!
//! The first control point is the object's position when definition
//! starts; the other two come from clicks on the top-down view. The middle
//! point is passed at `t = 0.5`.
//!
//! ```
//! use cgmath::Vector3;
//! use pathpick::path::QuadraticCurve;
//!
//! let curve = QuadraticCurve::fit(
//!     Vector3::new(0.0, 0.0, 0.0),
//!     Vector3::new(1.0, 2.0, 0.0),
//!     Vector3::new(2.0, 0.0, 0.0),
//! );
//! let mid = curve.evaluate(0.5);
//! assert!((mid.y - 2.0).abs() < 1e-5);
//! ```

pub mod curve;
pub mod engine;
pub mod visual;

pub use curve::QuadraticCurve;
pub use engine::{screen_to_world, PathEngine, PathState, PointOutcome, StepOutcome, CONTROL_POINTS};
pub use visual::{control_point_marker, curve_polyline};
