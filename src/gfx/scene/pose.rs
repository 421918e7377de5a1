//! # Object Pose
//!
//! Translate / rotation / scale state of a scene object and the model matrix
//! derived from it.
//!
//! The model matrix is always rebuilt from scratch as
//! `T(translate) * R(rotation) * S(scale)` after any change, so it never
//! accumulates drift. The rotation quaternion is renormalized after every
//! composition.

use cgmath::{InnerSpace, Matrix4, One, Quaternion, Rad, Rotation3, Vector3, Zero};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    translate: Vector3<f32>,
    scale: Vector3<f32>,
    rotation: Quaternion<f32>,
    model: Matrix4<f32>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::new()
    }
}

impl Pose {
    /// Identity pose: no translation, unit scale, identity rotation.
    pub fn new() -> Self {
        Self {
            translate: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Quaternion::one(),
            model: Matrix4::one(),
        }
    }

    pub fn translate(&self) -> Vector3<f32> {
        self.translate
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        self.rotation
    }

    /// The derived model matrix.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.model
    }

    /// Rotates the pose around `axis` in the object's current local frame.
    ///
    /// The delta rotation is composed on the right (`q = q * delta`) and the
    /// result is renormalized. A `clockwise` rotation negates the angle. A
    /// zero-length axis leaves the pose untouched.
    pub fn rotate_around_axis(&mut self, axis: Vector3<f32>, angle: f32, clockwise: bool) {
        if axis.magnitude2() == 0.0 {
            log::debug!("ignoring rotation around a zero-length axis");
            return;
        }

        let signed = if clockwise { -angle } else { angle };
        let delta = Quaternion::from_axis_angle(axis.normalize(), Rad(signed));
        self.rotation = (self.rotation * delta).normalize();
        self.update_model_matrix();
    }

    /// Moves the pose by `delta` expressed in the object's local axes.
    pub fn translate_object(&mut self, delta: Vector3<f32>) {
        self.translate += self.rotation * delta;
        self.update_model_matrix();
    }

    /// Multiplies every scale component by `factor`.
    ///
    /// Repeated calls compound multiplicatively; there is no clamping.
    pub fn scale_object(&mut self, factor: f32) {
        self.scale *= factor;
        self.update_model_matrix();
    }

    /// Replaces the translation with an absolute world position.
    pub fn set_translate(&mut self, translate: Vector3<f32>) {
        self.translate = translate;
        self.update_model_matrix();
    }

    fn update_model_matrix(&mut self) {
        let t = Matrix4::from_translation(self.translate);
        let r = Matrix4::from(self.rotation);
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        self.model = t * r * s; // Order matters: T * R * S
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector4, assert_relative_eq};
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_default_pose_is_identity() {
        let pose = Pose::new();
        assert_eq!(pose.translate(), Vector3::zero());
        assert_eq!(pose.scale(), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(pose.model_matrix(), Matrix4::one());
    }

    #[test]
    fn test_quaternion_stays_unit_length() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut pose = Pose::new();

        for _ in 0..2000 {
            let axis = Vector3::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            let angle = rng.random_range(-10.0..10.0);
            pose.rotate_around_axis(axis, angle, rng.random_bool(0.5));

            let magnitude = pose.rotation().magnitude();
            assert!((magnitude - 1.0).abs() < EPSILON, "magnitude drifted to {magnitude}");
        }
    }

    #[test]
    fn test_clockwise_negates_angle() {
        let mut a = Pose::new();
        let mut b = Pose::new();
        a.rotate_around_axis(Vector3::unit_z(), 0.3, true);
        b.rotate_around_axis(Vector3::unit_z(), -0.3, false);
        assert_relative_eq!(a.rotation(), b.rotation(), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_applies_in_local_frame() {
        // Rotating about local X after a quarter turn about Z is a rotation
        // about world Y.
        let mut pose = Pose::new();
        pose.rotate_around_axis(Vector3::unit_z(), FRAC_PI_2, false);
        pose.rotate_around_axis(Vector3::unit_x(), FRAC_PI_2, false);

        let rotated = pose.rotation() * Vector3::unit_z();
        assert_relative_eq!(rotated, Vector3::unit_x(), epsilon = EPSILON);
    }

    #[test]
    fn test_translation_round_trip_without_rotation() {
        let d = Vector3::new(0.3, -1.2, 2.5);
        let mut pose = Pose::new();
        pose.translate_object(Vector3::new(1.0, 1.0, 1.0));
        let start = pose.translate();

        pose.translate_object(d);
        pose.translate_object(-d);
        assert_relative_eq!(pose.translate(), start, epsilon = EPSILON);
    }

    #[test]
    fn test_translation_is_local_frame_relative() {
        let d = Vector3::new(1.0, 0.0, 0.0);
        let mut pose = Pose::new();

        pose.translate_object(d);
        pose.rotate_around_axis(Vector3::unit_z(), FRAC_PI_2, false);
        pose.translate_object(-d);

        // -X in the rotated frame is -Y in world space.
        assert_relative_eq!(pose.translate(), Vector3::new(1.0, -1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_scale_compounds_multiplicatively() {
        let mut pose = Pose::new();
        for _ in 0..10 {
            pose.scale_object(1.1);
        }
        for _ in 0..10 {
            pose.scale_object(1.0 / 1.1);
        }
        assert_relative_eq!(pose.scale(), Vector3::new(1.0, 1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_model_matrix_is_translate_rotate_scale() {
        let mut pose = Pose::new();
        pose.scale_object(2.0);
        pose.rotate_around_axis(Vector3::unit_z(), FRAC_PI_2, false);
        pose.set_translate(Vector3::new(5.0, 0.0, 0.0));

        // (1,0,0) is scaled to (2,0,0), rotated to (0,2,0), then moved.
        let p = pose.model_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p, Vector4::new(5.0, 2.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_zero_axis_is_ignored() {
        let mut pose = Pose::new();
        pose.rotate_around_axis(Vector3::zero(), 1.0, false);
        assert_eq!(pose, Pose::new());
    }
}
