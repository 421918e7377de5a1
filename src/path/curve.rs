use cgmath::Vector3;

/// Quadratic curve `p(t) = a t² + b t + c` through three control points.
///
/// The fit passes through `p0` at `t = 0`, `p1` at `t = 0.5` and `p2` at
/// `t = 1`. Coefficients are fixed once fitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticCurve {
    a: Vector3<f32>,
    b: Vector3<f32>,
    c: Vector3<f32>,
}

impl QuadraticCurve {
    /// Parameter value the middle control point lies at.
    pub const MID_T: f32 = 0.5;

    pub fn fit(p0: Vector3<f32>, p1: Vector3<f32>, p2: Vector3<f32>) -> Self {
        let t = Self::MID_T;
        let c = p0;
        // Solve a t² + (p2 - p0 - a) t = p1 - p0 for a with t = 0.5.
        let a = (p1 - p0 - (p2 - p0) * t) / (t * t - t);
        let b = (p2 - p0) - a;
        Self { a, b, c }
    }

    pub fn coefficients(&self) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        (self.a, self.b, self.c)
    }

    /// Evaluates the curve. Any real `t` is accepted.
    pub fn evaluate(&self, t: f32) -> Vector3<f32> {
        self.a * (t * t) + self.b * t + self.c
    }

    /// Samples `steps + 1` evenly spaced points from `t = 0` to `t = 1`.
    pub fn sample(&self, steps: u32) -> Vec<Vector3<f32>> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| self.evaluate(i as f32 / steps as f32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::assert_relative_eq;

    fn reference() -> QuadraticCurve {
        QuadraticCurve::fit(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 2.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_fit_passes_through_control_points() {
        let curve = reference();
        assert_relative_eq!(curve.evaluate(0.0), Vector3::new(0.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(curve.evaluate(0.5), Vector3::new(1.0, 2.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(curve.evaluate(1.0), Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_fit_coefficients() {
        let (a, b, c) = reference().coefficients();
        assert_relative_eq!(a, Vector3::new(0.0, -8.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(b, Vector3::new(2.0, 8.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(c, Vector3::new(0.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_evaluate_outside_unit_interval() {
        let curve = reference();
        assert_relative_eq!(curve.evaluate(-1.0), Vector3::new(-2.0, -16.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_sample_includes_both_ends() {
        let points = reference().sample(50);
        assert_eq!(points.len(), 51);
        assert_relative_eq!(points[25], Vector3::new(1.0, 2.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(points[50], Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_collinear_points_fit_a_line() {
        let curve = QuadraticCurve::fit(
            Vector3::new(0.0, 0.0, 0.5),
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(1.0, 1.0, 0.5),
        );
        let (a, _, _) = curve.coefficients();
        assert_relative_eq!(a, Vector3::new(0.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(curve.evaluate(0.25), Vector3::new(0.25, 0.25, 0.5), epsilon = 1e-5);
    }
}
