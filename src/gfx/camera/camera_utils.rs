use cgmath::{perspective, Deg, Matrix4, SquareMatrix};

/// Maps OpenGL clip depth `[-w, w]` onto wgpu's `[0, w]`.
///
/// `Matrix4::new` takes columns, so each line below is one column.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

/// Perspective projection that follows the viewport aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fovy: Deg<f32>, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: aspect_ratio(width, height),
            fovy,
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Projection matrix already converted to wgpu clip space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{assert_relative_eq, Point3, Vector3, Vector4};

    #[test]
    fn test_projection_guards_zero_height() {
        let mut projection = Projection::new(500, 500, Deg(45.0), 0.1, 100.0);
        assert_eq!(projection.aspect, 1.0);
        projection.resize(800, 0);
        assert_eq!(projection.aspect, 800.0);
    }

    #[test]
    fn test_wgpu_clip_depth_range() {
        let near = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.0, 0.0, -1.0, 1.0);
        let far = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(near, Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(far, Vector4::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_top_down_projection_matches_eye_distance() {
        let projection = Projection::new(500, 500, Deg(45.0), 0.1, 100.0);
        let view = Matrix4::look_at_rh(
            Point3::new(0.0, 0.0, 4.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        let clip = projection.calc_matrix() * view * Vector4::new(-1.0, 0.0, 0.0, 1.0);

        assert_relative_eq!(clip.w, 4.0, epsilon = 1e-5);
        assert_relative_eq!(clip.x / clip.w, -0.6036, epsilon = 1e-4);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
        let depth = clip.z / clip.w;
        assert!((0.0..1.0).contains(&depth), "depth {} outside wgpu range", depth);
    }

    #[test]
    fn test_matrix_conversion_is_column_major() {
        let m = Matrix4::from_translation(cgmath::Vector3::new(1.0, 2.0, 3.0));
        let array = convert_matrix4_to_array(m);
        assert_eq!(array[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
