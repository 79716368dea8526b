/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::math::{mat4_look_at, mat4_perspective};

/// Lens and framing parameters the camera is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Multiplier on the distance at which the bounding sphere fills the view.
    pub distance_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: std::f32::consts::PI / 5.0,
            near: 0.01,
            far: 100.0,
            distance_factor: 1.5,
        }
    }
}

/// Perspective camera that looks at the model along +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub up: Vector3<f32>,
    /// Eye distance from the model center at zoom 1.
    pub distance: f32,
}

impl Camera {
    /// Frame a bounding sphere of `radius`.
    pub fn framing(radius: f32, config: &CameraConfig) -> Self {
        Self {
            fov: config.fov,
            near: config.near,
            far: config.far,
            up: Vector3::y(),
            distance: radius / (config.fov / 2.0).tan() * config.distance_factor,
        }
    }

    /// Eye position: `center` moved back along -Z by `distance * zoom`.
    pub fn eye(&self, center: &Point3<f32>, zoom: f32) -> Point3<f32> {
        Point3::new(center.x, center.y, center.z - self.distance * zoom)
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self, center: &Point3<f32>, zoom: f32) -> Matrix4<f32> {
        mat4_look_at(&self.eye(center, zoom), center, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        mat4_perspective(self.fov, aspect, self.near, self.far)
    }
}

/// Width over height, with a zero height treated as 1.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_distance() {
        let config = CameraConfig::default();
        let camera = Camera::framing(0.5, &config);
        let expected = 0.5 / (std::f32::consts::PI / 10.0).tan() * 1.5;
        assert!((camera.distance - expected).abs() < 1e-5);
        assert_eq!(camera.up, Vector3::y());
    }

    #[test]
    fn test_eye_follows_zoom() {
        let camera = Camera::framing(0.5, &CameraConfig::default());
        let center = Point3::new(1.0, 2.0, 3.0);
        let eye = camera.eye(&center, 2.0);
        assert_eq!(eye.x, 1.0);
        assert_eq!(eye.y, 2.0);
        assert!((eye.z - (3.0 - 2.0 * camera.distance)).abs() < 1e-5);
    }

    #[test]
    fn test_view_matrix_maps_center_ahead() {
        let camera = Camera::framing(0.5, &CameraConfig::default());
        let center = Point3::new(1.0, -1.0, 0.5);
        let view = camera.view_matrix(&center, 1.0);
        let p = view.transform_point(&center);
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
        assert!((p.z + camera.distance).abs() < 1e-4);
    }

    #[test]
    fn test_aspect_ratio() {
        assert!((aspect_ratio(800, 600) - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(aspect_ratio(640, 0), 640.0);
    }
}
