/// Model transform, orientation state and the per-frame MVP
use nalgebra::{Matrix4, Vector3};

use crate::bounds::BoundingBox;
use crate::math::{
    mat4_scale, mat4_translate, quat_from_axis_angle, quat_identity, quat_mul, quat_normalize,
    quat_to_mat4, Quat,
};
use crate::projection::Camera;

/// Bounds on the zoom factor and how far one key press moves it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub step: f32,
    pub min: f32,
    pub max: f32,
}

impl ZoomLimits {
    /// Finite values with `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.step.is_finite() && self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            step: 0.1,
            min: 0.2,
            max: 5.0,
        }
    }
}

/// User-controlled orientation and zoom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub orientation: Quat,
    pub zoom: f32,
    pub limits: ZoomLimits,
}

impl TransformState {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            orientation: quat_identity(),
            zoom: 1.0,
            limits,
        }
    }

    /// Compose a rotation of `angle` radians about `axis` after the current orientation.
    pub fn rotate(&mut self, axis: &Vector3<f32>, angle: f32) {
        let step = quat_from_axis_angle(axis, angle);
        self.orientation = quat_normalize(&quat_mul(&self.orientation, &step));
    }

    pub fn reset_orientation(&mut self) {
        self.orientation = quat_identity();
    }

    /// Move the zoom factor by `steps` increments, clamped to the limits.
    pub fn zoom_by(&mut self, steps: f32) {
        // Not `clamp`, which panics when min > max
        self.zoom = (self.zoom + steps * self.limits.step)
            .max(self.limits.min)
            .min(self.limits.max);
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

/// Matrices produced for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub mvp: Matrix4<f32>,
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Scale and rotate the mesh about its own center.
    ///
    /// Applied right to left: move the center to the origin, scale, rotate, move back.
    pub fn model_matrix(bbox: &BoundingBox, orientation: &Quat) -> Matrix4<f32> {
        let center = bbox.center.coords;
        mat4_translate(&center)
            * quat_to_mat4(orientation)
            * mat4_scale(bbox.scale)
            * mat4_translate(&-center)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }

    /// Everything the renderer needs for the current state and framebuffer aspect.
    pub fn frame(
        camera: &Camera,
        bbox: &BoundingBox,
        state: &TransformState,
        aspect: f32,
    ) -> FrameMatrices {
        let model = Self::model_matrix(bbox, &state.orientation);
        let view = camera.view_matrix(&bbox.center, state.zoom);
        let projection = camera.projection_matrix(aspect);
        FrameMatrices {
            model,
            view,
            projection,
            mvp: Self::mvp_matrix(&model, &view, &projection),
        }
    }
}
