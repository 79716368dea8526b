/// Axis-aligned bounding box and normalization scale
use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
    pub center: Point3<f32>,
    pub size: Vector3<f32>,
    /// Uniform scale applied by the model matrix.
    pub scale: f32,
}

impl BoundingBox {
    /// Scan `positions` for min/max; the initial scale maps the longest axis to 1.
    pub fn from_positions(positions: &[Point3<f32>]) -> Result<Self> {
        let first = positions.first().ok_or(MeshError::EmptyModel)?;
        let (min, max) = positions.iter().fold((*first, *first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        });

        let center = nalgebra::center(&min, &max);
        let size = max - min;
        let longest = size.max();
        let scale = if longest > 0.0 { 1.0 / longest } else { 1.0 };

        Ok(Self {
            min,
            max,
            center,
            size,
            scale,
        })
    }

    /// Radius of the sphere enclosing the box once `scale` is applied.
    pub fn radius(&self) -> f32 {
        0.5 * self.scale * self.size.norm()
    }

    /// Replace `scale` with `1 / (2 * radius)`, the normalization the camera distance is tuned for.
    pub fn fit_unit_sphere(mut self) -> Self {
        let radius = self.radius();
        if radius > 0.0 {
            self.scale = 1.0 / (2.0 * radius);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_triangle_box() {
        let bbox = BoundingBox::from_positions(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ])
        .unwrap();

        assert_eq!(bbox.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.max, Point3::new(2.0, 2.0, 0.0));
        assert_eq!(bbox.center, Point3::new(1.0, 1.0, 0.0));
        assert_eq!(bbox.size, Vector3::new(2.0, 2.0, 0.0));
        assert!((bbox.scale - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fit_unit_sphere() {
        let bbox = BoundingBox::from_positions(&[
            Point3::new(-1.0, -2.0, -3.0),
            Point3::new(4.0, 5.0, 6.0),
        ])
        .unwrap();
        assert!((bbox.scale - 1.0 / 9.0).abs() < 1e-6);

        let radius = bbox.radius();
        assert!((radius - 0.5 / 9.0 * 155f32.sqrt()).abs() < 1e-5);

        let fitted = bbox.fit_unit_sphere();
        assert!((fitted.scale - 1.0 / (2.0 * radius)).abs() < 1e-6);
        assert_eq!(fitted.center, bbox.center);
    }

    #[test]
    fn test_single_point_keeps_unit_scale() {
        let bbox = BoundingBox::from_positions(&[Point3::new(3.0, 3.0, 3.0)])
            .unwrap()
            .fit_unit_sphere();
        assert_eq!(bbox.center, Point3::new(3.0, 3.0, 3.0));
        assert_eq!(bbox.scale, 1.0);
    }

    #[test]
    fn test_empty_positions() {
        assert!(matches!(
            BoundingBox::from_positions(&[]),
            Err(MeshError::EmptyModel)
        ));
    }
}
