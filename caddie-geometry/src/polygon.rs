use crate::centroid::compute_centroid;
use crate::error::GeometryError;
use crate::graph::{BoundingBox, Point};
use std::ops::Deref;

/// A closed region produced by the segmentation service, in pixel space.
/// The last vertex connects back to the first; convexity is not assumed.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationPolygon(Vec<Point<f64>>);

impl Deref for SegmentationPolygon {
    type Target = Vec<Point<f64>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Point<f64>>> for SegmentationPolygon {
    fn from(vertices: Vec<Point<f64>>) -> Self {
        Self(vertices)
    }
}

impl From<Vec<[f64; 2]>> for SegmentationPolygon {
    fn from(vertices: Vec<[f64; 2]>) -> Self {
        Self(vertices.into_iter().map(Point::from).collect())
    }
}

impl SegmentationPolygon {
    /// Rejects polygons with fewer than three vertices.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.len() < 3 {
            return Err(GeometryError::DegenerateGeometry {
                vertices: self.len(),
            });
        }
        Ok(())
    }

    pub fn bounding_box(&self) -> Result<BoundingBox<f64>, GeometryError> {
        self.validate()?;
        BoundingBox::from_points(self.as_slice())
            .ok_or(GeometryError::DegenerateGeometry { vertices: 0 })
    }

    pub fn centroid(&self) -> Result<Point<f64>, GeometryError> {
        compute_centroid(self)
    }

    /// Multiplies every vertex by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self(self.iter().map(|p| p.scale(factor)).collect())
    }
}

#[test]
fn test_polygon_geometry() {
    let polygon = SegmentationPolygon::from(vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
    let scaled = polygon.scaled(2.0);

    assert_eq!(scaled.bounding_box().unwrap().as_tuple(), (0.0, 0.0, 4.0, 4.0));
    assert_eq!(scaled.centroid().unwrap(), Point::new(2.0, 2.0));
}

#[test]
fn test_polygon_rejects_short_vertex_list() {
    let polygon = SegmentationPolygon::from(vec![[0.0, 0.0], [2.0, 0.0]]);
    assert_eq!(
        polygon.bounding_box(),
        Err(GeometryError::DegenerateGeometry { vertices: 2 })
    );
    assert_eq!(
        polygon.centroid(),
        Err(GeometryError::DegenerateGeometry { vertices: 2 })
    );
}
