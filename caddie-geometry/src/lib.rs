pub mod centroid;
pub mod error;
pub mod graph;
pub mod polygon;

pub use centroid::{compute_centroid, round_to};
pub use error::GeometryError;
pub use graph::{BoundingBox, Point};
pub use polygon::SegmentationPolygon;
