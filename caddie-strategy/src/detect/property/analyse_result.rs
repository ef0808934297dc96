use crate::detect::group::FeatureGroup;
use crate::detect::matcher::{RejectedPolygon, UnmatchedReferencePoint};
use crate::detect::property::distance::DistanceTable;
use crate::detect::property::feature::MatchedFeature;
use crate::detect::property::overlay::OverlayMark;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub struct CourseAnalysis {
    pub scale: f64,
    pub features: Vec<MatchedFeature>,
    pub groups: FeatureGroup,
    pub distances: DistanceTable,
    pub unmatched: Vec<UnmatchedReferencePoint>,
    pub rejected_polygons: Vec<RejectedPolygon>,
}

impl CourseAnalysis {
    pub fn overlay_marks(&self) -> Vec<OverlayMark> {
        self.features
            .iter()
            .map(|feature| feature.overlay(self.scale))
            .collect()
    }
}

impl Display for CourseAnalysis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scale: {} px/yd, Features: {}, Distances: {}, Unmatched points: {}, Rejected polygons: {}",
            self.scale,
            self.features.len(),
            self.distances.len(),
            self.unmatched.len(),
            self.rejected_polygons.len()
        )
    }
}
