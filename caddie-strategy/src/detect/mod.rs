pub mod analysis;
pub mod group;
pub mod matcher;
pub mod property;

use crate::detect::group::FeatureGroup;
use crate::detect::matcher::{match_features, MatchError, ScaleFactor};
use crate::detect::property::analyse_result::CourseAnalysis;
use crate::detect::property::distance::DistanceTable;
use crate::detect::property::feature::ReferencePoint;
use caddie_geometry::SegmentationPolygon;
use log::info;

/// Decimal places kept on inter-feature distances, in yards.
pub(crate) const DISTANCE_DECIMALS: i32 = 2;

/// Runs matching, grouping and distance analysis for one set of inputs.
///
/// Fails only when the scale is missing or not positive. Reference points
/// outside every region and malformed polygons are carried in the result.
pub fn analyze_course(
    reference_points: &[ReferencePoint],
    polygons: &[SegmentationPolygon],
    scale: Option<f64>,
) -> Result<CourseAnalysis, MatchError> {
    let scale = ScaleFactor::new(scale)?;
    let outcome = match_features(reference_points, polygons, scale);
    let groups = FeatureGroup::group_by_type(&outcome.features);
    let distances = DistanceTable::analyze_distances(&groups);

    let analysis = CourseAnalysis {
        scale: scale.value(),
        features: outcome.features,
        groups,
        distances,
        unmatched: outcome.unmatched,
        rejected_polygons: outcome.rejected_polygons,
    };
    info!("Course analysis finished. {}", analysis);

    Ok(analysis)
}

#[test]
fn test_analyze_course_requires_scale() {
    use crate::detect::property::feature::FeatureType;

    let polygons = vec![SegmentationPolygon::from(vec![
        [0.0, 0.0],
        [10.0, 0.0],
        [10.0, 10.0],
    ])];
    let points = vec![ReferencePoint::new(FeatureType::Fairway, 5.0, 2.0)];

    for scale in [None, Some(0.0), Some(-1.0)] {
        assert_eq!(
            analyze_course(&points, &polygons, scale),
            Err(MatchError::MissingScale(scale))
        );
    }
    let analysis = analyze_course(&points, &polygons, Some(1.0)).unwrap();
    assert_eq!(analysis.features.len(), 1);
}
