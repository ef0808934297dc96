use crate::detect::property::feature::{FeatureType, MatchedFeature, ReferencePoint};
use caddie_geometry::{BoundingBox, GeometryError, Point, SegmentationPolygon};
use log::{debug, warn};
use rayon::prelude::*;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum MatchError {
    /// The pixels-per-yard ratio is unset, zero, negative or not finite.
    MissingScale(Option<f64>),
}

impl Display for MatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::MissingScale(None) => write!(f, "scale is not set"),
            MatchError::MissingScale(Some(value)) => {
                write!(f, "scale must be a positive number, got {}", value)
            }
        }
    }
}

impl std::error::Error for MatchError {}

/// Pixels per yard for a single analysis run. Always finite and positive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub fn new(value: Option<f64>) -> Result<Self, MatchError> {
        match value {
            Some(scale) if scale.is_finite() && scale > 0.0 => Ok(Self(scale)),
            other => Err(MatchError::MissingScale(other)),
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnmatchedReferencePoint {
    pub index: usize,
    pub point: ReferencePoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedPolygon {
    pub index: usize,
    pub error: GeometryError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    /// One entry per matched reference point, in input order.
    pub features: Vec<MatchedFeature>,
    pub unmatched: Vec<UnmatchedReferencePoint>,
    pub rejected_polygons: Vec<RejectedPolygon>,
}

#[derive(Debug, Clone)]
struct Candidate {
    bounding_box: BoundingBox<f64>,
    center: Point<f64>,
}

/// Scales every polygon and precomputes its box and centroid. Polygons the
/// geometry kernel refuses are reported and never become candidates.
fn prepare_candidates(
    polygons: &[SegmentationPolygon],
    scale: ScaleFactor,
) -> (Vec<Candidate>, Vec<RejectedPolygon>) {
    let prepared = polygons
        .par_iter()
        .enumerate()
        .map(|(index, polygon)| -> Result<Candidate, RejectedPolygon> {
            let scaled = polygon.scaled(scale.value());
            let bounding_box = scaled
                .bounding_box()
                .map_err(|error| RejectedPolygon { index, error })?;
            let center = scaled
                .centroid()
                .map_err(|error| RejectedPolygon { index, error })?;
            Ok(Candidate {
                bounding_box,
                center,
            })
        })
        .collect::<Vec<_>>();

    let mut candidates = Vec::with_capacity(prepared.len());
    let mut rejected = Vec::new();
    for result in prepared {
        match result {
            Ok(candidate) => candidates.push(candidate),
            Err(rejection) => rejected.push(rejection),
        }
    }
    (candidates, rejected)
}

/// Smallest-area box containing `point`. Equal areas keep the earlier polygon.
fn select_smallest<'a>(candidates: &'a [Candidate], point: &Point<f64>) -> Option<&'a Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in candidates
        .iter()
        .filter(|c| c.bounding_box.contains(point))
    {
        match best {
            Some(current) if current.bounding_box.area() <= candidate.bounding_box.area() => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Binds every reference point to the tightest segmentation region around it.
///
/// The point and the polygons are both multiplied by `scale` before the
/// containment test. Points inside no region are returned in
/// [`MatchOutcome::unmatched`] instead of failing the run. The scale is
/// validated up front by [`ScaleFactor::new`].
pub fn match_features(
    reference_points: &[ReferencePoint],
    polygons: &[SegmentationPolygon],
    scale: ScaleFactor,
) -> MatchOutcome {
    let (candidates, rejected_polygons) = prepare_candidates(polygons, scale);
    for rejected in &rejected_polygons {
        warn!(
            "Discarding segmentation polygon {}: {}",
            rejected.index, rejected.error
        );
    }

    let matches = reference_points
        .par_iter()
        .map(|point| {
            let position = point.position().scale(scale.value());
            select_smallest(&candidates, &position).map(|candidate| MatchedFeature {
                feature_type: point.feature_type,
                feature_center: candidate.center,
                bounding_box: candidate.bounding_box,
                tee_color: match point.feature_type {
                    FeatureType::Tee => point.color.clone(),
                    _ => None,
                },
            })
        })
        .collect::<Vec<_>>();

    let mut outcome = MatchOutcome {
        rejected_polygons,
        ..MatchOutcome::default()
    };
    for (index, (point, matched)) in reference_points.iter().zip(matches).enumerate() {
        match matched {
            Some(feature) => outcome.features.push(feature),
            None => {
                warn!(
                    "No segmentation region contains {} point {} at ({}, {})",
                    point.feature_type, index, point.u, point.v
                );
                outcome.unmatched.push(UnmatchedReferencePoint {
                    index,
                    point: point.clone(),
                });
            }
        }
    }

    debug!(
        "Matched {} of {} reference points against {} usable polygons",
        outcome.features.len(),
        reference_points.len(),
        candidates.len()
    );

    outcome
}

#[cfg(test)]
fn scale(value: f64) -> ScaleFactor {
    ScaleFactor::new(Some(value)).unwrap()
}

#[cfg(test)]
fn square(u0: f64, v0: f64, u1: f64, v1: f64) -> SegmentationPolygon {
    SegmentationPolygon::from(vec![[u0, v0], [u1, v0], [u1, v1], [u0, v1]])
}

#[test]
fn test_single_match() {
    let polygons = vec![square(0.0, 0.0, 10.0, 10.0)];
    let points = vec![ReferencePoint::new(FeatureType::Fairway, 5.0, 5.0)];

    let outcome = match_features(&points, &polygons, scale(1.0));
    assert_eq!(outcome.features.len(), 1);
    assert!(outcome.unmatched.is_empty());

    let feature = &outcome.features[0];
    assert_eq!(feature.feature_type, FeatureType::Fairway);
    assert_eq!(feature.bounding_box.as_tuple(), (0.0, 0.0, 10.0, 10.0));
    assert_eq!(feature.feature_center, Point::new(5.0, 5.0));
    assert_eq!(feature.tee_color, None);
}

#[test]
fn test_smallest_enclosing_region_wins() {
    // Area 100 first, area 25 second; both contain the click.
    let polygons = vec![square(0.0, 0.0, 10.0, 10.0), square(2.0, 2.0, 7.0, 7.0)];
    let points = vec![ReferencePoint::new(FeatureType::Green, 4.0, 4.0)];

    let outcome = match_features(&points, &polygons, scale(1.0));
    assert_eq!(
        outcome.features[0].bounding_box.as_tuple(),
        (2.0, 2.0, 7.0, 7.0)
    );
}

#[test]
fn test_equal_area_keeps_first_polygon() {
    let polygons = vec![square(0.0, 0.0, 4.0, 4.0), square(1.0, 1.0, 5.0, 5.0)];
    let points = vec![ReferencePoint::new(FeatureType::Bunker, 2.0, 2.0)];

    let outcome = match_features(&points, &polygons, scale(1.0));
    assert_eq!(
        outcome.features[0].bounding_box.as_tuple(),
        (0.0, 0.0, 4.0, 4.0)
    );
}

#[test]
fn test_unmatched_point_is_reported() {
    let polygons = vec![square(0.0, 0.0, 10.0, 10.0)];
    let points = vec![
        ReferencePoint::new(FeatureType::Bunker, 50.0, 50.0),
        ReferencePoint::new(FeatureType::Fairway, 1.0, 1.0),
    ];

    let outcome = match_features(&points, &polygons, scale(1.0));
    assert_eq!(outcome.features.len(), 1);
    assert_eq!(outcome.features[0].feature_type, FeatureType::Fairway);
    assert_eq!(outcome.unmatched.len(), 1);
    assert_eq!(outcome.unmatched[0].index, 0);
    assert_eq!(outcome.unmatched[0].point, points[0]);
}

#[test]
fn test_missing_scale() {
    for value in [None, Some(0.0), Some(-2.0), Some(f64::INFINITY)] {
        assert_eq!(ScaleFactor::new(value), Err(MatchError::MissingScale(value)));
    }
    assert!(matches!(
        ScaleFactor::new(Some(f64::NAN)),
        Err(MatchError::MissingScale(_))
    ));
    assert_eq!(ScaleFactor::new(Some(2.5)).map(|s| s.value()), Ok(2.5));
}

#[test]
fn test_scale_applies_to_points_and_polygons() {
    let polygons = vec![square(0.0, 0.0, 2.0, 2.0), square(2.0, 2.0, 6.0, 6.0)];
    let points = vec![ReferencePoint::new(FeatureType::Fairway, 5.0, 5.0)];

    let outcome = match_features(&points, &polygons, scale(2.0));
    let feature = &outcome.features[0];
    assert_eq!(feature.bounding_box.as_tuple(), (4.0, 4.0, 12.0, 12.0));
    assert_eq!(feature.feature_center, Point::new(8.0, 8.0));
}

#[test]
fn test_tee_color_only_for_tees() {
    let polygons = vec![square(0.0, 0.0, 10.0, 10.0)];
    let mut bunker = ReferencePoint::new(FeatureType::Bunker, 3.0, 3.0);
    bunker.color = Some("blue".to_string());
    let points = vec![ReferencePoint::tee(1.0, 1.0, "red"), bunker];

    let outcome = match_features(&points, &polygons, scale(1.0));
    assert_eq!(outcome.features[0].tee_color.as_deref(), Some("red"));
    assert_eq!(outcome.features[1].tee_color, None);
}

#[test]
fn test_bad_polygons_are_discarded() {
    let polygons = vec![
        SegmentationPolygon::from(vec![[0.0, 0.0], [20.0, 20.0]]),
        SegmentationPolygon::from(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]),
        square(0.0, 0.0, 10.0, 10.0),
    ];
    let points = vec![ReferencePoint::new(FeatureType::Fairway, 1.0, 1.0)];

    let outcome = match_features(&points, &polygons, scale(1.0));
    assert_eq!(
        outcome.features[0].bounding_box.as_tuple(),
        (0.0, 0.0, 10.0, 10.0)
    );
    assert_eq!(
        outcome.rejected_polygons,
        vec![
            RejectedPolygon {
                index: 0,
                error: GeometryError::DegenerateGeometry { vertices: 2 }
            },
            RejectedPolygon {
                index: 1,
                error: GeometryError::ZeroArea
            },
        ]
    );
}

#[test]
fn test_inputs_are_untouched() {
    let polygons = vec![square(0.0, 0.0, 10.0, 10.0)];
    let points = vec![ReferencePoint::new(FeatureType::Fairway, 5.0, 5.0)];
    let (polygons_before, points_before) = (polygons.clone(), points.clone());

    let first = match_features(&points, &polygons, scale(3.0));
    let second = match_features(&points, &polygons, scale(3.0));

    assert_eq!(first, second);
    assert_eq!(polygons, polygons_before);
    assert_eq!(points, points_before);
}
