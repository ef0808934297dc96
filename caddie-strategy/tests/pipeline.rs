use caddie_geometry::{Point, SegmentationPolygon};
use caddie_strategy::course::{CourseSession, SetupInfo};
use caddie_strategy::detect::analysis::compose::CompositeDescriber;
use caddie_strategy::detect::analyze_course;
use caddie_strategy::detect::property::feature::{FeatureType, ReferencePoint};

fn square(u0: f64, v0: f64, u1: f64, v1: f64) -> SegmentationPolygon {
    SegmentationPolygon::from(vec![[u0, v0], [u1, v0], [u1, v1], [u0, v1]])
}

#[test]
fn test_tee_to_fairway_end_to_end() -> anyhow::Result<()> {
    let polygons = vec![square(0.0, 0.0, 2.0, 2.0), square(2.0, 2.0, 6.0, 6.0)];
    let points = vec![
        ReferencePoint::tee(1.0, 1.0, "blue"),
        ReferencePoint::new(FeatureType::Fairway, 5.0, 5.0),
    ];

    let analysis = analyze_course(&points, &polygons, Some(2.0))?;

    let tee = &analysis.features[0];
    assert_eq!(tee.bounding_box.as_tuple(), (0.0, 0.0, 4.0, 4.0));
    assert_eq!(tee.feature_center, Point::new(2.0, 2.0));
    assert_eq!(tee.tee_color.as_deref(), Some("blue"));

    let fairway = &analysis.features[1];
    assert_eq!(fairway.bounding_box.as_tuple(), (4.0, 4.0, 12.0, 12.0));
    assert_eq!(fairway.feature_center, Point::new(8.0, 8.0));

    assert_eq!(analysis.distances.len(), 1);
    assert_eq!(analysis.distances.tee_fairway.len(), 1);
    assert_eq!(analysis.distances.tee_fairway[0].distance, 8.49);
    assert!(analysis.distances.fairway_green.is_empty());
    assert!(analysis.unmatched.is_empty());
    Ok(())
}

#[test]
fn test_session_driven_run() -> anyhow::Result<()> {
    let session = CourseSession::new();
    session.set_scale("1")?;
    session.add_entry(FeatureType::Fairway, "5", "5", "")?;
    session.add_entry(FeatureType::Bunker, "20", "20", "")?;
    session.add_entry(FeatureType::Bunker, "500", "500", "")?;
    session.add_entry(FeatureType::Green, "5", "40", "")?;

    let polygons = vec![
        square(0.0, 0.0, 100.0, 100.0),
        square(0.0, 0.0, 10.0, 10.0),
        square(17.0, 16.0, 23.0, 24.0),
        square(0.0, 36.0, 10.0, 44.0),
    ];
    let analysis = session.analyze(&polygons)?;

    assert_eq!(analysis.features.len(), 3);
    assert_eq!(analysis.unmatched.len(), 1);
    assert_eq!(analysis.unmatched[0].point.u, 500.0);
    assert_eq!(analysis.groups.total(), 3);

    let fairway_bunker = &analysis.distances.fairway_bunker;
    assert_eq!(fairway_bunker.len(), 1);
    assert_eq!(fairway_bunker[0].distance, 21.21);
    assert_eq!(analysis.distances.fairway_green[0].distance, 35.0);
    assert!(analysis.distances.tee_fairway.is_empty());
    assert!(analysis.distances.tee_bunker.is_empty());

    // later edits do not touch a finished analysis
    session.clear();
    assert_eq!(analysis.features.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_prompt_lists_features_in_match_order() -> anyhow::Result<()> {
    let polygons = vec![square(0.0, 0.0, 2.0, 2.0), square(2.0, 2.0, 6.0, 6.0)];
    let points = vec![
        ReferencePoint::new(FeatureType::Fairway, 5.0, 5.0),
        ReferencePoint::tee(1.0, 1.0, "red"),
    ];
    let analysis = analyze_course(&points, &polygons, Some(2.0))?;

    let prompt = CompositeDescriber::new()
        .describe(&analysis, &SetupInfo::default())
        .await;

    let fairway = prompt.find("\"feature_name\": \"fairway\"").unwrap();
    let tee = prompt.find("\"feature_name\": \"tee\"").unwrap();
    assert!(fairway < tee);
    assert!(prompt.ends_with('\n'));
    Ok(())
}
