use crate::course::SetupInfo;
use crate::detect::analysis::{Describer, DescriberDispatcher};
use crate::detect::property::analyse_result::CourseAnalysis;

const PROMPT_HEADER: &str = "The following are the 3 input parts described previously:";

pub struct CompositeDescriber {
    describers: Vec<DescriberDispatcher>,
}

impl Default for CompositeDescriber {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeDescriber {
    pub fn new() -> Self {
        // Sections appear in this order
        CompositeDescriber {
            describers: DescriberDispatcher::all(),
        }
    }

    /// Builds the user prompt for the strategy planner from one analysis run.
    pub async fn describe(&self, data: &CourseAnalysis, setup: &SetupInfo) -> String {
        let body = Describer::describe(&self.describers, data, setup)
            .await
            .unwrap_or_default();

        format!("{}\n{}\n", PROMPT_HEADER, body)
    }
}

#[cfg(test)]
fn sample_analysis() -> CourseAnalysis {
    use crate::detect::analyze_course;
    use crate::detect::property::feature::{FeatureType, ReferencePoint};
    use caddie_geometry::SegmentationPolygon;

    let polygons = vec![
        SegmentationPolygon::from(vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]),
        SegmentationPolygon::from(vec![[2.0, 2.0], [6.0, 2.0], [6.0, 6.0], [2.0, 6.0]]),
    ];
    let points = vec![
        ReferencePoint::tee(1.0, 1.0, "red"),
        ReferencePoint::new(FeatureType::Fairway, 5.0, 5.0),
        ReferencePoint::new(FeatureType::Green, 40.0, 40.0),
    ];
    analyze_course(&points, &polygons, Some(2.0)).unwrap()
}

#[tokio::test]
async fn test_prompt_sections_in_order() {
    let setup = SetupInfo {
        clubs: vec!["driver".to_string(), "7-iron".to_string()],
        club_performance: [("driver".to_string(), 230), ("7-iron".to_string(), 150)]
            .into_iter()
            .collect(),
        level_error: 4.5,
        tee_color: "red".to_string(),
    };
    let prompt = CompositeDescriber::new()
        .describe(&sample_analysis(), &setup)
        .await;

    assert!(prompt.starts_with(PROMPT_HEADER));
    let positions: Vec<usize> = [
        "## Setup Information",
        "## Physical Features",
        "## Inter-Feature Distance",
        "## Appendix: Unmatched Reference Points",
    ]
    .iter()
    .map(|title| prompt.find(title).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(prompt.contains("\"distance\": 8.49"));
    assert!(prompt.contains("\"tee_color\": \"red\""));
    assert!(prompt.contains("green marked at (40, 40)"));
    assert!(prompt.contains("not a separate input part"));
    assert_eq!(prompt.matches("\n## ").count(), 4);
    assert!(!prompt.contains("bounding_box"));
}

#[tokio::test]
async fn test_no_notes_when_everything_matched() {
    let mut analysis = sample_analysis();
    analysis.unmatched.clear();

    let prompt = CompositeDescriber::new()
        .describe(&analysis, &SetupInfo::default())
        .await;
    assert!(!prompt.contains("## Appendix"));
    assert!(prompt.contains("## Inter-Feature Distance"));
}
