use anyhow::anyhow;
use caddie_geometry::{BoundingBox, Point};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    Bunker,
    Fairway,
    Green,
    Tee,
}

impl FeatureType {
    pub const ALL: [FeatureType; 4] = [
        FeatureType::Bunker,
        FeatureType::Fairway,
        FeatureType::Green,
        FeatureType::Tee,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FeatureType::Bunker => "bunker",
            FeatureType::Fairway => "fairway",
            FeatureType::Green => "green",
            FeatureType::Tee => "tee",
        }
    }
}

impl Display for FeatureType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FeatureType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureType::ALL
            .into_iter()
            .find(|t| t.name() == s.trim())
            .ok_or_else(|| anyhow!("Unknown feature type: {}", s))
    }
}

/// A user click labelling the approximate location of a course feature.
/// Coordinates are raw, before the scale factor is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePoint {
    pub feature_type: FeatureType,
    pub u: f64,
    pub v: f64,
    pub color: Option<String>,
}

impl ReferencePoint {
    pub fn new(feature_type: FeatureType, u: f64, v: f64) -> Self {
        Self {
            feature_type,
            u,
            v,
            color: None,
        }
    }

    pub fn tee(u: f64, v: f64, color: impl Into<String>) -> Self {
        Self {
            feature_type: FeatureType::Tee,
            u,
            v,
            color: Some(color.into()),
        }
    }

    pub fn position(&self) -> Point<f64> {
        Point::new(self.u, self.v)
    }
}

/// A reference point bound to the segmentation region that encloses it.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedFeature {
    pub feature_type: FeatureType,
    /// Centroid of the selected region, in yards.
    pub feature_center: Point<f64>,
    /// Scaled extent of the selected region, in pixels.
    pub bounding_box: BoundingBox<f64>,
    pub tee_color: Option<String>,
}

impl MatchedFeature {
    pub fn view(&self) -> FeatureView<'_> {
        FeatureView {
            feature_name: self.feature_type,
            feature_center_yards: [self.feature_center.x, self.feature_center.y],
            tee_color: self.tee_color.as_deref(),
        }
    }
}

/// Serialized form handed to the strategy planner. Bounding boxes are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureView<'a> {
    pub feature_name: FeatureType,
    pub feature_center_yards: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tee_color: Option<&'a str>,
}

#[test]
fn test_feature_type_parse() {
    assert_eq!("bunker".parse::<FeatureType>().unwrap(), FeatureType::Bunker);
    assert_eq!(" tee ".parse::<FeatureType>().unwrap(), FeatureType::Tee);
    assert!("water".parse::<FeatureType>().is_err());
    assert_eq!(FeatureType::Green.to_string(), "green");
}

#[test]
fn test_feature_view_json() {
    let feature = MatchedFeature {
        feature_type: FeatureType::Tee,
        feature_center: Point::new(2.0, 3.5),
        bounding_box: BoundingBox::new(0.0, 0.0, 4.0, 7.0),
        tee_color: Some("red".to_string()),
    };
    let json = serde_json::to_value(feature.view()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "feature_name": "tee",
            "feature_center_yards": [2.0, 3.5],
            "tee_color": "red"
        })
    );

    let fairway = MatchedFeature {
        feature_type: FeatureType::Fairway,
        tee_color: None,
        ..feature
    };
    let json = serde_json::to_value(fairway.view()).unwrap();
    assert!(json.get("tee_color").is_none());
}
