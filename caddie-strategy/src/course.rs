use crate::detect::analyze_course;
use crate::detect::property::analyse_result::CourseAnalysis;
use crate::detect::property::feature::{FeatureType, ReferencePoint};
use anyhow::{anyhow, bail, Result};
use caddie_geometry::SegmentationPolygon;
use log::{debug, info};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_COURSE_PATH: &str = "./data/course.json";
pub const DEFAULT_POLYGONS_PATH: &str = "./data/polygons.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub u: f64,
    pub v: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Clicks entered per feature type, plus the image scale in pixels per yard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseData {
    #[serde(default)]
    pub bunker: Vec<CourseEntry>,
    #[serde(default)]
    pub fairway: Vec<CourseEntry>,
    #[serde(default)]
    pub green: Vec<CourseEntry>,
    #[serde(default)]
    pub tee: Vec<CourseEntry>,
    #[serde(default)]
    pub scale: Option<f64>,
}

impl CourseData {
    pub fn entries(&self, feature_type: FeatureType) -> &[CourseEntry] {
        match feature_type {
            FeatureType::Bunker => &self.bunker,
            FeatureType::Fairway => &self.fairway,
            FeatureType::Green => &self.green,
            FeatureType::Tee => &self.tee,
        }
    }

    fn entries_mut(&mut self, feature_type: FeatureType) -> &mut Vec<CourseEntry> {
        match feature_type {
            FeatureType::Bunker => &mut self.bunker,
            FeatureType::Fairway => &mut self.fairway,
            FeatureType::Green => &mut self.green,
            FeatureType::Tee => &mut self.tee,
        }
    }

    /// Flattens the entries into reference points: bunkers, fairways, greens,
    /// then tees, each list in entry order.
    pub fn reference_points(&self) -> Vec<ReferencePoint> {
        FeatureType::ALL
            .into_iter()
            .flat_map(|feature_type| {
                self.entries(feature_type)
                    .iter()
                    .map(move |entry| ReferencePoint {
                        feature_type,
                        u: entry.u,
                        v: entry.v,
                        color: entry.color.clone(),
                    })
            })
            .collect()
    }

    pub fn analyze(&self, polygons: &[SegmentationPolygon]) -> Result<CourseAnalysis> {
        Ok(analyze_course(
            &self.reference_points(),
            polygons,
            self.scale,
        )?)
    }
}

/// Golfer profile passed to the strategy planner as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetupInfo {
    pub clubs: Vec<String>,
    /// Maximum carry per club, in yards.
    pub club_performance: BTreeMap<String, u32>,
    /// Expected off-target error, in degrees.
    pub level_error: f64,
    pub tee_color: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaddieConfig {
    #[serde(default)]
    pub course: CourseData,
    #[serde(default)]
    pub setup: SetupInfo,
}

impl CaddieConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read course config {}: {}", path.display(), e))?;
        let config = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Invalid course config {}: {}", path.display(), e))?;
        info!("Loaded course config from {}", path.display());
        Ok(config)
    }
}

/// Reads segmentation output: an array of polygons, each an array of `[u, v]`.
pub fn load_polygons(path: impl AsRef<Path>) -> Result<Vec<SegmentationPolygon>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read polygons {}: {}", path.display(), e))?;
    let raw: Vec<Vec<[f64; 2]>> = serde_json::from_str(&text)
        .map_err(|e| anyhow!("Invalid polygons {}: {}", path.display(), e))?;
    info!("Loaded {} polygons from {}", raw.len(), path.display());

    Ok(raw.into_iter().map(SegmentationPolygon::from).collect())
}

/// Course data shared between the input side and analysis runs.
#[derive(Debug, Default)]
pub struct CourseSession {
    data: RwLock<CourseData>,
}

impl CourseSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: CourseData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    pub fn add_entry(&self, feature_type: FeatureType, u: &str, v: &str, color: &str) -> Result<()> {
        let (u, v) = (u.trim(), v.trim());
        if u.is_empty() || v.is_empty() {
            bail!("u and v values are required.");
        }
        let (u, v) = match (u.parse::<i64>(), v.parse::<i64>()) {
            (Ok(u), Ok(v)) => (u, v),
            _ => bail!("u and v must be numbers."),
        };

        let color = color.trim();
        let color = match feature_type {
            FeatureType::Tee if !color.is_empty() => Some(color.to_string()),
            _ => None,
        };

        debug!("Adding {} entry at ({}, {})", feature_type, u, v);
        self.data
            .write()
            .entries_mut(feature_type)
            .push(CourseEntry {
                u: u as f64,
                v: v as f64,
                color,
            });
        Ok(())
    }

    pub fn set_scale(&self, scale: &str) -> Result<()> {
        let scale = scale.trim();
        if scale.is_empty() {
            bail!("Scale is required.");
        }
        let scale = scale
            .parse::<f64>()
            .map_err(|_| anyhow!("Scale must be a number."))?;

        self.data.write().scale = Some(scale);
        Ok(())
    }

    pub fn clear(&self) {
        *self.data.write() = CourseData::default();
    }

    pub fn snapshot(&self) -> CourseData {
        self.data.read().clone()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&*self.data.read())?)
    }

    /// Analyzes a snapshot so concurrent edits never leak into a running pass.
    pub fn analyze(&self, polygons: &[SegmentationPolygon]) -> Result<CourseAnalysis> {
        self.snapshot().analyze(polygons)
    }
}

#[test]
fn test_session_add_entry() -> Result<()> {
    let session = CourseSession::new();
    session.add_entry(FeatureType::Tee, "12", " 40 ", "red")?;
    session.add_entry(FeatureType::Bunker, "3", "4", "blue")?;
    session.add_entry(FeatureType::Tee, "1", "2", "")?;

    let data = session.snapshot();
    assert_eq!(
        data.tee,
        vec![
            CourseEntry {
                u: 12.0,
                v: 40.0,
                color: Some("red".to_string())
            },
            CourseEntry {
                u: 1.0,
                v: 2.0,
                color: None
            },
        ]
    );
    assert_eq!(data.bunker[0].color, None);
    Ok(())
}

#[test]
fn test_session_rejects_bad_input() {
    let session = CourseSession::new();

    let err = session.add_entry(FeatureType::Green, "", "3", "").unwrap_err();
    assert_eq!(err.to_string(), "u and v values are required.");
    let err = session.add_entry(FeatureType::Green, "a", "3", "").unwrap_err();
    assert_eq!(err.to_string(), "u and v must be numbers.");
    let err = session.set_scale(" ").unwrap_err();
    assert_eq!(err.to_string(), "Scale is required.");
    let err = session.set_scale("two").unwrap_err();
    assert_eq!(err.to_string(), "Scale must be a number.");

    assert_eq!(session.snapshot(), CourseData::default());
}

#[test]
fn test_session_scale_and_clear() -> Result<()> {
    let session = CourseSession::new();
    session.set_scale("2.5")?;
    session.add_entry(FeatureType::Fairway, "5", "5", "")?;
    assert_eq!(session.snapshot().scale, Some(2.5));

    session.clear();
    assert_eq!(session.snapshot(), CourseData::default());
    Ok(())
}

#[test]
fn test_session_json_round_trip() -> Result<()> {
    let session = CourseSession::new();
    session.add_entry(FeatureType::Tee, "1", "1", "black")?;
    session.set_scale("3")?;

    let json = session.to_json()?;
    let parsed: CourseData = serde_json::from_str(&json)?;
    assert_eq!(parsed, session.snapshot());
    assert!(json.contains("\"scale\": 3.0"));
    Ok(())
}

#[test]
fn test_reference_point_order() {
    let data = CourseData {
        tee: vec![CourseEntry {
            u: 1.0,
            v: 1.0,
            color: Some("red".to_string()),
        }],
        bunker: vec![
            CourseEntry {
                u: 2.0,
                v: 2.0,
                color: None,
            },
            CourseEntry {
                u: 3.0,
                v: 3.0,
                color: None,
            },
        ],
        green: vec![CourseEntry {
            u: 4.0,
            v: 4.0,
            color: None,
        }],
        ..CourseData::default()
    };

    let kinds: Vec<(FeatureType, f64)> = data
        .reference_points()
        .iter()
        .map(|p| (p.feature_type, p.u))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (FeatureType::Bunker, 2.0),
            (FeatureType::Bunker, 3.0),
            (FeatureType::Green, 4.0),
            (FeatureType::Tee, 1.0),
        ]
    );
}

#[test]
fn test_missing_scale_fails_analysis() {
    let session = CourseSession::new();
    session.add_entry(FeatureType::Fairway, "5", "5", "").unwrap();
    let polygons = vec![SegmentationPolygon::from(vec![
        [0.0, 0.0],
        [10.0, 0.0],
        [10.0, 10.0],
    ])];

    let err = session.analyze(&polygons).unwrap_err();
    assert!(err.downcast_ref::<crate::detect::matcher::MatchError>().is_some());
}

#[test]
fn test_course_file_accepts_fractional_points() -> Result<()> {
    let config: CaddieConfig = serde_json::from_str(
        r#"{
            "course": {
                "fairway": [{ "u": 12.5, "v": 40 }],
                "tee": [{ "u": 3.25, "v": 7.75, "color": "white" }],
                "scale": 1.5
            }
        }"#,
    )?;

    let points = config.course.reference_points();
    assert_eq!(points.len(), 2);
    assert_eq!((points[0].u, points[0].v), (12.5, 40.0));
    assert_eq!((points[1].u, points[1].v), (3.25, 7.75));
    assert_eq!(points[1].color.as_deref(), Some("white"));
    assert_eq!(config.setup, SetupInfo::default());
    Ok(())
}
