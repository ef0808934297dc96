//! Contract with the strategy planner: the system prompt, the JSON schema the
//! planner must answer with, and parsing of its reply.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{json, Serializer, Value};

pub const RESPONSE_SCHEMA_NAME: &str = "golf_strategy_response";

pub const SYSTEM_INSTRUCTIONS: &str = r#"You are an AI caddy. Your job is to come up with the best plan of club selections to get the lowest score for this hole. Describe where every shot lands and explain each decision until the ball is in the hole. Also describe the fairway and every obstacle between the tee and the hole, with its type and its position relative to the fairway (left, right or center), using the numeric distances given in the input.
Input has 2 parts: an image of the golf hole map, and text input with 3 sections in JSON format.
## Setup Information
{
    "clubs": ["driver", "7-iron", ...],
    "club_performance": {"driver": <integer yards>, "7-iron": <integer yards>, ...},
    "level_error": <float degrees>,
    "tee_color": <string color>
}
"clubs" lists the clubs available to the player. "club_performance" maps each club to the maximum distance in yards the player reaches with it; the player's skill affects how reliably that maximum is reached and how well shorter shots are controlled. "level_error" is how many degrees off target the player may hit. "tee_color" is the tee the player starts from.
## Physical Features
[
    {"feature_name": "fairway", "feature_center_yards": [x, y]},
    {"feature_name": "tee", "feature_center_yards": [x, y], "tee_color": "red"},
    ...
]
"feature_name" is one of "fairway", "bunker", "tee" or "green". "feature_center_yards" is the center of the feature as x, y coordinates in yards. Tees also carry "tee_color".
## Inter-Feature Distance
[
    {
        "distance": <float yards>,
        "feature_1": {"feature_name": "fairway", "feature_center_yards": [x, y]},
        "feature_2": {"feature_name": "bunker", "feature_center_yards": [x, y]}
    },
    ...
]
"distance" is the distance in yards between the centers of "feature_1" and "feature_2", which are features from the Physical Features section.

# Instructions for Generating Plan
Use all 3 text sections. Keep the plan consistent with the given distances and centers for quantitative analysis, and use the image for qualitative analysis.

# Strategy for Generating Plan
For the first shot, look at the distance from the tee to the middle of the fairway. For the second shot, look at the distance from the middle of the fairway to the middle of the green. Keep shots away from obstacles by more than the range covered by the level error. Split distances into several shots when that is more realistic, or combine shots when reasonable.

Respond using JSON only. Don't respond with anything outside of the JSON."#;

/// The `response_format` payload sent with the planner request.
pub fn response_format() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": RESPONSE_SCHEMA_NAME,
            "schema": {
                "type": "object",
                "properties": {
                    "strategy": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["club", "distance hit", "estimated location", "distance_from_hole"],
                            "properties": {
                                "club": {"type": "string", "description": "The club used for the shot."},
                                "distance hit": {"type": "number", "description": "The distance the ball was hit with the club."},
                                "distance_from_hole": {"type": "number", "description": "Distance from the hole where the shot is estimated to land."},
                                "estimated location": {"type": "string", "description": "The estimated location along the hole where the ball should land."}
                            },
                            "additionalProperties": false
                        },
                        "description": "List of strategies with clubs and distance hit."
                    },
                    "expected_outcome": {
                        "type": "object",
                        "required": ["explanation_of_strategy", "stroke_count", "fairway_shape", "location_of_all_obstacles"],
                        "properties": {
                            "stroke_count": {"type": "number", "description": "Expected number of strokes to complete the hole."},
                            "fairway_shape": {"type": "string", "description": "Shape and size of the fairway, including curves or splits."},
                            "explanation_of_strategy": {"type": "string", "description": "A detailed explanation of the chosen strategy."},
                            "location_of_all_obstacles": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "required": ["obstacle_type", "distance_from_tee", "left_right_or_center_from_fairway"],
                                    "properties": {
                                        "obstacle_type": {"type": "string", "description": "Type of the obstacle."},
                                        "distance_from_tee": {"type": "number", "description": "Distance of the obstacle from the tee."},
                                        "left_right_or_center_from_fairway": {
                                            "enum": ["left", "right", "center"],
                                            "type": "string",
                                            "description": "Position of the obstacle relative to the fairway."
                                        }
                                    },
                                    "additionalProperties": false
                                },
                                "description": "List of obstacles and their locations."
                            }
                        },
                        "description": "The expected outcome of the strategy.",
                        "additionalProperties": false
                    }
                },
                "required": ["expected_outcome", "strategy"],
                "additionalProperties": false
            }
        }
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Shot {
    pub club: String,
    #[serde(rename = "distance hit")]
    pub distance_hit: f64,
    #[serde(rename = "estimated location")]
    pub estimated_location: String,
    pub distance_from_hole: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleSide {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObstacleLocation {
    pub obstacle_type: String,
    pub distance_from_tee: f64,
    pub left_right_or_center_from_fairway: ObstacleSide,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectedOutcome {
    pub stroke_count: f64,
    pub fairway_shape: String,
    pub explanation_of_strategy: String,
    pub location_of_all_obstacles: Vec<ObstacleLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyResponse {
    pub strategy: Vec<Shot>,
    pub expected_outcome: ExpectedOutcome,
}

impl StrategyResponse {
    pub fn parse(reply: &str) -> Result<Self> {
        serde_json::from_str(reply.trim())
            .map_err(|e| anyhow!("Malformed strategy response: {}", e))
    }

    /// Four-space indented JSON, the layout shown to the player.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Validates a planner reply and re-renders it as indented JSON for display.
pub fn format_strategy_response(reply: &str) -> Result<String> {
    StrategyResponse::parse(reply)?.to_pretty_json()
}

#[cfg(test)]
const SAMPLE_REPLY: &str = r#"{
    "strategy": [
        {"club": "driver", "distance hit": 225, "estimated location": "center of the fairway", "distance_from_hole": 160},
        {"club": "7-iron", "distance hit": 150, "estimated location": "front of the green", "distance_from_hole": 10}
    ],
    "expected_outcome": {
        "stroke_count": 4,
        "fairway_shape": "wide and straight, narrowing near the green",
        "explanation_of_strategy": "Drive past the bunker, then approach the green.",
        "location_of_all_obstacles": [
            {"obstacle_type": "bunker", "distance_from_tee": 190.5, "left_right_or_center_from_fairway": "right"}
        ]
    }
}"#;

#[test]
fn test_parse_valid_reply() -> Result<()> {
    let response = StrategyResponse::parse(SAMPLE_REPLY)?;

    assert_eq!(response.strategy.len(), 2);
    assert_eq!(response.strategy[0].club, "driver");
    assert_eq!(response.strategy[0].distance_hit, 225.0);
    assert_eq!(response.strategy[1].estimated_location, "front of the green");
    assert_eq!(response.expected_outcome.stroke_count, 4.0);

    let obstacle = &response.expected_outcome.location_of_all_obstacles[0];
    assert_eq!(obstacle.left_right_or_center_from_fairway, ObstacleSide::Right);
    assert_eq!(obstacle.distance_from_tee, 190.5);

    let pretty = format_strategy_response(SAMPLE_REPLY)?;
    assert!(pretty.contains("\n    \"strategy\": ["));
    assert!(pretty.contains("\"distance hit\": 225.0"));
    assert_eq!(StrategyResponse::parse(&pretty)?, response);
    Ok(())
}

#[test]
fn test_reject_unknown_obstacle_side() {
    let reply = SAMPLE_REPLY.replace("\"right\"", "\"middle\"");
    let err = format_strategy_response(&reply).unwrap_err().to_string();

    assert!(err.starts_with("Malformed strategy response"), "{err}");
    assert!(err.contains("middle"), "{err}");
}

#[test]
fn test_reject_missing_key() {
    let reply = SAMPLE_REPLY.replace("\"stroke_count\": 4,", "");
    let err = StrategyResponse::parse(&reply).unwrap_err().to_string();

    assert!(err.starts_with("Malformed strategy response"), "{err}");
    assert!(err.contains("stroke_count"), "{err}");

    assert!(StrategyResponse::parse("I would use a driver.").is_err());
}

#[test]
fn test_response_format_names_schema() {
    let format = response_format();
    assert_eq!(format["json_schema"]["name"], RESPONSE_SCHEMA_NAME);
    let sides = &format["json_schema"]["schema"]["properties"]["expected_outcome"]["properties"]
        ["location_of_all_obstacles"]["items"]["properties"]["left_right_or_center_from_fairway"]
        ["enum"];
    assert_eq!(sides, &json!(["left", "right", "center"]));
    assert!(SYSTEM_INSTRUCTIONS.contains("## Inter-Feature Distance"));
}
