pub mod compose;
pub mod strategy;
mod distance_describer;
mod physical_feature_describer;
mod setup_describer;
mod unmatched_describer;
#[macro_use]
mod dispatch_macro;

use crate::course::SetupInfo;
use crate::detect::analysis::distance_describer::DistanceDescriber;
use crate::detect::analysis::physical_feature_describer::PhysicalFeatureDescriber;
use crate::detect::analysis::setup_describer::SetupDescriber;
use crate::detect::analysis::unmatched_describer::UnmatchedDescriber;
use crate::detect::property::analyse_result::CourseAnalysis;
use log::error;
use serde::Serialize;

/// Trait for generating one *section* of the strategy prompt.
#[allow(async_fn_in_trait)]
pub trait Describer {
    /// Returns Some(section) if there is something to say, None otherwise.
    async fn describe(&self, data: &CourseAnalysis, setup: &SetupInfo) -> Option<String>;
}

define_describer![
    Setup => SetupDescriber,
    PhysicalFeature => PhysicalFeatureDescriber,
    Distance => DistanceDescriber,
    Unmatched => UnmatchedDescriber,
];

/// `## title` followed by the pretty JSON of `value`.
fn json_section<T: Serialize + ?Sized>(title: &str, value: &T) -> Option<String> {
    match serde_json::to_string_pretty(value) {
        Ok(json) => Some(format!("## {}\n{}", title, json)),
        Err(e) => {
            error!("Failed to serialize {} section: {}", title, e);
            None
        }
    }
}
