use crate::course::SetupInfo;
use crate::detect::analysis::{json_section, Describer};
use crate::detect::property::analyse_result::CourseAnalysis;

#[derive(Debug, Copy, Clone)]
pub struct PhysicalFeatureDescriber;

impl Describer for PhysicalFeatureDescriber {
    async fn describe(&self, data: &CourseAnalysis, _setup: &SetupInfo) -> Option<String> {
        let features = data
            .features
            .iter()
            .map(|feature| feature.view())
            .collect::<Vec<_>>();
        json_section("Physical Features", &features)
    }
}
