use crate::course::SetupInfo;
use crate::detect::analysis::{json_section, Describer};
use crate::detect::property::analyse_result::CourseAnalysis;

#[derive(Debug, Copy, Clone)]
pub struct DistanceDescriber;

impl Describer for DistanceDescriber {
    async fn describe(&self, data: &CourseAnalysis, _setup: &SetupInfo) -> Option<String> {
        let records = data
            .distances
            .iter()
            .map(|record| record.view())
            .collect::<Vec<_>>();
        json_section("Inter-Feature Distance", &records)
    }
}
