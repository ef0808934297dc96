use crate::course::SetupInfo;
use crate::detect::analysis::{json_section, Describer};
use crate::detect::property::analyse_result::CourseAnalysis;

#[derive(Debug, Copy, Clone)]
pub struct SetupDescriber;

impl Describer for SetupDescriber {
    async fn describe(&self, _data: &CourseAnalysis, setup: &SetupInfo) -> Option<String> {
        json_section("Setup Information", setup)
    }
}
