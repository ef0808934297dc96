use crate::course::SetupInfo;
use crate::detect::analysis::Describer;
use crate::detect::property::analyse_result::CourseAnalysis;
use std::fmt::Write;

/// Appends the clicks that fell outside every detected region. Silent when all matched.
#[derive(Debug, Copy, Clone)]
pub struct UnmatchedDescriber;

impl Describer for UnmatchedDescriber {
    async fn describe(&self, data: &CourseAnalysis, _setup: &SetupInfo) -> Option<String> {
        if data.unmatched.is_empty() {
            return None;
        }

        let mut description = String::from(
            "## Appendix: Unmatched Reference Points\n\
             Supplementary to the 3 input parts above, not a separate input part.\n",
        );
        for unmatched in &data.unmatched {
            let point = &unmatched.point;
            writeln!(
                description,
                "- No detected region contains the {} marked at ({}, {}); it was left out.",
                point.feature_type, point.u, point.v
            )
            .ok()?;
        }

        Some(description.trim_end().to_string())
    }
}
