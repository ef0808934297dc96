macro_rules! define_describer {
    ($($name: ident => $to: ident, )*) => {
        #[derive(Debug, Copy, Clone)]
        enum DescriberDispatcher {
            $(
                $name($to),
            )*
        }

        impl Describer for DescriberDispatcher {
            async fn describe(&self, data: &CourseAnalysis, setup: &SetupInfo) -> Option<String> {
                match self {
                    $(
                        DescriberDispatcher::$name(describer) => describer.describe(data, setup).await,
                    )*
                }
            }
        }

        impl Describer for Vec<DescriberDispatcher> {
            async fn describe(&self, data: &CourseAnalysis, setup: &SetupInfo) -> Option<String> {
                let futures = self.iter().map(|describer| describer.describe(data, setup));

                let sections = futures::future::join_all(futures)
                    .await
                    .into_iter()
                    .flatten()
                    .filter(|section| !section.trim().is_empty())
                    .collect::<Vec<_>>();

                if sections.is_empty() {
                    None
                } else {
                    Some(sections.join("\n"))
                }
            }
        }

        impl DescriberDispatcher {
            pub fn all() -> Vec<Self> {
                vec![
                    $(
                        Self::$name($to),
                    )*
                ]
            }
        }
    };
}
