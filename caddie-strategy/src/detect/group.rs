use crate::detect::property::feature::{FeatureType, MatchedFeature};
use hashbrown::HashMap;
use std::ops::Deref;

/// Matched features bucketed by type. Each bucket keeps match order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureGroup(HashMap<FeatureType, Vec<MatchedFeature>>);

impl Deref for FeatureGroup {
    type Target = HashMap<FeatureType, Vec<MatchedFeature>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FeatureGroup {
    pub fn group_by_type(features: &[MatchedFeature]) -> Self {
        let mut groups: HashMap<FeatureType, Vec<MatchedFeature>> = HashMap::new();
        for feature in features {
            groups
                .entry(feature.feature_type)
                .or_default()
                .push(feature.clone());
        }
        FeatureGroup(groups)
    }

    /// Features of one type, empty when none were matched.
    pub fn of_type(&self, feature_type: FeatureType) -> &[MatchedFeature] {
        self.0
            .get(&feature_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
fn feature(feature_type: FeatureType, x: f64) -> MatchedFeature {
    use caddie_geometry::{BoundingBox, Point};
    MatchedFeature {
        feature_type,
        feature_center: Point::new(x, 0.0),
        bounding_box: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        tee_color: None,
    }
}

#[test]
fn test_group_preserves_order_and_count() {
    let features = vec![
        feature(FeatureType::Bunker, 1.0),
        feature(FeatureType::Fairway, 2.0),
        feature(FeatureType::Bunker, 3.0),
        feature(FeatureType::Bunker, 3.0),
        feature(FeatureType::Tee, 4.0),
    ];

    let groups = FeatureGroup::group_by_type(&features);
    assert_eq!(groups.total(), features.len());
    assert_eq!(groups.len(), 3);

    let bunkers: Vec<f64> = groups
        .of_type(FeatureType::Bunker)
        .iter()
        .map(|f| f.feature_center.x)
        .collect();
    assert_eq!(bunkers, vec![1.0, 3.0, 3.0]);
    assert!(groups.of_type(FeatureType::Green).is_empty());
}

#[test]
fn test_group_empty_input() {
    let groups = FeatureGroup::group_by_type(&[]);
    assert!(groups.is_empty());
    assert_eq!(groups.total(), 0);
}
