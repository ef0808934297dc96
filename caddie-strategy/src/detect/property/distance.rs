use crate::detect::group::FeatureGroup;
use crate::detect::property::feature::{FeatureType, FeatureView, MatchedFeature};
use crate::detect::DISTANCE_DECIMALS;
use caddie_geometry::round_to;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Directed pairs of feature types the strategy planner needs distances for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FeatureRelation {
    FairwayBunker,
    FairwayGreen,
    TeeFairway,
    TeeBunker,
}

impl FeatureRelation {
    /// Output order of the distance table.
    pub const ALL: [FeatureRelation; 4] = [
        FeatureRelation::FairwayBunker,
        FeatureRelation::FairwayGreen,
        FeatureRelation::TeeFairway,
        FeatureRelation::TeeBunker,
    ];

    pub fn feature_types(&self) -> (FeatureType, FeatureType) {
        match self {
            FeatureRelation::FairwayBunker => (FeatureType::Fairway, FeatureType::Bunker),
            FeatureRelation::FairwayGreen => (FeatureType::Fairway, FeatureType::Green),
            FeatureRelation::TeeFairway => (FeatureType::Tee, FeatureType::Fairway),
            FeatureRelation::TeeBunker => (FeatureType::Tee, FeatureType::Bunker),
        }
    }
}

impl Display for FeatureRelation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (first, second) = self.feature_types();
        write!(f, "{}-{}", first, second)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRecord {
    /// Yards between the two feature centers, rounded to two decimals.
    pub distance: f64,
    pub feature_1: MatchedFeature,
    pub feature_2: MatchedFeature,
}

impl DistanceRecord {
    pub fn between(feature_1: &MatchedFeature, feature_2: &MatchedFeature) -> Self {
        let distance = feature_1
            .feature_center
            .distance_to(&feature_2.feature_center);
        Self {
            distance: round_to(distance, DISTANCE_DECIMALS),
            feature_1: feature_1.clone(),
            feature_2: feature_2.clone(),
        }
    }

    pub fn view(&self) -> DistanceView<'_> {
        DistanceView {
            distance: self.distance,
            feature_1: self.feature_1.view(),
            feature_2: self.feature_2.view(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceView<'a> {
    pub distance: f64,
    pub feature_1: FeatureView<'a>,
    pub feature_2: FeatureView<'a>,
}

/// Pairwise distances, one bucket per [`FeatureRelation`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceTable {
    pub fairway_bunker: Vec<DistanceRecord>,
    pub fairway_green: Vec<DistanceRecord>,
    pub tee_fairway: Vec<DistanceRecord>,
    pub tee_bunker: Vec<DistanceRecord>,
}

impl DistanceTable {
    /// Computes the full cross product of each relation's two groups.
    /// Missing groups simply produce empty buckets.
    pub fn analyze_distances(groups: &FeatureGroup) -> Self {
        let mut table = DistanceTable::default();
        for relation in FeatureRelation::ALL {
            *table.bucket_mut(relation) = cross_distances(groups, relation);
        }
        table
    }

    pub fn bucket(&self, relation: FeatureRelation) -> &[DistanceRecord] {
        match relation {
            FeatureRelation::FairwayBunker => &self.fairway_bunker,
            FeatureRelation::FairwayGreen => &self.fairway_green,
            FeatureRelation::TeeFairway => &self.tee_fairway,
            FeatureRelation::TeeBunker => &self.tee_bunker,
        }
    }

    fn bucket_mut(&mut self, relation: FeatureRelation) -> &mut Vec<DistanceRecord> {
        match relation {
            FeatureRelation::FairwayBunker => &mut self.fairway_bunker,
            FeatureRelation::FairwayGreen => &mut self.fairway_green,
            FeatureRelation::TeeFairway => &mut self.tee_fairway,
            FeatureRelation::TeeBunker => &mut self.tee_bunker,
        }
    }

    /// All records: fairway-bunker, fairway-green, tee-fairway, tee-bunker.
    pub fn iter(&self) -> impl Iterator<Item = &DistanceRecord> {
        FeatureRelation::ALL
            .into_iter()
            .flat_map(move |relation| self.bucket(relation).iter())
    }

    pub fn len(&self) -> usize {
        FeatureRelation::ALL
            .iter()
            .map(|relation| self.bucket(*relation).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn cross_distances(groups: &FeatureGroup, relation: FeatureRelation) -> Vec<DistanceRecord> {
    let (first, second) = relation.feature_types();
    let lefts = groups.of_type(first);
    let rights = groups.of_type(second);

    let mut records = Vec::with_capacity(lefts.len() * rights.len());
    for left in lefts {
        for right in rights {
            records.push(DistanceRecord::between(left, right));
        }
    }
    records
}

pub fn analyze_distances(groups: &FeatureGroup) -> DistanceTable {
    DistanceTable::analyze_distances(groups)
}

#[cfg(test)]
fn feature_at(feature_type: FeatureType, x: f64, y: f64) -> MatchedFeature {
    use caddie_geometry::{BoundingBox, Point};
    MatchedFeature {
        feature_type,
        feature_center: Point::new(x, y),
        bounding_box: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        tee_color: None,
    }
}

#[test]
fn test_three_four_five() {
    let features = vec![
        feature_at(FeatureType::Fairway, 0.0, 0.0),
        feature_at(FeatureType::Bunker, 3.0, 4.0),
    ];
    let table = analyze_distances(&FeatureGroup::group_by_type(&features));

    assert_eq!(table.len(), 1);
    assert_eq!(table.fairway_bunker.len(), 1);
    let record = &table.fairway_bunker[0];
    assert_eq!(record.distance, 5.0);
    assert_eq!(record.feature_1.feature_type, FeatureType::Fairway);
    assert_eq!(record.feature_2.feature_type, FeatureType::Bunker);
}

#[test]
fn test_distance_symmetry() {
    // Asymmetric offsets so a swapped dx/dy would show.
    let a = feature_at(FeatureType::Fairway, 1.5, -2.0);
    let b = feature_at(FeatureType::Bunker, 10.0, 30.25);

    let forward = DistanceRecord::between(&a, &b).distance;
    let backward = DistanceRecord::between(&b, &a).distance;
    assert_eq!(forward, backward);

    let expected = round_to(((10.0f64 - 1.5).powi(2) + (30.25f64 + 2.0).powi(2)).sqrt(), 2);
    assert_eq!(forward, expected);
}

#[test]
fn test_empty_groups_give_no_records() {
    let table = analyze_distances(&FeatureGroup::default());
    assert!(table.is_empty());

    let only_greens = vec![feature_at(FeatureType::Green, 1.0, 1.0)];
    let table = analyze_distances(&FeatureGroup::group_by_type(&only_greens));
    assert!(table.is_empty());
}

#[test]
fn test_buckets_and_order() {
    let features = vec![
        feature_at(FeatureType::Tee, 0.0, 0.0),
        feature_at(FeatureType::Fairway, 0.0, 100.0),
        feature_at(FeatureType::Fairway, 0.0, 200.0),
        feature_at(FeatureType::Bunker, 10.0, 100.0),
        feature_at(FeatureType::Green, 0.0, 300.0),
    ];
    let table = analyze_distances(&FeatureGroup::group_by_type(&features));

    assert_eq!(table.fairway_bunker.len(), 2);
    assert_eq!(table.fairway_green.len(), 2);
    assert_eq!(table.tee_fairway.len(), 2);
    assert_eq!(table.tee_bunker.len(), 1);

    // tee-fairway records live in their own bucket
    assert!(table
        .fairway_green
        .iter()
        .all(|r| r.feature_2.feature_type == FeatureType::Green));
    assert_eq!(table.tee_fairway[0].distance, 100.0);
    assert_eq!(table.tee_fairway[1].distance, 200.0);

    let kinds: Vec<(FeatureType, FeatureType)> = table
        .iter()
        .map(|r| (r.feature_1.feature_type, r.feature_2.feature_type))
        .collect();
    let expected: Vec<(FeatureType, FeatureType)> = FeatureRelation::ALL
        .iter()
        .flat_map(|relation| {
            std::iter::repeat(relation.feature_types()).take(table.bucket(*relation).len())
        })
        .collect();
    assert_eq!(kinds, expected);
    assert_eq!(FeatureRelation::TeeFairway.to_string(), "tee-fairway");
}
