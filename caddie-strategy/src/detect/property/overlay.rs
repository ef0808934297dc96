use crate::detect::property::feature::{FeatureType, MatchedFeature};

/// Integer drawing primitives for one matched feature. The box is mapped back
/// from scaled space by dividing by the scale factor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayMark {
    pub label: FeatureType,
    pub rect: (i32, i32, i32, i32),
    pub center: (i32, i32),
}

impl MatchedFeature {
    pub fn overlay(&self, scale: f64) -> OverlayMark {
        let (u0, v0, u1, v1) = self.bounding_box.as_tuple();
        let unscale = |value: f64| (value / scale) as i32;

        OverlayMark {
            label: self.feature_type,
            rect: (unscale(u0), unscale(v0), unscale(u1), unscale(v1)),
            center: (self.feature_center.x as i32, self.feature_center.y as i32),
        }
    }
}

#[test]
fn test_overlay_unscales_box() {
    use caddie_geometry::{BoundingBox, Point};

    let feature = MatchedFeature {
        feature_type: FeatureType::Green,
        feature_center: Point::new(8.6, 8.2),
        bounding_box: BoundingBox::new(4.0, 4.0, 12.0, 13.0),
        tee_color: None,
    };
    let mark = feature.overlay(2.0);

    assert_eq!(mark.label, FeatureType::Green);
    assert_eq!(mark.rect, (2, 2, 6, 6));
    assert_eq!(mark.center, (8, 8));
}
