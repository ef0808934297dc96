use num::Num;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point<T: Num> {
    pub x: T,
    pub y: T,
}

impl<T: Num + Copy> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn scale(self, factor: T) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl Point<f64> {
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl<T: Num> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T: Num + Copy> From<[T; 2]> for Point<T> {
    fn from(value: [T; 2]) -> Self {
        Self {
            x: value[0],
            y: value[1],
        }
    }
}

/// Axis-aligned box in pixel space. `(u0, v0)` is always the minimum corner
/// and `(u1, v1)` the maximum corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox<T: Num> {
    pub u0: T,
    pub v0: T,
    pub u1: T,
    pub v1: T,
}

fn min_of<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

fn max_of<T: PartialOrd>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

impl<T: Num + PartialOrd + Copy> BoundingBox<T> {
    /// Builds a box from two arbitrary corners, normalizing them to (min, max).
    pub fn new(u0: T, v0: T, u1: T, v1: T) -> Self {
        Self {
            u0: min_of(u0, u1),
            v0: min_of(v0, v1),
            u1: max_of(u0, u1),
            v1: max_of(v0, v1),
        }
    }

    /// Min/max extent over the given vertices, `None` for an empty slice.
    pub fn from_points(points: &[Point<T>]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            u0: first.x,
            v0: first.y,
            u1: first.x,
            v1: first.y,
        };

        Some(points[1..].iter().fold(init, |b, p| Self {
            u0: min_of(b.u0, p.x),
            v0: min_of(b.v0, p.y),
            u1: max_of(b.u1, p.x),
            v1: max_of(b.v1, p.y),
        }))
    }

    /// Inclusive containment test: points on an edge are inside.
    pub fn contains(&self, point: &Point<T>) -> bool {
        self.u0 <= point.x && point.x <= self.u1 && self.v0 <= point.y && point.y <= self.v1
    }

    pub fn width(&self) -> T {
        self.u1 - self.u0
    }

    pub fn height(&self) -> T {
        self.v1 - self.v0
    }

    pub fn area(&self) -> T {
        self.width() * self.height()
    }

    pub fn scale(self, factor: T) -> Self {
        Self::new(
            self.u0 * factor,
            self.v0 * factor,
            self.u1 * factor,
            self.v1 * factor,
        )
    }

    pub fn as_tuple(&self) -> (T, T, T, T) {
        (self.u0, self.v0, self.u1, self.v1)
    }
}

#[test]
fn test_box_contains_is_inclusive() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);

    assert!(bbox.contains(&Point::new(5.0, 5.0)));
    assert!(bbox.contains(&Point::new(0.0, 0.0)));
    assert!(bbox.contains(&Point::new(10.0, 10.0)));
    assert!(bbox.contains(&Point::new(10.0, 3.0)));
    assert!(bbox.contains(&Point::new(3.0, 0.0)));
    assert!(!bbox.contains(&Point::new(10.0001, 3.0)));
    assert!(!bbox.contains(&Point::new(-1.0, 5.0)));
}

#[test]
fn test_box_normalizes_corners() {
    let bbox = BoundingBox::new(8, 9, 2, 1);
    assert_eq!(bbox.as_tuple(), (2, 1, 8, 9));
    assert_eq!(bbox.area(), 48);
    assert!(bbox.contains(&Point::new(5, 5)));
}

#[test]
fn test_box_from_points() {
    let points = [
        Point::new(3.0, 7.0),
        Point::new(-1.0, 2.0),
        Point::new(4.5, 0.5),
        Point::new(0.0, 9.0),
    ];
    let bbox = BoundingBox::from_points(&points).unwrap();
    assert_eq!(bbox.as_tuple(), (-1.0, 0.5, 4.5, 9.0));

    assert!(BoundingBox::<f64>::from_points(&[]).is_none());
}

#[test]
fn test_box_scale() {
    let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0).scale(2.0);
    assert_eq!(bbox.as_tuple(), (2.0, 4.0, 6.0, 8.0));
    assert_eq!(bbox.area(), 16.0);
}

#[test]
fn test_point_distance() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert_eq!(a.distance_to(&b), 5.0);
    assert_eq!(b.distance_to(&a), 5.0);
}
