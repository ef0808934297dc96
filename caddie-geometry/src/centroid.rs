use crate::error::GeometryError;
use crate::graph::Point;

pub(crate) const CENTROID_DECIMALS: i32 = 4;

/// Rounds `value` to `decimals` places after the point.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Computes the area centroid of a closed polygon using the shoelace formula.
///
/// The vertex list is closed implicitly (the last vertex connects back to the
/// first) and may be ordered clockwise or counter-clockwise. The result is
/// rounded to four decimals so that equivalent orderings agree.
pub fn compute_centroid(vertices: &[Point<f64>]) -> Result<Point<f64>, GeometryError> {
    let n = vertices.len();
    if n < 3 {
        return Err(GeometryError::DegenerateGeometry { vertices: n });
    }

    let mut doubled_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for i in 0..n {
        let p = vertices[i];
        let q = vertices[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;

        doubled_area += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }

    let area = 0.5 * doubled_area;
    if area == 0.0 {
        return Err(GeometryError::ZeroArea);
    }

    let factor = 1.0 / (6.0 * area);
    Ok(Point {
        x: round_to(cx * factor, CENTROID_DECIMALS),
        y: round_to(cy * factor, CENTROID_DECIMALS),
    })
}

#[cfg(test)]
fn points(raw: &[(f64, f64)]) -> Vec<Point<f64>> {
    raw.iter().map(|&p| Point::from(p)).collect()
}

#[test]
fn test_unit_square() {
    let square = points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    assert_eq!(compute_centroid(&square), Ok(Point::new(0.5, 0.5)));
}

#[test]
fn test_centroid_rounded_to_four_decimals() {
    let triangle = points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    assert_eq!(compute_centroid(&triangle), Ok(Point::new(0.3333, 0.3333)));

    let triangle = points(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]);
    assert_eq!(compute_centroid(&triangle), Ok(Point::new(0.6667, 0.6667)));
}

#[test]
fn test_regular_polygons_center() {
    use std::f64::consts::PI;

    for sides in [3usize, 5, 6, 8, 12] {
        let polygon: Vec<Point<f64>> = (0..sides)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / sides as f64;
                Point::new(7.0 + 3.0 * angle.cos(), -2.0 + 3.0 * angle.sin())
            })
            .collect();
        let center = compute_centroid(&polygon).unwrap();
        assert!((center.x - 7.0).abs() < 1e-4, "{sides} sides: {center:?}");
        assert!((center.y + 2.0).abs() < 1e-4, "{sides} sides: {center:?}");
    }
}

#[test]
fn test_cyclic_and_reversed_order() {
    let shape = points(&[
        (0.0, 0.0),
        (6.0, 0.0),
        (6.0, 2.0),
        (2.0, 2.0),
        (2.0, 5.0),
        (0.0, 5.0),
    ]);
    let expected = compute_centroid(&shape).unwrap();

    for shift in 1..shape.len() {
        let mut rotated = shape.clone();
        rotated.rotate_left(shift);
        assert_eq!(compute_centroid(&rotated).unwrap(), expected);
    }

    let mut reversed = shape.clone();
    reversed.reverse();
    assert_eq!(compute_centroid(&reversed).unwrap(), expected);
}

#[test]
fn test_uniform_scaling() {
    let shape = points(&[(1.0, 1.0), (5.0, 2.0), (4.0, 6.0), (0.5, 4.0)]);
    let base = compute_centroid(&shape).unwrap();

    let k = 3.0;
    let scaled: Vec<Point<f64>> = shape.iter().map(|p| p.scale(k)).collect();
    let center = compute_centroid(&scaled).unwrap();

    assert!((center.x - base.x * k).abs() < 1e-3);
    assert!((center.y - base.y * k).abs() < 1e-3);
}

#[test]
fn test_degenerate_inputs() {
    let segment = points(&[(0.0, 0.0), (1.0, 0.0)]);
    for len in 0..=2 {
        assert_eq!(
            compute_centroid(&segment[..len]),
            Err(GeometryError::DegenerateGeometry { vertices: len })
        );
    }
}

#[test]
fn test_zero_area() {
    let line = points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    assert_eq!(compute_centroid(&line), Err(GeometryError::ZeroArea));

    let repeated = points(&[(3.0, 3.0), (3.0, 3.0), (3.0, 3.0), (3.0, 3.0)]);
    assert_eq!(compute_centroid(&repeated), Err(GeometryError::ZeroArea));
}

#[test]
fn test_round_to() {
    assert_eq!(round_to(8.485281374, 2), 8.49);
    assert_eq!(round_to(1.23456, 4), 1.2346);
}
