//! Small helpers over the `geo` kernel
//!
//! Shared planar-geometry utilities used across the generators: unit
//! normals, axis-aligned rectangle constructors, rejection sampling inside
//! a polygon, and padded bounding polygons.

use geo::{BoundingRect, Contains, LineString, Point, Polygon};
use rand::Rng;

/// Unit normal of the segment `a -> b`, or `None` for a degenerate segment.
///
/// The normal is the left-hand perpendicular of the segment direction.
pub fn unit_normal(a: Point<f64>, b: Point<f64>) -> Option<(f64, f64)> {
    let dx = b.x() - a.x();
    let dy = b.y() - a.y();
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return None;
    }
    Some((-dy / length, dx / length))
}

/// Axis-aligned rectangle centered at `(cx, cy)`.
pub fn rect_polygon(cx: f64, cy: f64, w: f64, h: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (cx - w / 2.0, cy - h / 2.0),
            (cx + w / 2.0, cy - h / 2.0),
            (cx + w / 2.0, cy + h / 2.0),
            (cx - w / 2.0, cy + h / 2.0),
        ]),
        vec![],
    )
}

/// Axis-aligned square with its lower-left corner at `(x, y)`.
pub fn square_polygon(x: f64, y: f64, size: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (x, y),
            (x + size, y),
            (x + size, y + size),
            (x, y + size),
        ]),
        vec![],
    )
}

/// Uniform random point inside `poly`.
///
/// Rejection sampling over the bounding box; assumes a polygon with
/// non-empty interior, and loops until a sample lands inside it.
pub fn random_point_in(poly: &Polygon<f64>, rng: &mut impl Rng) -> Point<f64> {
    let bbox = poly
        .bounding_rect()
        .expect("polygon with at least one vertex");
    loop {
        let x = rng.gen_range(bbox.min().x..=bbox.max().x);
        let y = rng.gen_range(bbox.min().y..=bbox.max().y);
        let p = Point::new(x, y);
        if poly.contains(&p) {
            return p;
        }
    }
}

/// Axis-aligned bounding polygon of `points`, expanded by `padding` on all
/// sides. Returns `None` when `points` is empty.
pub fn bounding_polygon<I>(points: I, padding: f64) -> Option<Polygon<f64>>
where
    I: IntoIterator<Item = Point<f64>>,
{
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let (mut min_x, mut min_y) = (first.x(), first.y());
    let (mut max_x, mut max_y) = (first.x(), first.y());
    for p in iter {
        min_x = min_x.min(p.x());
        min_y = min_y.min(p.y());
        max_x = max_x.max(p.x());
        max_y = max_y.max(p.y());
    }
    Some(Polygon::new(
        LineString::from(vec![
            (min_x - padding, min_y - padding),
            (max_x + padding, min_y - padding),
            (max_x + padding, max_y + padding),
            (min_x - padding, max_y + padding),
        ]),
        vec![],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_unit_normal_is_perpendicular_and_unit_length() {
        let (nx, ny) = unit_normal(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).unwrap();
        assert!((nx * nx + ny * ny - 1.0).abs() < 1e-12);
        // segment direction is +x, so the normal has no x component
        assert!(nx.abs() < 1e-12);
        assert!((ny.abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_normal_degenerate_segment() {
        assert!(unit_normal(Point::new(3.0, 4.0), Point::new(3.0, 4.0)).is_none());
    }

    #[test]
    fn test_random_point_in_stays_inside() {
        let poly = rect_polygon(0.0, 0.0, 20.0, 10.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            let p = random_point_in(&poly, &mut rng);
            assert!(poly.contains(&p));
        }
    }

    #[test]
    fn test_bounding_polygon_padding() {
        let points = vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)];
        let poly = bounding_polygon(points, 2.0).unwrap();
        assert!(poly.contains(&Point::new(-1.0, -1.0)));
        assert!(poly.contains(&Point::new(11.0, 6.0)));
        assert!(!poly.contains(&Point::new(13.0, 0.0)));
    }

    #[test]
    fn test_bounding_polygon_empty_input() {
        assert!(bounding_polygon(std::iter::empty(), 1.0).is_none());
    }
}
