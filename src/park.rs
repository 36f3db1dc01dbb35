//! Park generation
//!
//! Derives the park boundary polygon from two city edges and fills it with
//! lawns, paths and trees. The boundary is a pure function of its input
//! edges; the contents are random draws conditioned on the boundary.

use geo::{
    Area, BooleanOps, BoundingRect, Contains, LineString, MultiLineString, Point, Polygon,
};
use rand::Rng;

use crate::geometry::{random_point_in, rect_polygon};

/// Trees sampled into the park
const TREE_COUNT: usize = 80;
/// Lawn rectangles sampled into the park
const LAWN_COUNT: usize = 4;
/// Paths sampled into the park
const PATH_COUNT: usize = 4;

/// Lawn side bounds as fractions of the boundary bounding box
const LAWN_WIDTH_FRAC: (f64, f64) = (0.08, 0.15);
const LAWN_HEIGHT_FRAC: (f64, f64) = (0.06, 0.12);

/// Vertices per path (inclusive bounds)
const PATH_POINTS_MIN: u32 = 3;
const PATH_POINTS_MAX: u32 = 5;

/// Canonical park outline; two of its vertices anchor the similarity
/// transform that maps the rest onto the supplied city edges.
const REFERENCE_SHAPE: [(f64, f64); 8] = [
    (0.0, 0.0),
    (8.0, 1.0),
    (10.0, 4.0),
    (9.0, 8.0),
    (5.0, 10.0),
    (1.0, 9.0),
    (-1.0, 5.0),
    (-2.0, 2.0),
];

/// Anchor vertex mapped onto the first top-side point
const ANCHOR_TOP: (f64, f64) = (1.0, 9.0);
/// Anchor vertex mapped onto the last right-side point
const ANCHOR_RIGHT: (f64, f64) = (8.0, 1.0);

/// Canonical vertices synthesized through the transform to close the ring
const SYNTH_VERTICES: [(f64, f64); 3] = [(0.0, 0.0), (-2.0, 2.0), (-1.0, 5.0)];

/// A park: boundary polygon plus generated contents.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ParkLayout {
    pub boundary: Polygon<f64>,
    pub lawns: Vec<Polygon<f64>>,
    pub paths: Vec<LineString<f64>>,
    pub trees: Vec<Point<f64>>,
}

/// Derives park boundaries and populates them.
pub struct ParkGenerator;

impl ParkGenerator {
    pub fn new() -> Self {
        Self
    }

    /// The canonical park outline, unscaled.
    pub fn reference_polygon() -> Polygon<f64> {
        Polygon::new(LineString::from(REFERENCE_SHAPE.to_vec()), vec![])
    }

    /// Park boundary spanned by two city edges.
    ///
    /// The ring starts with `top_side`, continues down `right_side`, and is
    /// closed by three synthesized vertices: canonical outline vertices
    /// pushed through the similarity transform fixed by mapping the two
    /// canonical anchors onto `top_side[0]` and the last right-side point.
    /// Pure function of its inputs. The last four ring vertices, reversed,
    /// form the park's bottom side.
    pub fn polygon_from_sides(
        &self,
        right_side: &[Point<f64>],
        top_side: &[Point<f64>],
    ) -> Polygon<f64> {
        let anchor_a = top_side[0];
        let anchor_b = *right_side.last().expect("right side with at least one point");
        let transform = Similarity::from_anchors(ANCHOR_TOP, anchor_a, ANCHOR_RIGHT, anchor_b);

        let mut ring: Vec<Point<f64>> = Vec::with_capacity(top_side.len() + right_side.len() + 3);
        ring.extend_from_slice(top_side);
        ring.extend_from_slice(right_side);
        for &v in &SYNTH_VERTICES {
            ring.push(transform.apply(v));
        }
        Polygon::new(LineString::from(ring), vec![])
    }

    /// The park's bottom edge: the last four distinct ring vertices in
    /// left-to-right order. Seeds the block attached below the park.
    pub fn bottom_side(park: &Polygon<f64>) -> Vec<Point<f64>> {
        let coords = &park.exterior().0;
        // the exterior ring repeats the first coordinate at the end
        let n = coords.len();
        coords[n - 5..n - 1]
            .iter()
            .rev()
            .map(|&c| Point::from(c))
            .collect()
    }

    /// Populate `boundary` with trees, lawns and paths (drawn in that order).
    pub fn populate(&self, boundary: Polygon<f64>, rng: &mut impl Rng) -> ParkLayout {
        let trees = self.trees(&boundary, TREE_COUNT, rng);
        let lawns = self.lawns(&boundary, LAWN_COUNT, rng);
        let paths = self.paths(&boundary, PATH_COUNT, rng);
        ParkLayout {
            boundary,
            lawns,
            paths,
            trees,
        }
    }

    /// `n` uniform points inside the park.
    pub fn trees(&self, park: &Polygon<f64>, n: usize, rng: &mut impl Rng) -> Vec<Point<f64>> {
        (0..n).map(|_| random_point_in(park, rng)).collect()
    }

    /// Up to `n` lawn rectangles. A lawn fully inside the park is kept
    /// whole; one crossing the boundary is clipped to it, and empty clip
    /// results are dropped.
    pub fn lawns(&self, park: &Polygon<f64>, n: usize, rng: &mut impl Rng) -> Vec<Polygon<f64>> {
        let Some(bbox) = park.bounding_rect() else {
            return Vec::new();
        };

        let mut lawns = Vec::new();
        for _ in 0..n {
            let center = random_point_in(park, rng);
            let w = rng.gen_range(LAWN_WIDTH_FRAC.0..=LAWN_WIDTH_FRAC.1) * bbox.width();
            let h = rng.gen_range(LAWN_HEIGHT_FRAC.0..=LAWN_HEIGHT_FRAC.1) * bbox.height();
            let rect = rect_polygon(center.x(), center.y(), w, h);

            if park.contains(&rect) {
                lawns.push(rect);
            } else {
                for piece in park.intersection(&rect) {
                    if piece.unsigned_area() > 0.0 {
                        lawns.push(piece);
                    }
                }
            }
        }
        lawns
    }

    /// `n` meandering paths clipped to the park. A clip that splits a path
    /// into disjoint pieces contributes each piece separately.
    pub fn paths(&self, park: &Polygon<f64>, n: usize, rng: &mut impl Rng) -> Vec<LineString<f64>> {
        let mut paths = Vec::new();
        for _ in 0..n {
            let k = rng.gen_range(PATH_POINTS_MIN..=PATH_POINTS_MAX);
            let points: Vec<Point<f64>> =
                (0..k).map(|_| random_point_in(park, rng)).collect();
            let line = LineString::from(points);

            let clipped = park.clip(&MultiLineString::new(vec![line]), false);
            for piece in clipped.0 {
                if piece.0.len() >= 2 {
                    paths.push(piece);
                }
            }
        }
        paths
    }
}

impl Default for ParkGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotation + uniform scale + translation fixed by two point pairs.
struct Similarity {
    // complex-multiplication coefficients: T(p) = a * (p - ca) + ta
    ar: f64,
    ai: f64,
    ca: (f64, f64),
    ta: Point<f64>,
}

impl Similarity {
    fn from_anchors(ca: (f64, f64), ta: Point<f64>, cb: (f64, f64), tb: Point<f64>) -> Self {
        let (dx, dy) = (cb.0 - ca.0, cb.1 - ca.1);
        let (tx, ty) = (tb.x() - ta.x(), tb.y() - ta.y());
        let denom = dx * dx + dy * dy;
        Self {
            ar: (tx * dx + ty * dy) / denom,
            ai: (ty * dx - tx * dy) / denom,
            ca,
            ta,
        }
    }

    fn apply(&self, p: (f64, f64)) -> Point<f64> {
        let (vx, vy) = (p.0 - self.ca.0, p.1 - self.ca.1);
        Point::new(
            self.ar * vx - self.ai * vy + self.ta.x(),
            self.ai * vx + self.ar * vy + self.ta.y(),
        )
    }
}
