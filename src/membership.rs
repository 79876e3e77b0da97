use serde::{Deserialize, Serialize};

use crate::math::interp_segment;

/// One linear piece of a membership function.
///
/// Covers the half-open input range `x.0 <= x < x.1` and rises (or falls)
/// linearly from `y.0` to `y.1` across it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Segment {
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }

    /// A segment with the same degree across its whole range.
    ///
    /// With `x.1 = f64::INFINITY` this is an open shoulder, and it keeps its
    /// degree at `x = +inf` as well.
    pub fn constant(x: (f64, f64), degree: f64) -> Self {
        Self::new(x, (degree, degree))
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        interp_segment(x, self.x, self.y).unwrap_or(0.)
    }

    fn overlaps(&self, other: &Segment) -> bool {
        let (a0, a1) = self.x;
        let (b0, b1) = other.x;

        a0 < a1 && b0 < b1 && a0 < b1 && b0 < a1
    }
}

/// A piecewise-linear membership function.
///
/// The degree at `x` is the sum of every segment's value at `x`. Segments
/// are expected not to overlap; when they do, their values add up and the
/// degree can exceed one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipFunction {
    segments: Vec<Segment>,
}

impl MembershipFunction {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Builds a polyline through `points`, one segment per consecutive pair.
    ///
    /// Like every segment, the last one excludes its right end, so the final
    /// point's degree is only reached in the limit.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let segments = points
            .windows(2)
            .map(|pair| Segment::new((pair[0].0, pair[1].0), (pair[0].1, pair[1].1)))
            .collect();

        Self { segments }
    }

    /// Zero at `left`, one at `peak`, back to zero at `right`.
    pub fn triangle(left: f64, peak: f64, right: f64) -> Self {
        Self::from_points(&[(left, 0.), (peak, 1.), (right, 0.)])
    }

    /// Appends a segment, builder style.
    pub fn segment(mut self, x: (f64, f64), y: (f64, f64)) -> Self {
        self.segments.push(Segment::new(x, y));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.segments.iter().map(|segment| segment.evaluate(x)).sum()
    }

    /// Whether any two segments share part of their input range.
    pub fn overlaps(&self) -> bool {
        self.segments
            .iter()
            .enumerate()
            .any(|(i, a)| self.segments[i + 1..].iter().any(|b| a.overlaps(b)))
    }
}

#[test]
fn test_close_r() {
    let close_r = MembershipFunction::new(vec![Segment::new((0., 50.), (1., 0.))]);

    assert_eq!(close_r.evaluate(0.), 1.);
    assert_eq!(close_r.evaluate(25.), 0.5);
    assert_eq!(close_r.evaluate(50.), 0.);
    assert_eq!(close_r.evaluate(-1.), 0.);
    assert_eq!(close_r.evaluate(1e9), 0.);
}

#[test]
fn test_segment_boundaries() {
    let moderate = MembershipFunction::new(vec![]).segment((35., 50.), (0., 1.)).segment((50., 65.), (1., 0.));

    // Left edge of a segment evaluates to y0
    assert_eq!(moderate.evaluate(35.), 0.);
    assert_eq!(moderate.evaluate(50.), 1.);
    // Approaching x1 from below tends to y1
    assert!((moderate.evaluate(49.999_999) - 1.).abs() < 1e-6);
    assert!(moderate.evaluate(64.999_999) < 1e-6);
    assert_eq!(moderate.evaluate(65.), 0.);
    assert!(!moderate.overlaps());
}

#[test]
fn test_overlapping_segments_sum() {
    let shape = MembershipFunction::new(vec![
        Segment::constant((0., 10.), 0.75),
        Segment::constant((5., 15.), 0.75),
    ]);

    assert!(shape.overlaps());
    assert_eq!(shape.evaluate(2.), 0.75);
    assert_eq!(shape.evaluate(7.), 1.5);
    assert_eq!(shape.evaluate(12.), 0.75);
}

#[test]
fn test_inverted_range_is_zero() {
    let far = MembershipFunction::new(vec![Segment::new((50., 1.), (0., 1.))]);

    for x in [0., 1., 25., 50., 75.] {
        assert_eq!(far.evaluate(x), 0.);
    }
    assert!(!far.overlaps());
}

#[test]
fn test_triangle_and_open_shoulder() {
    let mid = MembershipFunction::triangle(-10., 0., 10.);

    assert_eq!(mid.segments().len(), 2);
    assert_eq!(mid.evaluate(-10.), 0.);
    assert_eq!(mid.evaluate(0.), 1.);
    assert_eq!(mid.evaluate(5.), 0.5);
    assert_eq!(mid.evaluate(10.), 0.);

    let far = MembershipFunction::from_points(&[(90., 0.), (200., 1.)])
        .segment((200., f64::INFINITY), (1., 1.));

    assert_eq!(far.evaluate(200.), 1.);
    assert_eq!(far.evaluate(1e15), 1.);
    assert_eq!(far.evaluate(145.), 0.5);
    assert_eq!(far.evaluate(f64::INFINITY), 1.);

    let shoulder = MembershipFunction::new(vec![Segment::constant((200., f64::INFINITY), 1.)]);
    assert_eq!(shoulder.evaluate(f64::INFINITY), 1.);
    assert_eq!(shoulder.evaluate(f64::NAN), 0.);
}

#[test]
fn test_membership_from_json() {
    let json = r#"[{"x": [-20, -10], "y": [0, 1]}, {"x": [-10, 0], "y": [1, 0]}]"#;
    let low_right: MembershipFunction = serde_json::from_str(json).unwrap();

    assert_eq!(low_right, MembershipFunction::triangle(-20., -10., 0.));
    assert_eq!(low_right.evaluate(-15.), 0.5);

    let back = serde_json::to_value(&low_right).unwrap();
    assert_eq!(back[0]["x"][1], -10.);
}
