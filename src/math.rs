use num::Float;

/// Linear interpolation over the half-open range `[x0, x1)`.
///
/// Returns `None` when `x` is outside the range, which includes inverted and
/// empty ranges. A flat segment ending at `+inf` also holds at `x = +inf`.
pub(crate) fn interp_segment<F: Float>(x: F, (x0, x1): (F, F), (y0, y1): (F, F)) -> Option<F> {
    if y0 == y1 && x1 == F::infinity() && x0 < x1 && x == x1 {
        return Some(y0);
    }

    if !(x0 <= x && x < x1) {
        return None;
    }

    // Flat segments may be open-ended (x1 = inf), keep them away from inf / inf
    if y0 == y1 {
        return Some(y0);
    }

    Some(y0 + (x - x0) * (y1 - y0) / (x1 - x0))
}

#[test]
fn test_interp_segment() {
    assert_eq!(interp_segment(0., (0., 50.), (1., 0.)), Some(1.));
    assert_eq!(interp_segment(25., (0., 50.), (1., 0.)), Some(0.5));
    assert_eq!(interp_segment(50., (0., 50.), (1., 0.)), None);
    assert_eq!(interp_segment(-0.1, (0., 50.), (1., 0.)), None);

    // Inverted and empty ranges never match
    assert_eq!(interp_segment(20., (50., 1.), (0., 1.)), None);
    assert_eq!(interp_segment(5., (5., 5.), (0., 1.)), None);

    assert_eq!(interp_segment(1e12, (200., f64::INFINITY), (1., 1.)), Some(1.));
    assert_eq!(interp_segment(f64::INFINITY, (200., f64::INFINITY), (1., 1.)), Some(1.));
    assert_eq!(interp_segment(f64::NEG_INFINITY, (f64::NEG_INFINITY, 0.), (1., 1.)), Some(1.));
    // Only open shoulders reach infinity
    assert_eq!(interp_segment(f64::INFINITY, (200., 300.), (1., 1.)), None);
    assert_eq!(interp_segment(f64::INFINITY, (200., f64::INFINITY), (0., 1.)), None);
    assert_eq!(interp_segment(f64::INFINITY, (f64::INFINITY, f64::INFINITY), (1., 1.)), None);
    assert_eq!(interp_segment(f64::NAN, (0., 1.), (0., 1.)), None);
    assert_eq!(interp_segment(0.5f32, (0., 1.), (0., 1.)), Some(0.5f32));
}
