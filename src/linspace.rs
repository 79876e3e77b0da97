use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};

/// Upper bound on the number of samples a [`Discretization`] may produce.
pub const MAX_SAMPLES: usize = 1 << 24;

/// Sampling of the half-open range `[min, max)` at a fixed step, used when
/// defuzzifying an output variable.
///
/// Valid discretizations have finite bounds, `min < max`, `step > 0` and at
/// most [`MAX_SAMPLES`] samples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Discretization {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Discretization {
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        let this = Self { min, max, step };

        this.validate()?;

        Ok(this)
    }

    pub fn validate(&self) -> Result<()> {
        let Self { min, max, step } = *self;

        let bounded = min.is_finite() && max.is_finite() && step.is_finite() && min < max && step > 0.;

        if bounded && sample_count(min, max, step).is_some_and(|count| count <= MAX_SAMPLES) {
            Ok(())
        } else {
            Err(FuzzyError::InvalidDiscretization { min, max, step })
        }
    }

    pub fn samples(&self) -> Arange {
        Arange::new(self.min, self.max, self.step)
    }
}

/// `None` when the span overflows or the count does not fit a `usize`.
fn sample_count(start: f64, end: f64, step: f64) -> Option<usize> {
    let count = ((end - start) / step).ceil();

    (count.is_finite() && count < usize::MAX as f64).then_some(count as usize)
}

/// Iterator over `start, start + step, ...` strictly below `end`.
///
/// Empty when the number of samples is not representable.
pub struct Arange {
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Arange {
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        let len = if step > 0. && end > start {
            sample_count(start, end, step).unwrap_or(0)
        } else {
            0
        };

        Arange {
            start,
            end,
            step,
            index: 0,
            len,
        }
    }
}

impl Iterator for Arange {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }

        // Multiplying instead of accumulating keeps rounding error from building up
        let value = self.start + self.step * self.index as f64;
        self.index += 1;

        if value < self.end {
            Some(value)
        } else {
            self.index = self.len;
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.len - self.index))
    }
}

#[test]
fn test_arange() {
    let values: Vec<_> = Arange::new(-2., 2., 1.).collect();
    assert_eq!(values, vec![-2., -1., 0., 1.]);

    let values: Vec<_> = Arange::new(0., 1., 0.3).collect();
    assert_eq!(values.len(), 4);
    assert!((values[3] - 0.9).abs() < 1e-12);

    assert_eq!(Arange::new(0., 100., 0.01).count(), 10_000);
    assert_eq!(Arange::new(-50., 50., 1.).count(), 100);
    assert_eq!(Arange::new(1., 1., 0.5).count(), 0);
    assert_eq!(Arange::new(0., 1., -0.5).count(), 0);
}

#[test]
fn test_discretization_validation() {
    assert!(Discretization::new(-50., 50., 1.).is_ok());

    for (min, max, step) in [(0., 0., 1.), (5., 0., 1.), (0., 1., 0.), (0., 1., -1.), (0., f64::INFINITY, 1.), (f64::NAN, 1., 0.1)] {
        assert!(matches!(
            Discretization::new(min, max, step),
            Err(FuzzyError::InvalidDiscretization { .. })
        ));
    }
}

#[test]
fn test_discretization_sample_count_is_bounded() {
    // The span overflows to infinity
    assert_eq!(
        Discretization::new(-1e308, 1e308, 1.),
        Err(FuzzyError::InvalidDiscretization {
            min: -1e308,
            max: 1e308,
            step: 1.
        })
    );
    // Finite, but far too many samples
    assert!(Discretization::new(0., 1e12, 1e-6).is_err());
    assert!(Discretization::new(0., MAX_SAMPLES as f64 + 1., 1.).is_err());
    assert!(Discretization::new(0., MAX_SAMPLES as f64, 1.).is_ok());

    // Unvalidated ranges still terminate
    assert_eq!(Arange::new(-1e308, 1e308, 1.).size_hint(), (0, Some(0)));
    assert_eq!(Arange::new(0., f64::INFINITY, 1.).count(), 0);
    assert_eq!(Arange::new(0., 1., f64::MIN_POSITIVE).count(), 0);
}

#[test]
fn test_discretization_from_json() {
    let range: Discretization = serde_json::from_str(r#"{"min": 0, "max": 100, "step": 0.01}"#).unwrap();

    assert_eq!(range, Discretization::new(0., 100., 0.01).unwrap());
    assert_eq!(range.samples().next(), Some(0.));
}
