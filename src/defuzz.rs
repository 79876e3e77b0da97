use tracing::{trace, warn};

use crate::inference::FuzzyMap;
use crate::linspace::Discretization;
use crate::variable::LinguisticVariable;

/// Center of gravity of the clipped output shape of `variable`.
///
/// Each label's membership function is clipped at that label's activation
/// (labels without an entry in `activations` count as zero), the clipped
/// shapes are merged by maximum, and the merged shape's weighted mean is
/// taken over the samples of `range`. Returns zero when the merged shape has
/// no weight at any sample, or when `range` fails
/// [`Discretization::validate`].
pub fn centroid<D>(activations: &FuzzyMap<'_>, variable: &str, domain: &D, range: &Discretization) -> f64
where
    D: LinguisticVariable + ?Sized,
{
    if let Err(err) = range.validate() {
        warn!(variable, %err, "refusing to sample discretization");
        return 0.;
    }

    let ceilings: Vec<f64> = domain
        .labels()
        .into_iter()
        .map(|label| activations.get(&(variable, label)).copied().unwrap_or(0.))
        .collect();

    let mut num = 0.;
    let mut den = 0.;

    for v in range.samples() {
        let clipped = domain
            .degrees(v)
            .into_iter()
            .zip(&ceilings)
            .map(|((_, degree), &ceiling)| f64::min(degree, ceiling))
            .fold(0., f64::max);

        num += v * clipped;
        den += clipped;
    }

    if den == 0. {
        trace!(variable, "no activation, centroid falls back to zero");
        return 0.;
    }

    num / den
}
