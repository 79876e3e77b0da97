use num::Float;

/// And operator method for combining the two propositions of a rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator method for combining the two propositions of a rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }
}

#[test]
fn test_and_ops() {
    assert_eq!(AndOp::default(), AndOp::Min);
    assert_eq!(AndOp::Min.call(0.3, 0.8), 0.3);
    assert_eq!(AndOp::Prod.call(0.5, 0.5), 0.25);
    assert_eq!(AndOp::BoundedProd.call(0.25, 0.5), 0.);
    assert_eq!(AndOp::BoundedProd.call(0.75, 0.5), 0.25);
    assert_eq!(AndOp::DrasticProd.call(0.4, 1.), 0.4);
    assert_eq!(AndOp::DrasticProd.call(1., 0.7), 0.7);
    assert_eq!(AndOp::DrasticProd.call(0.9, 0.9), 0.);
}

#[test]
fn test_or_ops() {
    assert_eq!(OrOp::default(), OrOp::Max);
    assert_eq!(OrOp::Max.call(0.3, 0.8), 0.8);
    assert_eq!(OrOp::ProbOr.call(0.5, 0.5), 0.75);
    assert_eq!(OrOp::BoundedSum.call(0.75, 0.5), 1.);
    assert_eq!(OrOp::DrasticSum.call(0.4, 0.), 0.4);
    assert_eq!(OrOp::DrasticSum.call(0.4, 0.1), 1.);
}
