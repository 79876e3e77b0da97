//! Mamdani fuzzy inference.
//!
//! Crisp inputs are fuzzified against piecewise-linear membership functions,
//! combined through rules written in a small text language
//! (`IF (d_L IS close) AND (d_R IS far) THEN Rotate IS high_right`) with
//! min/max operators, and turned back into crisp outputs with the centroid
//! method.

mod controller;
mod defuzz;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod parser;
mod rules;
mod terms;
mod variable;

pub use controller::FuzzyController;
pub use defuzz::centroid;
pub use dsl::{Antecedent, Clause, Operator};
pub use error::{FuzzyError, Result};
pub use inference::{FuzzyMap, InferenceEngine};
pub use inputs::Inputs;
pub use linspace::{Arange, Discretization, MAX_SAMPLES};
pub use membership::{MembershipFunction, Segment};
pub use ops::{AndOp, OrOp};
pub use outputs::Outputs;
pub use parser::{load_rules, parse_rule};
pub use rules::{Rule, RuleSet};
pub use terms::{Key, Term};
pub use variable::{LinguisticVariable, Variable, VariableDomain, VariableKey, Variables};
