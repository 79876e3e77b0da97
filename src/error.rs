use thiserror::Error;

pub type Result<T> = std::result::Result<T, FuzzyError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    /// A rule line does not match the rule grammar. Loading stops at the first one.
    #[error("invalid rule on line {line_number} ({reason}): {line}")]
    RuleSyntax {
        line_number: usize,
        line: String,
        reason: String,
    },

    /// A rule refers to a label its variable does not have, or the fuzzified
    /// inputs carry no degree for it.
    #[error("unknown label `{label}` for variable `{variable}`")]
    UnknownLabel { variable: String, label: String },

    #[error("unknown variable `{name}`")]
    UnknownVariable { name: String },

    #[error("variable `{name}` is configured more than once")]
    DuplicateVariable { name: String },

    #[error("no value supplied for input variable `{name}`")]
    MissingInput { name: String },

    #[error("invalid discretization: min={min}, max={max}, step={step}")]
    InvalidDiscretization { min: f64, max: f64, step: f64 },
}
