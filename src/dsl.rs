use std::fmt;

/// `<variable> IS <label>`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Clause {
    pub variable: String,
    pub label: String,
}

impl Clause {
    pub fn new(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            label: label.into(),
        }
    }

    /// The key this clause has in a fuzzy map.
    pub fn key(&self) -> (&str, &str) {
        (&self.variable, &self.label)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IS {}", self.variable, self.label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::And => "AND",
            Self::Or => "OR",
        })
    }
}

/// The condition of a rule: one clause, or two joined by an operator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Antecedent {
    Is(Clause),
    Binary(Clause, Operator, Clause),
}

impl Antecedent {
    pub fn and(lhs: Clause, rhs: Clause) -> Self {
        Self::Binary(lhs, Operator::And, rhs)
    }

    pub fn or(lhs: Clause, rhs: Clause) -> Self {
        Self::Binary(lhs, Operator::Or, rhs)
    }

    pub fn clauses(&self) -> Vec<&Clause> {
        match self {
            Self::Is(clause) => vec![clause],
            Self::Binary(lhs, _, rhs) => vec![lhs, rhs],
        }
    }
}

impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Is(clause) => write!(f, "({clause})"),
            Self::Binary(lhs, op, rhs) => write!(f, "({lhs}) {op} ({rhs})"),
        }
    }
}
