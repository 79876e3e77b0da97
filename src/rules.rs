use std::fmt;
use std::str::FromStr;

use crate::dsl::{Antecedent, Clause};
use crate::error::FuzzyError;
use crate::parser;

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub antecedent: Antecedent,
    /// Never empty. Every clause receives the rule's activation.
    pub consequent: Vec<Clause>,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {} THEN", self.antecedent)?;

        for clause in &self.consequent {
            write!(f, " {clause}")?;
        }

        Ok(())
    }
}

impl FromStr for Rule {
    type Err = FuzzyError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parser::parse_rule(line)
    }
}

/// Rules in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet(pub(crate) Vec<Rule>);

impl RuleSet {
    pub fn new() -> Self {
        RuleSet(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        RuleSet(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, rule: Rule) {
        self.0.push(rule);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for RuleSet {
    type Err = FuzzyError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parser::load_rules(text)
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        RuleSet(iter.into_iter().collect())
    }
}

impl<'r> IntoIterator for &'r RuleSet {
    type Item = &'r Rule;
    type IntoIter = std::slice::Iter<'r, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[test]
fn test_rule_display_reparses() {
    let rule = Rule {
        antecedent: Antecedent::or(Clause::new("d_L", "close"), Clause::new("d_R", "far")),
        consequent: vec![Clause::new("Rotate", "high_right"), Clause::new("gas", "low")],
    };
    let text = rule.to_string();

    assert_eq!(text, "IF (d_L IS close) OR (d_R IS far) THEN Rotate IS high_right gas IS low");
    assert_eq!(text.parse::<Rule>(), Ok(rule));
}
