use std::collections::HashMap;

use tracing::trace;

use crate::dsl::{Antecedent, Clause, Operator};
use crate::error::{FuzzyError, Result};
use crate::ops::{AndOp, OrOp};
use crate::rules::RuleSet;

/// Degrees keyed by `(variable, label)`.
///
/// Labels are namespaced by their variable, so two variables may share label
/// names without their degrees colliding.
pub type FuzzyMap<'a> = HashMap<(&'a str, &'a str), f64>;

/// Min/max rule evaluation with max aggregation across rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InferenceEngine {
    and_op: AndOp,
    or_op: OrOp,
}

impl InferenceEngine {
    pub fn new(and_op: AndOp, or_op: OrOp) -> Self {
        Self { and_op, or_op }
    }

    /// Min for `AND`, max for `OR`.
    pub fn mamdani() -> Self {
        Self::default()
    }

    fn degree(&self, facts: &FuzzyMap<'_>, clause: &Clause) -> Result<f64> {
        facts
            .get(&clause.key())
            .copied()
            .ok_or_else(|| FuzzyError::UnknownLabel {
                variable: clause.variable.clone(),
                label: clause.label.clone(),
            })
    }

    /// How strongly `antecedent` holds given the fuzzified inputs.
    pub fn activation(&self, facts: &FuzzyMap<'_>, antecedent: &Antecedent) -> Result<f64> {
        match antecedent {
            Antecedent::Is(clause) => self.degree(facts, clause),
            Antecedent::Binary(lhs, op, rhs) => {
                let u = self.degree(facts, lhs)?;
                let v = self.degree(facts, rhs)?;

                Ok(match op {
                    Operator::And => self.and_op.call(u, v),
                    Operator::Or => self.or_op.call(u, v),
                })
            },
        }
    }

    /// Fires every rule and aggregates the activations of its consequent
    /// clauses by maximum.
    ///
    /// Only clauses named in some consequent get an entry in the result.
    pub fn evaluate<'r>(&self, facts: &FuzzyMap<'_>, rules: &'r RuleSet) -> Result<FuzzyMap<'r>> {
        let mut output = FuzzyMap::new();

        for rule in rules {
            let activation = self.activation(facts, &rule.antecedent)?;

            trace!(%rule, activation, "rule fired");

            for clause in &rule.consequent {
                let degree = output.entry(clause.key()).or_insert(0.);
                *degree = f64::max(*degree, activation);
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
fn rules(text: &str) -> RuleSet {
    crate::parser::load_rules(text).unwrap()
}

#[test]
fn test_and_or_activation() {
    let facts = FuzzyMap::from([(("x", "a"), 0.3), (("x", "b"), 0.8)]);
    let engine = InferenceEngine::mamdani();

    let and = rules("IF (x IS a) AND (x IS b) THEN y IS z");
    assert_eq!(engine.evaluate(&facts, &and).unwrap(), FuzzyMap::from([(("y", "z"), 0.3)]));

    let or = rules("IF (x IS a) OR (x IS b) THEN y IS z");
    assert_eq!(engine.evaluate(&facts, &or).unwrap(), FuzzyMap::from([(("y", "z"), 0.8)]));

    let single = rules("IF (x IS b) THEN y IS z");
    assert_eq!(engine.evaluate(&facts, &single).unwrap()[&("y", "z")], 0.8);
}

#[test]
fn test_aggregation_takes_max() {
    let facts = FuzzyMap::from([(("d", "close"), 0.6), (("d", "far"), 0.2), (("d", "mid"), 0.)]);
    let rule_set = rules(
        "IF (d IS close) THEN gas IS low\n\
         IF (d IS far) THEN gas IS low gas IS high\n\
         IF (d IS mid) THEN gas IS medium\n",
    );
    let output = InferenceEngine::mamdani().evaluate(&facts, &rule_set).unwrap();

    assert_eq!(output.len(), 3);
    assert_eq!(output[&("gas", "low")], 0.6);
    assert_eq!(output[&("gas", "high")], 0.2);
    // Rules that do not fire still leave an entry for their consequent
    assert_eq!(output[&("gas", "medium")], 0.);
}

#[test]
fn test_rule_order_does_not_matter() {
    let facts = FuzzyMap::from([(("l", "near"), 0.9), (("r", "near"), 0.4), (("r", "far"), 0.5)]);
    let forward = rules(
        "IF (l IS near) THEN steer IS right\n\
         IF (r IS near) OR (r IS far) THEN steer IS right steer IS none\n\
         IF (l IS near) AND (r IS far) THEN steer IS none\n",
    );
    let reversed: RuleSet = forward.iter().rev().cloned().collect();
    let engine = InferenceEngine::mamdani();

    assert_eq!(engine.evaluate(&facts, &forward).unwrap(), engine.evaluate(&facts, &reversed).unwrap());
}

#[test]
fn test_unknown_label() {
    let facts = FuzzyMap::from([(("x", "a"), 0.3)]);
    let rule_set = rules("IF (x IS a) AND (x IS missing) THEN y IS z");

    assert_eq!(
        InferenceEngine::mamdani().evaluate(&facts, &rule_set),
        Err(FuzzyError::UnknownLabel {
            variable: "x".into(),
            label: "missing".into()
        })
    );

    // Same label name under another variable is a different key
    let rule_set = rules("IF (w IS a) THEN y IS z");
    assert!(InferenceEngine::mamdani().evaluate(&facts, &rule_set).is_err());
}

#[test]
fn test_custom_operators() {
    let facts = FuzzyMap::from([(("x", "a"), 0.5), (("x", "b"), 0.5)]);
    let engine = InferenceEngine::new(AndOp::Prod, OrOp::ProbOr);

    let and = rules("IF (x IS a) AND (x IS b) THEN y IS z");
    assert_eq!(engine.evaluate(&facts, &and).unwrap()[&("y", "z")], 0.25);

    let or = rules("IF (x IS a) OR (x IS b) THEN y IS z");
    assert_eq!(engine.evaluate(&facts, &or).unwrap()[&("y", "z")], 0.75);
}

#[test]
fn test_no_rules() {
    let facts = FuzzyMap::new();

    assert!(InferenceEngine::mamdani().evaluate(&facts, &RuleSet::new()).unwrap().is_empty());
}
