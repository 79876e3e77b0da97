use std::collections::HashMap;

use tracing::{debug, trace};

use crate::defuzz::centroid;
use crate::dsl::Clause;
use crate::error::{FuzzyError, Result};
use crate::inference::{FuzzyMap, InferenceEngine};
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::rules::RuleSet;
use crate::variable::{Role, VariableEntry, VariableKey, Variables};

/// A configured fuzzy controller: variables, rules and inference operators.
///
/// Immutable once built. `decide` only reads the configuration, so a single
/// controller can serve concurrent callers.
pub struct FuzzyController {
    vars: Variables,
    names: HashMap<String, VariableKey>,
    rules: RuleSet,
    engine: InferenceEngine,
}

impl FuzzyController {
    /// Checks that `rules` only mention configured variables and labels.
    ///
    /// Antecedents must name input variables, consequents output variables.
    pub fn new(vars: Variables, rules: RuleSet) -> Result<Self> {
        let mut names = HashMap::with_capacity(vars.len());

        for (key, entry) in vars.0.iter() {
            if names.insert(entry.name.clone(), key).is_some() {
                return Err(FuzzyError::DuplicateVariable {
                    name: entry.name.clone(),
                });
            }

            if let Role::Output(discretization) = entry.role {
                discretization.validate()?;
            }
        }

        let this = Self {
            vars,
            names,
            rules,
            engine: InferenceEngine::mamdani(),
        };

        for rule in &this.rules {
            for clause in rule.antecedent.clauses() {
                this.check_clause(clause, false)?;
            }

            for clause in &rule.consequent {
                this.check_clause(clause, true)?;
            }
        }

        debug!(
            inputs = this.vars.inputs().count(),
            outputs = this.vars.outputs().count(),
            rules = this.rules.len(),
            "fuzzy controller configured"
        );

        Ok(this)
    }

    pub fn with_engine(mut self, engine: InferenceEngine) -> Self {
        self.engine = engine;
        self
    }

    fn check_clause(&self, clause: &Clause, output: bool) -> Result<()> {
        let entry = self
            .entry(&clause.variable)
            .filter(|entry| entry.role.is_output() == output)
            .ok_or_else(|| FuzzyError::UnknownVariable {
                name: clause.variable.clone(),
            })?;

        if entry.domain.has_label(&clause.label) {
            Ok(())
        } else {
            Err(FuzzyError::UnknownLabel {
                variable: clause.variable.clone(),
                label: clause.label.clone(),
            })
        }
    }

    fn entry(&self, name: &str) -> Option<&VariableEntry> {
        self.names.get(name).and_then(|key| self.vars.0.get(*key))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn engine(&self) -> InferenceEngine {
        self.engine
    }

    /// Builds [`Inputs`] from `(variable name, value)` pairs.
    pub fn inputs_by_name<'n>(&self, values: impl IntoIterator<Item = (&'n str, f64)>) -> Result<Inputs> {
        let mut inputs = Inputs::new();

        for (name, value) in values {
            let key = self
                .names
                .get(name)
                .copied()
                .filter(|key| self.vars.0.get(*key).is_some_and(|entry| !entry.role.is_output()))
                .ok_or_else(|| FuzzyError::UnknownVariable { name: name.to_owned() })?;

            inputs.insert_key(key, value);
        }

        Ok(inputs)
    }

    /// Fuzzifies every input, fires the rules and defuzzifies every output.
    pub fn decide(&self, inputs: &Inputs) -> Result<Outputs> {
        let mut facts = FuzzyMap::new();

        for (key, entry) in self.vars.inputs() {
            let value = inputs.get(key).ok_or_else(|| FuzzyError::MissingInput {
                name: entry.name.clone(),
            })?;

            for (label, degree) in entry.domain.degrees(value) {
                facts.insert((entry.name.as_str(), label), degree);
            }
        }

        let activations = self.engine.evaluate(&facts, &self.rules)?;

        let values = self
            .vars
            .outputs()
            .map(|(key, entry, discretization)| {
                let crisp = centroid(&activations, &entry.name, entry.domain.as_ref(), &discretization);

                trace!(variable = %entry.name, crisp, "defuzzified");

                (key, entry.name.clone(), crisp)
            })
            .collect();

        Ok(Outputs::new(values))
    }
}
