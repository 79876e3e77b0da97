use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Crisp values for the input variables of one decision.
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    /// Sets the value of `var`, replacing any earlier one.
    pub fn add<K>(&mut self, var: Variable<K>, val: f64) -> &mut Self {
        self.0.insert(var.0, val);
        self
    }

    pub(crate) fn insert_key(&mut self, key: VariableKey, val: f64) {
        self.0.insert(key, val);
    }

    pub(crate) fn get(&self, key: VariableKey) -> Option<f64> {
        self.0.get(&key).copied()
    }
}
