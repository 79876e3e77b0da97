use crate::variable::{Variable, VariableKey};

/// Crisp results of one decision, one per output variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    values: Vec<(VariableKey, String, f64)>,
}

impl Outputs {
    pub(crate) fn new(values: Vec<(VariableKey, String, f64)>) -> Self {
        Self { values }
    }

    pub fn get<K>(&self, var: Variable<K>) -> Option<f64> {
        self.values
            .iter()
            .find(|(key, ..)| *key == var.0)
            .map(|(.., value)| *value)
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(_, var_name, _)| var_name == name)
            .map(|(.., value)| *value)
    }

    /// The only value, for controllers with a single output variable.
    pub fn single(&self) -> Option<f64> {
        match self.values.as_slice() {
            [(.., value)] => Some(*value),
            _ => None,
        }
    }

    /// `(name, value)` pairs in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(_, name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
