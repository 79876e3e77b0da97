use std::fmt;
use std::marker::PhantomData;

use fixed_map::Map as FixedMap;
use slotmap::{new_key_type, SlotMap};
use tracing::warn;

use crate::linspace::Discretization;
use crate::membership::MembershipFunction;
use crate::terms::Term;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// The labels of one linguistic variable, each paired with its shape.
pub struct VariableDomain<K: Term> {
    terms: FixedMap<K, MembershipFunction>,
}

impl<K: Term> VariableDomain<K> {
    /// `shape` is called once per variant of `K`.
    pub fn new(shape: impl Fn(K) -> MembershipFunction) -> Self {
        let mut terms = FixedMap::new();

        for &term in K::ALL {
            let membership = shape(term);

            if membership.overlaps() {
                warn!(label = term.name(), "membership function has overlapping segments");
            }

            terms.insert(term, membership);
        }

        Self { terms }
    }

    pub fn shape(&self, term: K) -> Option<&MembershipFunction> {
        self.terms.get(term)
    }

    pub fn membership(&self, term: K, x: f64) -> f64 {
        self.terms.get(term).map_or(0., |membership| membership.evaluate(x))
    }

    /// Degree of every label at `x`.
    pub fn fuzzify(&self, x: f64) -> FixedMap<K, f64> {
        let mut degrees = FixedMap::new();

        for &term in K::ALL {
            degrees.insert(term, self.membership(term, x));
        }

        degrees
    }
}

impl<K: Term> fmt::Debug for VariableDomain<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(K::ALL.iter().map(|&term| (term.name(), self.terms.get(term))))
            .finish()
    }
}

/// Label-type-erased view of a [`VariableDomain`].
///
/// Labels are reported by name, in the declaration order of their term enum.
pub trait LinguisticVariable: Send + Sync {
    fn labels(&self) -> Vec<&'static str>;

    fn has_label(&self, label: &str) -> bool;

    fn degrees(&self, x: f64) -> Vec<(&'static str, f64)>;
}

impl<K: Term> LinguisticVariable for VariableDomain<K>
where
    VariableDomain<K>: Send + Sync,
{
    fn labels(&self) -> Vec<&'static str> {
        K::ALL.iter().map(|term| term.name()).collect()
    }

    fn has_label(&self, label: &str) -> bool {
        K::from_name(label).is_some()
    }

    fn degrees(&self, x: f64) -> Vec<(&'static str, f64)> {
        K::ALL
            .iter()
            .map(|&term| (term.name(), self.membership(term, x)))
            .collect()
    }
}

/// Handle to a configured variable, typed by its term enum.
pub struct Variable<K>(pub(crate) VariableKey, PhantomData<K>);

impl<K> Variable<K> {
    pub fn key(self) -> VariableKey {
        self.0
    }
}

impl<K> Clone for Variable<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Variable<K> {}

impl<K> fmt::Debug for Variable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Role {
    Input,
    Output(Discretization),
}

impl Role {
    pub(crate) fn is_output(self) -> bool {
        matches!(self, Self::Output(_))
    }
}

pub(crate) struct VariableEntry {
    pub(crate) name: String,
    pub(crate) role: Role,
    pub(crate) domain: Box<dyn LinguisticVariable>,
}

/// Registry of the input and output variables of a controller.
#[derive(Default)]
pub struct Variables(pub(crate) SlotMap<VariableKey, VariableEntry>);

impl Variables {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    pub fn add_input<K: Term>(&mut self, name: impl Into<String>, domain: VariableDomain<K>) -> Variable<K>
    where
        VariableDomain<K>: Send + Sync,
    {
        self.add(name.into(), Role::Input, domain)
    }

    /// Output variables are defuzzified by sampling `discretization`.
    pub fn add_output<K: Term>(
        &mut self,
        name: impl Into<String>,
        domain: VariableDomain<K>,
        discretization: Discretization,
    ) -> Variable<K>
    where
        VariableDomain<K>: Send + Sync,
    {
        self.add(name.into(), Role::Output(discretization), domain)
    }

    fn add<K: Term>(&mut self, name: String, role: Role, domain: VariableDomain<K>) -> Variable<K>
    where
        VariableDomain<K>: Send + Sync,
    {
        let key = self.0.insert(VariableEntry {
            name,
            role,
            domain: Box::new(domain),
        });

        Variable(key, PhantomData)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn inputs(&self) -> impl Iterator<Item = (VariableKey, &VariableEntry)> {
        self.0.iter().filter(|(_, entry)| entry.role == Role::Input)
    }

    pub(crate) fn outputs(&self) -> impl Iterator<Item = (VariableKey, &VariableEntry, Discretization)> {
        self.0.iter().filter_map(|(key, entry)| match entry.role {
            Role::Output(discretization) => Some((key, entry, discretization)),
            Role::Input => None,
        })
    }
}

#[cfg(test)]
crate::terms! {
    enum Distance {
        Close => "close",
        Moderate => "moderate",
        Far => "far",
    }
}

#[cfg(test)]
fn distance_domain() -> VariableDomain<Distance> {
    VariableDomain::new(|term| match term {
        Distance::Close => MembershipFunction::from_points(&[(0., 1.), (50., 0.)]),
        Distance::Moderate => MembershipFunction::from_points(&[(35., 0.), (50., 1.), (65., 0.)]),
        Distance::Far => MembershipFunction::from_points(&[(50., 0.), (100., 1.)]).segment((100., f64::INFINITY), (1., 1.)),
    })
}

#[test]
fn test_fuzzify_is_total() {
    let domain = distance_domain();
    let degrees = domain.fuzzify(40.);

    assert!((degrees.get(Distance::Close).copied().unwrap() - 0.2).abs() < 1e-12);
    assert!((degrees.get(Distance::Moderate).copied().unwrap() - 1. / 3.).abs() < 1e-12);
    assert_eq!(degrees.get(Distance::Far), Some(&0.));

    // Far outside every range, each label is still present, with degree zero
    let degrees = domain.fuzzify(-1e6);
    for &term in Distance::ALL {
        assert_eq!(degrees.get(term), Some(&0.));
    }
}

#[cfg(test)]
struct WarnCounter(std::sync::Arc<std::sync::atomic::AtomicUsize>);

#[cfg(test)]
impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarnCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::WARN {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
    }
}

#[test]
fn test_overlapping_shape_warns() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tracing_subscriber::layer::SubscriberExt;

    let warnings = Arc::new(AtomicUsize::new(0));
    let dispatch = tracing::Dispatch::new(tracing_subscriber::registry().with(WarnCounter(warnings.clone())));

    tracing::dispatcher::with_default(&dispatch, distance_domain);
    assert_eq!(warnings.load(Ordering::SeqCst), 0);

    let domain = tracing::dispatcher::with_default(&dispatch, || {
        VariableDomain::new(|term| match term {
            Distance::Close => MembershipFunction::from_points(&[(0., 1.), (50., 0.)]).segment((40., 60.), (0.5, 0.5)),
            Distance::Moderate => MembershipFunction::triangle(35., 50., 65.),
            Distance::Far => MembershipFunction::triangle(50., 100., 150.),
        })
    });
    assert_eq!(warnings.load(Ordering::SeqCst), 1);

    // The shape is kept as configured, overlapping values add up
    assert!(domain.shape(Distance::Close).is_some_and(MembershipFunction::overlaps));
    assert!((domain.membership(Distance::Close, 45.) - 0.6).abs() < 1e-12);
}

#[test]
fn test_linguistic_variable_view() {
    let domain = distance_domain();
    let dyn_domain: &dyn LinguisticVariable = &domain;

    assert_eq!(dyn_domain.labels(), vec!["close", "moderate", "far"]);
    assert!(dyn_domain.has_label("far"));
    assert!(!dyn_domain.has_label("Far"));
    assert_eq!(dyn_domain.degrees(500.), vec![("close", 0.), ("moderate", 0.), ("far", 1.)]);
}

#[test]
fn test_variables_roles() {
    let mut vars = Variables::new();
    let left = vars.add_input("d_L", distance_domain());
    let right = vars.add_input("d_R", distance_domain());
    let out = vars.add_output("out", distance_domain(), Discretization::new(0., 100., 1.).unwrap());

    assert_eq!(vars.len(), 3);
    let inputs: Vec<_> = vars.inputs().map(|(key, entry)| (key, entry.name.as_str())).collect();
    assert_eq!(inputs, vec![(left.key(), "d_L"), (right.key(), "d_R")]);

    let outputs: Vec<_> = vars.outputs().map(|(key, entry, _)| (key, entry.name.clone())).collect();
    assert_eq!(outputs, vec![(out.key(), "out".to_string())]);
}
