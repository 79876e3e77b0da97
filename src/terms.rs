use std::fmt::Debug;

pub use fixed_map::Key;

/// The closed set of labels of one linguistic variable.
///
/// Every variant carries the name rule text uses for it. Variables are
/// configured by iterating [`Term::ALL`], so a label can never be left
/// without a membership function.
///
/// Term enums are keys of a `fixed_map::Map`. The `Key` derive expands to
/// `::fixed_map` paths, so crates declaring their own terms must depend on
/// `fixed-map` directly:
///
/// ```toml
/// [dependencies]
/// fixed-map = "0.9"
/// mamdani = "0.1"
/// ```
pub trait Term: Key + Copy + Debug + Eq + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|term| term.name() == name)
    }
}

/// Declares a term enum and its rule-text names in one go.
///
/// The calling crate needs `fixed-map` among its dependencies, see [`Term`].
///
/// ```
/// use mamdani::{MembershipFunction, Term, VariableDomain};
///
/// mamdani::terms! {
///     pub enum Distance {
///         Close => "close",
///         Moderate => "moderate",
///         Far => "far",
///     }
/// }
///
/// let domain = VariableDomain::new(|term| match term {
///     Distance::Close => MembershipFunction::triangle(-50., 0., 50.),
///     Distance::Moderate => MembershipFunction::triangle(35., 50., 65.),
///     Distance::Far => MembershipFunction::triangle(50., 100., 150.),
/// });
///
/// assert_eq!(Distance::from_name("moderate"), Some(Distance::Moderate));
/// assert_eq!(Distance::Far.name(), "far");
/// assert_eq!(domain.membership(Distance::Moderate, 50.), 1.);
/// assert_eq!(domain.fuzzify(0.).get(Distance::Close), Some(&1.));
/// ```
#[macro_export]
macro_rules! terms {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, $crate::Key)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::Term for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

#[test]
fn test_term_names() {
    crate::terms! {
        enum Gas {
            Low => "low",
            Medium => "medium",
            High => "high",
        }
    }

    assert_eq!(Gas::ALL, &[Gas::Low, Gas::Medium, Gas::High]);
    assert_eq!(Gas::Medium.name(), "medium");
    assert_eq!(Gas::from_name("high"), Some(Gas::High));
    // Names are case-sensitive
    assert_eq!(Gas::from_name("High"), None);
}
