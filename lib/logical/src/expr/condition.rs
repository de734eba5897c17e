use std::fmt;
use std::fmt::{Display, Formatter};

/// A boolean filter condition assembled from opaque condition atoms.
///
/// The compiler never evaluates an atom. It only wraps atoms and combines them with [Condition::And].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Condition<C> {
    /// A single condition supplied by the caller.
    Atom(C),
    /// The conjunction of two conditions.
    And(Box<Self>, Box<Self>),
}

impl<C> Condition<C> {
    /// Creates the conjunction of `lhs` and `rhs`.
    pub fn and(lhs: Self, rhs: Self) -> Self {
        Self::And(Box::new(lhs), Box::new(rhs))
    }

    /// Returns the atoms of this condition from left to right.
    pub fn atoms(&self) -> Vec<&C> {
        let mut result = Vec::new();
        self.collect_atoms(&mut result);
        result
    }

    fn collect_atoms<'a>(&'a self, result: &mut Vec<&'a C>) {
        match self {
            Condition::Atom(atom) => result.push(atom),
            Condition::And(lhs, rhs) => {
                lhs.collect_atoms(result);
                rhs.collect_atoms(result);
            }
        }
    }
}

impl<C> From<C> for Condition<C> {
    fn from(value: C) -> Self {
        Condition::Atom(value)
    }
}

impl<C: Display> Display for Condition<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Atom(atom) => write!(f, "{atom}"),
            Condition::And(lhs, rhs) => write!(f, "({lhs} && {rhs})"),
        }
    }
}
