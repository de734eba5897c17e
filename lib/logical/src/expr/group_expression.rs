use crate::expr::Condition;
use std::fmt;
use std::fmt::{Display, Formatter};

/// A logical query-plan expression produced by compiling a [Group](crate::Group).
///
/// The tree is built bottom-up from owned sub-expressions. Pattern and condition values are
/// opaque to the tree; they are only moved into leaves and conditions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupExpression<P, C> {
    /// A single pattern leaf.
    Pattern(P),
    /// An inner join. Only solutions that match both sides survive.
    Join(Box<Self>, Box<Self>),
    /// A left-outer join. All solutions of `lhs` survive and are extended with the compatible
    /// solutions of `rhs` that satisfy `condition`.
    ///
    /// The condition is part of the join and not a filter on its result. Solutions of `lhs` are
    /// never discarded by it.
    LeftJoin {
        lhs: Box<Self>,
        rhs: Box<Self>,
        condition: Option<Condition<C>>,
    },
    /// Keeps only the solutions of `inner` that satisfy `condition`.
    Filter {
        inner: Box<Self>,
        condition: Condition<C>,
    },
    /// A pattern source without any solutions.
    Empty,
}

impl<P, C> GroupExpression<P, C> {
    /// Creates an inner join of `lhs` and `rhs`.
    pub fn join(lhs: Self, rhs: Self) -> Self {
        Self::Join(Box::new(lhs), Box::new(rhs))
    }

    /// Creates a left-outer join of `lhs` and `rhs`.
    pub fn left_join(lhs: Self, rhs: Self, condition: Option<Condition<C>>) -> Self {
        Self::LeftJoin {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            condition,
        }
    }

    /// Creates a filter over `inner`.
    pub fn filter(inner: Self, condition: Condition<C>) -> Self {
        Self::Filter {
            inner: Box::new(inner),
            condition,
        }
    }

    /// The name of the node kind, as used in explanations.
    pub fn node_name(&self) -> &'static str {
        match self {
            GroupExpression::Pattern(_) => "Pattern",
            GroupExpression::Join(_, _) => "Join",
            GroupExpression::LeftJoin { .. } => "LeftJoin",
            GroupExpression::Filter { .. } => "Filter",
            GroupExpression::Empty => "Empty",
        }
    }

    /// Returns the direct inputs of this node.
    pub fn inputs(&self) -> Vec<&Self> {
        match self {
            GroupExpression::Pattern(_) | GroupExpression::Empty => vec![],
            GroupExpression::Join(lhs, rhs) | GroupExpression::LeftJoin { lhs, rhs, .. } => {
                vec![lhs.as_ref(), rhs.as_ref()]
            }
            GroupExpression::Filter { inner, .. } => vec![inner.as_ref()],
        }
    }

    /// Returns the pattern leaves of this tree from left to right.
    pub fn leaves(&self) -> Vec<&P> {
        let mut result = Vec::new();
        self.collect_leaves(&mut result);
        result
    }

    fn collect_leaves<'a>(&'a self, result: &mut Vec<&'a P>) {
        if let GroupExpression::Pattern(pattern) = self {
            result.push(pattern);
        }
        for input in self.inputs() {
            input.collect_leaves(result);
        }
    }

    /// Counts the nodes of this tree (including this one) for which `predicate` holds.
    pub fn count_nodes(&self, predicate: impl Fn(&Self) -> bool + Copy) -> usize {
        let own = usize::from(predicate(self));
        own + self
            .inputs()
            .into_iter()
            .map(|input| input.count_nodes(predicate))
            .sum::<usize>()
    }

    fn fmt_indent(&self, f: &mut Formatter<'_>, indent: usize) -> fmt::Result
    where
        P: Display,
        C: Display,
    {
        write!(f, "{:indent$}", "", indent = indent * 2)?;
        match self {
            GroupExpression::Pattern(pattern) => write!(f, "Pattern: {pattern}")?,
            GroupExpression::LeftJoin {
                condition: Some(condition),
                ..
            } => write!(f, "LeftJoin: {condition}")?,
            GroupExpression::Filter { condition, .. } => write!(f, "Filter: {condition}")?,
            _ => f.write_str(self.node_name())?,
        }

        for input in self.inputs() {
            writeln!(f)?;
            input.fmt_indent(f, indent + 1)?;
        }
        Ok(())
    }
}

/// Renders the tree as an indented plan with one node per line.
impl<P: Display, C: Display> Display for GroupExpression<P, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_indent(f, 0)
    }
}
