//! Lowering of compiled groups into the [SPARQL algebra](GraphPattern) that is consumed by query
//! engines.

use crate::expr::{Condition, GroupExpression};
use crate::{QueryGroup, QueryGroupExpression};
use rdf_builder_model::{Expression, GraphPattern};

/// Describes what the [GroupExpression::Empty] pattern source is lowered to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EmptySource {
    /// A pattern without any solutions. A filter over it never produces a solution.
    #[default]
    NoSolutions,
    /// The empty group pattern, which has exactly one solution without any bindings.
    EmptyGroup,
}

/// Configures a [GraphPatternLowering].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoweringConfig {
    empty_source: EmptySource,
}

impl LoweringConfig {
    /// Creates a new configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_empty_source(mut self, empty_source: EmptySource) -> Self {
        self.empty_source = empty_source;
        self
    }

    pub fn empty_source(&self) -> EmptySource {
        self.empty_source
    }
}

/// Lowers a [QueryGroupExpression] into a [GraphPattern].
///
/// The shape of the expression is kept as is. Joined patterns are not merged into a single basic
/// graph pattern.
#[derive(Clone, Debug, Default)]
pub struct GraphPatternLowering {
    config: LoweringConfig,
}

impl GraphPatternLowering {
    pub fn new(config: LoweringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoweringConfig {
        &self.config
    }

    /// Compiles `group` and lowers the result. Returns [None] if the group compiles to no
    /// expression.
    pub fn lower_group(&self, group: &QueryGroup) -> Option<GraphPattern> {
        group.compile().map(|expression| self.lower(&expression))
    }

    pub fn lower(&self, expression: &QueryGroupExpression) -> GraphPattern {
        match expression {
            GroupExpression::Pattern(pattern) => GraphPattern::Bgp {
                patterns: vec![pattern.clone()],
            },
            GroupExpression::Join(lhs, rhs) => GraphPattern::Join {
                left: Box::new(self.lower(lhs)),
                right: Box::new(self.lower(rhs)),
            },
            GroupExpression::LeftJoin {
                lhs,
                rhs,
                condition,
            } => GraphPattern::LeftJoin {
                left: Box::new(self.lower(lhs)),
                right: Box::new(self.lower(rhs)),
                expression: condition.as_ref().map(|c| self.lower_condition(c)),
            },
            GroupExpression::Filter { inner, condition } => GraphPattern::Filter {
                expr: self.lower_condition(condition),
                inner: Box::new(self.lower(inner)),
            },
            GroupExpression::Empty => self.lower_empty_source(),
        }
    }

    pub fn lower_condition(&self, condition: &Condition<Expression>) -> Expression {
        match condition {
            Condition::Atom(expression) => expression.clone(),
            Condition::And(lhs, rhs) => Expression::And(
                Box::new(self.lower_condition(lhs)),
                Box::new(self.lower_condition(rhs)),
            ),
        }
    }

    fn lower_empty_source(&self) -> GraphPattern {
        match self.config.empty_source {
            EmptySource::NoSolutions => GraphPattern::Values {
                variables: Vec::new(),
                bindings: Vec::new(),
            },
            EmptySource::EmptyGroup => GraphPattern::Bgp {
                patterns: Vec::new(),
            },
        }
    }
}
