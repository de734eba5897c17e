mod condition;
mod group_expression;

pub use condition::Condition;
pub use group_expression::GroupExpression;
