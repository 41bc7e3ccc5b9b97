//! Error types for compiling and evaluating plural-forms expressions

use thiserror::Error;

/// Errors raised while compiling or evaluating a Plural-Forms expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluralFormsError {
    /// A character that is not part of the expression grammar
    #[error("Unknown symbol \"{symbol}\" at offset {position}")]
    UnknownSymbol { symbol: char, position: usize },

    /// An operator the grammar does not support, such as bitwise `&`
    #[error("Unknown operator \"{operator}\"")]
    UnknownOperator { operator: String },

    /// Unbalanced `(` or `)`
    #[error("Mismatched parentheses")]
    MismatchedParentheses,

    /// A `:` without an open `?`
    #[error("Missing starting \"?\" ternary operator")]
    MissingTernaryStart,

    /// More than one value left after parsing, e.g. `n n`
    #[error("Too many values remaining on the stack")]
    TooManyOperands,

    /// An operator without the operand it needs, e.g. `n +` or `n ? 1`
    #[error("Missing operand for operator \"{operator}\"")]
    MissingOperand { operator: String },

    /// The expression contains no tokens at all
    #[error("Empty plural-forms expression")]
    EmptyExpression,

    /// Division or modulo by zero while evaluating for `n`
    #[error("Division by zero while evaluating n = {n}")]
    DivisionByZero { n: i64 },

    /// The operand stack ended up in an impossible state
    #[error("Operand stack holds {depth} values after evaluation, expected 1")]
    StackImbalance { depth: usize },
}

/// Field-less discriminant of [`PluralFormsError`] for matching in callers and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownSymbol,
    UnknownOperator,
    MismatchedParentheses,
    MissingTernaryStart,
    TooManyOperands,
    MissingOperand,
    EmptyExpression,
    DivisionByZero,
    StackImbalance,
}

impl PluralFormsError {
    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownSymbol { .. } => ErrorKind::UnknownSymbol,
            Self::UnknownOperator { .. } => ErrorKind::UnknownOperator,
            Self::MismatchedParentheses => ErrorKind::MismatchedParentheses,
            Self::MissingTernaryStart => ErrorKind::MissingTernaryStart,
            Self::TooManyOperands => ErrorKind::TooManyOperands,
            Self::MissingOperand { .. } => ErrorKind::MissingOperand,
            Self::EmptyExpression => ErrorKind::EmptyExpression,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::StackImbalance { .. } => ErrorKind::StackImbalance,
        }
    }

    /// Whether the error is raised while compiling rather than evaluating
    pub fn is_compile_error(&self) -> bool {
        !matches!(
            self,
            Self::DivisionByZero { .. } | Self::StackImbalance { .. }
        )
    }
}

/// Result type for plural-forms operations
pub type PluralResult<T> = Result<T, PluralFormsError>;
