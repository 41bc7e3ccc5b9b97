//! Compiled RPN programs and the stack machine that runs them

use crate::error::{PluralFormsError, PluralResult};
use std::fmt;

/// Operators that pop two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl BinaryOperator {
    /// Source spelling of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    fn apply(self, left: i64, right: i64, n: i64) -> PluralResult<i64> {
        let value = match self {
            Self::Mul => left.wrapping_mul(right),
            Self::Div | Self::Rem if right == 0 => {
                return Err(PluralFormsError::DivisionByZero { n })
            }
            Self::Div => left.wrapping_div(right),
            Self::Rem => left.wrapping_rem(right),
            Self::Add => left.wrapping_add(right),
            Self::Sub => left.wrapping_sub(right),
            Self::Lt => i64::from(left < right),
            Self::Le => i64::from(left <= right),
            Self::Gt => i64::from(left > right),
            Self::Ge => i64::from(left >= right),
            Self::Eq => i64::from(left == right),
            Self::Ne => i64::from(left != right),
            Self::And => i64::from(left != 0 && right != 0),
            Self::Or => i64::from(left != 0 || right != 0),
        };
        Ok(value)
    }
}

/// One element of a postfix program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Push a constant
    Literal(i64),
    /// Push the count being evaluated
    Variable,
    /// Pop one operand, push its logical negation
    Not,
    /// Pop right then left operand, push the result
    Binary(BinaryOperator),
    /// Pop false branch, true branch and condition; push the chosen branch
    Select,
}

impl Instruction {
    /// Number of operands the instruction consumes
    pub fn arity(self) -> usize {
        match self {
            Self::Literal(_) | Self::Variable => 0,
            Self::Not => 1,
            Self::Binary(_) => 2,
            Self::Select => 3,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Variable => f.write_str("n"),
            Self::Not => f.write_str("!"),
            Self::Binary(op) => f.write_str(op.symbol()),
            Self::Select => f.write_str("?:"),
        }
    }
}

/// A validated postfix instruction sequence.
///
/// Construction checks the stack discipline once, so evaluation of a
/// `Program` always ends with exactly one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    max_depth: usize,
}

impl Program {
    /// Validates an instruction sequence by simulating its stack depth.
    pub fn new(instructions: Vec<Instruction>) -> PluralResult<Self> {
        if instructions.is_empty() {
            return Err(PluralFormsError::EmptyExpression);
        }

        let mut depth = 0usize;
        let mut max_depth = 0usize;
        for instruction in &instructions {
            let arity = instruction.arity();
            if depth < arity {
                return Err(PluralFormsError::MissingOperand {
                    operator: instruction.to_string(),
                });
            }
            depth = depth - arity + 1;
            max_depth = max_depth.max(depth);
        }

        if depth > 1 {
            return Err(PluralFormsError::TooManyOperands);
        }

        Ok(Self {
            instructions,
            max_depth,
        })
    }

    /// The instructions in execution order
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Runs the program for `n`.
    pub fn evaluate(&self, n: i64) -> PluralResult<i64> {
        let mut stack: Vec<i64> = Vec::with_capacity(self.max_depth);

        for instruction in &self.instructions {
            match *instruction {
                Instruction::Literal(value) => stack.push(value),
                Instruction::Variable => stack.push(n),
                Instruction::Not => {
                    let operand = pop(&mut stack)?;
                    stack.push(i64::from(operand == 0));
                }
                Instruction::Binary(op) => {
                    let right = pop(&mut stack)?;
                    let left = pop(&mut stack)?;
                    stack.push(op.apply(left, right, n)?);
                }
                Instruction::Select => {
                    let if_false = pop(&mut stack)?;
                    let if_true = pop(&mut stack)?;
                    let condition = pop(&mut stack)?;
                    stack.push(if condition != 0 { if_true } else { if_false });
                }
            }
        }

        match stack.as_slice() {
            [value] => Ok(*value),
            _ => Err(PluralFormsError::StackImbalance { depth: stack.len() }),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{instruction}")?;
        }
        Ok(())
    }
}

fn pop(stack: &mut Vec<i64>) -> PluralResult<i64> {
    stack
        .pop()
        .ok_or(PluralFormsError::StackImbalance { depth: 0 })
}
