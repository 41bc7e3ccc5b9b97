//! Operator-precedence parser producing postfix programs
//!
//! A shunting-yard pass over the token stream. The ternary is handled with
//! two pending markers: `?` waits for its `:`, which then turns into a
//! pending select that is emitted once the false branch is complete.

use crate::error::{PluralFormsError, PluralResult};
use crate::program::{BinaryOperator, Instruction, Program};
use crate::token::{Operator, Token};

/// Precedence of the ternary, below every operator.
const TERNARY_PRECEDENCE: u8 = 1;

/// Entries waiting on the operator stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Operator(Operator),
    LeftParen,
    /// `?` seen, `:` not yet
    Question,
    /// `:` seen, false branch in progress
    Colon,
}

struct Parser {
    output: Vec<Instruction>,
    stack: Vec<Pending>,
    /// True when the next token must start an operand
    expect_operand: bool,
}

impl Parser {
    fn new(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            stack: Vec::new(),
            expect_operand: true,
        }
    }

    fn operand(&mut self, instruction: Instruction) {
        self.output.push(instruction);
        self.expect_operand = false;
    }

    fn require_operand_before(&self, symbol: &str) -> PluralResult<()> {
        if self.expect_operand {
            return Err(PluralFormsError::MissingOperand {
                operator: symbol.to_string(),
            });
        }
        Ok(())
    }

    /// Moves stacked operators binding at least as tightly as `precedence` to the output.
    fn flush_operators(&mut self, precedence: u8) {
        while let Some(&Pending::Operator(op)) = self.stack.last() {
            if op.precedence() < precedence {
                break;
            }
            self.stack.pop();
            self.output.push(emit(op));
        }
    }

    fn binary(&mut self, op: Operator) -> PluralResult<()> {
        self.require_operand_before(op.symbol())?;
        self.flush_operators(op.precedence());
        self.stack.push(Pending::Operator(op));
        self.expect_operand = true;
        Ok(())
    }

    fn question(&mut self) -> PluralResult<()> {
        self.require_operand_before("?")?;
        // Right-associative: leave earlier ternaries on the stack.
        self.flush_operators(TERNARY_PRECEDENCE + 1);
        self.stack.push(Pending::Question);
        self.expect_operand = true;
        Ok(())
    }

    fn colon(&mut self) -> PluralResult<()> {
        self.require_operand_before(":")?;
        loop {
            match self.stack.pop() {
                Some(Pending::Operator(op)) => self.output.push(emit(op)),
                Some(Pending::Colon) => self.output.push(Instruction::Select),
                Some(Pending::Question) => {
                    self.stack.push(Pending::Colon);
                    break;
                }
                Some(Pending::LeftParen) | None => {
                    return Err(PluralFormsError::MissingTernaryStart)
                }
            }
        }
        self.expect_operand = true;
        Ok(())
    }

    fn right_paren(&mut self) -> PluralResult<()> {
        if !self.stack.contains(&Pending::LeftParen) {
            return Err(PluralFormsError::MismatchedParentheses);
        }
        self.require_operand_before(")")?;
        loop {
            match self.stack.pop() {
                Some(Pending::Operator(op)) => self.output.push(emit(op)),
                Some(Pending::Colon) => self.output.push(Instruction::Select),
                Some(Pending::Question) => {
                    return Err(PluralFormsError::MissingOperand {
                        operator: "?".to_string(),
                    })
                }
                Some(Pending::LeftParen) => break,
                None => return Err(PluralFormsError::MismatchedParentheses),
            }
        }
        self.expect_operand = false;
        Ok(())
    }

    fn finish(mut self, last: Option<&Token>) -> PluralResult<Program> {
        if self.expect_operand {
            return Err(match last {
                None => PluralFormsError::EmptyExpression,
                Some(token) => PluralFormsError::MissingOperand {
                    operator: describe(token),
                },
            });
        }

        while let Some(pending) = self.stack.pop() {
            match pending {
                Pending::Operator(op) => self.output.push(emit(op)),
                Pending::Colon => self.output.push(Instruction::Select),
                Pending::Question => {
                    return Err(PluralFormsError::MissingOperand {
                        operator: "?".to_string(),
                    })
                }
                Pending::LeftParen => return Err(PluralFormsError::MismatchedParentheses),
            }
        }

        Program::new(self.output)
    }
}

fn emit(op: Operator) -> Instruction {
    let binary = match op {
        Operator::Not => return Instruction::Not,
        Operator::Mul => BinaryOperator::Mul,
        Operator::Div => BinaryOperator::Div,
        Operator::Rem => BinaryOperator::Rem,
        Operator::Add => BinaryOperator::Add,
        Operator::Sub => BinaryOperator::Sub,
        Operator::Lt => BinaryOperator::Lt,
        Operator::Le => BinaryOperator::Le,
        Operator::Gt => BinaryOperator::Gt,
        Operator::Ge => BinaryOperator::Ge,
        Operator::Eq => BinaryOperator::Eq,
        Operator::Ne => BinaryOperator::Ne,
        Operator::And => BinaryOperator::And,
        Operator::Or => BinaryOperator::Or,
    };
    Instruction::Binary(binary)
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(value) => value.to_string(),
        Token::Variable => "n".to_string(),
        Token::Operator(op) => op.symbol().to_string(),
        Token::Question => "?".to_string(),
        Token::Colon => ":".to_string(),
        Token::LeftParen => "(".to_string(),
        Token::RightParen => ")".to_string(),
        Token::Unsupported(symbol) => (*symbol).to_string(),
    }
}

/// Compiles a token stream into a validated postfix [`Program`].
///
/// All structural errors are reported here; a returned program can only
/// fail at evaluation time on division by zero.
pub fn parse(tokens: &[Token]) -> PluralResult<Program> {
    let mut parser = Parser::new(tokens.len());

    for token in tokens {
        match *token {
            Token::Number(value) => parser.operand(Instruction::Literal(value)),
            Token::Variable => parser.operand(Instruction::Variable),
            Token::Operator(op) if op.is_unary() => {
                parser.stack.push(Pending::Operator(op));
                parser.expect_operand = true;
            }
            Token::Operator(op) => parser.binary(op)?,
            Token::Question => parser.question()?,
            Token::Colon => parser.colon()?,
            Token::LeftParen => {
                parser.stack.push(Pending::LeftParen);
                parser.expect_operand = true;
            }
            Token::RightParen => parser.right_paren()?,
            Token::Unsupported(symbol) => {
                return Err(PluralFormsError::UnknownOperator {
                    operator: symbol.to_string(),
                })
            }
        }
    }

    parser.finish(tokens.last())
}
