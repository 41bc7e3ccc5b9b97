//! Tokenizer for Plural-Forms expressions

use crate::error::{PluralFormsError, PluralResult};
use std::fmt;

/// Operators understood by the plural-forms grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Not,
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

impl Operator {
    /// Source spelling of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
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

    /// Binding strength; the ternary sits below all of these at 1
    pub fn precedence(self) -> u8 {
        match self {
            Self::Or => 2,
            Self::And => 3,
            Self::Eq | Self::Ne => 4,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => 5,
            Self::Add | Self::Sub => 6,
            Self::Mul | Self::Div | Self::Rem => 7,
            Self::Not => 8,
        }
    }

    /// Whether the operator takes a single, prefix operand
    pub fn is_unary(self) -> bool {
        matches!(self, Self::Not)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A lexical token of a Plural-Forms expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Decimal integer literal
    Number(i64),
    /// The free variable `n`
    Variable,
    Operator(Operator),
    /// `?` of the ternary
    Question,
    /// `:` of the ternary
    Colon,
    LeftParen,
    RightParen,
    /// An operator character the grammar rejects, kept so the parser can name it
    Unsupported(&'static str),
}

/// Splits an expression into tokens.
///
/// Two-character operators are matched before their one-character prefixes.
pub fn tokenize(expression: &str) -> PluralResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        let next = chars.peek().map(|&(_, next)| next);
        let two_char = match (c, next) {
            ('=', Some('=')) => Some(Operator::Eq),
            ('!', Some('=')) => Some(Operator::Ne),
            ('<', Some('=')) => Some(Operator::Le),
            ('>', Some('=')) => Some(Operator::Ge),
            ('&', Some('&')) => Some(Operator::And),
            ('|', Some('|')) => Some(Operator::Or),
            _ => None,
        };
        if let Some(op) = two_char {
            chars.next();
            tokens.push(Token::Operator(op));
            continue;
        }

        let token = match c {
            'n' => Token::Variable,
            '0'..='9' => {
                let mut value = i64::from(c as u8 - b'0');
                while let Some(&(_, digit @ '0'..='9')) = chars.peek() {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(i64::from(digit as u8 - b'0')))
                        .ok_or(PluralFormsError::UnknownSymbol {
                            symbol: c,
                            position,
                        })?;
                    chars.next();
                }
                Token::Number(value)
            }
            '!' => Token::Operator(Operator::Not),
            '*' => Token::Operator(Operator::Mul),
            '/' => Token::Operator(Operator::Div),
            '%' => Token::Operator(Operator::Rem),
            '+' => Token::Operator(Operator::Add),
            '-' => Token::Operator(Operator::Sub),
            '<' => Token::Operator(Operator::Lt),
            '>' => Token::Operator(Operator::Gt),
            '?' => Token::Question,
            ':' => Token::Colon,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '&' => Token::Unsupported("&"),
            '|' => Token::Unsupported("|"),
            '=' => Token::Unsupported("="),
            symbol => return Err(PluralFormsError::UnknownSymbol { symbol, position }),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        let tokens = tokenize("n != 1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Variable,
                Token::Operator(Operator::Ne),
                Token::Number(1)
            ]
        );
    }

    #[test]
    fn test_tokenize_greedy_operators() {
        let tokens = tokenize("n<=2||n>=10&&!n").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Variable,
                Token::Operator(Operator::Le),
                Token::Number(2),
                Token::Operator(Operator::Or),
                Token::Variable,
                Token::Operator(Operator::Ge),
                Token::Number(10),
                Token::Operator(Operator::And),
                Token::Operator(Operator::Not),
                Token::Variable,
            ]
        );
    }

    #[test]
    fn test_tokenize_ternary_and_parens() {
        let tokens = tokenize("(n%10==1) ? 0 : 1").unwrap();
        assert_eq!(tokens.len(), 11);
        assert_eq!(tokens[0], Token::LeftParen);
        assert_eq!(tokens[6], Token::RightParen);
        assert_eq!(tokens[7], Token::Question);
        assert_eq!(tokens[9], Token::Colon);
    }

    #[test]
    fn test_tokenize_multi_digit_numbers() {
        assert_eq!(tokenize("100").unwrap(), vec![Token::Number(100)]);
        assert_eq!(
            tokenize("  007 ").unwrap(),
            vec![Token::Number(7)],
            "leading zeros and surrounding whitespace"
        );
    }

    #[test]
    fn test_tokenize_unsupported_operators() {
        assert_eq!(
            tokenize("n & 1").unwrap()[1],
            Token::Unsupported("&"),
            "single ampersand is kept for the parser to reject"
        );
        assert_eq!(tokenize("n = 1").unwrap()[1], Token::Unsupported("="));
    }

    #[test]
    fn test_tokenize_unknown_symbol() {
        let err = tokenize("n # 2").unwrap_err();
        assert_eq!(
            err,
            PluralFormsError::UnknownSymbol {
                symbol: '#',
                position: 2
            }
        );
        assert!(err.to_string().contains('#'));
    }

    #[test]
    fn test_tokenize_rejects_other_identifiers() {
        assert!(matches!(
            tokenize("x > 1"),
            Err(PluralFormsError::UnknownSymbol { symbol: 'x', .. })
        ));
        assert!(matches!(
            tokenize("nplurals"),
            Err(PluralFormsError::UnknownSymbol { symbol: 'p', .. })
        ));
    }

    #[test]
    fn test_tokenize_number_overflow() {
        assert!(matches!(
            tokenize("99999999999999999999"),
            Err(PluralFormsError::UnknownSymbol { symbol: '9', position: 0 })
        ));
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("   ").unwrap().is_empty());
    }
}
