//! Differential tests against an independent tree-walking evaluator.
//!
//! The oracle below is a plain recursive-descent parser over the same C
//! grammar. It shares no code with the crate, so agreement over real locale
//! rules is a meaningful check of precedence and ternary handling.

use pomo_common::test_utils::plural_fixtures::REAL_WORLD_PLURAL_FORMS;
use pomo_common::test_utils::property_testing::{count_strategy, plural_expression_strategy};
use pomo_plural::PluralForms;
use proptest::prelude::*;

enum Node {
    Num(i64),
    N,
    Not(Box<Node>),
    Bin(&'static str, Box<Node>, Box<Node>),
    Cond(Box<Node>, Box<Node>, Box<Node>),
}

impl Node {
    fn eval(&self, n: i64) -> i64 {
        match self {
            Node::Num(v) => *v,
            Node::N => n,
            Node::Not(a) => i64::from(a.eval(n) == 0),
            Node::Cond(c, t, f) => {
                if c.eval(n) != 0 {
                    t.eval(n)
                } else {
                    f.eval(n)
                }
            }
            Node::Bin(op, a, b) => {
                let (l, r) = (a.eval(n), b.eval(n));
                match *op {
                    "||" => i64::from(l != 0 || r != 0),
                    "&&" => i64::from(l != 0 && r != 0),
                    "==" => i64::from(l == r),
                    "!=" => i64::from(l != r),
                    "<" => i64::from(l < r),
                    "<=" => i64::from(l <= r),
                    ">" => i64::from(l > r),
                    ">=" => i64::from(l >= r),
                    "+" => l + r,
                    "-" => l - r,
                    "*" => l * r,
                    "/" => l / r,
                    "%" => l % r,
                    other => panic!("oracle: unexpected operator {other}"),
                }
            }
        }
    }
}

struct Oracle<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Oracle<'a> {
    fn compile(expression: &'a str) -> Node {
        let mut oracle = Oracle {
            src: expression.as_bytes(),
            pos: 0,
        };
        let node = oracle.ternary();
        oracle.skip_ws();
        assert_eq!(oracle.pos, oracle.src.len(), "oracle: trailing input");
        node
    }

    fn skip_ws(&mut self) {
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.src[self.pos..].starts_with(token.as_bytes()) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn ternary(&mut self) -> Node {
        let cond = self.or();
        if self.eat("?") {
            let t = self.ternary();
            assert!(self.eat(":"), "oracle: expected ':'");
            let f = self.ternary();
            Node::Cond(Box::new(cond), Box::new(t), Box::new(f))
        } else {
            cond
        }
    }

    /// Operators must be listed longest first so `<` does not eat half of `<=`.
    fn binary_level(&mut self, ops: &[&'static str], next: fn(&mut Self) -> Node) -> Node {
        let mut left = next(self);
        while let Some(op) = ops.iter().copied().find(|op| self.eat(op)) {
            let right = next(self);
            left = Node::Bin(op, Box::new(left), Box::new(right));
        }
        left
    }

    fn or(&mut self) -> Node {
        self.binary_level(&["||"], Self::and)
    }

    fn and(&mut self) -> Node {
        self.binary_level(&["&&"], Self::equality)
    }

    fn equality(&mut self) -> Node {
        self.binary_level(&["==", "!="], Self::relational)
    }

    fn relational(&mut self) -> Node {
        self.binary_level(&["<=", ">=", "<", ">"], Self::additive)
    }

    fn additive(&mut self) -> Node {
        self.binary_level(&["+", "-"], Self::multiplicative)
    }

    fn multiplicative(&mut self) -> Node {
        self.binary_level(&["*", "/", "%"], Self::unary)
    }

    fn unary(&mut self) -> Node {
        self.skip_ws();
        if self.src[self.pos] == b'!' && self.src.get(self.pos + 1) != Some(&b'=') {
            self.pos += 1;
            return Node::Not(Box::new(self.unary()));
        }
        self.primary()
    }

    fn primary(&mut self) -> Node {
        self.skip_ws();
        match self.src[self.pos] {
            b'n' => {
                self.pos += 1;
                Node::N
            }
            b'(' => {
                self.pos += 1;
                let inner = self.ternary();
                assert!(self.eat(")"), "oracle: expected ')'");
                inner
            }
            b'0'..=b'9' => {
                let start = self.pos;
                while self.pos < self.src.len() && self.src[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
                let digits = std::str::from_utf8(&self.src[start..self.pos]).unwrap();
                Node::Num(digits.parse().unwrap())
            }
            other => panic!("oracle: unexpected byte {:?}", other as char),
        }
    }
}

#[test]
fn test_real_world_rules_match_oracle() {
    for (locale, nplurals, expression) in REAL_WORLD_PLURAL_FORMS {
        let forms = PluralForms::new(expression)
            .unwrap_or_else(|e| panic!("{locale}: failed to compile '{expression}': {e}"));
        let oracle = Oracle::compile(expression);

        for n in 0..=200 {
            let got = forms.get(n).unwrap();
            assert_eq!(got, oracle.eval(n), "{locale} '{expression}' n = {n}");
            assert!(
                (0..*nplurals as i64).contains(&got),
                "{locale}: index {got} out of range for nplurals={nplurals}"
            );
        }
    }
}

#[test]
fn test_oracle_handles_operator_prefixes() {
    let node = Oracle::compile("n <= 2 ? 1 : 0");
    assert_eq!(node.eval(2), 1);
    assert_eq!(node.eval(3), 0);
}

#[test]
fn test_known_russian_forms() {
    let (_, _, expression) = REAL_WORLD_PLURAL_FORMS
        .iter()
        .find(|(locale, _, _)| *locale == "ru_RU")
        .unwrap();
    let forms = PluralForms::new(expression).unwrap();
    let expected = [(1, 0), (2, 1), (4, 1), (5, 2), (11, 2), (12, 2), (21, 0), (22, 1), (111, 2)];
    for (n, index) in expected {
        assert_eq!(forms.get(n).unwrap(), index, "n = {n}");
    }
}

proptest! {
    #[test]
    fn test_property_matches_oracle(
        expression in plural_expression_strategy(),
        n in count_strategy(),
    ) {
        let forms = PluralForms::new(expression).unwrap();
        prop_assert_eq!(forms.get(n).unwrap(), Oracle::compile(expression).eval(n));
    }

    #[test]
    fn test_property_get_is_deterministic(
        expression in plural_expression_strategy(),
        counts in proptest::collection::vec(count_strategy(), 1..50),
    ) {
        let forms = PluralForms::new(expression).unwrap();
        let first: Vec<i64> = counts.iter().map(|&n| forms.get(n).unwrap()).collect();
        let evaluations = forms.evaluation_count();
        let second: Vec<i64> = counts.iter().map(|&n| forms.get(n).unwrap()).collect();

        prop_assert_eq!(first, second);
        prop_assert_eq!(forms.evaluation_count(), evaluations);
        prop_assert_eq!(evaluations, forms.cached_len());
    }
}
