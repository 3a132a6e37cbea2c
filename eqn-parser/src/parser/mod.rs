pub mod ast;
pub mod error;
pub mod fmt;
pub mod token;

use ast::{equality::Equality, expr::Expr};
use error::{kind, Error};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for the shorthand notation. This is the type to use to parse an arbitrary
/// piece of input into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl eqn_error::ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the next non-whitespace token, or the end of the source code if there
    /// is none.
    pub fn span(&self) -> Range<usize> {
        self.peek_token()
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token, which may be whitespace. The cursor is not moved. Returns
    /// [`None`] if the cursor is at the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns true if only whitespace remains in the stream.
    pub fn is_eof(&self) -> bool {
        self.peek_token().is_none()
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses a value from the given stream of tokens without consuming anything, regardless of
    /// whether parsing succeeds.
    pub fn peek<T: Parse>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        let result = T::parse(self);
        self.cursor = start;
        result
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_full_with_fn(T::parse)
    }

    /// Attempts to parse a value using a custom parsing function. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let value = self.try_parse_with_fn(f)?;
        if self.is_eof() {
            Ok(value)
        } else {
            Err(self.error(kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// Parses a complete piece of shorthand, which is either an expression or an equation with one
/// top-level `=`.
pub fn parse_equation(source: &str) -> Result<Expr, Error> {
    let mut parser = Parser::new(source);
    let expr = parser.try_parse_with_fn(Equality::parse_or_lower)?;

    match parser.peek_token() {
        None => Ok(expr),
        Some(token) if token.kind == TokenKind::CloseParen => Err(Error::new(
            vec![token.span.clone()],
            kind::UnclosedParenthesis { opening: false },
        )),
        Some(token) if token.kind == TokenKind::Symbol => Err(Error::new(
            vec![token.span.clone()],
            kind::UnknownSymbol { symbol: token.lexeme.to_owned() },
        )),
        Some(_) => Err(parser.error(kind::ExpectedEof)),
    }
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`, `×`, implicit) and division (`/`, `÷`), which separate
    /// factors.
    Factor,

    /// Precedence of unary negation and unary plus.
    Neg,

    /// Precedence of exponentiation (`^`, `**`, superscripts).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::Call,
        literal::{Literal, LitNum, LitSym},
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn num(value: &str, span: Range<usize>) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span })))
    }

    fn sym(name: &str, span: Range<usize>) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span })))
    }

    fn op(kind: BinOpKind, span: Range<usize>) -> BinOp {
        BinOp { kind, implicit: false, unicode: false, span }
    }

    #[test]
    fn literal_int() {
        let expr = parse_equation("16").unwrap();
        assert_eq!(expr, *num("16", 0..2));
    }

    #[test]
    fn literal_float() {
        let expr = parse_equation("3.14").unwrap();
        assert_eq!(expr, *num("3.14", 0..4));
    }

    #[test]
    fn literal_symbol() {
        let expr = parse_equation("pi").unwrap();
        assert_eq!(expr, *sym("pi", 0..2));
    }

    #[test]
    fn unary_right_associativity() {
        let expr = parse_equation("--3").unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Unary(Unary {
                operand: num("3", 2..3),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 1..2 },
                span: 1..3,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..3,
        }));
    }

    #[test]
    fn negation_binds_looser_than_exponent() {
        let expr = parse_equation("-x^2").unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: sym("x", 1..2),
                op: op(BinOpKind::Exp, 2..3),
                rhs: num("2", 3..4),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn binary_left_associativity() {
        let expr = parse_equation("3 * x * 5").unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: num("3", 0..1),
                op: op(BinOpKind::Mul, 2..3),
                rhs: sym("x", 4..5),
                span: 0..5,
            })),
            op: op(BinOpKind::Mul, 6..7),
            rhs: num("5", 8..9),
            span: 0..9,
        }));
    }

    #[test]
    fn binary_left_associativity_mix_precedence() {
        let expr = parse_equation("3 + 4 * a + b").unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: num("3", 0..1),
                op: op(BinOpKind::Add, 2..3),
                rhs: Box::new(Expr::Binary(Binary {
                    lhs: num("4", 4..5),
                    op: op(BinOpKind::Mul, 6..7),
                    rhs: sym("a", 8..9),
                    span: 4..9,
                })),
                span: 0..9,
            })),
            op: op(BinOpKind::Add, 10..11),
            rhs: sym("b", 12..13),
            span: 0..13,
        }));
    }

    #[test]
    fn binary_right_associativity() {
        let expr = parse_equation("1 ^ 2 ** 3").unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: num("1", 0..1),
            op: op(BinOpKind::Exp, 2..3),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: num("2", 4..5),
                op: op(BinOpKind::Exp, 6..8),
                rhs: num("3", 9..10),
                span: 4..10,
            })),
            span: 0..10,
        }));
    }

    #[test]
    fn implicit_multiplication() {
        let expr = parse_equation("2x").unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: num("2", 0..1),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, unicode: false, span: 1..1 },
            rhs: sym("x", 1..2),
            span: 0..2,
        }));
    }

    #[test]
    fn implicit_multiplication_binds_looser_than_exponent() {
        let expr = parse_equation("3x^2").unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: num("3", 0..1),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, unicode: false, span: 1..1 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: sym("x", 1..2),
                op: op(BinOpKind::Exp, 2..3),
                rhs: num("2", 3..4),
                span: 1..4,
            })),
            span: 0..4,
        }));
    }

    #[test]
    fn unicode_superscript() {
        let expr = parse_equation("x²").unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: sym("x", 0..1),
            op: BinOp { kind: BinOpKind::Exp, implicit: false, unicode: true, span: 1..3 },
            rhs: num("2", 1..3),
            span: 0..3,
        }));
    }

    #[test]
    fn unicode_operators() {
        let expr = parse_equation("a×b").unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: sym("a", 0..1),
            op: BinOp { kind: BinOpKind::Mul, implicit: false, unicode: true, span: 1..3 },
            rhs: sym("b", 3..4),
            span: 0..4,
        }));
    }

    #[test]
    fn parenthesized_fraction() {
        let expr = parse_equation("(x+1)/(x-2)").unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Paren(Paren {
                expr: Box::new(Expr::Binary(Binary {
                    lhs: sym("x", 1..2),
                    op: op(BinOpKind::Add, 2..3),
                    rhs: num("1", 3..4),
                    span: 1..4,
                })),
                span: 0..5,
            })),
            op: op(BinOpKind::Div, 5..6),
            rhs: Box::new(Expr::Paren(Paren {
                expr: Box::new(Expr::Binary(Binary {
                    lhs: sym("x", 7..8),
                    op: op(BinOpKind::Sub, 8..9),
                    rhs: num("2", 9..10),
                    span: 7..10,
                })),
                span: 6..11,
            })),
            span: 0..11,
        }));
    }

    #[test]
    fn function_call() {
        let expr = parse_equation("sqrt(x, 2)").unwrap();

        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "sqrt".to_string(), span: 0..4 },
            args: vec![*sym("x", 5..6), *num("2", 8..9)],
            span: 0..10,
            paren_span: 4..10,
        }));
    }

    #[test]
    fn single_letter_before_paren_is_multiplication() {
        let expr = parse_equation("x(x+1)").unwrap();
        let Expr::Binary(binary) = expr else {
            panic!("expected a binary expression");
        };
        assert_eq!(binary.op.kind, BinOpKind::Mul);
        assert!(binary.op.implicit);
    }

    #[test]
    fn equation() {
        let expr = parse_equation("2/x = 5").unwrap();
        let Expr::Equality(equality) = expr else {
            panic!("expected an equation");
        };
        assert_eq!(*equality.rhs, *num("5", 6..7));
        assert_eq!(equality.span, 0..7);
    }

    #[test]
    fn empty_input() {
        let err = parse_equation("   ").unwrap_err();
        assert!(err.is::<kind::UnexpectedEof>());
    }

    #[test]
    fn chained_equality() {
        let err = parse_equation("x = 1 = 2").unwrap_err();
        assert!(err.is::<kind::ChainedEquality>());
        assert_eq!(err.spans, vec![6..7]);
    }

    #[test]
    fn unclosed_parenthesis() {
        let err = parse_equation("((x").unwrap_err();
        assert!(err.is::<kind::UnclosedParenthesis>());
    }

    #[test]
    fn stray_close_parenthesis() {
        let err = parse_equation("x + 1)").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::UnclosedParenthesis>(),
            Some(&kind::UnclosedParenthesis { opening: false }),
        );
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn empty_parenthesis() {
        let err = parse_equation("2()").unwrap_err();
        assert!(err.is::<kind::EmptyParenthesis>());
    }

    #[test]
    fn dangling_operator() {
        let err = parse_equation("2/").unwrap_err();
        assert!(err.is::<kind::UnexpectedEof>());
    }

    #[test]
    fn unknown_symbol() {
        let err = parse_equation("x $ 2").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::UnknownSymbol>(),
            Some(&kind::UnknownSymbol { symbol: "$".to_string() }),
        );
        assert_eq!(err.spans, vec![2..3]);

        let err = parse_equation("2 + \\frac").unwrap_err();
        assert!(err.is::<kind::UnknownSymbol>());
    }

    #[test]
    fn leftover_input() {
        let err = parse_equation("x, y").unwrap_err();
        assert!(err.is::<kind::ExpectedEof>());
        assert_eq!(err.spans, vec![1..2]);
    }
}
