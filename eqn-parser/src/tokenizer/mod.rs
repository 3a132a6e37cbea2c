pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Multi-letter names that stand for a single symbol, and are never split into a product of
/// single-letter variables.
pub const WORDS: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi",
    "omega", "oo", "infty",
];

/// Functions that are never split into a product of single-letter variables, even when written
/// without parentheses, as in `sin x`.
pub const FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "sec", "csc", "cot",
    "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh", "coth",
    "log", "ln", "lg", "exp",
    "min", "max", "gcd", "det",
];

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Shorthand such as `2xy` is written without operators between variables, so a multi-letter
/// [`TokenKind::Name`] is split into one token per letter, unless it is a known word (see
/// [`WORDS`]), a known function (see [`FUNCTIONS`]), or is immediately followed by an opening
/// parenthesis (making it a function name, like `sqrt(`).
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        // the catch-all `Symbol` token means the lexer has nothing to reject, but stay total
        let kind = result.unwrap_or(TokenKind::Symbol);
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    split_names(tokens).into_boxed_slice()
}

/// Splits multi-letter names into single-letter names where appropriate.
fn split_names(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        let followed_by_paren = tokens[i + 1..]
            .iter()
            .find(|next| !next.is_whitespace())
            .is_some_and(|next| next.kind == TokenKind::OpenParen);

        if token.kind != TokenKind::Name
            || token.lexeme.len() == 1
            || !token.lexeme.bytes().all(|byte| byte.is_ascii_alphabetic())
            || followed_by_paren
            || WORDS.contains(&token.lexeme)
            || FUNCTIONS.contains(&token.lexeme)
        {
            out.push(token.clone());
            continue;
        }

        // every byte is one ASCII letter here
        for offset in 0..token.lexeme.len() {
            out.push(Token {
                span: token.span.start + offset..token.span.start + offset + 1,
                kind: TokenKind::Name,
                lexeme: &token.lexeme[offset..offset + 1],
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<const N: usize>(input: &str, expected: [(TokenKind, &str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    /// Compares the kinds and lexemes of the complete token stream, ignoring whitespace.
    fn compare_complete(input: &str, expected: &[(TokenKind, &str)]) {
        let tokens = tokenize_complete(input)
            .iter()
            .filter(|token| !token.is_whitespace())
            .map(|token| (token.kind, token.lexeme))
            .collect::<Vec<_>>();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn canonical_expr() {
        compare_tokens(
            "Eq((x)**(2),0.5)",
            [
                (TokenKind::Name, "Eq"),
                (TokenKind::OpenParen, "("),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "x"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Pow, "**"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Int, "2"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Comma, ","),
                (TokenKind::Float, "0.5"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn unicode_operators() {
        compare_tokens(
            "3×x÷2−y²·z $",
            [
                (TokenKind::Int, "3"),
                (TokenKind::Times, "×"),
                (TokenKind::Name, "x"),
                (TokenKind::Obelus, "÷"),
                (TokenKind::Int, "2"),
                (TokenKind::Sub, "−"),
                (TokenKind::Name, "y"),
                (TokenKind::Superscript, "²"),
                (TokenKind::Mul, "·"),
                (TokenKind::Name, "z"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
            ],
        );
    }

    #[test]
    fn split_implicit_names() {
        compare_complete("2xy + pi", &[
            (TokenKind::Int, "2"),
            (TokenKind::Name, "x"),
            (TokenKind::Name, "y"),
            (TokenKind::Add, "+"),
            (TokenKind::Name, "pi"),
        ]);
    }

    #[test]
    fn keep_function_names() {
        compare_complete("sqrt (ab)", &[
            (TokenKind::Name, "sqrt"),
            (TokenKind::OpenParen, "("),
            (TokenKind::Name, "a"),
            (TokenKind::Name, "b"),
            (TokenKind::CloseParen, ")"),
        ]);
    }

    #[test]
    fn keep_functions_without_parentheses() {
        compare_complete("sin x + ln y", &[
            (TokenKind::Name, "sin"),
            (TokenKind::Name, "x"),
            (TokenKind::Add, "+"),
            (TokenKind::Name, "ln"),
            (TokenKind::Name, "y"),
        ]);
        compare_complete("sinx", &[
            (TokenKind::Name, "s"),
            (TokenKind::Name, "i"),
            (TokenKind::Name, "n"),
            (TokenKind::Name, "x"),
        ]);
    }

    #[test]
    fn split_name_spans() {
        let tokens = tokenize_complete("xyz");
        let spans = tokens.iter().map(|token| token.span.clone()).collect::<Vec<_>>();
        assert_eq!(spans, vec![0..1, 1..2, 2..3]);
    }
}
