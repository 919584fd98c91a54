//! Logos tokenizer splitting inline text at the four tag characters.

use logos::Logos;

/// Inline token: one of `* _ < >` or a run of anything else.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineToken {
    #[token("*")]
    Star,

    #[token("_")]
    Underscore,

    #[token("<")]
    Open,

    #[token(">")]
    Close,

    #[regex(r"[^*_<>]+")]
    Text,
}

/// Tokenize `input` into `(token, slice)` pairs. Every byte is covered.
pub fn tokenize(input: &str) -> Vec<(InlineToken, &str)> {
    let mut lexer = InlineToken::lexer(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        // The four single-character rules plus the complement run cover all input.
        let token = token.unwrap_or(InlineToken::Text);
        tokens.push((token, lexer.slice()));
    }
    tokens
}
