//! Tokenizer of the symbolic language.
//!
//! The language is a mere sequence of symbols: tokens are separated by runs of
//! whitespace, and there is no quoting, escaping or comment syntax.

use alloc::vec::Vec;

/// Represents an iterator over whitespace-delimited tokens.
///
/// # Example
/// ```
/// # use frame_base::lex::Lex;
/// #
/// let tokens: Vec<&str> = Lex::new("  1 2\t+\n. ").collect();
///
/// assert_eq!(tokens, ["1", "2", "+", "."]);
/// ```
pub struct Lex<'a> {
    v: &'a str,
    pos: usize,
}

impl<'a> Lex<'a> {
    /// Create new lexer by string.
    pub fn new(v: &'a str) -> Self {
        Self { v, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Lex<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let step: usize = self.v[self.pos..]
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        self.pos += step;

        let len: usize = self.v[self.pos..]
            .chars()
            .take_while(|c| !c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        if len == 0 {
            return None;
        }
        self.pos += len;

        Some(&self.v[self.pos - len..self.pos])
    }
}

/// Cuts a line into tokens. See [`Lex`].
pub fn tokenize(s: &str) -> Vec<&str> {
    Lex::new(s).collect()
}
