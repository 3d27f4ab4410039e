//! Tokenizer for decomposition sequences.
//!
//! Sequences are split on extended grapheme cluster boundaries (UAX #29), so
//! a character followed by a variation selector stays one leaf. A `&` opens a
//! symbolic glyph code that runs to the next `;`.

use unicode_segmentation::UnicodeSegmentation;

use crate::ids::node::Operator;

/// A single token of a decomposition sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdsToken<'a> {
    Operator(Operator),
    Char(&'a str),
    Symbol(&'a str),
}

impl IdsToken<'_> {
    pub fn is_operator(&self) -> bool {
        matches!(self, IdsToken::Operator(_))
    }
}

/// Reason a sequence could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// A `&` with no closing `;`, at the given byte offset.
    UnterminatedSymbol(usize),
    /// An empty `&;` token, at the given byte offset.
    EmptySymbol(usize),
}

impl std::fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenizeError::UnterminatedSymbol(at) => {
                write!(f, "unterminated symbolic code starting at byte {at}")
            }
            TokenizeError::EmptySymbol(at) => write!(f, "empty symbolic code at byte {at}"),
        }
    }
}

/// Split a sequence into tokens, ignoring whitespace.
pub fn tokenize(sequence: &str) -> Result<Vec<IdsToken<'_>>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut graphemes = sequence.grapheme_indices(true);

    while let Some((start, grapheme)) = graphemes.next() {
        if grapheme.chars().all(char::is_whitespace) {
            continue;
        }

        if grapheme == "&" {
            let rest = &sequence[start + 1..];
            let Some(len) = rest.find(';') else {
                return Err(TokenizeError::UnterminatedSymbol(start));
            };
            if len == 0 {
                return Err(TokenizeError::EmptySymbol(start));
            }
            tokens.push(IdsToken::Symbol(&rest[..len]));
            let end = start + 1 + len;
            // Skip the graphemes inside the symbol, including the `;`.
            while let Some((offset, _)) = graphemes.clone().next() {
                if offset > end {
                    break;
                }
                graphemes.next();
            }
            continue;
        }

        let mut chars = grapheme.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(op) = Operator::from_char(c)
        {
            tokens.push(IdsToken::Operator(op));
            continue;
        }

        tokens.push(IdsToken::Char(grapheme));
    }

    Ok(tokens)
}
