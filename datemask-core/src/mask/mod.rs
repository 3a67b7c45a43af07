//! Compiled mask strings and the named mask table.

mod table;
mod token;

use std::fmt;

pub use table::{DEFAULT_MASK_NAME, MaskTable};
pub use token::{Piece, Token};

use token::Scanner;

/// A mask prefix that switches field extraction to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// `UTC:`, the `Z` token prints `UTC`.
    Utc,
    /// `GMT:`, the `Z` token prints `GMT`.
    Gmt,
}

impl Prefix {
    pub fn label(self) -> &'static str {
        match self {
            Prefix::Utc => "UTC",
            Prefix::Gmt => "GMT",
        }
    }
}

/// A mask string compiled into a sequence of literal text and tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    source: String,
    prefix: Option<Prefix>,
    pieces: Vec<Piece>,
}

impl Mask {
    pub fn compile(source: &str) -> Self {
        log::trace!("compiling mask {:?}", source);

        let (prefix, body) = match source.get(..4) {
            Some("UTC:") => (Some(Prefix::Utc), &source[4..]),
            Some("GMT:") => (Some(Prefix::Gmt), &source[4..]),
            _ => (None, source),
        };

        Mask {
            source: source.to_string(),
            prefix,
            pieces: Scanner::new(body).scan(),
        }
    }

    /// The mask text as written, prefix included.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn prefix(&self) -> Option<Prefix> {
        self.prefix
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Token(token) => Some(*token),
            Piece::Literal(_) => None,
        })
    }
}

impl From<&str> for Mask {
    fn from(source: &str) -> Self {
        Mask::compile(source)
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
