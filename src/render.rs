//! Colored terminal rendering for datemask-core types.

use datemask_core::mask::{Mask, Piece};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Mask {
    /// Tokens in cyan, literal text dimmed, a `UTC:`/`GMT:` prefix in yellow.
    fn render(&self) -> String {
        let mut out = String::new();

        if let Some(prefix) = self.prefix() {
            out.push_str(&format!("{}:", prefix.label()).yellow().to_string());
        }

        for piece in self.pieces() {
            match piece {
                Piece::Token(token) => out.push_str(&token.symbol().cyan().to_string()),
                Piece::Literal(text) => out.push_str(&text.dimmed().to_string()),
            }
        }

        out
    }
}
