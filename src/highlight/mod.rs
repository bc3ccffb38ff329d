//! Syntax highlighting: classes, language profiles and the row classifier.
//!
//! Classification works on each row's rendered bytes. The only state that
//! crosses row boundaries is whether a block comment is still open, so an
//! edit re-highlights its own row and then walks downward only while that
//! state keeps changing (see [`cascade`]).

mod class;
mod highlighter;
mod syntax;

pub use class::Highlight;
pub use highlighter::{cascade, highlight_all, highlight_line};
pub use syntax::{HighlightFlags, Keyword, LanguageProfile, PROFILES, is_separator, select_profile};
