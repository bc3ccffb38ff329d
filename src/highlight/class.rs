//! Highlight classes assigned to rendered characters.

/// Syntactic category of one rendered character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Highlight {
    #[default]
    Normal,
    /// Single-line comment.
    Comment,
    /// Block comment, including both delimiters.
    BlockComment,
    /// Primary keywords (control flow, declarations).
    Keyword1,
    /// Secondary keywords (type names).
    Keyword2,
    String,
    Number,
    /// Current search match overlay.
    Match,
}

impl Highlight {
    /// SGR foreground color code, or `None` for the terminal default.
    #[must_use]
    pub const fn color(self) -> Option<u8> {
        match self {
            Self::Normal => None,
            Self::Comment | Self::BlockComment => Some(36),
            Self::Keyword1 => Some(33),
            Self::Keyword2 => Some(32),
            Self::String => Some(35),
            Self::Number => Some(31),
            Self::Match => Some(34),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Highlight;

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Highlight::default(), Highlight::Normal);
        assert_eq!(Highlight::Normal.color(), None);
    }

    #[test]
    fn test_comment_classes_share_color() {
        assert_eq!(Highlight::Comment.color(), Highlight::BlockComment.color());
    }

    #[test]
    fn test_match_color_is_distinct_from_syntax_colors() {
        let syntax = [
            Highlight::Comment,
            Highlight::Keyword1,
            Highlight::Keyword2,
            Highlight::String,
            Highlight::Number,
        ];
        for class in syntax {
            assert_ne!(class.color(), Highlight::Match.color(), "{class:?}");
        }
    }
}
