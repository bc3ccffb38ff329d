//! Language profiles: comment delimiters, keyword tables and feature flags.

use bitflags::bitflags;

use super::class::Highlight;

bitflags! {
    /// Optional highlight passes enabled for a language.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct HighlightFlags: u8 {
        /// Classify digit runs as numbers.
        const NUMBERS = 0b0000_0001;
        /// Classify quoted text as strings.
        const STRINGS = 0b0000_0010;
    }
}

/// One keyword and the class it is highlighted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keyword {
    pub text: &'static str,
    pub class: Highlight,
}

impl Keyword {
    /// Keyword highlighted as [`Highlight::Keyword1`].
    #[must_use]
    pub const fn primary(text: &'static str) -> Self {
        Self {
            text,
            class: Highlight::Keyword1,
        }
    }

    /// Keyword highlighted as [`Highlight::Keyword2`].
    #[must_use]
    pub const fn secondary(text: &'static str) -> Self {
        Self {
            text,
            class: Highlight::Keyword2,
        }
    }
}

/// Highlighting rules for one file type.
#[derive(Debug, PartialEq, Eq)]
pub struct LanguageProfile {
    /// Name shown in the status bar.
    pub name: &'static str,
    /// Patterns matched against the filename. A leading `.` means "equals
    /// the extension", anything else means "appears in the filename".
    pub file_match: &'static [&'static str],
    /// Keywords in match order; the first one that fits wins.
    pub keywords: &'static [Keyword],
    pub single_line_comment: Option<&'static str>,
    /// Block comment `(start, end)` delimiters.
    pub block_comment: Option<(&'static str, &'static str)>,
    pub flags: HighlightFlags,
}

impl LanguageProfile {
    /// Check whether this profile applies to `filename`.
    #[must_use]
    pub fn matches(&self, filename: &str) -> bool {
        let extension = filename.rfind('.').map(|i| &filename[i..]);
        self.file_match.iter().any(|pattern| {
            if pattern.starts_with('.') {
                extension == Some(*pattern)
            } else {
                filename.contains(pattern)
            }
        })
    }
}

/// Whitespace, NUL, or one of the operator/punctuation characters that end
/// a word for number and keyword detection.
#[must_use]
pub fn is_separator(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r' | 0)
        || b",.()+-/*=~%<>[];".contains(&c)
}

static C_KEYWORDS: &[Keyword] = &[
    Keyword::primary("switch"),
    Keyword::primary("if"),
    Keyword::primary("while"),
    Keyword::primary("for"),
    Keyword::primary("break"),
    Keyword::primary("continue"),
    Keyword::primary("return"),
    Keyword::primary("else"),
    Keyword::primary("struct"),
    Keyword::primary("union"),
    Keyword::primary("typedef"),
    Keyword::primary("static"),
    Keyword::primary("enum"),
    Keyword::primary("class"),
    Keyword::primary("case"),
    Keyword::secondary("int"),
    Keyword::secondary("long"),
    Keyword::secondary("double"),
    Keyword::secondary("float"),
    Keyword::secondary("char"),
    Keyword::secondary("unsigned"),
    Keyword::secondary("signed"),
    Keyword::secondary("void"),
];

static RUST_KEYWORDS: &[Keyword] = &[
    Keyword::primary("fn"),
    Keyword::primary("let"),
    Keyword::primary("mut"),
    Keyword::primary("if"),
    Keyword::primary("else"),
    Keyword::primary("match"),
    Keyword::primary("while"),
    Keyword::primary("loop"),
    Keyword::primary("for"),
    Keyword::primary("in"),
    Keyword::primary("return"),
    Keyword::primary("break"),
    Keyword::primary("continue"),
    Keyword::primary("struct"),
    Keyword::primary("enum"),
    Keyword::primary("impl"),
    Keyword::primary("trait"),
    Keyword::primary("pub"),
    Keyword::primary("use"),
    Keyword::primary("mod"),
    Keyword::primary("const"),
    Keyword::primary("static"),
    Keyword::primary("where"),
    Keyword::primary("as"),
    Keyword::primary("unsafe"),
    Keyword::primary("move"),
    Keyword::primary("ref"),
    Keyword::primary("type"),
    Keyword::primary("dyn"),
    Keyword::primary("async"),
    Keyword::primary("await"),
    Keyword::primary("self"),
    Keyword::primary("Self"),
    Keyword::primary("super"),
    Keyword::primary("crate"),
    Keyword::secondary("i8"),
    Keyword::secondary("i16"),
    Keyword::secondary("i32"),
    Keyword::secondary("i64"),
    Keyword::secondary("i128"),
    Keyword::secondary("isize"),
    Keyword::secondary("u8"),
    Keyword::secondary("u16"),
    Keyword::secondary("u32"),
    Keyword::secondary("u64"),
    Keyword::secondary("u128"),
    Keyword::secondary("usize"),
    Keyword::secondary("f32"),
    Keyword::secondary("f64"),
    Keyword::secondary("bool"),
    Keyword::secondary("char"),
    Keyword::secondary("str"),
    Keyword::secondary("String"),
    Keyword::secondary("Vec"),
    Keyword::secondary("Option"),
    Keyword::secondary("Result"),
    Keyword::secondary("Box"),
    Keyword::secondary("true"),
    Keyword::secondary("false"),
];

static PYTHON_KEYWORDS: &[Keyword] = &[
    Keyword::primary("def"),
    Keyword::primary("class"),
    Keyword::primary("if"),
    Keyword::primary("elif"),
    Keyword::primary("else"),
    Keyword::primary("for"),
    Keyword::primary("while"),
    Keyword::primary("return"),
    Keyword::primary("import"),
    Keyword::primary("from"),
    Keyword::primary("as"),
    Keyword::primary("with"),
    Keyword::primary("try"),
    Keyword::primary("except"),
    Keyword::primary("finally"),
    Keyword::primary("raise"),
    Keyword::primary("pass"),
    Keyword::primary("break"),
    Keyword::primary("continue"),
    Keyword::primary("lambda"),
    Keyword::primary("yield"),
    Keyword::primary("global"),
    Keyword::primary("nonlocal"),
    Keyword::primary("in"),
    Keyword::primary("is"),
    Keyword::primary("not"),
    Keyword::primary("and"),
    Keyword::primary("or"),
    Keyword::primary("del"),
    Keyword::primary("assert"),
    Keyword::secondary("None"),
    Keyword::secondary("True"),
    Keyword::secondary("False"),
    Keyword::secondary("self"),
    Keyword::secondary("int"),
    Keyword::secondary("str"),
    Keyword::secondary("float"),
    Keyword::secondary("bool"),
    Keyword::secondary("list"),
    Keyword::secondary("dict"),
    Keyword::secondary("tuple"),
    Keyword::secondary("set"),
];

/// Built-in profiles, checked in order.
pub static PROFILES: &[LanguageProfile] = &[
    LanguageProfile {
        name: "c",
        file_match: &[".c", ".h", ".cpp"],
        keywords: C_KEYWORDS,
        single_line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        flags: HighlightFlags::NUMBERS.union(HighlightFlags::STRINGS),
    },
    LanguageProfile {
        name: "rust",
        file_match: &[".rs"],
        keywords: RUST_KEYWORDS,
        single_line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        flags: HighlightFlags::NUMBERS.union(HighlightFlags::STRINGS),
    },
    LanguageProfile {
        name: "python",
        file_match: &[".py"],
        keywords: PYTHON_KEYWORDS,
        single_line_comment: Some("#"),
        block_comment: None,
        flags: HighlightFlags::NUMBERS.union(HighlightFlags::STRINGS),
    },
];

/// Find the first built-in profile matching `filename`.
#[must_use]
pub fn select_profile(filename: &str) -> Option<&'static LanguageProfile> {
    PROFILES.iter().find(|profile| profile.matches(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_patterns_must_match_exactly() {
        assert_eq!(select_profile("main.c").map(|p| p.name), Some("c"));
        assert_eq!(select_profile("dir/lib.h").map(|p| p.name), Some("c"));
        assert_eq!(select_profile("lib.rs").map(|p| p.name), Some("rust"));
        assert_eq!(select_profile("script.py").map(|p| p.name), Some("python"));
        assert!(select_profile("notes.cc").is_none());
        assert!(select_profile("archive.c.bak").is_none());
        assert!(select_profile("Makefile").is_none());
    }

    #[test]
    fn test_substring_patterns_match_anywhere() {
        static PROFILE: LanguageProfile = LanguageProfile {
            name: "make",
            file_match: &["Makefile"],
            keywords: &[],
            single_line_comment: Some("#"),
            block_comment: None,
            flags: HighlightFlags::empty(),
        };
        assert!(PROFILE.matches("src/Makefile"));
        assert!(PROFILE.matches("Makefile.am"));
        assert!(!PROFILE.matches("makefile"));
    }

    #[test]
    fn test_separators() {
        for c in b" \t\0,.()+-/*=~%<>[];" {
            assert!(is_separator(*c), "{:?}", *c as char);
        }
        for c in b"aZ09_\"'{}#" {
            assert!(!is_separator(*c), "{:?}", *c as char);
        }
    }

    #[test]
    fn test_keyword_tables_are_tagged() {
        let c = select_profile("x.c").unwrap();
        let int = c.keywords.iter().find(|k| k.text == "int").unwrap();
        assert_eq!(int.class, Highlight::Keyword2);
        let ret = c.keywords.iter().find(|k| k.text == "return").unwrap();
        assert_eq!(ret.class, Highlight::Keyword1);
    }

    #[test]
    fn test_builtin_profiles_enable_numbers_and_strings() {
        for profile in PROFILES {
            assert!(profile.flags.contains(HighlightFlags::NUMBERS | HighlightFlags::STRINGS));
        }
    }
}
