//! Precompiled regex catalogs and text helpers shared by the detectors

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Capital letter dangling before a line break
    pub static ref SINGLE_LETTER_PATTERN: Regex = Regex::new(r"\b[A-Z]\s*\n").unwrap();

    /// Letter, five or more whitespace characters, letter
    pub static ref EXCESSIVE_SPACING_PATTERN: Regex =
        Regex::new(r"[a-zA-Z]\s{5,}[a-zA-Z]").unwrap();

    pub static ref SPECIAL_CHAR_SEQUENCE_PATTERN: Regex =
        Regex::new(r"[^a-zA-Z0-9\s]{8,}").unwrap();

    pub static ref UNUSUAL_CHAR_PATTERN: Regex = Regex::new(r"[^\x00-\x7F]{5,}").unwrap();

    pub static ref SENTENCE_SPLIT_PATTERN: Regex = Regex::new(r"[.!?]\s+").unwrap();

    pub static ref FORM_LABEL_PATTERN: Regex = Regex::new(
        r"(?i)(Name|Address|Date|Phone|Email|Account|Signature|Title):"
    )
    .unwrap();

    /// One or two capitals closing a (trimmed) line
    pub static ref BROKEN_WORD_TAIL_PATTERN: Regex = Regex::new(r"\b[A-Z]{1,2}\s*$").unwrap();

    /// Two or more capitals opening a line
    pub static ref CAPITAL_LEAD_PATTERN: Regex = Regex::new(r"^\s*[A-Z]{2,}").unwrap();

    pub static ref WORD_PATTERN: Regex = Regex::new(r"\b\w+\b").unwrap();

    /// Section markers every LOA is expected to carry at least one of
    pub static ref REQUIRED_SECTIONS: Vec<(&'static str, Vec<Regex>)> = vec![
        (
            "customer_info",
            vec![
                Regex::new(r"(?i)Customer\s+Name").unwrap(),
                Regex::new(r"(?i)Customer\s+Information").unwrap(),
                Regex::new(r"To\s+be\s+completed\s+by\s+[Cc]ustomer").unwrap(),
            ],
        ),
        (
            "authorization",
            vec![
                Regex::new(r"(?i)AUTHORIZATION").unwrap(),
                Regex::new(r"[Aa]uthorize[sd]?\s+[Pp]erson").unwrap(),
                Regex::new(r"[Ss]ignature").unwrap(),
            ],
        ),
        (
            "account_info",
            vec![
                Regex::new(r"[Aa]ccount\s+[Nn]umber").unwrap(),
                Regex::new(r"[Uu]tility").unwrap(),
                Regex::new(r"[Ss]ervice\s+[Aa]ddress").unwrap(),
            ],
        ),
    ];
}

/// Words that legitimately begin a continuation line in lowercase
pub const CONTINUATION_WORDS: &[&str] = &[
    "and", "or", "the", "a", "an", "of", "to", "for", "in", "on", "at", "by",
];

/// Line endings that mark a line as complete
pub const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?', ':', ';'];

/// Character count, not byte length
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// First `n` characters of `s`
pub fn head_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Last `n` characters of `s`
pub fn tail_chars(s: &str, n: usize) -> String {
    let len = char_len(s);
    s.chars().skip(len.saturating_sub(n)).collect()
}

/// True when the token has at least one cased letter and no lowercase ones
pub fn is_uppercase_token(s: &str) -> bool {
    s.chars().any(|c| c.is_uppercase()) && !s.chars().any(|c| c.is_lowercase())
}

/// Clamp a byte index down to the nearest char boundary
pub fn floor_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Clamp a byte index up to the nearest char boundary
pub fn ceil_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index += 1;
    }
    index
}
