// Severe column/page interleaving: four signals, flagged when two fire with five hits combined

use crate::patterns::{
    char_len, head_chars, is_uppercase_token, tail_chars, BROKEN_WORD_TAIL_PATTERN,
    CAPITAL_LEAD_PATTERN, CONTINUATION_WORDS, EXCESSIVE_SPACING_PATTERN, WORD_PATTERN,
};
use loa_types::{categories, IntegrityIssue};

const MIN_BROKEN_WORDS: usize = 2;
const MIN_SPACING_GAPS: usize = 3;
const MAX_SHORT_FRAGMENT_RATIO: f64 = 0.05;
const MIN_LOWERCASE_LINES: usize = 5;
const MIN_SIGNALS: usize = 2;
const MIN_TOTAL_HITS: usize = 5;

/// Running tally across the four signals
#[derive(Debug, Default)]
struct Tally {
    findings: Vec<String>,
    hits: usize,
}

impl Tally {
    /// At least two signals fired and together they produced enough hits
    fn is_severe(&self) -> bool {
        self.findings.len() >= MIN_SIGNALS && self.hits >= MIN_TOTAL_HITS
    }
}

pub fn check_interleaved_text(text: &str) -> Vec<IntegrityIssue> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut tally = Tally::default();

    let broken_words = broken_words_across_lines(&lines, &mut tally);
    spacing_gaps(&lines, &mut tally);
    short_fragment_ratio(text, &mut tally);
    lowercase_lines(&lines, &mut tally);

    if !tally.is_severe() {
        return Vec::new();
    }

    let examples = if broken_words.is_empty() {
        "N/A".to_string()
    } else {
        broken_words
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(" | ")
    };

    vec![IntegrityIssue::critical(
        categories::INTERLEAVED_TEXT_CORRUPTION,
        "Severe text interleaving detected - document appears to have mixed/overlapping text columns making it unreadable",
        format!("{}. Examples: {}", tally.findings.join("; "), examples),
    )]
}

/// Words split across a line break, e.g. "service with C" / "NE You have"
fn broken_words_across_lines(lines: &[&str], tally: &mut Tally) -> Vec<String> {
    let mut examples = Vec::new();

    for pair in lines.windows(2) {
        let current = pair[0].trim();
        let next = pair[1].trim();

        if BROKEN_WORD_TAIL_PATTERN.is_match(current)
            && CAPITAL_LEAD_PATTERN.is_match(next)
            && char_len(current) > 10
            && !current.ends_with(':')
        {
            examples.push(format!("{}|{}", tail_chars(current, 20), head_chars(next, 20)));
            tally.hits += 1;
        }
    }

    if examples.len() >= MIN_BROKEN_WORDS {
        tally.findings.push(format!(
            "Detected {} broken words across lines",
            examples.len()
        ));
    }

    examples
}

/// Wide gaps inside prose lines; lines with a colon are treated as form fields
fn spacing_gaps(lines: &[&str], tally: &mut Tally) {
    let mut gaps = 0;

    for line in lines {
        if line.contains(':') || char_len(line) <= 40 {
            continue;
        }
        let found = EXCESSIVE_SPACING_PATTERN.find_iter(line).count();
        if found > 0 {
            gaps += found;
            tally.hits += 1;
        }
    }

    if gaps >= MIN_SPACING_GAPS {
        tally
            .findings
            .push(format!("Detected {} excessive spacing gaps in text", gaps));
    }
}

fn short_fragment_ratio(text: &str, tally: &mut Tally) {
    let mut total = 0usize;
    let mut short = 0usize;

    for word in WORD_PATTERN.find_iter(text).map(|m| m.as_str()) {
        total += 1;
        let len = char_len(word);
        if (1..=2).contains(&len) && is_uppercase_token(word) {
            short += 1;
        }
    }

    if total == 0 {
        return;
    }

    let ratio = short as f64 / total as f64;
    if ratio > MAX_SHORT_FRAGMENT_RATIO {
        tally.findings.push(format!(
            "Detected high ratio ({:.1}%) of short uppercase fragments",
            ratio * 100.0
        ));
        tally.hits += 1;
    }
}

fn lowercase_lines(lines: &[&str], tally: &mut Tally) {
    let mut count = 0;

    for line in lines {
        let stripped = line.trim();
        if char_len(stripped) <= 20 {
            continue;
        }
        let starts_lower = stripped.chars().next().is_some_and(|c| c.is_lowercase());
        if !starts_lower {
            continue;
        }
        let first_word = stripped
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        if !CONTINUATION_WORDS.contains(&first_word.as_str()) {
            count += 1;
            tally.hits += 1;
        }
    }

    if count >= MIN_LOWERCASE_LINES {
        tally.findings.push(format!(
            "Detected {} text lines starting with lowercase",
            count
        ));
    }
}
