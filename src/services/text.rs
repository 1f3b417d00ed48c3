use crate::types::{CaseStyle, CleanedText, TextStats};
use regex::{Captures, Regex};
use tracing::debug;

/// Word counting, case conversion and whitespace cleanup.
pub struct TextTools {
    sentence_break: Regex,
    sentence_start: Regex,
    word_start: Regex,
    blank_run: Regex,
    newline_run: Regex,
}

impl TextTools {
    pub fn new() -> Self {
        Self {
            sentence_break: Regex::new(r"[.!?]+").unwrap(),
            sentence_start: Regex::new(r"(^\s*\w|[.!?]\s*\w)").unwrap(),
            word_start: Regex::new(r"\b\w").unwrap(),
            blank_run: Regex::new(r"[ \t]+").unwrap(),
            newline_run: Regex::new(r"\n{3,}").unwrap(),
        }
    }

    pub fn stats(&self, text: &str) -> TextStats {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return TextStats {
                characters: text.chars().count(),
                ..TextStats::default()
            };
        }

        let sentences = self
            .sentence_break
            .split(trimmed)
            .filter(|s| !s.trim().is_empty())
            .count();

        TextStats {
            words: trimmed.split_whitespace().count(),
            characters: text.chars().count(),
            sentences,
            paragraphs: trimmed.lines().filter(|l| !l.trim().is_empty()).count(),
        }
    }

    pub fn convert_case(&self, text: &str, style: CaseStyle) -> String {
        match style {
            CaseStyle::Lower => text.to_lowercase(),
            CaseStyle::Upper => text.to_uppercase(),
            CaseStyle::Title => self
                .word_start
                .replace_all(&text.to_lowercase(), |c: &Captures| c[0].to_uppercase())
                .into_owned(),
            CaseStyle::Sentence => self
                .sentence_start
                .replace_all(&text.to_lowercase(), |c: &Captures| c[0].to_uppercase())
                .into_owned(),
        }
    }

    /// Collapses space/tab runs, caps blank lines at one, trims every line.
    pub fn remove_extra_spaces(&self, text: &str) -> CleanedText {
        let collapsed = self.blank_run.replace_all(text, " ");
        let capped = self.newline_run.replace_all(&collapsed, "\n\n");
        let cleaned = capped
            .split('\n')
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        let before = text.chars().filter(|c| c.is_whitespace()).count();
        let after = cleaned.chars().filter(|c| c.is_whitespace()).count();
        debug!("Removed {} whitespace characters", before - after);

        CleanedText {
            text: cleaned,
            spaces_removed: before - after,
        }
    }
}

impl Default for TextTools {
    fn default() -> Self {
        Self::new()
    }
}

pub fn reverse_text(text: &str) -> String {
    text.chars().rev().collect()
}
