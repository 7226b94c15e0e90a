//! Pure text helpers used by the dialogue agent

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::providers::ArticleRef;

pub const NO_ARTICLES: &str = "No related articles found.";

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Append a `.` unless the text already ends a sentence
pub fn ensure_complete_sentence(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with(['.', '!', '?']) {
        trimmed.to_string()
    } else {
        format!("{trimmed}.")
    }
}

/// First `keywords` whitespace-separated words, joined by single spaces
pub fn fallback_query(text: &str, keywords: usize) -> String {
    text.split_whitespace()
        .take(keywords)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render articles as one link per line, or the "none found" note
pub fn format_articles(articles: &[ArticleRef]) -> String {
    if articles.is_empty() {
        return NO_ARTICLES.to_string();
    }
    articles
        .iter()
        .map(|a| {
            format!(
                "- <a href=\"{}\" target=\"_blank\">{}</a><br>",
                encode_double_quoted_attribute(&a.url),
                encode_text(&a.title)
            )
        })
        .collect()
}
