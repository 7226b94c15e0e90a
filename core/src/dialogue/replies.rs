//! Fixed reply texts

pub const GREETING: &str = "I'm Summery Bot, paste your long text and I'll summarize it.";
pub const ASK_LENGTH: &str =
    "How long would you like the summary to be? Please provide the number of words.";
pub const INVALID_NUMBER: &str = "Please provide a valid number for the summary length.";
pub const SUMMARIZE_FAILED: &str = "I'm sorry, I couldn't summarize the text provided.";
pub const RESUMMARIZE_FAILED: &str = "I'm sorry, I couldn't re-summarize the text provided.";
pub const CLOSING: &str = "Thank you! If you want to summarize another text, please paste it here.";
pub const ASK_RESUMMARIZE: &str = "Would you like me to re-summarize this summary? (yes/no)";
pub const RESUMMARIZE_AGAIN: &str = "Reply yes to re-summarize again, or anything else to finish.";

/// Boundary-level replies
pub const NOT_UNDERSTOOD: &str = "Sorry, I didn't understand that.";
pub const MISSING_UID: &str = "Error: 'uid' is missing from the request.";

pub fn too_short(min_words_exclusive: usize) -> String {
    format!(
        "Please provide a longer text (more than {min_words_exclusive} words) for summarization."
    )
}

pub fn out_of_range(min_length: u32, max_length: u32) -> String {
    format!("Please provide a summary length between {min_length} and {max_length} words.")
}

pub fn summary_reply(summary: &str, articles: &str) -> String {
    format!(
        "<strong>Summary:</strong> {summary}<br><br><strong>Related Articles:</strong><br>{articles}<br><br>{ASK_RESUMMARIZE}"
    )
}

pub fn resummary_reply(summary: &str, articles: &str) -> String {
    format!(
        "<strong>Re-summarized Summary:</strong> {summary}<br><br><strong>Related Articles:</strong><br>{articles}<br><br>{RESUMMARIZE_AGAIN}"
    )
}
