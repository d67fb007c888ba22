//! Prompt construction and the posted-comment template.
//!
//! Both templates are fixed. The model is instructed to answer with code
//! only; the posted comment wraps that answer in a fenced block and names the
//! affected range so the reviewer can place it.

use super::snippet::Snippet;

/// System instruction sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are an AI assistant that generates code based on GitHub \
     review comments. Provide only the code changes without any explanations or additional text.";

/// Builds the single-turn user prompt from the file, the commented snippet,
/// and the review comment body.
pub fn build_prompt(file_content: &str, snippet: &str, comment_body: &str) -> String {
    format!(
        "Given the following file content, code snippet, and review comment, generate code \
         changes that implement the recommendations:\n\
         \n\
         Full file content for context (DO NOT modify this entire file, focus only on the \
         snippet):\n\
         ```\n\
         {file_content}\n\
         ```\n\
         \n\
         The review comment refers to this specific snippet in the file:\n\
         ```\n\
         {snippet}\n\
         ```\n\
         \n\
         Review comment: \"{comment_body}\"\n\
         \n\
         Please provide only the updated code snippet, incorporating the suggested changes. \
         Do not include any explanations, just the updated snippet."
    )
}

/// Formats the comment posted back to the pull request.
///
/// The displayed range is the clamped one (1-based), so it always refers to
/// lines that exist in the fetched file.
pub fn format_suggestion_comment(generated: &str, snippet: &Snippet, path: &str) -> String {
    format!(
        "Here's the suggested update for the code snippet based on the review comment:\n\
         \n\
         ```\n\
         {generated}\n\
         ```\n\
         \n\
         This update addresses the comment on lines {}-{} of the file `{path}`.",
        snippet.lower + 1,
        snippet.upper,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_all_three_inputs() {
        let prompt = build_prompt("full file text", "the snippet", "please simplify");

        assert!(prompt.contains("full file text"));
        assert!(prompt.contains("the snippet"));
        assert!(prompt.contains("Review comment: \"please simplify\""));
    }

    #[test]
    fn prompt_keeps_file_and_snippet_in_separate_fences() {
        let prompt = build_prompt("FILE", "SNIPPET", "COMMENT");

        let file_pos = prompt.find("FILE").unwrap();
        let snippet_pos = prompt.find("SNIPPET").unwrap();
        assert!(file_pos < snippet_pos);
        assert_eq!(prompt.matches("```").count(), 4);
    }

    #[test]
    fn comment_embeds_snippet_range_and_path() {
        let snippet = Snippet {
            text: "b\nc".to_string(),
            lower: 1,
            upper: 3,
        };
        let comment = format_suggestion_comment("function f() {}", &snippet, "src/example.ts");

        assert!(comment.contains("```\nfunction f() {}\n```"));
        assert!(comment.contains("lines 2-3"));
        assert!(comment.contains("`src/example.ts`"));
    }
}
