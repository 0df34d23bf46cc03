//! Structured summary prompt
//!
//! The instruction sent ahead of the transcript when asking the model for a
//! JSON summary.

/// Instruction block describing the reply schema
const SUMMARY_INSTRUCTION: &str = r#"You are a meeting summarizer assistant. Analyze this meeting transcript and return a JSON response with the following structure:
{
  "title": "Meeting title (infer from content)",
  "date": "Meeting date (extract from transcript or use 'Unknown')",
  "duration": "Meeting duration (extract or estimate)",
  "participants": ["List of participants mentioned"],
  "summary": "Concise meeting summary (up to 400 words)",
  "keyPoints": ["List of key points discussed"],
  "decisions": ["List of decisions made"],
  "actionItems": [
    {
      "task": "Description of task",
      "assignee": "Person assigned (or 'Unassigned')",
      "dueDate": "Due date if mentioned (or null)"
    }
  ]
}

IMPORTANT: Return ONLY valid JSON, no markdown formatting, no prefixes like ```json. The response should start with { and end with }."#;

/// Generates the structured summary prompt for a transcript
///
/// The transcript is appended verbatim after the instruction.
///
/// # Examples
///
/// ```
/// use meeting_summarizer::prompts::summary_prompt::generate_summary_prompt;
///
/// let prompt = generate_summary_prompt("Alice: hello");
/// assert!(prompt.contains("actionItems"));
/// assert!(prompt.ends_with("Alice: hello"));
/// ```
pub fn generate_summary_prompt(transcript: &str) -> String {
    format!(
        "{}\n\nHere is the transcript:\n{}",
        SUMMARY_INSTRUCTION, transcript
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_every_reply_field() {
        let prompt = generate_summary_prompt("t");
        for field in [
            "\"title\"",
            "\"date\"",
            "\"duration\"",
            "\"participants\"",
            "\"summary\"",
            "\"keyPoints\"",
            "\"decisions\"",
            "\"actionItems\"",
            "\"task\"",
            "\"assignee\"",
            "\"dueDate\"",
        ] {
            assert!(prompt.contains(field), "missing {}", field);
        }
    }

    #[test]
    fn test_prompt_forbids_markup() {
        let prompt = generate_summary_prompt("t");
        assert!(prompt.contains("Return ONLY valid JSON"));
    }

    #[test]
    fn test_prompt_keeps_transcript_verbatim() {
        let transcript = "Line one\n\n  Line two with  spaces";
        let prompt = generate_summary_prompt(transcript);
        assert!(prompt.ends_with(transcript));
    }
}
