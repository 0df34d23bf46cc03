//! Fixed conversation messages
//!
//! Text for the synthetic turns the assistant adds around user actions.

/// First turn of every conversation
pub const GREETING: &str = "Hello! I'm your Meeting Summarizer Assistant. You can upload a meeting transcript (PDF) or paste text, and I'll help you extract key information, action items, and create a summary.";

/// User turn added when a summary is requested
pub const SUMMARY_REQUEST: &str = "Please analyze this meeting transcript and generate a complete summary with action items, participants, decisions, and key points.";

/// Assistant turn added when summarization fails
pub const SUMMARY_ERROR: &str = "I'm sorry, but I encountered an error while generating the meeting summary. Please try again.";

/// Assistant turn added when a chat reply has no text
pub const EMPTY_REPLY: &str = "Sorry, I couldn't understand that.";

/// Assistant turn added when a chat request fails
pub const CHAT_ERROR: &str = "Error fetching response. Please try again.";

/// User turn added when text is pasted
pub const PASTED_ACK_USER: &str = "I've pasted a meeting transcript.";

const NEXT_STEPS: &str = "Would you like me to summarize it for you, extract action items, or analyze specific aspects of the meeting?";

/// User turn added when a document is uploaded
pub fn uploaded_ack_user(file_name: &str) -> String {
    format!("I've uploaded a meeting transcript: {}", file_name)
}

/// Assistant turn acknowledging an uploaded document
pub fn uploaded_ack_assistant(file_name: &str) -> String {
    format!(
        "I've received your meeting transcript \"{}\". {}",
        file_name, NEXT_STEPS
    )
}

/// Assistant turn acknowledging pasted text
pub fn pasted_ack_assistant() -> String {
    format!("I've received your meeting transcript. {}", NEXT_STEPS)
}
