//! Summary records and the raw model reply

use serde::{Deserialize, Serialize};

/// A task derived from the meeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    /// Position within its summary, starting at 1
    pub id: u32,
    /// Task description
    pub task: String,
    /// Person responsible
    pub assignee: String,
    /// Due date as the model reported it
    pub due_date: Option<String>,
    /// Completion flag
    pub completed: bool,
}

/// A generated meeting summary as stored in the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummary {
    /// Unique summary ID
    pub id: i64,
    /// Meeting title
    pub title: String,
    /// Meeting date
    pub date: String,
    /// Meeting duration
    pub duration: String,
    /// Prose summary
    pub summary: String,
    /// Action items, numbered from 1
    pub action_items: Vec<ActionItem>,
    /// Participant names in reply order
    pub participants: Vec<String>,
    /// Decisions in reply order
    pub decisions: Vec<String>,
    /// Full transcript the summary was generated from
    pub raw_transcript: String,
}

impl MeetingSummary {
    /// Number of completed action items
    pub fn completed_count(&self) -> usize {
        self.action_items.iter().filter(|item| item.completed).count()
    }

    /// Look up an action item by ID
    pub fn action_item(&self, item_id: u32) -> Option<&ActionItem> {
        self.action_items.iter().find(|item| item.id == item_id)
    }

    /// Return a copy with one action item's completion flipped
    ///
    /// Returns `None` when no item has `item_id`. Every other field of the
    /// returned record is equal to `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use meeting_summarizer::summary::{ActionItem, MeetingSummary};
    ///
    /// let summary = MeetingSummary {
    ///     id: 1,
    ///     title: "Sync".into(),
    ///     date: "1/5/2024".into(),
    ///     duration: "30 min".into(),
    ///     summary: String::new(),
    ///     action_items: vec![ActionItem {
    ///         id: 1,
    ///         task: "Send report".into(),
    ///         assignee: "Alice".into(),
    ///         due_date: None,
    ///         completed: false,
    ///     }],
    ///     participants: vec![],
    ///     decisions: vec![],
    ///     raw_transcript: String::new(),
    /// };
    /// let toggled = summary.with_item_toggled(1).unwrap();
    /// assert!(toggled.action_items[0].completed);
    /// assert!(!summary.action_items[0].completed);
    /// ```
    pub fn with_item_toggled(&self, item_id: u32) -> Option<Self> {
        self.action_item(item_id)?;

        let action_items = self
            .action_items
            .iter()
            .map(|item| {
                if item.id == item_id {
                    ActionItem {
                        completed: !item.completed,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();

        Some(Self {
            action_items,
            ..self.clone()
        })
    }
}

/// Action item as the model returned it
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyActionItem {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Decoded model reply before defaults are applied
///
/// Every field is optional; normalization fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReply {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub participants: Option<Vec<String>>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_points: Option<Vec<String>>,
    #[serde(default)]
    pub decisions: Option<Vec<String>>,
    #[serde(default)]
    pub action_items: Option<Vec<ReplyActionItem>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MeetingSummary {
        MeetingSummary {
            id: 7,
            title: "Planning".to_string(),
            date: "2024-01-05".to_string(),
            duration: "30 min".to_string(),
            summary: "We planned.".to_string(),
            action_items: vec![
                ActionItem {
                    id: 1,
                    task: "Send report".to_string(),
                    assignee: "Alice".to_string(),
                    due_date: Some("Friday".to_string()),
                    completed: false,
                },
                ActionItem {
                    id: 2,
                    task: "Book room".to_string(),
                    assignee: "Unassigned".to_string(),
                    due_date: None,
                    completed: true,
                },
            ],
            participants: vec!["Alice".to_string(), "Bob".to_string()],
            decisions: vec!["Ship it".to_string()],
            raw_transcript: "transcript".to_string(),
        }
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("actionItems").is_some());
        assert!(json.get("rawTranscript").is_some());
        assert_eq!(json["actionItems"][0]["dueDate"], "Friday");
        assert!(json["actionItems"][1]["dueDate"].is_null());
    }

    #[test]
    fn test_with_item_toggled_changes_only_that_flag() {
        let original = sample();
        let toggled = original.with_item_toggled(1).unwrap();

        assert!(toggled.action_items[0].completed);
        assert_eq!(toggled.action_items[1], original.action_items[1]);

        let mut expected = original.clone();
        expected.action_items[0].completed = true;
        assert_eq!(toggled, expected);
    }

    #[test]
    fn test_with_item_toggled_twice_restores() {
        let original = sample();
        let back = original
            .with_item_toggled(2)
            .and_then(|s| s.with_item_toggled(2))
            .unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_with_item_toggled_unknown_item() {
        assert!(sample().with_item_toggled(99).is_none());
    }

    #[test]
    fn test_completed_count() {
        assert_eq!(sample().completed_count(), 1);
    }

    #[test]
    fn test_reply_accepts_nulls_and_missing_fields() {
        let reply: SummaryReply =
            serde_json::from_str(r#"{"title":null,"actionItems":[{"task":"x","dueDate":null}]}"#)
                .unwrap();
        assert!(reply.title.is_none());
        assert!(reply.participants.is_none());
        let items = reply.action_items.unwrap();
        assert_eq!(items[0].task.as_deref(), Some("x"));
        assert!(items[0].due_date.is_none());
    }
}
