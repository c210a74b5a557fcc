use serde::{Deserialize, Deserializer, Serialize};

/// Category attached to every note. The backend accepts exactly these values.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub(crate) enum NoteTag {
    #[default]
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Note {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tag: NoteTag,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// One page of the (optionally filtered) note list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct NotesPage {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
}

/// Body of `POST /notes`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NewNote {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

/// `DELETE /notes/:id` echoes the removed note under `note`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct DeleteNoteResponse {
    pub note: Note,
}

// Ids have been observed both as strings and as integers.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "note id must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_notes_page_contract_deserialize() {
        let json = r#"{
            "notes": [
                {"id": "42", "title": "Groceries", "content": "milk", "tag": "Shopping",
                 "createdAt": "2025-01-01T00:00:00Z", "updatedAt": "2025-01-01T00:00:00Z"}
            ],
            "totalPages": 3
        }"#;
        let page: NotesPage = serde_json::from_str(json).expect("notes page should parse");
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.notes.len(), 1);
        assert_eq!(page.notes[0].id, "42");
        assert_eq!(page.notes[0].tag, NoteTag::Shopping);
        assert_eq!(page.notes[0].created_at.as_deref(), Some("2025-01-01T00:00:00Z"));
    }

    #[test]
    fn test_empty_notes_page_deserialize() {
        let page: NotesPage =
            serde_json::from_str(r#"{"notes": [], "totalPages": 0}"#).expect("should parse");
        assert!(page.notes.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_note_accepts_numeric_id_and_missing_content() {
        let note: Note = serde_json::from_str(r#"{"id": 7, "title": "abc", "tag": "Work"}"#)
            .expect("should parse");
        assert_eq!(note.id, "7");
        assert_eq!(note.content, "");
        assert!(note.updated_at.is_none());
    }

    #[test]
    fn test_note_rejects_unknown_tag() {
        let res = serde_json::from_str::<Note>(r#"{"id": "1", "title": "abc", "tag": "Chores"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_delete_response_unwraps_note() {
        let json = r#"{"note": {"id": "42", "title": "Old", "content": "", "tag": "Todo"}}"#;
        let parsed: DeleteNoteResponse = serde_json::from_str(json).expect("should parse");
        assert_eq!(parsed.note.id, "42");
    }

    #[test]
    fn test_new_note_serialization() {
        let v = serde_json::to_value(NewNote {
            title: "Standup".to_string(),
            content: String::new(),
            tag: NoteTag::Meeting,
        })
        .expect("should serialize");
        assert_eq!(v, serde_json::json!({"title": "Standup", "content": "", "tag": "Meeting"}));
    }

    #[test]
    fn test_tag_string_forms() {
        let all: Vec<String> = NoteTag::iter().map(|t| t.to_string()).collect();
        assert_eq!(all, ["Todo", "Work", "Personal", "Meeting", "Shopping"]);
        assert_eq!(NoteTag::from_str("Personal"), Ok(NoteTag::Personal));
        assert!(NoteTag::from_str("personal").is_err());
        assert_eq!(NoteTag::default(), NoteTag::Todo);
    }
}
