//! Field rules for the "create note" form.
//!
//! Lengths are counted in characters, not bytes, so titles in non-Latin
//! scripts get the same limits.

use crate::models::{NewNote, NoteTag};
use std::str::FromStr;
use validator::{Validate, ValidationErrors};

pub(crate) const TITLE_MIN_CHARS: usize = 3;
pub(crate) const TITLE_MAX_CHARS: usize = 50;
pub(crate) const CONTENT_MAX_CHARS: usize = 500;

/// Raw form input as typed/selected by the user.
#[derive(Clone, Debug, PartialEq, Eq, Validate)]
pub(crate) struct NoteForm {
    #[validate(length(min = 3, max = 50))]
    pub title: String,
    #[validate(length(max = 500, message = "Content must be at most 500 characters"))]
    pub content: String,
    pub tag: String,
}

impl Default for NoteForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tag: NoteTag::default().to_string(),
        }
    }
}

/// Per-field messages; `None` means the field is fine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FormErrors {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tag: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tag.is_none()
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msgs: Vec<&str> = [&self.title, &self.content, &self.tag]
            .into_iter()
            .filter_map(|m| m.as_deref())
            .collect();
        write!(f, "{}", msgs.join("; "))
    }
}

// The title's single length rule covers three messages.
fn title_message(title: &str) -> String {
    if title.is_empty() {
        "Title is required".to_string()
    } else if title.chars().count() < TITLE_MIN_CHARS {
        format!("Title must be at least {TITLE_MIN_CHARS} characters")
    } else {
        format!("Title must be at most {TITLE_MAX_CHARS} characters")
    }
}

fn field_message(errors: &ValidationErrors, field: &str) -> Option<String> {
    errors
        .field_errors()
        .get(field)
        .and_then(|errs| errs.first())
        .map(|e| match &e.message {
            Some(msg) => msg.to_string(),
            None => e.code.to_string(),
        })
}

pub(crate) fn validate_tag(tag: &str) -> Result<NoteTag, String> {
    if tag.trim().is_empty() {
        return Err("Tag is required".to_string());
    }
    NoteTag::from_str(tag).map_err(|_| "Invalid tag".to_string())
}

impl NoteForm {
    pub fn errors(&self) -> FormErrors {
        let checked = Validate::validate(self).err();
        let has = |field: &str| {
            checked
                .as_ref()
                .is_some_and(|e| e.field_errors().contains_key(field))
        };

        FormErrors {
            title: has("title").then(|| title_message(&self.title)),
            content: checked.as_ref().and_then(|e| field_message(e, "content")),
            tag: validate_tag(&self.tag).err(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Turn valid input into a request body.
    pub fn to_new_note(&self) -> Result<NewNote, FormErrors> {
        let errors = self.errors();
        match validate_tag(&self.tag) {
            Ok(tag) if errors.is_empty() => Ok(NewNote {
                title: self.title.clone(),
                content: self.content.clone(),
                tag,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, content: &str, tag: &str) -> NoteForm {
        NoteForm {
            title: title.to_string(),
            content: content.to_string(),
            tag: tag.to_string(),
        }
    }

    fn title_error(title: &str) -> Option<String> {
        form(title, "", "Todo").errors().title
    }

    fn content_error(content: &str) -> Option<String> {
        form("Title", content, "Todo").errors().content
    }

    #[test]
    fn test_default_form_has_todo_tag_and_requires_title() {
        let f = NoteForm::default();
        assert_eq!(f.tag, "Todo");
        assert_eq!(f.errors().title.as_deref(), Some("Title is required"));
        assert!(!f.is_valid());
    }

    #[test]
    fn test_title_bounds() {
        assert_eq!(
            title_error("ab").as_deref(),
            Some("Title must be at least 3 characters")
        );
        assert_eq!(title_error("abc"), None);
        assert_eq!(title_error(&"x".repeat(TITLE_MAX_CHARS)), None);
        assert_eq!(
            title_error(&"x".repeat(TITLE_MAX_CHARS + 1)).as_deref(),
            Some("Title must be at most 50 characters")
        );
    }

    #[test]
    fn test_whitespace_title_counts_its_characters() {
        assert_eq!(title_error("   "), None);
        assert!(form("   ", "", "Todo").is_valid());
        assert_eq!(
            title_error("  ").as_deref(),
            Some("Title must be at least 3 characters")
        );
    }

    #[test]
    fn test_title_length_counts_characters() {
        // 3 chars, 9 bytes.
        assert_eq!(title_error("日本語"), None);
    }

    #[test]
    fn test_content_limit() {
        assert_eq!(content_error(""), None);
        assert_eq!(content_error(&"c".repeat(CONTENT_MAX_CHARS)), None);
        assert_eq!(
            content_error(&"c".repeat(CONTENT_MAX_CHARS + 1)).as_deref(),
            Some("Content must be at most 500 characters")
        );
    }

    #[test]
    fn test_tag_must_be_known() {
        assert_eq!(validate_tag("Shopping"), Ok(NoteTag::Shopping));
        assert_eq!(validate_tag(""), Err("Tag is required".to_string()));
        assert_eq!(validate_tag("Errands"), Err("Invalid tag".to_string()));
    }

    #[test]
    fn test_to_new_note_builds_request_body() {
        let note = form("Standup", "", "Meeting").to_new_note().expect("valid");
        assert_eq!(
            note,
            NewNote {
                title: "Standup".to_string(),
                content: String::new(),
                tag: NoteTag::Meeting,
            }
        );
    }

    #[test]
    fn test_to_new_note_reports_every_bad_field() {
        let errors = form("a", &"c".repeat(600), "Nope")
            .to_new_note()
            .expect_err("invalid");
        assert!(errors.title.is_some());
        assert!(errors.content.is_some());
        assert!(errors.tag.is_some());
        assert_eq!(
            errors.to_string(),
            "Title must be at least 3 characters; Content must be at most 500 characters; Invalid tag"
        );
    }
}
