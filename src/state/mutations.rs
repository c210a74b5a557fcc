use crate::api::ApiError;
use crate::models::{NewNote, Note};
use crate::query::QueryCache;
use crate::state::view::ViewState;
use crate::validation::{FormErrors, NoteForm};
use std::collections::{BTreeMap, HashMap};

pub(crate) const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this note?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MutationKind {
    Create,
    Delete,
}

/// Receipt for one create/delete invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MutationTicket {
    id: u64,
    pub kind: MutationKind,
    pub note_id: Option<String>,
    /// Modal session the create was submitted from.
    modal_session: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum MutationError {
    #[error("{0}")]
    Validation(FormErrors),
    #[error("deletion was not confirmed")]
    Declined,
    #[error("an identical request is already pending")]
    Busy,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Tracks create/delete invocations and applies their effects on the cache
/// and view once the server has answered. Nothing is changed locally before
/// that (no optimistic removal).
#[derive(Clone, Debug, Default)]
pub(crate) struct MutationCoordinator {
    next_id: u64,
    in_flight: BTreeMap<u64, MutationTicket>,
    create_error: Option<String>,
    delete_errors: HashMap<String, String>,
}

impl MutationCoordinator {
    fn issue(&mut self, kind: MutationKind, note_id: Option<String>, modal_session: Option<u64>) -> MutationTicket {
        self.next_id += 1;
        let ticket = MutationTicket {
            id: self.next_id,
            kind,
            note_id,
            modal_session,
        };
        self.in_flight.insert(ticket.id, ticket.clone());
        ticket
    }

    pub fn is_create_pending(&self) -> bool {
        self.in_flight
            .values()
            .any(|t| t.kind == MutationKind::Create)
    }

    pub fn is_delete_pending(&self, note_id: &str) -> bool {
        self.in_flight
            .values()
            .any(|t| t.kind == MutationKind::Delete && t.note_id.as_deref() == Some(note_id))
    }

    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn create_error(&self) -> Option<&str> {
        self.create_error.as_deref()
    }

    pub fn clear_create_error(&mut self) {
        self.create_error = None;
    }

    pub fn delete_error(&self, note_id: &str) -> Option<&str> {
        self.delete_errors.get(note_id).map(String::as_str)
    }

    /// Validate the form and register a create. Invalid input never reaches
    /// the gateway.
    pub fn begin_create(
        &mut self,
        form: &NoteForm,
        view: &ViewState,
    ) -> Result<(MutationTicket, NewNote), MutationError> {
        if self.is_create_pending() {
            return Err(MutationError::Busy);
        }
        let note = form.to_new_note().map_err(MutationError::Validation)?;
        self.create_error = None;
        let session = view.is_modal_open().then(|| view.modal_session());
        Ok((self.issue(MutationKind::Create, None, session), note))
    }

    /// Apply a create outcome. Success invalidates every list page and closes
    /// the modal it was submitted from, if that modal is still open. Failure
    /// leaves cache and modal untouched so the user can resubmit.
    pub fn finish_create(
        &mut self,
        ticket: &MutationTicket,
        result: Result<Note, ApiError>,
        cache: &mut QueryCache,
        view: &mut ViewState,
        now_ms: i64,
    ) -> Result<Note, ApiError> {
        self.in_flight.remove(&ticket.id);
        match result {
            Ok(note) => {
                tracing::info!(id = %note.id, "note created");
                cache.invalidate_all(now_ms);
                if let Some(session) = ticket.modal_session {
                    view.close_modal_session(session);
                }
                Ok(note)
            }
            Err(e) => {
                tracing::error!(error = %e, "error creating note");
                self.create_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Ask for confirmation, then register a delete of `note_id`.
    pub fn begin_delete(
        &mut self,
        note_id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<MutationTicket, MutationError> {
        if self.is_delete_pending(note_id) {
            return Err(MutationError::Busy);
        }
        if !confirm(DELETE_CONFIRM_MESSAGE) {
            return Err(MutationError::Declined);
        }
        self.delete_errors.remove(note_id);
        Ok(self.issue(MutationKind::Delete, Some(note_id.to_string()), None))
    }

    /// Apply a delete outcome. The list only changes through the refetch that
    /// the invalidation triggers.
    pub fn finish_delete(
        &mut self,
        ticket: &MutationTicket,
        result: Result<Note, ApiError>,
        cache: &mut QueryCache,
        now_ms: i64,
    ) -> Result<Note, ApiError> {
        self.in_flight.remove(&ticket.id);
        let note_id = ticket.note_id.clone().unwrap_or_default();
        match result {
            Ok(note) => {
                tracing::info!(id = %note.id, "note deleted");
                cache.invalidate_all(now_ms);
                Ok(note)
            }
            Err(e) => {
                tracing::error!(id = %note_id, error = %e, "error deleting note");
                self.delete_errors.insert(note_id, e.to_string());
                Err(e)
            }
        }
    }
}
