//! Serializable roster state and the reducer that drives it.
//!
//! Everything the screen shows about users lives in [`RosterState`]: the
//! collection, the two filters and the dialog. Every change goes through
//! [`RosterState::apply`] (or the by-value [`reduce`]), which makes the whole
//! screen testable without a terminal.
//!
use serde::{Deserialize, Serialize};

use crate::model::{Draft, FieldUpdate, Status, User, UserId};
use crate::search::{self, Filters};
use crate::store::UserStore;

/// The add/edit dialog. At most one draft exists at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogState {
    #[default]
    Closed,
    Creating {
        draft: Draft,
    },
    Editing {
        id: UserId,
        draft: Draft,
    },
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            DialogState::Closed => None,
            DialogState::Creating { draft } | DialogState::Editing { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            DialogState::Closed => None,
            DialogState::Creating { draft } | DialogState::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DialogState::Editing { .. } => "Edit User",
            _ => "Add User",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            DialogState::Editing { .. } => "Save",
            _ => "Add",
        }
    }
}

/// Everything a user can do to the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    SetNameQuery(String),
    SetStatusFilter(Option<Status>),
    ClearFilters,
    OpenCreate,
    OpenEdit(UserId),
    EditField(FieldUpdate),
    Commit,
    Cancel,
    Delete(UserId),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterState {
    pub users: UserStore,
    pub filters: Filters,
    pub dialog: DialogState,
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The filtered rows the table shows, in collection order.
    pub fn visible(&self) -> Vec<&User> {
        search::visible_users(&self.users, &self.filters)
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetNameQuery(q) => self.filters.name_query = q,
            Action::SetStatusFilter(s) => self.filters.status = s,
            Action::ClearFilters => self.filters = Filters::default(),
            Action::OpenCreate => {
                if !self.dialog.is_open() {
                    self.dialog = DialogState::Creating { draft: Draft::default() };
                    tracing::debug!("dialog opened: create");
                }
            }
            Action::OpenEdit(id) => {
                if self.dialog.is_open() {
                    return;
                }
                match self.users.get(id) {
                    Some(user) => {
                        self.dialog = DialogState::Editing { id, draft: Draft::from(user) };
                        tracing::debug!(%id, "dialog opened: edit");
                    }
                    None => tracing::debug!(%id, "edit ignored: no such user"),
                }
            }
            Action::EditField(update) => {
                if let Some(draft) = self.dialog.draft_mut() {
                    draft.apply(update);
                }
            }
            Action::Commit => match std::mem::take(&mut self.dialog) {
                DialogState::Closed => {}
                DialogState::Creating { draft } => {
                    self.users.add(draft);
                }
                DialogState::Editing { id, draft } => {
                    self.users.replace(id, draft.into_user(id));
                }
            },
            Action::Cancel => {
                if self.dialog.is_open() {
                    tracing::debug!("dialog cancelled");
                }
                self.dialog = DialogState::Closed;
            }
            Action::Delete(id) => {
                self.users.remove(id);
            }
        }
    }
}

/// By-value reducer: `(state, action) -> state`.
pub fn reduce(mut state: RosterState, action: Action) -> RosterState {
    state.apply(action);
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_user(name: &str, status: Option<Status>) -> (RosterState, UserId) {
        let mut s = RosterState::new();
        s.apply(Action::OpenCreate);
        s.apply(Action::EditField(FieldUpdate::Name(name.into())));
        s.apply(Action::EditField(FieldUpdate::Status(status)));
        s.apply(Action::Commit);
        let id = s.users.iter().next().map(|u| u.id).unwrap();
        (s, id)
    }

    #[test]
    fn open_create_starts_from_empty_draft() {
        let s = reduce(RosterState::new(), Action::OpenCreate);
        assert_eq!(s.dialog, DialogState::Creating { draft: Draft::default() });
        assert_eq!(s.dialog.title(), "Add User");
        assert_eq!(s.dialog.submit_label(), "Add");
    }

    #[test]
    fn commit_in_create_mode_appends_and_closes() {
        let (s, id) = with_user("Ann", Some(Status::Active));
        assert_eq!(s.users.len(), 1);
        assert_eq!(s.dialog, DialogState::Closed);
        assert_eq!(s.users.get(id).map(|u| u.name.as_str()), Some("Ann"));
    }

    #[test]
    fn create_draft_resets_after_commit() {
        let (mut s, _) = with_user("Ann", None);
        s.apply(Action::OpenCreate);
        assert_eq!(s.dialog.draft(), Some(&Draft::default()));
    }

    #[test]
    fn edit_draft_is_isolated_until_commit() {
        let (mut s, id) = with_user("Ann", Some(Status::Active));
        s.apply(Action::OpenEdit(id));
        assert_eq!(s.dialog.title(), "Edit User");
        s.apply(Action::EditField(FieldUpdate::City("Paris".into())));
        assert_eq!(s.users.get(id).map(|u| u.city.as_str()), Some(""));
        s.apply(Action::Commit);
        assert_eq!(s.users.get(id).map(|u| u.city.as_str()), Some("Paris"));
        assert_eq!(s.users.len(), 1);
    }

    #[test]
    fn cancel_discards_edit_draft() {
        let (mut s, id) = with_user("Ann", None);
        let before = s.users.clone();
        s.apply(Action::OpenEdit(id));
        s.apply(Action::EditField(FieldUpdate::Name("Changed".into())));
        s.apply(Action::Cancel);
        assert_eq!(s.users, before);
        assert!(!s.dialog.is_open());
    }

    #[test]
    fn cancel_discards_create_draft() {
        let mut s = RosterState::new();
        s.apply(Action::OpenCreate);
        s.apply(Action::EditField(FieldUpdate::Name("Ghost".into())));
        s.apply(Action::Cancel);
        assert!(s.users.is_empty());
        s.apply(Action::OpenCreate);
        assert_eq!(s.dialog.draft(), Some(&Draft::default()));
    }

    #[test]
    fn open_is_ignored_while_dialog_open() {
        let (mut s, id) = with_user("Ann", None);
        s.apply(Action::OpenCreate);
        s.apply(Action::OpenEdit(id));
        assert!(matches!(s.dialog, DialogState::Creating { .. }));
    }

    #[test]
    fn open_edit_for_missing_id_stays_closed() {
        let (mut s, id) = with_user("Ann", None);
        s.apply(Action::OpenEdit(UserId(id.0 + 1)));
        assert_eq!(s.dialog, DialogState::Closed);
    }

    #[test]
    fn commit_after_source_deleted_is_silent() {
        let (mut s, id) = with_user("Ann", None);
        s.apply(Action::OpenEdit(id));
        s.apply(Action::Delete(id));
        s.apply(Action::EditField(FieldUpdate::Name("Back".into())));
        s.apply(Action::Commit);
        assert!(s.users.is_empty());
        assert_eq!(s.dialog, DialogState::Closed);
    }

    #[test]
    fn field_edits_and_commit_are_ignored_when_closed() {
        let (s, _) = with_user("Ann", None);
        let after = reduce(reduce(s.clone(), Action::EditField(FieldUpdate::Name("x".into()))), Action::Commit);
        assert_eq!(after, s);
    }

    #[test]
    fn filters_drive_visible_rows() {
        let (mut s, _) = with_user("Ann", Some(Status::Active));
        s.apply(Action::SetNameQuery("an".into()));
        assert_eq!(s.visible().len(), 1);
        s.apply(Action::SetStatusFilter(Some(Status::Inactive)));
        assert!(s.visible().is_empty());
        s.apply(Action::ClearFilters);
        assert_eq!(s.filters, Filters::default());
        assert_eq!(s.visible().len(), 1);
    }

    #[test]
    fn state_serializes_dialog_as_tagged_variant() {
        let s = reduce(RosterState::new(), Action::OpenCreate);
        let json = serde_json::to_value(&s).unwrap();
        assert!(json["dialog"]["Creating"]["draft"].is_object());
        let back: RosterState = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }
}
