// ==================== DASHBOARD VIEW ====================
// Explicit state object for the admin table plus a pure derive step
// (filter + sort) and an async driver over any UserDirectory backend.
// The derived view is recomputed on every call, never cached.

use crate::client::UserDirectory;
use crate::models::{Role, UserPayload, UserRecord};

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Email,
    Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Transient last-operation banner. Success and error are mutually
/// exclusive; the next action replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Add-form fields. Reset to defaults after a successful submit; kept
/// populated on failure so the operator can correct them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Draft values for the single row in inline-edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Counts shown on the dashboard summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub employees: usize,
    pub managers: usize,
    pub admins: usize,
}

#[derive(Debug, Default)]
pub struct DashboardState {
    /// Authoritative cache of the last successful fetch, in store order.
    pub users: Vec<UserRecord>,
    pub add_form: AddForm,
    /// At most one row is editable at a time.
    pub edit: Option<EditDraft>,
    pub notice: Option<Notice>,
    pub search: String,
    pub sort: Option<SortSpec>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header click: no sort → ascending on that field; same field already
    /// ascending → descending; anything else → ascending on the clicked
    /// field.
    pub fn request_sort(&mut self, field: SortField) {
        let direction = match self.sort {
            Some(SortSpec {
                field: current,
                direction: SortDirection::Ascending,
            }) if current == field => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortSpec { field, direction });
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Copies the row's current values into the draft. Any previous unsaved
    /// draft is silently abandoned, and the notice is cleared.
    pub fn start_edit(&mut self, user: &UserRecord) {
        self.edit = Some(EditDraft {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        });
        self.notice = None;
    }

    /// Discards the draft without any store call.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Rows to display: `users` filtered case-insensitively by substring
    /// match of the search text against name, email OR role, then sorted by
    /// the active sort spec (store order when none).
    pub fn visible_users(&self) -> Vec<&UserRecord> {
        let needle = self.search.to_lowercase();

        let mut rows: Vec<&UserRecord> = self
            .users
            .iter()
            .filter(|user| {
                user.name.to_lowercase().contains(&needle)
                    || user.email.to_lowercase().contains(&needle)
                    || user.role.as_str().contains(&needle)
            })
            .collect();

        if let Some(SortSpec { field, direction }) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = sort_key(a, field).cmp(&sort_key(b, field));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        rows
    }

    /// Card counts, computed from the unfiltered list.
    pub fn summary(&self) -> Summary {
        let count = |role: Role| self.users.iter().filter(|u| u.role == role).count();
        Summary {
            total: self.users.len(),
            employees: count(Role::Employee),
            managers: count(Role::Manager),
            admins: count(Role::Admin),
        }
    }
}

// Case-insensitive comparisons, matching the table's display semantics.
fn sort_key(user: &UserRecord, field: SortField) -> String {
    match field {
        SortField::Name => user.name.to_lowercase(),
        SortField::Email => user.email.to_lowercase(),
        SortField::Role => user.role.as_str().to_string(),
    }
}

/// Async driver binding the view state to a directory backend. Every
/// mutating call awaits its own list refresh before returning, so the
/// visible rows reflect the mutation's outcome rather than a stale cache.
pub struct Dashboard<D: UserDirectory> {
    pub state: DashboardState,
    directory: D,
}

impl<D: UserDirectory> Dashboard<D> {
    pub fn new(directory: D) -> Self {
        Self {
            state: DashboardState::new(),
            directory,
        }
    }

    /// Full reload of the user list. Leaves the notice alone on success; a
    /// failed reload replaces it with the error.
    pub async fn refresh(&mut self) {
        match self.directory.get_users().await {
            Ok(users) => self.state.users = users,
            Err(e) => self.state.notice = Some(Notice::Error(e)),
        }
    }

    /// Add-form submit. On success the form resets and the list reloads; on
    /// failure the fields stay populated.
    pub async fn submit_add(&mut self) {
        let form = &self.state.add_form;
        let payload = UserPayload {
            name: form.name.clone(),
            email: form.email.clone(),
            role: Some(form.role.as_str().to_string()),
        };

        match self.directory.create_user(payload).await {
            Ok(_) => {
                self.state.notice = Some(Notice::Success("User added successfully!".into()));
                self.state.add_form = AddForm::default();
                self.refresh().await;
            }
            Err(e) => self.state.notice = Some(Notice::Error(e)),
        }
    }

    /// Saves the current edit draft. On failure the row stays in edit mode
    /// with the draft intact.
    pub async fn save_edit(&mut self) {
        let Some(draft) = self.state.edit.clone() else {
            return;
        };
        let payload = UserPayload {
            name: draft.name.clone(),
            email: draft.email.clone(),
            role: Some(draft.role.as_str().to_string()),
        };

        match self.directory.update_user(&draft.id, payload).await {
            Ok(_) => {
                self.state.notice = Some(Notice::Success("User updated successfully!".into()));
                self.state.edit = None;
                self.refresh().await;
            }
            Err(e) => self.state.notice = Some(Notice::Error(e)),
        }
    }

    /// Immediate delete, no confirmation step.
    pub async fn delete_user(&mut self, id: &str) {
        match self.directory.delete_user(id).await {
            Ok(()) => {
                self.state.notice = Some(Notice::Success("User deleted successfully!".into()));
                self.refresh().await;
            }
            Err(e) => self.state.notice = Some(Notice::Error(e)),
        }
    }
}
