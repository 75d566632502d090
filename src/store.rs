//! In-memory collection of user records, kept in insertion order.
//!
//! All operations are total: replacing or removing an id that is not present
//! leaves the collection untouched. The boolean results only tell the caller
//! whether anything matched, so it can be logged.
//!
use serde::{Deserialize, Serialize};

use crate::model::{Draft, User, UserId};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStore {
    users: Vec<User>,
    #[serde(default)]
    last_id: u64,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store whose first minted id is `floor + 1`.
    pub fn starting_after(floor: u64) -> Self {
        Self { users: Vec::new(), last_id: floor }
    }

    /// Append a new record built from `draft` and return its freshly minted id.
    /// No uniqueness check on business fields: duplicate emails are fine.
    pub fn add(&mut self, draft: Draft) -> UserId {
        let id = self.mint_id();
        self.users.push(draft.into_user(id));
        tracing::debug!(%id, len = self.users.len(), "user added");
        id
    }

    /// Overwrite the record with `id` in place. The stored record keeps `id`
    /// even if `user.id` differs. Returns `false` (and changes nothing) when absent.
    pub fn replace(&mut self, id: UserId, user: User) -> bool {
        match self.users.iter_mut().find(|u| u.id == id) {
            Some(slot) => {
                *slot = User { id, ..user };
                tracing::debug!(%id, "user replaced");
                true
            }
            None => {
                tracing::debug!(%id, "replace ignored: no such user");
                false
            }
        }
    }

    /// Remove the record with `id`. Returns `false` when absent.
    pub fn remove(&mut self, id: UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        let removed = self.users.len() != before;
        if removed {
            tracing::debug!(%id, len = self.users.len(), "user removed");
        } else {
            tracing::debug!(%id, "remove ignored: no such user");
        }
        removed
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn position(&self, id: UserId) -> Option<usize> {
        self.users.iter().position(|u| u.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.users.iter()
    }

    pub fn as_slice(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Next id above every id handed out or present. The store never reads
    /// the clock, so the same sequence of adds always yields the same ids.
    fn mint_id(&mut self) -> UserId {
        let floor = self
            .users
            .iter()
            .map(|u| u.id.0)
            .max()
            .unwrap_or(0)
            .max(self.last_id);
        let id = floor.saturating_add(1);
        self.last_id = id;
        UserId(id)
    }
}

impl<'a> IntoIterator for &'a UserStore {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.iter()
    }
}
