//! Name search and status filter over the user collection.
//!
//! The visible view is a pure projection recomputed on every render; nothing
//! is cached, so there is no index to keep in sync with the store.
//!
use serde::{Deserialize, Serialize};

use crate::model::{Status, User};
use crate::store::UserStore;

/// The two independent filter values shown in the toolbar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Case-insensitive substring of the user name. Empty matches everything.
    pub name_query: String,
    /// Exact status to match. `None` matches everything.
    pub status: Option<Status>,
}

/// Whether `user` passes both filters.
pub fn matches(user: &User, name_query: &str, status: Option<Status>) -> bool {
    let name_ok = name_query.is_empty() || user.name.to_lowercase().contains(&name_query.to_lowercase());
    name_ok && status.is_none_or(|s| user.status == Some(s))
}

/// Records whose name contains `name_query` (ignoring case) and whose status
/// equals `status` when one is given, in collection order.
pub fn view<'a>(store: &'a UserStore, name_query: &str, status: Option<Status>) -> Vec<&'a User> {
    store.iter().filter(|u| matches(u, name_query, status)).collect()
}

/// [`view`] driven by a [`Filters`] value.
pub fn visible_users<'a>(store: &'a UserStore, filters: &Filters) -> Vec<&'a User> {
    view(store, &filters.name_query, filters.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Draft;

    fn mk_store(rows: &[(&str, Option<Status>)]) -> UserStore {
        let mut s = UserStore::new();
        for (name, status) in rows {
            s.add(Draft { name: name.to_string(), status: *status, ..Draft::default() });
        }
        s
    }

    fn names(v: &[&User]) -> Vec<String> {
        v.iter().map(|u| u.name.clone()).collect()
    }

    #[test]
    fn name_search_ignores_case() {
        let s = mk_store(&[("Ann", None), ("Joanna", None), ("Bob", None)]);
        assert_eq!(names(&view(&s, "AN", None)), ["Ann", "Joanna"]);
        assert_eq!(names(&view(&s, "bOb", None)), ["Bob"]);
    }

    #[test]
    fn empty_filters_return_everything_in_order() {
        let s = mk_store(&[("c", None), ("a", Some(Status::Active)), ("b", Some(Status::Inactive))]);
        assert_eq!(names(&visible_users(&s, &Filters::default())), ["c", "a", "b"]);
    }

    #[test]
    fn status_filter_excludes_empty_status() {
        let s = mk_store(&[("a", Some(Status::Active)), ("b", None), ("c", Some(Status::Inactive))]);
        assert_eq!(names(&view(&s, "", Some(Status::Active))), ["a"]);
        assert_eq!(names(&view(&s, "", Some(Status::Inactive))), ["c"]);
    }

    #[test]
    fn both_filters_must_hold() {
        let s = mk_store(&[("Ann", Some(Status::Active)), ("Anna", Some(Status::Inactive))]);
        let f = Filters { name_query: "ann".into(), status: Some(Status::Inactive) };
        assert_eq!(names(&visible_users(&s, &f)), ["Anna"]);
        assert!(matches(s.as_slice().first().unwrap(), "ann", Some(Status::Active)));
        assert!(!matches(s.as_slice().first().unwrap(), "ann", Some(Status::Inactive)));
    }

    #[test]
    fn no_match_yields_empty_view() {
        let s = mk_store(&[("Ann", None)]);
        assert!(view(&s, "zzz", None).is_empty());
    }
}
