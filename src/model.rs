//! User records and the editable draft shown in the form dialog.
//!
//! A [`User`] lives in the [`crate::store::UserStore`]; a [`Draft`] is the
//! uncommitted copy the dialog works on. Drafts never carry an id: the id is
//! either minted on commit (create) or held by the dialog state (edit).
//!
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable identifier of a user record. Never reassigned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account status. The "empty" status is modelled as `Option::<Status>::None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }

    /// Cycle empty -> Active -> Inactive -> empty.
    pub fn cycle(current: Option<Status>) -> Option<Status> {
        match current {
            None => Some(Status::Active),
            Some(Status::Active) => Some(Status::Inactive),
            Some(Status::Inactive) => None,
        }
    }

    /// Reverse of [`Status::cycle`].
    pub fn cycle_back(current: Option<Status>) -> Option<Status> {
        match current {
            None => Some(Status::Inactive),
            Some(Status::Inactive) => Some(Status::Active),
            Some(Status::Active) => None,
        }
    }

    /// Label for an optional status; empty string when unset.
    pub fn label(status: Option<Status>) -> &'static str {
        status.map(Status::as_str).unwrap_or("")
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl Display for ParseStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown status '{}': expected Active or Inactive", self.0)
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Status::Active),
            "Inactive" => Ok(Status::Inactive),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A committed user record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub photo: String,
    pub email: String,
    pub status: Option<Status>,
    pub city: String,
}

/// Editable fields of a user, without an id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub name: String,
    pub photo: String,
    pub email: String,
    pub status: Option<Status>,
    pub city: String,
}

impl Draft {
    /// Build the full record that replaces or extends the collection.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            photo: self.photo,
            email: self.email,
            status: self.status,
            city: self.city,
        }
    }

    /// Shallow merge: change exactly one field.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(v) => self.name = v,
            FieldUpdate::Photo(v) => self.photo = v,
            FieldUpdate::Email(v) => self.email = v,
            FieldUpdate::Status(v) => self.status = v,
            FieldUpdate::City(v) => self.city = v,
        }
    }

    /// Current text of a text field. The status field yields its label.
    pub fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Photo => &self.photo,
            FormField::Email => &self.email,
            FormField::Status => Status::label(self.status),
            FormField::City => &self.city,
        }
    }
}

impl From<&User> for Draft {
    fn from(u: &User) -> Self {
        Self {
            name: u.name.clone(),
            photo: u.photo.clone(),
            email: u.email.clone(),
            status: u.status,
            city: u.city.clone(),
        }
    }
}

/// One field-level edit coming from the form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldUpdate {
    Name(String),
    Photo(String),
    Email(String),
    Status(Option<Status>),
    City(String),
}

/// Fields of the form dialog, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Photo,
    Email,
    Status,
    City,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Photo,
        FormField::Email,
        FormField::Status,
        FormField::City,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Photo => "Photo URL",
            FormField::Email => "Email",
            FormField::Status => "Status",
            FormField::City => "City",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Wrap a new text value into the update for this field. The status
    /// field is a closed choice, not text, so it has no text update.
    pub fn text_update(self, value: String) -> Option<FieldUpdate> {
        match self {
            FormField::Name => Some(FieldUpdate::Name(value)),
            FormField::Photo => Some(FieldUpdate::Photo(value)),
            FormField::Email => Some(FieldUpdate::Email(value)),
            FormField::Status => None,
            FormField::City => Some(FieldUpdate::City(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_exact_names() {
        assert_eq!("Active".parse::<Status>(), Ok(Status::Active));
        assert_eq!("Inactive".parse::<Status>(), Ok(Status::Inactive));
        assert!("active".parse::<Status>().is_err());
    }

    #[test]
    fn status_cycle_visits_every_value() {
        let mut s = None;
        let mut seen = Vec::new();
        for _ in 0..3 {
            s = Status::cycle(s);
            seen.push(s);
        }
        assert_eq!(seen, vec![Some(Status::Active), Some(Status::Inactive), None]);
        assert_eq!(Status::cycle_back(Status::cycle(Some(Status::Active))), Some(Status::Active));
    }

    #[test]
    fn field_update_touches_only_one_field() {
        let mut d = Draft {
            name: "Ann".into(),
            photo: "http://x/ann.png".into(),
            email: "ann@example.com".into(),
            status: Some(Status::Active),
            city: "Oslo".into(),
        };
        let before = d.clone();
        d.apply(FieldUpdate::City("Paris".into()));
        assert_eq!(d.city, "Paris");
        assert_eq!(d.name, before.name);
        assert_eq!(d.photo, before.photo);
        assert_eq!(d.email, before.email);
        assert_eq!(d.status, before.status);
    }

    #[test]
    fn form_field_navigation_wraps() {
        assert_eq!(FormField::City.next(), FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::City);
        assert_eq!(FormField::Photo.next().prev(), FormField::Photo);
    }

    #[test]
    fn only_text_fields_take_text() {
        assert_eq!(FormField::City.text_update("Oslo".into()), Some(FieldUpdate::City("Oslo".into())));
        assert_eq!(FormField::Status.text_update("Active".into()), None);
    }

    #[test]
    fn status_round_trips_through_json() {
        let u = User {
            id: UserId(7),
            name: "Bo".into(),
            photo: String::new(),
            email: String::new(),
            status: None,
            city: String::new(),
        };
        let json = serde_json::to_string(&u).unwrap();
        assert!(json.contains("\"id\":7"));
        assert!(json.contains("\"status\":null"));
    }
}
