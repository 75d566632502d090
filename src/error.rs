//! Error plumbing shared by the config files and the replay runner.
//!
//! Domain operations on the roster never fail; only file I/O and script
//! parsing produce errors, and those carry the file or line they came from.
//!
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// Attach a lazily built message to an error, keeping the original as `source`.
pub trait Context<T> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T>;

    /// Prefix the error with what was being done to which file,
    /// e.g. `write theme /home/me/.config/user-manager/theme.conf: ...`.
    fn with_file(self, doing: &str, path: &Path) -> Result<T>
    where
        Self: Sized,
    {
        self.with_ctx(|| format!("{doing} {}", path.display()))
    }
}

#[derive(Debug)]
pub struct WithContextError {
    pub context: String,
    pub source: DynError,
}

impl Display for WithContextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl std::error::Error for WithContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            Box::new(WithContextError {
                context: f(),
                source: e.into(),
            }) as DynError
        })
    }
}

/// A replay script line that is not a valid action. Lines are 1-based.
#[derive(Debug)]
pub struct ScriptError {
    pub line: usize,
    pub source: serde_json::Error,
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse action on line {}: {}", self.line, self.source)
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn context_wraps_and_keeps_source() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = res.with_file("read", Path::new("actions.json")).unwrap_err();
        assert_eq!(err.to_string(), "read actions.json: gone");
        assert!(err.source().is_some());
    }

    #[test]
    fn script_error_names_the_line() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = ScriptError { line: 4, source };
        assert!(err.to_string().starts_with("parse action on line 4: "));
        assert!(err.source().is_some());
    }
}
