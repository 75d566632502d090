//! Headless mode: fold a script of [`Action`]s through the reducer and report
//! the final state as JSON.
//!
//! A script is either a JSON array of actions or one JSON action per line,
//! e.g. `"OpenCreate"`, `{"EditField":{"Name":"Ann"}}`, `"Commit"`.
//!
use serde::Serialize;
use std::path::Path;

use crate::app::state::{Action, RosterState, reduce};
use crate::error::{Context, DynError, Result, ScriptError};
use crate::model::User;

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub state: RosterState,
    pub visible: Vec<User>,
}

pub fn parse_actions(script: &str) -> Result<Vec<Action>> {
    let trimmed = script.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).with_ctx(|| "parse action array".to_string());
    }
    script
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(n, l)| {
            serde_json::from_str(l.trim()).map_err(|source| Box::new(ScriptError { line: n + 1, source }) as DynError)
        })
        .collect()
}

pub fn replay(actions: impl IntoIterator<Item = Action>) -> RosterState {
    actions.into_iter().fold(RosterState::new(), reduce)
}

pub fn report(state: RosterState) -> ReplayReport {
    let visible = state.visible().into_iter().cloned().collect();
    ReplayReport { state, visible }
}

/// Read the script at `path`, replay it and render the report as pretty JSON.
pub fn run_file(path: &Path) -> Result<String> {
    let script = std::fs::read_to_string(path).with_file("read", path)?;
    let actions = parse_actions(&script)?;
    tracing::info!(path = %path.display(), actions = actions.len(), "replaying actions");
    let report = report(replay(actions));
    if report.state.dialog.is_open() {
        tracing::warn!("script ended with the dialog still open; draft not committed");
    }
    serde_json::to_string_pretty(&report).with_ctx(|| "encode report".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldUpdate, Status, UserId};

    #[test]
    fn parses_array_and_lines_identically() {
        let arr = r#"["OpenCreate", {"EditField": {"Name": "Ann"}}, "Commit"]"#;
        let lines = "\"OpenCreate\"\n\n{\"EditField\": {\"Name\": \"Ann\"}}\n\"Commit\"\n";
        let a = parse_actions(arr).unwrap();
        assert_eq!(a, parse_actions(lines).unwrap());
        assert_eq!(a[1], Action::EditField(FieldUpdate::Name("Ann".into())));
    }

    #[test]
    fn bad_line_reports_its_number() {
        let err = parse_actions("\"OpenCreate\"\n{nope}\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn replay_builds_filtered_report() {
        let actions = vec![
            Action::OpenCreate,
            Action::EditField(FieldUpdate::Name("Ann".into())),
            Action::EditField(FieldUpdate::Status(Some(Status::Active))),
            Action::Commit,
            Action::OpenCreate,
            Action::EditField(FieldUpdate::Name("Bob".into())),
            Action::Commit,
            Action::SetNameQuery("an".into()),
        ];
        let r = report(replay(actions));
        assert_eq!(r.state.users.len(), 2);
        assert_eq!(r.visible.len(), 1);
        assert_eq!(r.visible[0].name, "Ann");
    }

    #[test]
    fn scripts_can_target_ids_they_created() {
        let script = r#"[
            "OpenCreate", {"EditField": {"Name": "Ann"}}, "Commit",
            "OpenCreate", {"EditField": {"Name": "Bob"}}, "Commit",
            {"OpenEdit": 1}, {"EditField": {"City": "Paris"}}, "Commit",
            {"Delete": 2}
        ]"#;
        let run = || {
            let state = replay(parse_actions(script).unwrap());
            serde_json::to_string_pretty(&report(state)).unwrap()
        };
        let first = run();
        assert_eq!(first, run());

        let state = replay(parse_actions(script).unwrap());
        assert_eq!(state.users.len(), 1);
        let ann = state.users.get(UserId(1)).unwrap();
        assert_eq!(ann.city, "Paris");
        assert!(state.users.get(UserId(2)).is_none());
    }

    #[test]
    fn empty_script_is_empty_state() {
        assert!(parse_actions("  \n").unwrap().is_empty());
        assert_eq!(replay(Vec::new()), RosterState::new());
    }
}
