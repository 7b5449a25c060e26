//! FFI use-case API for the Flutter board shell.
//!
//! # Responsibility
//! - Own the one project board of a running application.
//! - Expose form submission, drag-and-drop and partition listing as
//!   synchronous calls with plain string/struct envelopes.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - The board is created on first access and lives for the process.
//! - Validation failures are reported in the envelope, never as errors.

use projboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    DragPayload, FormRules, FormRulesError, ProjectCard, ProjectForm, ProjectFormInput,
    ProjectListView, ProjectStatus, ProjectStore, StatusChange, PROJECT_DRAG_MIME,
};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

const RULES_PATH_ENV: &str = "PROJBOARD_RULES_PATH";

static BOARD: OnceLock<Mutex<Board>> = OnceLock::new();

/// Composition root: one store plus the two partition views bound to it.
struct Board {
    store: ProjectStore,
    form: ProjectForm,
    active: ProjectListView,
    ended: ProjectListView,
}

impl Board {
    fn new(rules: FormRules) -> Self {
        let mut store = ProjectStore::new();
        let active = ProjectListView::attach(&mut store, ProjectStatus::Active);
        let ended = ProjectListView::attach(&mut store, ProjectStatus::Ended);
        Self {
            store,
            form: ProjectForm::new(rules),
            active,
            ended,
        }
    }

    fn view(&self, status: ProjectStatus) -> &ProjectListView {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Ended => &self.ended,
        }
    }

    fn submit(&mut self, input: &ProjectFormInput) -> BoardActionResponse {
        match self.form.submit(&mut self.store, input) {
            Ok(id) => BoardActionResponse::success("Project added.", id.to_string(), true),
            Err(errors) => BoardActionResponse {
                invalid_fields: errors
                    .fields()
                    .into_iter()
                    .map(|field| field.as_str().to_string())
                    .collect(),
                ..BoardActionResponse::failure(errors.to_string())
            },
        }
    }

    fn drop_project(&mut self, project_id: &str, status: ProjectStatus) -> BoardActionResponse {
        let payload = DragPayload {
            mime: PROJECT_DRAG_MIME.to_string(),
            data: project_id.to_string(),
        };
        let view = match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Ended => &self.ended,
        };
        match view.drop_project(&mut self.store, &payload) {
            StatusChange::Changed { from, to } => BoardActionResponse::success(
                format!("Project moved from {from} to {to}."),
                payload.data,
                true,
            ),
            StatusChange::Unchanged => BoardActionResponse::success(
                format!("Project already {status}."),
                payload.data,
                false,
            ),
            StatusChange::NotFound => BoardActionResponse {
                ok: true,
                ..BoardActionResponse::failure("No matching project.")
            },
        }
    }

    fn configure_rules(&mut self, rules_json: &str) -> Result<(), FormRulesError> {
        self.form = ProjectForm::new(FormRules::from_json(rules_json)?);
        Ok(())
    }
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Render-ready project card for one list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardProjectItem {
    /// Stable project ID in string form; also the drag payload.
    pub project_id: String,
    pub title: String,
    pub description: String,
    /// e.g. `3 members assigned`.
    pub members_label: String,
}

/// Listing envelope for one partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardListResponse {
    pub ok: bool,
    /// List element id, e.g. `active-projects-list`.
    pub list_id: String,
    pub heading: String,
    pub items: Vec<BoardProjectItem>,
    pub message: String,
}

/// Generic action envelope for submit and drop calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    /// Whether the request was accepted.
    pub ok: bool,
    /// Affected project ID; `None` when no project matched.
    pub project_id: Option<String>,
    /// Whether board state changed (project added or moved).
    pub changed: bool,
    /// Invalid form fields (`title|description|people`), empty on success.
    pub invalid_fields: Vec<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl BoardActionResponse {
    fn success(message: impl Into<String>, project_id: String, changed: bool) -> Self {
        Self {
            ok: true,
            project_id: Some(project_id),
            changed,
            invalid_fields: Vec::new(),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            project_id: None,
            changed: false,
            invalid_fields: Vec::new(),
            message: message.into(),
        }
    }
}

/// Validates form input and adds the project to the active partition.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
/// - On rejection, `invalid_fields` names every failed field.
#[flutter_rust_bridge::frb(sync)]
pub fn board_submit_project(
    title: String,
    description: String,
    people: String,
) -> BoardActionResponse {
    let input = ProjectFormInput::new(title, description, people);
    lock_board().submit(&input)
}

/// Drops one dragged project onto the `target_status` list.
///
/// # FFI contract
/// - `target_status`: `active|ended` (case-insensitive).
/// - Unknown ids and drops onto the current list succeed as no-ops with
///   `changed=false`; unknown ids also return `project_id=None`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_drop_project(project_id: String, target_status: String) -> BoardActionResponse {
    let status = match ProjectStatus::parse(&target_status) {
        Ok(status) => status,
        Err(err) => {
            return BoardActionResponse::failure(format!("board_drop_project failed: {err}"))
        }
    };
    lock_board().drop_project(project_id.trim(), status)
}

/// Lists one partition as render-ready items.
///
/// # FFI contract
/// - `status`: `active|ended` (case-insensitive).
/// - Never panics; unknown status returns `ok=false` with no items.
#[flutter_rust_bridge::frb(sync)]
pub fn board_list(status: String) -> BoardListResponse {
    let status = match ProjectStatus::parse(&status) {
        Ok(status) => status,
        Err(err) => {
            return BoardListResponse {
                ok: false,
                list_id: String::new(),
                heading: String::new(),
                items: Vec::new(),
                message: format!("board_list failed: {err}"),
            }
        }
    };

    let board = lock_board();
    let view = board.view(status);
    let items = view
        .cards()
        .into_iter()
        .map(to_board_item)
        .collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No projects.".to_string()
    } else {
        format!("{} project(s).", items.len())
    };
    BoardListResponse {
        ok: true,
        list_id: view.list_id(),
        heading: view.heading().to_string(),
        items,
        message,
    }
}

/// Replaces form rules with JSON configuration.
///
/// # FFI contract
/// - Returns empty string on success and error message on failure.
/// - Existing projects are not re-validated.
#[flutter_rust_bridge::frb(sync)]
pub fn board_configure_rules(rules_json: String) -> String {
    match lock_board().configure_rules(&rules_json) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

fn lock_board() -> MutexGuard<'static, Board> {
    BOARD
        .get_or_init(|| Mutex::new(Board::new(resolve_initial_rules())))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn resolve_initial_rules() -> FormRules {
    rules_from_path(std::env::var(RULES_PATH_ENV).ok().as_deref())
}

/// Loads form rules from a JSON file, falling back to defaults when the
/// path is unset, blank, unreadable or holds invalid rules.
fn rules_from_path(path: Option<&str>) -> FormRules {
    let Some(path) = path.map(str::trim).filter(|path| !path.is_empty()) else {
        return FormRules::default();
    };

    let loaded = std::fs::read_to_string(path)
        .map_err(|err| err.to_string())
        .and_then(|raw| FormRules::from_json(&raw).map_err(|err| err.to_string()));
    match loaded {
        Ok(rules) => rules,
        Err(err) => {
            log::warn!("event=rules_load module=ffi status=error fallback=default error={err}");
            FormRules::default()
        }
    }
}

fn to_board_item(card: ProjectCard) -> BoardProjectItem {
    BoardProjectItem {
        project_id: card.id.to_string(),
        title: card.title,
        description: card.description,
        members_label: card.members_label,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        board_configure_rules, board_drop_project, board_list, board_submit_project,
        core_version, init_logging, ping, rules_from_path, Board,
    };
    use projboard_core::{BoundMode, FormRules, ProjectFormInput, ProjectStatus};
    use std::io::Write;
    use std::time::{SystemTime, UNIX_EPOCH};

    const EXCLUSIVE_PEOPLE_RULES: &str =
        r#"{"people": {"required": true, "min": 1, "max": 5, "bounds": "exclusive"}}"#;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/projboard-logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn submit_then_drop_moves_project_to_ended_list() {
        let title = unique_token("website");
        let created = board_submit_project(
            title.clone(),
            "Redesign landing page".to_string(),
            "3".to_string(),
        );
        assert!(created.ok, "{}", created.message);
        let project_id = created.project_id.expect("submit should return project_id");

        let active = board_list("active".to_string());
        assert!(active.ok);
        assert_eq!(active.list_id, "active-projects-list");
        let item = active
            .items
            .iter()
            .find(|item| item.project_id == project_id)
            .expect("new project should be active");
        assert_eq!(item.title, title);
        assert_eq!(item.members_label, "3 members assigned");

        let moved = board_drop_project(project_id.clone(), "Ended".to_string());
        assert!(moved.ok, "{}", moved.message);
        assert!(moved.changed);
        assert_eq!(moved.project_id.as_deref(), Some(project_id.as_str()));

        let again = board_drop_project(project_id.clone(), "ended".to_string());
        assert!(again.ok);
        assert!(!again.changed);
        assert!(again.message.contains("already"));

        let ended = board_list("ended".to_string());
        assert!(ended.items.iter().any(|item| item.project_id == project_id));
        let active = board_list("active".to_string());
        assert!(!active.items.iter().any(|item| item.project_id == project_id));
    }

    #[test]
    fn submit_reports_invalid_fields() {
        let response =
            board_submit_project(String::new(), "short".to_string(), "x".to_string());
        assert!(!response.ok);
        assert_eq!(response.project_id, None);
        assert_eq!(
            response.invalid_fields,
            vec!["title".to_string(), "description".to_string(), "people".to_string()]
        );
    }

    #[test]
    fn drop_with_unknown_id_is_a_noop() {
        let response = board_drop_project("not-a-project".to_string(), "ended".to_string());
        assert!(response.ok);
        assert!(!response.changed);
        assert_eq!(response.project_id, None);
        assert_eq!(response.message, "No matching project.");
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(!board_list("archived".to_string()).ok);
        assert!(!board_drop_project("x".to_string(), "archived".to_string()).ok);
    }

    #[test]
    fn configure_rules_rejects_malformed_json() {
        assert!(!board_configure_rules("{".to_string()).is_empty());
    }

    #[test]
    fn configured_rules_change_what_submission_accepts() {
        let mut board = Board::new(FormRules::default());
        let input = ProjectFormInput::new("Website", "Redesign landing page", "5");

        let accepted = board.submit(&input);
        assert!(accepted.ok, "{}", accepted.message);
        assert!(accepted.changed);

        board
            .configure_rules(EXCLUSIVE_PEOPLE_RULES)
            .expect("rules should parse");
        let rejected = board.submit(&input);
        assert!(!rejected.ok);
        assert!(!rejected.changed);
        assert_eq!(rejected.invalid_fields, vec!["people".to_string()]);
        assert_eq!(board.view(ProjectStatus::Active).projects().len(), 1);
    }

    #[test]
    fn malformed_rules_keep_previous_form() {
        let mut board = Board::new(FormRules::default());
        assert!(board.configure_rules("{").is_err());
        let response = board.submit(&ProjectFormInput::new(
            "Website",
            "Redesign landing page",
            "5",
        ));
        assert!(response.ok, "{}", response.message);
    }

    #[test]
    fn local_drop_reports_outcome_flags() {
        let mut board = Board::new(FormRules::default());
        let created = board.submit(&ProjectFormInput::new(
            "Website",
            "Redesign landing page",
            "3",
        ));
        let project_id = created.project_id.expect("submit should return project_id");

        let moved = board.drop_project(&project_id, ProjectStatus::Ended);
        assert!(moved.changed);
        let unchanged = board.drop_project(&project_id, ProjectStatus::Ended);
        assert!(unchanged.ok && !unchanged.changed);
        assert_eq!(unchanged.project_id.as_deref(), Some(project_id.as_str()));
        let missing = board.drop_project("0.42", ProjectStatus::Active);
        assert!(missing.ok && !missing.changed);
        assert_eq!(missing.project_id, None);
    }

    #[test]
    fn rules_from_path_loads_json_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create rules file");
        file.write_all(EXCLUSIVE_PEOPLE_RULES.as_bytes())
            .expect("write rules file");
        let path = file.path().to_str().expect("utf-8 temp path");

        let rules = rules_from_path(Some(path));
        assert_eq!(rules.people.bounds, BoundMode::Exclusive);
        assert_eq!(rules.people.max, Some(5));
    }

    #[test]
    fn rules_from_path_falls_back_to_defaults() {
        assert_eq!(rules_from_path(None), FormRules::default());
        assert_eq!(rules_from_path(Some("   ")), FormRules::default());

        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("missing-rules.json");
        assert_eq!(
            rules_from_path(missing.to_str()),
            FormRules::default()
        );

        let mut file = tempfile::NamedTempFile::new().expect("create rules file");
        file.write_all(b"{\"people\": ").expect("write rules file");
        let path = file.path().to_str().expect("utf-8 temp path");
        assert_eq!(rules_from_path(Some(path)), FormRules::default());
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
