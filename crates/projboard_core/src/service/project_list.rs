//! Partitioned project list views and drag-and-drop transitions.
//!
//! # Responsibility
//! - Keep one partition (active or ended) of the latest store snapshot.
//! - Turn drop gestures into `ProjectStore::change_status` calls.
//!
//! # Invariants
//! - A view only ever holds projects whose status equals its partition.
//! - Filtering preserves store insertion order.
//! - Drops with an unreadable payload are silent no-ops.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::store::project_store::{ProjectStore, StatusChange, SubscriptionHandle};
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// MIME type carried by project drag payloads.
pub const PROJECT_DRAG_MIME: &str = "text/plain";

/// Data transferred from a dragged project card to a drop target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub mime: String,
    pub data: String,
}

impl DragPayload {
    /// Payload set when a project card starts dragging.
    pub fn for_project(project: &Project) -> Self {
        Self {
            mime: PROJECT_DRAG_MIME.to_string(),
            data: project.id.to_string(),
        }
    }

    /// Project id carried by this payload, if readable.
    pub fn project_id(&self) -> Option<ProjectId> {
        if self.mime != PROJECT_DRAG_MIME {
            return None;
        }
        Uuid::parse_str(self.data.trim()).ok()
    }
}

/// Render-ready projection of one project card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub members_label: String,
}

impl From<&Project> for ProjectCard {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            members_label: project.members_label(),
        }
    }
}

#[derive(Debug, Default)]
struct ListState {
    projects: Vec<Project>,
    renders: u64,
}

/// One partition of the board, kept current through a store subscription.
#[derive(Debug)]
pub struct ProjectListView {
    status: ProjectStatus,
    subscription: Option<SubscriptionHandle>,
    state: Arc<Mutex<ListState>>,
}

impl ProjectListView {
    /// Creates a view for `status` and subscribes it to `store`.
    ///
    /// The view starts empty; it fills on the next store mutation.
    pub fn attach(store: &mut ProjectStore, status: ProjectStatus) -> Self {
        let state = Arc::new(Mutex::new(ListState::default()));
        let sink = Arc::clone(&state);
        let subscription = store.subscribe(move |snapshot| {
            let filtered = snapshot
                .iter()
                .filter(|project| project.status == status)
                .cloned()
                .collect::<Vec<_>>();
            let mut state = lock(&sink);
            state.projects = filtered;
            state.renders += 1;
        });
        debug!("event=list_attach module=list status=ok partition={status}");

        Self {
            status,
            subscription: Some(subscription),
            state,
        }
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Element id of the rendered list, e.g. `active-projects-list`.
    pub fn list_id(&self) -> String {
        format!("{}-projects-list", self.status.as_str())
    }

    pub fn heading(&self) -> &'static str {
        self.status.heading()
    }

    /// Projects of this partition in store order.
    pub fn projects(&self) -> Vec<Project> {
        lock(&self.state).projects.clone()
    }

    pub fn cards(&self) -> Vec<ProjectCard> {
        lock(&self.state)
            .projects
            .iter()
            .map(ProjectCard::from)
            .collect()
    }

    /// Number of snapshots this view has rendered.
    pub fn render_count(&self) -> u64 {
        lock(&self.state).renders
    }

    /// Returns whether a drag carrying `payload` may be dropped here.
    pub fn accepts(&self, payload: &DragPayload) -> bool {
        payload.mime == PROJECT_DRAG_MIME
    }

    /// Moves the dragged project into this view's partition.
    pub fn drop_project(&self, store: &mut ProjectStore, payload: &DragPayload) -> StatusChange {
        let Some(id) = payload.project_id() else {
            debug!(
                "event=list_drop module=list status=skipped reason=bad_payload partition={}",
                self.status
            );
            return StatusChange::NotFound;
        };
        store.change_status(id, self.status)
    }

    /// Revokes the store subscription. The view keeps its last contents.
    pub fn detach(&mut self, store: &mut ProjectStore) -> bool {
        match self.subscription.take() {
            Some(handle) => store.unsubscribe(handle),
            None => false,
        }
    }
}

fn lock(state: &Mutex<ListState>) -> MutexGuard<'_, ListState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
