//! Project store with revocable subscriptions.
//!
//! # Responsibility
//! - Create projects and apply status transitions.
//! - Fan out immutable snapshots to registered subscribers.
//!
//! # Invariants
//! - Store operations never fail; input validation belongs to callers.
//! - `change_status` is idempotent: re-applying the current status produces
//!   no notification.
//! - A new subscriber is not replayed the current state.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use log::debug;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Immutable copy of the project sequence at notification time.
pub type ProjectSnapshot = Arc<[Project]>;

type Subscriber = Box<dyn FnMut(&ProjectSnapshot) + Send + 'static>;

/// Revocation token returned by [`ProjectStore::subscribe`].
///
/// Dropping the handle keeps the subscription alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

/// Outcome of [`ProjectStore::change_status`].
///
/// Only `Changed` notifies subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Changed {
        from: ProjectStatus,
        to: ProjectStatus,
    },
    /// Project already had the requested status.
    Unchanged,
    NotFound,
}

impl StatusChange {
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Exclusive owner of all projects on a board.
#[derive(Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    subscribers: Vec<(SubscriptionHandle, Subscriber)>,
    next_subscription: u64,
}

impl Debug for ProjectStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("projects", &self.projects)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new active project and notifies every subscriber once.
    ///
    /// Performs no validation; see `ProjectForm` for the checked path.
    pub fn add_project(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        members: u32,
    ) -> ProjectId {
        let project = Project::new(title, description, members);
        let id = project.id;
        self.projects.push(project);
        debug!(
            "event=project_added module=store status=ok id={} total={} subscribers={}",
            id,
            self.projects.len(),
            self.subscribers.len()
        );
        self.notify();
        id
    }

    /// Moves one project to `status`.
    ///
    /// Unknown ids and no-op transitions are silent: nothing is mutated and
    /// nobody is notified. The returned value lets callers tell them apart.
    pub fn change_status(&mut self, id: ProjectId, status: ProjectStatus) -> StatusChange {
        let Some(project) = self.projects.iter_mut().find(|project| project.id == id) else {
            debug!("event=status_change module=store status=skipped reason=not_found id={id}");
            return StatusChange::NotFound;
        };
        if project.status == status {
            debug!("event=status_change module=store status=skipped reason=unchanged id={id}");
            return StatusChange::Unchanged;
        }

        let from = project.status;
        project.status = status;
        debug!("event=status_change module=store status=ok id={id} from={from} to={status}");
        self.notify();
        StatusChange::Changed { from, to: status }
    }

    /// Registers `callback` for every future mutation.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&ProjectSnapshot) + Send + 'static,
    ) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((handle, Box::new(callback)));
        handle
    }

    /// Revokes one subscription. Returns `false` when it was already gone.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(registered, _)| *registered != handle);
        self.subscribers.len() != before
    }

    /// Returns a copy of the current project sequence.
    pub fn snapshot(&self) -> ProjectSnapshot {
        Arc::from(self.projects.as_slice())
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&snapshot);
        }
    }
}
