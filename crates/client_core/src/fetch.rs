//! Fetch lifecycle: status, user-facing error, and stale-completion guard.
//!
//! Every fetch is issued as a [`FetchTicket`] carrying a sequence number.
//! Completions are applied only when their ticket is the most recently
//! issued one, so a slow response for an earlier project selection can never
//! overwrite the inventory of a later one.

use shared::{
    domain::{Inventory, ProjectId},
    error::FetchError,
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Initial,
    InProgress,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    project_id: ProjectId,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug, Default)]
pub struct FetchController {
    status: FetchStatus,
    error: Option<String>,
    last_requested: Option<ProjectId>,
    last_seq: u64,
}

impl FetchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_requested(&self) -> Option<&ProjectId> {
        self.last_requested.as_ref()
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.last_seq
    }

    pub fn begin(&mut self, project_id: ProjectId) -> FetchTicket {
        self.last_seq += 1;
        self.status = FetchStatus::InProgress;
        self.error = None;
        self.last_requested = Some(project_id.clone());
        debug!(project_id = %project_id, seq = self.last_seq, "fetch: issued");
        FetchTicket {
            seq: self.last_seq,
            project_id,
        }
    }

    /// Reissues the last requested project. `None` before the first fetch.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        let project_id = self.last_requested.clone()?;
        info!(project_id = %project_id, "fetch: retry requested");
        Some(self.begin(project_id))
    }

    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Inventory, FetchError>,
        inventory: &mut Inventory,
    ) -> Completion {
        if !self.is_current(ticket) {
            debug!(
                project_id = %ticket.project_id,
                seq = ticket.seq,
                latest = self.last_seq,
                "fetch: discarding stale completion"
            );
            return Completion::Stale;
        }

        match result {
            Ok(next) => {
                info!(
                    project_id = %ticket.project_id,
                    seq = ticket.seq,
                    groups = next.group_count(),
                    records = next.record_count(),
                    "fetch: inventory loaded"
                );
                *inventory = next;
                self.status = FetchStatus::Success;
                self.error = None;
                Completion::Applied
            }
            Err(err) => {
                warn!(
                    project_id = %ticket.project_id,
                    seq = ticket.seq,
                    kind = err.kind(),
                    error = %err,
                    "fetch: inventory retrieval failed"
                );
                self.status = FetchStatus::Failure;
                self.error = Some(err.user_message().to_string());
                Completion::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
