
use shared::{
    domain::{GroupName, Inventory},
    error::FetchError,
};

use crate::{fetch::FetchTicket, pagination::PageSize};

#[derive(Debug, Clone)]
pub enum ViewEvent {
    SearchChanged(String),
    StatusChanged(String),
    ProjectSelected(String),
    PageChanged {
        group: GroupName,
        page: usize,
    },
    PageSizeChanged {
        group: GroupName,
        page_size: PageSize,
    },
    GroupToggled(GroupName),
    RetryRequested,
    FetchCompleted {
        ticket: FetchTicket,
        result: Result<Inventory, FetchError>,
    },
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchChanged(_) => "search_changed",
            Self::StatusChanged(_) => "status_changed",
            Self::ProjectSelected(_) => "project_selected",
            Self::PageChanged { .. } => "page_changed",
            Self::PageSizeChanged { .. } => "page_size_changed",
            Self::GroupToggled(_) => "group_toggled",
            Self::RetryRequested => "retry_requested",
            Self::FetchCompleted { .. } => "fetch_completed",
        }
    }
}
