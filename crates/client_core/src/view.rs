//! Composition root for the resources dashboard.

use shared::{
    domain::{GroupName, Inventory, ProjectId, ResourceRecord},
    error::FetchError,
};
use tracing::debug;

use crate::{
    catalog::{CatalogError, ProjectCatalog},
    events::ViewEvent,
    expansion::ExpansionManager,
    fetch::{Completion, FetchController, FetchStatus, FetchTicket},
    filter::{filter, FilterCriteria},
    pagination::{PageSize, PaginationEntry, PaginationManager},
    source::InventorySource,
};

/// Where "view details" on a record leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsRoute {
    pub project_id: ProjectId,
    pub path: String,
    pub record: ResourceRecord,
}

impl DetailsRoute {
    /// `None` when the record's project reference has no id segment.
    pub fn for_record(record: &ResourceRecord) -> Option<Self> {
        let project_id = record.project_id()?;
        Some(Self {
            path: format!("/resource/{project_id}"),
            project_id,
            record: record.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub name: GroupName,
    pub heading: String,
    pub expanded: bool,
    pub page: usize,
    pub page_size: PageSize,
    pub page_count: usize,
    pub total: usize,
    pub range_label: String,
    pub records: Vec<ResourceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentView {
    pub project_id: ProjectId,
    pub status: FetchStatus,
    pub error: Option<String>,
    pub groups: Vec<GroupView>,
}

impl CurrentView {
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::InProgress
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn group(&self, name: &GroupName) -> Option<&GroupView> {
        self.groups.iter().find(|group| &group.name == name)
    }
}

pub struct ViewController {
    catalog: ProjectCatalog,
    selected: ProjectId,
    inventory: Inventory,
    criteria: FilterCriteria,
    pagination: PaginationManager,
    expansion: ExpansionManager,
    fetch: FetchController,
}

impl ViewController {
    /// Selects the catalog's first project. Nothing is fetched until [`Self::start`].
    pub fn new(catalog: ProjectCatalog) -> Self {
        let selected = catalog.first().clone();
        Self {
            catalog,
            selected,
            inventory: Inventory::new(),
            criteria: FilterCriteria::default(),
            pagination: PaginationManager::new(),
            expansion: ExpansionManager::new(),
            fetch: FetchController::new(),
        }
    }

    pub fn with_selected(catalog: ProjectCatalog, project_id: &str) -> Result<Self, CatalogError> {
        let selected = catalog.resolve(project_id)?;
        let mut view = Self::new(catalog);
        view.selected = selected;
        Ok(view)
    }

    pub fn start(&mut self) -> FetchTicket {
        self.fetch.begin(self.selected.clone())
    }

    /// Re-selecting the current project after a fetch has been issued is a no-op.
    pub fn select_project(&mut self, project_id: &str) -> Result<Option<FetchTicket>, CatalogError> {
        let project_id = self.catalog.resolve(project_id)?;
        if project_id == self.selected && self.fetch.status() != FetchStatus::Initial {
            return Ok(None);
        }
        self.selected = project_id.clone();
        Ok(Some(self.fetch.begin(project_id)))
    }

    pub fn retry(&mut self) -> Option<FetchTicket> {
        self.fetch.retry()
    }

    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Inventory, FetchError>,
    ) -> Completion {
        self.fetch.complete(ticket, result, &mut self.inventory)
    }

    pub async fn run_fetch<S>(&mut self, source: &S, ticket: FetchTicket) -> Completion
    where
        S: InventorySource + ?Sized,
    {
        let result = source.fetch_inventory(ticket.project_id()).await;
        self.complete_fetch(&ticket, result)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
    }

    pub fn set_status_filter(&mut self, status: impl Into<String>) {
        self.criteria.status_filter = status.into();
    }

    pub fn set_page(&mut self, group: &GroupName, page: usize) {
        self.pagination.set_page(group, page);
    }

    pub fn set_page_size(&mut self, group: &GroupName, page_size: PageSize) {
        self.pagination.set_page_size(group, page_size);
    }

    pub fn toggle_group(&mut self, group: &GroupName) -> bool {
        self.expansion.toggle(group)
    }

    pub fn apply(&mut self, event: ViewEvent) -> Result<Option<FetchTicket>, CatalogError> {
        debug!(event = event.name(), "view: applying event");
        match event {
            ViewEvent::SearchChanged(term) => self.set_search_term(term),
            ViewEvent::StatusChanged(status) => self.set_status_filter(status),
            ViewEvent::ProjectSelected(project_id) => return self.select_project(&project_id),
            ViewEvent::PageChanged { group, page } => self.set_page(&group, page),
            ViewEvent::PageSizeChanged { group, page_size } => {
                self.set_page_size(&group, page_size)
            }
            ViewEvent::GroupToggled(group) => {
                self.toggle_group(&group);
            }
            ViewEvent::RetryRequested => return Ok(self.retry()),
            ViewEvent::FetchCompleted { ticket, result } => {
                self.complete_fetch(&ticket, result);
            }
        }
        Ok(None)
    }

    pub fn catalog(&self) -> &ProjectCatalog {
        &self.catalog
    }

    pub fn selected_project(&self) -> &ProjectId {
        &self.selected
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn status(&self) -> FetchStatus {
        self.fetch.status()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.fetch.error_message()
    }

    pub fn pagination(&self, group: &GroupName) -> PaginationEntry {
        self.pagination.get(group)
    }

    pub fn is_expanded(&self, group: &GroupName) -> bool {
        self.expansion.is_expanded(group)
    }

    pub fn filtered(&self) -> Inventory {
        filter(&self.inventory, &self.criteria)
    }

    pub fn current_view(&self) -> CurrentView {
        let groups = self
            .filtered()
            .groups()
            .map(|(name, records)| {
                let entry = self.pagination.get(name);
                let window = entry.window(records.len());
                GroupView {
                    name: name.clone(),
                    heading: name.heading(),
                    expanded: self.expansion.is_expanded(name),
                    page: window.page,
                    page_size: entry.page_size,
                    page_count: window.page_count,
                    total: window.total,
                    range_label: window.label(),
                    records: records[window.start..window.end].to_vec(),
                }
            })
            .collect();

        CurrentView {
            project_id: self.selected.clone(),
            status: self.fetch.status(),
            error: self.fetch.error_message().map(str::to_string),
            groups,
        }
    }

    /// Resolves the `row`-th visible record of `group` on its current page.
    pub fn view_details(&self, group: &GroupName, row: usize) -> Option<DetailsRoute> {
        let filtered = self.filtered();
        let records = filtered.get(group)?;
        let window = self.pagination.get(group).window(records.len());
        let record = records[window.start..window.end].get(row)?;
        DetailsRoute::for_record(record)
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
