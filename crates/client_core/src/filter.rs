//! Text and status filtering over a raw inventory snapshot.

use shared::domain::{Inventory, ResourceRecord};

/// Status choices offered by the dashboard. An empty filter means "All Statuses".
pub const STATUS_OPTIONS: [&str; 4] = ["Running", "Stopped", "Available", "Pending"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub status_filter: String,
}

impl FilterCriteria {
    pub fn new(search_term: impl Into<String>, status_filter: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            status_filter: status_filter.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.status_filter.is_empty()
    }

    pub fn matches(&self, record: &ResourceRecord) -> bool {
        Matcher::new(self).matches(record)
    }
}

struct Matcher {
    search: Option<String>,
    status: Option<String>,
}

impl Matcher {
    fn new(criteria: &FilterCriteria) -> Self {
        let lowered = |value: &str| (!value.is_empty()).then(|| value.to_lowercase());
        Self {
            search: lowered(&criteria.search_term),
            status: lowered(&criteria.status_filter),
        }
    }

    fn matches(&self, record: &ResourceRecord) -> bool {
        let status_ok = self
            .status
            .as_deref()
            .map_or(true, |status| record.state.to_lowercase() == status);
        let search_ok = self
            .search
            .as_deref()
            .map_or(true, |term| record.display_name.to_lowercase().contains(term));
        status_ok && search_ok
    }
}

/// Narrows `inventory` to records passing `criteria`, dropping groups left empty.
pub fn filter(inventory: &Inventory, criteria: &FilterCriteria) -> Inventory {
    if criteria.is_empty() {
        return inventory.clone();
    }
    let matcher = Matcher::new(criteria);
    inventory
        .groups()
        .map(|(name, records)| {
            let passing = records
                .iter()
                .filter(|record| matcher.matches(record))
                .cloned()
                .collect();
            (name.clone(), passing)
        })
        .collect()
}
