//! Per-group page and page-size state.

use std::collections::HashMap;

use shared::domain::GroupName;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    TwentyFive,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Five, PageSize::Ten, PageSize::TwentyFive];

    pub fn get(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::TwentyFive => 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported page size {0}; expected one of 5, 10, 25")]
pub struct PageSizeError(pub usize);

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(PageSizeError(value))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationEntry {
    pub page: usize,
    pub page_size: PageSize,
}

impl PaginationEntry {
    pub fn new(page: usize, page_size: PageSize) -> Self {
        Self { page, page_size }
    }

    /// Resolves this entry against `total` records.
    ///
    /// A stored page past the end is clamped to the last non-empty page so a
    /// shrinking filter never leaves the group showing an empty page.
    pub fn window(&self, total: usize) -> PageWindow {
        let size = self.page_size.get();
        let page_count = total.div_ceil(size);
        let page = self.page.min(page_count.saturating_sub(1));
        let start = (page * size).min(total);
        let end = (start + size).min(total);
        PageWindow {
            page,
            page_count,
            start,
            end,
            total,
        }
    }
}

/// The slice of a group's records visible on the effective page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub page_count: usize,
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl PageWindow {
    /// Range summary such as `6-10 of 12`.
    pub fn label(&self) -> String {
        if self.total == 0 {
            return "0-0 of 0".to_string();
        }
        format!("{}-{} of {}", self.start + 1, self.end, self.total)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaginationManager {
    entries: HashMap<GroupName, PaginationEntry>,
}

impl PaginationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, group: &GroupName) -> PaginationEntry {
        self.entries.get(group).copied().unwrap_or_default()
    }

    /// Not range-checked here; see [`PaginationEntry::window`].
    pub fn set_page(&mut self, group: &GroupName, page: usize) {
        self.entries.entry(group.clone()).or_default().page = page;
    }

    pub fn set_page_size(&mut self, group: &GroupName, page_size: PageSize) {
        self.entries
            .insert(group.clone(), PaginationEntry::new(0, page_size));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
