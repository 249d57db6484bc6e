//! View-state core for the cloud resources dashboard: raw inventory, filter
//! criteria, per-group pagination and expansion, and the fetch lifecycle.

pub mod catalog;
pub mod events;
pub mod expansion;
pub mod fetch;
pub mod filter;
pub mod pagination;
pub mod source;
pub mod view;

pub use catalog::{CatalogError, ProjectCatalog};
pub use events::ViewEvent;
pub use expansion::ExpansionManager;
pub use fetch::{Completion, FetchController, FetchStatus, FetchTicket};
pub use filter::{filter, FilterCriteria, STATUS_OPTIONS};
pub use pagination::{PageSize, PageSizeError, PageWindow, PaginationEntry, PaginationManager};
pub use source::{HttpInventorySource, InventorySource};
pub use view::{CurrentView, DetailsRoute, GroupView, ViewController};
