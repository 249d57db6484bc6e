use std::{collections::HashMap, sync::Arc, time::Duration};

use super::*;
use async_trait::async_trait;
use shared::error::FETCH_FAILURE_MESSAGE;
use tokio::sync::mpsc;

use crate::catalog::ProjectCatalog;

fn rec(display_name: &str, state: &str) -> ResourceRecord {
    ResourceRecord {
        display_name: display_name.to_string(),
        state: state.to_string(),
        asset_type: "compute.googleapis.com/Instance".to_string(),
        project: "projects/alpha-1".to_string(),
        ..ResourceRecord::default()
    }
}

fn sample_inventory() -> Inventory {
    [
        (
            GroupName::from("compute"),
            vec![rec("vm1", "Running"), rec("vm2", "Stopped")],
        ),
        (GroupName::from("storage"), vec![rec("bucket1", "Available")]),
    ]
    .into_iter()
    .collect()
}

fn numbered_inventory(group: &str, count: usize) -> Inventory {
    let records = (0..count)
        .map(|idx| rec(&format!("{group}-{idx}"), "Running"))
        .collect();
    [(GroupName::from(group), records)].into_iter().collect()
}

fn catalog() -> ProjectCatalog {
    ProjectCatalog::new(["alpha-1", "beta-2", "gamma-3"]).expect("catalog")
}

fn loaded_view(inventory: Inventory) -> ViewController {
    let mut view = ViewController::new(catalog());
    let ticket = view.start();
    assert_eq!(view.complete_fetch(&ticket, Ok(inventory)), Completion::Applied);
    view
}

fn visible_names(view: &CurrentView, group: &str) -> Vec<String> {
    view.group(&GroupName::from(group))
        .map(|group| {
            group
                .records
                .iter()
                .map(|record| record.display_name.clone())
                .collect()
        })
        .unwrap_or_default()
}

/// Answers per project after a configured delay.
struct DelayedSource {
    responses: HashMap<String, (Duration, Inventory)>,
}

#[async_trait]
impl InventorySource for DelayedSource {
    async fn fetch_inventory(&self, project_id: &ProjectId) -> Result<Inventory, FetchError> {
        let Some((delay, inventory)) = self.responses.get(project_id.as_str()) else {
            return Err(FetchError::Response { status: 404 });
        };
        tokio::time::sleep(*delay).await;
        Ok(inventory.clone())
    }
}

#[test]
fn starts_on_first_catalog_project_without_fetching() {
    let view = ViewController::new(catalog());
    assert_eq!(view.selected_project().as_str(), "alpha-1");
    assert_eq!(view.status(), FetchStatus::Initial);
    assert!(view.current_view().groups.is_empty());
}

#[test]
fn with_selected_rejects_unlisted_project() {
    assert!(matches!(
        ViewController::with_selected(catalog(), "delta-4"),
        Err(CatalogError::UnknownProject(_))
    ));
    let view = ViewController::with_selected(catalog(), "beta-2").expect("view");
    assert_eq!(view.selected_project().as_str(), "beta-2");
}

#[test]
fn status_filter_scenario() {
    let mut view = loaded_view(sample_inventory());
    view.set_status_filter("Running");

    let current = view.current_view();
    assert_eq!(current.groups.len(), 1);
    assert_eq!(visible_names(&current, "compute"), vec!["vm1"]);
    assert!(current.group(&GroupName::from("storage")).is_none());
}

#[test]
fn search_term_scenario() {
    let mut view = loaded_view(sample_inventory());
    view.set_search_term("vm");
    view.set_status_filter("");

    let current = view.current_view();
    assert_eq!(visible_names(&current, "compute"), vec!["vm1", "vm2"]);
    assert!(current.group(&GroupName::from("storage")).is_none());
}

#[test]
fn filtering_never_mutates_raw_inventory() {
    let mut view = loaded_view(sample_inventory());
    view.set_search_term("nothing matches");
    assert!(view.current_view().groups.is_empty());
    assert_eq!(view.inventory(), &sample_inventory());
}

#[test]
fn current_view_slices_each_group_by_its_own_pagination() {
    let mut inventory_groups: Vec<(GroupName, Vec<ResourceRecord>)> = Vec::new();
    for (group, count) in [("compute", 12), ("storage", 3)] {
        let records = (0..count)
            .map(|idx| rec(&format!("{group}-{idx}"), "Running"))
            .collect();
        inventory_groups.push((GroupName::from(group), records));
    }
    let mut view = loaded_view(inventory_groups.into_iter().collect());
    let compute = GroupName::from("compute");
    view.set_page(&compute, 1);

    let current = view.current_view();
    let compute_view = current.group(&compute).expect("compute");
    assert_eq!(compute_view.records.len(), 5);
    assert_eq!(compute_view.records[0].display_name, "compute-5");
    assert_eq!(compute_view.page_count, 3);
    assert_eq!(compute_view.total, 12);
    assert_eq!(compute_view.range_label, "6-10 of 12");

    let storage_view = current.group(&GroupName::from("storage")).expect("storage");
    assert_eq!(storage_view.page, 0);
    assert_eq!(storage_view.records.len(), 3);
}

#[test]
fn page_size_change_resets_page_in_the_view() {
    let mut view = loaded_view(numbered_inventory("compute", 30));
    let compute = GroupName::from("compute");
    view.set_page(&compute, 2);
    view.set_page_size(&compute, PageSize::Ten);

    assert_eq!(view.pagination(&compute), PaginationEntry::new(0, PageSize::Ten));
    let current = view.current_view();
    let group = current.group(&compute).expect("compute");
    assert_eq!(group.records.len(), 10);
    assert_eq!(group.records[0].display_name, "compute-0");
}

#[test]
fn out_of_range_page_is_clamped_when_filter_shrinks_group() {
    let mut view = loaded_view(numbered_inventory("compute", 12));
    let compute = GroupName::from("compute");
    view.set_page(&compute, 2);
    view.set_search_term("compute-1");

    let current = view.current_view();
    let group = current.group(&compute).expect("compute");
    assert_eq!(group.total, 3);
    assert_eq!(group.page, 0);
    assert_eq!(group.records.len(), 3);
    assert_eq!(view.pagination(&compute).page, 2);
}

#[test]
fn expansion_is_reported_per_group() {
    let mut view = loaded_view(sample_inventory());
    assert!(view.toggle_group(&GroupName::from("storage")));

    let current = view.current_view();
    assert!(current.group(&GroupName::from("storage")).expect("storage").expanded);
    assert!(!current.group(&GroupName::from("compute")).expect("compute").expanded);
    assert_eq!(
        current.group(&GroupName::from("compute")).expect("compute").heading,
        "Compute Services"
    );
}

#[test]
fn project_switch_carries_filter_pagination_and_expansion() {
    let mut view = loaded_view(numbered_inventory("compute", 12));
    let compute = GroupName::from("compute");
    view.set_search_term("compute");
    view.set_page(&compute, 1);
    view.toggle_group(&compute);

    let ticket = view
        .select_project("beta-2")
        .expect("known project")
        .expect("new fetch");
    assert_eq!(ticket.project_id().as_str(), "beta-2");
    view.complete_fetch(&ticket, Ok(numbered_inventory("compute", 8)));

    assert_eq!(view.criteria().search_term, "compute");
    assert_eq!(view.pagination(&compute).page, 1);
    assert!(view.is_expanded(&compute));
    assert_eq!(view.selected_project().as_str(), "beta-2");
}

#[test]
fn unknown_project_selection_changes_nothing() {
    let mut view = loaded_view(sample_inventory());
    let err = view.select_project("delta-4").expect_err("must reject");

    assert_eq!(err, CatalogError::UnknownProject("delta-4".into()));
    assert_eq!(view.selected_project().as_str(), "alpha-1");
    assert_eq!(view.status(), FetchStatus::Success);
    assert_eq!(view.inventory(), &sample_inventory());
}

#[test]
fn reselecting_current_project_does_not_refetch() {
    let mut view = loaded_view(sample_inventory());
    assert_eq!(view.select_project("alpha-1"), Ok(None));
    assert_eq!(view.status(), FetchStatus::Success);
}

#[test]
fn selecting_before_start_issues_the_first_fetch() {
    let mut view = ViewController::new(catalog());
    let ticket = view.select_project("alpha-1").expect("known").expect("fetch");
    assert_eq!(ticket.project_id().as_str(), "alpha-1");
    assert!(view.current_view().is_loading());
}

#[test]
fn failed_fetch_keeps_stale_inventory_visible_with_error() {
    let mut view = loaded_view(sample_inventory());
    let ticket = view.select_project("beta-2").expect("known").expect("fetch");
    view.complete_fetch(&ticket, Err(FetchError::Response { status: 500 }));

    let current = view.current_view();
    assert_eq!(current.status, FetchStatus::Failure);
    assert_eq!(current.error_message(), Some(FETCH_FAILURE_MESSAGE));
    assert_eq!(current.groups.len(), 2);
}

#[test]
fn retry_targets_last_selected_project() {
    let mut view = loaded_view(sample_inventory());
    let ticket = view.select_project("gamma-3").expect("known").expect("fetch");
    view.complete_fetch(&ticket, Err(FetchError::Transport("refused".into())));

    let retry = view.retry().expect("retry");
    assert_eq!(retry.project_id().as_str(), "gamma-3");
    assert!(view.current_view().error_message().is_none());

    view.complete_fetch(&retry, Ok(numbered_inventory("network", 2)));
    assert_eq!(view.status(), FetchStatus::Success);
    assert!(view.inventory().contains_group(&GroupName::from("network")));
}

#[test]
fn view_details_resolves_visible_row_on_current_page() {
    let mut view = loaded_view(numbered_inventory("compute", 7));
    let compute = GroupName::from("compute");
    view.set_page(&compute, 1);

    let route = view.view_details(&compute, 1).expect("route");
    assert_eq!(route.record.display_name, "compute-6");
    assert_eq!(route.project_id.as_str(), "alpha-1");
    assert_eq!(route.path, "/resource/alpha-1");

    assert!(view.view_details(&compute, 2).is_none());
    assert!(view.view_details(&GroupName::from("storage"), 0).is_none());
}

#[test]
fn details_route_requires_a_namespaced_project() {
    let record = ResourceRecord {
        project: "alpha-1".to_string(),
        ..ResourceRecord::default()
    };
    assert!(DetailsRoute::for_record(&record).is_none());
}

#[test]
fn apply_routes_events_to_entry_points() {
    let mut view = ViewController::new(catalog());
    let compute = GroupName::from("compute");

    let ticket = view
        .apply(ViewEvent::ProjectSelected("beta-2".into()))
        .expect("known")
        .expect("fetch");
    assert_eq!(
        view.apply(ViewEvent::FetchCompleted {
            ticket,
            result: Ok(numbered_inventory("compute", 20)),
        }),
        Ok(None)
    );

    for event in [
        ViewEvent::SearchChanged("compute-1".into()),
        ViewEvent::StatusChanged("running".into()),
        ViewEvent::PageSizeChanged {
            group: compute.clone(),
            page_size: PageSize::Ten,
        },
        ViewEvent::PageChanged {
            group: compute.clone(),
            page: 1,
        },
        ViewEvent::GroupToggled(compute.clone()),
    ] {
        assert_eq!(view.apply(event), Ok(None));
    }

    assert_eq!(view.criteria(), &FilterCriteria::new("compute-1", "running"));
    assert_eq!(view.pagination(&compute), PaginationEntry::new(1, PageSize::Ten));
    assert!(view.is_expanded(&compute));

    let retry = view
        .apply(ViewEvent::RetryRequested)
        .expect("retry")
        .expect("ticket");
    assert_eq!(retry.project_id().as_str(), "beta-2");
}

#[test]
fn apply_surfaces_catalog_errors() {
    let mut view = ViewController::new(catalog());
    assert_eq!(
        view.apply(ViewEvent::ProjectSelected("  ".into())),
        Err(CatalogError::BlankProject)
    );
    assert_eq!(view.status(), FetchStatus::Initial);
}

#[tokio::test]
async fn slow_earlier_response_cannot_overwrite_later_selection() {
    let source = Arc::new(DelayedSource {
        responses: HashMap::from([
            (
                "alpha-1".to_string(),
                (Duration::from_millis(150), numbered_inventory("alpha", 3)),
            ),
            (
                "beta-2".to_string(),
                (Duration::from_millis(5), numbered_inventory("beta", 2)),
            ),
        ]),
    });
    let mut view = ViewController::new(catalog());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let tickets = [
        view.start(),
        view.select_project("beta-2").expect("known").expect("fetch"),
    ];
    for ticket in tickets {
        let source = Arc::clone(&source);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_inventory(ticket.project_id()).await;
            let _ = tx.send((ticket, result));
        });
    }
    drop(tx);

    let mut completions = Vec::new();
    while let Some((ticket, result)) = rx.recv().await {
        completions.push((ticket.project_id().clone(), view.complete_fetch(&ticket, result)));
    }

    assert_eq!(
        completions,
        vec![
            (ProjectId::from("beta-2"), Completion::Applied),
            (ProjectId::from("alpha-1"), Completion::Stale),
        ]
    );
    assert!(view.inventory().contains_group(&GroupName::from("beta")));
    assert!(!view.inventory().contains_group(&GroupName::from("alpha")));
    assert_eq!(view.status(), FetchStatus::Success);
}

#[tokio::test]
async fn run_fetch_applies_source_result() {
    let source = DelayedSource {
        responses: HashMap::from([(
            "alpha-1".to_string(),
            (Duration::ZERO, sample_inventory()),
        )]),
    };
    let mut view = ViewController::new(catalog());
    let ticket = view.start();

    assert_eq!(view.run_fetch(&source, ticket).await, Completion::Applied);
    assert_eq!(view.inventory(), &sample_inventory());

    let ticket = view.select_project("gamma-3").expect("known").expect("fetch");
    assert_eq!(view.run_fetch(&source, ticket).await, Completion::Failed);
    assert_eq!(view.inventory(), &sample_inventory());
}
