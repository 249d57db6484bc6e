//! Plain-text rendering of a [`CurrentView`].

use client_core::{CurrentView, DetailsRoute, FetchStatus, GroupView};
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL_CONDENSED, ContentArrangement, Table,
};
use shared::domain::{display_or_na, ResourceRecord};

const COLUMNS: [&str; 7] = [
    "ID",
    "Name",
    "Type",
    "Status",
    "Location",
    "CreatedDate",
    "Details",
];

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn created_cell(record: &ResourceRecord) -> String {
    match record.created_at() {
        Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        None => display_or_na(Some(record.create_time.as_str())).to_string(),
    }
}

fn record_row(record: &ResourceRecord) -> Vec<String> {
    let details = DetailsRoute::for_record(record)
        .map(|route| route.path)
        .unwrap_or_else(|| display_or_na(None).to_string());
    vec![
        display_or_na(record.external_id()).to_string(),
        display_or_na(Some(record.display_name.as_str())).to_string(),
        display_or_na(record.asset_kind()).to_string(),
        display_or_na(Some(record.state.as_str())).to_string(),
        display_or_na(Some(record.location.as_str())).to_string(),
        created_cell(record),
        details,
    ]
}

fn group_table(group: &GroupView) -> Table {
    let mut table = Table::new();
    table.set_header(COLUMNS.to_vec());
    apply_table_style(&mut table);
    for record in &group.records {
        table.add_row(record_row(record));
    }
    table
}

fn group_summary(group: &GroupView) -> String {
    format!(
        "{} {} ({}, page {}/{}, {} per page)",
        if group.expanded { "v" } else { ">" },
        group.heading,
        group.range_label,
        group.page + 1,
        group.page_count.max(1),
        group.page_size.get(),
    )
}

pub fn render_view(view: &CurrentView) -> String {
    let mut out = format!("Project: {}\n", view.project_id);

    match view.status {
        FetchStatus::Initial => out.push_str("No data requested yet.\n"),
        FetchStatus::InProgress => out.push_str("Loading resources...\n"),
        FetchStatus::Failure => {
            let message = view.error_message().unwrap_or_default();
            out.push_str(&format!(
                "Error: {message} (rerun with --retries to retry)\n"
            ));
        }
        FetchStatus::Success => {}
    }

    if view.groups.is_empty() {
        if view.status == FetchStatus::Success {
            out.push_str("No resources match the current filters.\n");
        }
        return out;
    }

    for group in &view.groups {
        out.push('\n');
        out.push_str(&group_summary(group));
        out.push('\n');
        if group.expanded {
            out.push_str(&format!("{}\n", group_table(group)));
        }
    }
    out
}
