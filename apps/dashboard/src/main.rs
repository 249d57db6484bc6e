use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    FetchStatus, HttpInventorySource, PageSize, ProjectCatalog, ViewController, ViewEvent,
    STATUS_OPTIONS,
};
use shared::domain::GroupName;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "cloudpulse", about = "Browse a cloud project's provisioned resources")]
struct Args {
    /// Settings file (defaults to ./dashboard.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_base_url: Option<String>,
    /// Comma-separated allow-list of selectable project ids.
    #[arg(long, value_delimiter = ',')]
    projects: Vec<String>,
    #[arg(long)]
    project: Option<String>,
    #[arg(long, default_value = "")]
    search: String,
    /// One of Running, Stopped, Available, Pending; empty for all.
    #[arg(long, default_value = "")]
    status: String,
    #[arg(long, value_parser = parse_page_size)]
    page_size: Option<PageSize>,
    #[arg(long, default_value_t = 0)]
    page: usize,
    /// Group to expand; repeatable.
    #[arg(long = "expand")]
    expand: Vec<String>,
    #[arg(long)]
    expand_all: bool,
    /// Retries after a failed load, each against the same project.
    #[arg(long, default_value_t = 0)]
    retries: u32,
}

fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let value: usize = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    PageSize::try_from(value).map_err(|err| err.to_string())
}

async fn load(view: &mut ViewController, source: &HttpInventorySource, retries: u32) -> Result<()> {
    let ticket = view.start();
    view.run_fetch(source, ticket).await;

    let mut attempts = 0;
    while view.status() == FetchStatus::Failure && attempts < retries {
        attempts += 1;
        info!(attempt = attempts, project_id = %view.selected_project(), "retrying load");
        if let Some(ticket) = view.apply(ViewEvent::RetryRequested)? {
            view.run_fetch(source, ticket).await;
        }
    }
    Ok(())
}

fn apply_presentation(view: &mut ViewController, args: &Args) -> Result<()> {
    let groups: Vec<GroupName> = view.filtered().group_names().cloned().collect();
    for group in &groups {
        if let Some(page_size) = args.page_size {
            view.apply(ViewEvent::PageSizeChanged {
                group: group.clone(),
                page_size,
            })?;
        }
        if args.page > 0 {
            view.apply(ViewEvent::PageChanged {
                group: group.clone(),
                page: args.page,
            })?;
        }
        let wanted = args.expand_all || args.expand.iter().any(|name| name == group.as_str());
        if wanted && !view.is_expanded(group) {
            view.apply(ViewEvent::GroupToggled(group.clone()))?;
        }
    }
    for name in &args.expand {
        if !groups.iter().any(|group| group.as_str() == name) {
            warn!(group = %name, "no group by that name in the filtered view");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(url) = &args.api_base_url {
        settings.api_base_url = url.clone();
    }
    if !args.projects.is_empty() {
        settings.project_ids = args.projects.clone();
    }

    let catalog = ProjectCatalog::new(&settings.project_ids)
        .context("configure project ids via --projects, APP__PROJECT_IDS or dashboard.toml")?;
    let mut view = match args.project.as_deref().or(settings.default_project.as_deref()) {
        Some(project) => ViewController::with_selected(catalog, project)?,
        None => ViewController::new(catalog),
    };

    if !args.status.is_empty()
        && !STATUS_OPTIONS
            .iter()
            .any(|option| option.eq_ignore_ascii_case(&args.status))
    {
        warn!(status = %args.status, "status is not one of {:?}", STATUS_OPTIONS);
    }
    view.apply(ViewEvent::SearchChanged(args.search.clone()))?;
    view.apply(ViewEvent::StatusChanged(args.status.clone()))?;

    let source = HttpInventorySource::new(&settings.api_base_url)?;
    load(&mut view, &source, args.retries).await?;
    apply_presentation(&mut view, &args)?;

    print!("{}", render::render_view(&view.current_view()));

    Ok(if view.status() == FetchStatus::Failure {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
