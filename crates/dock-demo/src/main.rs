// ABOUTME: Headless demo driver: builds a layout from a TOML config and replays scripted steps.
// ABOUTME: Prints pane status and geometry as JSON so layouts can be inspected without a renderer.

mod cli;

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{CliArgs, Step};
use dock_core::{Edge, FileStateStore, LayoutConfig};
use dock_layout::{HeadlessSurface, Layout, LayoutBuilder, OpenOptions, PaneStatus, Rect};

/// Enough time for any configured animation or debounce to finish
const SETTLE: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
struct RectReport {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl From<Rect> for RectReport {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

#[derive(Debug, Serialize)]
struct PaneReport {
    status: String,
    size: i32,
    rect: RectReport,
    resizer: Option<RectReport>,
    no_room: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    container: (i32, i32),
    center: RectReport,
    panes: BTreeMap<String, PaneReport>,
}

fn report(layout: &Layout<HeadlessSurface>) -> Report {
    let panes = Edge::BORDERS
        .into_iter()
        .filter_map(|edge| {
            let pane = layout.pane(edge)?;
            let status = match pane.status() {
                PaneStatus::Open => "open",
                PaneStatus::Closed => "closed",
                PaneStatus::Hidden => "hidden",
                PaneStatus::Sliding => "sliding",
                PaneStatus::Visible | PaneStatus::NoRoom => "center",
            };
            let report = PaneReport {
                status: status.to_string(),
                size: pane.size,
                rect: pane.outer.into(),
                resizer: pane.resizer.map(RectReport::from),
                no_room: pane.no_room,
            };
            Some((edge.to_string(), report))
        })
        .collect();
    let container = layout.state().container;
    Report {
        container: (container.inner_width, container.inner_height),
        center: layout.center_rect().into(),
        panes,
    }
}

fn run_step(layout: &mut Layout<HeadlessSurface>, step: &Step) -> Result<()> {
    tracing::debug!("Step: {:?}", step);
    match *step {
        Step::Open(edge) => layout.open(edge, OpenOptions::default()),
        Step::Close(edge) => layout.close(edge, Default::default()),
        Step::Toggle(edge) => layout.toggle(edge, false),
        Step::Slide(edge) => layout.slide_toggle(edge),
        Step::Hide(edge) => layout.hide(edge, false),
        Step::Show(edge) => layout.show(edge, true, false),
        Step::Size(edge, size) => layout.size_pane(edge, size),
        Step::Swap(a, b) => layout.swap_panes(a, b),
        Step::Resize(width, height) => {
            layout.surface_mut().set_container_size(width, height);
            layout.container_resized();
        }
        Step::Wait(ms) => layout.advance(Duration::from_millis(ms)),
        Step::Save => layout.save_state().context("Failed to save layout state")?,
    }
    Ok(())
}

fn print_report(layout: &Layout<HeadlessSurface>) -> Result<()> {
    let json = serde_json::to_string_pretty(&report(layout))?;
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => LayoutConfig::load_or_default(),
    };

    let mut surface = HeadlessSurface::new(args.width, args.height);
    for &edge in &args.panes {
        if edge.is_border() {
            surface.insert_pane(edge);
        }
    }
    let surface = surface
        .with_natural_size(Edge::North, 0, args.auto_height)
        .with_natural_size(Edge::South, 0, args.auto_height);

    let mut builder = LayoutBuilder::new(config);
    if let Some(path) = &args.state {
        builder = builder.state_store(FileStateStore::new(path));
    }
    let mut layout = builder.build(surface).context("Failed to create layout")?;
    tracing::info!("Replaying {} steps", args.steps.len());

    for step in &args.steps {
        run_step(&mut layout, step)?;
        if args.verbose {
            print_report(&layout)?;
        }
    }
    layout.advance(SETTLE);
    print_report(&layout)?;

    layout.destroy();
    Ok(())
}
