// ABOUTME: Command-line arguments and the step script the demo replays against a layout.
// ABOUTME: Steps look like `close:west`, `size:east=300`, `swap:east,west` or `resize:640x480`.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use dock_core::{Edge, SizeSpec};

/// Drive a border layout headlessly and print the resulting geometry
#[derive(Parser, Debug)]
#[command(name = "dock-demo", version, about = "Headless border layout driver")]
pub struct CliArgs {
    /// Layout config (TOML); defaults to ~/.config/dockable/layout.toml
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Persist layout state to this file (zstd-compressed JSON)
    #[arg(long, value_name = "PATH")]
    pub state: Option<PathBuf>,

    #[arg(long, default_value_t = 1024)]
    pub width: i32,

    #[arg(long, default_value_t = 768)]
    pub height: i32,

    /// Border panes to create (comma separated)
    #[arg(long, value_delimiter = ',', default_value = "north,south,east,west")]
    pub panes: Vec<Edge>,

    /// Natural height of north/south panes sized "auto"
    #[arg(long, default_value_t = 50)]
    pub auto_height: i32,

    /// Print the state after every step instead of only at the end
    #[arg(short, long)]
    pub verbose: bool,

    /// Steps to replay, in order
    #[arg(value_name = "STEP")]
    pub steps: Vec<Step>,
}

/// One scripted layout operation
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Open(Edge),
    Close(Edge),
    Toggle(Edge),
    Slide(Edge),
    Hide(Edge),
    Show(Edge),
    Size(Edge, SizeSpec),
    Swap(Edge, Edge),
    Resize(i32, i32),
    /// Let timers run for this many milliseconds
    Wait(u64),
    Save,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = s.split_once(':').unwrap_or((s, ""));
        let edge = |text: &str| text.parse::<Edge>().map_err(|e| e.to_string());
        match verb.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Step::Open(edge(arg)?)),
            "close" => Ok(Step::Close(edge(arg)?)),
            "toggle" => Ok(Step::Toggle(edge(arg)?)),
            "slide" => Ok(Step::Slide(edge(arg)?)),
            "hide" => Ok(Step::Hide(edge(arg)?)),
            "show" => Ok(Step::Show(edge(arg)?)),
            "size" => {
                let (pane, size) = arg
                    .split_once('=')
                    .ok_or_else(|| format!("expected size:<pane>=<size>, got '{}'", s))?;
                Ok(Step::Size(edge(pane)?, SizeSpec::parse(size)))
            }
            "swap" => {
                let (a, b) = arg
                    .split_once(',')
                    .ok_or_else(|| format!("expected swap:<pane>,<pane>, got '{}'", s))?;
                Ok(Step::Swap(edge(a)?, edge(b)?))
            }
            "resize" => {
                let (w, h) = arg
                    .split_once('x')
                    .ok_or_else(|| format!("expected resize:<width>x<height>, got '{}'", s))?;
                let w = w.trim().parse().map_err(|_| format!("bad width in '{}'", s))?;
                let h = h.trim().parse().map_err(|_| format!("bad height in '{}'", s))?;
                Ok(Step::Resize(w, h))
            }
            "wait" => arg
                .trim()
                .parse()
                .map(Step::Wait)
                .map_err(|_| format!("bad duration in '{}'", s)),
            "save" => Ok(Step::Save),
            _ => Err(format!("unknown step '{}'", s)),
        }
    }
}
