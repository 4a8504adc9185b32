//! Command line configuration for the demo binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use indoc::indoc;
use thiserror::Error;
use tracing::Level;

use crate::geometry::Size;
use crate::layout::{Orientation, PagerConfig};

const AFTER_HELP: &str = indoc! {"
    Controls:
      left click      switch to a workspace, or activate a window
      left drag       move a window to another workspace
      right click     open the window action menu
      Esc             close the action menu
      q, Ctrl+C       quit
"};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrientationArg {
    Horizontal,
    Vertical,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Horizontal => Orientation::Horizontal,
            OrientationArg::Vertical => Orientation::Vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Level::ERROR,
            LogLevelArg::Warn => Level::WARN,
            LogLevelArg::Info => Level::INFO,
            LogLevelArg::Debug => Level::DEBUG,
            LogLevelArg::Trace => Level::TRACE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "term-pager",
    version = env!("CARGO_PKG_VERSION"),
    about = "Interactive workspace pager over a simulated desktop session",
    after_help = AFTER_HELP
)]
pub struct PagerCli {
    /// Rows of workspaces (columns when vertical).
    #[arg(short = 'r', long = "rows", value_name = "N", default_value_t = 1)]
    pub rows: usize,

    #[arg(
        short = 'o',
        long = "orientation",
        value_enum,
        default_value_t = OrientationArg::Horizontal
    )]
    pub orientation: OrientationArg,

    /// Cell edge length along the stacking axis, in terminal cells.
    #[arg(short = 'c', long = "cell-size", value_name = "CELLS", default_value_t = 8)]
    pub cell_size: i32,

    /// Number of workspaces in the simulated session.
    #[arg(short = 'w', long = "workspaces", value_name = "N", default_value_t = 4)]
    pub workspaces: usize,

    #[arg(long = "screen-width", value_name = "PX", default_value_t = 1920)]
    pub screen_width: i32,

    #[arg(long = "screen-height", value_name = "PX", default_value_t = 1080)]
    pub screen_height: i32,

    /// Pointer travel, in terminal cells, before a press becomes a drag.
    #[arg(long = "drag-threshold", value_name = "CELLS", default_value_t = 1)]
    pub drag_threshold: i32,

    /// Write logs to this file. Logging is off without it.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_enum, default_value_t = LogLevelArg::Info)]
    pub log_level: LogLevelArg,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("row count must be at least 1")]
    ZeroRows,
    #[error("cell size must be positive, got {0}")]
    CellSize(i32),
    #[error("screen size must be positive, got {width}x{height}")]
    ScreenSize { width: i32, height: i32 },
    #[error("at least one workspace is required")]
    NoWorkspaces,
    #[error("{rows} rows need at least {rows} workspaces, got {workspaces}")]
    TooManyRows { rows: usize, workspaces: usize },
    #[error("drag threshold must not be negative, got {0}")]
    DragThreshold(i32),
}

/// Validated settings for the demo.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub pager: PagerConfig,
    pub workspaces: usize,
    pub screen: Size,
    pub drag_threshold: i32,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl TryFrom<&PagerCli> for DemoConfig {
    type Error = ConfigError;

    fn try_from(cli: &PagerCli) -> Result<Self, Self::Error> {
        if cli.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if cli.cell_size <= 0 {
            return Err(ConfigError::CellSize(cli.cell_size));
        }
        if cli.screen_width <= 0 || cli.screen_height <= 0 {
            return Err(ConfigError::ScreenSize {
                width: cli.screen_width,
                height: cli.screen_height,
            });
        }
        if cli.workspaces == 0 {
            return Err(ConfigError::NoWorkspaces);
        }
        if cli.rows > cli.workspaces {
            return Err(ConfigError::TooManyRows {
                rows: cli.rows,
                workspaces: cli.workspaces,
            });
        }
        if cli.drag_threshold < 0 {
            return Err(ConfigError::DragThreshold(cli.drag_threshold));
        }
        Ok(Self {
            pager: PagerConfig::new(cli.rows, cli.orientation.into(), cli.cell_size),
            workspaces: cli.workspaces,
            screen: Size::new(cli.screen_width, cli.screen_height),
            drag_threshold: cli.drag_threshold,
            log_file: cli.log_file.clone(),
            log_level: cli.log_level.into(),
        })
    }
}
