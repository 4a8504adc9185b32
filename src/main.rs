use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use term_pager::config::{DemoConfig, PagerCli};
use term_pager::drivers::{ConsoleDriver, ConsoleTerminal};
use term_pager::geometry::{PagerRect, Size};
use term_pager::pager::Pager;
use term_pager::runner::{PagerHost, run_pager_app};
use term_pager::session::{MemorySession, WindowId, WindowInfo};

fn main() -> io::Result<()> {
    let cli = PagerCli::parse();
    let config = DemoConfig::try_from(&cli)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    term_pager::tracing_sub::init(config.log_level, config.log_file.as_deref())?;
    tracing::info!(?config, "starting pager demo");

    let session = sample_session(config.screen, config.workspaces);
    let pager = Pager::new(config.pager).with_drag_threshold(config.drag_threshold);
    let mut host = PagerHost::new(pager, session);
    host.sync_session();

    let mut console = ConsoleTerminal::new()?;
    console.enter()?;
    let mut driver = ConsoleDriver::new();
    let result = run_pager_app(
        console.terminal_mut(),
        &mut driver,
        &mut host,
        Duration::from_millis(16),
        |event, host| is_quit(event, host.menu().is_some()),
    );
    console.exit()?;
    result
}

/// `q` quits unless the action menu is open; Ctrl+C always quits.
fn is_quit(event: &Event, menu_open: bool) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    if key.kind == KeyEventKind::Release {
        return false;
    }
    (key.code == KeyCode::Char('q') && !menu_open)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// A few windows spread over the workspaces, plus one pinned window.
fn sample_session(screen: Size, workspaces: usize) -> MemorySession {
    let mut session = MemorySession::new(screen, workspaces);
    let w = screen.width;
    let h = screen.height;
    let samples = [
        ("terminal", "term", '$', PagerRect::new(w / 20, h / 10, w / 2, h / 2)),
        ("editor", "edit", 'e', PagerRect::new(w / 3, h / 5, w / 2, h * 2 / 3)),
        ("browser", "web", 'w', PagerRect::new(0, 0, w, h)),
        ("music", "mus", 'm', PagerRect::new(w * 2 / 3, h / 2, w / 4, h / 3)),
        ("mail", "mail", '@', PagerRect::new(w / 8, h / 3, w / 2, h / 2)),
    ];
    for (index, (title, icon, mini, geometry)) in samples.into_iter().enumerate() {
        let info = WindowInfo::new(WindowId(0), title, geometry)
            .on_workspace(index % workspaces.max(1))
            .with_icon(icon, mini);
        session.open_window(info);
    }
    let clock = WindowInfo::new(
        WindowId(0),
        "clock",
        PagerRect::new(w - w / 8, 0, w / 8, h / 8),
    )
    .pinned()
    .with_icon("clk", '*');
    session.open_window(clock);
    session
}
