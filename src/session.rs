//! The desktop session the pager mirrors: workspaces, stacked windows and
//! the mutating requests the pager issues.
//!
//! The pager never owns windows. It refers to them by [`WindowId`] and asks
//! the session whether they still exist before acting on them.

use std::fmt;

use crate::geometry::{PagerRect, Size};
use crate::signals::{ListenerToken, Listeners};

/// Opaque handle to a session window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Snapshot of one window as reported by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub id: WindowId,
    pub title: String,
    /// Real geometry in screen coordinates.
    pub geometry: PagerRect,
    pub workspace: Option<usize>,
    /// Pinned windows show up on every workspace.
    pub pinned: bool,
    pub active: bool,
    /// Full-size icon, drawn when it fits inside the miniature window.
    pub icon: Option<String>,
    /// Fallback icon for windows too small for `icon`.
    pub mini_icon: Option<char>,
}

impl WindowInfo {
    pub fn new(id: WindowId, title: impl Into<String>, geometry: PagerRect) -> Self {
        Self {
            id,
            title: title.into(),
            geometry,
            workspace: None,
            pinned: false,
            active: false,
            icon: None,
            mini_icon: None,
        }
    }

    pub fn on_workspace(mut self, workspace: usize) -> Self {
        self.workspace = Some(workspace);
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>, mini_icon: char) -> Self {
        self.icon = Some(icon.into());
        self.mini_icon = Some(mini_icon);
        self
    }

    pub fn is_visible_on(&self, workspace: usize) -> bool {
        self.pinned || self.workspace == Some(workspace)
    }
}

/// Change notifications a session reports to the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    WorkspaceCreated(usize),
    WorkspaceDestroyed(usize),
    ActiveWorkspaceChanged,
    ActiveWindowChanged,
    StackingChanged,
    WindowOpened(WindowId),
    WindowClosed(WindowId),
    WindowGeometryChanged(WindowId),
    WindowStateChanged(WindowId),
    WindowIconChanged(WindowId),
    WindowWorkspaceChanged(WindowId),
    WindowNameChanged(WindowId),
    ScreenResized,
}

/// Queries and requests the pager needs from the window system.
///
/// Queries are total: a session with nothing to report returns empty lists
/// or `None`, never an error.
pub trait SessionModel {
    fn workspace_count(&self) -> usize;

    fn active_workspace(&self) -> Option<usize>;

    /// Size of the single virtual screen windows live on.
    fn screen_size(&self) -> Size;

    /// All windows ordered bottom to top by stacking.
    fn windows_stacked(&self) -> Vec<WindowInfo>;

    fn window(&self, id: WindowId) -> Option<WindowInfo> {
        self.windows_stacked().into_iter().find(|w| w.id == id)
    }

    fn window_exists(&self, id: WindowId) -> bool {
        self.window(id).is_some()
    }

    fn activate_workspace(&mut self, workspace: usize);

    fn activate_window(&mut self, id: WindowId);

    fn move_window_to_workspace(&mut self, id: WindowId, workspace: usize);

    fn close_window(&mut self, id: WindowId);
}

/// Sessions that queue their notifications for the host to drain.
pub trait SessionEvents {
    fn take_events(&mut self) -> Vec<SessionEvent>;
}

/// Windows shown in a workspace cell, bottom to top. Pinned windows are
/// included for every workspace and keep their place in the stacking order.
pub fn windows_for_workspace(stacked: &[WindowInfo], workspace: usize) -> Vec<&WindowInfo> {
    stacked
        .iter()
        .filter(|window| window.is_visible_on(workspace))
        .collect()
}

/// Self-contained session used by the demo binary and by tests.
#[derive(Debug)]
pub struct MemorySession {
    screen: Size,
    workspace_count: usize,
    active_workspace: Option<usize>,
    // bottom to top
    windows: Vec<WindowInfo>,
    next_window_id: u64,
    // drained by the host via `take_events`
    pending: Vec<SessionEvent>,
    listeners: Listeners<SessionEvent>,
}

impl MemorySession {
    pub fn new(screen: Size, workspace_count: usize) -> Self {
        Self {
            screen,
            workspace_count,
            active_workspace: (workspace_count > 0).then_some(0),
            windows: Vec::new(),
            next_window_id: 1,
            pending: Vec::new(),
            listeners: Listeners::new(),
        }
    }

    /// Observe every notification as it is raised.
    pub fn connect(&mut self, listener: impl FnMut(&SessionEvent) + 'static) -> ListenerToken {
        self.listeners.connect(listener)
    }

    pub fn disconnect(&mut self, token: ListenerToken) -> bool {
        self.listeners.disconnect(token)
    }

    fn notify(&mut self, event: SessionEvent) {
        self.listeners.emit(&event);
        self.pending.push(event);
    }

    fn position(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == id)
    }

    /// Open a window on top of the stack. The `id` and `active` fields of
    /// `template` are replaced.
    pub fn open_window(&mut self, mut template: WindowInfo) -> WindowId {
        let id = WindowId(self.next_window_id);
        self.next_window_id = self.next_window_id.saturating_add(1);
        template.id = id;
        template.active = false;
        tracing::debug!(window_id = %id, title = %template.title, "session window opened");
        self.windows.push(template);
        self.notify(SessionEvent::WindowOpened(id));
        id
    }

    pub fn raise_window(&mut self, id: WindowId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if index + 1 == self.windows.len() {
            return true;
        }
        let window = self.windows.remove(index);
        self.windows.push(window);
        self.notify(SessionEvent::StackingChanged);
        true
    }

    pub fn set_window_geometry(&mut self, id: WindowId, geometry: PagerRect) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.windows[index].geometry = geometry;
        self.notify(SessionEvent::WindowGeometryChanged(id));
        true
    }

    pub fn set_window_title(&mut self, id: WindowId, title: impl Into<String>) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.windows[index].title = title.into();
        self.notify(SessionEvent::WindowNameChanged(id));
        true
    }

    pub fn set_window_icon(
        &mut self,
        id: WindowId,
        icon: Option<String>,
        mini: Option<char>,
    ) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.windows[index].icon = icon;
        self.windows[index].mini_icon = mini;
        self.notify(SessionEvent::WindowIconChanged(id));
        true
    }

    pub fn set_window_pinned(&mut self, id: WindowId, pinned: bool) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if self.windows[index].pinned == pinned {
            return true;
        }
        self.windows[index].pinned = pinned;
        self.notify(SessionEvent::WindowStateChanged(id));
        true
    }

    pub fn add_workspace(&mut self) -> usize {
        let index = self.workspace_count;
        self.workspace_count += 1;
        if self.active_workspace.is_none() {
            self.active_workspace = Some(index);
        }
        tracing::debug!(workspace = index, "session workspace created");
        self.notify(SessionEvent::WorkspaceCreated(index));
        index
    }

    /// Remove the last workspace. Its windows move to the new last
    /// workspace, or lose their workspace when none is left.
    pub fn remove_workspace(&mut self) -> Option<usize> {
        let removed = self.workspace_count.checked_sub(1)?;
        self.workspace_count = removed;
        let fallback = removed.checked_sub(1);
        let mut moved = Vec::new();
        for window in self.windows.iter_mut() {
            if window.workspace == Some(removed) {
                window.workspace = fallback;
                moved.push(window.id);
            }
        }
        if self.active_workspace == Some(removed) {
            self.active_workspace = fallback;
            self.notify(SessionEvent::ActiveWorkspaceChanged);
        }
        for id in moved {
            self.notify(SessionEvent::WindowWorkspaceChanged(id));
        }
        tracing::debug!(workspace = removed, "session workspace destroyed");
        self.notify(SessionEvent::WorkspaceDestroyed(removed));
        Some(removed)
    }

    pub fn set_screen_size(&mut self, screen: Size) {
        if self.screen == screen {
            return;
        }
        tracing::debug!(?screen, "session screen resized");
        self.screen = screen;
        self.notify(SessionEvent::ScreenResized);
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.windows.iter().find(|w| w.active).map(|w| w.id)
    }
}

impl SessionModel for MemorySession {
    fn workspace_count(&self) -> usize {
        self.workspace_count
    }

    fn active_workspace(&self) -> Option<usize> {
        self.active_workspace
    }

    fn screen_size(&self) -> Size {
        self.screen
    }

    fn windows_stacked(&self) -> Vec<WindowInfo> {
        self.windows.clone()
    }

    fn window(&self, id: WindowId) -> Option<WindowInfo> {
        self.windows.iter().find(|w| w.id == id).cloned()
    }

    fn activate_workspace(&mut self, workspace: usize) {
        if workspace >= self.workspace_count || self.active_workspace == Some(workspace) {
            return;
        }
        tracing::debug!(workspace, "session workspace activated");
        self.active_workspace = Some(workspace);
        self.notify(SessionEvent::ActiveWorkspaceChanged);
    }

    fn activate_window(&mut self, id: WindowId) {
        let Some(index) = self.position(id) else {
            return;
        };
        let target = &self.windows[index];
        if !target.pinned
            && let Some(workspace) = target.workspace
        {
            self.activate_workspace(workspace);
        }
        for window in self.windows.iter_mut() {
            window.active = window.id == id;
        }
        tracing::debug!(window_id = %id, "session window activated");
        self.notify(SessionEvent::ActiveWindowChanged);
        self.raise_window(id);
    }

    fn move_window_to_workspace(&mut self, id: WindowId, workspace: usize) {
        if workspace >= self.workspace_count {
            return;
        }
        let Some(index) = self.position(id) else {
            return;
        };
        let window = &mut self.windows[index];
        if window.workspace == Some(workspace) && !window.pinned {
            return;
        }
        window.workspace = Some(workspace);
        window.pinned = false;
        tracing::debug!(window_id = %id, workspace, "session window moved");
        self.notify(SessionEvent::WindowWorkspaceChanged(id));
    }

    fn close_window(&mut self, id: WindowId) {
        let Some(index) = self.position(id) else {
            return;
        };
        let window = self.windows.remove(index);
        tracing::debug!(window_id = %id, "session window closed");
        self.notify(SessionEvent::WindowClosed(id));
        if window.active {
            self.notify(SessionEvent::ActiveWindowChanged);
        }
    }
}

impl SessionEvents for MemorySession {
    fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending)
    }
}
