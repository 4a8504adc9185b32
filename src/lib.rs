//! Workspace pager for terminal window managers.
//!
//! The pager draws a miniature map of virtual workspaces and the windows on
//! them, switches workspaces on click and moves windows between workspaces
//! on drag. [`pager::Pager`] owns the state; [`session::SessionModel`] is the
//! desktop it mirrors.

pub mod config;
pub mod constants;
pub mod drivers;
pub mod event_loop;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod menu;
pub mod pager;
pub mod render;
pub mod runner;
pub mod session;
pub mod signals;
pub mod theme;
pub mod tracing_sub;
