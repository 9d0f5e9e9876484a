//! winlist - windowed list virtualization
//!
//! A headless virtualizer that mounts only the items intersecting a
//! viewport, plus a terminal viewer that hosts it.
//!
//! - [`virtual_list`]: the virtualizer core (pure, host-agnostic)
//! - [`view`]: ratatui render surface and crossterm event loop
//! - [`source`]: item loading from files, stdin or a generator
//! - [`config`], [`logging`], [`model`]: the application shell

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod view;
pub mod virtual_list;
