#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! UI-agnostic dashboard core.
//!
//! [`state::DashboardState`] is an immutable snapshot of everything the
//! dashboard shows. [`update::update`] turns a [`update::Message`] into the
//! next snapshot plus any [`update::Command`]s to run, and
//! [`session::Session`] executes those commands on tokio against a
//! [`fetch::MockDataService`], feeding results back as messages.
//!
//! Every fetch carries a [`update::FetchTicket`] naming the selection it was
//! issued for. Results that arrive after the user has moved on are dropped.

pub mod chart;
pub mod fetch;
pub mod map_view;
pub mod report;
pub mod session;
pub mod state;
pub mod update;

pub use fetch::{BundlePayload, ConfigError, FetchConfig, FetchError, MockDataService};
pub use report::Report;
pub use session::Session;
pub use state::{DashboardState, Panel};
pub use update::{Command, FetchTicket, Message, init, update};
