//! Write text edited on a locally served page back into the source file
//! that renders it.
//!
//! [`resolver`] turns a page URL into candidate files, [`patcher`] replaces
//! the first occurrence of the old text in one file, and [`orchestrator`]
//! tries candidates in order through a [`PatchService`], either in-process
//! or over HTTP via [`client`] and [`server`].

pub mod client;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod orchestrator;
pub mod patcher;
pub mod resolver;
pub mod server;
pub mod tracker;
pub mod types;

pub use error::{Error, ErrorKind};
pub use orchestrator::{LocalService, PatchService};
pub use types::{EditRequest, PatchRequest, PatchResult, Patched, Saved};
