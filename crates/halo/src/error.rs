//! Error types for Halo operations.
//!
//! This module provides the main error type [`HaloError`]. Validation errors
//! name the offending node id so the caller's error boundary can report it.

use std::io;

use thiserror::Error;

use halo_core::identifier::Id;

/// The main error type for Halo operations.
///
/// Every variant except [`HaloError::Io`] and [`HaloError::Input`] is raised
/// by the engine itself; those two exist for front ends that load data sets
/// and configuration from disk.
#[derive(Debug, Error)]
pub enum HaloError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Graph data contains no nodes")]
    EmptyGraph,

    #[error("Graph data has no node in the `central` group")]
    MissingCentral,

    #[error("Graph data has more than one central node: `{first}` and `{second}`")]
    MultipleCentral { first: Id, second: Id },

    #[error("Duplicate node id `{id}`")]
    DuplicateNode { id: Id },

    #[error("Edge `{from}` -> `{to}` references unknown node `{missing}`")]
    DanglingEdge { from: Id, to: Id, missing: Id },

    #[error("Layout engine has been stopped")]
    Stopped,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),
}
