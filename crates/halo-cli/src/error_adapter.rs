//! Error adapter for converting HaloError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. Every variant gets
//! a stable code, and the caller-fixable ones a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use halo::HaloError;

/// Adapter giving a [`HaloError`] a miette code and help text.
pub struct ErrorAdapter<'a>(pub &'a HaloError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            HaloError::Io(_) => "halo::io",
            HaloError::Input(_) => "halo::input",
            HaloError::EmptyGraph => "halo::graph::empty",
            HaloError::MissingCentral => "halo::graph::missing_central",
            HaloError::MultipleCentral { .. } => "halo::graph::multiple_central",
            HaloError::DuplicateNode { .. } => "halo::graph::duplicate_node",
            HaloError::DanglingEdge { .. } => "halo::graph::dangling_edge",
            HaloError::Stopped => "halo::stopped",
            HaloError::Config(_) => "halo::config",
            HaloError::Layout(_) => "halo::layout",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            HaloError::Input(_) => {
                "expected `{\"nodes\": [...], \"links\": [...]}` with camelCase node data"
            }
            HaloError::EmptyGraph => "add the central node of the view to `nodes`",
            HaloError::MissingCentral => "mark the focal node with `\"group\": \"central\"`",
            HaloError::MultipleCentral { .. } => "a view has exactly one central node",
            HaloError::DuplicateNode { .. } => "node ids must be unique within a data set",
            HaloError::DanglingEdge { .. } => {
                "every `source` and `target` must name a node in `nodes`"
            }
            HaloError::Config(_) => "check the `[layout]` and `[scale]` sections of the config file",
            HaloError::Io(_) | HaloError::Stopped | HaloError::Layout(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub struct Reportable<'a>(ErrorAdapter<'a>);

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.0)
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0.code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0.help()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.0.labels()
    }
}

/// Convert a [`HaloError`] into a list of reportable errors.
///
/// Layout errors carry a single cause, so the list always has one entry.
pub fn to_reportables(err: &HaloError) -> Vec<Reportable<'_>> {
    vec![Reportable(ErrorAdapter(err))]
}

#[cfg(test)]
mod tests {
    use halo::identifier::Id;

    use super::*;

    #[test]
    fn test_single_reportable() {
        let err = HaloError::MissingCentral;
        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        assert_eq!(
            reportables[0].to_string(),
            "Graph data has no node in the `central` group"
        );
    }

    #[test]
    fn test_code_and_help() {
        let err = HaloError::DanglingEdge {
            from: Id::new("a"),
            to: Id::new("b"),
            missing: Id::new("b"),
        };
        let reportables = to_reportables(&err);
        let reportable = &reportables[0];

        let code = reportable.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("halo::graph::dangling_edge"));
        assert!(reportable.help().is_some());
        assert!(reportable.labels().is_none());
    }

    #[test]
    fn test_no_help_for_io() {
        let err = HaloError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let reportables = to_reportables(&err);
        let reportable = &reportables[0];

        assert_eq!(
            reportable.code().map(|c| c.to_string()).as_deref(),
            Some("halo::io")
        );
        assert!(reportable.help().is_none());
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = HaloError::DuplicateNode { id: Id::new("def-1") };
        let reporter = miette::GraphicalReportHandler::new();

        let reportables = to_reportables(&err);
        let mut out = String::new();
        reporter.render_report(&mut out, &reportables[0]).unwrap();

        assert!(out.contains("def-1"));
        assert!(out.contains("halo::graph::duplicate_node"));
    }
}
