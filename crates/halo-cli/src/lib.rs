//! CLI logic for the Halo layout tool.
//!
//! Reads a graph data set as JSON, lays it out with the requested viewport and
//! view modes, and writes the position map with a view box as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};
use serde::Serialize;

use halo::{
    HaloError, LayoutEngine, PositionMap, layout_bounds,
    identifier::Id,
    semantic::{GraphData, NodeMode},
};

/// The document written by the CLI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutDocument<'a> {
    /// `[min_x, min_y, width, height]`, ready for an SVG `viewBox`.
    view_box: [f32; 4],
    positions: &'a PositionMap,
}

/// Run the Halo CLI application
///
/// This function lays out the input data set and writes the resulting
/// position document to the output file, or to stdout when none is given.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `HaloError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed JSON input
/// - Invalid graph data
pub fn run(args: &Args) -> Result<(), HaloError> {
    info!(
        input_path = args.input,
        view = args.view;
        "Processing graph data"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    // Half the separation leaves room for node glyphs at the edge of the view.
    let margin = app_config.layout().min_separation() / 2.0;

    let source = fs::read_to_string(&args.input)?;
    let data = parse_data(&source)?;
    debug!(
        node_count = data.nodes().len(),
        edge_count = data.edges().len();
        "Parsed graph data"
    );

    let mut engine = LayoutEngine::builder(args.width, args.height, args.view.as_str())
        .preview_mode(args.preview)
        .config(app_config)
        .build()?;
    engine.update_definition_modes(
        args.detail
            .iter()
            .map(|id| (Id::new(id), NodeMode::Detail))
            .collect(),
    );
    let positions = engine.update_layout(&data)?;
    engine.stop();

    let document = render_document(&positions, margin)?;
    match &args.output {
        Some(path) => {
            fs::write(path, document)?;
            info!(output_file = path; "Layout exported successfully");
        }
        None => println!("{document}"),
    }

    Ok(())
}

/// Parse a JSON graph data set.
fn parse_data(source: &str) -> Result<GraphData, HaloError> {
    serde_json::from_str(source).map_err(|err| HaloError::Input(err.to_string()))
}

/// Serialize positions with a view box padded by `margin`.
fn render_document(positions: &PositionMap, margin: f32) -> Result<String, HaloError> {
    let bounds = layout_bounds(positions)
        .ok_or_else(|| HaloError::Layout("layout produced no positions".to_string()))?
        .expand(margin);
    let document = LayoutDocument {
        view_box: [bounds.min_x(), bounds.min_y(), bounds.width(), bounds.height()],
        positions,
    };
    serde_json::to_string_pretty(&document).map_err(|err| HaloError::Layout(err.to_string()))
}

#[cfg(test)]
mod tests {
    use halo::{Position, geometry::Point};

    use super::*;

    #[test]
    fn test_parse_d3_style_data() {
        let source = r#"{
            "nodes": [
                {"id": "w", "group": "central", "type": "word"},
                {"id": "d", "group": "live-definition", "data": {"positiveVotes": 3, "negativeVotes": 1}}
            ],
            "links": [{"source": "w", "target": "d", "type": "defines"}]
        }"#;

        let data = parse_data(source).unwrap();
        assert_eq!(data.nodes().len(), 2);
        assert_eq!(data.nodes()[1].data().net_votes(), 2);
        assert_eq!(data.edges()[0].relation(), "defines");
    }

    #[test]
    fn test_parse_rejects_unknown_group() {
        let source = r#"{"nodes": [{"id": "w", "group": "planet"}]}"#;
        assert!(matches!(parse_data(source), Err(HaloError::Input(_))));
    }

    #[test]
    fn test_document_view_box() {
        let mut positions = PositionMap::new();
        positions.insert(Id::new("c"), Position::new(Point::new(0.0, 0.0), 1.0));
        positions.insert(Id::new("s"), Position::new(Point::new(200.0, -100.0), 0.6));

        let document = render_document(&positions, 75.0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&document).unwrap();

        assert_eq!(value["viewBox"], serde_json::json!([-75.0, -175.0, 350.0, 250.0]));
        assert_eq!(value["positions"]["s"]["transform"], "translate(200,-100) scale(0.6)");
        assert_eq!(value["positions"]["c"]["scale"], 1.0);
    }
}
