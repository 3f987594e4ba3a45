//! Halo Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Halo layout
//! engine and its front ends. It includes:
//!
//! - **Identifiers**: String-interned node identifiers ([`identifier::Id`])
//! - **Geometry**: Points, sizes and bounds ([`geometry`] module)
//! - **Semantic**: The graph data model handed to the engine ([`semantic`] module)

pub mod geometry;
pub mod identifier;
pub mod semantic;
