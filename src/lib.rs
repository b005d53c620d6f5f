//! Approximates a raster image as a mosaic of Unreal Engine comment nodes.
//!
//! The pipeline plans an evenly-tiling node grid over the source image,
//! averages the color of every tile, and formats each sufficiently opaque
//! tile as an `EdGraphNode_Comment` text block that pastes straight into a
//! Blueprint graph.

pub mod emit;
pub mod grid;
pub mod pipeline;
pub mod sample;
