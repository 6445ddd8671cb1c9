//! # agg-vertex-gen
//!
//! Vertex generation in the style of Anti-Grain Geometry (AGG) 2.x: the
//! stage of a vector graphics pipeline that turns shape descriptions into
//! flattened `move_to` / `line_to` paths for a rasterizer.
//!
//! - Arcs, ellipses and rounded rectangles flattened to polylines
//! - Circular and SVG elliptical arcs as cubic Bezier segments
//! - Dash patterns with phase and end shortening
//! - Liang-Barsky segment clipping and a polyline clipping stage
//! - Affine transforms and a transforming stage
//!
//! ## Pipeline
//!
//! Every producer implements [`basics::VertexSource`]: call `rewind`, then
//! `vertex` until it returns `PATH_CMD_STOP`. Stages own (or mutably borrow)
//! their source, so they nest:
//!
//! ```text
//! PathStorage -> ConvDash -> ConvTransform -> rasterizer
//! ```
//!
//! The library logs through the [`log`] facade and never installs a logger.

// Foundation types, math and errors
pub mod basics;
pub mod error;
pub mod math;

// Memory substrate
pub mod block_allocator;
pub mod pod_bvector;
pub mod vertex_sequence;

// Geometry primitives
pub mod arc;
pub mod bezier_arc;
pub mod clip_liang_barsky;
pub mod ellipse;
pub mod path_storage;
pub mod rounded_rect;
pub mod shorten_path;
pub mod trans_affine;

// Generators and pipeline stages
pub mod conv_adaptor_vcgen;
pub mod conv_adaptor_vpgen;
pub mod conv_clip_polyline;
pub mod conv_dash;
pub mod conv_transform;
pub mod vcgen_dash;
pub mod vpgen_clip_polyline;

pub use error::{Error, Result};
