//! SVG renderer for the flow diagram
//!
//! Builds a [`Scene`] from a snapshot and its layout, then writes it out as
//! an SVG string with role colors taken from a stylesheet.

pub mod config;
pub mod path;
pub mod scene;
pub mod svg;

pub use config::{NodeShape, SvgConfig};
pub use scene::{build_scene, truncate_description, DiagramText, NodeView, Scene};
pub use svg::{render_svg, render_svg_with_stylesheet};
