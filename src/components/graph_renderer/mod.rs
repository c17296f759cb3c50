//! Force-directed graph renderer for an HTML canvas.
//!
//! Draws the nodes and edges of a particle system every animation frame and
//! lets the user grab nodes with the mouse:
//! - Nodes are drawn as labelled boxes or dots, edges are clipped to node
//!   borders and directed edges get an arrowhead
//! - Pressing on the canvas grabs the nearest node, moving drags it and
//!   releasing drops it again
//! - A press and release that barely moved is reported as a `node:click`
//!
//! The drawing surface, the particle system and the label lookup are all
//! traits, so the renderer can be driven by anything that implements them.
//!
//! # Example
//!
//! ```ignore
//! use graph_renderer::{GraphData, GraphLink, GraphNode, GraphRendererCanvas};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { name: "a".into(), data: Default::default() },
//!         GraphNode { name: "b".into(), data: Default::default() },
//!     ],
//!     links: vec![
//!         GraphLink { source: "a".into(), target: "b".into(), data: Default::default() },
//!     ],
//! };
//!
//! view! { <GraphRendererCanvas data=data.into() fullscreen=true /> }
//! ```

mod component;
pub mod config;
pub mod events;
pub mod geometry;
mod interaction;
pub mod labels;
mod render;
pub mod simulation;
pub mod surface;
mod system;
#[cfg(test)]
mod testing;
mod types;

pub use component::GraphRendererCanvas;
pub use config::{GraphConfig, RendererConfig, SimulationConfig};
pub use events::{ListenerId, PayloadNodeClick, RendererEvent};
pub use interaction::{Interaction, PointerOutcome, Tracking, points_are_close};
pub use labels::{DataLabels, LabelFactory};
pub use render::{Renderer, edge_width};
pub use simulation::ParticleSystem;
pub use surface::{CanvasSurface, DrawingSurface};
pub use system::{EdgeInfo, ForceGraphSystem, NodeInfo};
pub use types::{EdgeData, EdgeWeight, GraphData, GraphLink, GraphNode, NodeData, NodeShape};
