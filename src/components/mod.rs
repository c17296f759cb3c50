//! UI components.

pub mod graph_renderer;
