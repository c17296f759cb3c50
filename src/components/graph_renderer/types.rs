//! Graph data structures for input to the renderer.

use serde::Deserialize;

/// Shape drawn for a node. Anything other than `"dot"` draws a box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
	/// Filled circle sized to the label.
	Dot,
	/// Rounded rectangle of fixed height.
	#[default]
	#[serde(other)]
	Box,
}

/// Display data carried by a node.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NodeData {
	/// Optional display label used by [`DataLabels`](super::labels::DataLabels).
	pub label: Option<String>,
	/// CSS fill color. The literal `"none"` paints no fill and darkens the label.
	pub color: Option<String>,
	/// Fill opacity.
	pub alpha: Option<f64>,
	pub shape: NodeShape,
	/// Permanently pinned against simulation forces.
	pub fixated: bool,
}

/// Line width of an edge as supplied by the data, numeric or textual.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EdgeWeight {
	Number(f64),
	Text(String),
}

impl EdgeWeight {
	/// The weight as a float, if it reads as one.
	pub fn value(&self) -> Option<f64> {
		let value = match self {
			EdgeWeight::Number(n) => *n,
			EdgeWeight::Text(s) => s.trim().parse::<f64>().ok()?,
		};
		(!value.is_nan()).then_some(value)
	}
}

impl From<f64> for EdgeWeight {
	fn from(value: f64) -> Self {
		EdgeWeight::Number(value)
	}
}

impl From<&str> for EdgeWeight {
	fn from(value: &str) -> Self {
		EdgeWeight::Text(value.to_string())
	}
}

/// Display data carried by an edge.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EdgeData {
	pub weight: Option<EdgeWeight>,
	/// CSS stroke color. Blank falls back to the configured default.
	pub color: Option<String>,
	/// Draw an arrowhead at the target end.
	pub directed: bool,
}

/// A node in the graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	#[serde(alias = "id")]
	pub name: String,
	#[serde(flatten)]
	pub data: NodeData,
}

/// An edge between two nodes.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node name.
	pub source: String,
	/// Target node name.
	pub target: String,
	#[serde(flatten)]
	pub data: EdgeData,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	#[serde(alias = "edges")]
	pub links: Vec<GraphLink>,
}
