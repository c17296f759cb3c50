//! Label lookup for nodes.

use super::simulation::NodeView;

/// Produces the text drawn inside a node.
pub trait LabelFactory {
	fn label_for(&self, node: &NodeView<'_>) -> String;
}

impl<F> LabelFactory for F
where
	F: Fn(&NodeView<'_>) -> String,
{
	fn label_for(&self, node: &NodeView<'_>) -> String {
		self(node)
	}
}

/// Uses the node's `label` display field, falling back to its name.
#[derive(Clone, Copy, Debug, Default)]
pub struct DataLabels;

impl LabelFactory for DataLabels {
	fn label_for(&self, node: &NodeView<'_>) -> String {
		node.data
			.label
			.clone()
			.unwrap_or_else(|| node.name.to_string())
	}
}
