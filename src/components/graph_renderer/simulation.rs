//! The particle system the renderer draws from and drags nodes in.

use std::fmt::Debug;

use super::geometry::Point;
use super::types::{EdgeData, NodeData};

/// Borrowed view of a node's identity and display data.
#[derive(Clone, Copy, Debug)]
pub struct NodeView<'a> {
	pub name: &'a str,
	pub data: &'a NodeData,
}

/// Borrowed view of an edge's endpoints and display data.
#[derive(Clone, Copy, Debug)]
pub struct EdgeView<'a> {
	pub source: &'a str,
	pub target: &'a str,
	pub data: &'a EdgeData,
}

/// Result of a nearest-node query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest<Id> {
	pub node: Id,
	/// Distance from the query point in simulation space.
	pub distance: f64,
}

/// A physics simulation that owns the graph's nodes and edges.
///
/// Iteration hands out screen-space positions; queries and mutators work in
/// simulation space.
pub trait ParticleSystem {
	type NodeId: Copy + Eq + Debug;

	/// Size of the screen the simulation projects onto.
	fn screen_size(&mut self, width: f64, height: f64);
	/// Margin kept free around the projected graph.
	fn screen_padding(&mut self, padding: f64);

	/// Visit every node with its current screen position.
	fn each_node<F>(&self, f: F)
	where
		F: FnMut(Self::NodeId, NodeView<'_>, Point);
	/// Visit every edge with its endpoints' current screen positions.
	fn each_edge<F>(&self, f: F)
	where
		F: FnMut(EdgeView<'_>, Point, Point);

	/// Node closest to `point` (simulation space), if there are any nodes.
	fn nearest(&self, point: Point) -> Option<Nearest<Self::NodeId>>;
	fn from_screen(&self, point: Point) -> Point;
	fn to_screen(&self, point: Point) -> Point;

	/// Run `f` on the node's view, if the node exists.
	fn with_node<R>(&self, id: Self::NodeId, f: impl FnOnce(NodeView<'_>) -> R) -> Option<R>;

	/// Move a node, in simulation space.
	fn set_position(&mut self, id: Self::NodeId, point: Point);
	/// Pin or release a node against simulation forces.
	fn set_fixed(&mut self, id: Self::NodeId, fixed: bool);
	fn set_temp_mass(&mut self, id: Self::NodeId, mass: f64);
}
