//! [`ParticleSystem`] backed by the `force_graph` physics simulation.
//!
//! Simulation space is whatever `force_graph` integrates in. Screen space is
//! derived from the bounding box of all nodes: the box is stretched over the
//! screen minus padding on every side, and eased towards the current node
//! extent each tick so the view follows the layout without jumping.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData as ForceEdgeData, ForceGraph, NodeData as ForceNodeData};
use log::warn;

use super::config::SimulationConfig;
use super::geometry::Point;
use super::simulation::{EdgeView, Nearest, NodeView, ParticleSystem};
use super::types::{EdgeData, GraphData, NodeData};

/// Per-node data attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub name: String,
	pub data: NodeData,
	/// Mass given on drop, relaxing back to the base mass.
	temp_mass: Option<f64>,
}

/// Per-edge data attached to each edge in the simulation.
#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub data: EdgeData,
}

/// Simulation-space rectangle that is mapped onto the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bounds {
	min: Point,
	max: Point,
}

impl Bounds {
	fn size(&self) -> Point {
		Point::new(self.max.x - self.min.x, self.max.y - self.min.y)
	}

	fn lerp(self, target: Bounds, t: f64) -> Bounds {
		let mix = |a: f64, b: f64| a + (b - a) * t;
		Bounds {
			min: Point::new(mix(self.min.x, target.min.x), mix(self.min.y, target.min.y)),
			max: Point::new(mix(self.max.x, target.max.x), mix(self.max.y, target.max.y)),
		}
	}
}

pub struct ForceGraphSystem {
	graph: ForceGraph<NodeInfo, EdgeInfo>,
	config: SimulationConfig,
	width: f64,
	height: f64,
	padding: f64,
	bounds: Option<Bounds>,
}

impl ForceGraphSystem {
	pub fn new(data: &GraphData, config: SimulationConfig) -> Self {
		let mut graph = ForceGraph::new(config.parameters());
		let mut name_to_idx = HashMap::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(ForceNodeData {
				x: (100.0 * angle.cos()) as f32,
				y: (100.0 * angle.sin()) as f32,
				mass: config.node_mass,
				is_anchor: node.data.fixated,
				user_data: NodeInfo {
					name: node.name.clone(),
					data: node.data.clone(),
					temp_mass: None,
				},
			});
			name_to_idx.insert(node.name.as_str(), idx);
		}

		let mut dangling = 0;
		for link in &data.links {
			match (
				name_to_idx.get(link.source.as_str()),
				name_to_idx.get(link.target.as_str()),
			) {
				(Some(&src), Some(&tgt)) => {
					graph.add_edge(
						src,
						tgt,
						ForceEdgeData {
							user_data: EdgeInfo {
								data: link.data.clone(),
							},
						},
					);
				}
				_ => dangling += 1,
			}
		}
		if dangling > 0 {
			warn!("graph-renderer: skipped {dangling} links with unknown endpoints");
		}

		let mut system = Self {
			graph,
			config,
			width: 0.0,
			height: 0.0,
			padding: 0.0,
			bounds: None,
		};
		system.bounds = system.target_bounds();
		system
	}

	/// Advance the physics by `dt` seconds and ease the view bounds.
	///
	/// A node carrying a temporary mass moves only `base / temp` of the step
	/// the simulation gives it. `force_graph` mass scales repulsion, so the
	/// temporary mass is applied here as inertia and never reaches it.
	pub fn tick(&mut self, dt: f32) {
		let base = self.config.node_mass as f64;
		let decay = (-self.config.mass_relax_rate * dt as f64).exp();
		let mut heavy = HashMap::new();
		self.graph.visit_nodes_mut(|node| {
			let Some(mass) = node.data.user_data.temp_mass else {
				return;
			};
			let before = Point::new(node.x() as f64, node.y() as f64);
			heavy.insert(node.index(), (before, base / mass));
			let relaxed = base + (mass - base) * decay;
			node.data.user_data.temp_mass = (relaxed - base >= 1.0).then_some(relaxed);
		});

		self.graph.update(dt);

		if !heavy.is_empty() {
			self.graph.visit_nodes_mut(|node| {
				if let Some(&(before, inertia)) = heavy.get(&node.index()) {
					node.data.x = (before.x + (node.x() as f64 - before.x) * inertia) as f32;
					node.data.y = (before.y + (node.y() as f64 - before.y) * inertia) as f32;
				}
			});
		}

		if let Some(target) = self.target_bounds() {
			self.bounds = Some(match self.bounds {
				Some(current) => current.lerp(target, self.config.bounds_easing),
				None => target,
			});
		}
	}

	#[cfg(test)]
	fn node_count(&self) -> usize {
		self.graph.get_graph().node_count()
	}

	#[cfg(test)]
	fn find(&self, name: &str) -> Option<DefaultNodeIdx> {
		let graph = self.graph.get_graph();
		graph
			.node_indices()
			.find(|&idx| graph[idx].data.user_data.name == name)
	}

	/// Simulation-space position of a node.
	#[cfg(test)]
	fn position(&self, id: DefaultNodeIdx) -> Option<Point> {
		self.visit(id, |node| Point::new(node.x() as f64, node.y() as f64))
	}

	#[cfg(test)]
	fn is_fixed(&self, id: DefaultNodeIdx) -> Option<bool> {
		self.visit(id, |node| node.data.is_anchor)
	}

	#[cfg(test)]
	fn temp_mass(&self, id: DefaultNodeIdx) -> Option<f64> {
		self.visit(id, |node| node.data.user_data.temp_mass).flatten()
	}

	fn visit<R>(
		&self,
		id: DefaultNodeIdx,
		f: impl FnOnce(&force_graph::Node<NodeInfo>) -> R,
	) -> Option<R> {
		self.graph.get_graph().node_weight(id).map(f)
	}

	fn visit_mut(&mut self, id: DefaultNodeIdx, f: impl FnOnce(&mut force_graph::Node<NodeInfo>)) {
		let mut f = Some(f);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == id {
				if let Some(f) = f.take() {
					f(node);
				}
			}
		});
	}

	/// Extent of all nodes, grown to at least `min_bounds` on each axis.
	fn target_bounds(&self) -> Option<Bounds> {
		let mut extent: Option<Bounds> = None;
		self.graph.visit_nodes(|node| {
			let p = Point::new(node.x() as f64, node.y() as f64);
			extent = Some(match extent {
				Some(b) => Bounds {
					min: Point::new(b.min.x.min(p.x), b.min.y.min(p.y)),
					max: Point::new(b.max.x.max(p.x), b.max.y.max(p.y)),
				},
				None => Bounds { min: p, max: p },
			});
		});

		let mut bounds = extent?;
		let size = bounds.size();
		let min = self.config.min_bounds;
		if size.x < min {
			let grow = (min - size.x) / 2.0;
			bounds.min.x -= grow;
			bounds.max.x += grow;
		}
		if size.y < min {
			let grow = (min - size.y) / 2.0;
			bounds.min.y -= grow;
			bounds.max.y += grow;
		}
		Some(bounds)
	}

	/// Usable screen extent once padding is removed on both sides.
	fn screen_extent(&self) -> Point {
		Point::new(
			(self.width - 2.0 * self.padding).max(1.0),
			(self.height - 2.0 * self.padding).max(1.0),
		)
	}
}

impl ParticleSystem for ForceGraphSystem {
	type NodeId = DefaultNodeIdx;

	fn screen_size(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn screen_padding(&mut self, padding: f64) {
		self.padding = padding;
	}

	fn each_node<F>(&self, mut f: F)
	where
		F: FnMut(Self::NodeId, NodeView<'_>, Point),
	{
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			let view = NodeView {
				name: &info.name,
				data: &info.data,
			};
			let pt = self.to_screen(Point::new(node.x() as f64, node.y() as f64));
			f(node.index(), view, pt);
		});
	}

	fn each_edge<F>(&self, mut f: F)
	where
		F: FnMut(EdgeView<'_>, Point, Point),
	{
		self.graph.visit_edges(|n1, n2, edge| {
			let view = EdgeView {
				source: &n1.data.user_data.name,
				target: &n2.data.user_data.name,
				data: &edge.user_data.data,
			};
			let p1 = self.to_screen(Point::new(n1.x() as f64, n1.y() as f64));
			let p2 = self.to_screen(Point::new(n2.x() as f64, n2.y() as f64));
			f(view, p1, p2);
		});
	}

	fn nearest(&self, point: Point) -> Option<Nearest<Self::NodeId>> {
		let mut best: Option<Nearest<Self::NodeId>> = None;
		self.graph.visit_nodes(|node| {
			let p = Point::new(node.x() as f64, node.y() as f64);
			let distance = p.distance(point);
			if best.is_none_or(|b| distance < b.distance) {
				best = Some(Nearest {
					node: node.index(),
					distance,
				});
			}
		});
		best
	}

	fn from_screen(&self, point: Point) -> Point {
		let Some(bounds) = self.bounds else {
			return point;
		};
		let (size, extent) = (bounds.size(), self.screen_extent());
		Point::new(
			(point.x - self.padding) / extent.x * size.x + bounds.min.x,
			(point.y - self.padding) / extent.y * size.y + bounds.min.y,
		)
	}

	fn to_screen(&self, point: Point) -> Point {
		let Some(bounds) = self.bounds else {
			return point;
		};
		let (size, extent) = (bounds.size(), self.screen_extent());
		Point::new(
			(point.x - bounds.min.x) / size.x * extent.x + self.padding,
			(point.y - bounds.min.y) / size.y * extent.y + self.padding,
		)
	}

	fn with_node<R>(&self, id: Self::NodeId, f: impl FnOnce(NodeView<'_>) -> R) -> Option<R> {
		self.visit(id, |node| {
			let info = &node.data.user_data;
			f(NodeView {
				name: &info.name,
				data: &info.data,
			})
		})
	}

	fn set_position(&mut self, id: Self::NodeId, point: Point) {
		self.visit_mut(id, |node| {
			node.data.x = point.x as f32;
			node.data.y = point.y as f32;
		});
	}

	fn set_fixed(&mut self, id: Self::NodeId, fixed: bool) {
		self.visit_mut(id, |node| node.data.is_anchor = fixed);
	}

	fn set_temp_mass(&mut self, id: Self::NodeId, mass: f64) {
		self.visit_mut(id, |node| node.data.user_data.temp_mass = Some(mass));
	}
}
