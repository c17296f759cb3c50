//! Test doubles: a surface that records draw calls and an in-memory particle system.

use super::geometry::{BoundingBox, Point};
use super::simulation::{EdgeView, Nearest, NodeView, ParticleSystem};
use super::surface::{DrawingSurface, FillStyle};
use super::types::{EdgeData, NodeData};

/// Width of one character for [`Recorder::measure_text`].
const CHAR_WIDTH: f64 = 6.0;

pub fn assert_near(actual: Point, expected: Point) {
	assert!(
		actual.distance(expected) < 1e-9,
		"{actual:?} is not near {expected:?}"
	);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
	Clear,
	Oval {
		rect: BoundingBox,
		style: FillStyle,
	},
	RoundedRect {
		rect: BoundingBox,
		radius: f64,
		style: FillStyle,
	},
	Text {
		text: String,
		at: Point,
		font: String,
		color: String,
	},
	Line {
		from: Point,
		to: Point,
		color: String,
		width: f64,
	},
	Polygon {
		points: Vec<Point>,
		color: String,
	},
	ClearRect(BoundingBox),
	Save,
	Restore,
	Translate(Point),
	Rotate(f64),
}

#[derive(Debug, Default)]
pub struct Recorder {
	pub ops: Vec<DrawOp>,
}

impl Recorder {
	pub fn measure(&self, text: &str) -> f64 {
		text.chars().count() as f64 * CHAR_WIDTH
	}

	pub fn lines(&self) -> impl Iterator<Item = (Point, Point, &str, f64)> {
		self.ops.iter().filter_map(|op| match op {
			DrawOp::Line {
				from,
				to,
				color,
				width,
			} => Some((*from, *to, color.as_str(), *width)),
			_ => None,
		})
	}
}

impl DrawingSurface for Recorder {
	fn clear(&mut self) {
		self.ops.push(DrawOp::Clear);
	}

	fn oval(&mut self, rect: BoundingBox, style: &FillStyle) {
		self.ops.push(DrawOp::Oval {
			rect,
			style: style.clone(),
		});
	}

	fn rounded_rect(&mut self, rect: BoundingBox, radius: f64, style: &FillStyle) {
		self.ops.push(DrawOp::RoundedRect {
			rect,
			radius,
			style: style.clone(),
		});
	}

	fn measure_text(&mut self, text: &str, _font: &str) -> f64 {
		self.measure(text)
	}

	fn fill_text(&mut self, text: &str, at: Point, font: &str, color: &str) {
		self.ops.push(DrawOp::Text {
			text: text.into(),
			at,
			font: font.into(),
			color: color.into(),
		});
	}

	fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f64) {
		self.ops.push(DrawOp::Line {
			from,
			to,
			color: color.into(),
			width,
		});
	}

	fn fill_polygon(&mut self, points: &[Point], color: &str) {
		self.ops.push(DrawOp::Polygon {
			points: points.to_vec(),
			color: color.into(),
		});
	}

	fn clear_rect(&mut self, rect: BoundingBox) {
		self.ops.push(DrawOp::ClearRect(rect));
	}

	fn save(&mut self) {
		self.ops.push(DrawOp::Save);
	}

	fn restore(&mut self) {
		self.ops.push(DrawOp::Restore);
	}

	fn translate(&mut self, by: Point) {
		self.ops.push(DrawOp::Translate(by));
	}

	fn rotate(&mut self, angle: f64) {
		self.ops.push(DrawOp::Rotate(angle));
	}
}

#[derive(Clone, Debug)]
pub struct StubNode {
	pub name: String,
	pub data: NodeData,
	pub position: Point,
	pub fixed: bool,
	pub temp_mass: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct StubEdge {
	source: String,
	target: String,
	/// Position used when `source` is not a node.
	source_point: Option<Point>,
	data: EdgeData,
}

/// Particle system without physics. Screen space is simulation space shifted
/// by `offset`.
#[derive(Clone, Debug, Default)]
pub struct StubSystem {
	pub nodes: Vec<StubNode>,
	pub edges: Vec<StubEdge>,
	pub offset: Point,
	pub screen: (f64, f64),
	pub padding: f64,
}

impl StubSystem {
	pub fn add_node(&mut self, name: &str, data: NodeData, position: Point) -> usize {
		self.nodes.push(StubNode {
			name: name.into(),
			data,
			position,
			fixed: false,
			temp_mass: None,
		});
		self.nodes.len() - 1
	}

	pub fn add_edge(&mut self, source: &str, target: &str, data: EdgeData) {
		self.edges.push(StubEdge {
			source: source.into(),
			target: target.into(),
			source_point: None,
			data,
		});
	}

	/// Edge whose source is not a node but a bare point.
	pub fn add_edge_between(&mut self, source: &str, at: Point, target: &str, data: EdgeData) {
		self.edges.push(StubEdge {
			source: source.into(),
			target: target.into(),
			source_point: Some(at),
			data,
		});
	}

	pub fn node(&self, id: usize) -> &StubNode {
		&self.nodes[id]
	}

	fn position_of(&self, name: &str) -> Option<Point> {
		self.nodes
			.iter()
			.find(|node| node.name == name)
			.map(|node| node.position)
	}
}

impl ParticleSystem for StubSystem {
	type NodeId = usize;

	fn screen_size(&mut self, width: f64, height: f64) {
		self.screen = (width, height);
	}

	fn screen_padding(&mut self, padding: f64) {
		self.padding = padding;
	}

	fn each_node<F>(&self, mut f: F)
	where
		F: FnMut(Self::NodeId, NodeView<'_>, Point),
	{
		for (id, node) in self.nodes.iter().enumerate() {
			let view = NodeView {
				name: &node.name,
				data: &node.data,
			};
			f(id, view, self.to_screen(node.position));
		}
	}

	fn each_edge<F>(&self, mut f: F)
	where
		F: FnMut(EdgeView<'_>, Point, Point),
	{
		for edge in &self.edges {
			let p1 = edge
				.source_point
				.or_else(|| self.position_of(&edge.source))
				.unwrap_or_default();
			let p2 = self.position_of(&edge.target).unwrap_or_default();
			let view = EdgeView {
				source: &edge.source,
				target: &edge.target,
				data: &edge.data,
			};
			f(view, self.to_screen(p1), self.to_screen(p2));
		}
	}

	fn nearest(&self, point: Point) -> Option<Nearest<usize>> {
		self.nodes
			.iter()
			.enumerate()
			.map(|(id, node)| Nearest {
				node: id,
				distance: node.position.distance(point),
			})
			.min_by(|a, b| a.distance.total_cmp(&b.distance))
	}

	fn from_screen(&self, point: Point) -> Point {
		Point::new(point.x - self.offset.x, point.y - self.offset.y)
	}

	fn to_screen(&self, point: Point) -> Point {
		Point::new(point.x + self.offset.x, point.y + self.offset.y)
	}

	fn with_node<R>(&self, id: usize, f: impl FnOnce(NodeView<'_>) -> R) -> Option<R> {
		self.nodes.get(id).map(|node| {
			f(NodeView {
				name: &node.name,
				data: &node.data,
			})
		})
	}

	fn set_position(&mut self, id: usize, point: Point) {
		if let Some(node) = self.nodes.get_mut(id) {
			node.position = point;
		}
	}

	fn set_fixed(&mut self, id: usize, fixed: bool) {
		if let Some(node) = self.nodes.get_mut(id) {
			node.fixed = fixed;
		}
	}

	fn set_temp_mass(&mut self, id: usize, mass: f64) {
		if let Some(node) = self.nodes.get_mut(id) {
			node.temp_mass = Some(mass);
		}
	}
}
