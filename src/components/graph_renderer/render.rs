//! Frame drawing for the graph.
//!
//! A frame is drawn in two passes: every node first, recording the screen box
//! it occupies, then every edge, clipped against those boxes so lines start and
//! end at node borders. The box table only lives for the duration of a frame.

use std::collections::HashMap;

use log::info;

use super::config::{EdgeStyleConfig, NodeStyleConfig, RendererConfig};
use super::events::{ListenerId, Listeners, RendererEvent};
use super::geometry::{BoundingBox, Point, intersect_line_box};
use super::interaction::{Interaction, Tracking};
use super::labels::{DataLabels, LabelFactory};
use super::simulation::{EdgeView, NodeView, ParticleSystem};
use super::surface::{DrawingSurface, FillStyle};
use super::types::{EdgeData, NodeShape};

/// Draws a particle system onto a surface and turns pointer input into drags
/// and clicks.
///
/// The renderer does nothing until a system is attached with [`init`](Self::init).
pub struct Renderer<S, P, L = DataLabels>
where
	P: ParticleSystem,
{
	pub(super) surface: S,
	pub(super) system: Option<P>,
	pub(super) labels: L,
	pub(super) config: RendererConfig,
	pub(super) node_boxes: HashMap<String, BoundingBox>,
	pub(super) interaction: Interaction<P::NodeId>,
	pub(super) listeners: Listeners<P::NodeId>,
}

impl<S, P, L> Renderer<S, P, L>
where
	S: DrawingSurface,
	P: ParticleSystem,
	L: LabelFactory,
{
	pub fn new(surface: S, labels: L, config: RendererConfig) -> Self {
		Self {
			surface,
			system: None,
			labels,
			config,
			node_boxes: HashMap::new(),
			interaction: Interaction::default(),
			listeners: Listeners::default(),
		}
	}

	/// Attach `system`, projecting it onto a `width` x `height` screen.
	///
	/// Returns [`Tracking::End`] when this cut off a drag on the previous
	/// system, so the host can detach its move/release listeners.
	pub fn init(&mut self, mut system: P, width: f64, height: f64) -> Tracking {
		system.screen_size(width, height);
		system.screen_padding(self.config.screen_padding);
		self.system = Some(system);
		let interrupted = self.interaction.dragged.is_some();
		self.interaction = Interaction::default();
		info!("graph-renderer: attached particle system ({width}x{height})");
		if interrupted {
			Tracking::End
		} else {
			Tracking::Unchanged
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		if let Some(system) = self.system.as_mut() {
			system.screen_size(width, height);
		}
	}

	pub fn system(&self) -> Option<&P> {
		self.system.as_ref()
	}

	pub fn system_mut(&mut self) -> Option<&mut P> {
		self.system.as_mut()
	}

	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	pub fn config(&self) -> &RendererConfig {
		&self.config
	}

	/// Register an event listener.
	pub fn on(&mut self, listener: impl FnMut(&RendererEvent<P::NodeId>) + 'static) -> ListenerId {
		self.listeners.add(listener)
	}

	/// Remove a listener registered with [`on`](Self::on).
	pub fn off(&mut self, id: ListenerId) -> bool {
		self.listeners.remove(id)
	}

	/// Clear the surface and draw the current state of the system.
	pub fn redraw(&mut self) {
		if self.system.is_none() {
			return;
		}

		self.surface.clear();
		self.node_boxes.clear();
		self.draw_nodes();
		self.draw_edges();
		self.node_boxes.clear();
	}

	fn draw_nodes(&mut self) {
		let Some(system) = self.system.as_ref() else {
			return;
		};

		let surface = &mut self.surface;
		let labels = &self.labels;
		let style = &self.config.node;
		let boxes = &mut self.node_boxes;
		let mut fixated = Vec::new();

		system.each_node(|id, node, pt| {
			if node.data.fixated {
				fixated.push(id);
			}
			let label = labels.label_for(&node);
			let bbox = draw_node(surface, style, node, &label, pt);
			boxes.insert(node.name.to_string(), bbox);
		});

		if let Some(system) = self.system.as_mut() {
			for id in fixated {
				system.set_fixed(id, true);
			}
		}
	}

	fn draw_edges(&mut self) {
		let Some(system) = self.system.as_ref() else {
			return;
		};

		let surface = &mut self.surface;
		let style = &self.config.edge;
		let boxes = &self.node_boxes;

		system.each_edge(|edge, p1, p2| {
			draw_edge(surface, style, boxes, edge, p1, p2);
		});
	}
}

/// Draws one node and returns the screen box it occupies.
fn draw_node<S: DrawingSurface>(
	surface: &mut S,
	style: &NodeStyleConfig,
	node: NodeView<'_>,
	label: &str,
	pt: Point,
) -> BoundingBox {
	let label = (!label.trim().is_empty()).then_some(label);
	let text_width = label.map_or(0.0, |text| surface.measure_text(text, &style.label_font));
	let w = text_width + style.label_padding;

	// Whole pixels keep label text crisp.
	let pt = if label.is_some() { pt.floor() } else { pt };

	let fill = FillStyle {
		fill: non_blank(node.data.color.as_deref())
			.unwrap_or(style.default_fill.as_str())
			.to_string(),
		// Zero counts as unset, like a missing alpha.
		alpha: node
			.data
			.alpha
			.filter(|a| *a != 0.0 && !a.is_nan())
			.unwrap_or(style.default_alpha),
	};

	let bbox = match node.data.shape {
		NodeShape::Dot => {
			let bbox = BoundingBox::square(pt, w);
			surface.oval(bbox, &fill);
			bbox
		}
		NodeShape::Box => {
			let h = style.box_height;
			surface.rounded_rect(
				BoundingBox::new(pt.x - w / 2.0, pt.y - h / 2.0, w, h),
				style.corner_radius,
				&fill,
			);
			BoundingBox::new(
				pt.x - w / 2.0,
				pt.y - h / 2.0 - style.box_inset,
				w,
				h + 2.0 * style.box_inset,
			)
		}
	};

	if let Some(text) = label {
		let color = if node.data.color.as_deref() == Some("none") {
			&style.label_color_unfilled
		} else {
			&style.label_color
		};
		surface.fill_text(
			text,
			Point::new(pt.x, pt.y + style.label_baseline),
			&style.label_font,
			color,
		);
	}

	bbox
}

/// Draws one edge between the borders of its endpoints' boxes.
fn draw_edge<S: DrawingSurface>(
	surface: &mut S,
	style: &EdgeStyleConfig,
	boxes: &HashMap<String, BoundingBox>,
	edge: EdgeView<'_>,
	p1: Point,
	p2: Point,
) {
	let color = non_blank(edge.data.color.as_deref()).unwrap_or(style.default_color.as_str());

	let tail = boxes
		.get(edge.source)
		.and_then(|bbox| intersect_line_box(p1, p2, bbox))
		.unwrap_or(p1);
	let head = boxes
		.get(edge.target)
		.and_then(|bbox| intersect_line_box(tail, p2, bbox))
		.unwrap_or(tail);

	let wt = edge_width(edge.data, style.default_width);

	surface.save();
	surface.stroke_line(tail, head, color, wt);
	surface.restore();

	if edge.data.directed {
		let arrow_length = style.arrow_length + wt;
		let arrow_width = style.arrow_width + wt;

		surface.save();
		surface.translate(head);
		surface.rotate((head.y - tail.y).atan2(head.x - tail.x));
		// Cut the line back so it does not show through the arrow tip.
		surface.clear_rect(BoundingBox::new(
			-arrow_length / 2.0,
			-wt / 2.0,
			arrow_length / 2.0,
			wt,
		));
		surface.fill_polygon(
			&[
				Point::new(-arrow_length, arrow_width),
				Point::new(0.0, 0.0),
				Point::new(-arrow_length, -arrow_width),
				Point::new(-arrow_length * 0.8, 0.0),
			],
			color,
		);
		surface.restore();
	}
}

/// Line width of an edge, `default` when the weight is missing or unreadable.
pub fn edge_width(data: &EdgeData, default: f64) -> f64 {
	data.weight
		.as_ref()
		.and_then(|weight| weight.value())
		.unwrap_or(default)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
	value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
	use super::super::testing::{DrawOp, Recorder, StubSystem, assert_near};
	use super::super::types::{EdgeData, EdgeWeight, NodeData, NodeShape};
	use super::*;

	type TestRenderer = Renderer<Recorder, StubSystem>;

	fn renderer(system: StubSystem) -> TestRenderer {
		let mut renderer = Renderer::new(Recorder::default(), DataLabels, RendererConfig::default());
		renderer.init(system, 800.0, 600.0);
		renderer
	}

	fn labelled(label: &str) -> NodeData {
		NodeData {
			label: Some(label.into()),
			..Default::default()
		}
	}

	#[test]
	fn redraw_without_system_draws_nothing() {
		let mut renderer: TestRenderer =
			Renderer::new(Recorder::default(), DataLabels, RendererConfig::default());
		renderer.redraw();
		assert!(renderer.surface.ops.is_empty());
	}

	#[test]
	fn frame_starts_with_clear() {
		let mut system = StubSystem::default();
		system.add_node("a", labelled("a"), Point::new(10.0, 10.0));
		let mut renderer = renderer(system);
		renderer.redraw();
		assert_eq!(renderer.surface.ops.first(), Some(&DrawOp::Clear));
	}

	#[test]
	fn unset_color_fills_black_at_low_alpha() {
		let mut system = StubSystem::default();
		system.add_node("a", labelled("abc"), Point::new(50.0, 50.0));
		let mut renderer = renderer(system);
		renderer.redraw();

		let fill = renderer
			.surface
			.ops
			.iter()
			.find_map(|op| match op {
				DrawOp::RoundedRect { style, .. } => Some(style.clone()),
				_ => None,
			})
			.unwrap();
		assert_eq!(fill.fill, "#000000");
		assert_eq!(fill.alpha, 0.2);
	}

	#[test]
	fn explicit_color_and_alpha_are_used() {
		let mut system = StubSystem::default();
		let data = NodeData {
			color: Some("#ff0000".into()),
			alpha: Some(0.8),
			shape: NodeShape::Dot,
			..labelled("x")
		};
		system.add_node("a", data, Point::new(50.0, 50.0));
		let mut renderer = renderer(system);
		renderer.redraw();

		assert!(renderer.surface.ops.iter().any(|op| matches!(
			op,
			DrawOp::Oval { style, .. } if style.fill == "#ff0000" && style.alpha == 0.8
		)));
	}

	#[test]
	fn zero_or_nan_alpha_falls_back_to_default() {
		for alpha in [0.0, f64::NAN] {
			let mut system = StubSystem::default();
			let data = NodeData {
				alpha: Some(alpha),
				..labelled("x")
			};
			system.add_node("a", data, Point::new(50.0, 50.0));
			let mut renderer = renderer(system);
			renderer.redraw();

			assert!(renderer.surface.ops.iter().any(|op| matches!(
				op,
				DrawOp::RoundedRect { style, .. } if style.alpha == 0.2
			)));
		}
	}

	#[test]
	fn dot_box_is_square_around_rounded_position() {
		let mut system = StubSystem::default();
		let data = NodeData {
			shape: NodeShape::Dot,
			..labelled("abcd")
		};
		system.add_node("a", data, Point::new(10.6, 20.4));
		let mut renderer = renderer(system);
		renderer.draw_nodes();

		let w = renderer.surface.measure("abcd") + 10.0;
		let expected = BoundingBox::square(Point::new(10.0, 20.0), w);
		assert_eq!(renderer.node_boxes.get("a"), Some(&expected));
		assert!(renderer.surface.ops.contains(&DrawOp::Oval {
			rect: expected,
			style: FillStyle {
				fill: "#000000".into(),
				alpha: 0.2,
			},
		}));
	}

	#[test]
	fn box_node_records_taller_box_than_drawn() {
		let mut system = StubSystem::default();
		system.add_node("a", labelled("ab"), Point::new(100.0, 100.0));
		let mut renderer = renderer(system);
		renderer.draw_nodes();

		let w = renderer.surface.measure("ab") + 10.0;
		assert_eq!(
			renderer.node_boxes.get("a"),
			Some(&BoundingBox::new(100.0 - w / 2.0, 89.0, w, 22.0))
		);
		assert!(renderer.surface.ops.iter().any(|op| matches!(
			op,
			DrawOp::RoundedRect { rect, radius, .. }
				if *rect == BoundingBox::new(100.0 - w / 2.0, 90.0, w, 20.0) && *radius == 4.0
		)));
	}

	#[test]
	fn blank_label_is_not_drawn_and_position_stays_fractional() {
		let mut system = StubSystem::default();
		let data = NodeData {
			shape: NodeShape::Dot,
			..labelled(" \t ")
		};
		system.add_node("a", data, Point::new(10.5, 20.5));
		let mut renderer = renderer(system);
		renderer.draw_nodes();

		assert_eq!(
			renderer.node_boxes.get("a"),
			Some(&BoundingBox::square(Point::new(10.5, 20.5), 10.0))
		);
		assert!(!renderer
			.surface
			.ops
			.iter()
			.any(|op| matches!(op, DrawOp::Text { .. })));
	}

	#[test]
	fn label_is_centred_below_baseline_offset() {
		let mut system = StubSystem::default();
		system.add_node("a", labelled("hi"), Point::new(30.9, 40.2));
		let mut renderer = renderer(system);
		renderer.redraw();

		assert!(renderer.surface.ops.contains(&DrawOp::Text {
			text: "hi".into(),
			at: Point::new(30.0, 44.0),
			font: "12px Helvetica".into(),
			color: "white".into(),
		}));
	}

	#[test]
	fn unfilled_node_gets_dark_label() {
		let mut system = StubSystem::default();
		let data = NodeData {
			color: Some("none".into()),
			..labelled("hi")
		};
		system.add_node("a", data, Point::new(0.0, 0.0));
		let mut renderer = renderer(system);
		renderer.redraw();

		assert!(renderer.surface.ops.iter().any(|op| matches!(
			op,
			DrawOp::Text { color, .. } if color == "#333333"
		)));
	}

	#[test]
	fn unparseable_weight_draws_unit_width() {
		let mut system = StubSystem::default();
		system.add_node("a", labelled("a"), Point::new(0.0, 0.0));
		system.add_node("b", labelled("b"), Point::new(100.0, 0.0));
		system.add_edge(
			"a",
			"b",
			EdgeData {
				weight: Some(EdgeWeight::from("abc")),
				..Default::default()
			},
		);
		let mut renderer = renderer(system);
		renderer.redraw();

		let widths: Vec<f64> = renderer.surface.lines().map(|(_, _, _, width)| width).collect();
		assert_eq!(widths, vec![1.0]);
	}

	#[test]
	fn numeric_weight_sets_width() {
		let data = EdgeData {
			weight: Some(EdgeWeight::from("2.5")),
			..Default::default()
		};
		assert_eq!(edge_width(&data, 1.0), 2.5);
		assert_eq!(edge_width(&EdgeData::default(), 1.0), 1.0);
	}

	#[test]
	fn edge_is_clipped_to_node_borders() {
		let mut system = StubSystem::default();
		system.add_node("a", labelled("a"), Point::new(0.0, 0.0));
		system.add_node("b", labelled("b"), Point::new(100.0, 0.0));
		system.add_edge("a", "b", EdgeData::default());
		let mut renderer = renderer(system);
		renderer.redraw();

		let half = (renderer.surface.measure("a") + 10.0) / 2.0;
		let lines: Vec<_> = renderer.surface.lines().collect();
		assert_eq!(lines.len(), 1);
		let (from, to, color, _) = lines[0];
		assert_near(from, Point::new(half, 0.0));
		assert_near(to, Point::new(100.0 - half, 0.0));
		assert_eq!(color, "#cccccc");
	}

	#[test]
	fn blank_edge_color_falls_back_to_grey() {
		let mut system = StubSystem::default();
		system.add_node("a", labelled("a"), Point::new(0.0, 0.0));
		system.add_node("b", labelled("b"), Point::new(0.0, 100.0));
		system.add_edge(
			"a",
			"b",
			EdgeData {
				color: Some("  ".into()),
				..Default::default()
			},
		);
		let mut renderer = renderer(system);
		renderer.redraw();

		let colors: Vec<&str> = renderer.surface.lines().map(|(_, _, color, _)| color).collect();
		assert_eq!(colors, vec!["#cccccc"]);
	}

	#[test]
	fn edge_without_source_box_starts_at_source_point() {
		let mut system = StubSystem::default();
		system.add_node("b", labelled("b"), Point::new(100.0, 0.0));
		system.add_edge_between("ghost", Point::new(0.0, 0.0), "b", EdgeData::default());
		let mut renderer = renderer(system);
		renderer.redraw();

		let (from, _, _, _) = renderer.surface.lines().next().unwrap();
		assert_eq!(from, Point::new(0.0, 0.0));
	}

	#[test]
	fn directed_edge_draws_rotated_arrowhead() {
		let mut system = StubSystem::default();
		system.add_node("a", labelled("a"), Point::new(0.0, 0.0));
		system.add_node("b", labelled("b"), Point::new(0.0, 100.0));
		system.add_edge(
			"a",
			"b",
			EdgeData {
				weight: Some(EdgeWeight::from(2.0)),
				color: Some("#123456".into()),
				directed: true,
			},
		);
		let mut renderer = renderer(system);
		renderer.redraw();

		let ops = &renderer.surface.ops;
		let translate = ops
			.iter()
			.position(|op| matches!(op, DrawOp::Translate(_)))
			.expect("arrow is translated to the head anchor");
		let DrawOp::Translate(head) = ops[translate] else {
			unreachable!()
		};
		assert_near(head, Point::new(0.0, 89.0));
		assert_eq!(
			ops[translate + 1],
			DrawOp::Rotate(std::f64::consts::FRAC_PI_2)
		);
		assert_eq!(
			ops[translate + 2],
			DrawOp::ClearRect(BoundingBox::new(-4.0, -1.0, 4.0, 2.0))
		);
		assert_eq!(
			ops[translate + 3],
			DrawOp::Polygon {
				points: vec![
					Point::new(-8.0, 4.0),
					Point::new(0.0, 0.0),
					Point::new(-8.0, -4.0),
					Point::new(-6.4, 0.0),
				],
				color: "#123456".into(),
			}
		);
		assert_eq!(ops[translate + 4], DrawOp::Restore);
	}

	#[test]
	fn undirected_edge_has_no_arrowhead() {
		let mut system = StubSystem::default();
		system.add_node("a", labelled("a"), Point::new(0.0, 0.0));
		system.add_node("b", labelled("b"), Point::new(0.0, 100.0));
		system.add_edge("a", "b", EdgeData::default());
		let mut renderer = renderer(system);
		renderer.redraw();

		assert!(!renderer
			.surface
			.ops
			.iter()
			.any(|op| matches!(op, DrawOp::Polygon { .. } | DrawOp::Translate(_))));
	}

	#[test]
	fn nodes_are_drawn_before_edges_and_boxes_are_dropped() {
		let mut system = StubSystem::default();
		system.add_edge_between("x", Point::new(0.0, 0.0), "y", EdgeData::default());
		system.add_node("a", labelled("a"), Point::new(0.0, 0.0));
		system.add_node("b", labelled("b"), Point::new(50.0, 50.0));
		system.add_edge("a", "b", EdgeData::default());
		let mut renderer = renderer(system);
		renderer.redraw();

		let ops = &renderer.surface.ops;
		let last_node = ops
			.iter()
			.rposition(|op| matches!(op, DrawOp::RoundedRect { .. } | DrawOp::Text { .. }))
			.unwrap();
		let first_line = ops
			.iter()
			.position(|op| matches!(op, DrawOp::Line { .. }))
			.unwrap();
		assert!(last_node < first_line);
		assert!(renderer.node_boxes.is_empty());
	}

	#[test]
	fn fixated_nodes_are_pinned_by_the_draw_pass() {
		let mut system = StubSystem::default();
		let pinned = system.add_node(
			"a",
			NodeData {
				fixated: true,
				..labelled("a")
			},
			Point::new(0.0, 0.0),
		);
		let loose = system.add_node("b", labelled("b"), Point::new(10.0, 10.0));
		let mut renderer = renderer(system);
		renderer.redraw();

		let system = renderer.system().unwrap();
		assert!(system.node(pinned).fixed);
		assert!(!system.node(loose).fixed);
	}

	#[test]
	fn init_passes_screen_geometry_to_system() {
		let renderer = renderer(StubSystem::default());
		let system = renderer.system().unwrap();
		assert_eq!(system.screen, (800.0, 600.0));
		assert_eq!(system.padding, 40.0);
	}

	#[test]
	fn custom_label_factory_is_consulted() {
		let mut system = StubSystem::default();
		system.add_node("a", NodeData::default(), Point::new(0.0, 0.0));
		let labels = |node: &NodeView<'_>| format!("<{}>", node.name);
		let mut renderer: Renderer<Recorder, StubSystem, _> =
			Renderer::new(Recorder::default(), labels, RendererConfig::default());
		renderer.init(system, 100.0, 100.0);
		renderer.redraw();

		assert!(renderer.surface.ops.iter().any(|op| matches!(
			op,
			DrawOp::Text { text, .. } if text == "<a>"
		)));
	}
}
