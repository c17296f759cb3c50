//! Pointer handling: press to grab the nearest node, move to drag it, release
//! to drop it. A release close to the press point counts as a click.

use log::debug;

use super::events::{PayloadNodeClick, RendererEvent};
use super::geometry::Point;
use super::labels::LabelFactory;
use super::render::Renderer;
use super::simulation::ParticleSystem;
use super::surface::DrawingSurface;

/// Selection and drag state between a press and a release.
#[derive(Clone, Debug, PartialEq)]
pub struct Interaction<Id> {
	pub selected: Option<Id>,
	pub nearest: Option<Id>,
	pub dragged: Option<Id>,
	/// Screen point of the press that started the drag.
	pub drag_start: Option<Point>,
}

impl<Id> Default for Interaction<Id> {
	fn default() -> Self {
		Self {
			selected: None,
			nearest: None,
			dragged: None,
			drag_start: None,
		}
	}
}

/// What the host should do with its move/release listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tracking {
	Unchanged,
	/// Start listening for moves on the surface and releases on the window.
	Begin,
	/// Stop listening for moves and releases.
	End,
}

/// How a pointer event was handled.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerOutcome {
	/// The host should suppress the browser's default handling.
	pub prevent_default: bool,
	pub tracking: Tracking,
}

impl PointerOutcome {
	pub const IGNORED: Self = Self {
		prevent_default: false,
		tracking: Tracking::Unchanged,
	};
	pub const HANDLED: Self = Self {
		prevent_default: true,
		tracking: Tracking::Unchanged,
	};
	pub const BEGIN: Self = Self {
		prevent_default: true,
		tracking: Tracking::Begin,
	};
	pub const END: Self = Self {
		prevent_default: true,
		tracking: Tracking::End,
	};
}

/// True when `a` and `b` are closer than `distance` on both axes.
pub fn points_are_close(a: Point, b: Point, distance: f64) -> bool {
	(a.x - b.x).abs() < distance && (a.y - b.y).abs() < distance
}

impl<S, P, L> Renderer<S, P, L>
where
	S: DrawingSurface,
	P: ParticleSystem,
	L: LabelFactory,
{
	pub fn interaction(&self) -> &Interaction<P::NodeId> {
		&self.interaction
	}

	/// Pointer pressed at `screen` (surface pixels). Grabs and pins the nearest node.
	pub fn pointer_down(&mut self, screen: Point) -> PointerOutcome {
		let Some(system) = self.system.as_mut() else {
			return PointerOutcome::IGNORED;
		};

		self.interaction.drag_start = Some(screen);
		let hit = system
			.nearest(system.from_screen(screen))
			.map(|nearest| nearest.node);
		self.interaction.selected = hit;
		self.interaction.nearest = hit;
		self.interaction.dragged = hit;

		let Some(node) = hit else {
			return PointerOutcome::HANDLED;
		};
		system.set_fixed(node, true);
		debug!("graph-renderer: grabbed {node:?} at ({}, {})", screen.x, screen.y);
		PointerOutcome::BEGIN
	}

	/// Pointer moved to `screen` while pressed. Moves the grabbed node there.
	pub fn pointer_move(&mut self, screen: Point) -> PointerOutcome {
		let Some(system) = self.system.as_mut() else {
			return PointerOutcome::IGNORED;
		};
		if self.interaction.nearest.is_none() {
			return PointerOutcome::IGNORED;
		}

		if let Some(node) = self.interaction.dragged {
			let p = system.from_screen(screen);
			system.set_position(node, p);
		}
		PointerOutcome::HANDLED
	}

	/// Pointer released at `screen`. Drops the grabbed node and reports a click
	/// when the pointer barely moved.
	pub fn pointer_up(&mut self, screen: Point) -> PointerOutcome {
		let Some(system) = self.system.as_mut() else {
			return PointerOutcome::IGNORED;
		};
		let Some(node) = self.interaction.dragged else {
			return PointerOutcome::IGNORED;
		};

		let (name, fixated) = system
			.with_node(node, |view| (view.name.to_string(), view.data.fixated))
			.unwrap_or_default();
		system.set_fixed(node, fixated);
		system.set_temp_mass(node, self.config.interaction.drop_mass);

		let clicked = self.interaction.drag_start.is_some_and(|start| {
			points_are_close(start, screen, self.config.interaction.click_distance)
		});
		self.interaction = Interaction::default();

		if clicked {
			debug!("graph-renderer: clicked {name}");
			self.listeners
				.publish(&RendererEvent::NodeClick(PayloadNodeClick { node, name }));
		} else {
			debug!("graph-renderer: dropped {name}");
		}
		PointerOutcome::END
	}
}
