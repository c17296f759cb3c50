//! Tunable constants for drawing, interaction and the simulation adapter.
//!
//! Every struct deserializes with `#[serde(default)]`, so a host page only needs
//! to spell out the values it wants to change:
//!
//! ```json
//! { "renderer": { "screen_padding": 60, "edge": { "default_color": "#999999" } } }
//! ```

use force_graph::SimulationParameters;
use serde::Deserialize;

/// Node drawing parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct NodeStyleConfig {
	/// Canvas font used to measure and draw labels.
	pub label_font: String,
	/// Added to the measured label width to size the node.
	pub label_padding: f64,
	/// Drawn height of a box node.
	pub box_height: f64,
	/// Extra height recorded in a box node's bounding box.
	pub box_inset: f64,
	pub corner_radius: f64,
	/// Vertical offset from the node centre to the label baseline.
	pub label_baseline: f64,
	pub default_fill: String,
	pub default_alpha: f64,
	pub label_color: String,
	/// Label color used on nodes whose fill is `"none"`.
	pub label_color_unfilled: String,
}

impl Default for NodeStyleConfig {
	fn default() -> Self {
		Self {
			label_font: "12px Helvetica".into(),
			label_padding: 10.0,
			box_height: 20.0,
			box_inset: 1.0,
			corner_radius: 4.0,
			label_baseline: 4.0,
			default_fill: "#000000".into(),
			default_alpha: 0.2,
			label_color: "white".into(),
			label_color_unfilled: "#333333".into(),
		}
	}
}

/// Edge drawing parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EdgeStyleConfig {
	pub default_color: String,
	/// Line width when the edge weight is missing or unreadable.
	pub default_width: f64,
	/// Arrow length before the edge weight is added.
	pub arrow_length: f64,
	/// Arrow half-width before the edge weight is added.
	pub arrow_width: f64,
}

impl Default for EdgeStyleConfig {
	fn default() -> Self {
		Self {
			default_color: "#cccccc".into(),
			default_width: 1.0,
			arrow_length: 6.0,
			arrow_width: 2.0,
		}
	}
}

/// Pointer interaction parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
	/// A press and release closer than this on both axes counts as a click.
	pub click_distance: f64,
	/// Temporary mass given to a node when it is dropped.
	pub drop_mass: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			click_distance: 5.0,
			drop_mass: 1000.0,
		}
	}
}

/// Complete renderer configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
	/// Screen margin kept free around the projected graph.
	pub screen_padding: f64,
	pub node: NodeStyleConfig,
	pub edge: EdgeStyleConfig,
	pub interaction: InteractionConfig,
}

impl Default for RendererConfig {
	fn default() -> Self {
		Self {
			screen_padding: 40.0,
			node: NodeStyleConfig::default(),
			edge: EdgeStyleConfig::default(),
			interaction: InteractionConfig::default(),
		}
	}
}

/// Parameters for the `force_graph` backed particle system.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	/// Mass of every node outside of a drop.
	pub node_mass: f32,
	/// Rate (per second) at which a dropped node's temporary mass relaxes.
	pub mass_relax_rate: f64,
	/// Fraction of the gap to the target bounds closed each tick.
	pub bounds_easing: f64,
	/// Smallest extent of the projected bounds on either axis.
	pub min_bounds: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			mass_relax_rate: 2.0,
			bounds_easing: 0.05,
			min_bounds: 4.0,
		}
	}
}

impl SimulationConfig {
	pub fn parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

/// Top-level document read from the host page.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	pub renderer: RendererConfig,
	pub simulation: SimulationConfig,
}
