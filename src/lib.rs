//! graph-renderer: interactive force-directed graph rendering on a canvas.
//!
//! This crate provides a WASM-based component that draws a force-directed
//! graph every animation frame and lets the user drag nodes around and click
//! them.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::graph_renderer::{
	GraphConfig, GraphData, GraphLink, GraphNode, GraphRendererCanvas, Renderer, RendererConfig,
	RendererEvent,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graph-renderer: logging initialized");
}

/// Parse the JSON text of the script element with the given id.
fn load_json<T: DeserializeOwned>(id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("graph-renderer: failed to parse #{id}: {e}");
			None
		}
	}
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let data = load_json::<GraphData>("graph-data")?;
	info!(
		"graph-renderer: loaded {} nodes, {} links",
		data.nodes.len(),
		data.links.len()
	);
	Some(data)
}

/// Load optional settings from a script element with id="graph-config".
fn load_graph_config() -> GraphConfig {
	load_json("graph-config").unwrap_or_default()
}

/// Main application component.
/// Loads graph data from DOM and renders the interactive graph.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_default();
	let graph_signal = Signal::derive(move || graph_data.clone());
	let (selected, set_selected) = signal(None::<String>);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Graph Renderer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<GraphRendererCanvas
				data=graph_signal
				config=load_graph_config()
				fullscreen=true
				on_node_click=move |name: String| set_selected.set(Some(name))
			/>
			<div class="graph-overlay">
				<p class="subtitle">"Drag nodes to reposition. Click a node to select it."</p>
				<p class="selection">
					{move || selected.get().map(|name| format!("Selected: {name}"))}
				</p>
			</div>
		</div>
	}
}
