//! glyph-field: interactive particle vector-field text visualization.
//!
//! This crate provides a WASM-based canvas component that decomposes a line
//! of text into a particle swarm with spring-anchored, pointer-reactive,
//! pulse-driven motion, plus a fullscreen application shell around it.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::vector_field::{FieldConfig, FieldData, FieldTheme, VectorFieldCanvas};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("glyph-field: logging initialized");
}

/// Load field data from a script element with id="field-data".
/// Expected format: JSON with { text: "...", theme: "..." }
fn load_field_data() -> Option<FieldData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<FieldData>(&json_text) {
		Ok(data) => {
			info!("glyph-field: loaded text {:?}", data.text);
			Some(data)
		}
		Err(e) => {
			warn!("glyph-field: failed to parse field data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the display text from the DOM and renders the vector field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let data = load_field_data().unwrap_or_default();
	let theme = data
		.theme
		.as_deref()
		.and_then(FieldTheme::by_name)
		.unwrap_or_default();
	let text = RwSignal::new(data.text);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Text as Field Vectors" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-field">
			<VectorFieldCanvas text=text fullscreen=true theme=Some(theme) />
			<div class="field-overlay">
				<h1>"Text as Field Vectors"</h1>
				<p class="subtitle">"Move the pointer through the swarm to disturb it."</p>
			</div>
		</div>
	}
}
