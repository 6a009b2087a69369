//! particle-field: Interactive particle background for the landing page.
//!
//! This crate provides a WASM canvas component that renders a breathing dot
//! grid reacting to pointer movement, with trail particles, click bursts and
//! expanding wave rings.

// Enables the browser entropy source for `rand` on wasm32.
use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{Color, FieldConfig, FieldState, ParticleFieldCanvas, Surface};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load tuning overrides from a script element with id="field-config".
/// Expected format: a JSON object with any subset of [`FieldConfig`] fields.
pub fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<FieldConfig>(&json_text) {
		Ok(config) => {
			info!("particle-field: loaded config overrides");
			Some(config)
		}
		Err(e) => {
			warn!("particle-field: failed to parse field config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Renders the landing hero with the particle field underneath.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Resume Feedback" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="hero" style="position: relative; width: 100%; height: 100vh; overflow: hidden;">
			<ParticleFieldCanvas config=config />
			<div class="hero-content" style="position: relative; z-index: 10; text-align: center;">
				<h1>"Smart Feedback For Your Dream Job"</h1>
				<p class="subtitle">"Get personalized insights and improve your chances of landing your dream position"</p>
			</div>
		</div>
	}
}
