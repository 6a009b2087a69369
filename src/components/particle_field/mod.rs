//! Interactive particle-field background.
//!
//! Renders a grid of softly breathing dots on an HTML canvas with:
//! - Pointer proximity effects found through a spatial hash
//! - Trail particles on pointer movement and bursts on click or leave
//! - Expanding wave rings on click
//! - Configurable tuning loaded from the page
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleFieldCanvas};
//!
//! view! {
//!     <div style="position: relative; height: 100vh;">
//!         <ParticleFieldCanvas config=FieldConfig::default() />
//!         <h1 style="position: relative; z-index: 1;">"Hello"</h1>
//!     </div>
//! }
//! ```

mod component;
pub mod config;
mod field;
mod grid;
mod interaction;
mod particles;
pub mod render;
mod state;
pub mod theme;
mod waves;

pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use render::Surface;
pub use state::{FieldState, PointerState};
pub use theme::Color;
