#![forbid(unsafe_code)]

//! Poster wall generation for media libraries.
//!
//! One synchronous pipeline per library: sample a color pair from a
//! reference cover, paint a horizontal gradient background, stack covers
//! into shadowed rounded columns, rotate and place the columns, overlay
//! localized titles with an accent block, write a single PNG.

pub mod blur_cpu;
pub mod column;
pub mod config;
pub mod error;
pub mod gradient;
pub mod layout;
pub mod palette;
pub mod rotate;
pub mod sampler;
pub mod shadow;
pub mod text;
pub mod workflow;

pub use column::{ColumnCanvas, assemble_column, round_corners};
pub use config::{Config, LayoutConfig, LibraryTitles, TEMPLATE_HEIGHT, TEMPLATE_WIDTH};
pub use error::{PosterError, PosterResult};
pub use gradient::gradient_background;
pub use sampler::{CoverColors, accent_color, dominant_pair};
pub use shadow::add_shadow;
pub use workflow::{PosterArtifacts, PosterWorkflow, discover_posters};
