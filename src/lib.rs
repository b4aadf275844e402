//! gridplot: grid-paper layout and equation-rendering engine.
//!
//! This crate turns a grid configuration plus an ordered equation collection
//! into a backend-agnostic vector scene. Expression compilation, text shaping
//! and rasterization stay behind injected collaborator seams so the engine is
//! fully testable headless.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod telemetry;
pub mod text;

pub use api::{GridEngine, RedrawInput, RedrawOutput};
pub use error::{GridError, GridResult};
