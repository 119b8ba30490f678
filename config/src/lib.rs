//! # Config Crate
//!
//! Centralized configuration constants for the keycase geometry kernel.
//! Tolerances, wall construction defaults and export hints are defined here
//! so the kernel and the renderers agree on a single set of values.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{approx_zero, DEFAULT_WALL_THICKNESS, EPSILON};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 1e-12;
//! assert!(value.abs() < EPSILON);
//! assert!(approx_zero(value));
//!
//! // Wall construction falls back to the shared default thickness
//! let requested: Option<f64> = None;
//! let thickness = requested.unwrap_or(DEFAULT_WALL_THICKNESS);
//! assert_eq!(thickness, DEFAULT_WALL_THICKNESS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure values, usable from every crate
//! - **OpenSCAD Compatible**: Export hints match OpenSCAD defaults

pub mod constants;
