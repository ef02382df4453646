//! # Core Module
//!
//! Fundamental types shared by every part of the cave generator: the error
//! taxonomy returned at construction time and the serializable configuration
//! that drives generation.
//!
//! ## Key Components
//! - `GeneratorError`: Precondition failures raised while building a generator
//! - `CaveConfig`: Dimensions, noise layers, carve list and feature parameters

pub mod config;
pub mod error;

pub use config::CaveConfig;
pub use error::{GeneratorError, Result};
