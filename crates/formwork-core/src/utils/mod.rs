//! Utility functions for formwork.
//!
//! This module provides:
//! - [`text`]: label humanization and capitalization helpers.
//! - [`html`]: HTML escaping for content and attribute values.

pub mod html;
pub mod text;
