//! Domain models for the mission list.
//!
//! # Core Concepts
//!
//! ## Durable Entities
//!
//! - [`Mission`]: A to-do record with a title, free-text description and a
//!   completion flag. The ordered list of missions is the only state that is
//!   written to storage.
//!
//! ## Transient Entities
//!
//! These exist only while the application runs and are never persisted:
//!
//! - [`EditBuffer`]: In-progress edits to one mission, committed on save.
//! - [`Draft`]: Contents of the add form, committed on submit.

mod buffer;
mod mission;

pub use buffer::*;
pub use mission::*;
