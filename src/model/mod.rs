//! Document model types for formatted resume content.
//!
//! This module defines the intermediate representation that bridges the
//! layout builder and the renderers. Blocks carry their typography already
//! resolved, so every renderer emits the same content.

mod block;
mod document;
mod identity;
mod text;

pub use block::{SkillEntry, SkillsGrid, SkillsRow, StyledBlock, HEADER_SEPARATOR};
pub use document::{Document, Metadata};
pub use identity::{Contact, Identity};
pub use text::{Alignment, TextRun, TextStyle};
