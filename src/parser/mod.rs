//! Parser module - recording markup to typed test steps
//!
//! Leaf-first: the action classifier and selector builder feed the step
//! extractor, which the document parser drives. The validator checks the
//! assembled test case.

pub mod action;
pub mod document;
pub mod extractor;
pub mod selector;
pub mod validate;

pub use action::classify;
pub use document::{parse, MarkupParser};
pub use extractor::{extract, StepBlock};
pub use validate::validate;
