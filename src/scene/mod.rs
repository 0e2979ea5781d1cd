//! JSON effect documents.

/// Document schema and loading.
pub mod document;

pub use document::{EffectDef, EffectDocument, FontDef};
