//! The layer contract the orchestrator drives, and a concrete box layer.
//!
//! Every stage of a visualised pipeline is a [`LayerHandle`]. The model calls its
//! hooks in a fixed order: `set_last_layer` (unless merged), `set_environment`,
//! `load_model_config` and `assemble` when added; `init` once layout is known;
//! `update_value` after each prediction; the hover and click hooks from the router.

/// Box-per-slot layer with hover highlight and click selection.
pub mod block;

/// `LayerHandle` trait and the values passed through its hooks.
pub mod handle;

#[cfg(test)]
pub(crate) mod testing;

pub use block::BlockLayer;
pub use handle::{LayerEnvironment, LayerError, LayerHandle, LayerKind, LayerLink, ModelContext};
