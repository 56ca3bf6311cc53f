//! Pointer routing from the viewport to individual layers.
//!
//! The Bevy side turns cursor events into world-space rays and triggers
//! [`PointerMoved`] / [`PointerClicked`]. Observers forward them to the model, whose
//! [`InteractionRouter`] picks the nearest interactive surface and calls the owning
//! layer's hover or click hook.

/// Cursor to ray conversion, pointer events and their observer subscription.
pub mod pointer;

/// Hit selection and hover bookkeeping.
pub mod router;

pub use pointer::{PointerClicked, PointerMoved, PointerState, PointerSubscription};
pub use router::InteractionRouter;
