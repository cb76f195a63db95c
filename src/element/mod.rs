//! Element tree: node storage, topology and the per-frame traversals.
//!
//! Layout lives in [`crate::layout`]; everything else a frame needs
//! (update, draw, cursor and keyboard dispatch) is implemented here.

mod behavior;
mod core;
mod node;

slotmap::new_key_type! {
    /// Handle to a node stored in an [`ElementTree`].
    pub struct ElementId;
}

pub use behavior::{Behavior, Callbacks, ElementContext, EventFlow, PlainElement};
pub use self::core::{ElementTree, HitTestPolicy};
pub use node::{Element, Orientation};
