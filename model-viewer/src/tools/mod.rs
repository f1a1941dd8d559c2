//! Interactive selection tools for the viewer.
//!
//! The host page owns the model and colour buttons and drives the
//! `Selection` resource over RPC. Native builds additionally map keyboard
//! shortcuts onto the same selection operations.
//!
//! ## Selection Flow
//!
//! ```text
//! RPC select_model / set_tint        Digit keys / T (native)
//!   └─> Selection::with_model / with_tint
//!       ├─> Selection resource updated (only when the value changes)
//!       ├─> selection_changed notification
//!       ├─> sync_model_selection(): respawn rig when the model differs
//!       └─> apply_selected_tint(): repaint surfaces when the tint differs
//! ```

/// Current model and tint selection, lookups and keyboard shortcuts.
pub mod model_selection;
