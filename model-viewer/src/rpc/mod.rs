//! JSON-RPC 2.0 communication layer between the viewer and its host page.
//!
//! The viewer runs inside an iframe; the surrounding page owns the model and
//! colour buttons and talks to Bevy through `window.postMessage`, using both
//! request-response and notification patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ handle_rpc_request()
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        ├─ Notification (no ID) ───────────────> ├─ handled, no reply
//!        │                                        │
//!        │ <────────── Notification (no ID) ──────┤
//! ```
//!
//! Browser messages are pushed into a shared queue by the `message` listener,
//! drained once per frame into `IncomingRpcMessage` events, dispatched, and
//! the queued replies are posted back to `window.parent` at the end of the
//! same frame. Native builds have no listener; the queue simply stays absent.
//!
//! ## Adding New RPC Methods
//!
//! Add a match arm in `methods::handle_rpc_request()` and a handler returning
//! `Result<Value, RpcError>`:
//!
//! ```rust,ignore
//! fn handle_your_method(params: &Value, context: &RpcContext) -> Result<Value, RpcError> {
//!     #[derive(Deserialize)]
//!     struct YourParams {
//!         field: String,
//!     }
//!
//!     let parsed = serde_json::from_value::<YourParams>(params.clone())
//!         .map_err(|_| RpcError::invalid_params("Expected 'field' parameter"))?;
//!
//!     Ok(json!({ "success": true, "field": parsed.field }))
//! }
//! ```
//!
//! Handlers never mutate the world. Methods that change the selection return
//! the replacement `Selection`, which the dispatching system writes back only
//! when it differs from the current one.
//!
//! ## Calling From the Host Page
//!
//! ```typescript
//! iframe.contentWindow.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "select_model",
//!   params: { model: "tiger" },
//!   id: 1
//! }), "*");
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32700`: Parse error (reply carries a null id)
//! - `-32601`: Method not found
//! - `-32602`: Invalid params, including unknown models and malformed tints
//! - `-32603`: Internal error, e.g. a request arriving before the catalogue loaded
//!
//! ## Methods
//!
//! - `get_catalogue`: preset models and tint palette
//! - `get_selection`: current `{ model, tint }`
//! - `select_model { model }`: id, display name or asset path
//! - `set_tint { tint }`: palette name or `#RRGGBB` / `#RRGGBBAA`
//! - `get_rig_state`: orientation, angular velocity and drag flag of the active rig
//! - `get_fps`: current frame rate
//!
//! ## Notifications
//!
//! - `viewer_ready`: catalogue and initial selection, once loading completes
//! - `selection_changed`: any later selection change, from RPC or keyboard
//! - `model_loaded`: `{ model, center, extent, camera_distance }` after framing
//! - `fps_update`: every half second

/// Request dispatch and method handlers.
pub mod methods;

/// JSON-RPC 2.0 protocol types, message listener and outgoing transport.
pub mod web_rpc;
