use crate::engine::assets::catalogue::Catalogue;
use crate::rig::state::RigState;
use crate::rpc::web_rpc::{RpcError, RpcRequest, RpcResponse};
use crate::tools::model_selection::Selection;
use bevy::prelude::*;
use serde::Deserialize;
use serde_json::{Value, json};

/// Read-only view of the viewer handed to each request handler.
pub struct RpcContext<'a> {
    /// `None` while the catalogue manifest is still loading.
    pub catalogue: Option<&'a Catalogue>,
    pub selection: Option<&'a Selection>,
    pub rig: Option<RigSnapshot>,
    pub fps: f64,
}

/// State of the active rig at the time of the request.
#[derive(Debug, Clone, PartialEq)]
pub struct RigSnapshot {
    pub model_id: String,
    pub state: RigState,
    /// Whether the scene has been bounded and recentred yet.
    pub framed: bool,
}

/// Result of dispatching one request.
#[derive(Debug, Default)]
pub struct RpcDispatch {
    /// `None` for notifications (requests without an id).
    pub response: Option<RpcResponse>,
    /// Replacement selection, applied by the caller.
    pub selection: Option<Selection>,
}

/// Route a request to its handler. Handlers run for notifications too; only
/// requests carrying an id get a response.
pub fn handle_rpc_request(request: &RpcRequest, context: &RpcContext) -> RpcDispatch {
    let mut selection = None;

    let result = match request.method.as_str() {
        "get_catalogue" => handle_get_catalogue(context),
        "get_selection" => handle_get_selection(context),
        "select_model" => handle_select_model(&request.params, context).map(|(value, next)| {
            selection = Some(next);
            value
        }),
        "set_tint" => handle_set_tint(&request.params, context).map(|(value, next)| {
            selection = Some(next);
            value
        }),
        "get_rig_state" => Ok(handle_get_rig_state(context)),
        "get_fps" => Ok(json!({ "fps": context.fps as f32 })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    if let Err(error) = &result {
        debug!("RPC {} failed: {}", request.method, error.message);
    }

    let response = request.id.clone().map(|id| match result {
        Ok(value) => RpcResponse::success(id, value),
        Err(error) => RpcResponse::failure(Some(id), error),
    });

    RpcDispatch {
        response,
        selection,
    }
}

fn require_catalogue<'a>(context: &RpcContext<'a>) -> Result<&'a Catalogue, RpcError> {
    context
        .catalogue
        .ok_or_else(|| RpcError::internal_error("Catalogue is still loading"))
}

fn require_selection<'a>(context: &RpcContext<'a>) -> Result<&'a Selection, RpcError> {
    context
        .selection
        .ok_or_else(|| RpcError::internal_error("Viewer is still loading"))
}

fn handle_get_catalogue(context: &RpcContext) -> Result<Value, RpcError> {
    Ok(require_catalogue(context)?.to_json())
}

fn handle_get_selection(context: &RpcContext) -> Result<Value, RpcError> {
    Ok(require_selection(context)?.to_json())
}

fn handle_select_model(
    params: &Value,
    context: &RpcContext,
) -> Result<(Value, Selection), RpcError> {
    #[derive(Deserialize)]
    struct SelectModelParams {
        model: String,
    }

    let params = serde_json::from_value::<SelectModelParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'model' parameter"))?;

    let next = require_selection(context)?.with_model(require_catalogue(context)?, &params.model)?;
    info!("Model selected via RPC: {}", next.model_id);

    Ok((json!({ "success": true, "model": next.model_id }), next))
}

fn handle_set_tint(params: &Value, context: &RpcContext) -> Result<(Value, Selection), RpcError> {
    #[derive(Deserialize)]
    struct SetTintParams {
        tint: String,
    }

    let params = serde_json::from_value::<SetTintParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'tint' parameter"))?;

    let next = require_selection(context)?.with_tint(require_catalogue(context)?, &params.tint)?;
    info!("Tint set via RPC: {}", next.tint.value);

    Ok((json!({ "success": true, "tint": next.tint.to_json() }), next))
}

fn handle_get_rig_state(context: &RpcContext) -> Value {
    let Some(rig) = &context.rig else {
        return json!({ "model": null });
    };

    let state = &rig.state;
    json!({
        "model": rig.model_id,
        "framed": rig.framed,
        "orientation": state.orientation.to_array(),
        "angular_velocity": state.angular_velocity.to_array(),
        "dragging": state.dragging,
    })
}
