//! Message handlers for a selection session
//!
//! `update()` dispatches each message to a handler. Handlers only touch
//! [`SessionState`]; a finished gesture hands back the query to send.

use super::messages::{ModeMsg, Msg, PointerMsg, QueryMsg};
use super::state::SessionState;
use crate::domain::{Estate, SelectionMode, Vertex};
use crate::query::QueryRequest;

/// Query to dispatch, if the message finished a gesture
pub type HandlerResult = Option<QueryRequest>;

/// Apply one message to the session
pub fn update(state: &mut SessionState, msg: Msg) -> HandlerResult {
    match msg {
        Msg::Pointer(PointerMsg::Press(v)) => handle_press(state, v),
        Msg::Pointer(PointerMsg::Move(v)) => handle_move(state, v),
        Msg::Pointer(PointerMsg::Release(v)) => handle_release(state, v),
        Msg::Mode(ModeMsg::Toggle) => {
            let mode = state.mode().toggled();
            handle_set_mode(state, mode)
        }
        Msg::Mode(ModeMsg::Set(mode)) => handle_set_mode(state, mode),
        Msg::Query(QueryMsg::Resolved {
            generation,
            estates,
        }) => handle_query_resolved(state, generation, estates),
        Msg::Query(QueryMsg::Failed { generation, error }) => {
            handle_query_failed(state, generation, error)
        }
    }
}

/// Handle a button press: start a new gesture
pub fn handle_press(state: &mut SessionState, vertex: Vertex) -> HandlerResult {
    if state.collector.start(vertex) {
        // The previous polygon only lives until the next gesture
        state.clear_selection();
    }
    None
}

/// Handle pointer movement during a gesture
pub fn handle_move(state: &mut SessionState, vertex: Vertex) -> HandlerResult {
    state.collector.extend(vertex);
    None
}

/// Handle button release: close the path and issue the estate query
pub fn handle_release(state: &mut SessionState, vertex: Vertex) -> HandlerResult {
    let polygon = state.collector.finish(vertex, state.closure)?;
    state.polygon = polygon;

    if state.polygon.is_empty() && state.skip_degenerate_queries {
        log::debug!("Gesture enclosed no region, not querying");
        return None;
    }

    state.pending = Some(state.generation);
    Some(QueryRequest {
        generation: state.generation,
        polygon: state.polygon.vertices().to_vec(),
    })
}

/// Handle a mode change. Entering draw mode always starts from a clean slate.
pub fn handle_set_mode(state: &mut SessionState, mode: SelectionMode) -> HandlerResult {
    log::info!("Selection mode: {:?} -> {:?}", state.mode(), mode);
    state.collector.set_mode(mode);
    if mode.is_draw() {
        state.clear_selection();
    }
    None
}

/// Handle candidates arriving from the backend
pub fn handle_query_resolved(
    state: &mut SessionState,
    generation: u64,
    estates: Vec<Estate>,
) -> HandlerResult {
    if state.pending != Some(generation) {
        log::debug!(
            "Dropping stale query response (generation {}, current {})",
            generation,
            state.generation
        );
        return None;
    }
    state.pending = None;
    state.last_error = None;
    state.candidates = estates;
    log::debug!(
        "Query {} returned {} candidates, {} selected",
        generation,
        state.candidates.len(),
        state.selected().count()
    );
    None
}

/// Handle a failed backend call: show nothing, keep the mode
pub fn handle_query_failed(state: &mut SessionState, generation: u64, error: String) -> HandlerResult {
    if state.pending != Some(generation) {
        log::debug!("Dropping stale query failure (generation {})", generation);
        return None;
    }
    log::warn!("No candidates for selection: {}", error);
    state.pending = None;
    state.candidates.clear();
    state.last_error = Some(error);
    None
}
