use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures::Stream;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

use crate::AppState;

/// SSE stream of entity-change events. Clients hold one subscription and
/// refetch whatever a received event invalidates; a lagged subscriber
/// simply misses old events and refetches on the next one.
async fn subscribe(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let stream = BroadcastStream::new(state.events.subscribe()).filter_map(|result| {
        result
            .ok()
            .and_then(|event| SseEvent::default().json_data(&event).ok())
            .map(Ok)
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

pub fn event_routes() -> Router<AppState> {
    Router::new().route("/", get(subscribe))
}
