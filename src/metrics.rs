//! Prometheus metrics: request counts/latency plus a counter per entity
//! mutation, exposed at `/metrics` in text exposition format.

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use once_cell::sync::Lazy;
use prometheus::{
    histogram_opts, opts, register_counter_vec_with_registry,
    register_histogram_vec_with_registry, CounterVec, HistogramVec, Registry, TextEncoder,
};

use crate::errors::ServiceError;

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

pub static HTTP_REQUESTS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec_with_registry!(
        opts!("showroom_http_requests_total", "HTTP requests processed"),
        &["method", "status"],
        REGISTRY
    )
    .expect("register http request counter")
});

pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec_with_registry!(
        histogram_opts!(
            "showroom_http_request_duration_seconds",
            "HTTP request latency"
        ),
        &["method"],
        REGISTRY
    )
    .expect("register http request histogram")
});

pub static ENTITY_MUTATIONS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec_with_registry!(
        opts!("showroom_entity_mutations_total", "Entity mutations applied"),
        &["entity", "action"],
        REGISTRY
    )
    .expect("register entity mutation counter")
});

/// Count a storage-level mutation. Called from handlers after a mutation
/// succeeds.
pub fn record_mutation(entity: &str, action: &str) {
    ENTITY_MUTATIONS.with_label_values(&[entity, action]).inc();
}

/// Axum middleware that tracks request counts and latency.
pub async fn track_http(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    HTTP_REQUEST_DURATION
        .with_label_values(&[&method])
        .observe(start.elapsed().as_secs_f64());
    HTTP_REQUESTS
        .with_label_values(&[&method, response.status().as_str()])
        .inc();
    response
}

/// Render the registry in Prometheus text exposition format.
pub fn render() -> Result<String, ServiceError> {
    TextEncoder::new()
        .encode_to_string(&REGISTRY.gather())
        .map_err(|err| ServiceError::InternalError(format!("metrics encoding failed: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_counter_shows_up_in_exposition() {
        record_mutation("banks", "create");
        let text = render().unwrap();
        assert!(text.contains("showroom_entity_mutations_total"));
    }
}
