use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// CORS for the public site and the admin panel. Permissive for
/// development; tighten for production.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Request/response logging layer.
pub fn trace_layer(
) -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
}
