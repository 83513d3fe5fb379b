//! Route pattern extraction for metrics labels.

use actix_web::HttpRequest;

/// Extract the route pattern from a request.
///
/// The API's routes are all static paths, so the request path is already the
/// pattern. Anything malformed is bucketed under `/unknown` to keep the
/// metrics label space bounded.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    let path = req.path();

    if path.starts_with('/') {
        path.to_string()
    } else {
        "/unknown".to_string()
    }
}
