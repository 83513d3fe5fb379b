//! HTTP utility functions for extracting request information.

use actix_web::HttpRequest;

/// Extract the client identifier (IP address) from a request.
///
/// Deployments behind a reverse proxy pass the real client address in
/// `X-Forwarded-For`; the first entry of that list wins. Falls back to the
/// peer address of the connection.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    for header_name in ["X-Forwarded-For", "X-Real-IP"] {
        if let Some(header_value) = req.headers().get(header_name) {
            if let Ok(header_str) = header_value.to_str() {
                // X-Forwarded-For can contain multiple hops, take the first
                let ip = header_str.split(',').next().unwrap_or(header_str).trim();
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// Extract the user agent from request headers, if present.
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}
