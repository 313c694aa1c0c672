// Infrastructure layer - configuration, drawing surface and HTTP adapters
pub mod chunked_json;
pub mod config;
pub mod http_response;
pub mod svg_surface;
