// Chunked snapshot streaming - one length-prefixed JSON frame per published snapshot
use crate::domain::dashboard::DashboardSnapshot;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;

pub const FRAME_CONTENT_TYPE: &str = "application/x-pulse-frames";

/// Create a chunked streaming response from a stream of snapshots
pub fn chunked_json_stream<S>(stream: S) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = Arc<DashboardSnapshot>> + Send + 'static,
{
    let byte_stream = stream.map(|snapshot| encode_frame(&snapshot));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, FRAME_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from_stream(byte_stream))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// 4-byte big-endian length followed by the JSON snapshot
pub fn encode_frame(snapshot: &DashboardSnapshot) -> Result<Bytes, std::io::Error> {
    let payload = serde_json::to_vec(snapshot)?;

    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(payload.len() as u32);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

/// Yield the current snapshot, then every newer one until the loop goes away.
/// Intermediate snapshots may be skipped if the client reads slower than the loop publishes.
pub fn snapshot_stream(
    mut rx: watch::Receiver<Arc<DashboardSnapshot>>,
) -> impl Stream<Item = Arc<DashboardSnapshot>> + Send + 'static {
    async_stream::stream! {
        let current = rx.borrow_and_update().clone();
        yield current;
        while rx.changed().await.is_ok() {
            let next = rx.borrow_and_update().clone();
            yield next;
        }
    }
}

/// Helper to create a streaming response from a snapshot receiver
pub fn stream_from_watch(rx: watch::Receiver<Arc<DashboardSnapshot>>) -> impl IntoResponse {
    match chunked_json_stream(snapshot_stream(rx)) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
