//! Shared helpers for tests that need real listeners.

use std::net::SocketAddr;

/// Serves `app` on an ephemeral localhost port and returns the bound address.
pub async fn spawn_app(app: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .expect("Test server failed");
    });

    addr
}
