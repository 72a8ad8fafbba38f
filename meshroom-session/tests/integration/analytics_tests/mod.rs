
#[cfg(feature = "http-analytics")]
pub use collector::spawn_collector;

#[cfg(feature = "http-analytics")]
mod collector {
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    async fn collect(
        State(tx): State<mpsc::UnboundedSender<Value>>,
        Json(body): Json<Value>,
    ) -> StatusCode {
        let _ = tx.send(body);
        StatusCode::NO_CONTENT
    }

    /// Starts a collector on an ephemeral port and returns its samples endpoint.
    pub async fn spawn_collector() -> (String, mpsc::UnboundedReceiver<Value>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Router::new()
            .route("/samples", post(collect))
            .with_state(tx);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/samples", addr), rx)
    }
}
