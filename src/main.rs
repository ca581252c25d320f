use givebox::notify::LogNotifier;
use givebox::store::{self, MemStorage};
use givebox::{app, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let state = AppState {
        storage: store::shared(MemStorage::with_sample_data()),
        notifier: Arc::new(LogNotifier),
    };

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind port 3000");
    tracing::info!("Server running on http://0.0.0.0:3000");
    axum::serve(listener, app(state)).await.unwrap();
}
