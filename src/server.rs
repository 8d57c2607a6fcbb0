use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, error::Result, types::PkceToken};

/// Serves the OAuth callback and a health check on an already bound listener.
///
/// Runs until the task is aborted by the authorization flow.
pub async fn start_api_server(
    listener: TcpListener,
    state: Arc<Mutex<Option<PkceToken>>>,
    callback_path: String,
) -> Result<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route(&callback_path, get(api::callback).layer(Extension(state)));

    axum::serve(listener, app).await?;
    Ok(())
}
