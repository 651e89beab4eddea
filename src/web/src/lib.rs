mod accounts;
mod auth;
mod clubs;
mod common;
mod error;
mod federations;
mod fixtures;
mod news;
mod public;
mod routes;
mod sbo;
mod teams;
mod venues;

pub use error::{ApiError, ApiResult};

use crate::routes::ServerRoutes;
use axum::response::IntoResponse;
use database::Storage;
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

pub struct SportdeskServer {
    data: AppData,
    addr: SocketAddr,
}

impl SportdeskServer {
    pub fn new(data: AppData, addr: SocketAddr) -> Self {
        SportdeskServer { data, addr }
    }

    pub async fn run(&self) {
        let app = ServerRoutes::create()
            .layer(
                ServiceBuilder::new()
                    // Catch panics in handlers and convert them to 500 errors
                    .layer(CatchPanicLayer::custom(|_err| {
                        (
                            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                            "Internal server error - handler panicked".to_string(),
                        )
                            .into_response()
                    })),
            )
            .with_state(self.data.clone());

        let listener = match TcpListener::bind(self.addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Failed to bind to address {}: {}", self.addr, e);
                panic!("Cannot start server without binding to port");
            }
        };

        info!("listen at: http://{}", self.addr);

        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    }
}

#[derive(Clone)]
pub struct AppData {
    pub storage: Arc<Storage>,
}

impl AppData {
    pub fn new(storage: Storage) -> Self {
        AppData {
            storage: Arc::new(storage),
        }
    }
}
