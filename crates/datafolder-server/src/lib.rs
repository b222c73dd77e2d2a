//! HTTP layer for `datafolder`.
//!
//! One generic set of axum handlers serves every table in a
//! [`Catalog`](datafolder_core::Catalog); the table is picked per request
//! from the `{resource}` path segment. The catalog is loaded before the
//! listener is bound and is shared read-only through [`AppState`].
#![deny(missing_docs)]
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use datafolder_core::Catalog;
use log::{info, warn};
use snafu::prelude::*;
use tokio::net::TcpListener;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use router::{AppState, build_router};

use error::{BindSnafu, ServeSnafu};

/// Bind the listening socket described by `config`.
pub async fn bind(config: &ServerConfig) -> ServerResult<TcpListener> {
    let addr = config.bind_addr();
    TcpListener::bind(&addr).await.with_context(|_| BindSnafu {
        addr: addr.clone(),
        port: config.port,
    })
}

/// Serve `catalog` on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, catalog: Arc<Catalog>) -> ServerResult<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("serving {} tables on http://{addr}", catalog.len());
    }

    let router = build_router(AppState::new(catalog));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context(ServeSnafu)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested, stopping server"),
        Err(e) => {
            warn!("cannot listen for Ctrl-C ({e}); serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
