//! Server Implementation
//!
//! HTTP server startup and shutdown

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::api;
use crate::core::{Config, Result, ServerError, ServerState, StoreBackend};
use crate::services::{SeedOutcome, seed_sample_menu};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Bind `0.0.0.0:<http_port>` and serve until Ctrl-C
    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        if self.config.is_production() && self.config.store_backend == StoreBackend::Memory {
            tracing::warn!("In-memory store in production: all data is lost on restart");
        }

        if self.config.seed_sample_data {
            match seed_sample_menu(&state.menu_repo()).await {
                Ok(SeedOutcome::Seeded(count)) => tracing::info!(count, "Seeded sample menu"),
                Ok(SeedOutcome::AlreadySeeded) => {
                    tracing::debug!("Sample menu already present, skipping seed")
                }
                Err(e) => return Err(ServerError::Internal(e.into())),
            }
        }

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(
            %addr,
            environment = %self.config.environment,
            "☕ Cafe server listening"
        );

        let app = api::build_app(&state).with_state(state);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
