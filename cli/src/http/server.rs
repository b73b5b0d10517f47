//! HTTP server lifecycle

use super::{middleware::apply_middleware, routes::create_router, AppState};
use crate::commands::cli::ServeArgs;
use diffscope_core::api::{AppContext, CliError};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// CLI flags win over the config file.
    pub fn resolve(args: &ServeArgs, ctx: &AppContext) -> Self {
        let cfg = &ctx.cfg().http_server;
        Self {
            host: args.host.clone().unwrap_or_else(|| cfg.host.clone()),
            port: args.port.unwrap_or(cfg.port),
            request_timeout: Duration::from_secs(cfg.request_timeout_secs),
        }
    }
}

pub async fn handle_serve(args: ServeArgs, ctx: AppContext) -> Result<(), CliError> {
    let config = ServerConfig::resolve(&args, &ctx);
    let state = AppState::new(ctx);

    start_server(config, state)
        .await
        .map_err(|e: Box<dyn std::error::Error + Send + Sync>| CliError::Command(e.to_string()))
}

pub async fn start_server(
    config: ServerConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = apply_middleware(create_router(state), config.request_timeout);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C signal");
                }
                _ = wait_for_sigterm() => {
                    info!("Received SIGTERM signal");
                }
            }
            info!("Starting graceful shutdown...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::warn!("Failed to install SIGTERM handler: {}", e);
            std::future::pending::<()>().await
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffscope_core::api::{AppConfig, BackendError, GenerateRequest, GenerationBackend};
    use std::sync::Arc;

    struct NoopBackend;

    #[async_trait::async_trait]
    impl GenerationBackend for NoopBackend {
        fn name(&self) -> &str {
            "noop"
        }

        async fn generate(&self, _request: GenerateRequest) -> Result<String, BackendError> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_cli_flags_override_config() {
        let mut cfg = AppConfig::default();
        cfg.http_server.port = 9000;
        let ctx = AppContext::new(cfg, Arc::new(NoopBackend));

        let from_cfg = ServerConfig::resolve(&ServeArgs::default(), &ctx);
        assert_eq!(from_cfg.port, 9000);
        assert_eq!(from_cfg.host, "127.0.0.1");

        let args = ServeArgs {
            host: Some("0.0.0.0".into()),
            port: Some(7070),
        };
        let from_args = ServerConfig::resolve(&args, &ctx);
        assert_eq!(from_args.port, 7070);
        assert_eq!(from_args.host, "0.0.0.0");
    }
}
