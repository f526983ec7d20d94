//! Reusable admin service runtime.
//!
//! [`ServerHandle`] wires the stores, the admin service and the REST API
//! together, seeds the default admin account and owns graceful shutdown.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::admin::{AdminService, FixedStatsPolicy, SharedAdminService};
use crate::config::AppConfig;
use crate::domain::{NewUserRecord, ProjectStore, StoreError, UserStore};
use crate::infrastructure::crypto::password::hash_password_with_cost;
use crate::infrastructure::{InMemoryProjectStore, InMemoryUserStore};
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to install Prometheus recorder: {0}")]
    Metrics(#[from] BuildError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the admin service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Create the configured admin account when no users exist (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running admin service.
pub struct ServerHandle {
    /// Admin service shared with the HTTP layer.
    pub admin_service: SharedAdminService,
    /// User store backing the service.
    pub users: Arc<dyn UserStore>,
    /// Project store backing the service.
    pub projects: Arc<dyn ProjectStore>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is listening on.
    pub local_addr: std::net::SocketAddr,

    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global metrics recorder can only be installed once per process, so a
/// restart within the same process reuses it.
fn prometheus_handle() -> Result<PrometheusHandle, ServerError> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

impl ServerHandle {
    /// Start the admin service.
    ///
    /// 1. Install the Prometheus recorder
    /// 2. Build the stores and the admin service
    /// 3. Seed the default admin (if enabled and the store is empty)
    /// 4. Start the REST API (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, ServerError> {
        let app_cfg = opts.config;

        info!("Starting ESDC admin service...");

        let prometheus_handle = prometheus_handle()?;

        // ── Stores & Services ──────────────────────────────────
        let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        let projects: Arc<dyn ProjectStore> = Arc::new(InMemoryProjectStore::new());

        let admin_service: SharedAdminService = Arc::new(
            AdminService::new(users.clone(), projects.clone())
                .with_stats_policy(Arc::new(FixedStatsPolicy::from(&app_cfg.stats)))
                .with_password_cost(app_cfg.security.bcrypt_cost),
        );

        if opts.create_default_admin {
            create_default_admin(users.as_ref(), &app_cfg).await;
        }

        let jwt_config = app_cfg.security.jwt_config();
        info!(issuer = %jwt_config.issuer, "JWT verification configured");

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(admin_service.clone(), jwt_config, prometheus_handle);

        let api_addr = app_cfg.api_address();
        let listener = tokio::net::TcpListener::bind(&api_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: api_addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: api_addr.clone(),
            source,
        })?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            admin_service,
            users,
            projects,
            config: app_cfg,
            local_addr,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered,
    /// bounded by `server.shutdown_timeout`.
    pub async fn wait(self) {
        info!("Waiting for in-flight requests to complete...");

        let timeout = Duration::from_secs(self.shutdown.timeout_secs());
        match tokio::time::timeout(timeout, self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => warn!(
                "Graceful shutdown timed out after {}s",
                self.shutdown.timeout_secs()
            ),
        }

        info!("ESDC admin service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Create the configured admin account if no users exist
async fn create_default_admin(users: &dyn UserStore, app_cfg: &AppConfig) {
    let users_count = match users.count().await {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count users: {}", e);
            return;
        }
    };
    if users_count > 0 {
        return;
    }

    info!("Creating default admin user...");
    let seed = &app_cfg.admin;

    let password_hash = match hash_password_with_cost(&seed.password, app_cfg.security.bcrypt_cost)
    {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    let now = chrono::Utc::now();
    let admin = NewUserRecord {
        name: seed.name.clone(),
        username: seed.username.clone(),
        email: seed.email.clone(),
        role: crate::auth::ADMIN_ROLE.to_string(),
        password_hash,
        github: None,
        created_at: now,
        updated_at: now,
    };

    match users.create(admin).await {
        Ok(()) => {
            info!(username = %seed.username, "Default admin created");
            warn!("Please change the default admin password immediately!");
        }
        Err(StoreError::Conflict(reason)) => warn!("Default admin not created: {}", reason),
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.server.api_host = "127.0.0.1".into();
        cfg.server.api_port = 0;
        cfg.server.shutdown_timeout = 5;
        cfg.security.bcrypt_cost = 4;
        cfg
    }

    #[tokio::test]
    async fn seeds_admin_once() {
        let users = InMemoryUserStore::new();
        let cfg = test_config();

        create_default_admin(&users, &cfg).await;
        create_default_admin(&users, &cfg).await;

        let all = users.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].username, "admin");
        assert_eq!(all[0].role, "admin");
    }

    #[tokio::test]
    async fn starts_and_shuts_down() {
        let handle = ServerHandle::start(ServerOptions {
            config: test_config(),
            create_default_admin: true,
        })
        .await
        .unwrap();

        assert!(handle.is_running());
        assert_ne!(handle.local_addr.port(), 0);
        assert_eq!(handle.admin_service.list_users().await.unwrap().len(), 1);

        handle.shutdown().await;
    }
}
