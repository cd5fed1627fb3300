//! Course Shop admin: back-office for payment methods and sellers.
//!
//! Listens on port 3001 by default, over HTTPS when `ADMIN_TLS_CERT` and
//! `ADMIN_TLS_KEY` are set. Every read and write goes to the REST backend.
//!
//! # Security
//!
//! The backend token is a bearer credential. It stays in the server-side
//! session; the browser only ever sees the opaque session cookie.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use course_shop_admin::config::{AdminConfig, TlsConfig};
use course_shop_admin::state::AppState;
use course_shop_backend::SentryConfig;
use secrecy::ExposeSecret;
use sentry::integrations::tracing::{self as sentry_tracing, EventFilter};
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "course_shop_admin=info,course_shop_backend=info,tower_http=debug";

/// How long in-flight requests get once shutdown starts.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

fn start_sentry(config: &SentryConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.dsn.as_deref()?;
    let options = sentry::ClientOptions {
        release: sentry::release_name!(),
        environment: config.environment.clone().map(Into::into),
        sample_rate: config.sample_rate,
        traces_sample_rate: config.traces_sample_rate,
        attach_stacktrace: true,
        // Only the operator uses this panel
        send_default_pii: true,
        ..Default::default()
    };
    Some(sentry::init((dsn, options)))
}

fn sentry_level(metadata: &tracing::Metadata<'_>) -> EventFilter {
    match *metadata.level() {
        Level::ERROR | Level::WARN => EventFilter::Event,
        Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
        _ => EventFilter::Ignore,
    }
}

/// Text logs locally, flattened JSON on Fly.io.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let on_fly = std::env::var_os("FLY_APP_NAME").is_some();
    let json = on_fly.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text = (!on_fly).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .with(sentry_tracing::layer().event_filter(sentry_level))
        .init();
}

#[tokio::main]
async fn main() {
    // rustls needs a process-wide provider before any certificate is loaded
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("failed to install rustls crypto provider");

    let config = AdminConfig::from_env().expect("invalid admin configuration");

    let sentry_guard = start_sentry(&config.sentry);
    init_tracing();
    if sentry_guard.is_some() {
        tracing::info!("Sentry reporting enabled");
    }

    let addr = config.socket_addr();
    let tls = config.tls.clone();
    tracing::info!(%addr, backend = %config.backend.base_url, "Starting admin");

    let state = AppState::new(config).expect("failed to build admin state");
    let app = course_shop_admin::app(state)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    match tls {
        Some(tls) => serve_tls(app, addr, &tls).await,
        None => serve_plain(app, addr).await,
    }

    tracing::info!("Admin stopped");
}

async fn serve_tls(app: Router, addr: SocketAddr, tls: &TlsConfig) {
    let rustls_config = RustlsConfig::from_pem(
        tls.cert_pem.as_bytes().to_vec(),
        tls.key_pem.expose_secret().as_bytes().to_vec(),
    )
    .await
    .expect("failed to load TLS certificate and key");

    let handle = Handle::new();
    let draining = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        draining.graceful_shutdown(Some(DRAIN_TIMEOUT));
    });

    tracing::info!("Serving HTTPS");
    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .expect("admin server failed");
}

async fn serve_plain(app: Router, addr: SocketAddr) {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind admin address");

    tracing::info!("Serving HTTP");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("admin server failed");
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Ctrl+C handler failed");
    }

    tracing::info!("Shutdown requested, draining in-flight requests");
}
