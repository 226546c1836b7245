use std::sync::Arc;

use crate::endpoints::*;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
};
use config::Config;
use data::Data;
use files::FileStore;
use http::{HeaderValue, Method, header};
use state::AppState;
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod auth_middleware;
pub mod config;
pub mod data;
pub mod endpoints;
pub mod error;
pub mod files;
mod services;
pub mod state;
pub mod statement_parsing;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::new().expect("config"));
    let data = Data::new(&config).await.expect("data");
    let files = FileStore::new(&config.upload_dir);
    let state = AppState {
        config: config.clone(),
        data,
        files,
    };

    let transaction_routes = Router::new()
        .route("/", get(transactions::query).post(transactions::create))
        .route("/with-receipt", post(transactions::create_with_receipt))
        .route("/import", post(transactions::import))
        .route(
            "/{id}",
            get(transactions::get_one)
                .patch(transactions::update)
                .delete(transactions::delete),
        )
        .route(
            "/{id}/evidences",
            get(evidences::query).post(evidences::upload),
        )
        .route(
            "/{id}/evidences/{evidence_id}",
            patch(evidences::update).delete(evidences::delete),
        );

    let receipt_routes = Router::new()
        .route("/", post(receipts::upload))
        .route("/{id}", delete(receipts::delete_one))
        .route(
            "/transaction/{transaction_id}",
            delete(receipts::delete_for_transaction),
        )
        .route("/preview/{transaction_id}", get(receipts::preview));

    let member_routes = Router::new()
        .route("/", get(members::query).post(members::create))
        .route("/check-payment", post(members::check_payment))
        .route("/{id}", patch(members::update).delete(members::delete));

    let notice_routes = Router::new()
        .route("/", get(notices::query).post(notices::create))
        .route("/check-new", get(notices::check_new))
        .route("/mark-seen", post(notices::mark_seen))
        .route(
            "/{id}",
            get(notices::get_one)
                .patch(notices::update)
                .delete(notices::delete),
        );

    let audit_routes = Router::new()
        .route("/transactions", get(audit::all_transactions))
        .route(
            "/transactions/{id}/review-status",
            patch(audit::update_review_status),
        )
        .route("/clubs", get(audit::clubs))
        .route("/dashboard-summary", get(audit::dashboard_summary))
        .route("/statistics-by-club", get(audit::statistics_by_club))
        .route("/monthly-summary/{club_name}", get(audit::monthly_summary))
        .route("/my-club/statistics", get(audit::my_club_statistics))
        .route(
            "/my-club/monthly-summary",
            get(audit::my_club_monthly_summary),
        )
        .route("/receipts", get(audit::all_receipts))
        .route(
            "/comments/{transaction_id}",
            get(audit::query_comments).post(audit::create_comment),
        )
        .route(
            "/comment/{id}",
            patch(audit::update_comment).delete(audit::delete_comment),
        )
        .route("/comments-summary", get(audit::comments_summary));

    let routes = Router::new()
        .route("/@me", get(me::get_me))
        .route("/calendar", get(transactions::calendar))
        .route("/openapi.json", get(openapi))
        .nest("/transactions", transaction_routes)
        .nest("/receipts", receipt_routes)
        .nest("/members", member_routes)
        .nest("/notices", notice_routes)
        .nest("/audit", audit_routes);

    // dev login in debug mode
    #[cfg(debug_assertions)]
    let routes = routes.route("/auth/___dev_login___", post(auth::___dev_login___));

    let routes = routes
        .layer(DefaultBodyLimit::max(25 * 1024 * 1024))
        .layer(cors(&config))
        .with_state(state);

    let api = Router::new().nest("/api", routes);

    let listener = TcpListener::bind("127.0.0.1:8000").await.unwrap();
    tracing::debug!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, api)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

fn cors(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_methods([
            Method::OPTIONS,
            Method::HEAD,
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ACCEPT_ENCODING,
            header::ACCEPT_LANGUAGE,
        ])
        .allow_origin(
            config
                .front_base_url
                .parse::<HeaderValue>()
                .expect("allow origin value"),
        )
        .allow_credentials(true)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("error installing ctrl+c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("error installing signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
