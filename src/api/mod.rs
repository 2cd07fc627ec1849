use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{
    AuthService, JsonSettingsService, Mailer, MdxPostService, PostService, QuoteService,
    SettingsService, SmtpMailer, StaticAdminAuthService,
};

pub mod auth;
mod contact;
mod error;
mod posts;
mod quotes;
mod settings;
mod system;
mod types;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub auth: Arc<dyn AuthService>,

    pub posts: Arc<dyn PostService>,

    pub settings: Arc<dyn SettingsService>,

    pub mailer: Arc<dyn Mailer>,

    pub quotes: Arc<QuoteService>,

    pub start_time: std::time::Instant,
}

pub fn create_app_state(config: Arc<Config>) -> anyhow::Result<Arc<AppState>> {
    let mailer = Arc::new(
        SmtpMailer::new(&config.smtp)
            .map_err(|e| anyhow::anyhow!("Failed to build SMTP transport: {e}"))?,
    );
    Ok(create_app_state_with_mailer(config, mailer))
}

pub fn create_app_state_with_mailer(
    config: Arc<Config>,
    mailer: Arc<dyn Mailer>,
) -> Arc<AppState> {
    let auth = Arc::new(StaticAdminAuthService::new(config.clone()));
    let posts = Arc::new(MdxPostService::new(&config.content.posts_dir));
    let settings = Arc::new(JsonSettingsService::new(
        &config.content.settings_file,
        config.smtp.owner_email.clone(),
    ));

    Arc::new(AppState {
        config,
        auth,
        posts,
        settings,
        mailer,
        quotes: Arc::new(QuoteService::new()),
        start_time: std::time::Instant::now(),
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    let (cors_origins, web_root) = (
        state.config.server.cors_allowed_origins.clone(),
        state.config.server.web_root.clone(),
    );

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth", post(auth::auth_action))
        .route("/posts", get(posts::list_posts))
        .route("/posts/{slug}", get(posts::get_post))
        .route("/contact", post(contact::submit_contact))
        .route("/quotes/random", get(quotes::random_quote))
        .route("/quotes/tag/{tag}", get(quotes::quote_by_tag))
        .with_state(state.clone());

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .fallback_service(ServeDir::new(web_root))
        .layer(middleware::from_fn_with_state(
            state,
            auth::admin_page_guard,
        ))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route("/settings/contact", get(settings::get_contact_settings))
        .route("/settings/contact", post(settings::update_contact_settings))
        .route("/system/status", get(system::get_status))
        .route_layer(middleware::from_fn_with_state(state, auth::session_guard))
}
