pub mod api;
pub mod config;
pub mod services;

use std::io::Write;
use std::sync::Arc;
use tokio::signal;

pub use config::Config;
use services::password;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("serve" | "daemon" | "-d" | "--serve") => run_server(config).await,

        Some("init" | "--init") => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }

        Some("setup-admin") => cmd_setup_admin(),

        Some("help" | "-h" | "--help") => {
            print_help();
            Ok(())
        }

        Some(other) => {
            println!("Unknown command: {other}");
            println!();
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("Quill - Personal Blog Backend");
    println!("Serves the public site, the admin dashboard and the JSON API");
    println!();
    println!("USAGE:");
    println!("  quill <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("  serve, daemon     Start the web server (default)");
    println!("  init              Create default config file");
    println!("  setup-admin       Generate admin credentials for the environment");
    println!("  help              Show this help message");
    println!();
    println!("CONFIG:");
    println!("  Edit config.toml to configure the server, SMTP, content paths, etc.");
    println!("  Secrets can also come from the environment (ADMIN_PASSWORD_HASH,");
    println!("  ADMIN_PASSWORD_SALT, JWT_SECRET, SMTP_* and friends).");
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("Quill v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(config);
    let state = api::create_app_state(config.clone())?;

    let port = config.server.port;
    let app = api::router(state);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server_handle = tokio::spawn(async move {
        info!("🌐 Web server running at http://0.0.0.0:{port}");
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {}", e);
        }
    });

    info!("Server running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}

/// Interactive credential generator. Prints the environment lines to copy
/// into the deployment; nothing is written to disk.
fn cmd_setup_admin() -> anyhow::Result<()> {
    println!("Admin Account Setup");
    println!("{:-<60}", "");

    let username = prompt("Admin username [admin]: ")?;
    let username = if username.is_empty() {
        "admin".to_string()
    } else {
        username
    };

    let password = prompt("Admin password: ")?;
    if password.len() < 8 {
        println!("Password must be at least 8 characters.");
        return Ok(());
    }

    let salt = password::generate_salt();
    let hash = password::hash_password(&password, &salt);
    let jwt_secret = password::generate_secret();

    println!();
    println!("Add these lines to your environment (or .env file):");
    println!();
    println!("ADMIN_USERNAME={username}");
    println!("ADMIN_PASSWORD_HASH={hash}");
    println!("ADMIN_PASSWORD_SALT={salt}");
    println!("JWT_SECRET={jwt_secret}");
    println!();
    println!("Restart the server for the new credentials to take effect.");

    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
