/// Warden Server - account management service
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warden_core::UserStore;
use warden_server::{
    api,
    config::ServerConfig,
    services::{AssetService, CredentialHasher, IdentityService, Registration, TokenIssuer},
    state::AppState,
};
use warden_storage::SqliteStore;

#[derive(Parser)]
#[command(name = "warden-server")]
#[command(about = "Warden account management server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "WARDEN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Register a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// List registered users
    ListUsers {
        /// Maximum number of users to print
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warden_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            username,
            password,
            email,
            first_name,
            last_name,
        } => {
            let registration = Registration {
                username: Some(username),
                email: Some(email),
                password: Some(password),
                first_name,
                last_name,
            };
            add_user(config, registration).await?;
        }
        Commands::ListUsers { limit } => {
            list_users(config, limit).await?;
        }
    }

    Ok(())
}

/// Open the database and wire the services together
async fn build_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let store = Arc::new(SqliteStore::open(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    let hasher = CredentialHasher::new(config.auth.bcrypt_cost)?;
    let issuer = TokenIssuer::new(&config.auth.jwt_secret, config.token_ttl())?;

    let identity = IdentityService::new(store.clone(), hasher, issuer);
    let assets = AssetService::new(store);

    Ok(AppState::new(Arc::new(identity), Arc::new(assets)))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Warden Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app_state = build_state(&config).await?;
    let app = api::router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(config: ServerConfig, registration: Registration) -> anyhow::Result<()> {
    config.validate()?;
    let app_state = build_state(&config).await?;

    let user_id = app_state.identity.register(registration).await?;
    println!("Created user {user_id}");

    Ok(())
}

async fn list_users(config: ServerConfig, limit: u32) -> anyhow::Result<()> {
    let store = SqliteStore::open(&config.storage.database_url).await?;
    let users = store.list(limit).await?;

    if users.is_empty() {
        println!("No users");
        return Ok(());
    }

    println!("Users:");
    for user in users {
        let user = user.into_public();
        println!("  {} - {} <{}>", user.id, user.username, user.email);
    }

    Ok(())
}
