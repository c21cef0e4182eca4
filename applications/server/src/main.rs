/// Groove Server - music catalog REST service
use clap::{Parser, Subcommand};
use groove_core::{CatalogStorage, CreateUser, Role};
use groove_server::{
    config::{ServerConfig, StorageBackend},
    create_router,
    services::{AuthService, UploadStore},
    state::AppState,
};
use groove_storage::{MemoryCatalog, SqliteCatalog};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "groove-server")]
#[command(about = "Groove music catalog server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "GROOVE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Grant the admin role
        #[arg(long)]
        admin: bool,
    },
    /// List all users
    ListUsers,
    /// Fill an empty database with the demo catalog
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "groove_server=info,groove_storage=info,tower_http=info".into()
            }),
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
            admin,
        } => {
            add_user(&config, &username, &password, admin).await?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
        Commands::Seed => {
            seed(&config).await?;
        }
    }

    Ok(())
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    )
}

/// Open the configured catalog backend
async fn open_catalog(config: &ServerConfig) -> anyhow::Result<Arc<dyn CatalogStorage>> {
    match config.storage.backend {
        StorageBackend::Sqlite => {
            if let Some(path) = config
                .storage
                .database_url
                .strip_prefix("sqlite://")
                .map(std::path::Path::new)
                .and_then(|p| p.parent())
            {
                if !path.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(path).await?;
                }
            }

            let catalog = SqliteCatalog::connect(&config.storage.database_url).await?;
            tracing::info!("Database connected");
            Ok(Arc::new(catalog))
        }
        StorageBackend::Memory => {
            let catalog = MemoryCatalog::with_demo_catalog().await?;
            tracing::info!("Using in-memory catalog with demo data");
            Ok(Arc::new(catalog))
        }
    }
}

/// Commands that only make sense against a database that outlives the process
fn require_persistent(config: &ServerConfig) -> anyhow::Result<()> {
    if config.storage.backend == StorageBackend::Memory {
        anyhow::bail!("this command needs storage.backend = \"sqlite\"");
    }
    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Groove Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let catalog = open_catalog(&config).await?;

    // Initialize upload storage
    let uploads = UploadStore::new(config.storage.upload_dir.clone());
    uploads.initialize().await?;
    tracing::info!("Upload storage initialized at {:?}", uploads.base_path());

    let auth_service = Arc::new(auth_service(&config));

    // Build application state
    let app_state = AppState::new(catalog, auth_service, Arc::new(uploads));

    // Build router
    let app = create_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(
    config: &ServerConfig,
    username: &str,
    password: &str,
    admin: bool,
) -> anyhow::Result<()> {
    require_persistent(config)?;
    let catalog = open_catalog(config).await?;

    let password = auth_service(config).hash_password(password)?;
    let user = catalog
        .create_user(CreateUser {
            username: username.to_string(),
            password,
            role: if admin { Role::Admin } else { Role::User },
        })
        .await?;

    println!("Created user {} ({}) with id {}", user.username, user.role, user.id);

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    require_persistent(config)?;
    let catalog = open_catalog(config).await?;

    let users = catalog.get_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} ({})", user.id, user.username, user.role);
    }

    Ok(())
}

async fn seed(config: &ServerConfig) -> anyhow::Result<()> {
    require_persistent(config)?;
    let catalog = open_catalog(config).await?;

    if groove_storage::seed_demo_catalog(catalog.as_ref()).await? {
        println!("Demo catalog created");
    } else {
        println!("Catalog already has data, nothing to do");
    }

    Ok(())
}
