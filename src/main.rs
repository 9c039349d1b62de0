use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use movieflix::app::create_app;
use movieflix::config::settings::AppConfig;
use movieflix::infrastructure::db::pool::{connect_to_db, run_migrations};
use movieflix::infrastructure::redis::connect_revocations;
use movieflix::modules::auth::service::AuthService;
use movieflix::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "movieflix", about = "Movie catalog and admin API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Create an admin account
    CreateAdmin {
        username: String,
        /// Read from MOVIEFLIX_ADMIN_PASSWORD when omitted
        #[arg(long, env = "MOVIEFLIX_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        super_admin: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::new().context("DATABASE_URL and JWT_SECRET must be set")?;

    let db = connect_to_db(&config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    run_migrations(&db).await.context("Failed to run migrations")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::CreateAdmin {
            username,
            password,
            super_admin,
        } => {
            let admin = AuthService::create_admin(&db, &username, &password, super_admin).await?;
            info!("Admin {} ready (id {})", admin.username, admin.id);
            Ok(())
        }
        Commands::Serve => {
            let revocations = connect_revocations(config.redis_url.as_deref()).await;

            let port = config.server_port;
            let app = create_app(AppState::new(config, db, revocations));

            let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
                .await
                .with_context(|| format!("Failed to bind port {}", port))?;
            info!("Server running on http://0.0.0.0:{}", port);
            info!("Swagger UI on http://0.0.0.0:{}/swagger-ui", port);

            axum::serve(listener, app).await?;
            Ok(())
        }
    }
}
