use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use crate::auth::{new_account, JwtSettings};
use crate::config::{AppConfig, StorageBackend};
use crate::database::{
    DatabaseManager, InMemoryPhoneNumberTypeStore, InMemoryUserStore, MongoUserStore, PgPhoneNumberTypeStore,
    PhoneNumberTypeStore, UserStore, UserStoreError,
};
use crate::providers::PhoneNumberTypeProvider;
use crate::server::{app, AppState};

#[derive(Parser)]
#[command(name = "phonebook-api")]
#[command(about = "Phone number type REST backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overrides API_PORT")]
        port: Option<u16>,

        #[arg(
            long = "user",
            value_name = "NAME:PASSWORD[:readonly]",
            value_parser = parse_user_seed,
            help = "Account to create at startup if missing (repeatable)"
        )]
        users: Vec<UserSeed>,
    },

    #[command(about = "Add an account to the user store")]
    CreateUser {
        #[arg(help = "Login name")]
        username: String,
        #[arg(help = "Password")]
        password: String,
        #[arg(long, help = "Allow read operations only")]
        readonly: bool,
    },
}

/// Account given on the command line as `name:password[:readonly]`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSeed {
    pub username: String,
    pub password: String,
    pub readonly: bool,
}

pub fn parse_user_seed(raw: &str) -> Result<UserSeed, String> {
    let (username, rest) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:PASSWORD[:readonly], got '{}'", raw))?;
    let (password, readonly) = match rest.rsplit_once(':') {
        Some((password, "readonly")) => (password, true),
        _ => (rest, false),
    };
    if username.is_empty() || password.is_empty() {
        return Err(format!("username and password must be non-empty in '{}'", raw));
    }
    Ok(UserSeed {
        username: username.to_string(),
        password: password.to_string(),
        readonly,
    })
}

/// Inserts each seed account, leaving accounts that already exist untouched.
pub async fn seed_users(users: &dyn UserStore, seeds: &[UserSeed]) -> Result<(), UserStoreError> {
    for seed in seeds {
        match users.insert(new_account(&seed.username, &seed.password, seed.readonly)).await {
            Ok(()) => tracing::info!("Seeded user '{}' (readonly: {})", seed.username, seed.readonly),
            Err(UserStoreError::AlreadyExists(username)) => {
                tracing::info!("User '{}' already exists, not seeding", username)
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Serve { port: None, users: Vec::new() });
    match command {
        Commands::Serve { port, users } => serve(config, port.unwrap_or(config.api.port), &users).await,
        Commands::CreateUser { username, password, readonly } => {
            if config.storage == StorageBackend::Memory {
                bail!("create-user needs the external user store; with STORAGE_BACKEND=memory use `serve --user`");
            }
            let users = user_store(config).await?;
            users
                .insert(new_account(&username, &password, readonly))
                .await
                .with_context(|| format!("failed to create user '{}'", username))?;
            println!("Created user '{}'{}", username, if readonly { " (read-only)" } else { "" });
            Ok(())
        }
    }
}

async fn serve(config: &AppConfig, port: u16, seeds: &[UserSeed]) -> anyhow::Result<()> {
    if config.security.jwt_secret.is_empty() {
        bail!("JWT_SECRET must be set in {:?} mode", config.environment);
    }

    let state = build_state(config).await?;
    seed_users(state.users.as_ref(), seeds).await.context("failed to seed users")?;
    if config.storage == StorageBackend::Memory && seeds.is_empty() {
        tracing::warn!("In-memory user store is empty; pass --user NAME:PASSWORD to allow logins");
    }

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Phonebook API listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}

/// Wires stores, provider and token settings from configuration
pub async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let (store, users): (Arc<dyn PhoneNumberTypeStore>, Arc<dyn UserStore>) = match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on exit");
            (Arc::new(InMemoryPhoneNumberTypeStore::new()), Arc::new(InMemoryUserStore::new()))
        }
        StorageBackend::External => {
            let pool = DatabaseManager::connect(&config.database).await.context("database connection failed")?;
            DatabaseManager::ensure_schema(&pool).await.context("schema bootstrap failed")?;
            (Arc::new(PgPhoneNumberTypeStore::new(pool)), user_store(config).await?)
        }
    };

    let provider = PhoneNumberTypeProvider::new(store, config.filter.default_limit)
        .with_audit(config.security.enable_audit_logging)
        .with_plan_tracing(config.filter.debug_logging);

    Ok(AppState::new(provider, users, JwtSettings::from_config(&config.security)))
}

async fn user_store(config: &AppConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    let users = MongoUserStore::connect(&config.users).await.context("user store connection failed")?;
    Ok(Arc::new(users))
}
