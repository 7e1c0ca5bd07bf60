//! CLI administration tool for user-management.
//!
//! Provides commands for managing user accounts and preparing the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing fields)
//! cargo run --bin admin -- user create --name "John Doe" --email john.doe@example.com
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Count users
//! cargo run --bin admin -- user count
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Create the unique email index
//! cargo run --bin admin -- db init
//! ```
//!
//! # Environment Variables
//!
//! - `MONGO_CONFIG_URI`, `MONGO_CONFIG_DATABASE` (required)
//! - `MONGO_CONFIG_USERNAME`, `MONGO_CONFIG_PASSWORD`, `MONGO_CONFIG_USER_COLLECTION`
//! - `CRYPTO_BCRYPT_COST` (default: 10)

use user_management::api::dto::user::CreateUserRequest;
use user_management::api::validation::RequestValidation;
use user_management::application::services::password::hash_password;
use user_management::config::{MongoConfig, mask_connection_string};
use user_management::domain::entities::NewUser;
use user_management::domain::repositories::UserRepository;
use user_management::error::AppError;
use user_management::infrastructure::persistence::{self, MongoUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};

const DEFAULT_BCRYPT_COST: u32 = 10;

/// CLI tool for managing user-management.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Login email
        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Show the number of users
    Count,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Create indexes
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mongo = MongoConfig::from_env()?;

    match cli.command {
        Commands::User { action } => {
            let repo = open_repository(&mongo).await?;
            handle_user_action(action, &repo).await?
        }
        Commands::Db { action } => handle_db_action(action, &mongo).await?,
    }

    Ok(())
}

/// Connects to MongoDB and opens the user collection.
async fn open_repository(mongo: &MongoConfig) -> Result<MongoUserRepository> {
    let database = persistence::connect(mongo)
        .await
        .context("Failed to connect to MongoDB")?;

    Ok(MongoUserRepository::new(&database, &mongo.user_collection))
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, repo: &MongoUserRepository) -> Result<()> {
    match action {
        UserAction::Create { name, email, yes } => create_user(repo, name, email, yes).await?,
        UserAction::List => list_users(repo).await?,
        UserAction::Count => {
            let count = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;
            println!("  Users: {}", count.to_string().bright_green().bold());
        }
    }

    Ok(())
}

/// Creates a user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for name, email (or use provided) and password
/// 2. Apply the same field rules as `POST /register`
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Hash the password with bcrypt and store the user
async fn create_user(
    repo: &MongoUserRepository,
    name: Option<String>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let request = CreateUserRequest {
        name,
        email,
        password,
    };

    if let Err(e) = request.validate_request() {
        println!("{}", format!("❌ {}", e).red());
        return Ok(());
    }

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Name:  {}", request.name.cyan());
    println!("  Email: {}", request.email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let cost = std::env::var("CRYPTO_BCRYPT_COST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_BCRYPT_COST);

    let password_hash = hash_password(&request.password, cost)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let new_user = NewUser {
        name: request.name,
        email: request.email,
        password_hash,
    };

    match repo.create(new_user).await {
        Ok(id) => {
            println!("{}", "✅ User created successfully!".green().bold());
            println!("  ID: {}", id.bright_yellow());
        }
        Err(AppError::EmailAlreadyExists) => {
            println!("{}", "⚠️  An email has already been used".yellow());
        }
        Err(e) => anyhow::bail!("Failed to create user: {}", e),
    }
    println!();

    Ok(())
}

/// Lists all users, oldest first.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID                        Name                   Email                          Created
///   ─────────────────────────────────────────────────────────────────────────────────────────────
///   60d5ec49f1f1c939b4f2f0c2  John Doe               john.doe@example.com           2024-01-15 10:30
/// ```
async fn list_users(repo: &MongoUserRepository) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .find_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<25} {:<22} {:<30} {:<16}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(95).bright_black());

    for user in &users {
        println!(
            "  {:<25} {:<22} {:<30} {}",
            user.id.bright_black(),
            user.name.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Connects and pings the deployment.
async fn check_database(mongo: &MongoConfig) -> Result<()> {
    println!("{}", "🔍 Checking database connection...".bright_blue());
    println!(
        "  {}",
        mask_connection_string(&mongo.connection_uri()).bright_black()
    );

    persistence::connect(mongo)
        .await
        .context("Database connection failed")?;

    println!("{}", "✅ Database connection OK".green().bold());
    Ok(())
}

/// Handles database maintenance commands.
async fn handle_db_action(action: DbAction, mongo: &MongoConfig) -> Result<()> {
    match action {
        DbAction::Check => check_database(mongo).await?,
        DbAction::Init => {
            let repo = open_repository(mongo).await?;

            println!("{}", "🛠️  Creating indexes...".bright_blue());

            repo.ensure_indexes()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create indexes: {}", e))?;

            println!("{}", "✅ Unique email index ready".green().bold());
        }
    }

    Ok(())
}
