//! CLI administration tool for employee-api.
//!
//! Provides commands for managing users and their tokens, viewing statistics,
//! and performing database checks without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prints their first bearer token)
//! cargo run --bin admin -- user create
//!
//! # List users with their active token counts
//! cargo run --bin admin -- user list
//!
//! # Revoke every token of a user
//! cargo run --bin admin -- user logout ana@x.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`) and `TOKEN_SIGNING_SECRET`.

use employee_api::api::dto::auth::RegisterRequest;
use employee_api::config;
use employee_api::domain::entities::User;
use employee_api::domain::repositories::{TokenRepository, UserRepository};
use employee_api::error::{AppError, FieldErrors};
use employee_api::infrastructure::persistence::{
    PgEmployeeRepository, PgTokenRepository, PgUserRepository,
};
use employee_api::server::connect_pool;
use employee_api::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing employee-api.
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
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Register a new user and issue a token
    Create {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted without echo if omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Revoke every token of a user
    Logout {
        /// User email or ID
        email_or_id: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

/// Repositories and services over one pool.
struct Admin {
    pool: PgPool,
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
    state: AppState,
}

impl Admin {
    fn new(pool: PgPool, signing_secret: String) -> Self {
        let shared = Arc::new(pool.clone());
        let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(shared.clone()));
        let tokens: Arc<dyn TokenRepository> = Arc::new(PgTokenRepository::new(shared.clone()));
        let state = AppState::new(
            users.clone(),
            tokens.clone(),
            Arc::new(PgEmployeeRepository::new(shared)),
            signing_secret,
        );

        Self {
            pool,
            users,
            tokens,
            state,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;
    let admin = Admin::new(pool, config.token_signing_secret);

    match cli.command {
        Commands::User { action } => handle_user_action(action, &admin).await?,
        Commands::Stats => handle_stats(&admin.pool).await?,
        Commands::Db { action } => handle_db_action(action, &admin.pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, admin: &Admin) -> Result<()> {
    match action {
        UserAction::Create {
            name,
            email,
            password,
            yes,
        } => create_user(admin, name, email, password, yes).await?,
        UserAction::List => list_users(admin).await?,
        UserAction::Logout { email_or_id } => logout_user(admin, email_or_id).await?,
    }

    Ok(())
}

/// Registers a user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for missing name, email and password
/// 2. Apply the same rules as `POST /register`
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Store the user and print the one-time token
async fn create_user(
    admin: &Admin,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
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

    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let request = RegisterRequest {
        name: Some(name.clone()),
        email: Some(email.clone()),
        password: Some(password.clone()),
        password_confirmation: Some(password),
    };
    if let Err(e) = request.validate() {
        print_field_errors(&FieldErrors::from(&e));
        anyhow::bail!("Invalid user details");
    }

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Name:  {}", name.cyan());
    println!("  Email: {}", email.cyan());
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

    let (user, token) = match admin
        .state
        .auth_service
        .register(request.into_registration())
        .await
    {
        Ok(created) => created,
        Err(AppError::Validation { errors, .. }) => {
            print_field_errors(&errors);
            anyhow::bail!("Invalid user details");
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to create user: {}", e)),
    };

    println!();
    println!(
        "{}",
        format!("✅ User #{} created successfully!", user.id)
            .green()
            .bold()
    );
    println!();
    println!("  Token: {}", token.plain_text.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/employees",
        token.plain_text.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all users with their active token counts.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Name                 Email                          Created           Tokens
///   ──────────────────────────────────────────────────────────────────────────────
///   1   Ana                  ana@x.com                      2025-01-15 10:30  2
/// ```
async fn list_users(admin: &Admin) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = admin
        .users
        .list()
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
        "  {:<3} {:<20} {:<30} {:<17} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold(),
        "Tokens".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for user in &users {
        let token_count = admin
            .tokens
            .count_for_user(user.id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to count tokens: {}", e))?;

        let tokens = if token_count > 0 {
            token_count.to_string().green()
        } else {
            token_count.to_string().bright_black()
        };

        println!(
            "  {:<3} {:<20} {:<30} {:<17} {}",
            user.id.to_string().bright_black(),
            user.name.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            tokens
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Revokes every token of a user, looked up by ID or email.
///
/// Requires confirmation (default: No).
async fn logout_user(admin: &Admin, email_or_id: String) -> Result<()> {
    println!("{}", "🔒 Log Out User".bright_blue().bold());
    println!();

    let user = find_user(admin, &email_or_id)
        .await?
        .context("User not found")?;

    let token_count = admin
        .tokens
        .count_for_user(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    if token_count == 0 {
        println!("{}", "⚠️  This user has no active tokens".yellow());
        return Ok(());
    }

    println!("  User:   {} <{}>", user.name.cyan(), user.email);
    println!("  Tokens: {}", token_count.to_string().bright_white());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke all tokens of this user?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let revoked = admin
        .state
        .token_service
        .revoke_all(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke tokens: {}", e))?;

    println!();
    println!(
        "{}",
        format!("✅ {} token(s) revoked", revoked).green().bold()
    );
    println!();

    Ok(())
}

/// Numeric input is treated as an ID, anything else as an email.
async fn find_user(admin: &Admin, email_or_id: &str) -> Result<Option<User>> {
    let found = match email_or_id.parse::<i64>() {
        Ok(id) => admin.users.find_by_id(id).await,
        Err(_) => admin.users.find_by_email(email_or_id).await,
    };

    found.map_err(|e| anyhow::anyhow!("Database error: {}", e))
}

fn print_field_errors(errors: &FieldErrors) {
    println!("{}", "❌ Validation failed:".red().bold());
    for (field, messages) in errors.iter() {
        for message in messages {
            println!("  {}: {}", field.yellow(), message);
        }
    }
}

/// Displays system statistics.
///
/// Shows:
/// - Number of users
/// - Number of active tokens
/// - Number of employees
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let tokens_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM access_tokens")
        .fetch_one(pool)
        .await?;

    let employees_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await?;

    println!(
        "  Users:         {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Active tokens: {}",
        tokens_count.to_string().bright_green().bold()
    );
    println!(
        "  Employees:     {}",
        employees_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}
