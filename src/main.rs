//! crafty - command-line access to a Crafty Controller panel.
//!
//! Every command prints the panel's answer as pretty JSON on stdout; logs go
//! to stderr.

use clap::{Parser, Subcommand};
use crafty_client::config::{self, ClientConfig};
use crafty_client::types::{LogOptions, Password, ResourceId, Schema, ServerAction, UserPatch};
use crafty_client::{Config, CraftyClient, Error, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "crafty", version, about = "Manage a Crafty Controller panel")]
struct Cli {
    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Panel URL, e.g. https://localhost:8443
    #[arg(long, global = true)]
    url: Option<String>,

    /// API token
    #[arg(long, global = true)]
    token: Option<String>,

    /// Verify the panel's TLS certificate
    #[arg(long, global = true)]
    verify_ssl: bool,

    /// Also write logs to a daily file in the log directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and print the issued token
    Login {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        password_file: Option<PathBuf>,
        /// Store the token in the config file
        #[arg(long)]
        save: bool,
    },
    /// Invalidate every token of the logged-in user
    Logout,
    /// Role management
    #[command(subcommand)]
    Roles(RoleCommand),
    /// Server management
    #[command(subcommand)]
    Servers(ServerCommand),
    /// User management
    #[command(subcommand)]
    Users(UserCommand),
    /// Print one of the panel's request schemas
    Schema { name: String },
}

#[derive(Subcommand)]
enum RoleCommand {
    List,
    Get { id: String },
    /// Servers the role grants access to
    Servers { id: String },
    /// Users holding the role
    Users { id: String },
    Delete { id: String },
}

#[derive(Subcommand)]
enum ServerCommand {
    List,
    Get { id: String },
    Stats { id: String },
    Public { id: String },
    Users { id: String },
    Logs {
        id: String,
        /// Read the log file instead of the in-memory buffer
        #[arg(long)]
        file: bool,
        #[arg(long)]
        colors: bool,
        #[arg(long)]
        raw: bool,
        #[arg(long)]
        html: bool,
    },
    /// Run an action such as start_server or backup_server
    Action { id: String, action: String },
    /// Send a console command
    Stdin { id: String, command: String },
    Delete { id: String },
}

#[derive(Subcommand)]
enum UserCommand {
    List,
    Get { id: String },
    Delete { id: String },
    /// Apply a JSON patch such as '{"enabled": false}'
    Modify {
        id: String,
        #[arg(long)]
        json: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file)?;

    let config = Config::load(cli.config.clone())?;
    let client = CraftyClient::new(&client_config(&cli, &config))?;

    match cli.command {
        Command::Login {
            username,
            password,
            password_file,
            save,
        } => {
            let username = username
                .or_else(|| config.credentials.username.clone())
                .ok_or_else(|| Error::invalid_argument("A username is required to log in"))?;
            let password = if password.is_some() || password_file.is_some() {
                Password::from_parts(password, password_file)?
            } else {
                Password::from_parts(
                    config.credentials.password.clone(),
                    config.credentials.password_file.clone(),
                )?
            };

            let token = client.login(&username, &password).await?;
            if save {
                Config::save_token(cli.config, &token)?;
                info!("Saved token to config");
            }
            println!("{token}");
        }
        Command::Logout => print_json(&client.logout().await?)?,
        Command::Roles(command) => run_roles(&client, command).await?,
        Command::Servers(command) => run_servers(&client, command).await?,
        Command::Users(command) => run_users(&client, command).await?,
        Command::Schema { name } => {
            let schema: Schema = name.parse()?;
            print_json(&client.json_schema(schema).await?)?;
        }
    }

    Ok(())
}

/// Config file settings with command-line overrides applied.
fn client_config(cli: &Cli, config: &Config) -> ClientConfig {
    let mut client = config.client.clone();
    if let Some(url) = &cli.url {
        client.url = url.clone();
    }
    if let Some(token) = &cli.token {
        client.token = Some(token.clone());
    }
    if cli.verify_ssl {
        client.verify_ssl = true;
    }
    client
}

fn init_logging(log_file: bool) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "crafty_client=info,crafty=info".into());
    let stderr = fmt::layer().with_target(false).with_writer(std::io::stderr);

    if !log_file {
        tracing_subscriber::registry().with(filter).with(stderr).init();
        return Ok(None);
    }

    let dir = config::log_dir()?;
    std::fs::create_dir_all(&dir)?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "crafty.log"));
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    Ok(Some(guard))
}

async fn run_roles(client: &CraftyClient, command: RoleCommand) -> Result<()> {
    match command {
        RoleCommand::List => print_json(&client.get_all_roles().await?),
        RoleCommand::Get { id } => print_json(&client.get_role(id).await?),
        RoleCommand::Servers { id } => print_json(&client.get_role_servers(id).await?),
        RoleCommand::Users { id } => print_json(&client.get_role_users(id).await?),
        RoleCommand::Delete { id } => print_json(&client.delete_role(id).await?),
    }
}

async fn run_servers(client: &CraftyClient, command: ServerCommand) -> Result<()> {
    match command {
        ServerCommand::List => print_json(&client.get_all_servers().await?),
        ServerCommand::Get { id } => print_json(&client.get_server(id).await?),
        ServerCommand::Stats { id } => print_json(&client.get_server_stats(id).await?),
        ServerCommand::Public { id } => print_json(&client.get_server_public_data(id).await?),
        ServerCommand::Users { id } => print_json(&client.get_server_users(id).await?),
        ServerCommand::Logs {
            id,
            file,
            colors,
            raw,
            html,
        } => {
            let options = LogOptions::new()
                .file(file)
                .colors(colors)
                .raw(raw)
                .html(html);
            print_json(&client.get_server_logs(id, &options).await?)
        }
        ServerCommand::Action { id, action } => {
            let action: ServerAction = action.parse()?;
            print_json(&client.send_server_action(id, action).await?)
        }
        ServerCommand::Stdin { id, command } => print_json(&client.send_stdin(id, &command).await?),
        ServerCommand::Delete { id } => print_json(&client.delete_server(id).await?),
    }
}

async fn run_users(client: &CraftyClient, command: UserCommand) -> Result<()> {
    match command {
        UserCommand::List => print_json(&client.get_all_users().await?),
        UserCommand::Get { id } => print_json(&client.get_user(id).await?),
        UserCommand::Delete { id } => print_json(&client.delete_user(id).await?),
        UserCommand::Modify { id, json } => {
            let patch = UserPatch::from_json(&serde_json::from_str(&json)?)?;
            if patch.is_empty() {
                return Err(Error::invalid_argument("Nothing to modify"));
            }
            print_json(&client.modify_user(ResourceId::from(id), patch).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
