//! Subcommand definitions and their handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use futures::{stream, StreamExt, TryStreamExt};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use gapi_core::models::{AdminCreateUserForm, Dashboard, DashboardImportInput, SearchQuery};
use gapi_core::{ApiClient, Config};

/// Maximum dashboards fetched at once by `dashboards export`.
/// Keeps a full export quick without flooding the server.
const EXPORT_CONCURRENCY: usize = 4;

/// Search hit type for stored dashboards (as opposed to folders)
const DASHBOARD_HIT_TYPE: &str = "dash-db";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// User accounts
    #[command(subcommand)]
    Users(UsersCommand),
    /// Organizations
    #[command(subcommand)]
    Orgs(OrgsCommand),
    /// Dashboards
    #[command(subcommand)]
    Dashboards(DashboardsCommand),
    /// Show or persist the connection settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List,
    /// Switch the signed-in user's active organization
    Switch { org_id: i64 },
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        login: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum OrgsCommand {
    List,
    Get { id: i64 },
    GetByName { name: String },
    Create {
        name: String,
        #[arg(long)]
        external_id: Option<String>,
    },
    Update {
        id: i64,
        name: String,
        #[arg(long)]
        external_id: Option<String>,
    },
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum DashboardsCommand {
    List {
        /// Title search text
        #[arg(long)]
        query: Option<String>,
        /// Only dashboards carrying this tag (repeatable)
        #[arg(long)]
        tag: Vec<String>,
        #[arg(long)]
        starred: bool,
    },
    /// Fetch a dashboard by URI (`db/<slug>`) or bare slug
    Get { uri: String },
    Delete { slug: String },
    /// Save a dashboard model from a JSON file
    Save {
        file: PathBuf,
        #[arg(long)]
        overwrite: bool,
    },
    /// Import a dashboard model, binding its inputs from a JSON file
    Import {
        file: PathBuf,
        #[arg(long)]
        overwrite: bool,
        #[arg(long, value_name = "file")]
        inputs: Option<PathBuf>,
    },
    /// Write every dashboard to `<dir>/<slug>.json`
    Export { dir: PathBuf },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    Show,
    Save,
}

pub async fn run(client: &ApiClient, command: Command) -> Result<()> {
    match command {
        Command::Users(cmd) => run_users(client, cmd).await,
        Command::Orgs(cmd) => run_orgs(client, cmd).await,
        Command::Dashboards(cmd) => run_dashboards(client, cmd).await,
        Command::Config(_) => anyhow::bail!("config commands do not need a client"),
    }
}

pub fn run_config(config: &Config, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let mut shown = serde_json::to_value(config)?;
            if let (Some(_), Value::Object(map)) = (&config.auth, &mut shown) {
                map.insert("auth".to_string(), Value::from("<redacted>"));
            }
            print_json(&shown)
        }
        ConfigCommand::Save => {
            config.save()?;
            println!("Saved {}", Config::config_path()?.display());
            if config.auth.is_some() {
                println!(
                    "Credentials are not saved; set {} instead",
                    gapi_core::config::AUTH_ENV
                );
            }
            Ok(())
        }
    }
}

async fn run_users(client: &ApiClient, command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::List => print_json(&client.users().await?),
        UsersCommand::Switch { org_id } => print_json(&client.switch_user_context(org_id).await?),
        UsersCommand::Create {
            email,
            login,
            name,
            password,
        } => {
            let form = AdminCreateUserForm {
                email,
                login,
                name,
                password,
            };
            print_json(&client.create_user(&form).await?)
        }
        UsersCommand::Delete { id } => {
            client.delete_user(id).await?;
            println!("Deleted user {}", id);
            Ok(())
        }
    }
}

async fn run_orgs(client: &ApiClient, command: OrgsCommand) -> Result<()> {
    match command {
        OrgsCommand::List => print_json(&client.orgs().await?),
        OrgsCommand::Get { id } => print_json(&client.org_by_id(id).await?),
        OrgsCommand::GetByName { name } => print_json(&client.org_by_name(&name).await?),
        OrgsCommand::Create { name, external_id } => {
            print_json(&client.new_org(&name, external_id.as_deref()).await?)
        }
        OrgsCommand::Update {
            id,
            name,
            external_id,
        } => print_json(&client.update_org(id, &name, external_id.as_deref()).await?),
        OrgsCommand::Delete { id } => print_json(&client.delete_org(id).await?),
    }
}

async fn run_dashboards(client: &ApiClient, command: DashboardsCommand) -> Result<()> {
    match command {
        DashboardsCommand::List {
            query,
            tag,
            starred,
        } => {
            let search = SearchQuery {
                query,
                tags: tag,
                starred: starred.then_some(true),
            };
            print_json(&client.search_dashboards(&search).await?)
        }
        DashboardsCommand::Get { uri } => print_json(&client.dashboard(&uri).await?),
        DashboardsCommand::Delete { slug } => {
            client.delete_dashboard(&slug).await?;
            println!("Deleted dashboard {}", slug);
            Ok(())
        }
        DashboardsCommand::Save { file, overwrite } => {
            let model = read_model(&file)?;
            print_json(&client.save_dashboard(&model, overwrite).await?)
        }
        DashboardsCommand::Import {
            file,
            overwrite,
            inputs,
        } => {
            let model = read_model(&file)?;
            let inputs: Vec<DashboardImportInput> = match inputs {
                Some(path) => serde_json::from_str(&read_file(&path)?).with_context(|| {
                    format!("Failed to parse import inputs in {}", path.display())
                })?,
                None => Vec::new(),
            };
            print_json(&client.import_dashboard(&model, overwrite, &inputs).await?)
        }
        DashboardsCommand::Export { dir } => export_dashboards(client, &dir).await,
    }
}

/// Fetch every stored dashboard concurrently and write one file per slug.
async fn export_dashboards(client: &ApiClient, dir: &Path) -> Result<()> {
    let entries = client.dashboards().await?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let dashboards: Vec<(String, Dashboard)> = stream::iter(
        entries
            .into_iter()
            .filter(|entry| entry.kind == DASHBOARD_HIT_TYPE),
    )
    .map(|entry| async move {
        debug!(uri = %entry.uri, "Fetching dashboard for export");
        let dashboard = client
            .dashboard(&entry.uri)
            .await
            .with_context(|| format!("Failed to fetch dashboard {}", entry.uri))?;
        Ok::<_, anyhow::Error>((entry.slug().to_string(), dashboard))
    })
    .buffer_unordered(EXPORT_CONCURRENCY)
    .try_collect()
    .await?;

    for (slug, dashboard) in &dashboards {
        let path = dir.join(format!("{}.json", slug));
        let contents = serde_json::to_string_pretty(dashboard)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    info!(count = dashboards.len(), dir = %dir.display(), "Export complete");
    println!("Exported {} dashboards to {}", dashboards.len(), dir.display());
    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Load a dashboard model. Accepts either the bare model or a full
/// `{"meta": .., "dashboard": ..}` document as written by `get`/`export`.
fn read_model(path: &Path) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(&read_file(path)?)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    model_from_value(value)
        .with_context(|| format!("{} is not a dashboard JSON object", path.display()))
}

fn model_from_value(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(mut map) if map.contains_key("meta") => match map.remove("dashboard") {
            Some(Value::Object(model)) => Some(model),
            _ => None,
        },
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
