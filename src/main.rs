use anyhow::Result;
use azq::azure::client::{format_azure_error, AzureClient};
use azq::config::Config;
use azq::output;
use azq::query::{dispatch, resolve_path, Command, QueryError};
use azq::resource::{fetch_named, registry, ArmFetcher, Scope};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command-line explorer for Azure resources
#[derive(Parser, Debug)]
#[command(name = "azq", version, about, long_about = None)]
struct Args {
    /// Azure subscription ID
    #[arg(short, long)]
    subscription: Option<String>,

    /// Limit queries to one resource group
    #[arg(short = 'g', long)]
    resource_group: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// List resources of every known type, or of one type
    List {
        /// Resource type token, e.g. "vm" or "vnets" (see `azq aliases`)
        resource_type: Option<String>,
    },
    /// Show which resource types have resources in the current scope
    Types,
    /// Show the registered resource-type aliases
    Aliases,
    /// Search all resources, returning every record containing the term
    Search { term: String },
    /// Search all resources, returning only the matching fields with paths
    Subsearch { term: String },
    /// Fetch a single resource by name (requires --resource-group)
    Get {
        /// Resource type token, e.g. "vnet"
        resource_type: String,
        /// Resource name
        name: String,
        /// Optional field path to project, e.g. "nic.ipConfig.privateIp" or "ports[2]"
        field: Option<String>,
    },
    /// Persist the given --subscription / --resource-group as defaults
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    // Logs go to a file so stdout stays clean JSON
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .expect("Failed to open log file");

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("azq started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("azq").join("azq.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".azq").join("azq.log");
    }
    PathBuf::from("azq.log")
}

fn print_aliases() {
    println!("Available resource types:");
    for (category, types) in registry::categories() {
        println!();
        println!("{}:", category.display_name());
        for resource_type in types {
            println!(
                "  {} - {}",
                resource_type.synonyms.join(", "),
                resource_type.display_name
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    // Commands that need no subscription or network
    match &args.command {
        CliCommand::Aliases => {
            print_aliases();
            return Ok(());
        }
        CliCommand::Config => {
            let mut config = Config::load();
            if let Some(subscription) = &args.subscription {
                config.set_subscription(subscription)?;
            }
            if let Some(resource_group) = &args.resource_group {
                config.set_resource_group(resource_group)?;
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load();
    let subscription = args
        .subscription
        .clone()
        .unwrap_or_else(|| config.effective_subscription());

    if subscription.is_empty() {
        anyhow::bail!(
            "No subscription configured. Use --subscription, set AZURE_SUBSCRIPTION_ID, \
             or select one with 'az account set'"
        );
    }

    let resource_group = args.resource_group.clone().or(config.resource_group);
    let scope = match &resource_group {
        Some(rg) => Scope::ResourceGroup(rg.clone()),
        None => Scope::Subscription,
    };

    tracing::info!(
        "Using subscription: {}, scope: {:?}",
        subscription,
        scope
    );

    let client = match AzureClient::new(&subscription).await {
        Ok(client) => client,
        Err(e) => anyhow::bail!("{}", format_azure_error(&e)),
    };

    if let CliCommand::Get {
        resource_type,
        name,
        field,
    } = &args.command
    {
        return run_get(&client, &resource_group, resource_type, name, field.as_deref()).await;
    }

    let command = match args.command {
        CliCommand::List {
            resource_type: None,
        } => Command::ListAll,
        CliCommand::List {
            resource_type: Some(token),
        } => Command::ListTypesForResource(token),
        CliCommand::Types => Command::ListTypes,
        CliCommand::Search { term } => Command::Search(term),
        CliCommand::Subsearch { term } => Command::SubSearch(term),
        // Handled above
        CliCommand::Aliases | CliCommand::Config | CliCommand::Get { .. } => unreachable!(),
    };

    let empty_note = match &command {
        Command::Search(term) | Command::SubSearch(term) => {
            format!("No resources found containing '{term}'")
        }
        _ => "No resources found".to_string(),
    };

    let fetcher = ArmFetcher::new(client);
    let outcome = dispatch(&fetcher, command, &scope).await?;

    output::render(&outcome, &empty_note)
}

async fn run_get(
    client: &AzureClient,
    resource_group: &Option<String>,
    resource_type: &str,
    name: &str,
    field: Option<&str>,
) -> Result<()> {
    let Some(resource_group) = resource_group else {
        anyhow::bail!("'get' requires --resource-group");
    };

    let resolved = registry::resolve(resource_type)
        .ok_or_else(|| QueryError::UnknownResourceType(resource_type.to_string()))?;

    let document = match fetch_named(client, resolved, resource_group, name).await {
        Ok(document) => document,
        Err(e) => anyhow::bail!("{}", format_azure_error(&e)),
    };

    match field {
        None => output::render_document(&document),
        Some(field) => {
            // Accepts the same syntax subsearch prints, e.g. "nic.ipConfig.privateIp"
            let value = resolve_path(&document, field)
                .map_err(|e| anyhow::anyhow!("Cannot resolve '{}' on '{}': {}", field, name, e))?;
            output::render_document(value)
        }
    }
}
