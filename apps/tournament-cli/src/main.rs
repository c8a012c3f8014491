use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tournament::api::rest::dto::{CreateGroupReq, CreateTeamReq, PatchTeamReq, UpdateTeamReq};
use tournament::api::rest::response::into_response;
use tournament::api::rest::ApiResponse;
use tournament::{TournamentApi, TournamentConfig, in_memory_api};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Football tournament API driver
///
/// Runs one request against a freshly seeded in-memory tournament and prints
/// the response status, headers and JSON body.
#[derive(Parser)]
#[command(name = "tournament-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration, print it and exit
    Check,
    #[command(flatten)]
    Request(Request),
}

#[derive(Subcommand)]
enum Request {
    /// GET / (entry point links)
    Root,
    /// GET /version
    Version,
    /// GET /teams
    Teams {
        /// Raw query string, e.g. "fields=name,win&orderBy=win desc"
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// GET /teams/{id}
    Team {
        id: Uuid,
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// POST /teams
    CreateTeam {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// PUT /teams/{id} with a JSON body
    UpdateTeam { id: Uuid, body: String },
    /// PATCH /teams/{id} with a JSON body
    PatchTeam { id: Uuid, body: String },
    /// DELETE /teams/{id}
    DeleteTeam { id: Uuid },
    /// GET /groups
    Groups {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// GET /groups/{id}
    Group {
        id: Uuid,
        #[arg(short, long, default_value = "")]
        query: String,
        /// Value of the Accept header
        #[arg(short, long)]
        accept: Option<String>,
    },
    /// GET /groups/{id}/teams
    GroupTeams {
        id: Uuid,
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// POST /groups
    CreateGroup {
        #[arg(long)]
        name: String,
    },
    /// OPTIONS on a collection
    Options {
        #[arg(value_enum)]
        collection: Collection,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Collection {
    Teams,
    Groups,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(api: &TournamentApi, request: Request) -> Result<ApiResponse> {
    let result = match request {
        Request::Root => Ok(api.get_root()),
        Request::Version => Ok(TournamentApi::api_version()),
        Request::Teams { query } => api.get_teams(&query).await,
        Request::Team { id, query } => api.get_team(id, &query).await,
        Request::CreateTeam { name, description } => {
            api.create_team(CreateTeamReq { name, description }).await
        }
        Request::UpdateTeam { id, body } => {
            let body: UpdateTeamReq =
                serde_json::from_str(&body).context("invalid update body")?;
            api.update_team(id, body).await
        }
        Request::PatchTeam { id, body } => {
            let body: PatchTeamReq = serde_json::from_str(&body).context("invalid patch body")?;
            api.partially_update_team(id, body).await
        }
        Request::DeleteTeam { id } => api.delete_team(id).await,
        Request::Groups { query } => api.get_groups(&query).await,
        Request::Group { id, query, accept } => {
            api.get_group(id, &query, accept.as_deref()).await
        }
        Request::GroupTeams { id, query } => api.get_teams_for_group(id, &query).await,
        Request::CreateGroup { name } => api.create_group(CreateGroupReq { name }).await,
        Request::Options {
            collection: Collection::Teams,
        } => Ok(TournamentApi::teams_options()),
        Request::Options {
            collection: Collection::Groups,
        } => Ok(TournamentApi::groups_options()),
    };
    Ok(into_response(result))
}

fn print_response(resp: &ApiResponse) -> Result<()> {
    println!("{}", resp.status());
    for (name, value) in resp.headers() {
        println!("{name}: {}", value.to_str().unwrap_or("<binary>"));
    }
    if !resp.body().is_null() {
        println!();
        println!("{}", serde_json::to_string_pretty(resp.body())?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(path) = &cli.config
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }
    let config = TournamentConfig::load(cli.config.as_deref())?;

    let request = match cli.command {
        Commands::Check => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }
        Commands::Request(request) => request,
    };

    let api = in_memory_api(&config)?;
    tracing::info!(base_url = %config.base_url, "Tournament API ready");

    let resp = dispatch(&api, request).await?;
    print_response(&resp)
}
