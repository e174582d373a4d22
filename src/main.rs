//! CFTools Cloud CLI
//!
//! Thin command line front end over the client library. Configuration is
//! read from `CFTOOLS_*` environment variables; results are printed as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cftools::model::server::Game;
use cftools::network::request::{
    GetGameServerDetailsRequest, GetLeaderboardRequest, GetPlayerDetailsRequest,
    GetServerInfoRequest, ListBansRequest, ListGameSessionsRequest,
};
use cftools::{
    BanlistId, CfToolsClient, ClientConfig, GenericId, ServerApiId, SortOrder, Statistic, VERSION,
};

#[derive(Parser)]
#[command(name = "cftools-cli", version, about = "Query the CFTools Cloud API")]
struct Cli {
    /// Server API id, overrides CFTOOLS_SERVER_API_ID.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a Steam64 id, IP or CFTools id to a CFTools id.
    Lookup { identifier: String },
    /// Show a player's details on the server.
    Player { identifier: String },
    /// Show the server leaderboard.
    Leaderboard {
        /// kills, deaths, suicides, playtime, longest_kill, longest_shot or kdratio.
        stat: String,
        /// Sort ascending.
        #[arg(long)]
        asc: bool,
        /// Number of rows (1-100).
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show information about the server.
    ServerInfo,
    /// List live sessions on the server.
    Sessions,
    /// Query a public DayZ server by address.
    Gameserver { ip: String, port: u16 },
    /// List bans of a player or IP on a ban list.
    Bans { list: String, identifier: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("cftools-cli v{}", VERSION);

    let mut config = ClientConfig::from_env();
    if let Some(server) = cli.server {
        config.server_api_id = Some(ServerApiId::of(server));
    }
    let client = CfToolsClient::from_config(&config).context("failed to build client")?;

    match cli.command {
        Command::Lookup { identifier } => {
            print(&client.resolve(&GenericId::parse(&identifier)).await?)
        }
        Command::Player { identifier } => {
            let request = GetPlayerDetailsRequest::new(GenericId::parse(&identifier));
            print(&client.get_player_details(request).await?)
        }
        Command::Leaderboard { stat, asc, limit } => {
            let statistic =
                Statistic::from_wire(&stat).with_context(|| format!("unknown statistic: {}", stat))?;
            let request = GetLeaderboardRequest {
                order: if asc { SortOrder::Ascending } else { SortOrder::Descending },
                limit,
                ..GetLeaderboardRequest::new(statistic)
            };
            print(&client.get_leaderboard(request).await?)
        }
        Command::ServerInfo => print(&client.get_server_info(GetServerInfoRequest::default()).await?),
        Command::Sessions => print(
            &client
                .list_game_sessions(ListGameSessionsRequest::default())
                .await?,
        ),
        Command::Gameserver { ip, port } => {
            let request = GetGameServerDetailsRequest { game: Game::DayZ, ip, port };
            print(&client.get_game_server_details(request).await?)
        }
        Command::Bans { list, identifier } => {
            let request = ListBansRequest {
                list: BanlistId::of(list),
                player_id: GenericId::parse(&identifier),
            };
            print(&client.list_bans(request).await?)
        }
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
