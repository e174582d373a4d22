//! # CFTools Cloud Client
//!
//! Typed async client for the CFTools Cloud game server management API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CFTOOLS CLIENT                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Pure primitives (no I/O)                 │
//! │  ├── id.rs        - CFTools, Steam64, IP and scope ids       │
//! │  ├── hash.rs      - Game server resource hash                │
//! │  ├── time.rs      - Timestamps and Expiration                │
//! │  └── normalize.rs - Absent-value defaults                    │
//! │                                                              │
//! │  model/           - Domain records returned to callers       │
//! │  ├── player.rs    - Player details and leaderboards          │
//! │  ├── entry.rs     - Priority queue and whitelist entries     │
//! │  ├── server.rs    - Game server and server info              │
//! │  ├── session.rs   - Live game sessions                       │
//! │  ├── ban.rs       - Ban list entries                         │
//! │  └── action.rs    - GameLabs action envelope                 │
//! │                                                              │
//! │  network/         - Everything that talks to the API         │
//! │  ├── transport.rs - HttpTransport seam + reqwest backend     │
//! │  ├── auth.rs      - Credential providers                     │
//! │  ├── resolver.rs  - Identity and server scope resolution     │
//! │  ├── protocol.rs  - Wire shapes                              │
//! │  ├── mapping.rs   - Wire shape to domain record              │
//! │  ├── request.rs   - Per-operation requests                   │
//! │  └── client.rs    - CfToolsClient facade                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Request Pipeline
//!
//! Every authenticated operation runs the same steps in order:
//! credentials present, server scope resolved, player identity resolved,
//! one upstream call, response mapped. A failing precondition stops the
//! operation before any network traffic.
//!
//! ```no_run
//! use std::sync::Arc;
//! use cftools::{CfToolsClient, GenericId, ServerApiId, StaticTokenProvider, SteamId64};
//!
//! # async fn run() -> Result<(), cftools::CfToolsError> {
//! let client = CfToolsClient::builder()
//!     .with_authorization(Arc::new(StaticTokenProvider::new("token")))
//!     .with_server_api_id(ServerApiId::of("my-server"))
//!     .build()?;
//!
//! let player = client
//!     .get_player_details(GenericId::Steam(SteamId64::of("76561198012345678")))
//!     .await?;
//! println!("{:?}", player.names);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod network;

// Re-export commonly used types
pub use config::ClientConfig;
pub use core::id::{BanlistId, CfToolsId, GenericId, IpAddress, ServerApiId, SteamId64};
pub use core::time::Expiration;
pub use error::CfToolsError;
pub use model::{
    Ban, Game, GameServerItem, GameSession, LeaderboardItem, Player, PriorityQueueItem,
    ServerInfo, SortOrder, Statistic, Vector3, WhitelistItem,
};
pub use network::{
    ApplicationAuthorizationProvider, ApplicationCredentials, AuthorizationProvider,
    CfToolsClient, CfToolsClientBuilder, HttpTransport, ReqwestTransport, StaticTokenProvider,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
