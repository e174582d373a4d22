//! Core primitives.
//!
//! Identifier types, resource hashing and the normalization rules shared by
//! every response mapper. Nothing in here performs I/O.

pub mod id;
pub mod hash;
pub mod time;
pub mod normalize;

// Re-export core types
pub use id::{BanlistId, CfToolsId, GenericId, IpAddress, ServerApiId, SteamId64};
pub use hash::game_server_resource;
pub use time::Expiration;
pub use normalize::{expiration_from, or_zero};
