//! Game Server Resource Hashing
//!
//! Game servers are addressed upstream by a content hash of
//! `{game, ip, port}` rather than by a server API id. The hash must be
//! reproducible bit for bit, so the update order here is fixed.

use sha1::{Sha1, Digest};

/// Hex-encoded SHA-1 resource key (40 chars).
pub type ResourceHash = String;

/// Incremental hasher for upstream resource keys.
///
/// Wraps SHA-1. Order of updates is part of the key.
pub struct ResourceHasher {
    hasher: Sha1,
}

impl ResourceHasher {
    /// Create an empty hasher.
    pub fn new() -> Self {
        Self { hasher: Sha1::new() }
    }

    /// Update with a string, as raw UTF-8 bytes.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.hasher.update(value.as_bytes());
    }

    /// Update with a port number in base-10 text form.
    #[inline]
    pub fn update_port(&mut self, port: u16) {
        self.hasher.update(port.to_string().as_bytes());
    }

    /// Finalize into a lowercase hex string.
    pub fn finalize_hex(self) -> ResourceHash {
        hex::encode(self.hasher.finalize())
    }
}

impl Default for ResourceHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the resource key of a game server.
///
/// `game_code` is the upstream numeric game identifier in text form
/// (`"1"` for DayZ).
pub fn game_server_resource(game_code: &str, ip: &str, port: u16) -> ResourceHash {
    let mut hasher = ResourceHasher::new();
    hasher.update_str(game_code);
    hasher.update_str(ip);
    hasher.update_port(port);
    hasher.finalize_hex()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_sha1_vector() {
        let mut hasher = ResourceHasher::new();
        hasher.update_str("abc");
        assert_eq!(hasher.finalize_hex(), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_game_server_resource_matches_upstream_key() {
        assert_eq!(
            game_server_resource("1", "1.2.3.4", 2302),
            "52b8f09f134195df1a8823dc53a425199382d7c0"
        );
        assert_eq!(
            game_server_resource("1", "127.0.0.1", 2302),
            "c0d1db47b89ade22740fd3b2a5e79393dfc56c90"
        );
    }

    #[test]
    fn test_port_changes_key() {
        assert_ne!(
            game_server_resource("1", "1.2.3.4", 2302),
            game_server_resource("1", "1.2.3.4", 2402)
        );
    }

    proptest! {
        #[test]
        fn prop_resource_is_deterministic(a in 0u8..=255, b in 0u8..=255, port in any::<u16>()) {
            let ip = format!("10.0.{}.{}", a, b);
            let first = game_server_resource("1", &ip, port);
            let second = game_server_resource("1", &ip, port);
            prop_assert_eq!(first.len(), 40);
            prop_assert_eq!(first, second);
        }
    }
}
