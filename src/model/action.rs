//! GameLabs Actions
//!
//! In-game remote actions. The request shape below is serialized as-is and
//! is the wire contract of `v1/server/{id}/GameLabs/action`.

use std::collections::BTreeMap;
use serde::Serialize;

use crate::core::id::ServerApiId;
use crate::model::session::Vector3;

/// Action codes understood by the GameLabs integration.
pub mod codes {
    /// Restore health, blood and shock.
    pub const HEAL_PLAYER: &str = "CFCloud_HealPlayer";
    /// Kill the player.
    pub const KILL_PLAYER: &str = "CFCloud_KillPlayer";
    /// Move the player; takes a `vector` parameter.
    pub const TELEPORT_PLAYER: &str = "CFCloud_TeleportPlayer";
    /// Spawn an item; takes `item`, `quantity`, `debug` and `stacked`.
    pub const SPAWN_PLAYER_ITEM: &str = "CFCloud_SpawnPlayerItem";
}

/// Context for actions targeting a player.
pub const PLAYER_CONTEXT: &str = "player";

/// A typed action parameter.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "dataType", rename_all = "lowercase")]
pub enum ActionParameter {
    /// Text value.
    String {
        /// The text.
        #[serde(rename = "valueString")]
        value: String,
    },
    /// Integer value.
    Int {
        /// The integer.
        #[serde(rename = "valueInt")]
        value: i64,
    },
    /// Flag value.
    Boolean {
        /// The flag.
        #[serde(rename = "valueBoolean")]
        value: bool,
    },
    /// World coordinates.
    Vector {
        /// East-west.
        #[serde(rename = "valueVectorX")]
        x: f64,
        /// Height.
        #[serde(rename = "valueVectorY")]
        y: f64,
        /// North-south.
        #[serde(rename = "valueVectorZ")]
        z: f64,
    },
}

impl From<Vector3> for ActionParameter {
    fn from(v: Vector3) -> Self {
        ActionParameter::Vector { x: v.x, y: v.y, z: v.z }
    }
}

/// Envelope of a GameLabs action.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLabsActionRequest {
    /// Target server. Falls back to the client default.
    #[serde(skip)]
    pub server_api_id: Option<ServerApiId>,
    /// One of [`codes`].
    pub action_code: String,
    /// Kind of target, [`PLAYER_CONTEXT`] for player actions.
    pub action_context: String,
    /// Target of the action; the Steam64 id for player actions.
    pub reference_key: String,
    /// Named, typed parameters.
    pub parameters: BTreeMap<String, ActionParameter>,
}

impl GameLabsActionRequest {
    /// Start a player-context action without parameters.
    pub fn player(action_code: &str, reference_key: impl Into<String>) -> Self {
        Self {
            server_api_id: None,
            action_code: action_code.to_string(),
            action_context: PLAYER_CONTEXT.to_string(),
            reference_key: reference_key.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Target a specific server.
    pub fn on_server(mut self, server_api_id: Option<ServerApiId>) -> Self {
        self.server_api_id = server_api_id;
        self
    }

    /// Add a parameter.
    pub fn parameter(mut self, name: &str, value: ActionParameter) -> Self {
        self.parameters.insert(name.to_string(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_wire_shapes() {
        let request = GameLabsActionRequest::player(codes::SPAWN_PLAYER_ITEM, "76561198012345678")
            .on_server(Some(ServerApiId::of("ignored")))
            .parameter("item", ActionParameter::String { value: "Apple".into() })
            .parameter("quantity", ActionParameter::Int { value: 2 })
            .parameter("debug", ActionParameter::Boolean { value: false })
            .parameter("vector", Vector3::new(1.0, 2.5, -3.0).into());

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "actionCode": "CFCloud_SpawnPlayerItem",
                "actionContext": "player",
                "referenceKey": "76561198012345678",
                "parameters": {
                    "item": {"dataType": "string", "valueString": "Apple"},
                    "quantity": {"dataType": "int", "valueInt": 2},
                    "debug": {"dataType": "boolean", "valueBoolean": false},
                    "vector": {
                        "dataType": "vector",
                        "valueVectorX": 1.0,
                        "valueVectorY": 2.5,
                        "valueVectorZ": -3.0
                    }
                }
            })
        );
    }
}
