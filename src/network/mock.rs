//! Recording transport for tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::network::transport::{ApiRequest, HttpTransport, Method, TransportError};

type Reply = Result<String, (u16, String)>;

/// Serves queued replies per `(method, path)` and records every request.
///
/// Replies are consumed in order. Unmatched requests fail with 404.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<BTreeMap<(String, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON reply.
    pub fn respond(&self, method: Method, path: &str, body: serde_json::Value) {
        self.push(method, path, Ok(body.to_string()));
    }

    /// Queue an empty successful reply.
    pub fn respond_empty(&self, method: Method, path: &str) {
        self.push(method, path, Ok(String::new()));
    }

    /// Queue a failure status.
    pub fn fail(&self, method: Method, path: &str, status: u16) {
        self.push(method, path, Err((status, "mock failure".to_string())));
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(reply);
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests made with the given method.
    pub fn requests_with(&self, method: Method) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<String, TransportError> {
        let key = (request.method.to_string(), request.path.clone());
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front());
        match reply {
            Some(Ok(body)) => Ok(body),
            Some(Err((status, body))) => Err(TransportError::Status { status, body }),
            None => Err(TransportError::Status {
                status: 404,
                body: format!("no mock reply for {} {}", key.0, key.1),
            }),
        }
    }
}

/// A complete game server query result with the given error code.
pub fn game_server_fixture(error: &str) -> serde_json::Value {
    json!({
        "_object": {"error": error},
        "attributes": {
            "dlc": true, "dlcs": {"livonia": true}, "experimental": false,
            "hive": "public", "modded": true, "official": false,
            "shard": "", "whitelist": false
        },
        "environment": {
            "perspectives": {"1rd": true, "3rd": false},
            "time": "12:30",
            "time_acceleration": {"general": 4.0, "night": 8.0}
        },
        "game": 1,
        "geolocation": {
            "available": true,
            "city": {"name": null, "region": null},
            "continent": "EU",
            "country": {"code": "DE", "name": "Germany"},
            "timezone": "Europe/Berlin"
        },
        "host": {"address": "1.2.3.4", "game_port": 2302, "os": "w", "query_port": 27016},
        "map": "chernarusplus",
        "mods": [{"file_id": 1559212036, "name": "CF"}],
        "name": "Test Server",
        "offline": false,
        "online": true,
        "publisher": {"monetization": false},
        "rank": 12,
        "rating": 3,
        "security": {"battleye": true, "password": false, "vac": true},
        "status": {"bots": false, "players": 10, "queue": {"active": false, "size": 2}, "slots": 60},
        "version": "1.14"
    })
}
