use serde::{Deserialize, Serialize};

/// Where clients can fetch the warehouse map, relative to the server root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapResponse {
    pub path: String,
}
