use serde::{Deserialize, Serialize};

/// A movie genre, aligned with the upstream catalogue's genre IDs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Upstream response shape for the genre list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}
