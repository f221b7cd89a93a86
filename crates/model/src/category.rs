use alloc::string::String;
use serde::{Deserialize, Serialize};

/// A quiz category as listed by `GET /api/categories`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Body of `POST /api/categories`.
#[derive(Debug, Serialize)]
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub description: &'a str,
}
