use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardMeta {
    pub is_starred: bool,
    pub slug: String,
    pub version: Option<i64>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

/// A stored dashboard: server metadata plus the opaque JSON model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub meta: DashboardMeta,
    #[serde(rename = "dashboard", default)]
    pub model: Map<String, Value>,
}

impl Dashboard {
    pub fn title(&self) -> Option<&str> {
        self.model.get("title").and_then(Value::as_str)
    }
}

pub type DashboardList = Vec<DashboardEntry>;

/// One hit from `/api/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardEntry {
    pub id: i64,
    pub title: String,
    pub uri: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: Vec<String>,
    pub is_starred: bool,
}

impl DashboardEntry {
    /// Slug part of the entry's `db/<slug>` URI.
    pub fn slug(&self) -> &str {
        self.uri.rsplit('/').next().unwrap_or(&self.uri)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSaveResponse {
    pub slug: String,
    pub status: String,
    pub version: i64,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardImportResponse {
    pub message: String,
    pub title: String,
    pub imported_uri: String,
    pub slug: String,
}

/// Binds a templated import placeholder (e.g. `DS_PROMETHEUS`) to a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardImportInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub plugin_id: String,
    pub value: String,
}

/// Filter for dashboard search. An empty query lists everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub tags: Vec<String>,
    pub starred: Option<bool>,
}

impl SearchQuery {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = Some(starred);
        self
    }

    /// Query string pairs; `tag` repeats once per tag.
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref query) = self.query {
            pairs.push(("query", query.clone()));
        }
        for tag in &self.tags {
            pairs.push(("tag", tag.clone()));
        }
        if let Some(starred) = self.starred {
            pairs.push(("starred", starred.to_string()));
        }
        pairs
    }
}

/// Body for `POST /api/dashboards/db`.
#[derive(Debug, Serialize)]
pub(crate) struct SaveDashboardRequest<'a> {
    pub dashboard: &'a Map<String, Value>,
    pub overwrite: bool,
}

/// Body for `POST /api/dashboards/import`.
#[derive(Debug, Serialize)]
pub(crate) struct ImportDashboardRequest<'a> {
    pub dashboard: &'a Map<String, Value>,
    pub overwrite: bool,
    pub inputs: &'a [DashboardImportInput],
}
