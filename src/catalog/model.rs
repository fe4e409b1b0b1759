//! Deserializable representation of a catalogue document.
//!
//! The types mirror `schema/catalogue.schema.json`. Optional flags are
//! normalized here: a missing `isComingSoon`, `featured` or `tags` field
//! becomes `false`/empty so nothing downstream has to interpret absence.
//! Use `CatalogueIndex` for validation and lookup.

use crate::catalog::identity::{CategoryId, SchemaVersion, ToolId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Full catalogue document as stored on disk.
pub struct CatalogueDocument {
    pub schema_version: SchemaVersion,
    pub categories: Vec<Category>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// A named grouping of tools, displayed as one section.
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tools: Vec<Tool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One tool entry. `icon` and `path` are opaque display data.
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    pub description: String,
    pub category: CategoryId,
    pub icon: String,
    pub path: String,
    #[serde(default)]
    pub is_coming_soon: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Whether a tool can be opened or is only announced.
pub enum Availability {
    Available,
    ComingSoon,
}

impl Availability {
    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::ComingSoon => "coming_soon",
        }
    }
}

impl Tool {
    pub fn availability(&self) -> Availability {
        if self.is_coming_soon {
            Availability::ComingSoon
        } else {
            Availability::Available
        }
    }

    /// True when the tool's page can actually be used.
    pub fn is_launchable(&self) -> bool {
        !self.is_coming_soon
    }
}

impl Category {
    /// Copy of this category's metadata carrying only the given tools.
    pub(crate) fn with_tools(&self, tools: Vec<Tool>) -> Category {
        Category {
            id: self.id.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            description: self.description.clone(),
            tools,
        }
    }
}
