use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use uuid::Uuid;

/// Opaque project identifier. Fresh ids are random and never handed out twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub tables: u32,
    pub favorite: bool,
}

impl Project {
    /// A brand new project: no tables, not a favorite, stamped now.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            updated_at: OffsetDateTime::now_utc(),
            tables: 0,
            favorite: false,
        }
    }

    pub fn with_tables(mut self, tables: u32) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            updated_at: OffsetDateTime::now_utc(),
            ..self.clone()
        }
    }

    pub fn favorite_toggled(&self) -> Self {
        Self {
            favorite: !self.favorite,
            ..self.clone()
        }
    }

    /// `updated_at` as an RFC 3339 string, the format used on the wire and in exports.
    pub fn updated_at_iso(&self) -> anyhow::Result<String> {
        Ok(self.updated_at.format(&Rfc3339)?)
    }

    /// Calendar date of the last update in the local timezone, falling back to UTC
    /// when the local offset cannot be determined.
    pub fn updated_on_local(&self) -> Date {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        self.updated_at.to_offset(offset).date()
    }
}
