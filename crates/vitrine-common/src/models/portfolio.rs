//! Portfolio project models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Record, ResourceKind};
use crate::error::VitrineError;

/// Delivery state of a portfolio project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    #[default]
    Future,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in_progress",
            Self::Future => "future",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = VitrineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "completed" => Ok(Self::Completed),
            "in_progress" | "in-progress" => Ok(Self::InProgress),
            "future" => Ok(Self::Future),
            other => Err(VitrineError::validation(format!("Unknown project status '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioProject {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_path: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for PortfolioProject {
    const KIND: ResourceKind = ResourceKind::Portfolio;

    fn id(&self) -> i64 {
        self.id
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioProjectUpdate {
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub order: i32,
    pub is_active: bool,
}
