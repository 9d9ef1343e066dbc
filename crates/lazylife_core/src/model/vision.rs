//! Goals with milestones and vision board cards.

use super::EntityId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: EntityId,
    pub name: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: EntityId,
    pub title: String,
    pub status: GoalStatus,
    /// Owned by the goal; removed with it.
    pub milestones: Vec<Milestone>,
    pub category: String,
    pub timeframe: Timeframe,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoal {
    pub title: String,
    pub status: GoalStatus,
    pub milestones: Vec<String>,
    pub category: String,
    pub timeframe: Timeframe,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub status: Option<GoalStatus>,
    pub category: Option<String>,
    pub timeframe: Option<Timeframe>,
    /// `Some(None)` clears the deadline.
    pub deadline: Option<Option<NaiveDate>>,
}

/// One card on the vision board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionItem {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub achieved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisionItem {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisionItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<Option<String>>,
    pub achieved: Option<bool>,
}
