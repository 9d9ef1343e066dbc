//! Identity board records: bucketed statements, core values and traits.

use super::EntityId;
use serde::{Deserialize, Serialize};

/// Free-text statement filed under a named bucket (e.g. `I am`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityItem {
    pub id: EntityId,
    pub bucket: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentityItem {
    pub bucket: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityItemPatch {
    pub bucket: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreValue {
    pub id: EntityId,
    pub value: String,
    pub description: String,
    /// 1 (low) to 10 (high); not range checked.
    pub importance: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCoreValue {
    pub value: String,
    pub description: String,
    pub importance: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreValuePatch {
    pub value: Option<String>,
    pub description: Option<String>,
    pub importance: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterTrait {
    pub id: EntityId,
    pub name: String,
    pub current_score: u8,
    pub target_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharacterTrait {
    pub name: String,
    pub current_score: u8,
    pub target_score: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterTraitPatch {
    pub name: Option<String>,
    pub current_score: Option<u8>,
    pub target_score: Option<u8>,
}
