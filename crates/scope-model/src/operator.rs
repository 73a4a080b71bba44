use serde::{Deserialize, Serialize};

use crate::ModelError;

/// The person signed in to the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub id: String,
    pub username: String,
    /// e.g. "Commander", "Tactical Officer".
    pub designation: String,
    /// e.g. "Alpha Command", "Operations Lead".
    pub position: String,
    pub rank: Option<String>,
    pub clearance_level: Option<String>,
}

impl Operator {
    fn known(id: &str, username: &str, designation: &str, position: &str, rank: &str, clearance: &str) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            designation: designation.to_string(),
            position: position.to_string(),
            rank: Some(rank.to_string()),
            clearance_level: Some(clearance.to_string()),
        }
    }
}

/// Resolve the operator record for a login name.
///
/// Known names are matched case-insensitively. Any other non-empty name gets
/// a generic field-support profile with a fresh id; there is no password
/// check anywhere.
pub fn operator_for_username(username: &str) -> Result<Operator, ModelError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ModelError::EmptyUsername);
    }

    let op = match trimmed.to_lowercase().as_str() {
        "admin" => Operator::known("op-001", "admin", "Commander", "Alpha Command", "Colonel", "Level 5"),
        "officer" => Operator::known(
            "op-002",
            "officer",
            "Tactical Officer",
            "Operations Lead",
            "Major",
            "Level 4",
        ),
        _ => Operator {
            id: format!("op-{}", uuid::Uuid::new_v4()),
            username: trimmed.to_string(),
            designation: "Operator".to_string(),
            position: "Field Support".to_string(),
            rank: Some("Lieutenant".to_string()),
            clearance_level: Some("Level 3".to_string()),
        },
    };
    Ok(op)
}
