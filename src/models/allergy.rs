//! Allergy model
//!
//! Allergies and intolerances. Entries whose name is spelled exactly like a
//! common allergen are mirrored into the quick-select pills.

use serde::{Deserialize, Serialize};

use super::ListKind;
use crate::preferences::ListEntry;

/// Allergy severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AllergySeverity {
    #[default]
    Mild,
    Severe,
}

impl AllergySeverity {
    pub const ALL: [AllergySeverity; 2] = [AllergySeverity::Mild, AllergySeverity::Severe];

    pub fn as_str(&self) -> &'static str {
        match self {
            AllergySeverity::Mild => "mild",
            AllergySeverity::Severe => "severe",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AllergySeverity::Mild => "Mild Intolerance",
            AllergySeverity::Severe => "Severe Allergy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Some(AllergySeverity::Mild),
            "severe" => Some(AllergySeverity::Severe),
            _ => None,
        }
    }
}

/// An allergy or intolerance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allergy {
    pub id: i64,
    pub name: String,
    pub severity: AllergySeverity,
}

impl ListEntry for Allergy {
    type Extra = AllergySeverity;
    const LIST: ListKind = ListKind::Allergies;

    fn new(id: i64, name: String, severity: AllergySeverity) -> Self {
        Self { id, name, severity }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn extra(&self) -> AllergySeverity {
        self.severity
    }

    fn replace(&mut self, name: String, severity: AllergySeverity) {
        self.name = name;
        self.severity = severity;
    }

    fn same_scope(_: AllergySeverity, _: AllergySeverity) -> bool {
        true
    }

    fn duplicate_scope(_: AllergySeverity) -> String {
        "allergies list".to_string()
    }

    fn added_message(name: &str, severity: AllergySeverity) -> String {
        format!("Added \"{}\" allergy ({})", name, severity.label())
    }

    fn removed_message(name: &str) -> String {
        format!("Removed \"{}\" allergy", name)
    }

    fn parse_extra(s: &str) -> Option<AllergySeverity> {
        AllergySeverity::from_str(s)
    }

    fn extra_str(severity: AllergySeverity) -> &'static str {
        severity.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_round_trips_through_str() {
        for severity in AllergySeverity::ALL {
            assert_eq!(AllergySeverity::from_str(severity.as_str()), Some(severity));
        }
        assert_eq!(AllergySeverity::from_str("absolute"), None);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&AllergySeverity::Severe).unwrap();
        assert_eq!(json, "\"severe\"");
    }
}
