//! Disliked Food model

use serde::{Deserialize, Serialize};

use super::ListKind;
use crate::preferences::ListEntry;

/// How strongly a food is disliked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DislikeSeverity {
    #[default]
    Mild,
    Absolute,
}

impl DislikeSeverity {
    pub const ALL: [DislikeSeverity; 2] = [DislikeSeverity::Mild, DislikeSeverity::Absolute];

    pub fn as_str(&self) -> &'static str {
        match self {
            DislikeSeverity::Mild => "mild",
            DislikeSeverity::Absolute => "absolute",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DislikeSeverity::Mild => "Mild Dislike",
            DislikeSeverity::Absolute => "Absolutely Won't Eat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Some(DislikeSeverity::Mild),
            "absolute" => Some(DislikeSeverity::Absolute),
            _ => None,
        }
    }
}

/// A food the care recipient does not want served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DislikedFood {
    pub id: i64,
    pub name: String,
    pub severity: DislikeSeverity,
}

impl ListEntry for DislikedFood {
    type Extra = DislikeSeverity;
    const LIST: ListKind = ListKind::Dislikes;

    fn new(id: i64, name: String, severity: DislikeSeverity) -> Self {
        Self { id, name, severity }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn extra(&self) -> DislikeSeverity {
        self.severity
    }

    fn replace(&mut self, name: String, severity: DislikeSeverity) {
        self.name = name;
        self.severity = severity;
    }

    fn same_scope(_: DislikeSeverity, _: DislikeSeverity) -> bool {
        true
    }

    fn duplicate_scope(_: DislikeSeverity) -> String {
        "disliked foods".to_string()
    }

    fn added_message(name: &str, severity: DislikeSeverity) -> String {
        format!("Added \"{}\" to dislikes ({})", name, severity.label())
    }

    fn removed_message(name: &str) -> String {
        format!("Removed \"{}\" from dislikes", name)
    }

    fn parse_extra(s: &str) -> Option<DislikeSeverity> {
        DislikeSeverity::from_str(s)
    }

    fn extra_str(severity: DislikeSeverity) -> &'static str {
        severity.as_str()
    }
}
