//! Lead Entity
//!
//! A prospect tracked through the contact pipeline, anchored to the cohort
//! day it was added under.

use serde::{Deserialize, Serialize};

use super::date::CalendarDate;
use super::entity::{new_id, Entity};
use super::pipeline::LeadStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Unique identifier
    pub id: String,
    /// Contact name (may be blank)
    #[serde(default)]
    pub name: String,
    /// Company name (may be blank)
    #[serde(default)]
    pub company: String,
    pub status: LeadStatus,
    /// Cohort date: the day board the lead was created on
    pub date: CalendarDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Lead {
    /// A fresh `todo` lead with the given id
    pub fn new(id: String, date: CalendarDate) -> Self {
        Self {
            id,
            name: String::new(),
            company: String::new(),
            status: LeadStatus::Todo,
            date,
            notes: String::new(),
            value: None,
        }
    }

    /// Build a new lead from a draft, assigning a fresh id
    pub fn from_draft(draft: LeadDraft) -> Self {
        Self {
            id: new_id(),
            name: draft.name,
            company: draft.company,
            status: LeadStatus::Todo,
            date: draft.date,
            notes: draft.notes,
            value: draft.value,
        }
    }

    /// Apply an edit; status and cohort date are never touched here
    pub fn apply(&mut self, patch: LeadPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status.is_terminal()
    }
}

impl Entity for Lead {
    type Id = str;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields of the add-lead form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadDraft {
    pub name: String,
    pub company: String,
    pub notes: String,
    pub date: CalendarDate,
    pub value: Option<f64>,
}

impl LeadDraft {
    /// Blank draft for the given cohort day
    pub fn new(date: CalendarDate) -> Self {
        Self {
            name: String::new(),
            company: String::new(),
            notes: String::new(),
            date,
            value: None,
        }
    }
}

/// Partial edit of a lead; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub value: Option<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_lead_from_draft() {
        let draft = LeadDraft {
            name: "Ana".to_string(),
            company: String::new(),
            notes: "call back".to_string(),
            date: day("2023-12-04"),
            value: None,
        };
        let lead = Lead::from_draft(draft);
        assert!(!lead.id.is_empty());
        assert_eq!(lead.status, LeadStatus::Todo);
        assert_eq!(lead.date, day("2023-12-04"));
        assert!(lead.company.is_empty());
    }

    #[test]
    fn test_fresh_ids_differ() {
        let a = Lead::from_draft(LeadDraft::new(day("2023-12-04")));
        let b = Lead::from_draft(LeadDraft::new(day("2023-12-04")));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_patch_keeps_status_and_date() {
        let mut lead = Lead::new("1".to_string(), day("2023-12-04"));
        lead.status = LeadStatus::C2;
        lead.apply(LeadPatch {
            company: Some("Acme".to_string()),
            ..Default::default()
        });
        assert_eq!(lead.company, "Acme");
        assert_eq!(lead.status, LeadStatus::C2);
        assert_eq!(lead.date, day("2023-12-04"));
    }

    #[test]
    fn test_lead_json_shape() {
        let json = r#"{"id":"7","name":"Juliana","company":"Studio JP","status":"c3","date":"2023-12-05","notes":""}"#;
        let lead: Lead = serde_json::from_str(json).unwrap();
        assert_eq!(lead.status, LeadStatus::C3);
        assert_eq!(lead.value, None);

        let back = serde_json::to_string(&lead).unwrap();
        assert!(!back.contains("value"));
        assert!(back.contains("\"date\":\"2023-12-05\""));
    }
}
