//! Task Entity
//!
//! A team agenda entry scheduled on a calendar day.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::date::CalendarDate;
use super::entity::{new_id, DomainError, Entity};

/// Task type determines how the agenda tags it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    #[default]
    General,
    Meeting,
    FollowUp,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::General => "general",
            TaskType::Meeting => "meeting",
            TaskType::FollowUp => "follow_up",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskType::General => "General",
            TaskType::Meeting => "Meeting",
            TaskType::FollowUp => "Follow-up",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(TaskType::General),
            "meeting" => Ok(TaskType::Meeting),
            "follow_up" | "follow-up" => Ok(TaskType::FollowUp),
            _ => Err(DomainError::UnknownVariant {
                kind: "task type",
                value: s.to_string(),
            }),
        }
    }
}

/// Team roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskOwner {
    #[default]
    Davi,
    Lucas,
    Bia,
}

pub const OWNERS: [TaskOwner; 3] = [TaskOwner::Davi, TaskOwner::Lucas, TaskOwner::Bia];

impl TaskOwner {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskOwner::Davi => "Davi",
            TaskOwner::Lucas => "Lucas",
            TaskOwner::Bia => "Bia",
        }
    }
}

impl fmt::Display for TaskOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskOwner {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OWNERS
            .iter()
            .find(|owner| owner.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| DomainError::UnknownVariant {
                kind: "task owner",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Scheduled day
    pub date: CalendarDate,
    pub completed: bool,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub owner: TaskOwner,
}

impl Task {
    /// Build an open task from a draft, assigning a fresh id
    pub fn from_draft(draft: TaskDraft, owner: TaskOwner) -> Self {
        Self {
            id: new_id(),
            title: draft.title,
            date: draft.date,
            completed: false,
            task_type: draft.task_type,
            owner,
        }
    }

    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(task_type) = patch.task_type {
            self.task_type = task_type;
        }
        if let Some(owner) = patch.owner {
            self.owner = owner;
        }
    }
}

impl Entity for Task {
    type Id = str;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields of the day-detail add form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub date: CalendarDate,
    pub task_type: TaskType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub task_type: Option<TaskType>,
    pub owner: Option<TaskOwner>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_from_draft() {
        let draft = TaskDraft {
            title: "Weekly sync".to_string(),
            date: CalendarDate::parse("2023-12-04").unwrap(),
            task_type: TaskType::Meeting,
        };
        let task = Task::from_draft(draft, TaskOwner::default());
        assert!(!task.completed);
        assert_eq!(task.owner, TaskOwner::Davi);
        assert_eq!(task.task_type, TaskType::Meeting);
    }

    #[test]
    fn test_task_type_strings() {
        assert_eq!("follow_up".parse::<TaskType>(), Ok(TaskType::FollowUp));
        assert!("call".parse::<TaskType>().is_err());
        assert_eq!(serde_json::to_string(&TaskType::FollowUp).unwrap(), "\"follow_up\"");
        assert_eq!("bia".parse::<TaskOwner>(), Ok(TaskOwner::Bia));
    }

    #[test]
    fn test_task_json_uses_type_key() {
        let json = r#"{"id":"3","title":"Follow up Ana","date":"2023-12-02","completed":false,"type":"follow_up","owner":"Lucas"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.task_type, TaskType::FollowUp);
        assert_eq!(task.owner, TaskOwner::Lucas);
        assert!(serde_json::to_string(&task).unwrap().contains("\"type\":\"follow_up\""));
    }
}
