//! Seed dataset used when storage holds no collection yet.

use super::date::CalendarDate;
use super::lead::Lead;
use super::pipeline::LeadStatus;
use super::task::{Task, TaskOwner, TaskType};

fn seed_day() -> CalendarDate {
    // Valid literal; from_ymd only fails on impossible dates
    CalendarDate::from_ymd(2023, 12, 1).unwrap_or_else(|_| CalendarDate::today())
}

fn lead(id: &str, name: &str, company: &str, status: LeadStatus, date: CalendarDate, notes: &str) -> Lead {
    Lead {
        id: id.to_string(),
        name: name.to_string(),
        company: company.to_string(),
        status,
        date,
        notes: notes.to_string(),
        value: None,
    }
}

/// Starter leads; the open ones sit on `today`'s board
pub fn seed_leads(today: CalendarDate) -> Vec<Lead> {
    let past = seed_day();
    vec![
        lead("1", "Ricardo Silva", "Tech Solutions", LeadStatus::Interested, past, "Liked the traffic proposal."),
        lead("2", "Ana Souza", "Boutique Flor", LeadStatus::NotInterested, past, "Budget too high."),
        lead("3", "Carlos Mendes", "Barbearia Club", LeadStatus::C2, today, "Waiting on the partner's answer."),
        lead("4", "Fernanda Lima", "Cafe & Aroma", LeadStatus::Todo, today, "Send the company deck."),
        lead("5", "Grupo Varejo", "GV Holdings", LeadStatus::C1, today, "Call scheduled."),
        lead("6", "Roberto Campos", "Advocacia RC", LeadStatus::C4, today, "Wants a monthly contract."),
        lead("7", "Juliana Paes", "Estetica JP", LeadStatus::C3, today, "Last attempt before dropping."),
        lead("8", "Mario Bros", "Encanamentos", LeadStatus::Todo, past.add_days(1), "Cold lead."),
    ]
}

fn task(id: &str, title: &str, date: CalendarDate, completed: bool, task_type: TaskType, owner: TaskOwner) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        date,
        completed,
        task_type,
        owner,
    }
}

pub fn seed_tasks(today: CalendarDate) -> Vec<Task> {
    let past = seed_day().add_days(1);
    vec![
        task("1", "Meeting with Ricardo", today, false, TaskType::Meeting, TaskOwner::Davi),
        task("2", "Build monthly report", today, true, TaskType::General, TaskOwner::Bia),
        task("3", "Follow up Ana Souza", past, false, TaskType::FollowUp, TaskOwner::Lucas),
        task("4", "Strategy alignment", today, false, TaskType::General, TaskOwner::Davi),
        task("5", "Chase the briefing", today, false, TaskType::FollowUp, TaskOwner::Bia),
    ]
}
