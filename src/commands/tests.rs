//! Command Tests
//!
//! End-to-end through `AppState` with an in-memory backend.

use std::sync::Arc;

use crate::commands::*;
use crate::config::AppConfig;
use crate::domain::{CalendarDate, LeadStatus, TaskOwner, TaskType};
use crate::repository::{KeyValueStore, MemoryStore, TASKS_KEY};
use crate::AppState;

const TODAY: &str = "2023-12-06";

fn state_over(kv: Arc<MemoryStore>, config: AppConfig) -> AppState {
    let today = CalendarDate::parse(TODAY).unwrap();
    AppState::with_store(kv, config, Some(today)).unwrap()
}

fn empty_state() -> AppState {
    let kv = Arc::new(MemoryStore::new());
    kv.set("leads", "[]").unwrap();
    kv.set("tasks", "[]").unwrap();
    state_over(kv, AppConfig::default())
}

#[tokio::test]
async fn test_seeded_state() {
    let state = state_over(Arc::new(MemoryStore::new()), AppConfig::default());

    let leads = list_leads(&state).await.unwrap();
    assert_eq!(leads.len(), 8);
    let tasks = list_tasks(&state).await.unwrap();
    assert_eq!(tasks.len(), 5);

    let board = get_day_board(&state, TODAY.to_string()).await.unwrap();
    assert_eq!(board.created_today, 5);
}

#[tokio::test]
async fn test_create_and_edit_lead() {
    let state = empty_state();

    let lead = create_lead(
        &state,
        "2023-12-04".to_string(),
        "  Ana ".to_string(),
        String::new(),
        "first touch".to_string(),
    )
    .await
    .unwrap();
    assert_eq!(lead.name, "Ana");
    assert_eq!(lead.status, LeadStatus::Todo);

    let edited = update_lead(&state, lead.id.clone(), None, Some("Flor".to_string()), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edited.company, "Flor");
    assert_eq!(edited.name, "Ana");

    assert!(update_lead(&state, "missing".to_string(), None, None, None)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_create_lead_rejects_bad_date() {
    let state = empty_state();
    let err = create_lead(&state, "2023-12-4".to_string(), String::new(), String::new(), String::new())
        .await
        .unwrap_err();
    assert!(err.contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn test_pipeline_commands() {
    let state = empty_state();
    let lead = create_lead(&state, "2023-12-04".to_string(), String::new(), String::new(), String::new())
        .await
        .unwrap();

    let advanced = advance_lead(&state, lead.id.clone()).await.unwrap().unwrap();
    assert_eq!(advanced.status, LeadStatus::C1);

    // Skipping ahead is refused
    assert!(move_lead(&state, lead.id.clone(), "c3".to_string()).await.unwrap().is_none());

    let resolved = resolve_lead(&state, lead.id.clone(), "interested".to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.status, LeadStatus::Interested);
    assert!(advance_lead(&state, lead.id.clone()).await.unwrap().is_none());

    let reverted = revert_lead(&state, lead.id.clone()).await.unwrap().unwrap();
    assert_eq!(reverted.status, LeadStatus::C4);

    assert!(move_lead(&state, lead.id.clone(), "c9".to_string()).await.is_err());
}

#[tokio::test]
async fn test_drop_without_id_is_noop() {
    let state = empty_state();
    let lead = create_lead(&state, TODAY.to_string(), String::new(), String::new(), String::new())
        .await
        .unwrap();

    assert!(drop_lead(&state, None, "c1".to_string()).await.unwrap().is_none());
    assert!(drop_lead(&state, Some("  ".to_string()), "c1".to_string()).await.unwrap().is_none());
    assert!(drop_lead(&state, Some("ghost".to_string()), "c1".to_string()).await.unwrap().is_none());

    let moved = drop_lead(&state, Some(lead.id.clone()), "c1".to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.status, LeadStatus::C1);

    // Dragging back corrects a mistaken advance
    let back = drop_lead(&state, Some(lead.id.clone()), "todo".to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(back.status, LeadStatus::Todo);
}

#[tokio::test]
async fn test_advance_column_moves_only_that_column() {
    let state = empty_state();
    let mut ids = Vec::new();
    for _ in 0..2 {
        let lead = create_lead(&state, "2023-12-04".to_string(), String::new(), String::new(), String::new())
            .await
            .unwrap();
        advance_lead(&state, lead.id.clone()).await.unwrap();
        ids.push(lead.id);
    }
    let untouched = create_lead(&state, "2023-12-04".to_string(), String::new(), String::new(), String::new())
        .await
        .unwrap();

    let moved = advance_column(&state, "2023-12-05".to_string(), "c1".to_string())
        .await
        .unwrap();
    assert_eq!(moved, 2);

    let board = get_day_board(&state, "2023-12-05".to_string()).await.unwrap();
    assert_eq!(board.column(LeadStatus::C2).unwrap().leads.len(), 2);
    assert_eq!(board.column(LeadStatus::Todo).unwrap().lead_ids(), vec![untouched.id]);

    // c4 offers no "advance all"
    assert_eq!(
        advance_column(&state, "2023-12-05".to_string(), "c4".to_string()).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_delete_lead_unknown_id() {
    let state = empty_state();
    create_lead(&state, TODAY.to_string(), String::new(), String::new(), String::new())
        .await
        .unwrap();

    assert!(!delete_lead(&state, "missing".to_string()).await.unwrap());
    assert_eq!(list_leads(&state).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_dashboard_and_overview() {
    let state = empty_state();
    let lead = create_lead(&state, "2023-12-04".to_string(), String::new(), String::new(), String::new())
        .await
        .unwrap();
    resolve_lead(&state, lead.id, "interested".to_string()).await.unwrap();
    create_lead(&state, "2023-12-05".to_string(), String::new(), String::new(), String::new())
        .await
        .unwrap();

    let week = get_dashboard(&state, "week".to_string(), None).await.unwrap();
    assert_eq!(week.metrics.total, 2);
    assert_eq!(week.metrics.conversion_rate, 50.0);

    let next_week = get_dashboard(&state, "week".to_string(), Some("2023-12-13".to_string()))
        .await
        .unwrap();
    assert_eq!(next_week.metrics.total, 0);
    assert_eq!(next_week.metrics.conversion_rate, 0.0);

    assert!(get_dashboard(&state, "year".to_string(), None).await.is_err());

    let overview = get_week_overview(&state, None).await.unwrap();
    assert!(overview.days[3].is_today);
    assert_eq!(overview.total_interested, 1);
}

#[tokio::test]
async fn test_task_commands() {
    let state = empty_state();

    assert!(create_task(&state, TODAY.to_string(), "   ".to_string(), None).await.is_err());

    let task = create_task(&state, TODAY.to_string(), "Client call".to_string(), Some("meeting".to_string()))
        .await
        .unwrap();
    assert_eq!(task.task_type, TaskType::Meeting);
    assert_eq!(task.owner, TaskOwner::Davi);

    assert_eq!(toggle_task(&state, task.id.clone()).await.unwrap(), Some(true));

    let edited = update_task(&state, task.id.clone(), Some("Client call #2".to_string()), Some("follow_up".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edited.task_type, TaskType::FollowUp);
    assert!(edited.completed);

    assert!(!delete_task(&state, task.id.clone(), false).await.unwrap());
    assert_eq!(tasks_for_date(&state, TODAY.to_string()).await.unwrap().len(), 1);
    assert!(delete_task(&state, task.id, true).await.unwrap());
    assert!(list_tasks(&state).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_notes_and_calendar() {
    let state = empty_state();
    set_note(&state, TODAY.to_string(), "Quarter review".to_string()).await.unwrap();
    create_task(&state, TODAY.to_string(), "Prepare deck".to_string(), None)
        .await
        .unwrap();

    assert_eq!(get_note(&state, TODAY.to_string()).await.unwrap(), "Quarter review");
    assert_eq!(get_note(&state, "2023-12-07".to_string()).await.unwrap(), "");

    let calendar = get_month_calendar(&state, None).await.unwrap();
    let cell = calendar
        .cells
        .iter()
        .flatten()
        .find(|cell| cell.date.to_string() == TODAY)
        .unwrap();
    assert!(cell.has_note);
    assert!(cell.is_today);
    assert_eq!(cell.task_count, 1);
}

#[tokio::test]
async fn test_session_only_tasks() {
    let kv = Arc::new(MemoryStore::new());
    let config = AppConfig {
        persist_tasks: false,
        default_owner: TaskOwner::Lucas,
        ..AppConfig::default()
    };
    let state = state_over(kv.clone(), config);

    let task = create_task(&state, TODAY.to_string(), "Local only".to_string(), None)
        .await
        .unwrap();
    assert_eq!(task.owner, TaskOwner::Lucas);
    assert!(kv.get(TASKS_KEY).unwrap().is_none());
}
