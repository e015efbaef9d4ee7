//! Lead Commands
//!
//! Add/edit/delete leads and move them through the pipeline.

use crate::domain::{Lead, LeadDraft, LeadPatch, LeadStatus, Outcome};
use crate::views::DayBoard;
use crate::AppState;

use super::{parse_date, parse_field};

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

/// List all leads
pub async fn list_leads(state: &AppState) -> Result<Vec<Lead>, String> {
    let store = state.leads.lock().await;
    Ok(store.list().to_vec())
}

/// Add a lead to the board of `date`; blank name/company are accepted
pub async fn create_lead(
    state: &AppState,
    date: String,
    name: String,
    company: String,
    notes: String,
) -> Result<Lead, String> {
    let mut draft = LeadDraft::new(parse_date(&date)?);
    draft.name = trimmed(name);
    draft.company = trimmed(company);
    draft.notes = notes;

    let mut store = state.leads.lock().await;
    let id = store.create(draft).map_err(|e| e.to_string())?;
    store
        .get(&id)
        .cloned()
        .ok_or_else(|| format!("Lead {} not found", id))
}

/// Edit name/company/notes; `None` for an unknown id
pub async fn update_lead(
    state: &AppState,
    id: String,
    name: Option<String>,
    company: Option<String>,
    notes: Option<String>,
) -> Result<Option<Lead>, String> {
    let patch = LeadPatch {
        name: name.map(trimmed),
        company: company.map(trimmed),
        notes,
        value: None,
    };
    let mut store = state.leads.lock().await;
    store.update(&id, patch).map_err(|e| e.to_string())?;
    Ok(store.get(&id).cloned())
}

/// Delete immediately; `false` if nothing was removed
pub async fn delete_lead(state: &AppState, id: String) -> Result<bool, String> {
    let mut store = state.leads.lock().await;
    store.delete(&id).map_err(|e| e.to_string())
}

/// Move a lead to `status`; returns the lead when it changed
pub async fn move_lead(state: &AppState, id: String, status: String) -> Result<Option<Lead>, String> {
    let status: LeadStatus = parse_field(&status)?;
    let mut store = state.leads.lock().await;
    let changed = store.move_to(&id, status).map_err(|e| e.to_string())?;
    Ok(changed.then(|| store.get(&id).cloned()).flatten())
}

/// Drop onto a board column. A drop without a recognizable lead id is a
/// silent no-op.
pub async fn drop_lead(
    state: &AppState,
    lead_id: Option<String>,
    target_status: String,
) -> Result<Option<Lead>, String> {
    let Some(id) = lead_id.map(trimmed).filter(|id| !id.is_empty()) else {
        log::debug!("Drop without lead id ignored");
        return Ok(None);
    };
    move_lead(state, id, target_status).await
}

pub async fn advance_lead(state: &AppState, id: String) -> Result<Option<Lead>, String> {
    let mut store = state.leads.lock().await;
    let next = store.advance(&id).map_err(|e| e.to_string())?;
    Ok(next.and_then(|_| store.get(&id).cloned()))
}

/// Mark a lead `interested` or `not_interested`
pub async fn resolve_lead(state: &AppState, id: String, outcome: String) -> Result<Option<Lead>, String> {
    let outcome: Outcome = parse_field(&outcome)?;
    let mut store = state.leads.lock().await;
    let next = store.resolve(&id, outcome).map_err(|e| e.to_string())?;
    Ok(next.and_then(|_| store.get(&id).cloned()))
}

/// Return a resolved lead to `c4`
pub async fn revert_lead(state: &AppState, id: String) -> Result<Option<Lead>, String> {
    let mut store = state.leads.lock().await;
    let next = store.revert_to_c4(&id).map_err(|e| e.to_string())?;
    Ok(next.and_then(|_| store.get(&id).cloned()))
}

/// "Advance all" on one column of the board of `date`; returns how many
/// leads moved
pub async fn advance_column(state: &AppState, date: String, status: String) -> Result<usize, String> {
    let date = parse_date(&date)?;
    let status: LeadStatus = parse_field(&status)?;

    let mut store = state.leads.lock().await;
    let board = DayBoard::build(store.list(), date);
    let Some(column) = board.column(status).filter(|column| column.can_advance_all) else {
        return Ok(0);
    };
    let Some(next) = column.next_status else {
        return Ok(0);
    };
    let ids = column.lead_ids();
    store.bulk_advance(&ids, next).map_err(|e| e.to_string())
}
