//! Dashboard Commands
//!
//! Read-only view models for the dashboard and the CRM pages.

use crate::views::{DashboardView, DayBoard, Period, ViewMode, WeekOverview};
use crate::AppState;

use super::{parse_date, parse_field};

/// Dashboard for the week or month (`mode`) containing `anchor`
pub async fn get_dashboard(state: &AppState, mode: String, anchor: Option<String>) -> Result<DashboardView, String> {
    let mode: ViewMode = parse_field(&mode)?;
    let anchor = match anchor {
        Some(raw) => parse_date(&raw)?,
        None => state.today(),
    };
    let store = state.leads.lock().await;
    Ok(DashboardView::build(store.list(), Period::new(mode, anchor)))
}

/// Weekly CRM overview; defaults to the current week
pub async fn get_week_overview(state: &AppState, anchor: Option<String>) -> Result<WeekOverview, String> {
    let anchor = match anchor {
        Some(raw) => parse_date(&raw)?,
        None => state.today(),
    };
    let store = state.leads.lock().await;
    Ok(WeekOverview::build(store.list(), anchor, state.today()))
}

/// Pipeline board of one day
pub async fn get_day_board(state: &AppState, date: String) -> Result<DayBoard, String> {
    let date = parse_date(&date)?;
    let store = state.leads.lock().await;
    Ok(DayBoard::build(store.list(), date))
}
