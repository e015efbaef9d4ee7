//! View Models
//!
//! Derived, render-ready data for the dashboard, the weekly CRM overview,
//! the daily pipeline board and the monthly task calendar. Everything here
//! is a pure function of the store contents and the selected dates.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::{bucket_for, month_grid, month_range, shift_month, shift_week, week_days, week_range, DateRange};
use crate::domain::pipeline::appears_on;
use crate::domain::{CalendarDate, DomainError, Lead, LeadStatus, Task, ALL_STATUSES};
use crate::metrics::{
    daily_activity, day_summary, weekly_activity, ActivityPoint, BreakdownSlice, DaySummary,
    LeadMetrics, StatusBreakdown,
};
use crate::repository::NotesStore;

/// Dashboard granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Week,
    Month,
}

impl FromStr for ViewMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            _ => Err(DomainError::UnknownVariant {
                kind: "view mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Selected week or month, identified by any day inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub mode: ViewMode,
    pub anchor: CalendarDate,
}

impl Period {
    pub fn new(mode: ViewMode, anchor: CalendarDate) -> Self {
        Self { mode, anchor }
    }

    pub fn range(&self) -> DateRange {
        match self.mode {
            ViewMode::Week => week_range(self.anchor),
            ViewMode::Month => month_range(self.anchor),
        }
    }

    pub fn previous(&self) -> Self {
        self.shifted(-1)
    }

    pub fn next(&self) -> Self {
        self.shifted(1)
    }

    fn shifted(&self, step: i32) -> Self {
        let anchor = match self.mode {
            ViewMode::Week => shift_week(self.anchor, i64::from(step)),
            ViewMode::Month => shift_month(self.anchor, step),
        };
        Self { anchor, ..*self }
    }
}

/// Dashboard for one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub period: Period,
    pub range: DateRange,
    pub metrics: LeadMetrics,
    pub breakdown: Vec<BreakdownSlice>,
    /// Daily bars in week mode, weekly bars in month mode
    pub activity: Vec<ActivityPoint>,
}

impl DashboardView {
    pub fn build(leads: &[Lead], period: Period) -> Self {
        let range = period.range();
        let in_range: Vec<&Lead> = leads.iter().filter(|lead| range.contains(lead.date)).collect();
        let activity = match period.mode {
            ViewMode::Week => daily_activity(leads, range.start),
            ViewMode::Month => weekly_activity(leads, period.anchor),
        };
        Self {
            period,
            range,
            metrics: LeadMetrics::compute(in_range.iter().copied()),
            breakdown: StatusBreakdown::compute(in_range.iter().copied()).slices(),
            activity,
        }
    }
}

/// One card of the weekly CRM overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCard {
    pub weekday: &'static str,
    pub is_today: bool,
    pub summary: DaySummary,
}

/// Weekly CRM overview: seven day cards and running totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekOverview {
    pub week: DateRange,
    pub days: Vec<DayCard>,
    /// Across every lead, regardless of week
    pub total_interested: usize,
    pub total_not_interested: usize,
}

impl WeekOverview {
    pub fn build(leads: &[Lead], anchor: CalendarDate, today: CalendarDate) -> Self {
        let week = week_range(anchor);
        let days = week_days(week.start)
            .into_iter()
            .map(|day| DayCard {
                weekday: day.weekday_short(),
                is_today: day == today,
                summary: day_summary(leads, day),
            })
            .collect();
        let totals = LeadMetrics::compute(leads);
        Self {
            week,
            days,
            total_interested: totals.interested,
            total_not_interested: totals.not_interested,
        }
    }
}

/// One column of the daily board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardColumn {
    pub status: LeadStatus,
    pub title: &'static str,
    pub leads: Vec<Lead>,
    /// Target of "advance" for this column, if any
    pub next_status: Option<LeadStatus>,
    /// Whether "advance all" is offered
    pub can_advance_all: bool,
}

impl BoardColumn {
    pub fn lead_ids(&self) -> Vec<String> {
        self.leads.iter().map(|lead| lead.id.clone()).collect()
    }
}

/// Pipeline board of one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBoard {
    pub date: CalendarDate,
    pub week_start: CalendarDate,
    pub columns: Vec<BoardColumn>,
    /// Leads whose cohort date is this day
    pub created_today: usize,
}

impl DayBoard {
    pub fn build(leads: &[Lead], date: CalendarDate) -> Self {
        let on_board: Vec<&Lead> = leads.iter().filter(|lead| appears_on(lead, date)).collect();
        let columns = ALL_STATUSES
            .into_iter()
            .map(|status| {
                let column_leads: Vec<Lead> = on_board
                    .iter()
                    .filter(|lead| lead.status == status)
                    .map(|lead| (*lead).clone())
                    .collect();
                let next_status = status.next();
                BoardColumn {
                    status,
                    title: status.column_title(),
                    can_advance_all: next_status.is_some() && !column_leads.is_empty(),
                    leads: column_leads,
                    next_status,
                }
            })
            .collect();
        Self {
            date,
            week_start: bucket_for(date),
            columns,
            created_today: leads.iter().filter(|lead| lead.date == date).count(),
        }
    }

    pub fn column(&self, status: LeadStatus) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.status == status)
    }
}

/// Compact task line inside a calendar cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPreview {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// Tasks shown per cell before the "+N" overflow
pub const CELL_PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: CalendarDate,
    pub task_count: usize,
    pub previews: Vec<TaskPreview>,
    pub has_note: bool,
    pub is_today: bool,
}

/// Monthly team calendar; `None` cells pad the first week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCalendar {
    pub month: DateRange,
    pub cells: Vec<Option<CalendarCell>>,
}

impl MonthCalendar {
    pub fn build(tasks: &[Task], notes: &NotesStore, anchor: CalendarDate, today: CalendarDate) -> Self {
        let cells = month_grid(anchor)
            .into_iter()
            .map(|slot| {
                slot.map(|date| {
                    let day_tasks: Vec<&Task> = tasks.iter().filter(|task| task.date == date).collect();
                    CalendarCell {
                        date,
                        task_count: day_tasks.len(),
                        previews: day_tasks
                            .iter()
                            .take(CELL_PREVIEW_LIMIT)
                            .map(|task| TaskPreview {
                                id: task.id.clone(),
                                title: task.title.clone(),
                                completed: task.completed,
                            })
                            .collect(),
                        has_note: notes.has_note(date),
                        is_today: date == today,
                    }
                })
            })
            .collect();
        Self {
            month: month_range(anchor),
            cells,
        }
    }
}
