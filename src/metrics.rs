//! Metrics / Aggregation
//!
//! Counts and chart series over lead sets. Range metrics take the already
//! filtered set; activity series take the unrestricted collection and
//! bucket it by cohort date.

use serde::Serialize;

use crate::calendar::{week_days, weeks_of_month, DateRange};
use crate::domain::pipeline::appears_on;
use crate::domain::{CalendarDate, Lead, LeadStatus};

/// Headline numbers for a lead set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeadMetrics {
    pub total: usize,
    pub interested: usize,
    pub not_interested: usize,
    pub in_progress: usize,
    /// Percent interested, one decimal; 0 for an empty set
    pub conversion_rate: f64,
}

impl LeadMetrics {
    pub fn compute<'a>(leads: impl IntoIterator<Item = &'a Lead>) -> Self {
        let mut total = 0;
        let mut interested = 0;
        let mut not_interested = 0;
        for lead in leads {
            total += 1;
            match lead.status {
                LeadStatus::Interested => interested += 1,
                LeadStatus::NotInterested => not_interested += 1,
                _ => {}
            }
        }
        Self {
            total,
            interested,
            not_interested,
            in_progress: total - interested - not_interested,
            conversion_rate: conversion_rate(interested, total),
        }
    }
}

/// `interested / total * 100` rounded to one decimal, 0 when `total` is 0
pub fn conversion_rate(interested: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = interested as f64 / total as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownBucket {
    NoContact,
    InProgress,
    Interested,
    Lost,
}

impl BreakdownBucket {
    pub fn label(&self) -> &'static str {
        match self {
            BreakdownBucket::NoContact => "No contact",
            BreakdownBucket::InProgress => "In progress",
            BreakdownBucket::Interested => "Interested",
            BreakdownBucket::Lost => "Lost",
        }
    }

    pub fn of(status: LeadStatus) -> Self {
        match status {
            LeadStatus::Todo => BreakdownBucket::NoContact,
            LeadStatus::C1 | LeadStatus::C2 | LeadStatus::C3 | LeadStatus::C4 => {
                BreakdownBucket::InProgress
            }
            LeadStatus::Interested => BreakdownBucket::Interested,
            LeadStatus::NotInterested => BreakdownBucket::Lost,
        }
    }
}

/// One pie slice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSlice {
    pub bucket: BreakdownBucket,
    pub label: &'static str,
    pub value: usize,
}

/// Proportional status breakdown in fixed slice order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub no_contact: usize,
    pub in_progress: usize,
    pub interested: usize,
    pub lost: usize,
}

impl StatusBreakdown {
    pub fn compute<'a>(leads: impl IntoIterator<Item = &'a Lead>) -> Self {
        let mut breakdown = Self::default();
        for lead in leads {
            match BreakdownBucket::of(lead.status) {
                BreakdownBucket::NoContact => breakdown.no_contact += 1,
                BreakdownBucket::InProgress => breakdown.in_progress += 1,
                BreakdownBucket::Interested => breakdown.interested += 1,
                BreakdownBucket::Lost => breakdown.lost += 1,
            }
        }
        breakdown
    }

    pub fn slices(&self) -> Vec<BreakdownSlice> {
        [
            (BreakdownBucket::NoContact, self.no_contact),
            (BreakdownBucket::InProgress, self.in_progress),
            (BreakdownBucket::Interested, self.interested),
            (BreakdownBucket::Lost, self.lost),
        ]
        .into_iter()
        .map(|(bucket, value)| BreakdownSlice {
            bucket,
            label: bucket.label(),
            value,
        })
        .collect()
    }
}

/// One bar of an activity chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPoint {
    pub label: String,
    pub range: DateRange,
    pub total: usize,
    pub interested: usize,
}

fn activity_point<'a>(label: String, range: DateRange, leads: impl IntoIterator<Item = &'a Lead>) -> ActivityPoint {
    let mut total = 0;
    let mut interested = 0;
    for lead in leads.into_iter().filter(|lead| range.contains(lead.date)) {
        total += 1;
        if lead.status == LeadStatus::Interested {
            interested += 1;
        }
    }
    ActivityPoint {
        label,
        range,
        total,
        interested,
    }
}

/// Leads created on each day of the week starting at `week_start`, from the
/// unrestricted collection (no carry-forward)
pub fn daily_activity(leads: &[Lead], week_start: CalendarDate) -> Vec<ActivityPoint> {
    week_days(week_start)
        .into_iter()
        .map(|day| activity_point(day.weekday_short().to_string(), DateRange::new(day, day), leads))
        .collect()
}

/// Leads created in each Sunday-anchored week of the month of `anchor`,
/// weeks clipped to the month
pub fn weekly_activity(leads: &[Lead], anchor: CalendarDate) -> Vec<ActivityPoint> {
    weeks_of_month(anchor)
        .into_iter()
        .enumerate()
        .map(|(i, week)| activity_point(format!("Week {}", i + 1), week, leads))
        .collect()
}

/// Numbers on one day card of the weekly overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: CalendarDate,
    /// Leads whose cohort date is this day
    pub created: usize,
    /// Board counts (with carry-forward)
    pub interested: usize,
    pub not_interested: usize,
    pub in_progress: usize,
}

pub fn day_summary(leads: &[Lead], day: CalendarDate) -> DaySummary {
    let board = LeadMetrics::compute(leads.iter().filter(|lead| appears_on(lead, day)));
    DaySummary {
        date: day,
        created: leads.iter().filter(|lead| lead.date == day).count(),
        interested: board.interested,
        not_interested: board.not_interested,
        in_progress: board.in_progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    fn lead(id: &str, status: LeadStatus, date: &str) -> Lead {
        let mut lead = Lead::new(id.to_string(), d(date));
        lead.status = status;
        lead
    }

    #[test]
    fn test_empty_set_has_zero_rate() {
        let none: Vec<Lead> = Vec::new();
        let metrics = LeadMetrics::compute(&none);
        assert_eq!(metrics.total, 0);
        assert_eq!(metrics.conversion_rate, 0.0);
        assert!(!metrics.conversion_rate.is_nan());
    }

    #[test]
    fn test_metrics_counts() {
        let leads = vec![
            lead("1", LeadStatus::Interested, "2023-12-04"),
            lead("2", LeadStatus::NotInterested, "2023-12-04"),
            lead("3", LeadStatus::C2, "2023-12-05"),
        ];
        let metrics = LeadMetrics::compute(&leads);
        assert_eq!(metrics.total, 3);
        assert_eq!(metrics.interested, 1);
        assert_eq!(metrics.not_interested, 1);
        assert_eq!(metrics.in_progress, 1);
        assert_eq!(metrics.conversion_rate, 33.3);
    }

    #[test]
    fn test_conversion_rate_rounding() {
        assert_eq!(conversion_rate(2, 3), 66.7);
        assert_eq!(conversion_rate(1, 8), 12.5);
        assert_eq!(conversion_rate(5, 5), 100.0);
    }

    #[test]
    fn test_breakdown_buckets() {
        let leads = vec![
            lead("1", LeadStatus::Todo, "2023-12-04"),
            lead("2", LeadStatus::C1, "2023-12-04"),
            lead("3", LeadStatus::C4, "2023-12-04"),
            lead("4", LeadStatus::Interested, "2023-12-04"),
            lead("5", LeadStatus::NotInterested, "2023-12-04"),
        ];
        let breakdown = StatusBreakdown::compute(&leads);
        assert_eq!(
            breakdown,
            StatusBreakdown { no_contact: 1, in_progress: 2, interested: 1, lost: 1 }
        );
        let slices = breakdown.slices();
        assert_eq!(slices.len(), 4);
        assert_eq!(slices[3].label, "Lost");
    }

    #[test]
    fn test_daily_activity_counts_creation_day_only() {
        let leads = vec![
            lead("1", LeadStatus::C1, "2023-12-04"),
            lead("2", LeadStatus::Interested, "2023-12-04"),
            lead("3", LeadStatus::Todo, "2023-12-06"),
            lead("4", LeadStatus::Todo, "2023-12-11"),
        ];
        let points = daily_activity(&leads, d("2023-12-03"));
        assert_eq!(points.len(), 7);
        assert_eq!(points[0].label, "Sun");
        assert_eq!((points[1].total, points[1].interested), (2, 1));
        // The c1 lead carries forward on the board but is not counted again
        assert_eq!(points[2].total, 0);
        assert_eq!(points[3].total, 1);
        assert_eq!(points.iter().map(|p| p.total).sum::<usize>(), 3);
    }

    #[test]
    fn test_weekly_activity_buckets_the_month() {
        let leads = vec![
            lead("1", LeadStatus::Interested, "2023-12-01"),
            lead("2", LeadStatus::Todo, "2023-12-02"),
            lead("3", LeadStatus::Todo, "2023-12-12"),
            lead("4", LeadStatus::Todo, "2023-12-31"),
            lead("5", LeadStatus::Todo, "2023-11-30"),
        ];
        let points = weekly_activity(&leads, d("2023-12-20"));
        let totals: Vec<usize> = points.iter().map(|p| p.total).collect();
        assert_eq!(totals, vec![2, 0, 1, 0, 0, 1]);
        assert_eq!(points[0].interested, 1);
        assert_eq!(points[0].label, "Week 1");
    }

    #[test]
    fn test_day_summary_uses_board_and_creation() {
        let leads = vec![
            lead("1", LeadStatus::C1, "2023-12-04"),
            lead("2", LeadStatus::Interested, "2023-12-04"),
            lead("3", LeadStatus::NotInterested, "2023-12-05"),
        ];
        let summary = day_summary(&leads, d("2023-12-05"));
        assert_eq!(summary.created, 1);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.interested, 0);
        assert_eq!(summary.not_interested, 1);
    }
}
