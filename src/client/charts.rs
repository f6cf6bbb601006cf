//! Pure helpers turning report rows into renderable bars and KPI figures.

use chrono::NaiveDate;

use crate::reports::{DowTotalRow, ItemTotalRow, SummaryReport};

/// Narrowest bar drawn for a row that exists at all; keeps small quantities
/// visible instead of collapsing to a hairline.
pub const MIN_BAR_PERCENT: u32 = 4;

pub const DOW_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn floored_percent(total: u32, denom: u32) -> u32 {
    let raw = (f64::from(total) / f64::from(denom) * 100.0).round() as u32;
    raw.max(MIN_BAR_PERCENT)
}

/// Percent-of-max widths for rows pre-sorted descending (the first row is
/// the max). An empty input yields an empty output — the caller renders a
/// "no data" placeholder, never a zero-width chart.
pub fn scale_to_max(totals: &[u32]) -> Vec<u32> {
    let Some(&first) = totals.first() else {
        return Vec::new();
    };
    if first == 0 {
        return vec![0; totals.len()];
    }
    totals.iter().map(|&t| floored_percent(t, first)).collect()
}

/// Percent-of-whole widths, for groupings whose totals sum to a meaningful
/// whole (the reason breakdown). Same floor as [`scale_to_max`].
pub fn scale_to_share(totals: &[u32]) -> Vec<u32> {
    let sum: u32 = totals.iter().sum();
    if totals.is_empty() {
        return Vec::new();
    }
    if sum == 0 {
        return vec![0; totals.len()];
    }
    totals.iter().map(|&t| floored_percent(t, sum)).collect()
}

/// Spread `by_dow` rows across seven fixed slots, Sunday first. Days with no
/// data render as zero rather than being omitted.
pub fn dow_slots(rows: &[DowTotalRow]) -> [u32; 7] {
    let mut slots = [0u32; 7];
    for row in rows {
        if let Some(slot) = slots.get_mut(row.dow as usize) {
            *slot = row.total_quantity;
        }
    }
    slots
}

#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub total: u32,
    pub daily_average: f64,
    pub worst_item: Option<ItemTotalRow>,
    /// `(dow index, quantity)`; on ties the earliest weekday wins.
    pub worst_day: Option<(u8, u32)>,
}

pub fn kpis(report: &SummaryReport, start: NaiveDate, end: NaiveDate) -> Kpis {
    let total: u32 = report.by_item.iter().map(|r| r.total_quantity).sum();
    let days = (end - start).num_days() + 1;
    let days = days.max(1) as f64;

    let mut worst_day: Option<(u8, u32)> = None;
    for (dow, &qty) in dow_slots(&report.by_dow).iter().enumerate() {
        if qty == 0 {
            continue;
        }
        let beats = worst_day.map(|(_, best)| qty > best).unwrap_or(true);
        if beats {
            worst_day = Some((dow as u8, qty));
        }
    }

    Kpis {
        total,
        daily_average: f64::from(total) / days,
        worst_item: report.by_item.first().cloned(),
        worst_day,
    }
}
