use crate::models::{AppData, Reason};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTotalRow {
    pub item_name: String,
    pub vendor_name: String,
    pub total_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorTotalRow {
    pub vendor_name: String,
    pub total_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonTotalRow {
    pub reason: Reason,
    pub total_quantity: u32,
}

/// Day-of-week total. `dow` is 0..=6, Sunday first. Only days with data are
/// emitted; renderers pad to seven fixed slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowTotalRow {
    pub dow: u8,
    pub total_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowItemRow {
    pub dow: u8,
    pub item_name: String,
    pub total_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub by_item: Vec<ItemTotalRow>,
    pub by_vendor: Vec<VendorTotalRow>,
    pub by_reason: Vec<ReasonTotalRow>,
    pub by_dow: Vec<DowTotalRow>,
    pub by_dow_item: Vec<DowItemRow>,
}

/// One item/date/reason cell of the weekly report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRow {
    pub item_id: i64,
    pub item_name: String,
    pub vendor_name: String,
    pub log_date: NaiveDate,
    pub reason: Reason,
    pub total_quantity: u32,
}

/// How many sub-item rows each weekday keeps in `by_dow_item`.
const DOW_TOP_ITEMS: usize = 3;

fn in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

/// Date-range summary grouped by item, vendor, reason, and day of week.
/// The first three groupings are sorted by total descending (name ascending
/// on ties) to match how the report bars are stacked.
pub fn build_summary(data: &AppData, start: NaiveDate, end: NaiveDate) -> SummaryReport {
    let mut item_totals: BTreeMap<i64, u32> = BTreeMap::new();
    let mut vendor_totals: BTreeMap<i64, u32> = BTreeMap::new();
    let mut reason_totals: BTreeMap<Reason, u32> = BTreeMap::new();
    let mut dow_totals: BTreeMap<u8, u32> = BTreeMap::new();
    let mut dow_item_totals: BTreeMap<(u8, i64), u32> = BTreeMap::new();

    for log in &data.logs {
        let date = log.logged_at.date();
        if !in_range(date, start, end) {
            continue;
        }
        let dow = date.weekday().num_days_from_sunday() as u8;
        *item_totals.entry(log.item_id).or_default() += log.quantity;
        *reason_totals.entry(log.reason).or_default() += log.quantity;
        *dow_totals.entry(dow).or_default() += log.quantity;
        *dow_item_totals.entry((dow, log.item_id)).or_default() += log.quantity;
        if let Some(item) = data.item(log.item_id) {
            *vendor_totals.entry(item.vendor_id).or_default() += log.quantity;
        }
    }

    let mut by_item: Vec<ItemTotalRow> = item_totals
        .iter()
        .map(|(&item_id, &total)| {
            let item = data.item(item_id);
            ItemTotalRow {
                item_name: item.map(|i| i.name.clone()).unwrap_or_default(),
                vendor_name: item
                    .and_then(|i| data.vendor(i.vendor_id))
                    .map(|v| v.name.clone())
                    .unwrap_or_default(),
                total_quantity: total,
            }
        })
        .collect();
    by_item.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then_with(|| a.item_name.cmp(&b.item_name))
    });

    let mut by_vendor: Vec<VendorTotalRow> = vendor_totals
        .iter()
        .map(|(&vendor_id, &total)| VendorTotalRow {
            vendor_name: data
                .vendor(vendor_id)
                .map(|v| v.name.clone())
                .unwrap_or_default(),
            total_quantity: total,
        })
        .collect();
    by_vendor.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then_with(|| a.vendor_name.cmp(&b.vendor_name))
    });

    let mut by_reason: Vec<ReasonTotalRow> = reason_totals
        .iter()
        .map(|(&reason, &total)| ReasonTotalRow {
            reason,
            total_quantity: total,
        })
        .collect();
    by_reason.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity).then_with(|| a.reason.cmp(&b.reason)));

    let by_dow: Vec<DowTotalRow> = dow_totals
        .iter()
        .map(|(&dow, &total)| DowTotalRow {
            dow,
            total_quantity: total,
        })
        .collect();

    let mut by_dow_item = Vec::new();
    for dow in 0..7u8 {
        let mut rows: Vec<DowItemRow> = dow_item_totals
            .iter()
            .filter(|((d, _), _)| *d == dow)
            .map(|(&(_, item_id), &total)| DowItemRow {
                dow,
                item_name: data
                    .item(item_id)
                    .map(|i| i.name.clone())
                    .unwrap_or_default(),
                total_quantity: total,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.total_quantity
                .cmp(&a.total_quantity)
                .then_with(|| a.item_name.cmp(&b.item_name))
        });
        rows.truncate(DOW_TOP_ITEMS);
        by_dow_item.extend(rows);
    }

    SummaryReport {
        by_item,
        by_vendor,
        by_reason,
        by_dow,
        by_dow_item,
    }
}

/// Per item/date/reason totals for the seven days starting at `week_start`,
/// in catalog order then date order.
pub fn build_weekly(data: &AppData, week_start: NaiveDate) -> Vec<WeeklyRow> {
    let week_end = week_start + Duration::days(6);
    let mut cells: BTreeMap<(i64, NaiveDate, Reason), u32> = BTreeMap::new();
    for log in &data.logs {
        let date = log.logged_at.date();
        if !in_range(date, week_start, week_end) {
            continue;
        }
        *cells.entry((log.item_id, date, log.reason)).or_default() += log.quantity;
    }

    let mut rows: Vec<WeeklyRow> = cells
        .iter()
        .map(|(&(item_id, log_date, reason), &total)| {
            let item = data.item(item_id);
            WeeklyRow {
                item_id,
                item_name: item.map(|i| i.name.clone()).unwrap_or_default(),
                vendor_name: item
                    .and_then(|i| data.vendor(i.vendor_id))
                    .map(|v| v.name.clone())
                    .unwrap_or_default(),
                log_date,
                reason,
                total_quantity: total,
            }
        })
        .collect();

    let order_of = |item_id: i64| data.item(item_id).map(|i| i.display_order).unwrap_or(i64::MAX);
    rows.sort_by(|a, b| {
        order_of(a.item_id)
            .cmp(&order_of(b.item_id))
            .then_with(|| a.item_name.cmp(&b.item_name))
            .then_with(|| a.log_date.cmp(&b.log_date))
    });
    rows
}

/// Raw log export for a date range, oldest first.
pub fn build_csv(data: &AppData, start: NaiveDate, end: NaiveDate) -> String {
    let mut logs: Vec<_> = data
        .logs
        .iter()
        .filter(|l| in_range(l.logged_at.date(), start, end))
        .collect();
    logs.sort_by(|a, b| a.logged_at.cmp(&b.logged_at).then_with(|| a.id.cmp(&b.id)));

    let mut out = String::from("Date/Time,Item,Vendor,Quantity,Reason,Notes\n");
    for log in logs {
        let item = data.item(log.item_id);
        let item_name = item.map(|i| i.name.as_str()).unwrap_or_default();
        let vendor_name = item
            .and_then(|i| data.vendor(i.vendor_id))
            .map(|v| v.name.as_str())
            .unwrap_or_default();
        let fields = [
            log.logged_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            item_name.to_string(),
            vendor_name.to_string(),
            log.quantity.to_string(),
            log.reason.as_str().to_string(),
            log.notes.clone().unwrap_or_default(),
        ];
        let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogCreate;
    use chrono::NaiveDate;

    fn seeded() -> AppData {
        let mut data = AppData::default();
        data.seed();
        data
    }

    fn log_at(data: &mut AppData, item_id: i64, quantity: u32, reason: Reason, date: NaiveDate) {
        data.create_log(
            &LogCreate {
                item_id,
                quantity,
                reason,
                notes: None,
            },
            date.and_hms_opt(10, 0, 0).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn summary_groups_and_sorts_descending() {
        let mut data = seeded();
        let day = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let a = data.items[0].id;
        let b = data.items[1].id;
        log_at(&mut data, a, 5, Reason::Spoiled, day);
        log_at(&mut data, b, 2, Reason::Damaged, day);
        log_at(&mut data, b, 1, Reason::Spoiled, day);

        let report = build_summary(&data, day, day);
        assert_eq!(report.by_item.len(), 2);
        assert_eq!(report.by_item[0].total_quantity, 5);
        assert_eq!(report.by_item[1].total_quantity, 3);
        assert_eq!(report.by_reason[0].reason, Reason::Spoiled);
        assert_eq!(report.by_reason[0].total_quantity, 6);
        assert_eq!(report.by_reason[1].total_quantity, 2);
    }

    #[test]
    fn summary_ignores_logs_outside_range() {
        let mut data = seeded();
        let inside = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let outside = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let id = data.items[0].id;
        log_at(&mut data, id, 1, Reason::Spoiled, inside);
        log_at(&mut data, id, 9, Reason::Spoiled, outside);

        let report = build_summary(&data, inside, inside);
        assert_eq!(report.by_item.len(), 1);
        assert_eq!(report.by_item[0].total_quantity, 1);
    }

    #[test]
    fn dow_rows_only_for_days_with_data() {
        let mut data = seeded();
        // 2026-08-23 is a Sunday, 2026-08-25 a Tuesday.
        let sunday = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let id = data.items[0].id;
        log_at(&mut data, id, 2, Reason::Spoiled, sunday);
        log_at(&mut data, id, 3, Reason::Spoiled, tuesday);

        let report = build_summary(&data, sunday, sunday + Duration::days(6));
        let dows: Vec<u8> = report.by_dow.iter().map(|r| r.dow).collect();
        assert_eq!(dows, vec![0, 2]);
    }

    #[test]
    fn dow_item_keeps_top_three() {
        let mut data = seeded();
        let sunday = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        for (idx, quantity) in [(0, 4u32), (1, 3), (2, 2), (3, 1)] {
            let id = data.items[idx].id;
            log_at(&mut data, id, quantity, Reason::Spoiled, sunday);
        }
        let report = build_summary(&data, sunday, sunday);
        let sunday_rows: Vec<_> = report.by_dow_item.iter().filter(|r| r.dow == 0).collect();
        assert_eq!(sunday_rows.len(), 3);
        assert_eq!(sunday_rows[0].total_quantity, 4);
    }

    #[test]
    fn weekly_window_is_seven_days() {
        let mut data = seeded();
        let monday = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let id = data.items[0].id;
        log_at(&mut data, id, 1, Reason::Spoiled, monday);
        log_at(&mut data, id, 1, Reason::Spoiled, monday + Duration::days(6));
        log_at(&mut data, id, 1, Reason::Spoiled, monday + Duration::days(7));

        let rows = build_weekly(&data, monday);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.log_date <= monday + Duration::days(6)));
    }

    #[test]
    fn csv_quotes_awkward_fields() {
        let mut data = seeded();
        let day = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let id = data.items[0].id;
        data.create_log(
            &LogCreate {
                item_id: id,
                quantity: 1,
                reason: Reason::StaffComp,
                notes: Some("half tray, end of \"rush\"".to_string()),
            },
            day.and_hms_opt(15, 30, 0).unwrap(),
        )
        .unwrap();

        let csv = build_csv(&data, day, day);
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "Date/Time,Item,Vendor,Quantity,Reason,Notes");
        let row = lines.next().unwrap();
        assert!(row.contains("staff_comp"));
        assert!(row.contains("\"half tray, end of \"\"rush\"\"\""));
    }

    #[test]
    fn empty_range_yields_empty_report() {
        let data = seeded();
        let day = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let report = build_summary(&data, day, day);
        assert!(report.by_item.is_empty());
        assert!(report.by_dow.is_empty());
        assert_eq!(build_csv(&data, day, day).lines().count(), 1);
    }
}
