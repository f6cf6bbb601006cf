use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// Why a unit left inventory without a sale. The set is closed: an unknown
/// reason string fails deserialization instead of falling back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Spoiled,
    PrepError,
    Damaged,
    StaffComp,
    CustomerComp,
    TooGoodToGo,
    DisplayPull,
}

/// Display metadata for a reason. Presentational only.
#[derive(Debug, Clone, Copy)]
pub struct ReasonMeta {
    pub label: &'static str,
    pub glyph: &'static str,
    pub color: &'static str,
    pub bg: &'static str,
}

impl Reason {
    pub const ALL: [Reason; 7] = [
        Reason::Spoiled,
        Reason::PrepError,
        Reason::Damaged,
        Reason::StaffComp,
        Reason::CustomerComp,
        Reason::TooGoodToGo,
        Reason::DisplayPull,
    ];

    /// Reason applied when a tile is tapped without opening the picker.
    pub const DEFAULT: Reason = Reason::Spoiled;

    pub fn meta(self) -> &'static ReasonMeta {
        match self {
            Reason::Spoiled => &ReasonMeta {
                label: "Spoiled/Expired",
                glyph: "🤢",
                color: "#cc3333",
                bg: "#fde8e8",
            },
            Reason::PrepError => &ReasonMeta {
                label: "Prep Error",
                glyph: "🔄",
                color: "#d4722e",
                bg: "#fef0e4",
            },
            Reason::Damaged => &ReasonMeta {
                label: "Damaged/Dropped",
                glyph: "💥",
                color: "#b85c00",
                bg: "#fff0dd",
            },
            Reason::StaffComp => &ReasonMeta {
                label: "Staff Comp",
                glyph: "👨‍🍳",
                color: "#2d8659",
                bg: "#e6f5ed",
            },
            Reason::CustomerComp => &ReasonMeta {
                label: "Customer Comp",
                glyph: "🎁",
                color: "#7044c9",
                bg: "#f0ebfa",
            },
            Reason::TooGoodToGo => &ReasonMeta {
                label: "2Good2Go",
                glyph: "📦",
                color: "#1a7f9e",
                bg: "#e4f4f8",
            },
            Reason::DisplayPull => &ReasonMeta {
                label: "Display Pull",
                glyph: "🗄️",
                color: "#777777",
                bg: "#f0f0f0",
            },
        }
    }

    pub fn label(self) -> &'static str {
        self.meta().label
    }

    /// The wire token, e.g. `prep_error`. Matches the serde rename.
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Spoiled => "spoiled",
            Reason::PrepError => "prep_error",
            Reason::Damaged => "damaged",
            Reason::StaffComp => "staff_comp",
            Reason::CustomerComp => "customer_comp",
            Reason::TooGoodToGo => "too_good_to_go",
            Reason::DisplayPull => "display_pull",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub vendor_id: i64,
    pub name: String,
    pub display_order: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteLog {
    pub id: i64,
    pub item_id: i64,
    pub quantity: u32,
    pub reason: Reason,
    pub notes: Option<String>,
    pub logged_at: NaiveDateTime,
}

/// Item joined with its vendor name, as the grid renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub id: i64,
    pub vendor_id: i64,
    pub name: String,
    pub display_order: i64,
    pub is_active: bool,
    pub vendor_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemCreate {
    pub vendor_id: i64,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub vendor_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct VendorCreate {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogCreate {
    pub item_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default = "default_reason")]
    pub reason: Reason,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

fn default_reason() -> Reason {
    Reason::DEFAULT
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LogUpdate {
    pub quantity: Option<u32>,
    pub reason: Option<Reason>,
    pub notes: Option<String>,
}

/// Log entry joined with item and vendor names, as the Today list shows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogView {
    pub id: i64,
    pub item_id: i64,
    pub quantity: u32,
    pub reason: Reason,
    pub notes: Option<String>,
    pub logged_at: NaiveDateTime,
    pub item_name: String,
    pub vendor_name: String,
}

/// Per-item total for one date. Active items with no logs appear with zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTotalRow {
    pub item_id: i64,
    pub item_name: String,
    pub vendor_name: String,
    pub total_quantity: u32,
}

/// Whole persisted state of the service: the catalog plus every log entry,
/// written back as one JSON document after each mutation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub vendors: Vec<Vendor>,
    pub items: Vec<Item>,
    pub logs: Vec<WasteLog>,
}

impl AppData {
    fn next_vendor_id(&self) -> i64 {
        self.vendors.iter().map(|v| v.id).max().unwrap_or(0) + 1
    }

    fn next_item_id(&self) -> i64 {
        self.items.iter().map(|i| i.id).max().unwrap_or(0) + 1
    }

    fn next_log_id(&self) -> i64 {
        self.logs.iter().map(|l| l.id).max().unwrap_or(0) + 1
    }

    fn next_display_order(&self) -> i64 {
        self.items.iter().map(|i| i.display_order).max().unwrap_or(0) + 1
    }

    pub fn vendor(&self, id: i64) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.id == id)
    }

    pub fn item(&self, id: i64) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    fn vendor_name(&self, id: i64) -> String {
        self.vendor(id).map(|v| v.name.clone()).unwrap_or_default()
    }

    fn item_view(&self, item: &Item) -> ItemView {
        ItemView {
            id: item.id,
            vendor_id: item.vendor_id,
            name: item.name.clone(),
            display_order: item.display_order,
            is_active: item.is_active,
            vendor_name: self.vendor_name(item.vendor_id),
        }
    }

    /// Items joined with their vendor, in catalog order (display_order, then
    /// name). Clients render this order as-is and never re-sort.
    pub fn items_view(&self, active_only: bool) -> Vec<ItemView> {
        let mut views: Vec<ItemView> = self
            .items
            .iter()
            .filter(|i| !active_only || i.is_active)
            .map(|i| self.item_view(i))
            .collect();
        views.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        views
    }

    pub fn vendors_sorted(&self) -> Vec<Vendor> {
        let mut vendors = self.vendors.clone();
        vendors.sort_by(|a, b| a.name.cmp(&b.name));
        vendors
    }

    pub fn create_vendor(&mut self, name: &str) -> Result<Vendor, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.vendors.iter().any(|v| v.name == name) {
            return Err(StoreError::DuplicateVendor(name.to_string()));
        }
        let vendor = Vendor {
            id: self.next_vendor_id(),
            name: name.to_string(),
        };
        self.vendors.push(vendor.clone());
        Ok(vendor)
    }

    pub fn create_item(&mut self, req: &ItemCreate) -> Result<ItemView, StoreError> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.vendor(req.vendor_id).is_none() {
            return Err(StoreError::UnknownVendor(req.vendor_id));
        }
        let item = Item {
            id: self.next_item_id(),
            vendor_id: req.vendor_id,
            name: name.to_string(),
            display_order: self.next_display_order(),
            is_active: true,
        };
        self.items.push(item.clone());
        Ok(self.item_view(&item))
    }

    pub fn update_item(&mut self, id: i64, update: &ItemUpdate) -> Result<ItemView, StoreError> {
        if update.name.is_none() && update.is_active.is_none() && update.vendor_id.is_none() {
            return Err(StoreError::EmptyUpdate);
        }
        if let Some(vendor_id) = update.vendor_id {
            if self.vendor(vendor_id).is_none() {
                return Err(StoreError::UnknownVendor(vendor_id));
            }
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::UnknownItem(id))?;
        if let Some(name) = &update.name {
            item.name = name.trim().to_string();
        }
        if let Some(active) = update.is_active {
            item.is_active = active;
        }
        if let Some(vendor_id) = update.vendor_id {
            item.vendor_id = vendor_id;
        }
        let item = item.clone();
        Ok(self.item_view(&item))
    }

    pub fn create_log(
        &mut self,
        req: &LogCreate,
        now: NaiveDateTime,
    ) -> Result<WasteLog, StoreError> {
        if req.quantity < 1 {
            return Err(StoreError::InvalidQuantity);
        }
        if self.item(req.item_id).is_none() {
            return Err(StoreError::UnknownItem(req.item_id));
        }
        let log = WasteLog {
            id: self.next_log_id(),
            item_id: req.item_id,
            quantity: req.quantity,
            reason: req.reason,
            notes: req.notes.clone(),
            logged_at: now,
        };
        self.logs.push(log.clone());
        Ok(log)
    }

    pub fn delete_log(&mut self, id: i64) -> Result<(), StoreError> {
        let before = self.logs.len();
        self.logs.retain(|l| l.id != id);
        if self.logs.len() == before {
            return Err(StoreError::UnknownLog(id));
        }
        Ok(())
    }

    pub fn update_log(&mut self, id: i64, update: &LogUpdate) -> Result<WasteLog, StoreError> {
        if update.quantity.is_none() && update.reason.is_none() && update.notes.is_none() {
            return Err(StoreError::EmptyUpdate);
        }
        if matches!(update.quantity, Some(0)) {
            return Err(StoreError::InvalidQuantity);
        }
        let log = self
            .logs
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::UnknownLog(id))?;
        if let Some(quantity) = update.quantity {
            log.quantity = quantity;
        }
        if let Some(reason) = update.reason {
            log.reason = reason;
        }
        if let Some(notes) = &update.notes {
            log.notes = Some(notes.clone());
        }
        Ok(log.clone())
    }

    pub fn logs_on(&self, date: NaiveDate) -> impl Iterator<Item = &WasteLog> {
        self.logs.iter().filter(move |l| l.logged_at.date() == date)
    }

    /// Logs for `date` joined with names, newest first.
    pub fn logs_view(&self, date: NaiveDate) -> Vec<LogView> {
        let mut views: Vec<LogView> = self
            .logs_on(date)
            .map(|log| {
                let item = self.item(log.item_id);
                LogView {
                    id: log.id,
                    item_id: log.item_id,
                    quantity: log.quantity,
                    reason: log.reason,
                    notes: log.notes.clone(),
                    logged_at: log.logged_at,
                    item_name: item.map(|i| i.name.clone()).unwrap_or_default(),
                    vendor_name: item
                        .map(|i| self.vendor_name(i.vendor_id))
                        .unwrap_or_default(),
                }
            })
            .collect();
        views.sort_by(|a, b| b.logged_at.cmp(&a.logged_at).then_with(|| b.id.cmp(&a.id)));
        views
    }

    /// One row per active item for `date`, zeros included, catalog order.
    pub fn daily_totals(&self, date: NaiveDate) -> Vec<DailyTotalRow> {
        self.items_view(true)
            .into_iter()
            .map(|item| {
                let total = self
                    .logs_on(date)
                    .filter(|l| l.item_id == item.id)
                    .map(|l| l.quantity)
                    .sum();
                DailyTotalRow {
                    item_id: item.id,
                    item_name: item.name,
                    vendor_name: item.vendor_name,
                    total_quantity: total,
                }
            })
            .collect()
    }

    /// Populate an empty store with a starter catalog. A store that already
    /// has vendors is left untouched.
    pub fn seed(&mut self) {
        if !self.vendors.is_empty() {
            return;
        }
        let catalog: [(&str, &[&str]); 4] = [
            (
                "Morning Bakery",
                &[
                    "Butter Croissant",
                    "Almond Croissant",
                    "Chocolate Croissant",
                    "Banana Bread",
                ],
            ),
            ("Bagel Co", &["Plain Bagel", "Everything Bagel", "Sesame Bagel"]),
            (
                "Deli Kitchen",
                &["Turkey Pesto Sandwich", "Caprese Sandwich", "Breakfast Burrito"],
            ),
            ("Sweet Treats", &["Chocolate Chunk Cookie", "Blueberry Muffin"]),
        ];
        for (vendor_name, items) in catalog {
            let vendor_id = self.next_vendor_id();
            self.vendors.push(Vendor {
                id: vendor_id,
                name: vendor_name.to_string(),
            });
            for name in items {
                let item = Item {
                    id: self.next_item_id(),
                    vendor_id,
                    name: (*name).to_string(),
                    display_order: self.next_display_order(),
                    is_active: true,
                };
                self.items.push(item);
            }
        }
    }
}
