//! Per-item running counts for the logging grid.
//!
//! The store is a read-through cache over the backend's log collection. It is
//! rebuilt wholesale by [`TallyStore::load_for_date`] and mutated
//! optimistically by the increment/decrement operations, but only after the
//! backend confirms the corresponding request: a failed request leaves local
//! state exactly as it was.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};

use crate::client::api::Backend;
use crate::errors::ClientError;
use crate::models::{LogCreate, Reason};

/// Client-local derived state for the currently viewed date.
///
/// Invariant: while breakdowns are tracked (viewing "today"),
/// `counts[i] == sum(breakdowns[i].values())` for every item `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyState {
    pub counts: BTreeMap<i64, u32>,
    pub breakdowns: BTreeMap<i64, BTreeMap<Reason, u32>>,
}

impl TallyState {
    fn bump(&mut self, item_id: i64, reason: Reason, quantity: u32) {
        *self.counts.entry(item_id).or_default() += quantity;
        *self
            .breakdowns
            .entry(item_id)
            .or_default()
            .entry(reason)
            .or_default() += quantity;
    }

    /// Remove one unit from the given reason bucket, clamping at zero and
    /// dropping emptied buckets so the picker snapshot stays tight.
    fn drop_one(&mut self, item_id: i64, reason: Reason) {
        if let Some(count) = self.counts.get_mut(&item_id) {
            *count = count.saturating_sub(1);
        }
        if let Some(breakdown) = self.breakdowns.get_mut(&item_id) {
            if let Some(qty) = breakdown.get_mut(&reason) {
                *qty = qty.saturating_sub(1);
                if *qty == 0 {
                    breakdown.remove(&reason);
                }
            }
            if breakdown.is_empty() {
                self.breakdowns.remove(&item_id);
            }
        }
    }
}

pub struct TallyStore<B> {
    backend: B,
    state: Arc<Mutex<TallyState>>,
    // One async lock per item so same-item operations apply in initiation
    // order while different items proceed concurrently.
    locks: Arc<Mutex<HashMap<i64, Arc<tokio::sync::Mutex<()>>>>>,
}

impl<B> Clone for TallyStore<B>
where
    B: Clone,
{
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            state: Arc::clone(&self.state),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<B: Backend> TallyStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(TallyState::default())),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn snapshot(&self) -> TallyState {
        self.state.lock().unwrap().clone()
    }

    pub fn count(&self, item_id: i64) -> u32 {
        self.state
            .lock()
            .unwrap()
            .counts
            .get(&item_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn breakdown(&self, item_id: i64) -> BTreeMap<Reason, u32> {
        self.state
            .lock()
            .unwrap()
            .breakdowns
            .get(&item_id)
            .cloned()
            .unwrap_or_default()
    }

    fn item_lock(&self, item_id: i64) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        Arc::clone(locks.entry(item_id).or_default())
    }

    /// Rebuild the cache from backend truth for `date`. Breakdowns are only
    /// tracked for today; any other date gets counts alone and the grid
    /// shows no reason chips.
    pub async fn load_for_date(&self, date: NaiveDate) -> Result<(), ClientError> {
        let totals = self.backend.daily_totals(date).await?;
        let mut fresh = TallyState::default();
        for row in totals {
            fresh.counts.insert(row.item_id, row.total_quantity);
        }
        if date == Local::now().date_naive() {
            for log in self.backend.today_logs().await? {
                *fresh
                    .breakdowns
                    .entry(log.item_id)
                    .or_default()
                    .entry(log.reason)
                    .or_default() += log.quantity;
            }
        }
        *self.state.lock().unwrap() = fresh;
        Ok(())
    }

    /// Log `quantity` units of `item_id` under `reason`. Local counts move
    /// only once the create call has succeeded.
    pub async fn increment(
        &self,
        item_id: i64,
        reason: Reason,
        quantity: u32,
    ) -> Result<(), ClientError> {
        let lock = self.item_lock(item_id);
        let _serial = lock.lock().await;
        self.backend
            .create_log(&LogCreate {
                item_id,
                quantity,
                reason,
                notes: None,
            })
            .await?;
        self.state.lock().unwrap().bump(item_id, reason, quantity);
        Ok(())
    }

    /// Remove one unit of `item_id`, whichever reason it was logged under.
    /// Among multiple candidates the most recently created entry is deleted.
    /// No-ops (returning `None`) when the count is zero or no entry exists.
    pub async fn decrement_latest(&self, item_id: i64) -> Result<Option<Reason>, ClientError> {
        if self.count(item_id) == 0 {
            return Ok(None);
        }
        let lock = self.item_lock(item_id);
        let _serial = lock.lock().await;
        let logs = self.backend.today_logs().await?;
        let target = logs
            .iter()
            .filter(|l| l.item_id == item_id)
            .max_by_key(|l| l.id);
        let Some(log) = target else {
            return Ok(None);
        };
        let reason = log.reason;
        self.backend.delete_log(log.id).await?;
        self.state.lock().unwrap().drop_one(item_id, reason);
        Ok(Some(reason))
    }

    /// Remove one unit of `item_id` logged under `reason` specifically,
    /// deleting the most recently created matching entry. No-ops when no
    /// such entry exists.
    pub async fn decrement_by_reason(
        &self,
        item_id: i64,
        reason: Reason,
    ) -> Result<bool, ClientError> {
        if self.count(item_id) == 0 {
            return Ok(false);
        }
        let lock = self.item_lock(item_id);
        let _serial = lock.lock().await;
        let logs = self.backend.today_logs().await?;
        let target = logs
            .iter()
            .filter(|l| l.item_id == item_id && l.reason == reason)
            .max_by_key(|l| l.id);
        let Some(log) = target else {
            return Ok(false);
        };
        self.backend.delete_log(log.id).await?;
        self.state.lock().unwrap().drop_one(item_id, reason);
        Ok(true)
    }
}
