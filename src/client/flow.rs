//! Short-lived picker state binding a pending item to a reason choice.
//!
//! One flow instance serves the whole grid: opening a picker while another
//! is pending replaces it rather than stacking.

use std::collections::BTreeMap;

use crate::models::Reason;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    /// Hold on `+`: picker offers the full reason set.
    AwaitingIncrementReason { item_id: i64 },
    /// Hold on `-`: picker offers the reasons the item currently has units
    /// under, snapshotted at open time (not live-updated).
    AwaitingDecrementReason {
        item_id: i64,
        choices: Vec<(Reason, u32)>,
    },
}

/// The tally operation a reason selection maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAction {
    Increment { item_id: i64, reason: Reason },
    DecrementByReason { item_id: i64, reason: Reason },
}

#[derive(Debug, Default)]
pub struct ReasonFlow {
    state: FlowState,
}

impl ReasonFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == FlowState::Idle
    }

    /// The increment picker always offers every reason.
    pub fn increment_choices() -> &'static [Reason] {
        &Reason::ALL
    }

    /// The decrement picker's snapshot, when one is open.
    pub fn decrement_choices(&self) -> Option<&[(Reason, u32)]> {
        match &self.state {
            FlowState::AwaitingDecrementReason { choices, .. } => Some(choices),
            _ => None,
        }
    }

    pub fn open_increment(&mut self, item_id: i64) {
        self.state = FlowState::AwaitingIncrementReason { item_id };
    }

    /// Returns false (staying idle or keeping the current picker closed)
    /// when the item has no nonzero reason buckets to offer.
    pub fn open_decrement(&mut self, item_id: i64, breakdown: &BTreeMap<Reason, u32>) -> bool {
        let choices: Vec<(Reason, u32)> = breakdown
            .iter()
            .filter(|&(_, &qty)| qty > 0)
            .map(|(&reason, &qty)| (reason, qty))
            .collect();
        if choices.is_empty() {
            return false;
        }
        self.state = FlowState::AwaitingDecrementReason { item_id, choices };
        true
    }

    /// A reason was chosen. Yields the operation to run and returns to idle.
    pub fn select(&mut self, reason: Reason) -> Option<FlowAction> {
        let action = match &self.state {
            FlowState::Idle => None,
            FlowState::AwaitingIncrementReason { item_id } => Some(FlowAction::Increment {
                item_id: *item_id,
                reason,
            }),
            FlowState::AwaitingDecrementReason { item_id, .. } => {
                Some(FlowAction::DecrementByReason {
                    item_id: *item_id,
                    reason,
                })
            }
        };
        self.state = FlowState::Idle;
        action
    }

    /// Explicit close or backdrop click: back to idle, no side effects.
    pub fn dismiss(&mut self) {
        self.state = FlowState::Idle;
    }
}
