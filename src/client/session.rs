//! The tile controller: pointer events in, tally operations out.
//!
//! Routes each control's pointer stream through its own gesture resolver,
//! hold gestures through the reason flow, and resolved actions into the
//! tally store. Hosts forward raw pointer events and schedule one timer per
//! [`HoldTimer`] they are handed.

use std::collections::HashMap;

use crate::client::api::Backend;
use crate::client::flow::{FlowAction, FlowState, ReasonFlow};
use crate::client::gesture::{Gesture, GestureResolver, HoldToken};
use crate::client::tally::TallyStore;
use crate::errors::ClientError;
use crate::models::Reason;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Increment,
    Decrement,
}

/// Returned from `pointer_down`; the host schedules a callback for
/// [`crate::client::gesture::HOLD_THRESHOLD`] and feeds it to `hold_fired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldTimer {
    pub item_id: i64,
    pub control: Control,
    token: HoldToken,
}

/// A confirmed tally change, for the host's toast line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub item_id: i64,
    pub delta: i32,
    pub reason: Option<Reason>,
}

pub struct TallySession<B> {
    store: TallyStore<B>,
    flow: ReasonFlow,
    resolvers: HashMap<(i64, Control), GestureResolver>,
}

impl<B: Backend> TallySession<B> {
    pub fn new(store: TallyStore<B>) -> Self {
        Self {
            store,
            flow: ReasonFlow::new(),
            resolvers: HashMap::new(),
        }
    }

    pub fn store(&self) -> &TallyStore<B> {
        &self.store
    }

    pub fn picker(&self) -> &FlowState {
        self.flow.state()
    }

    fn resolver(&mut self, item_id: i64, control: Control) -> &mut GestureResolver {
        self.resolvers.entry((item_id, control)).or_default()
    }

    /// Pointer-down on a tile control. The decrement control is disabled at
    /// zero, in which case the press is swallowed and no timer is handed out.
    pub fn pointer_down(&mut self, item_id: i64, control: Control) -> Option<HoldTimer> {
        let enabled = match control {
            Control::Increment => true,
            Control::Decrement => self.store.count(item_id) > 0,
        };
        self.resolver(item_id, control)
            .press(enabled)
            .map(|token| HoldTimer {
                item_id,
                control,
                token,
            })
    }

    /// Pointer-up. A tap on `+` logs one unit under the default reason; a
    /// tap on `-` removes the most recent entry for the item.
    pub async fn pointer_up(
        &mut self,
        item_id: i64,
        control: Control,
    ) -> Result<Option<Notice>, ClientError> {
        if self.resolver(item_id, control).release() != Some(Gesture::Tap) {
            return Ok(None);
        }
        match control {
            Control::Increment => {
                self.store.increment(item_id, Reason::DEFAULT, 1).await?;
                Ok(Some(Notice {
                    item_id,
                    delta: 1,
                    reason: Some(Reason::DEFAULT),
                }))
            }
            Control::Decrement => {
                let removed = self.store.decrement_latest(item_id).await?;
                Ok(removed.map(|_| Notice {
                    item_id,
                    delta: -1,
                    reason: None,
                }))
            }
        }
    }

    /// Pointer-leave or pointer-cancel: the gesture resolves to nothing.
    pub fn pointer_leave(&mut self, item_id: i64, control: Control) {
        self.resolver(item_id, control).cancel();
    }

    /// The host's hold timer fired. Opens the matching picker when the
    /// gesture is still live; a decrement hold on an item with no tracked
    /// reasons is suppressed. Returns whether a picker opened.
    pub fn hold_fired(&mut self, timer: HoldTimer) -> bool {
        let fired = self
            .resolver(timer.item_id, timer.control)
            .hold_elapsed(timer.token)
            == Some(Gesture::Hold);
        if !fired {
            return false;
        }
        match timer.control {
            Control::Increment => {
                self.flow.open_increment(timer.item_id);
                true
            }
            Control::Decrement => {
                let breakdown = self.store.breakdown(timer.item_id);
                self.flow.open_decrement(timer.item_id, &breakdown)
            }
        }
    }

    /// A reason was chosen in the open picker.
    pub async fn pick_reason(&mut self, reason: Reason) -> Result<Option<Notice>, ClientError> {
        match self.flow.select(reason) {
            Some(FlowAction::Increment { item_id, reason }) => {
                self.store.increment(item_id, reason, 1).await?;
                Ok(Some(Notice {
                    item_id,
                    delta: 1,
                    reason: Some(reason),
                }))
            }
            Some(FlowAction::DecrementByReason { item_id, reason }) => {
                let removed = self.store.decrement_by_reason(item_id, reason).await?;
                Ok(removed.then_some(Notice {
                    item_id,
                    delta: -1,
                    reason: Some(reason),
                }))
            }
            None => Ok(None),
        }
    }

    pub fn dismiss_picker(&mut self) {
        self.flow.dismiss();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::LocalBackend;
    use chrono::Local;

    async fn session() -> (TallySession<LocalBackend>, i64) {
        let backend = LocalBackend::seeded();
        let item = backend.items()[0];
        let store = TallyStore::new(backend);
        store.load_for_date(Local::now().date_naive()).await.unwrap();
        (TallySession::new(store), item)
    }

    #[tokio::test]
    async fn tap_plus_logs_default_reason() {
        let (mut session, item) = session().await;
        session.pointer_down(item, Control::Increment).unwrap();
        let notice = session.pointer_up(item, Control::Increment).await.unwrap();
        assert_eq!(
            notice,
            Some(Notice {
                item_id: item,
                delta: 1,
                reason: Some(Reason::DEFAULT)
            })
        );
        assert_eq!(session.store().count(item), 1);
    }

    #[tokio::test]
    async fn hold_plus_opens_picker_and_selection_logs() {
        let (mut session, item) = session().await;
        let timer = session.pointer_down(item, Control::Increment).unwrap();
        assert!(session.hold_fired(timer));
        assert_eq!(
            session.picker(),
            &FlowState::AwaitingIncrementReason { item_id: item }
        );
        // The pointer-up after a hold must not also log a tap.
        assert_eq!(session.pointer_up(item, Control::Increment).await.unwrap(), None);

        let notice = session.pick_reason(Reason::StaffComp).await.unwrap();
        assert_eq!(notice.unwrap().reason, Some(Reason::StaffComp));
        assert_eq!(session.store().count(item), 1);
        assert_eq!(
            session.store().breakdown(item).get(&Reason::StaffComp),
            Some(&1)
        );
    }

    #[tokio::test]
    async fn pointer_leave_aborts_the_gesture() {
        let (mut session, item) = session().await;
        let timer = session.pointer_down(item, Control::Increment).unwrap();
        session.pointer_leave(item, Control::Increment);
        assert!(!session.hold_fired(timer));
        assert_eq!(session.pointer_up(item, Control::Increment).await.unwrap(), None);
        assert_eq!(session.store().count(item), 0);
    }

    #[tokio::test]
    async fn minus_is_disabled_at_zero() {
        let (mut session, item) = session().await;
        assert_eq!(session.pointer_down(item, Control::Decrement), None);
        assert_eq!(session.pointer_up(item, Control::Decrement).await.unwrap(), None);
    }

    #[tokio::test]
    async fn hold_minus_offers_only_nonzero_reasons() {
        let (mut session, item) = session().await;
        for _ in 0..2 {
            session.pointer_down(item, Control::Increment).unwrap();
            session.pointer_up(item, Control::Increment).await.unwrap();
        }
        let timer = session.pointer_down(item, Control::Increment).unwrap();
        assert!(session.hold_fired(timer));
        session.pick_reason(Reason::Damaged).await.unwrap();

        let timer = session.pointer_down(item, Control::Decrement).unwrap();
        assert!(session.hold_fired(timer));
        let choices = match session.picker() {
            FlowState::AwaitingDecrementReason { choices, .. } => choices.clone(),
            other => panic!("expected decrement picker, got {other:?}"),
        };
        assert_eq!(choices.len(), 2);
        assert!(choices.contains(&(Reason::DEFAULT, 2)));
        assert!(choices.contains(&(Reason::Damaged, 1)));
    }

    #[tokio::test]
    async fn increment_twice_then_remove_by_reason_leaves_one() {
        let (mut session, item) = session().await;
        for _ in 0..2 {
            session.pointer_down(item, Control::Increment).unwrap();
            session.pointer_up(item, Control::Increment).await.unwrap();
        }
        let timer = session.pointer_down(item, Control::Decrement).unwrap();
        assert!(session.hold_fired(timer));
        let notice = session.pick_reason(Reason::DEFAULT).await.unwrap();
        assert_eq!(notice.unwrap().delta, -1);

        assert_eq!(session.store().count(item), 1);
        assert_eq!(
            session.store().breakdown(item).get(&Reason::DEFAULT),
            Some(&1)
        );
    }

    #[tokio::test]
    async fn dismissing_picker_changes_nothing() {
        let (mut session, item) = session().await;
        let timer = session.pointer_down(item, Control::Increment).unwrap();
        assert!(session.hold_fired(timer));
        session.dismiss_picker();
        assert!(matches!(session.picker(), FlowState::Idle));
        assert_eq!(session.store().count(item), 0);
        // A selection after dismissal is inert.
        assert_eq!(session.pick_reason(Reason::Spoiled).await.unwrap(), None);
    }
}
