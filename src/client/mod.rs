//! The embeddable tally client: gesture resolution, optimistic counts,
//! reason-picker flow, and report scaling, over a typed backend interface.

pub mod api;
pub mod charts;
pub mod flow;
pub mod gesture;
pub mod session;
pub mod tally;

pub use api::{ApiClient, Backend};
pub use flow::{FlowAction, FlowState, ReasonFlow};
pub use gesture::{Gesture, GestureResolver, HoldToken, HOLD_THRESHOLD};
pub use session::{Control, HoldTimer, Notice, TallySession};
pub use tally::{TallyState, TallyStore};
