//! Tap/hold resolution for a single activation surface.
//!
//! Each tile control (increment, decrement) owns one resolver. A gesture
//! cycle starts on pointer-down and resolves exactly once: to `Tap` when the
//! pointer lifts before the hold threshold, to `Hold` when the threshold
//! timer fires first, or to nothing when the pointer leaves the control.

use std::time::Duration;

/// How long a press must be sustained before it counts as a hold.
pub const HOLD_THRESHOLD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    Hold,
}

/// Handed out on pointer-down. The host schedules a timer for
/// [`HOLD_THRESHOLD`] and feeds the token back through
/// [`GestureResolver::hold_elapsed`]; a token from a cycle that has already
/// resolved is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldToken(u64);

#[derive(Debug, Default)]
pub struct GestureResolver {
    pressing: bool,
    seq: u64,
}

impl GestureResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer-down. A disabled control (decrement at zero) ignores the
    /// press entirely: no pressing state, no timer token.
    pub fn press(&mut self, enabled: bool) -> Option<HoldToken> {
        if !enabled {
            return None;
        }
        self.seq += 1;
        self.pressing = true;
        Some(HoldToken(self.seq))
    }

    /// The hold timer fired. Resolves to `Hold` only when the press that
    /// produced the token is still live, and consumes the press so the
    /// pointer-up that eventually follows does not also produce a tap.
    pub fn hold_elapsed(&mut self, token: HoldToken) -> Option<Gesture> {
        if self.pressing && token.0 == self.seq {
            self.pressing = false;
            Some(Gesture::Hold)
        } else {
            None
        }
    }

    /// Pointer-up. Resolves to `Tap` while the press is still unresolved;
    /// inert after a hold already fired or after a cancel.
    pub fn release(&mut self) -> Option<Gesture> {
        if self.pressing {
            self.pressing = false;
            self.seq += 1;
            Some(Gesture::Tap)
        } else {
            None
        }
    }

    /// Pointer-leave or pointer-cancel: the cycle resolves to nothing and
    /// any scheduled timer token goes stale.
    pub fn cancel(&mut self) {
        self.pressing = false;
        self.seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_release_is_a_tap() {
        let mut resolver = GestureResolver::new();
        let token = resolver.press(true).expect("enabled press starts a cycle");
        assert_eq!(resolver.release(), Some(Gesture::Tap));
        // The timer the host scheduled still fires; it must do nothing.
        assert_eq!(resolver.hold_elapsed(token), None);
    }

    #[test]
    fn sustained_press_is_a_hold_and_release_is_inert() {
        let mut resolver = GestureResolver::new();
        let token = resolver.press(true).unwrap();
        assert_eq!(resolver.hold_elapsed(token), Some(Gesture::Hold));
        assert_eq!(resolver.release(), None);
    }

    #[test]
    fn leave_resolves_to_nothing() {
        let mut resolver = GestureResolver::new();
        let token = resolver.press(true).unwrap();
        resolver.cancel();
        assert_eq!(resolver.hold_elapsed(token), None);
        assert_eq!(resolver.release(), None);
    }

    #[test]
    fn disabled_control_ignores_the_press() {
        let mut resolver = GestureResolver::new();
        assert_eq!(resolver.press(false), None);
        assert_eq!(resolver.release(), None);
    }

    #[test]
    fn stale_timer_from_previous_cycle_never_fires() {
        let mut resolver = GestureResolver::new();
        let first = resolver.press(true).unwrap();
        assert_eq!(resolver.release(), Some(Gesture::Tap));

        // New press begins before the old timer callback runs.
        let second = resolver.press(true).unwrap();
        assert_eq!(resolver.hold_elapsed(first), None);
        assert_eq!(resolver.hold_elapsed(second), Some(Gesture::Hold));
    }

    #[test]
    fn resolver_is_reusable_across_many_cycles() {
        let mut resolver = GestureResolver::new();
        for _ in 0..3 {
            let token = resolver.press(true).unwrap();
            assert_eq!(resolver.hold_elapsed(token), Some(Gesture::Hold));
        }
        for _ in 0..3 {
            resolver.press(true).unwrap();
            assert_eq!(resolver.release(), Some(Gesture::Tap));
        }
    }

    #[test]
    fn hold_fires_at_most_once_per_cycle() {
        let mut resolver = GestureResolver::new();
        let token = resolver.press(true).unwrap();
        assert_eq!(resolver.hold_elapsed(token), Some(Gesture::Hold));
        assert_eq!(resolver.hold_elapsed(token), None);
    }
}
