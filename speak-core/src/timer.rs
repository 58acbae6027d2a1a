use chrono::{DateTime, Duration, Utc};

use crate::celebration::Celebrate;
use crate::session::SessionController;

/// Turns wall-clock time into whole-second ticks.
///
/// The clock is armed while the session runs and disarmed the moment it
/// stops, so a paused or dismissed session never receives a tick.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickClock {
    next_due: Option<DateTime<Utc>>,
}

impl TickClock {
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start counting from `now`; the first tick is due one second later.
    pub fn arm(&mut self, now: DateTime<Utc>) {
        if self.next_due.is_none() {
            self.next_due = Some(now + Duration::seconds(1));
        }
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// Number of ticks that came due up to `now`.
    pub fn due(&mut self, now: DateTime<Utc>) -> u64 {
        let Some(mut next) = self.next_due else {
            return 0;
        };
        let mut count = 0;
        while next <= now {
            count += 1;
            next = next + Duration::seconds(1);
        }
        self.next_due = Some(next);
        count
    }
}

/// Keep the clock in step with the session and deliver the ticks that are due.
pub fn tick_session(session: &mut SessionController, clock: &mut TickClock, now: DateTime<Utc>) {
    if !session.state().is_running {
        clock.disarm();
        return;
    }
    clock.arm(now);
    for _ in 0..clock.due(now) {
        session.tick();
    }
}

/// Stop the clock before completing so no late tick lands on a finished session.
pub fn complete_session<C: Celebrate + ?Sized>(
    session: &mut SessionController,
    clock: &mut TickClock,
    celebrate: &mut C,
) -> bool {
    let done = session.mark_complete(celebrate);
    if done {
        clock.disarm();
    }
    done
}
