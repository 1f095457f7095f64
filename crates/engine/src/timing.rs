//! Timed activities: pattern reveal, player-turn countdown, fixed delays
//!
//! Each function spawns one task that only sleeps and reports back over the
//! event channel; all state mutation stays in the controller. Aborting the
//! task at any suspension point stops it without further events, and the
//! epoch tag lets the controller drop anything that slipped out beforehand.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{interval, sleep};

use pattern_pulse_core::Pattern;
use pattern_pulse_types::{COUNTDOWN_TICK_SECS, INTER_CARD_PAUSE_SECS, LEAD_IN_SECS};

use crate::event::{EngineEvent, PendingStep};
use crate::task::TaskHandle;

/// Drive the timed reveal of a pattern.
///
/// Lead-in pause, then for each index in order: show with its 1-based
/// label, hold for the pattern's display speed, hide, short gap. After the
/// last card a completion event is sent.
pub(crate) fn spawn_reveal(
    pattern: Pattern,
    epoch: u64,
    events: UnboundedSender<EngineEvent>,
) -> TaskHandle {
    TaskHandle::spawn(async move {
        sleep(Duration::from_secs_f64(LEAD_IN_SECS)).await;

        for (i, &card) in pattern.sequence.iter().enumerate() {
            let number = (i + 1) as u32;
            let _ = events.send(EngineEvent::RevealStep { epoch, card, number });
            sleep(Duration::from_secs_f64(pattern.display_speed)).await;
            let _ = events.send(EngineEvent::RevealHide { epoch, card });
            sleep(Duration::from_secs_f64(INTER_CARD_PAUSE_SECS)).await;
        }

        let _ = events.send(EngineEvent::RevealDone { epoch });
    })
}

/// Drive the player-turn countdown.
///
/// Emits a tick every 0.1s with the new remaining time, computed from the
/// tick count rather than accumulated subtraction so long turns don't
/// drift. At zero it emits expiry exactly once and exits.
pub(crate) fn spawn_countdown(
    initial: f64,
    epoch: u64,
    events: UnboundedSender<EngineEvent>,
) -> TaskHandle {
    TaskHandle::spawn(async move {
        let mut ticker = interval(Duration::from_secs_f64(COUNTDOWN_TICK_SECS));
        // The first interval tick completes immediately; skip it.
        ticker.tick().await;

        let mut ticks: u32 = 0;
        loop {
            ticker.tick().await;
            ticks += 1;
            let remaining = initial - f64::from(ticks) * COUNTDOWN_TICK_SECS;

            if remaining <= 0.0 {
                let _ = events.send(EngineEvent::CountdownTick { epoch, remaining: 0.0 });
                let _ = events.send(EngineEvent::CountdownExpired { epoch });
                break;
            }
            let _ = events.send(EngineEvent::CountdownTick { epoch, remaining });
        }
    })
}

/// Fire a single step after a fixed delay.
pub(crate) fn spawn_delay(
    secs: f64,
    epoch: u64,
    step: PendingStep,
    events: UnboundedSender<EngineEvent>,
) -> TaskHandle {
    TaskHandle::spawn(async move {
        sleep(Duration::from_secs_f64(secs)).await;
        let _ = events.send(EngineEvent::DelayElapsed { epoch, step });
    })
}
