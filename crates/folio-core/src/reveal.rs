//! One-shot "show after N ms" effects.

use crate::constants::*;
use crate::timers::{TimerHandle, TimerQueue};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// A flag that flips to `true` once its timer fires.
///
/// The flag lives as long as the returned struct; the timer is cancelled when
/// it is dropped before firing.
pub struct DelayedReveal {
    revealed: Rc<Cell<bool>>,
    _timer: TimerHandle,
}

impl DelayedReveal {
    pub fn schedule(queue: &TimerQueue, delay: Duration) -> Self {
        let revealed = Rc::new(Cell::new(false));
        let flag = revealed.clone();
        let timer = queue.after(delay, move || flag.set(true));
        Self {
            revealed,
            _timer: timer,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed.get()
    }
}

/// Headline number card; shows a placeholder until its reveal fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricCard {
    pub value: String,
    pub label: String,
    pub trend: String,
    /// stagger index; the value appears after `delay_steps * 100 ms`
    pub delay_steps: u32,
}

impl MetricCard {
    pub fn new(value: &str, label: &str, trend: &str, delay_steps: u32) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            trend: trend.to_string(),
            delay_steps,
        }
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(METRIC_REVEAL_STEP_MS * self.delay_steps as u64)
    }
}

pub fn default_metrics() -> Vec<MetricCard> {
    vec![
        MetricCard::new("98.7%", "Model Accuracy", "+12%", 0),
        MetricCard::new("99.9%", "System Uptime", "+2.1%", 1),
        MetricCard::new("71%", "Deployment Speed", "+45%", 2),
        MetricCard::new("10K+", "Daily Predictions", "+180%", 3),
    ]
}

/// A card bound to its reveal timer.
pub struct MetricDisplay {
    pub card: MetricCard,
    reveal: DelayedReveal,
}

impl MetricDisplay {
    pub fn start(queue: &TimerQueue, card: MetricCard) -> Self {
        let reveal = DelayedReveal::schedule(queue, card.reveal_delay());
        Self { card, reveal }
    }

    pub fn display_value(&self) -> &str {
        if self.reveal.is_revealed() {
            &self.card.value
        } else {
            "0"
        }
    }
}
