//! Test helpers: scripted randomness and a controllable clock

use crate::clock::Clock;
use crate::wager::WagerRng;
use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Randomness source that replays a fixed script of rolls.
pub struct ScriptedRng {
    rolls: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }
}

impl WagerRng for ScriptedRng {
    fn roll(&mut self, bound: u32) -> u32 {
        let value = self
            .rolls
            .pop_front()
            .expect("scripted rng ran out of rolls");
        assert!(value < bound, "scripted roll {value} out of bound {bound}");
        value
    }
}

/// Clock that only moves when the test says so. Cloning shares the
/// underlying instant, so a test can keep a handle after handing one to
/// the economy.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
