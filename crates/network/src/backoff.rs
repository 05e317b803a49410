// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Exponential backoff for retry loops against flaky upstreams.

use std::time::Duration;

use rand::Rng;

/// Computes successive retry delays that grow exponentially up to a cap.
///
/// Each call to [`next_duration`](Self::next_duration) returns the delay to
/// sleep *before* the upcoming attempt, then advances the internal state.
/// With `jitter_ms == 0` the sequence is fully deterministic
/// (`initial, initial * factor, initial * factor^2, ...`, capped at `max`).
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    initial: Duration,
    max: Duration,
    factor: f64,
    jitter_ms: u64,
    immediate_first: bool,
    attempt: u32,
    current: Duration,
    started: bool,
}

impl ExponentialBackoff {
    /// Creates a new backoff sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if `max < initial` or `factor <= 1.0`.
    pub fn new(
        initial: Duration,
        max: Duration,
        factor: f64,
        jitter_ms: u64,
        immediate_first: bool,
    ) -> anyhow::Result<Self> {
        if max < initial {
            anyhow::bail!("max backoff ({max:?}) must be >= initial backoff ({initial:?})");
        }
        if factor <= 1.0 {
            anyhow::bail!("backoff factor must be > 1.0, was {factor}");
        }
        Ok(Self {
            initial,
            max,
            factor,
            jitter_ms,
            immediate_first,
            attempt: 0,
            current: initial,
            started: false,
        })
    }

    /// Returns the base delay (pre-jitter) that the next call would use.
    #[must_use]
    pub fn current_delay(&self) -> Duration {
        self.current
    }

    /// Returns the delay to sleep before the next attempt, and advances state.
    pub fn next_duration(&mut self) -> Duration {
        if self.immediate_first && !self.started {
            self.started = true;
            return Duration::ZERO;
        }
        self.started = true;

        let base = self.current;
        let with_jitter = if self.jitter_ms == 0 {
            base
        } else {
            let jitter = rand::thread_rng().gen_range(0..=self.jitter_ms);
            base + Duration::from_millis(jitter)
        };

        self.attempt += 1;
        let scaled = self.initial.as_secs_f64() * self.factor.powi(self.attempt as i32);
        let clamped = scaled.min(self.max.as_secs_f64());
        self.current = Duration::from_secs_f64(clamped).min(self.max);

        with_jitter
    }

    /// Resets the sequence back to its initial state.
    pub fn reset(&mut self) {
        self.attempt = 0;
        self.current = self.initial;
        self.started = false;
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_doubling_sequence_no_jitter() {
        let mut backoff =
            ExponentialBackoff::new(Duration::from_millis(100), Duration::from_secs(60), 2.0, 0, false)
                .unwrap();

        assert_eq!(backoff.next_duration(), Duration::from_millis(100));
        assert_eq!(backoff.next_duration(), Duration::from_millis(200));
        assert_eq!(backoff.next_duration(), Duration::from_millis(400));
        assert_eq!(backoff.next_duration(), Duration::from_millis(800));
    }

    #[rstest]
    fn test_caps_at_max() {
        let mut backoff =
            ExponentialBackoff::new(Duration::from_millis(100), Duration::from_millis(250), 2.0, 0, false)
                .unwrap();

        backoff.next_duration(); // 100
        backoff.next_duration(); // 200
        let third = backoff.next_duration(); // would be 400, capped at 250
        assert_eq!(third, Duration::from_millis(250));
    }

    #[rstest]
    fn test_immediate_first() {
        let mut backoff =
            ExponentialBackoff::new(Duration::from_millis(100), Duration::from_secs(60), 2.0, 0, true)
                .unwrap();
        assert_eq!(backoff.next_duration(), Duration::ZERO);
        assert_eq!(backoff.next_duration(), Duration::from_millis(100));
    }

    #[rstest]
    fn test_reset() {
        let mut backoff =
            ExponentialBackoff::new(Duration::from_millis(100), Duration::from_secs(60), 2.0, 0, false)
                .unwrap();
        backoff.next_duration();
        backoff.next_duration();
        backoff.reset();
        assert_eq!(backoff.current_delay(), Duration::from_millis(100));
    }

    #[rstest]
    fn test_rejects_invalid_params() {
        assert!(ExponentialBackoff::new(
            Duration::from_secs(1),
            Duration::from_millis(100),
            2.0,
            0,
            false
        )
        .is_err());
        assert!(ExponentialBackoff::new(
            Duration::from_millis(100),
            Duration::from_secs(1),
            1.0,
            0,
            false
        )
        .is_err());
    }
}
