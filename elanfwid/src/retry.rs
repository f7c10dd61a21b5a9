//! Bounded retry for probe-style command exchanges.

use crate::error::{Error, Result};
use log::warn;
use std::thread;
use std::time::Duration;

/// Default number of attempts for a probe exchange.
pub const DEFAULT_RETRY_COUNT: i32 = 3;

/// Fixed delay between probe attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(50);

/// Run `op` up to `retry_count` times with a fixed inter-attempt delay.
///
/// Only transient command failures are retried. A transport timeout or a
/// parameter error fails immediately, and the last attempt's error is
/// surfaced once the bound is exhausted. A `retry_count <= 0` behaves like
/// exactly one attempt.
pub fn retry_probe<T, F>(retry_count: i32, mut op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let attempts = retry_count.max(1);
    let mut last_err = None;

    for attempt in 1..=attempts {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_transient() => return Err(err),
            Err(err) => {
                warn!("probe attempt {attempt}/{attempts} failed: {err}");
                last_err = Some(err);
                if attempt < attempts {
                    thread::sleep(RETRY_DELAY);
                }
            },
        }
    }

    Err(last_err.unwrap_or_else(|| Error::Command("probe never attempted".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_short_circuits() {
        let mut calls = 0;
        let result: Result<u8> = retry_probe(3, || {
            calls += 1;
            Ok(7)
        });
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_exhausts_exactly_n_attempts() {
        let mut calls = 0;
        let result: Result<u8> = retry_probe(3, || {
            calls += 1;
            Err(Error::Command(format!("attempt {calls}")))
        });
        assert_eq!(calls, 3);
        // Last attempt's error is the one surfaced.
        match result {
            Err(Error::Command(msg)) => assert_eq!(msg, "attempt 3"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_zero_and_negative_count_mean_one_attempt() {
        for count in [0, -1] {
            let mut calls = 0;
            let result: Result<u8> = retry_probe(count, || {
                calls += 1;
                Err(Error::Command("nope".to_string()))
            });
            assert_eq!(calls, 1);
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_timeout_is_never_retried() {
        let mut calls = 0;
        let result: Result<u8> = retry_probe(5, || {
            calls += 1;
            Err(Error::Timeout("deadline".to_string()))
        });
        assert_eq!(calls, 1);
        assert!(matches!(result, Err(Error::Timeout(_))));
    }

    #[test]
    fn test_invalid_parameter_is_never_retried() {
        let mut calls = 0;
        let result: Result<u8> = retry_probe(5, || {
            calls += 1;
            Err(Error::InvalidParameter("bad".to_string()))
        });
        assert_eq!(calls, 1);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_recovers_after_transient_failure() {
        let mut calls = 0;
        let result: Result<u8> = retry_probe(3, || {
            calls += 1;
            if calls < 3 {
                Err(Error::Command("transient".to_string()))
            } else {
                Ok(42)
            }
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 3);
    }
}
