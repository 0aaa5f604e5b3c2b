//! Per-file extraction timeout.
//!
//! Each extraction runs on a short-lived helper thread that reports back
//! over a bounded channel. On expiry the file is failed and the abandoned
//! thread finishes on its own; its late result is dropped with the
//! channel. Panics on the helper thread are caught and reported as
//! extraction failures.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;

use tokendrift_core::errors::ExtractError;

/// Run `job` with a wall-clock deadline.
pub fn run_with_timeout<T, F>(timeout_ms: u64, job: F) -> Result<T, ExtractError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ExtractError> + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(1);
    std::thread::Builder::new()
        .name("tokendrift-extract".to_string())
        .spawn(move || {
            let outcome = std::panic::catch_unwind(AssertUnwindSafe(job));
            let _ = tx.send(outcome);
        })?;

    match rx.recv_timeout(Duration::from_millis(timeout_ms)) {
        Ok(Ok(result)) => result,
        Ok(Err(payload)) => Err(ExtractError::Panicked {
            message: panic_message(payload.as_ref()),
        }),
        Err(RecvTimeoutError::Timeout) => Err(ExtractError::Timeout { timeout_ms }),
        Err(RecvTimeoutError::Disconnected) => Err(ExtractError::Panicked {
            message: "extraction thread exited without a result".to_string(),
        }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "parser panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use tokendrift_core::types::scan::ScanErrorCode;

    use super::*;

    #[test]
    fn fast_job_completes() {
        let result = run_with_timeout(5_000, || Ok(21 * 2));
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn slow_job_times_out() {
        let err = run_with_timeout::<u32, _>(20, || {
            std::thread::sleep(Duration::from_millis(500));
            Ok(0)
        })
        .unwrap_err();
        assert_eq!(err.scan_code(), ScanErrorCode::Timeout);
        assert!(err.to_string().contains("20ms"));
    }

    #[test]
    fn panicking_job_is_isolated() {
        let err = run_with_timeout::<u32, _>(5_000, || panic!("boom at line 7")).unwrap_err();
        assert_eq!(err.scan_code(), ScanErrorCode::ParseError);
        assert!(err.to_string().contains("boom at line 7"));
    }

    #[test]
    fn job_error_passes_through() {
        let err =
            run_with_timeout::<u32, _>(5_000, || Err(ExtractError::parse("bad input"))).unwrap_err();
        assert_eq!(err.scan_code(), ScanErrorCode::ParseError);
    }
}
