//! Transient I/O retry for file reads.

use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use tokendrift_core::config::ScanConfig;
use tokendrift_core::errors::ExtractError;

fn is_transient(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::WouldBlock | ErrorKind::Interrupted | ErrorKind::TimedOut
    )
}

/// Read a file to a string, retrying transient I/O failures.
///
/// Retries up to `effective_max_retries()` times with a linearly growing
/// delay (`base * attempt`). A transient failure that persists past the
/// retry budget surfaces as a parse failure, not an I/O error; permanent
/// I/O failures surface immediately.
pub fn read_with_retry(path: &Path, scan: &ScanConfig) -> Result<String, ExtractError> {
    retry_loop(scan, || std::fs::read_to_string(path))
}

fn retry_loop<F>(scan: &ScanConfig, mut read: F) -> Result<String, ExtractError>
where
    F: FnMut() -> std::io::Result<String>,
{
    let max_retries = scan.effective_max_retries();
    let base_delay = scan.effective_retry_delay_ms();
    let mut attempt: u32 = 0;
    loop {
        match read() {
            Ok(content) => return Ok(content),
            Err(e) if is_transient(e.kind()) => {
                attempt += 1;
                if attempt > max_retries {
                    return Err(ExtractError::parse(format!(
                        "transient I/O error persisted after {max_retries} retries: {e}"
                    )));
                }
                tracing::debug!(attempt, error = %e, "transient read failure, retrying");
                std::thread::sleep(Duration::from_millis(base_delay * u64::from(attempt)));
            }
            Err(e) => return Err(ExtractError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io;

    use tokendrift_core::types::scan::ScanErrorCode;

    use super::*;

    fn fast_config() -> ScanConfig {
        ScanConfig {
            max_retries: Some(2),
            retry_delay_ms: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn recovers_after_transient_failures() {
        let calls = Cell::new(0u32);
        let result = retry_loop(&fast_config(), || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(io::Error::from(ErrorKind::Interrupted))
            } else {
                Ok("content".to_string())
            }
        });
        assert_eq!(result.unwrap(), "content");
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn exhausted_transient_failure_becomes_parse_error() {
        let calls = Cell::new(0u32);
        let err = retry_loop(&fast_config(), || {
            calls.set(calls.get() + 1);
            Err(io::Error::from(ErrorKind::WouldBlock))
        })
        .unwrap_err();
        // initial attempt plus two retries
        assert_eq!(calls.get(), 3);
        assert_eq!(err.scan_code(), ScanErrorCode::ParseError);
    }

    #[test]
    fn permanent_failure_is_not_retried() {
        let calls = Cell::new(0u32);
        let err = retry_loop(&fast_config(), || {
            calls.set(calls.get() + 1);
            Err(io::Error::from(ErrorKind::PermissionDenied))
        })
        .unwrap_err();
        assert_eq!(calls.get(), 1);
        assert_eq!(err.scan_code(), ScanErrorCode::IoError);
    }
}
