//! Parameter checks shared by the engines. All of them run before any
//! series is computed.

use crate::config::{MacdParams, SmaParams};
use crate::error::{Result, SignalError};

/// Windows must be positive and `short < long`. Needs no data, so callers
/// can reject bad parameters before fetching anything.
pub fn validate_window_order(params: &SmaParams) -> Result<()> {
    let SmaParams {
        short_window,
        long_window,
    } = *params;

    if short_window == 0 || long_window == 0 {
        return Err(SignalError::InvalidWindow(format!(
            "windows must be positive (short={}, long={})",
            short_window, long_window
        )));
    }
    if short_window >= long_window {
        return Err(SignalError::InvalidWindow(format!(
            "short window {} must be smaller than long window {}",
            short_window, long_window
        )));
    }
    Ok(())
}

/// [`validate_window_order`], plus `long` must fit in the series
pub fn validate_windows(params: &SmaParams, series_len: usize) -> Result<()> {
    validate_window_order(params)?;
    let long_window = params.long_window;
    if long_window > series_len {
        return Err(SignalError::InvalidWindow(format!(
            "long window {} exceeds series length {}",
            long_window, series_len
        )));
    }
    Ok(())
}

/// Every span must be positive and `fast < slow`
pub fn validate_spans(params: &MacdParams) -> Result<()> {
    let MacdParams {
        fast,
        slow,
        signal_span,
    } = *params;

    if fast == 0 || slow == 0 || signal_span == 0 {
        return Err(SignalError::InvalidSpan(format!(
            "spans must be positive (fast={}, slow={}, signal={})",
            fast, slow, signal_span
        )));
    }
    if fast >= slow {
        return Err(SignalError::InvalidSpan(format!(
            "fast span {} must be smaller than slow span {}",
            fast, slow
        )));
    }
    Ok(())
}
