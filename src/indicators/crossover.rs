//! Strict crossover classification between two aligned series.
//!
//! `Buy` fires where `fast` moves from at-or-below `slow` to strictly above
//! it, `Sell` on the mirror move. Equality is neither above nor below, and any
//! comparison with an undefined operand yields `Hold`.

use crate::models::signal::Signal;

/// Classify the transition from `previous` to `current`, each a
/// `(fast, slow)` pair.
pub fn classify_cross(
    previous: (Option<f64>, Option<f64>),
    current: (Option<f64>, Option<f64>),
) -> Signal {
    let (Some(prev_fast), Some(prev_slow), Some(fast), Some(slow)) =
        (previous.0, previous.1, current.0, current.1)
    else {
        return Signal::Hold;
    };

    if fast > slow && prev_fast <= prev_slow {
        Signal::Buy
    } else if fast < slow && prev_fast >= prev_slow {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Signal per index. Index 0 is always `Hold`; output length is the shorter
/// of the two inputs.
pub fn crossover_signals(fast: &[Option<f64>], slow: &[Option<f64>]) -> Vec<Signal> {
    let len = fast.len().min(slow.len());
    (0..len)
        .map(|i| {
            if i == 0 {
                return Signal::Hold;
            }
            classify_cross((fast[i - 1], slow[i - 1]), (fast[i], slow[i]))
        })
        .collect()
}
