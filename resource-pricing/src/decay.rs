use {
    crate::{error::PricingError, state::ResourceCurveState},
    log::trace,
    std::time::{SystemTime, UNIX_EPOCH},
};

/// Current wall-clock time in unix seconds.
///
/// Only used when a caller does not pin the evaluation time; tests always
/// pass an explicit timestamp.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Decay `adjusted_utilization` toward `utilization` as of `now`.
///
/// # Formula
///
/// ```text
/// if utilization >= adjusted_utilization:
///     adjusted = adjusted_utilization              (never raised here)
/// else:
///     diff     = adjusted_utilization - utilization
///     delta    = diff * exp(-(now - utilization_timestamp) / decay_secs)
///     delta    = clamp(trunc(delta), 0, diff)
///     adjusted = utilization + delta
/// ```
///
/// A short spike in leasing leaves capacity "hot"; the decay brings the
/// congestion surcharge back down, so a later quote sees a lower price.
pub fn adjusted_utilization(state: &ResourceCurveState, now: u64) -> Result<i64, PricingError> {
    if state.decay_secs == 0 {
        return Err(PricingError::InvalidDecayConstant {
            decay_secs: state.decay_secs,
        });
    }
    if state.utilization < 0 || state.adjusted_utilization < 0 {
        return Err(PricingError::InvalidState {
            reason: format!(
                "utilization ({}) and adjusted_utilization ({}) must be >= 0",
                state.utilization, state.adjusted_utilization
            ),
        });
    }
    if state.utilization >= state.adjusted_utilization {
        return Ok(state.adjusted_utilization);
    }

    let diff = state
        .adjusted_utilization
        .checked_sub(state.utilization)
        .ok_or(PricingError::Overflow)?;
    let elapsed = now as f64 - f64::from(state.utilization_timestamp);
    let decayed = diff as f64 * (-elapsed / f64::from(state.decay_secs)).exp();
    // `as` saturates and maps NaN to 0; the clamp covers clock skew (now
    // before the last update) where the exponential exceeds 1.
    let delta = (decayed as i64).clamp(0, diff);

    trace!(
        "decay: utilization={} adjusted={} elapsed={}s delta={}",
        state.utilization,
        state.adjusted_utilization,
        elapsed,
        delta
    );

    state
        .utilization
        .checked_add(delta)
        .ok_or(PricingError::Overflow)
}
