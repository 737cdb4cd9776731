//! Guarded arithmetic shared by every derivation phase.
//!
//! All helpers are total: they never panic and never return NaN or infinity.

/// Divides `numerator` by `denominator`, returning 0 when the denominator is
/// zero or non-finite, or when the quotient itself is not finite.
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    finite_or_zero(numerator / denominator)
}

/// Year-over-year growth denominator guard.
///
/// Unlike [`safe_divide`], an absent (zero) previous value does not suppress
/// the result: the denominator falls back to `1`, so growth from nothing is
/// reported as the raw delta. With `current = 150` and no previous year the
/// growth percentage is `(150 - 0) / 1 * 100 = 15000`.
pub fn growth_safe_divide(delta: f64, previous: f64) -> f64 {
    let denominator = if previous == 0.0 || !previous.is_finite() {
        1.0
    } else {
        previous.abs()
    };
    safe_divide(delta, denominator)
}

/// Percentage growth of `current` over `previous`.
pub fn growth_percent(current: f64, previous: f64) -> f64 {
    growth_safe_divide(current - finite_or_zero(previous), previous) * 100.0
}

/// Average of the current and prior balance. Falls back to `current` when no
/// usable prior value exists (first year, or history left blank).
pub fn average(current: f64, previous: f64) -> f64 {
    if previous == 0.0 || !previous.is_finite() {
        current
    } else {
        (current + previous) / 2.0
    }
}

pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Rounds half away from zero to `decimals` places. Negative zero collapses to
/// zero so formatted output never shows `-0.00`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    let scaled = value * factor;
    // Too large to carry any fractional digits; scaling would overflow.
    if value.is_finite() && !scaled.is_finite() {
        return value;
    }
    let rounded = finite_or_zero(scaled.round() / factor);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Rounds to the nearest whole number with halves going up, the convention the
/// day-count metrics have always used.
pub fn round_half_up(value: f64) -> f64 {
    let rounded = finite_or_zero((value + 0.5).floor());
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Turnover expressed in days: `round(days_in_year / (flow / balance))`.
///
/// Zero flow or a zero average balance yields 0 instead of a division error.
pub fn turnover_days(flow: f64, average_balance: f64, days_in_year: f64) -> f64 {
    if flow == 0.0 || average_balance == 0.0 {
        return 0.0;
    }
    let turns = safe_divide(flow, average_balance);
    round_half_up(safe_divide(days_in_year, turns))
}

/// Parses a cell as typed into an entry grid. Blank text reads as 0; text that
/// is not a number yields `None`.
pub fn parse_cell(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.replace(',', "").parse::<f64>().ok()
}
