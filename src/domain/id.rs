/// Largest integer an `f64` represents exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Normalizes an identifier for equality checks.
///
/// Backends disagree on whether ids are numbers or strings, so `7`, `"7"`,
/// `" 7 "` and `"7.0"` must all refer to the same record. Non-numeric ids are
/// only trimmed.
pub fn normalize_id(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER => {
            format!("{}", n as i64)
        }
        _ => trimmed.to_string(),
    }
}

/// Returns true when both ids refer to the same record.
pub fn same_id(a: &str, b: &str) -> bool {
    a == b || normalize_id(a) == normalize_id(b)
}
