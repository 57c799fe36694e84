//! Elapsed-time labels

/// Format seconds as `m:ss`
///
/// Both components are truncated, never rounded: `125.9` is `2:05`.
/// Negative and non-finite inputs format as `0:00`.
pub fn format_elapsed(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
