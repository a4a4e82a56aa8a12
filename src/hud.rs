//! Heads-up display text
//!
//! Only the strings; layout and animation belong to the UI layer.

/// Compact score readout: `"1.2M"`, `"3.4k"`, or the whole number
pub fn score_label(score: f32) -> String {
    if score >= 1_000_000.0 {
        format!("{:.1}M", score / 1_000_000.0)
    } else if score >= 1000.0 {
        format!("{:.1}k", score / 1000.0)
    } else {
        (score as i64).to_string()
    }
}

/// Height readout, truncated toward zero
pub fn height_label(y: f32) -> String {
    (y as i32).to_string()
}

/// Popup shown when score is added
pub fn score_delta_label(delta: f32) -> String {
    format!("+{:.0}", delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_label_units() {
        assert_eq!(score_label(0.0), "0");
        assert_eq!(score_label(999.9), "999");
        assert_eq!(score_label(1000.0), "1.0k");
        assert_eq!(score_label(34_560.0), "34.6k");
        assert_eq!(score_label(1_240_000.0), "1.2M");
        assert_eq!(score_label(2_000_000.0), "2.0M");
    }

    #[test]
    fn test_height_label_truncates() {
        assert_eq!(height_label(-12.9), "-12");
        assert_eq!(height_label(0.4), "0");
    }

    #[test]
    fn test_delta_label_has_no_decimals() {
        assert_eq!(score_delta_label(30000.0), "+30000");
        assert_eq!(score_delta_label(241.0), "+241");
        assert_eq!(score_delta_label(8.4), "+8");
    }
}
