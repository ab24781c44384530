/// Formats axis and tooltip values with K/M suffixes for large magnitudes.
pub fn format_compact(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_small_values_are_plain() {
        assert_eq!(format_compact(0.0), "0");
        assert_eq!(format_compact(300.0), "300");
        assert_eq!(format_compact(2.5), "2.50");
    }

    #[test]
    fn test_large_values_get_suffixes() {
        assert_eq!(format_compact(1_400.0), "1.4K");
        assert_eq!(format_compact(-2_500_000.0), "-2.5M");
    }
}
