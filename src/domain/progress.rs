/// `round(count / target * 100)`, unclamped.
///
/// A zero target gives `inf` (`NaN` for `0 / 0`) and a negative target gives a
/// negative value; callers render whatever comes out.
pub fn percentage(count: u64, target: i64) -> f64 {
    (count as f64 / target as f64 * 100.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_basic() {
        assert_eq!(percentage(50, 200), 25.0);
        assert_eq!(percentage(0, 100), 0.0);
    }

    #[test]
    fn test_percentage_not_clamped() {
        assert_eq!(percentage(250, 200), 125.0);
        assert_eq!(percentage(732, 500), 146.0);
    }

    #[test]
    fn test_percentage_rounds_half_away_from_zero() {
        assert_eq!(percentage(1, 8), 13.0); // 12.5
        assert_eq!(percentage(1, 3), 33.0);
    }

    #[test]
    fn test_percentage_degenerate_target() {
        assert!(percentage(5, 0).is_infinite());
        assert!(percentage(0, 0).is_nan());
        assert_eq!(percentage(50, -100), -50.0);
    }
}
