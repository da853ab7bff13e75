/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round2() {
        assert_relative_eq!(round2(16.666_666), 16.67);
        assert_relative_eq!(round2(33.333_333), 33.33);
        assert_relative_eq!(round2(0.125), 0.13);
        assert_relative_eq!(round2(-0.125), -0.13);
        assert_relative_eq!(round2(75.0), 75.0);
    }
}
