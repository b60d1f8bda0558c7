/// Quintic ease-in-out on `[0, 1]`. Inputs outside the range are clamped.
pub fn ease_in_out_quint(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        16.0 * t.powi(5)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quint(0.0), 0.0);
        assert_eq!(ease_in_out_quint(1.0), 1.0);
        assert!((ease_in_out_quint(0.5) - 0.5).abs() < 1e-15);
        assert_eq!(ease_in_out_quint(-3.0), 0.0);
        assert_eq!(ease_in_out_quint(7.0), 1.0);
    }

    #[test]
    fn monotonic_and_slow_at_the_ends() {
        let samples: Vec<f64> = (0..=100).map(|i| ease_in_out_quint(i as f64 / 100.0)).collect();
        assert!(samples.windows(2).all(|w| w[1] >= w[0]));
        assert!(samples[10] < 0.1 * 0.1);
        assert!(samples[90] > 1.0 - 0.1 * 0.1);
    }
}
