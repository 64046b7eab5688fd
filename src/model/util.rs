use rand::Rng;
use rand::rngs::StdRng;

// Clamp into the unit interval.
pub fn clamp01(x: f32) -> f32 {
    f32::max(0., f32::min(1., x))
}

// Single Bernoulli draw. The compound probability products
// can exceed 1, so clamp before rolling.
pub fn chance(p: f32, rng: &mut StdRng) -> bool {
    rng.gen::<f32>() < clamp01(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn clamping() {
        assert_eq!(clamp01(-0.5), 0.);
        assert_eq!(clamp01(0.5), 0.5);
        assert_eq!(clamp01(1.7), 1.);
    }

    #[test]
    fn chance_extremes() {
        let mut rng: StdRng = SeedableRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(!chance(0., &mut rng));
            assert!(chance(1., &mut rng));
            // Oversized products behave like certainty
            assert!(chance(3.2, &mut rng));
        }
    }
}
