//! Letterbox (cinematic bars) collaborator

/// Anything that draws letterbox bars from a coverage amount
pub trait LetterboxEffect {
    /// Current coverage, 0 = no bars
    fn coverage(&self) -> f32;

    fn set_coverage(&mut self, coverage: f32);
}

/// Coverage holder for a renderer to read
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BarEffect {
    pub coverage: f32,
}

impl LetterboxEffect for BarEffect {
    fn coverage(&self) -> f32 {
        self.coverage
    }

    fn set_coverage(&mut self, coverage: f32) {
        self.coverage = coverage;
    }
}

/// Hermite interpolation from `from` to `to`; `t` is clamped to [0, 1]
pub fn smooth_step(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let t = t * t * (3.0 - 2.0 * t);
    to * t + from * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_step_endpoints() {
        assert_eq!(smooth_step(0.0, 0.2, 0.0), 0.0);
        assert!((smooth_step(0.0, 0.2, 1.0) - 0.2).abs() < 1e-6);
        assert!((smooth_step(0.0, 0.2, 0.5) - 0.1).abs() < 1e-6);
        // Out-of-range factors clamp.
        assert!((smooth_step(0.0, 0.2, 7.0) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_bar_effect_stores_coverage() {
        let mut bars = BarEffect::default();
        bars.set_coverage(0.15);
        assert_eq!(bars.coverage(), 0.15);
    }
}
