//! Color assignment for scene nodes.

use crate::math::Real;

pub struct ColorGenerator {
    rng: oorandom::Rand32,
}

impl Default for ColorGenerator {
    fn default() -> Self {
        Self {
            rng: oorandom::Rand32::new(123456),
        }
    }
}

impl ColorGenerator {
    pub fn gen_color(&mut self) -> [Real; 3] {
        [
            self.rng.rand_float(),
            self.rng.rand_float(),
            self.rng.rand_float(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_deterministic_for_a_fixed_seed() {
        let mut a = ColorGenerator::default();
        let mut b = ColorGenerator::default();
        assert_eq!(a.gen_color(), b.gen_color());
    }
}
