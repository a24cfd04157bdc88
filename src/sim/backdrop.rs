//! Parallax backdrop scroll state

use serde::{Deserialize, Serialize};

use crate::consts::WORLD_WIDTH;

/// Fraction of the scroll speed each layer moves at, far to near
pub const LAYER_SPEEDS: [f32; 4] = [0.08, 0.22, 0.50, 0.85];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Backdrop {
    /// Horizontal offset per layer, wrapped to `[0, WORLD_WIDTH)`
    pub offsets: [f32; 4],
    /// Clock for swaying seaweed and caustics
    pub t: f32,
}

impl Backdrop {
    pub fn update(&mut self, dt: f32, speed: f32) {
        self.t += dt;
        for (offset, factor) in self.offsets.iter_mut().zip(LAYER_SPEEDS) {
            *offset = (*offset + speed * factor * dt).rem_euclid(WORLD_WIDTH);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_wrap_and_differ() {
        let mut bd = Backdrop::default();
        for _ in 0..1000 {
            bd.update(0.05, 680.0);
        }
        for off in bd.offsets {
            assert!((0.0..WORLD_WIDTH).contains(&off));
        }
        let mut near = Backdrop::default();
        near.update(0.1, 100.0);
        assert!(near.offsets[3] > near.offsets[0]);
    }
}
