/// Parallax background scroll state.
///
/// Purely cosmetic: the session advances it every tick (even after
/// game over) and the renderer reads the per-layer offsets.  Nothing
/// in gameplay depends on it.

use crate::entities::WorldContext;

/// One background layer scrolling at a fraction of the world speed.
#[derive(Clone, Debug)]
pub struct ParallaxLayer {
    /// Current horizontal offset, in world pixels.  Always in
    /// `(-width, 0]`; the renderer tiles the layer from here.
    pub offset: f32,
    pub width: f32,
    /// Multiplier on the world scroll rate; far layers use small
    /// values so they appear to move slower.
    pub speed_modifier: f32,
}

impl ParallaxLayer {
    pub fn new(width: f32, speed_modifier: f32) -> Self {
        ParallaxLayer {
            offset: 0.0,
            width,
            speed_modifier,
        }
    }

    pub fn advance(&mut self, world: &WorldContext) {
        if self.offset <= -self.width {
            self.offset = 0.0;
        }
        self.offset -= world.speed * self.speed_modifier;
    }
}

/// The full layer stack, far to near.
#[derive(Clone, Debug)]
pub struct Background {
    pub layers: Vec<ParallaxLayer>,
}

impl Background {
    pub fn new(world: &WorldContext) -> Self {
        Background {
            layers: vec![
                ParallaxLayer::new(world.width, 0.2),
                ParallaxLayer::new(world.width, 0.4),
                ParallaxLayer::new(world.width, 1.0),
                ParallaxLayer::new(world.width, 1.5),
            ],
        }
    }

    pub fn advance(&mut self, world: &WorldContext) {
        for layer in &mut self.layers {
            layer.advance(world);
        }
    }
}
