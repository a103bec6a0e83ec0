//! Logical paint-order bands.

use serde::{Deserialize, Serialize};

/// A logical layer of the board, listed bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Layer {
    /// Background grid overlay.
    Grid,
    /// Normal drawing stack (every committed shape lives here).
    #[default]
    Stack,
    /// Live previews of the shape being drawn.
    Visual,
    /// Selection chrome (marquee, control points).
    Selection,
}

/// Result of comparing two layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOrdering {
    Above,
    Same,
    Under,
}

impl Layer {
    /// All layers in paint order.
    pub const ALL: [Layer; 4] = [Layer::Grid, Layer::Stack, Layer::Visual, Layer::Selection];

    /// Position of this layer in the fixed bottom-to-top sequence.
    pub fn rank(self) -> usize {
        match self {
            Layer::Grid => 0,
            Layer::Stack => 1,
            Layer::Visual => 2,
            Layer::Selection => 3,
        }
    }

    /// Compare `self` against `reference`.
    pub fn compare(self, reference: Layer) -> LayerOrdering {
        match self.rank().cmp(&reference.rank()) {
            std::cmp::Ordering::Greater => LayerOrdering::Above,
            std::cmp::Ordering::Equal => LayerOrdering::Same,
            std::cmp::Ordering::Less => LayerOrdering::Under,
        }
    }
}
