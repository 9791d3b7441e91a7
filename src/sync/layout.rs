//! Column-major grid placement for newly created cards.

use crate::backend::{Geometry, Position};
use crate::config::LayoutConfig;

/// Places the `i`-th new card at column `i / rows`, row `i % rows`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub card_width: f64,
    pub card_height: f64,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub cards_per_column: usize,
    pub origin: Position,
}

impl GridLayout {
    pub fn new(config: &LayoutConfig, origin: Position) -> Self {
        Self {
            card_width: f64::from(config.card_width),
            card_height: f64::from(config.card_height),
            horizontal_spacing: f64::from(config.horizontal_spacing),
            vertical_spacing: f64::from(config.vertical_spacing),
            cards_per_column: config.cards_per_column.max(1) as usize,
            origin,
        }
    }

    /// (column, row) of the card at `index`.
    pub fn slot(&self, index: usize) -> (usize, usize) {
        (index / self.cards_per_column, index % self.cards_per_column)
    }

    pub fn position(&self, index: usize) -> Position {
        let (column, row) = self.slot(index);
        Position {
            x: column as f64 * (self.card_width + self.horizontal_spacing) + self.origin.x,
            y: row as f64 * (self.card_height + self.vertical_spacing) + self.origin.y,
        }
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            width: self.card_width,
            height: self.card_height,
        }
    }
}
