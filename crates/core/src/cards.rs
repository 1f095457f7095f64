//! Card module - the 3x3 grid the player watches and taps
//!
//! Cards carry only presentation-adjacent state (motif, face, reveal label);
//! all decisions about *when* a card flips belong to the controller.

use arrayvec::ArrayVec;

use pattern_pulse_types::{GRID_SIZE, IMAGE_POOL};

use crate::rng::SimpleRng;

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCard {
    /// Motif name from the fixed pool.
    pub image: &'static str,
    pub is_face_up: bool,
    /// 1-based reveal-order label, set only while the card is face-up
    /// during a reveal.
    pub sequence_number: Option<u32>,
}

impl GridCard {
    fn new(image: &'static str) -> Self {
        Self {
            image,
            is_face_up: false,
            sequence_number: None,
        }
    }
}

/// The fixed-cardinality card grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardGrid {
    cards: ArrayVec<GridCard, GRID_SIZE>,
}

impl CardGrid {
    /// Deal a fresh grid: an injective random sample of 9 motifs from the
    /// pool, stable for the duration of the game.
    pub fn deal(rng: &mut SimpleRng) -> Self {
        let mut indices: Vec<usize> = (0..IMAGE_POOL.len()).collect();
        rng.shuffle(&mut indices);

        let cards = indices
            .into_iter()
            .take(GRID_SIZE)
            .map(|i| GridCard::new(IMAGE_POOL[i]))
            .collect();

        Self { cards }
    }

    /// Turn every card face-down and clear reveal labels.
    pub fn reset(&mut self) {
        for card in &mut self.cards {
            card.is_face_up = false;
            card.sequence_number = None;
        }
    }

    /// Show a card with its reveal-order label.
    pub fn show(&mut self, index: usize, sequence_number: u32) {
        if let Some(card) = self.cards.get_mut(index) {
            card.is_face_up = true;
            card.sequence_number = Some(sequence_number);
        }
    }

    /// Hide a card and clear its label.
    pub fn hide(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.is_face_up = false;
            card.sequence_number = None;
        }
    }

    /// Flip a card face-up without a label (player tap feedback).
    pub fn flip_up(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.is_face_up = true;
        }
    }

    pub fn get(&self, index: usize) -> Option<&GridCard> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridCard> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
