//! Pile store: draw, hand, discard and exhaust.
//!
//! The `PileStore` owns every card instance in a combat and moves them
//! between the four piles. It knows nothing about card rules:
//! - The draw pile is ordered; its top is the end of the sequence
//! - The hand is ordered by arrival (hand indices are stable until a card
//!   leaves)
//! - Discard and exhaust are append-only until reshuffled or removed
//!
//! No operation creates or drops an instance except `add_card` and
//! `remove_card`. A failed operation returns an error and leaves every pile
//! unchanged.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::{GameRng, InstanceId, InvariantViolation, PileError};

/// One of the four piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    Draw,
    Hand,
    Discard,
    Exhaust,
}

/// Sizes of all four piles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileCounts {
    pub draw: usize,
    pub hand: usize,
    pub discard: usize,
    pub exhaust: usize,
}

impl PileCounts {
    /// Sum of all four piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.draw + self.hand + self.discard + self.exhaust
    }
}

/// Result of a draw request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Cards moved into the hand, in draw order.
    pub drawn: Vec<InstanceId>,
    /// Whether the discard pile was shuffled into the draw pile.
    pub reshuffled: bool,
    /// Requested draws that did not happen.
    pub unfulfilled: usize,
    /// Whether drawing stopped because the hand was full.
    pub hand_limited: bool,
}

/// Owns every card instance of one combat.
///
/// ## Usage
///
/// ```
/// use roguedeck::cards::{CardDefinition, CardInstance, CardType};
/// use roguedeck::core::{GameRng, InstanceId};
/// use roguedeck::piles::PileStore;
///
/// let strike = CardDefinition::new("strike", "Strike", CardType::Attack, 1);
/// let deck: Vec<_> = (0..5).map(|i| CardInstance::new(InstanceId(i), strike.clone())).collect();
///
/// let mut rng = GameRng::new(42);
/// let mut piles = PileStore::new(10);
/// piles.start_combat(deck, &mut rng).unwrap();
///
/// let outcome = piles.draw(3, &mut rng);
/// assert_eq!(outcome.drawn.len(), 3);
/// assert_eq!(piles.counts().total(), 5);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileStore {
    draw: Vector<CardInstance>,
    hand: Vector<CardInstance>,
    discard: Vector<CardInstance>,
    exhaust: Vector<CardInstance>,
    max_hand_size: usize,
    started: bool,
}

impl PileStore {
    /// Create an empty store with the given hand size limit.
    #[must_use]
    pub fn new(max_hand_size: usize) -> Self {
        Self {
            max_hand_size,
            ..Self::default()
        }
    }

    /// Shuffle `deck` into the draw pile and empty the other piles.
    ///
    /// Callable once per combat; call `reset` before starting another.
    pub fn start_combat(&mut self, deck: Vec<CardInstance>, rng: &mut GameRng) -> Result<(), PileError> {
        if self.started {
            return Err(PileError::AlreadyStarted);
        }

        let mut seen = rustc_hash::FxHashSet::default();
        if let Some(dup) = deck.iter().find(|c| !seen.insert(c.instance_id)) {
            return Err(PileError::DuplicateInstance(dup.instance_id));
        }

        self.draw = deck.into_iter().collect();
        rng.shuffle_vector(&mut self.draw);
        self.hand.clear();
        self.discard.clear();
        self.exhaust.clear();
        self.started = true;
        Ok(())
    }

    /// Has `start_combat` been called since the last reset?
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Drop every card and re-arm `start_combat`.
    pub fn reset(&mut self) {
        self.draw.clear();
        self.hand.clear();
        self.discard.clear();
        self.exhaust.clear();
        self.started = false;
    }

    /// Hand size limit.
    #[must_use]
    pub fn max_hand_size(&self) -> usize {
        self.max_hand_size
    }

    /// Move up to `count` cards from the draw pile to the hand.
    ///
    /// An empty draw pile triggers at most one reshuffle of the discard pile
    /// per call. Drawing stops at the hand limit; the remaining cards stay
    /// in the draw pile.
    pub fn draw(&mut self, count: usize, rng: &mut GameRng) -> DrawOutcome {
        let mut outcome = DrawOutcome::default();

        for _ in 0..count {
            if self.hand.len() >= self.max_hand_size {
                outcome.hand_limited = true;
                break;
            }

            if self.draw.is_empty() {
                if outcome.reshuffled || self.discard.is_empty() {
                    break;
                }
                self.reshuffle_discard_into_draw(rng);
                outcome.reshuffled = true;
            }

            match self.draw.pop_back() {
                Some(card) => {
                    outcome.drawn.push(card.instance_id);
                    self.hand.push_back(card);
                }
                None => break,
            }
        }

        outcome.unfulfilled = count - outcome.drawn.len();
        outcome
    }

    /// Shuffle the discard pile and place it under the draw pile.
    ///
    /// Returns the number of cards moved.
    pub fn reshuffle_discard_into_draw(&mut self, rng: &mut GameRng) -> usize {
        let mut cards = std::mem::take(&mut self.discard);
        let moved = cards.len();
        rng.shuffle_vector(&mut cards);
        cards.append(std::mem::take(&mut self.draw));
        self.draw = cards;
        moved
    }

    /// Move a card from the hand to the discard pile.
    pub fn move_to_discard(&mut self, id: InstanceId) -> Result<(), PileError> {
        let card = self.take_from_hand(id)?;
        self.discard.push_back(card);
        Ok(())
    }

    /// Move a card from the hand to the exhaust pile.
    pub fn move_to_exhaust(&mut self, id: InstanceId) -> Result<(), PileError> {
        let card = self.take_from_hand(id)?;
        self.exhaust.push_back(card);
        Ok(())
    }

    /// Move the whole hand to the discard pile, oldest first.
    pub fn discard_hand(&mut self) -> Vec<InstanceId> {
        let hand = std::mem::take(&mut self.hand);
        let ids = hand.iter().map(|c| c.instance_id).collect();
        self.discard.append(hand);
        ids
    }

    /// Introduce a new instance into a pile (on top for the draw pile).
    pub fn add_card(&mut self, card: CardInstance, pile: PileKind) -> Result<(), PileError> {
        if self.find(card.instance_id).is_some() {
            return Err(PileError::DuplicateInstance(card.instance_id));
        }
        if pile == PileKind::Hand && self.hand.len() >= self.max_hand_size {
            return Err(PileError::HandFull {
                max_hand_size: self.max_hand_size,
            });
        }
        self.pile_mut(pile).push_back(card);
        Ok(())
    }

    /// Take an instance out of whichever pile holds it.
    pub fn remove_card(&mut self, id: InstanceId) -> Result<CardInstance, PileError> {
        let pile = self.find(id).ok_or(PileError::NotFound(id))?;
        let cards = self.pile_mut(pile);
        let index = cards
            .iter()
            .position(|c| c.instance_id == id)
            .ok_or(PileError::NotFound(id))?;
        Ok(cards.remove(index))
    }

    /// Which pile holds an instance.
    #[must_use]
    pub fn find(&self, id: InstanceId) -> Option<PileKind> {
        [PileKind::Draw, PileKind::Hand, PileKind::Discard, PileKind::Exhaust]
            .into_iter()
            .find(|&kind| self.pile(kind).iter().any(|c| c.instance_id == id))
    }

    /// Read access to one pile.
    #[must_use]
    pub fn pile(&self, kind: PileKind) -> &Vector<CardInstance> {
        match kind {
            PileKind::Draw => &self.draw,
            PileKind::Hand => &self.hand,
            PileKind::Discard => &self.discard,
            PileKind::Exhaust => &self.exhaust,
        }
    }

    fn pile_mut(&mut self, kind: PileKind) -> &mut Vector<CardInstance> {
        match kind {
            PileKind::Draw => &mut self.draw,
            PileKind::Hand => &mut self.hand,
            PileKind::Discard => &mut self.discard,
            PileKind::Exhaust => &mut self.exhaust,
        }
    }

    /// The hand, oldest card first.
    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        &self.hand
    }

    /// The card at a hand index.
    #[must_use]
    pub fn hand_card(&self, index: usize) -> Option<&CardInstance> {
        self.hand.get(index)
    }

    /// Sizes of all four piles.
    #[must_use]
    pub fn counts(&self) -> PileCounts {
        PileCounts {
            draw: self.draw.len(),
            hand: self.hand.len(),
            discard: self.discard.len(),
            exhaust: self.exhaust.len(),
        }
    }

    /// Every card in every pile, in pile order (draw, hand, discard, exhaust).
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.draw.iter().chain(&self.hand).chain(&self.discard).chain(&self.exhaust)
    }

    /// Check that the piles hold exactly `expected` distinct instances.
    pub fn verify(&self, expected: usize) -> Result<(), InvariantViolation> {
        let actual = self.counts().total();
        if actual != expected {
            return Err(InvariantViolation::PileCountMismatch { expected, actual });
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for card in self.cards() {
            if !seen.insert(card.instance_id) {
                return Err(InvariantViolation::DuplicateInstance(card.instance_id));
            }
        }
        Ok(())
    }

    /// Drop every repeated instance, keeping the first occurrence in pile
    /// order (draw, hand, discard, exhaust). Returns the number dropped.
    pub fn remove_duplicates(&mut self) -> usize {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut dropped = 0;
        for kind in [PileKind::Draw, PileKind::Hand, PileKind::Discard, PileKind::Exhaust] {
            let pile = self.pile_mut(kind);
            let before = pile.len();
            *pile = pile.iter().filter(|c| seen.insert(c.instance_id)).cloned().collect();
            dropped += before - pile.len();
        }
        dropped
    }

    fn take_from_hand(&mut self, id: InstanceId) -> Result<CardInstance, PileError> {
        let index = self
            .hand
            .iter()
            .position(|c| c.instance_id == id)
            .ok_or(PileError::NotInHand(id))?;
        Ok(self.hand.remove(index))
    }
}
