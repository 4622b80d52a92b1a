//! Winner selection
//!
//! Draws one winner uniformly, or a uniformly random ranked list of
//! winners, from the contacts present when the round resolves.

use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::contact::{Contact, ContactId, ContactSet};

/// Default dwell delay before a draw starts
pub const DEFAULT_DWELL: Duration = Duration::from_millis(3000);

/// Default delay between the start of a draw and the result
pub const DEFAULT_PRE_RESOLUTION: Duration = Duration::from_millis(800);

/// Largest winner count offered to players
pub const MAX_WINNERS: u32 = 4;

/// Rules for one chooser round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    required_winners: u32,
    rank_winners: bool,
    dwell: Duration,
    pre_resolution: Duration,
}

impl SessionConfig {
    /// Creates a config with the default delays
    ///
    /// `required_winners` is raised to 1 if zero.
    pub fn new(required_winners: u32, rank_winners: bool) -> Self {
        Self {
            required_winners: required_winners.max(1),
            rank_winners,
            dwell: DEFAULT_DWELL,
            pre_resolution: DEFAULT_PRE_RESOLUTION,
        }
    }

    /// Builder method to set the dwell delay
    pub fn with_dwell(mut self, dwell: Duration) -> Self {
        self.dwell = dwell;
        self
    }

    /// Builder method to set the pre-resolution delay
    pub fn with_pre_resolution(mut self, pre_resolution: Duration) -> Self {
        self.pre_resolution = pre_resolution;
        self
    }

    pub fn required_winners(&self) -> u32 {
        self.required_winners
    }

    pub fn rank_winners(&self) -> bool {
        self.rank_winners
    }

    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    pub fn pre_resolution(&self) -> Duration {
        self.pre_resolution
    }

    /// Number of contacts needed before the dwell timer arms
    pub fn arm_threshold(&self) -> usize {
        self.required_winners as usize + 1
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(1, false)
    }
}

/// Snapshot of a winning contact at resolution time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub id: ContactId,
    pub position: [f32; 2],
}

impl From<&Contact> for Winner {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            position: contact.position,
        }
    }
}

/// A winner with its 1-based rank
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedWinner {
    pub rank: usize,
    pub winner: Winner,
}

/// Result of a resolved round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    /// One unranked winner
    Single(Winner),
    /// Winners ordered by rank, starting at 1
    Ranked(Vec<RankedWinner>),
}

impl SelectionOutcome {
    /// Winners in rank order (a single winner yields one entry)
    pub fn winners(&self) -> Vec<Winner> {
        match self {
            Self::Single(winner) => vec![*winner],
            Self::Ranked(ranked) => ranked.iter().map(|r| r.winner).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Ranked(ranked) => ranked.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: ContactId) -> bool {
        match self {
            Self::Single(winner) => winner.id == id,
            Self::Ranked(ranked) => ranked.iter().any(|r| r.winner.id == id),
        }
    }

    /// Rank of `id`, if it won a ranked round
    pub fn rank_of(&self, id: ContactId) -> Option<usize> {
        match self {
            Self::Single(_) => None,
            Self::Ranked(ranked) => ranked.iter().find(|r| r.winner.id == id).map(|r| r.rank),
        }
    }
}

/// Draws the winners of a round
///
/// # Panics
/// Panics if `contacts` is empty; the session never resolves without contacts.
pub fn select_winners<R: Rng + ?Sized>(
    contacts: &ContactSet,
    config: &SessionConfig,
    rng: &mut R,
) -> SelectionOutcome {
    assert!(
        !contacts.is_empty(),
        "select_winners called with an empty contact set"
    );

    let mut order = contacts.to_vec();

    if !config.rank_winners() {
        let index = rng.random_range(0..order.len());
        return SelectionOutcome::Single(Winner::from(&order[index]));
    }

    let num_winners = (config.required_winners() as usize).min(order.len());

    // Fisher-Yates over the whole set, then keep the leading ranks
    order.shuffle(rng);

    let ranked = order
        .iter()
        .take(num_winners)
        .enumerate()
        .map(|(index, contact)| RankedWinner {
            rank: index + 1,
            winner: Winner::from(contact),
        })
        .collect();

    SelectionOutcome::Ranked(ranked)
}
