//! Balanced random selection over a roster of participants.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::core::participant::Participant;

/// Typed failures of the polling engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("roster has no participants")]
    EmptyRoster,
    #[error("session halted")]
    SessionHalted,
    #[error("no active selection (call next first)")]
    NoActiveSelection,
}

/// Caller-reported outcome for the current selection.
///
/// Every outcome increments the participant's `polled` counter; all but
/// `Missing` also increment the matching category counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Attempted,
    Excused,
    Missing,
}

/// Pull-based participant selector that keeps call counts balanced.
///
/// The poller owns the canonical roster and a working set of indices into it.
/// Each pass shuffles the working set and stable-sorts it by ascending
/// `polled`, so the globally least-polled participants come first while equal
/// counts keep a random relative order. [`Poller::next`] walks the working
/// set; the moment it would step onto a participant already polled more than
/// the least-polled participant was at pass start, it begins a fresh pass
/// instead. The sequence never terminates on its own: exhaustion reshuffles,
/// and only [`Poller::halt`] ends a session.
#[derive(Debug)]
pub struct Poller {
    roster: Vec<Participant>,
    order: Vec<usize>,
    cursor: Option<usize>,
    floor: u32,
    total_polled: u32,
    halted: bool,
    rng: StdRng,
}

impl Poller {
    /// Poller over `roster` with an entropy-seeded shuffle.
    pub fn new(roster: Vec<Participant>) -> Result<Self, PollError> {
        Self::with_rng(roster, StdRng::from_entropy())
    }

    /// Poller over `roster` with a fixed shuffle seed (reproducible order).
    pub fn with_seed(roster: Vec<Participant>, seed: u64) -> Result<Self, PollError> {
        Self::with_rng(roster, StdRng::seed_from_u64(seed))
    }

    fn with_rng(roster: Vec<Participant>, rng: StdRng) -> Result<Self, PollError> {
        if roster.is_empty() {
            return Err(PollError::EmptyRoster);
        }
        Ok(Self {
            roster,
            order: Vec::new(),
            cursor: None,
            floor: 0,
            total_polled: 0,
            halted: false,
            rng,
        })
    }

    /// Start a fresh pass over the roster.
    ///
    /// Shuffles the working set, then stable-sorts it by ascending `polled`
    /// (equal counts keep their shuffled relative order). Clears the cursor
    /// and re-arms a halted session. [`Poller::next`] calls this on demand,
    /// so callers only need it to resume after [`Poller::halt`].
    pub fn begin_pass(&mut self) {
        self.order = (0..self.roster.len()).collect();
        self.order.shuffle(&mut self.rng);
        let roster = &self.roster;
        self.order.sort_by_key(|&at| roster[at].polled);
        self.floor = roster[self.order[0]].polled;
        self.cursor = None;
        self.halted = false;
    }

    /// Advance to the next participant to question and return their name.
    ///
    /// Begins a new pass when the working set is exhausted or when the next
    /// participant has already been polled more than the pass floor, so no
    /// one is selected twice before everyone has caught up.
    pub fn next(&mut self) -> Result<String, PollError> {
        if self.halted {
            return Err(PollError::SessionHalted);
        }
        let mut at = match self.cursor {
            Some(at) => at + 1,
            None => 0,
        };
        if at >= self.order.len() || self.roster[self.order[at]].polled > self.floor {
            self.begin_pass();
            at = 0;
        }
        self.cursor = Some(at);
        Ok(self.roster[self.order[at]].name.clone())
    }

    /// Record `outcome` for the current selection.
    pub fn record(&mut self, outcome: Outcome) -> Result<(), PollError> {
        let at = self.cursor.ok_or(PollError::NoActiveSelection)?;
        let participant = &mut self.roster[self.order[at]];
        participant.polled += 1;
        match outcome {
            Outcome::Correct => participant.correct += 1,
            Outcome::Attempted => participant.attempted += 1,
            Outcome::Excused => participant.excused += 1,
            Outcome::Missing => {}
        }
        self.total_polled += 1;
        Ok(())
    }

    /// Name of the current selection, without advancing.
    pub fn current(&self) -> Result<&str, PollError> {
        let at = self.cursor.ok_or(PollError::NoActiveSelection)?;
        Ok(&self.roster[self.order[at]].name)
    }

    /// End the session: subsequent [`Poller::next`] calls fail until a new
    /// pass begins. The active selection is cleared, so outcomes can no
    /// longer be recorded against it.
    pub fn halt(&mut self) {
        self.halted = true;
        self.cursor = None;
    }

    /// Total outcomes recorded since the poller was created.
    pub fn total_polled(&self) -> u32 {
        self.total_polled
    }

    /// Canonical roster view, in load order, for storage to persist.
    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }
}
