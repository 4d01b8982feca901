//! Round-robin turn scheduling for discussions

use crate::core::error::DomainError;
use crate::core::participant::Participant;

/// Yields speakers in rotation until every participant has used its cap.
///
/// A participant that has reached the cap is skipped without consuming a
/// turn, so the total never exceeds `cap × participants`.
#[derive(Debug, Clone)]
pub struct TurnScheduler {
    participants: Vec<Participant>,
    cap: usize,
    counts: Vec<usize>,
    cursor: usize,
    issued: usize,
}

impl TurnScheduler {
    pub const MIN_PARTICIPANTS: usize = 2;
    pub const DEFAULT_CAP: usize = 5;

    pub fn new(participants: Vec<Participant>, cap: usize) -> Result<Self, DomainError> {
        if participants.len() < Self::MIN_PARTICIPANTS {
            return Err(DomainError::NotEnoughParticipants {
                required: Self::MIN_PARTICIPANTS,
                actual: participants.len(),
            });
        }
        for (i, p) in participants.iter().enumerate() {
            if participants[..i].contains(p) {
                return Err(DomainError::DuplicateParticipant(p.to_string()));
            }
        }

        let counts = vec![0; participants.len()];
        Ok(Self {
            participants,
            cap,
            counts,
            cursor: 0,
            issued: 0,
        })
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Maximum number of turns this scheduler will ever issue
    pub fn ceiling(&self) -> usize {
        self.cap * self.participants.len()
    }

    /// Next speaker, or `None` once the ceiling is reached or everyone is capped
    pub fn next_turn(&mut self) -> Option<Participant> {
        if self.issued >= self.ceiling() {
            return None;
        }

        let n = self.participants.len();
        for offset in 0..n {
            let idx = (self.cursor + offset) % n;
            if self.counts[idx] < self.cap {
                self.counts[idx] += 1;
                self.cursor = (idx + 1) % n;
                self.issued += 1;
                return Some(self.participants[idx]);
            }
        }
        None
    }
}

impl Iterator for TurnScheduler {
    type Item = Participant;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_turn()
    }
}
