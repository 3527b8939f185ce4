use crate::config::DrawConfig;
use crate::error::{DrawError, DrawResult};
use crate::participant::{Participant, ParticipantId};
use crate::random::{self, RandomSource};

/// The participant universe, partitioned into participants still eligible
/// for drawing and participants already drawn.
///
/// `remaining` and `history` are disjoint and together hold exactly the
/// participants of `all`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    all: Vec<Participant>,
    remaining: Vec<Participant>,
    history: Vec<Participant>,
    min_count: u32,
    max_count: u32,
    name_prefix: String,
}

impl Pool {
    /// Creates an empty pool using the participant bounds and naming of `config`
    pub fn new(config: &DrawConfig) -> Self {
        Self {
            all: Vec::new(),
            remaining: Vec::new(),
            history: Vec::new(),
            min_count: config.min_participants,
            max_count: config.max_participants,
            name_prefix: config.name_prefix.clone(),
        }
    }

    /// All participants in insertion order
    pub fn all(&self) -> &[Participant] {
        &self.all
    }

    /// Participants that can still be drawn
    pub fn remaining(&self) -> &[Participant] {
        &self.remaining
    }

    /// Drawn participants, most recent last
    pub fn history(&self) -> &[Participant] {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    /// The most recently drawn participant
    pub fn last_drawn(&self) -> Option<&Participant> {
        self.history.last()
    }

    fn check_count(&self, count: u32) -> DrawResult<()> {
        if count < self.min_count || count > self.max_count {
            return Err(DrawError::InvalidCount {
                count,
                min: self.min_count,
                max: self.max_count,
            });
        }
        Ok(())
    }

    /// Replaces the pool with participants numbered `1..=count` and clears the history
    pub fn reset(&mut self, count: u32) -> DrawResult<()> {
        self.check_count(count)?;

        self.clear();
        self.all = (1..=count)
            .map(|id| Participant::numbered(ParticipantId(id), &self.name_prefix))
            .collect();
        self.remaining = self.all.clone();
        Ok(())
    }

    /// Appends `count` participants numbered after the highest existing id.
    ///
    /// Returns the newly created participants. History is left untouched.
    pub fn append_more(&mut self, count: u32) -> DrawResult<Vec<Participant>> {
        self.check_count(count)?;

        let base = self.all.iter().map(|p| p.id().get()).max().unwrap_or(0);
        let added: Vec<Participant> = (1..=count)
            .map(|offset| Participant::numbered(ParticipantId(base + offset), &self.name_prefix))
            .collect();

        self.all.extend(added.iter().cloned());
        self.remaining.extend(added.iter().cloned());
        Ok(added)
    }

    /// Removes one uniformly chosen participant from `remaining` and appends
    /// it to `history`
    pub fn draw(&mut self, rng: &mut dyn RandomSource) -> DrawResult<Participant> {
        if self.remaining.is_empty() {
            return Err(DrawError::PoolExhausted);
        }

        let index = random::uniform_index(rng, self.remaining.len());
        let drawn = self.remaining.remove(index);
        self.history.push(drawn.clone());
        Ok(drawn)
    }

    /// Moves a drawn participant back into `remaining`, which is then kept
    /// sorted by id
    pub fn return_to_pool(&mut self, id: ParticipantId) -> DrawResult<Participant> {
        if let Some(index) = self.history.iter().position(|p| p.id() == id) {
            let participant = self.history.remove(index);
            self.remaining.push(participant.clone());
            self.remaining.sort_by_key(Participant::id);
            return Ok(participant);
        }

        if self.remaining.iter().any(|p| p.id() == id) {
            Err(DrawError::AlreadyAvailable(id))
        } else {
            Err(DrawError::NotFound(id))
        }
    }

    /// Empties all three sequences
    pub fn clear(&mut self) {
        self.all.clear();
        self.remaining.clear();
        self.history.clear();
    }

    /// Overwrites the three sequences wholesale
    pub(crate) fn replace_contents(
        &mut self,
        all: Vec<Participant>,
        remaining: Vec<Participant>,
        history: Vec<Participant>,
    ) {
        self.all = all;
        self.remaining = remaining;
        self.history = history;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    #[test]
    fn draw_removes_the_scaled_index() {
        let mut pool = Pool::new(&DrawConfig::default());
        pool.reset(4).unwrap();
        // 0.6 * 4 = 2.4 -> index 2 -> id 3
        let drawn = pool.draw(&mut SequenceRandom::constant(0.6)).unwrap();
        assert_eq!(drawn.id(), ParticipantId(3));
        let remaining: Vec<u32> = pool.remaining().iter().map(|p| p.id().get()).collect();
        assert_eq!(remaining, vec![1, 2, 4]);
    }

    #[test]
    fn names_follow_prefix() {
        let config = DrawConfig {
            name_prefix: "Team".into(),
            ..DrawConfig::default()
        };
        let mut pool = Pool::new(&config);
        pool.reset(2).unwrap();
        assert_eq!(pool.all()[1].name(), "Team 2");
    }
}
