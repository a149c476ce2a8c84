use std::collections::VecDeque;

use crate::tile::TileId;

/// Queues behind the animated path.
///
/// `pending` holds the solved path not shown yet, `revealed` the tiles
/// currently drawn as path, `fading` the previous path waiting to be reset.
/// Reveal and fade are drained independently, at most one tile each per tick.
#[derive(Debug, Clone, Default)]
pub struct PathReveal {
    pending: VecDeque<TileId>,
    revealed: Vec<TileId>,
    fading: VecDeque<TileId>,
}

impl PathReveal {
    /// Queues a freshly solved path, ordered origin to goal.
    pub fn load(&mut self, path: impl IntoIterator<Item = TileId>) {
        self.pending.clear();
        self.pending.extend(path);
    }

    /// Takes the next tile from the origin end or the goal end and records it
    /// as revealed.
    pub fn next_reveal(&mut self, from_origin: bool) -> Option<TileId> {
        let tile = if from_origin {
            self.pending.pop_front()
        } else {
            self.pending.pop_back()
        }?;
        self.revealed.push(tile);
        Some(tile)
    }

    pub fn next_fade(&mut self) -> Option<TileId> {
        self.fading.pop_front()
    }

    /// Abandons the current path: what is shown starts fading, what is not
    /// shown yet is dropped. Tiles of an even older path still waiting to
    /// fade are handed back so the caller resets them at once.
    pub fn cancel(&mut self) -> Vec<TileId> {
        self.pending.clear();
        let stale: Vec<TileId> = self.fading.drain(..).collect();
        self.fading.extend(self.revealed.drain(..));
        stale
    }

    /// Drops the current path without fading. Returns the tiles that were
    /// shown so the caller can reset them now.
    pub fn clear(&mut self) -> Vec<TileId> {
        self.pending.clear();
        std::mem::take(&mut self.revealed)
    }

    pub fn reset(&mut self) {
        *self = PathReveal::default();
    }

    pub fn is_revealed(&self, tile: TileId) -> bool {
        self.revealed.contains(&tile)
    }

    pub fn is_revealing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn revealed(&self) -> &[TileId] {
        &self.revealed
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn fading_len(&self) -> usize {
        self.fading.len()
    }

    pub fn held(&self) -> usize {
        self.pending.len() + self.revealed.len() + self.fading.len()
    }
}
