//! Ephemeral completion markers ("floating hearts").
//!
//! # Invariants
//! - Every marker expires exactly `ttl` after its own spawn time.
//! - Spawning never extends or resets existing markers.
//! - Marker ids are unique per board.
//! - A board never holds markers that expired before its latest spawn.

use std::time::{Duration, Instant};

/// One active celebration marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelebrationMarker {
    pub id: String,
    /// `None` when `ttl` reaches past the representable clock range.
    pub expires_at: Option<Instant>,
}

impl CelebrationMarker {
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Set of live markers, pruned by sweeping.
#[derive(Debug, Clone)]
pub struct CelebrationBoard {
    ttl: Duration,
    next_seq: u64,
    markers: Vec<CelebrationMarker>,
}

impl CelebrationBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_seq: 0,
            markers: Vec::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Adds a marker that expires `ttl` after `now` and returns its id.
    ///
    /// Markers already expired at `now` are dropped first.
    pub fn spawn(&mut self, now: Instant) -> String {
        self.sweep(now);
        self.next_seq += 1;
        let id = format!("heart-{}", self.next_seq);
        self.markers.push(CelebrationMarker {
            id: id.clone(),
            expires_at: now.checked_add(self.ttl),
        });
        id
    }

    /// Drops expired markers; returns how many were removed.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.markers.len();
        self.markers.retain(|marker| !marker.is_expired(now));
        before - self.markers.len()
    }

    /// Ids of markers still live at `now`, in spawn order.
    pub fn active(&self, now: Instant) -> Vec<String> {
        self.markers
            .iter()
            .filter(|marker| !marker.is_expired(now))
            .map(|marker| marker.id.clone())
            .collect()
    }

    /// Markers held, including any expired but not yet swept.
    pub fn markers(&self) -> &[CelebrationMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
