//! Playback queue
//!
//! Ordered list of tracks with a pointer to the current entry. The pointer
//! is an instance id rather than a track id because the same track may be
//! queued more than once.

use crate::types::{QueueSnapshot, Track};
use tracing::{debug, warn};

/// Playback queue owned by the controller
#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// Tracks in play order
    tracks: Vec<Track>,

    /// Instance id of the current entry
    current: Option<String>,

    /// Index the host should start playing from
    play_index: usize,

    /// Set when the last load wiped prior entries
    clear: bool,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Load tracks into the queue
    ///
    /// With `clear_existing` the queue is replaced, otherwise the tracks are
    /// appended. `start_index` is relative to `tracks` and is clamped to the
    /// loaded range.
    pub fn load(&mut self, tracks: Vec<Track>, start_index: usize, clear_existing: bool) {
        if clear_existing {
            self.tracks.clear();
            self.current = None;
        }

        let offset = self.tracks.len();
        let loaded = tracks.len();
        self.tracks.extend(tracks);
        self.clear = clear_existing;

        if loaded == 0 {
            debug!(clear_existing, "Loaded empty track list");
            if clear_existing {
                self.play_index = 0;
            }
            return;
        }

        let start = if start_index >= loaded {
            warn!(start_index, loaded, "Start index out of range, starting at last track");
            loaded - 1
        } else {
            start_index
        };

        self.play_index = offset + start;
        self.current = Some(self.tracks[self.play_index].instance_id.clone());

        debug!(
            loaded,
            total = self.tracks.len(),
            play_index = self.play_index,
            clear_existing,
            "Loaded tracks into queue"
        );
    }

    /// Adopt an order produced by the playback engine (drag-reorder, removal)
    ///
    /// The current pointer survives when its entry is still present.
    pub fn sync_from_external_reorder(&mut self, new_order: Vec<Track>) {
        self.tracks = new_order;
        self.clear = false;

        let position = self.current.as_deref().and_then(|id| self.position_of(id));
        match position {
            Some(index) => self.play_index = index,
            None => {
                self.current = None;
                self.play_index = 0;
            }
        }

        debug!(
            total = self.tracks.len(),
            play_index = self.play_index,
            "Synced queue from external reorder"
        );
    }

    /// Point the queue at the entry with `instance_id`
    ///
    /// Returns `false` and leaves the pointer untouched if no entry matches.
    pub fn set_current(&mut self, instance_id: &str) -> bool {
        match self.position_of(instance_id) {
            Some(index) => {
                self.play_index = index;
                self.current = Some(instance_id.to_string());
                true
            }
            None => false,
        }
    }

    /// Entry following the one with `current_instance_id`
    ///
    /// `None` when nothing matches or the match is the last entry.
    pub fn next_track(&self, current_instance_id: &str) -> Option<&Track> {
        let index = self.position_of(current_instance_id)?;
        self.tracks.get(index + 1)
    }

    /// Entry following the current one
    pub fn peek_next(&self) -> Option<&Track> {
        self.current.as_deref().and_then(|id| self.next_track(id))
    }

    /// Current entry
    pub fn current(&self) -> Option<&Track> {
        self.current
            .as_deref()
            .and_then(|id| self.position_of(id))
            .map(|index| &self.tracks[index])
    }

    /// Position of the entry with `instance_id`
    pub fn position_of(&self, instance_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.instance_id == instance_id)
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
        self.play_index = 0;
        self.clear = false;
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in play order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether the last load wiped prior entries
    pub fn is_clear(&self) -> bool {
        self.clear
    }

    /// Index the host should be playing
    pub fn play_index(&self) -> usize {
        self.play_index
    }

    /// Snapshot for the presentation layer
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            tracks: self.tracks.clone(),
            play_index: self.play_index,
            current: self.current.clone(),
            clear: self.clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: &str) -> Track {
        let mut track = Track::new(id, format!("Track {}", id), format!("/stream/{}", id));
        track.instance_id = format!("uuid-{}", id);
        track
    }

    fn abc() -> Vec<Track> {
        vec![
            create_test_track("1"),
            create_test_track("2"),
            create_test_track("3"),
        ]
    }

    #[test]
    fn create_empty_queue() {
        let queue = Queue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(queue.current().is_none());
    }

    #[test]
    fn load_with_clear_replaces() {
        let mut queue = Queue::new();
        queue.load(abc(), 0, true);
        queue.load(vec![create_test_track("9")], 0, true);

        assert_eq!(queue.len(), 1);
        assert!(queue.is_clear());
        assert_eq!(queue.current().unwrap().id, "9");
    }

    #[test]
    fn load_without_clear_appends() {
        let mut queue = Queue::new();
        queue.load(abc(), 1, true);
        queue.load(vec![create_test_track("4"), create_test_track("5")], 1, false);

        assert_eq!(queue.len(), 5);
        assert!(!queue.is_clear());
        assert_eq!(queue.play_index(), 4);
        assert_eq!(queue.current().unwrap().id, "5");
    }

    #[test]
    fn load_clamps_start_index() {
        let mut queue = Queue::new();
        queue.load(abc(), 10, true);

        assert_eq!(queue.play_index(), 2);
        assert_eq!(queue.current().unwrap().id, "3");
    }

    #[test]
    fn next_track_by_instance() {
        let mut queue = Queue::new();
        queue.load(abc(), 0, true);

        assert_eq!(queue.next_track("uuid-2").unwrap().id, "3");
        assert!(queue.next_track("uuid-3").is_none());
        assert!(queue.next_track("uuid-99").is_none());
    }

    #[test]
    fn next_track_distinguishes_duplicates() {
        let a = create_test_track("1");
        let mut a_again = a.reinstanced();
        a_again.instance_id = "uuid-1b".to_string();
        let b = create_test_track("2");

        let mut queue = Queue::new();
        queue.load(vec![a, b, a_again], 0, true);

        assert_eq!(queue.next_track("uuid-1").unwrap().id, "2");
        assert!(queue.next_track("uuid-1b").is_none());
    }

    #[test]
    fn sync_keeps_current_pointer() {
        let mut queue = Queue::new();
        queue.load(abc(), 1, true);

        let mut reordered = abc();
        reordered.reverse();
        queue.sync_from_external_reorder(reordered);

        assert!(!queue.is_clear());
        assert_eq!(queue.current().unwrap().id, "2");
        assert_eq!(queue.play_index(), 1);
        assert_eq!(queue.peek_next().unwrap().id, "1");
    }

    #[test]
    fn sync_drops_removed_current() {
        let mut queue = Queue::new();
        queue.load(abc(), 1, true);

        queue.sync_from_external_reorder(vec![create_test_track("1"), create_test_track("3")]);

        assert!(queue.current().is_none());
        assert_eq!(queue.play_index(), 0);
    }

    #[test]
    fn set_current_unknown_is_ignored() {
        let mut queue = Queue::new();
        queue.load(abc(), 0, true);

        assert!(!queue.set_current("uuid-42"));
        assert_eq!(queue.current().unwrap().id, "1");

        assert!(queue.set_current("uuid-3"));
        assert_eq!(queue.play_index(), 2);
    }

    #[test]
    fn clear_queue() {
        let mut queue = Queue::new();
        queue.load(abc(), 0, true);

        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.current().is_none());
        assert_eq!(queue.snapshot(), QueueSnapshot::default());
    }
}
