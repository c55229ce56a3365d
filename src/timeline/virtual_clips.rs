//! Virtual clip overlap-resolution engine.
//!
//! A track's clips may be inserted at arbitrary, possibly overlapping offsets.
//! This collection incrementally maintains the non-overlapping, time-ordered
//! projection of "what actually plays when": later insertions win, earlier
//! material is trimmed, split, or removed to make room.
//!
//! Boundary convention (fixed contract): clips that exactly abut are not
//! overlapping, while an exactly equal range fully occludes — the strict and
//! non-strict comparisons below are deliberate and must not be unified.

use std::cmp::Ordering;

use crate::core::time::Seconds;
use crate::timeline::clip::{Clip, ClipId};

/// A derived entry representing one conflict-free span of playback.
///
/// Never created directly by callers; the resolution algorithm creates,
/// mutates, and destroys entries in response to clip insertions on the track.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualClip {
    /// Position on the timeline, seconds.
    pub offset: Seconds,
    /// Playing length, seconds.
    pub duration: Seconds,
    /// Offset into the source media at which playback begins.
    pub media_start: Seconds,
    /// The source clip this entry currently represents. Name/metadata lookup
    /// only, never ownership.
    pub source: ClipId,
}

impl VirtualClip {
    pub fn end(&self) -> Seconds {
        self.offset + self.duration
    }
}

/// The non-overlapping projection of a track's clips.
///
/// Invariant: entries are sorted ascending by offset and pairwise
/// non-overlapping — `entries[i].end() <= entries[i + 1].offset` for all i.
#[derive(Debug, Clone, Default)]
pub struct VirtualClipCollection {
    entries: Vec<VirtualClip>,
}

impl VirtualClipCollection {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Resolve a newly inserted clip against every current entry.
    ///
    /// Scans a snapshot of the entries, applying exactly one case per entry:
    /// full occlusion (remove), containment (split into front and tail
    /// remainders), left overlap (trim front), right overlap (trim tail), or
    /// no overlap. Exact abutment is no overlap; an exactly equal range is
    /// occlusion, so the later clip's media start and back-reference win.
    /// Afterwards the new clip's own entry is appended and the sequence is
    /// re-sorted by offset.
    pub fn add(&mut self, clip: &Clip) {
        let new_start = clip.offset();
        let new_end = clip.end();

        let snapshot = std::mem::take(&mut self.entries);
        for mut entry in snapshot {
            let cur_start = entry.offset;
            let cur_end = entry.end();

            if cur_start >= new_start && cur_end <= new_end {
                // Full occlusion: the new clip supersedes this entry entirely.
                continue;
            } else if cur_start < new_start && cur_end > new_end {
                // Full containment: keep the front remainder, spawn the tail.
                let tail = VirtualClip {
                    offset: new_end,
                    duration: cur_end - new_end,
                    media_start: entry.media_start + (new_end - cur_start),
                    source: entry.source,
                };
                entry.duration = new_start - cur_start;
                self.entries.push(entry);
                self.entries.push(tail);
            } else if new_start <= cur_start && new_end < cur_end && new_end > cur_start {
                // Left overlap: the remainder starts where the new clip ends.
                let delta = new_end - cur_start;
                entry.duration -= delta;
                entry.offset += delta;
                entry.media_start += delta;
                self.entries.push(entry);
            } else if new_start > cur_start && new_start < cur_end && new_end >= cur_end {
                // Right overlap: trim the tail, offset and media start keep.
                entry.duration -= cur_end - new_start;
                self.entries.push(entry);
            } else {
                // No overlap (exact abutment lands here).
                self.entries.push(entry);
            }
        }

        self.entries.push(VirtualClip {
            offset: new_start,
            duration: clip.duration(),
            media_start: clip.media_start(),
            source: clip.id(),
        });

        // Comparison is by offset only; an undefined operand orders last.
        self.entries
            .sort_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap_or(Ordering::Greater));
    }

    /// Entries in playback order.
    pub fn iter(&self) -> std::slice::Iter<'_, VirtualClip> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VirtualClip> {
        self.entries.get(index)
    }

    /// The entry playing at a timeline position, if any.
    pub fn at(&self, position: Seconds) -> Option<&VirtualClip> {
        self.entries
            .iter()
            .find(|e| position >= e.offset && position < e.end())
    }
}

impl<'a> IntoIterator for &'a VirtualClipCollection {
    type Item = &'a VirtualClip;
    type IntoIter = std::slice::Iter<'a, VirtualClip>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
