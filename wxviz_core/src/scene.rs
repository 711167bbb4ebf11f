// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained scene.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Vec2;
use smallvec::SmallVec;

use crate::diff::MarkDiff;
use crate::id::MarkId;
use crate::mark::Mark;
use crate::transition::Transition;

/// Retained marks plus the transitions currently attached to them.
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Mark>,
    transitions: HashMap<MarkId, Transition>,
    frame: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the retained mark set with `marks` and returns the resulting diffs.
    ///
    /// Diffs are ordered: exits (by id), then enters and updates in emission order. If the
    /// same id is emitted twice in one frame, the last one wins. Exiting marks drop their
    /// transitions.
    pub fn tick(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        self.frame += 1;

        let mut next: HashMap<MarkId, Mark> = HashMap::new();
        let mut order: Vec<MarkId> = Vec::new();
        for mark in marks {
            let id = mark.id;
            if next.insert(id, mark).is_none() {
                order.push(id);
            }
        }

        let mut out = Vec::new();

        let mut exits: SmallVec<[MarkId; 8]> = self
            .marks
            .keys()
            .copied()
            .filter(|id| !next.contains_key(id))
            .collect();
        exits.sort_unstable();
        for id in exits {
            if let Some(old) = self.marks.remove(&id) {
                self.transitions.remove(&id);
                out.push(MarkDiff::Exit {
                    id,
                    kind: old.kind,
                    bounds: old.bounds(),
                    old: Box::new(old.payload),
                });
            }
        }

        for id in order {
            let Some(new) = next.remove(&id) else {
                continue;
            };
            match self.marks.get(&id) {
                None => out.push(MarkDiff::Enter {
                    id,
                    kind: new.kind,
                    z_index: new.z_index,
                    class: new.class,
                    bounds: new.bounds(),
                    new: Box::new(new.payload.clone()),
                }),
                Some(old) if old.payload != new.payload || old.z_index != new.z_index => {
                    out.push(MarkDiff::Update {
                        id,
                        kind: new.kind,
                        old_z_index: old.z_index,
                        new_z_index: new.z_index,
                        class: new.class,
                        old_bounds: old.bounds(),
                        new_bounds: new.bounds(),
                        old: Box::new(old.payload.clone()),
                        new: Box::new(new.payload.clone()),
                    });
                }
                Some(_) => {}
            }
            self.marks.insert(id, new);
        }

        log::trace!("scene frame {}: {} diffs", self.frame, out.len());
        out
    }

    /// Number of frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Returns a retained mark.
    pub fn mark(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    /// Number of retained marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if no marks are retained.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Returns retained marks in paint order (`z_index`, then id).
    pub fn sorted(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.values().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Attaches a transition to a retained mark.
    ///
    /// Any transition already running on that mark is superseded and returned. Transitions
    /// on ids that are not retained are ignored and `None` is returned.
    pub fn start_transition(&mut self, id: MarkId, transition: Transition) -> Option<Transition> {
        if !self.marks.contains_key(&id) {
            log::debug!("ignoring transition for unknown mark {id:?}");
            return None;
        }
        self.transitions.insert(id, transition)
    }

    /// Returns the transition attached to a mark, if any.
    pub fn transition(&self, id: MarkId) -> Option<&Transition> {
        self.transitions.get(&id)
    }

    /// Returns the paint-time offset of a mark at `now_ms` (zero when not animating).
    pub fn offset_at(&self, id: MarkId, now_ms: f64) -> Vec2 {
        self.transitions
            .get(&id)
            .map_or(Vec2::ZERO, |t| t.offset_at(now_ms))
    }

    /// Drops transitions that have finished by `now_ms`; returns how many were dropped.
    pub fn retire_transitions(&mut self, now_ms: f64) -> usize {
        let before = self.transitions.len();
        self.transitions.retain(|_, t| !t.is_finished(now_ms));
        before - self.transitions.len()
    }
}
