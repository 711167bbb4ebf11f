// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::boxed::Box;

use kurbo::Rect;

use crate::id::MarkId;
use crate::mark::{MarkKind, MarkPayload};

/// A change to the retained scene produced by [`crate::Scene::tick`].
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark id seen for the first time.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Paint order.
        z_index: i32,
        /// Role tag.
        class: Option<&'static str>,
        /// Bounds of the new payload, if known.
        bounds: Option<Rect>,
        /// The new payload.
        new: Box<MarkPayload>,
    },
    /// A retained mark whose payload or paint order changed.
    Update {
        /// Mark id.
        id: MarkId,
        /// Mark kind (of the new payload).
        kind: MarkKind,
        /// Previous paint order.
        old_z_index: i32,
        /// New paint order.
        new_z_index: i32,
        /// Role tag.
        class: Option<&'static str>,
        /// Bounds of the previous payload.
        old_bounds: Option<Rect>,
        /// Bounds of the new payload.
        new_bounds: Option<Rect>,
        /// The previous payload.
        old: Box<MarkPayload>,
        /// The new payload.
        new: Box<MarkPayload>,
    },
    /// A retained mark that was not emitted this frame.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Bounds of the removed payload.
        bounds: Option<Rect>,
        /// The removed payload.
        old: Box<MarkPayload>,
    },
}

impl MarkDiff {
    /// Returns the id of the mark this diff refers to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}
