// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained mark scene for `wxviz` charts.
//!
//! Chart code computes a complete set of [`Mark`]s for every frame. A [`Scene`] keeps the
//! previous frame and turns each new mark set into a list of [`MarkDiff`]s:
//! - marks with a new [`MarkId`] **enter**,
//! - marks whose payload or z-index changed **update**,
//! - marks that are no longer emitted **exit**.
//!
//! Display backends apply the diffs in place, so an element keeps its identity across
//! redraws. That identity is what makes positional [`Transition`]s continuous: a transition
//! is attached to a mark id, and starting a new one on the same id replaces the old one.
//!
//! Marks are plain data (constant geometry and paint); there is no dataflow here.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod builder;
mod diff;
mod id;
mod mark;
mod scene;
mod transition;

pub use builder::MarkBuilder;
pub use diff::MarkDiff;
pub use id::MarkId;
pub use mark::{
    Mark, MarkKind, MarkPayload, PathPayload, RectPayload, TextAnchor, TextBaseline, TextPayload,
};
pub use scene::Scene;
pub use transition::{Easing, Transition};
