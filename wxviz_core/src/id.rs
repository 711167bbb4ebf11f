// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Stable identity of a mark across frames.
///
/// Scalar marks (a title, an axis line) use small hand-picked ids via [`MarkId::from_raw`].
/// Per-row marks (one dot per observation, one bar per bin) use [`MarkId::for_row`], which
/// places the row key in the low 32 bits and the namespace above them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives a per-row id from a namespace and a row key.
    ///
    /// Namespaces must be non-zero to stay clear of scalar ids.
    pub const fn for_row(namespace: u64, row_key: u64) -> Self {
        Self((namespace << 32) | (row_key & 0xFFFF_FFFF))
    }

    /// Returns the row key of a per-row id.
    pub const fn row_key(self) -> u64 {
        self.0 & 0xFFFF_FFFF
    }

    /// Returns the namespace of a per-row id (`0` for scalar ids).
    pub const fn namespace(self) -> u64 {
        self.0 >> 32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_ids_round_trip_namespace_and_key() {
        let id = MarkId::for_row(0x20, 7);
        assert_eq!(id.namespace(), 0x20);
        assert_eq!(id.row_key(), 7);
        assert_ne!(id, MarkId::from_raw(7));
    }
}
