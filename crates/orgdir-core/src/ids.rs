//! Identifier types for the directory.
//!
//! Every entity is keyed by a database surrogate key (`BIGINT`/`INTEGER`
//! autoincrement). The newtypes below keep organization, building and
//! activity keys from being mixed up while serializing as bare integers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define an integer surrogate-key identifier type.
///
/// Generates a newtype wrapper around `i64` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - `Serialize`, `Deserialize` (as a bare integer)
/// - `Display`, `Debug`
/// - `From<i64>`, `Into<i64>`
macro_rules! int_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create an identifier from a raw key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Return the raw key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

int_id_type!(OrganizationId, "An organization identifier.");
int_id_type!(BuildingId, "A building identifier.");
int_id_type!(ActivityId, "An activity (business category) identifier.");
