//! Identifier newtypes for geodata entities.
//!
//! Node and relation ids share the same numeric space in most geodata
//! exports; keeping them as distinct types prevents mixing them up when
//! walking relation memberships.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub fn raw(self) -> i64 {
                self.0
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
    };
}

impl_identifier!(NodeId);
impl_identifier!(RelationId);
