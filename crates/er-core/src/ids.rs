//! Strongly typed, string-backed identifier wrappers.
//!
//! Identifiers arrive from the service layer as opaque strings (`"P000042"`,
//! `"TRT3F9A0C11B2E4"`, `"ROOM-101"`).  Wrapping them keeps a patient id
//! from being passed where a room id is expected.  All ids are
//! `Clone + Ord + Hash` so they work as map keys and sort keys, and
//! `Borrow<str>` so maps keyed by them can be queried with a plain `&str`.

use std::borrow::Borrow;
use std::fmt;

/// Generate a typed ID wrapper around a `String`.
macro_rules! string_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifier of a patient, assigned by the intake service or generated
    /// by the triage scheduler as a `P000001`-style fallback.
    pub struct PatientId;
}

string_id! {
    /// Identifier of one recorded treatment action (`TRT` + 12 hex chars).
    pub struct ActionId;
}

string_id! {
    /// Identifier of a room, piece of equipment, provider, staff member, or
    /// any other vertex in the resource graph.
    pub struct ResourceId;
}

impl From<PatientId> for ResourceId {
    /// Patients appear as vertices in the resource graph once they are
    /// assigned a room or provider.
    fn from(id: PatientId) -> Self {
        ResourceId(id.0)
    }
}
