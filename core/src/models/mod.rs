//! Typed records for the backend collections.
//!
//! Every record is coerced on ingress: ids are validated, dates parsed,
//! closed enumerations matched exactly, and list fields normalized.

/// Generates a closed string enumeration whose wire form is the exact
/// backend value.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The exact value stored by the backend.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $value, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| $crate::error::CoreError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub mod attachment;
pub mod blog;
pub mod coerce;
pub mod event;
pub mod user;

pub use attachment::Attachment;
pub use blog::{BlogCategory, BlogPost, BlogPostUpdate, BlogStatus, NewBlogPost};
pub use event::{Event, EventCategory, EventStats, EventStatus, EventType, NewEvent};
pub use user::User;

use crate::id::RecordId;

/// A record that lives in a backend collection and may carry files.
pub trait StoredRecord {
    /// Collection the record belongs to.
    const COLLECTION: &'static str;

    /// The record's id.
    fn record_id(&self) -> &RecordId;

    /// Stored filename for a file field, if the field exists and is set.
    fn file_name(&self, field: &str) -> Option<&str>;
}
