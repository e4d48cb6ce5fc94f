use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Epoch-millisecond timestamp carried by every update.
pub type Timestamp = u64;

/// Well-known allocation namespaces. The namespace is metadata recorded next to
/// each allocated identifier; it does not partition the number space.
pub mod namespaces {
    pub const THREAD: &str = "thread";
    pub const MESSAGE: &str = "message";
    pub const ENTRY: &str = "entry";
    pub const UPDATE: &str = "update";
    pub const USER: &str = "user";
}

/// Globally unique identifier issued by a [`SequenceStore`](crate::SequenceStore).
///
/// Stored numerically, but rendered and serialized as its decimal string since
/// that is the form clients and the wire format use.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SequenceId(pub u64);

impl SequenceId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SequenceId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for SequenceId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SequenceId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SequenceId {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let raw = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
