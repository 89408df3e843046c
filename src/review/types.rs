use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// The part of the review server's issue document this tool cares about.
///
/// Decoding is lenient the way review servers have always been read: a `null` document or a
/// `null` value leaves `closed` false, the key matches case-insensitively, and when the key
/// appears more than once the last non-null value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssueStatus {
    pub closed: bool,
}

const CLOSED_FIELD: &str = "closed";

struct IssueStatusVisitor;

impl<'de> Visitor<'de> for IssueStatusVisitor {
    type Value = IssueStatus;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an issue object or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<IssueStatus, E> {
        Ok(IssueStatus::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<IssueStatus, E> {
        Ok(IssueStatus::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<IssueStatus, D::Error> {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<IssueStatus, A::Error> {
        let mut status = IssueStatus::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case(CLOSED_FIELD) {
                if let Some(closed) = map.next_value::<Option<bool>>()? {
                    status.closed = closed;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(status)
    }
}

impl<'de> Deserialize<'de> for IssueStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(IssueStatusVisitor)
    }
}
