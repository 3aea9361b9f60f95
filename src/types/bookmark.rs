use std::fmt;
use std::num::NonZeroU32;

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

/// Number of tag slots every bookmark carries.
pub const ROW_TAG_CAPACITY: usize = 8;
/// Maximum title length in characters.
pub const TITLE_MAX: usize = 63;
/// Maximum comment length in characters.
pub const COMMENT_MAX: usize = 256 - 1;
/// Maximum tag name length in characters.
pub const TAG_NAME_MAX: usize = 32 - 1;
/// Marker appended to text cut at its bound.
pub const ELLIPSIS: &str = "...";
/// On-disk timestamp layout, always 19 characters.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Identifier of a bookmark. Zero is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(NonZeroU32);

impl RowId {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Parses a user-supplied decimal ID. Signs, whitespace and zero are rejected.
    pub fn parse(token: &str) -> Option<Self> {
        parse_decimal(token).and_then(Self::new)
    }
}

impl From<NonZeroU32> for RowId {
    fn from(value: NonZeroU32) -> Self {
        Self(value)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a tag. Zero is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TagId(NonZeroU32);

impl TagId {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn parse(token: &str) -> Option<Self> {
        parse_decimal(token).and_then(Self::new)
    }
}

impl From<NonZeroU32> for TagId {
    fn from(value: NonZeroU32) -> Self {
        Self(value)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a string made only of ASCII digits.
pub(crate) fn parse_decimal(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Returned by [`TagSlots::insert`] when every slot is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotsFull;

/// Fixed-capacity, duplicate-free set of tag references kept in insertion order.
///
/// An empty slot is `None`; the on-disk form writes it as `"0"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSlots([Option<TagId>; ROW_TAG_CAPACITY]);

impl TagSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds slots from their raw positions. Returns `None` if a tag repeats.
    pub fn from_slots(slots: [Option<TagId>; ROW_TAG_CAPACITY]) -> Option<Self> {
        for (i, slot) in slots.iter().enumerate() {
            if let Some(id) = slot {
                if slots[i + 1..].contains(&Some(*id)) {
                    return None;
                }
            }
        }
        Some(Self(slots))
    }

    pub fn slots(&self) -> &[Option<TagId>; ROW_TAG_CAPACITY] {
        &self.0
    }

    /// Occupied slots in slot order.
    pub fn ids(&self) -> impl Iterator<Item = TagId> + '_ {
        self.0.iter().flatten().copied()
    }

    pub fn contains(&self, id: TagId) -> bool {
        self.0.contains(&Some(id))
    }

    pub fn len(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Places `id` in the first free slot and returns that slot's position.
    /// Inserting a tag that is already present returns its current position.
    pub fn insert(&mut self, id: TagId) -> Result<usize, SlotsFull> {
        if let Some(pos) = self.0.iter().position(|slot| *slot == Some(id)) {
            return Ok(pos);
        }
        let free = self.0.iter().position(Option::is_none).ok_or(SlotsFull)?;
        self.0[free] = Some(id);
        Ok(free)
    }

    /// Clears the slot holding `id`. Returns whether it was present.
    pub fn remove(&mut self, id: TagId) -> bool {
        match self.0.iter().position(|slot| *slot == Some(id)) {
            Some(pos) => {
                self.0[pos] = None;
                true
            }
            None => false,
        }
    }
}

/// A saved bookmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: RowId,
    pub url: String,
    pub title: String,
    /// Empty when the bookmark has no comment.
    pub comment: String,
    pub tags: TagSlots,
    pub updated_at: NaiveDateTime,
}

impl Row {
    /// Stamps the row with the current local time.
    pub fn touch(&mut self) {
        self.updated_at = now();
    }
}

/// A named label attachable to bookmarks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Cuts `text` to at most `max` characters, ending in [`ELLIPSIS`] when cut.
pub fn truncate_bounded(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let ellipsis_len = ELLIPSIS.chars().count();
    if max <= ellipsis_len {
        return text.chars().take(max).collect();
    }
    let mut cut: String = text.chars().take(max - ellipsis_len).collect();
    cut.push_str(ELLIPSIS);
    cut
}

/// Current local time, truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a timestamp in the exact `YYYY-MM-DD HH:MM:SS` layout.
///
/// The layout is checked byte by byte first because chrono accepts
/// unpadded fields.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let bytes = text.as_bytes();
    if bytes.len() != 19 {
        return None;
    }
    let layout_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b' ',
        13 | 16 => *b == b':',
        _ => b.is_ascii_digit(),
    });
    if !layout_ok {
        return None;
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}
