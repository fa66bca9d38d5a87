//! Framebuffer word addresses and byte selects.
//!
//! The simulator reports every pixel write as a word address (one
//! word holds four 8-bit pixels) together with an active-low byte
//! enable naming the pixel inside that word.

use serde::{ Serialize, Deserialize };
use std::fmt;
use crate::{ Error, Result, Point };

/// Width of the framebuffer in pixels.
pub const PIXELS: i64 = 640;

/// Largest word address representable in the canonical `0xxxx` form.
const CANONICAL_MAX: i64 = 0xffff;

/// Largest word address representable with five hex digits.
const WIDE_MAX: i64 = 0xfffff;

/// What to do with a word address that does not fit in the
/// canonical `0xxxx` form.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq,
         Serialize, Deserialize, clap::ValueEnum)]
pub enum OverflowPolicy {
    /// Reject negative values and values above `0xffff`.
    #[default]
    Strict,
    /// Keep the low 16 bits, as the old report generator did.
    Truncate,
    /// Allow a fifth significant hex digit (up to `0xfffff`).
    Widen,
}

impl OverflowPolicy {
    /// Convert a raw (possibly negative) word address under this
    /// policy.
    pub fn apply(self, value: i64) -> Result<WordAddr> {
        let limit = match self {
            OverflowPolicy::Truncate =>
                return Ok(WordAddr((value & CANONICAL_MAX) as u32)),
            OverflowPolicy::Strict => CANONICAL_MAX,
            OverflowPolicy::Widen => WIDE_MAX,
        };
        if (0..=limit).contains(&value) {
            Ok(WordAddr(value as u32))
        }
        else {
            Err(Error::AddressOverflow { value })
        }
    }
}

/// A validated word address.
///
/// Displays as five lowercase hex digits, which for any value up to
/// `0xffff` is the simulator's `0xxxx` form.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
         Serialize, Deserialize)]
pub struct WordAddr(pub u32);

impl fmt::Display for WordAddr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05x}", self.0)
    }
}

impl fmt::Debug for WordAddr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Parse a hexadecimal field, tolerating surrounding whitespace and
/// an optional `0x` prefix.
pub fn parse_hex(text: &str) -> Option<i64> {
    let t = text.trim();
    let t = t.strip_prefix("0x")
        .or_else(|| t.strip_prefix("0X"))
        .unwrap_or(t);
    if t.is_empty() {
        return None
    }
    i64::from_str_radix(t, 16).ok()
}

/// Read a hex word address as printed by the simulator and bring it
/// to canonical form.
///
/// Canonical strings map to themselves.
pub fn canonicalize(text: &str, policy: OverflowPolicy) -> Result<WordAddr> {
    let value = parse_hex(text)
        .ok_or_else(|| Error::NotHex(text.to_string()))?;
    policy.apply(value)
}

/// Word address of pixel `(x, y)`, before any overflow policy.
///
/// Arithmetic shift, so pixels left of or above the origin give
/// negative words.
#[inline]
pub fn raw_word_of(p: Point) -> i64 {
    (p.x + PIXELS * p.y) >> 2
}

/// Active-low byte enable selecting one pixel in a word.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash,
         Serialize, Deserialize)]
pub enum ByteSelect {
    /// `e` (1110)
    Byte0,
    /// `d` (1101)
    Byte1,
    /// `b` (1011)
    Byte2,
    /// `7` (0111)
    Byte3,
}

impl ByteSelect {
    /// Look up a simulator byte-select code. Only `e`, `d`, `b` and
    /// `7` are valid.
    pub fn from_code(code: &str) -> Option<ByteSelect> {
        use ByteSelect::*;
        match code {
            "e" => Some(Byte0),
            "d" => Some(Byte1),
            "b" => Some(Byte2),
            "7" => Some(Byte3),
            _ => None
        }
    }

    #[inline]
    pub fn code(self) -> char {
        use ByteSelect::*;
        match self {
            Byte0 => 'e',
            Byte1 => 'd',
            Byte2 => 'b',
            Byte3 => '7',
        }
    }

    /// Pixel offset inside the word.
    #[inline]
    pub fn lane(self) -> i64 {
        self as i64
    }

    /// The byte select addressing pixel lane `lane & 3`.
    #[inline]
    pub fn for_lane(lane: i64) -> ByteSelect {
        use ByteSelect::*;
        match lane.rem_euclid(4) {
            0 => Byte0,
            1 => Byte1,
            2 => Byte2,
            _ => Byte3,
        }
    }
}

impl fmt::Display for ByteSelect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Recover the pixel written by a simulator `(word, byte select)`
/// pair.
#[inline]
pub fn decode_pixel(word: i64, select: ByteSelect) -> Point {
    let byte_addr = word << 2;
    Point::new(
        byte_addr.rem_euclid(PIXELS) + select.lane(),
        byte_addr.div_euclid(PIXELS)
    )
}
