//! ## `circlecheck`: circle rasterizer verification
//!
//! This contains the core data structures and the checking pipeline
//! for comparing a hardware midpoint-circle rasterizer's simulation
//! log against a software reference model.
//!
//! The pipeline is: parse the log into a [`Dataset`], rebuild the
//! expected words and pixels with the [`circle`] model, decode the
//! simulator's records back to pixels with [`addr`], compare both in
//! [`compare`], and write the text report with [`report`].
//!
//! See the binaries for example usage.

pub mod error;
pub mod point;
pub mod addr;
pub mod circle;
pub mod matcher;
pub mod compare;
pub mod report;
pub mod dump;

pub use error::{ Error, Result };
pub use point::Point;
pub use addr::{ WordAddr, ByteSelect, OverflowPolicy };
pub use circle::Traversal;
pub use compare::{ CheckConfig, CircleResult, ReportingMode, Verdict };

use compact_str::CompactString;
use serde::{ Serialize, Deserialize };
use std::fmt;
use std::fs::File;
use std::io::{ BufRead, BufReader };
use std::path::Path;
use addr::{ parse_hex, canonicalize };

/// A circle under test, parsed from an `xc,yc,r` hex descriptor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash,
         Serialize, Deserialize)]
pub struct Circle {
    pub xc: i64,
    pub yc: i64,
    pub r: i64,
}

impl fmt::Display for Circle {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "centre ({},{}) and radius {}", self.xc, self.yc, self.r)
    }
}

/// One simulated memory write: `word_addr byte_select`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    /// 1-based line in the log.
    pub line: usize,
    /// The word address exactly as the simulator printed it.
    pub text: CompactString,
    /// The numeric word address.
    pub word: i64,
    pub select: ByteSelect,
}

impl AddressRecord {
    /// The pixel this write lands on.
    #[inline]
    pub fn pixel(&self) -> Point {
        addr::decode_pixel(self.word, self.select)
    }

    /// The word address in canonical form.
    #[inline]
    pub fn word_addr(&self, policy: OverflowPolicy) -> Result<WordAddr> {
        canonicalize(&self.text, policy)
    }
}

/// A circle descriptor and the writes logged for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleEntry {
    pub circle: Circle,
    pub records: Vec<AddressRecord>,
}

/// The parsed simulation log, in log order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub entries: Vec<CircleEntry>,
}

/// Largest magnitude accepted for any numeric log field. Keeps all
/// pixel and address arithmetic well inside `i64`.
const FIELD_LIMIT: i64 = 1 << 32;

/// Parse one hex field of `line`, rejecting values beyond
/// [`FIELD_LIMIT`].
fn parse_field(line: usize, field: &str) -> Result<i64> {
    let field = field.trim();
    let value = parse_hex(field).ok_or_else(|| Error::BadHex {
        line, field: field.to_string()
    })?;
    if !(-FIELD_LIMIT < value && value < FIELD_LIMIT) {
        return Err(Error::FieldRange { line, field: field.to_string() })
    }
    Ok(value)
}

/// Parse an `xc,yc,r` line.
fn parse_descriptor(line: usize, text: &str) -> Result<Circle> {
    let fields = text.split(',').collect::<Vec<_>>();
    let &[xc, yc, r] = &fields[..] else {
        return Err(Error::MalformedDescriptor {
            line, text: text.to_string()
        })
    };
    let circle = Circle {
        xc: parse_field(line, xc)?,
        yc: parse_field(line, yc)?,
        r: parse_field(line, r)?
    };
    if circle.r < 0 {
        return Err(Error::MalformedDescriptor {
            line, text: text.to_string()
        })
    }
    Ok(circle)
}

/// Parse a `word_addr byte_select` line.
fn parse_record(line: usize, text: &str) -> Result<AddressRecord> {
    let fields = text.split_whitespace().collect::<Vec<_>>();
    let &[word_text, code] = &fields[..] else {
        return Err(Error::MalformedRecord {
            line, text: text.to_string()
        })
    };
    let word = parse_field(line, word_text)?;
    let select = ByteSelect::from_code(code).ok_or_else(
        || Error::UnknownByteSelect { line, code: code.to_string() })?;
    Ok(AddressRecord {
        line, text: word_text.into(), word, select
    })
}

impl Dataset {
    /// Create an empty dataset.
    #[inline]
    pub fn new() -> Dataset {
        Dataset { entries: Vec::new() }
    }

    /// Feed one log line. Lines with a comma open a new circle,
    /// blank lines are ignored and everything else is an address
    /// record for the latest circle.
    pub fn feed_line(&mut self, line: usize, text: &str) -> Result<()> {
        let text = text.trim_end_matches(['\n', '\r']);
        if text.trim().is_empty() {
            return Ok(())
        }
        if text.contains(',') {
            self.entries.push(CircleEntry {
                circle: parse_descriptor(line, text)?,
                records: Vec::new()
            });
            return Ok(())
        }
        let record = parse_record(line, text)?;
        match self.entries.last_mut() {
            Some(entry) => entry.records.push(record),
            None => return Err(Error::OrphanRecord { line })
        }
        Ok(())
    }

    /// Parse a whole log from a buffered reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Dataset> {
        let mut data = Dataset::new();
        for (i, text) in reader.lines().enumerate() {
            data.feed_line(i + 1, &text?)?;
        }
        for (i, entry) in data.entries.iter().enumerate() {
            if entry.records.is_empty() {
                clilog::warn!(
                    CC_EMPTY,
                    "circle {} ({}) has no address records",
                    i + 1, entry.circle
                );
            }
        }
        Ok(data)
    }

    /// Parse a log held in memory.
    #[inline]
    pub fn parse(text: &str) -> Result<Dataset> {
        Dataset::from_reader(text.as_bytes())
    }

    /// Read and parse a log file.
    pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
        let f = File::open(path)?;
        Dataset::from_reader(BufReader::with_capacity(65536, f))
    }

    /// Total number of address records over all circles.
    #[inline]
    pub fn num_records(&self) -> usize {
        self.entries.iter().map(|e| e.records.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_records_under_descriptors() {
        let data = Dataset::parse(
            "a,a,5\n00962 b\n00643 7\n1f,0x20,3\r\n\n01b58 e\n"
        ).unwrap();
        assert_eq!(data.entries.len(), 2);
        assert_eq!(data.entries[0].circle, Circle { xc: 10, yc: 10, r: 5 });
        assert_eq!(data.entries[0].records.len(), 2);
        assert_eq!(data.entries[0].records[1].text, "00643");
        assert_eq!(data.entries[0].records[1].word, 0x643);
        assert_eq!(data.entries[0].records[1].select, ByteSelect::Byte3);
        assert_eq!(data.entries[0].records[1].line, 3);
        assert_eq!(data.entries[1].circle, Circle { xc: 31, yc: 32, r: 3 });
        assert_eq!(data.entries[1].records.len(), 1);
        assert_eq!(data.num_records(), 3);
    }

    #[test]
    fn descriptor_with_no_records() {
        let data = Dataset::parse("1,2,3\n4,5,6\n").unwrap();
        assert_eq!(data.entries.len(), 2);
        assert!(data.entries.iter().all(|e| e.records.is_empty()));
    }

    #[test]
    fn record_before_descriptor() {
        assert!(matches!(Dataset::parse("00962 b\na,a,5\n"),
                         Err(Error::OrphanRecord { line: 1 })));
    }

    #[test]
    fn malformed_lines() {
        assert!(matches!(Dataset::parse("a,a\n"),
                         Err(Error::MalformedDescriptor { line: 1, .. })));
        assert!(matches!(Dataset::parse("a,a,5,6\n"),
                         Err(Error::MalformedDescriptor { line: 1, .. })));
        assert!(matches!(Dataset::parse("a,g,5\n"),
                         Err(Error::BadHex { line: 1, .. })));
        assert!(matches!(Dataset::parse("a,a,5\n00962\n"),
                         Err(Error::MalformedRecord { line: 2, .. })));
        assert!(matches!(Dataset::parse("a,a,5\nxyz e\n"),
                         Err(Error::BadHex { line: 2, .. })));
        assert!(matches!(Dataset::parse("a,a,5\n00962 f\n"),
                         Err(Error::UnknownByteSelect { line: 2, .. })));
    }

    #[test]
    fn fields_out_of_range() {
        assert!(matches!(Dataset::parse("0,100000000000000,0\n"),
                         Err(Error::FieldRange { line: 1, .. })));
        assert!(matches!(Dataset::parse("a,a,0\n7fffffffffffffff e\n"),
                         Err(Error::FieldRange { line: 2, .. })));
        assert!(matches!(Dataset::parse("a,a,0\n-100000000 e\n"),
                         Err(Error::FieldRange { line: 2, .. })));
        assert!(matches!(Dataset::parse("-8000000000000000,0,1\n"),
                         Err(Error::FieldRange { line: 1, .. })));
        // the widest accepted word still decodes without wrapping
        let data = Dataset::parse("a,a,0\nffffffff e\n").unwrap();
        let rec = &data.entries[0].records[0];
        assert_eq!(rec.pixel(), Point::new(380, 26843545));
        assert_eq!(rec.word_addr(OverflowPolicy::Truncate).unwrap().to_string(),
                   "0ffff");
    }

    #[test]
    fn record_pixel() {
        let data = Dataset::parse("a,a,5\n00962 b\n").unwrap();
        // 0x962 << 2 = 9608 = 15 * 640 + 8, lane 2
        assert_eq!(data.entries[0].records[0].pixel(), Point::new(10, 15));
    }
}
