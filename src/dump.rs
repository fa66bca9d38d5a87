//! CBOR dumps of check results, and comparison of two runs.

use ciborium::{ from_reader, into_writer };
use indexmap::IndexMap;
use std::fmt;
use std::fs::File;
use std::io::{ BufReader, BufWriter, Write };
use std::path::Path;
use crate::{ Circle, CircleResult, Result, Verdict };
use crate::report::format_similarity;

/// Save results for a later `circlediff`.
pub fn write_dump(path: impl AsRef<Path>, results: &[CircleResult]) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    into_writer(results, &mut w)?;
    w.flush()?;
    Ok(())
}

pub fn read_dump(path: impl AsRef<Path>) -> Result<Vec<CircleResult>> {
    Ok(from_reader(BufReader::new(File::open(path)?))?)
}

/// The figures of one circle that a rerun may change.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub circle: Circle,
    pub similarity: f64,
    pub verdict: Verdict,
    pub mismatches: usize,
}

impl From<&CircleResult> for Summary {
    fn from(res: &CircleResult) -> Summary {
        Summary {
            circle: res.circle,
            similarity: res.similarity,
            verdict: res.verdict,
            mismatches: res.mismatches(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({} similarity), {} mismatched rows",
               self.circle, format_similarity(self.similarity),
               self.verdict, self.mismatches)
    }
}

/// A difference between two dumps, keyed by circle number.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    OnlyInFirst(usize, Summary),
    OnlyInSecond(usize, Summary),
    Differs { number: usize, first: Summary, second: Summary },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::OnlyInFirst(n, s) =>
                write!(f, "circle {} only in first: {}", n, s),
            Change::OnlyInSecond(n, s) =>
                write!(f, "circle {} only in second: {}", n, s),
            Change::Differs { number, first, second } =>
                write!(f, "circle {}:\n  - {}\n  + {}", number, first, second),
        }
    }
}

/// List every circle whose outcome differs between two runs, in
/// order of first appearance.
pub fn diff_results(first: &[CircleResult], second: &[CircleResult]) -> Vec<Change> {
    let mut pool = IndexMap::<usize, (Option<Summary>, Option<Summary>)>::new();
    for res in first {
        pool.entry(res.number).or_default().0 = Some(res.into());
    }
    for res in second {
        pool.entry(res.number).or_default().1 = Some(res.into());
    }
    pool.into_iter().filter_map(|(number, pair)| match pair {
        (Some(a), None) => Some(Change::OnlyInFirst(number, a)),
        (None, Some(b)) => Some(Change::OnlyInSecond(number, b)),
        (Some(a), Some(b)) if a != b =>
            Some(Change::Differs { number, first: a, second: b }),
        _ => None
    }).collect()
}
