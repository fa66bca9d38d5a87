//! Check result comparison.
//!
//! This program reads two result dumps written by
//! `circlecheck --dump` (e.g. before and after an RTL change) and
//! lists the circles whose score, verdict or address mismatches
//! changed.

use circlecheck::dump::{ read_dump, diff_results };
use itertools::Itertools;

#[derive(clap::Parser, Debug)]
struct CircleDiffArgs {
    /// The first (baseline) dump
    first: String,
    /// The second dump
    second: String,
}

fn main() {
    clilog::init_stderr_color_debug();
    let args = <CircleDiffArgs as clap::Parser>::parse();
    let (first, second) = match (read_dump(&args.first),
                                 read_dump(&args.second)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            clilog::error!(CD_READ, "{}", e);
            std::process::exit(1);
        }
    };
    clilog::info!(
        CD_LOAD,
        "{} circles in {}, {} circles in {}",
        first.len(), args.first, second.len(), args.second
    );
    let changes = diff_results(&first, &second);
    if changes.is_empty() {
        println!("no differences");
        return
    }
    println!("{} circles differ", changes.len());
    println!("{}", changes.iter().format("\n"));
}
