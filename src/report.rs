//! Text report, console echo and terminal scatter plots.

use itertools::Itertools;
use std::io::{ self, Write };
use crate::{ CheckConfig, CircleResult, Point, Result };
use crate::compare::AddressRow;

const HEADERS: [&str; 3] = ["EXPECTED WORD_ADDR", "GIVEN WORD_ADDR", "EQUAL?"];

/// Plot size limits, in characters.
const PLOT_COLS: i64 = 64;
const PLOT_ROWS: i64 = 32;

/// Render a ratio the way a float repr reads (`1.0`, not `1`).
#[inline]
pub fn format_similarity(similarity: f64) -> String {
    format!("{:?}", similarity)
}

/// Header line shared by the report and the plot title.
#[inline]
pub fn circle_title(res: &CircleResult) -> String {
    format!("Circle {}: with {}", res.number, res.circle)
}

/// Lay out the address table as plain columns: header, dash rule,
/// then one line per row. Columns are left-aligned, at least two
/// characters wider than their header, and two spaces apart.
pub fn format_table(rows: &[AddressRow]) -> String {
    let cells = rows.iter().map(|r| [
        r.expected.map(|e| e.to_string()).unwrap_or_default(),
        r.given.as_deref().unwrap_or_default().to_string(),
        if r.equal { "True" } else { "False" }.to_string(),
    ]).collect::<Vec<_>>();
    let mut widths = HEADERS.map(|h| h.len() + 2);
    for row in &cells {
        for (w, c) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(c.len());
        }
    }
    let line = |row: [&str; 3]| {
        row.iter().zip(widths.iter())
            .map(|(c, &w)| format!("{:<w$}", c, w = w))
            .join("  ")
            .trim_end()
            .to_string()
    };
    let mut lines = vec![
        line(HEADERS),
        line(widths.map(|w| "-".repeat(w)).each_ref().map(|s| s.as_str())),
    ];
    lines.extend(cells.iter().map(
        |row| line(row.each_ref().map(|s| s.as_str()))));
    lines.join("\n")
}

/// Write one circle's section of the report.
pub fn write_section(out: &mut impl Write, res: &CircleResult) -> io::Result<()> {
    writeln!(out, "{}", circle_title(res))?;
    writeln!(out, "Similarity to expected model: {}",
             format_similarity(res.similarity))?;
    writeln!(out, "{} similarity", res.verdict)?;
    writeln!(out)?;
    write!(out, "{}", format_table(&res.rows))?;
    write!(out, "\n\n")
}

/// Echo the address lists and the score to stdout.
pub fn print_console(res: &CircleResult) {
    let given = res.rows.iter().filter_map(|r| r.given.as_ref())
        .collect::<Vec<_>>();
    let expected = res.rows.iter().filter_map(|r| r.expected)
        .collect::<Vec<_>>();
    println!("given: {} values in the simulation\n[{}]",
             given.len(), given.iter().format(", "));
    println!("expected: {} values from the high level model\n[{}]",
             expected.len(), expected.iter().format(", "));
    println!("Similarity to expected model: {}",
             format_similarity(res.similarity));
}

/// Draw expected (`o`) and simulator (`*`) pixels on a character
/// grid, `@` where both fall in the same cell. Rows go top to bottom
/// in screen order.
pub fn render_plot(title: &str, expected: &[Point], given: &[Point]) -> String {
    let mut ret = format!("{}\n", title);
    let all = || expected.iter().chain(given.iter());
    let (Some(min_x), Some(max_x)) = (all().map(|p| p.x).min(),
                                      all().map(|p| p.x).max()) else {
        ret += "(no points)\n";
        return ret
    };
    let min_y = all().map(|p| p.y).min().unwrap_or(0);
    let max_y = all().map(|p| p.y).max().unwrap_or(0);
    let span_x = max_x - min_x + 1;
    let span_y = max_y - min_y + 1;
    let cols = span_x.min(PLOT_COLS);
    let rows = span_y.min(PLOT_ROWS);
    let cell = |p: &Point| {
        let c = (p.x - min_x) * (cols - 1) / (span_x - 1).max(1);
        let r = (p.y - min_y) * (rows - 1) / (span_y - 1).max(1);
        (r as usize, c as usize)
    };
    let mut grid = vec![vec![0u8; cols as usize]; rows as usize];
    for p in expected {
        let (r, c) = cell(p);
        grid[r][c] |= 1;
    }
    for p in given {
        let (r, c) = cell(p);
        grid[r][c] |= 2;
    }
    for row in &grid {
        let s = row.iter().map(|m| match m {
            1 => 'o',
            2 => '*',
            3 => '@',
            _ => ' ',
        }).collect::<String>();
        ret += s.trim_end();
        ret.push('\n');
    }
    ret += &format!("x {}..={}, y {}..={}; o expected, * simulator, @ both\n",
                    min_x, max_x, min_y, max_y);
    ret
}

/// Show the plot for one circle on stderr and, if asked, block until
/// the user presses Enter.
pub fn show_plot(res: &CircleResult, pause: bool) -> io::Result<()> {
    let plot = render_plot(&circle_title(res),
                           &res.expected_points, &res.given_points);
    let mut err = io::stderr().lock();
    write!(err, "{}", plot)?;
    if pause {
        write!(err, "press Enter to continue..")?;
        err.flush()?;
        let mut buf = String::new();
        io::stdin().read_line(&mut buf)?;
    }
    Ok(())
}

/// Write the full report, echoing and plotting each circle as it is
/// written when the run is verbose.
pub fn write_report(
    out: &mut impl Write, results: &[CircleResult], config: &CheckConfig
) -> Result<()> {
    for res in results {
        write_section(out, res)?;
        if config.mode.is_verbose() {
            print_console(res);
            show_plot(res, config.pause)?;
        }
    }
    out.flush()?;
    Ok(())
}
