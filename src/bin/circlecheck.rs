//! Circle rasterizer check.
//!
//! This program reads the simulation log of the circle-drawing
//! hardware (`output.txt` by default), recomputes every circle with
//! the software model, and writes a plain-text report
//! (`high_level_report.txt` by default) with a similarity score and
//! an address-by-address table per circle.
//!
//! Passing `verbose=False` as the first argument keeps the terminal
//! quiet. Otherwise each circle is also echoed and plotted, and the
//! program waits for Enter between circles.

use circlecheck::{ CheckConfig, Dataset, OverflowPolicy, ReportingMode,
                   Traversal };
use circlecheck::compare::check_dataset;
use circlecheck::dump::write_dump;
use circlecheck::report::write_report;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
struct CircleCheckArgs {
    /// `verbose=False` disables console output and plots.
    verbose: Option<String>,
    /// The simulation log to check.
    #[clap(long, default_value = "output.txt")]
    input: PathBuf,
    /// The report output file path. Overwritten.
    #[clap(long, default_value = "high_level_report.txt")]
    report: PathBuf,
    /// 1-based circle numbers to leave out of the report.
    #[clap(long, default_values_t = [24usize])]
    skip: Vec<usize>,
    /// What to do with word addresses wider than four hex digits.
    #[clap(long, value_enum, default_value_t = OverflowPolicy::Strict)]
    overflow: OverflowPolicy,
    /// Score similarity against the old plotting walk, which repeats
    /// the first step and drops the diagonal one.
    #[clap(long)]
    legacy_plot_traversal: bool,
    /// Do not wait for Enter after each plot.
    #[clap(long)]
    no_pause: bool,
    /// Also save all results as CBOR, for `circlediff`.
    #[clap(long)]
    dump: Option<PathBuf>,
}

fn run(args: &CircleCheckArgs) -> circlecheck::Result<()> {
    let config = CheckConfig {
        mode: ReportingMode::from_switch(args.verbose.as_deref()),
        skip: args.skip.clone(),
        overflow: args.overflow,
        plot_traversal: match args.legacy_plot_traversal {
            true => Traversal::LegacyPlot,
            false => Traversal::Address
        },
        pause: !args.no_pause,
    };
    let verbose = config.mode.is_verbose();
    if verbose {
        println!("args: {:?}", args);
    }
    if config.plot_traversal == Traversal::LegacyPlot {
        clilog::warn!(
            CC_LEGACY_WALK,
            "similarity uses the legacy plotting walk, which differs \
             from the address walk; perfect logs will not score 1.0"
        );
    }

    // timers log at debug level, so silent runs skip them
    let timer_load = verbose.then(|| clilog::stimer!("load_log"));
    let data = Dataset::load(&args.input)?;
    if let Some(timer) = timer_load {
        clilog::finish!(timer);
    }
    if verbose {
        clilog::info!(
            CC_LOAD,
            "loaded {} circles with {} address records from {}",
            data.entries.len(), data.num_records(), args.input.display()
        );
    }

    let timer_check = verbose.then(|| clilog::stimer!("check"));
    let results = check_dataset(&data, &config)?;
    if let Some(timer) = timer_check {
        clilog::finish!(timer);
    }

    let mut f = BufWriter::new(File::create(&args.report)?);
    write_report(&mut f, &results, &config)?;
    if let Some(path) = &args.dump {
        write_dump(path, &results)?;
    }
    if verbose {
        clilog::info!(
            CC_DONE,
            "wrote {} circles to {}",
            results.len(), args.report.display()
        );
    }
    Ok(())
}

fn main() {
    clilog::init_stderr_color_debug();
    let args = <CircleCheckArgs as clap::Parser>::parse();
    if let Err(e) = run(&args) {
        clilog::error!(CC_FAIL, "{}", e);
        std::process::exit(1);
    }
}
