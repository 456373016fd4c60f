//! Cheapest-order CLI
//!
//! Loads a decklist, fetches offers per card from a JSON offer dump,
//! optionally applies the pre-search reductions, generates the candidate
//! bundles and runs the exhaustive search with a progress bar.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use log::LevelFilter;
use rustc_hash::FxHashMap;

use cardhaul::bundles::generator;
use cardhaul::collections::OfferCollection;
use cardhaul::decklist::Decklist;
use cardhaul::filters;
use cardhaul::progress::SearchProgress;
use cardhaul::report;
use cardhaul::search::OrderFinder;
use cardhaul::settings::SearchSettings;
use cardhaul::source::{JsonOfferSource, OfferSource};

/// Bundle and group seller offers for a card list at the lowest combined
/// price.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Decklist file with one card identifier per line
    #[arg(short, long)]
    file: PathBuf,

    /// JSON offer dump to search
    #[arg(short, long)]
    offers: PathBuf,

    /// JSON settings file with marketplace filters and pruning flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Worker threads for the search (defaults to the number of CPUs)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Answer yes to any confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    let decklist = Decklist::from_path(&args.file)
        .with_context(|| format!("loading decklist {}", args.file.display()))?;

    println!(
        "loaded {} cards from {}",
        decklist.cards.len(),
        args.file.display()
    );

    if decklist.has_warnings() && !args.yes {
        let question = format!(
            "{} malformed and {} duplicate lines were skipped. Continue?",
            decklist.malformed_lines, decklist.duplicate_lines
        );

        if !confirm(&question)? {
            bail!("aborted");
        }
    }

    let settings = match &args.config {
        Some(path) => SearchSettings::from_path(path)
            .with_context(|| format!("loading settings {}", path.display()))?,
        None => SearchSettings::default(),
    };

    let source = JsonOfferSource::from_path(&args.offers)
        .with_context(|| format!("loading offer dump {}", args.offers.display()))?;

    let mut all_offers = FxHashMap::default();

    for card in &decklist.cards {
        match source.load_offers(card, &settings) {
            Ok(offers) => {
                println!("{card}: {} offers", offers.len());
                all_offers.insert(card.clone(), offers);
            }
            Err(err) => eprintln!("skipping '{card}': {err}"),
        }
    }

    if all_offers.is_empty() {
        bail!("no card has any offers to search");
    }

    let filtered = filters::apply(settings.filter_options(), all_offers);
    let candidates = generator::bundles_by_card(&filtered)?;
    let finder = OrderFinder::new(candidates)?;

    println!("searching {} combinations", finder.total_checks());

    let threads = args.threads.unwrap_or_else(num_cpus::get);
    let started = Instant::now();
    let best = run_search(&finder, threads);

    println!(
        "search finished in {}",
        started.elapsed().human(Truncate::Millis)
    );
    println!();

    report::write_to(&mut io::stdout().lock(), &best).context("writing the order report")?;

    Ok(())
}

/// Run the search on a worker thread while this thread polls the counters
/// for the progress bar.
fn run_search(finder: &OrderFinder, threads: usize) -> OfferCollection {
    thread::scope(|scope| {
        let worker = scope.spawn(move || finder.find_lowest_offer(threads));
        let progress = SearchProgress::new(finder.total_checks());

        while !worker.is_finished() {
            progress.update(finder.performed_checks());
            thread::sleep(Duration::from_millis(200));
        }

        progress.finish();

        worker
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    })
}

fn confirm(question: &str) -> Result<bool> {
    let stdin = io::stdin();

    loop {
        print!("{question} [y/n] ");
        io::stdout().flush()?;

        let mut answer = String::new();
        stdin.lock().read_line(&mut answer)?;

        match answer.trim().to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => println!("illegal input, please answer 'y' or 'n'"),
        }
    }
}
