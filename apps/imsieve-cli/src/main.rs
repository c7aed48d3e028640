//! imsieve — screen bibliography entries for a systematic literature review
//!
//! Walks the records of a BibTeX file, fetching each entry's abstract and
//! full-text link from its source site, and records accept/reject decisions
//! under the configured reviewer identity.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use imsieve_core::{
    Decision, Document, DocumentError, Fetch, HttpClient, MarkOutcome, Navigator, NoFetch,
    Record, ReviewConfig, SieveError, StringDisplay,
};

#[derive(Parser)]
#[command(name = "imsieve", version, about = "Interactive screening for systematic literature reviews")]
struct Args {
    /// Bibliography file to review
    bibliography: PathBuf,

    /// Reviewer identity recorded in annotations (falls back to the config
    /// file, then $USER)
    #[arg(long, env = "IMSIEVE_REVIEWER")]
    reviewer: Option<String>,

    /// Skip all network fetches (offline screening)
    #[arg(long)]
    no_fetch: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = ReviewConfig::load()?;
    if let Some(reviewer) = args.reviewer {
        config.reviewer_id = reviewer;
    }

    let fetch: Box<dyn Fetch> = if args.no_fetch {
        Box::new(NoFetch)
    } else {
        Box::new(HttpClient::with_timeout(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        ))
    };

    let doc = Document::load(&args.bibliography)?;
    println!(
        "Reviewing {} as {}",
        args.bibliography.display(),
        config.reviewer_id
    );
    let mut nav = Navigator::new(doc, config, fetch, StringDisplay::new());

    let first = nav.next();
    report_step(&nav, first);
    run_loop(&mut nav, &args.bibliography)?;
    Ok(())
}

fn run_loop(nav: &mut Navigator<StringDisplay>, path: &PathBuf) -> io::Result<()> {
    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        match line?.trim() {
            "n" | "next" => {
                let result = nav.next();
                report_step(nav, result);
            }
            "p" | "prev" => {
                let result = nav.prev();
                report_step(nav, result);
            }
            "a" | "accept" => mark(nav, Decision::Accepted),
            "r" | "reject" => mark(nav, Decision::Rejected),
            "s" | "show" => println!("{}", nav.display().contents()),
            "j" | "json" => dump_json(nav),
            "t" | "tally" => tally(nav),
            "w" | "write" => match nav.save(path) {
                Ok(()) => println!("Wrote {}", path.display()),
                Err(err) => println!("Write failed: {err}"),
            },
            "q" | "quit" => break,
            "" => {}
            other => println!("Unknown command '{other}' (n p a r s j t w q)"),
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("imsieve> ");
    io::stdout().flush()
}

fn report_step(nav: &Navigator<StringDisplay>, result: imsieve_core::Result<Record>) {
    match result {
        Ok(record) => {
            println!("--- {} ---", record.key);
            println!("{}", nav.display().contents());
        }
        Err(SieveError::Document(DocumentError::EndOfDocument)) => {
            println!("No further records.");
        }
        Err(SieveError::Document(DocumentError::StartOfDocument)) => {
            println!("Already at the first record.");
        }
        Err(err) => println!("Navigation failed: {err}"),
    }
}

fn mark(nav: &mut Navigator<StringDisplay>, decision: Decision) {
    let result = match decision {
        Decision::Accepted => nav.accept_current(),
        Decision::Rejected => nav.reject_current(),
    };
    match result {
        Ok(MarkOutcome::Written) => println!("Recorded '{decision}'."),
        Ok(MarkOutcome::AlreadyDone) => println!(
            "Already reviewed by {}; nothing written.",
            nav.config().reviewer_id
        ),
        Err(err) => println!("Could not record decision: {err}"),
    }
}

fn dump_json(nav: &Navigator<StringDisplay>) {
    match nav.reparse() {
        Ok(record) => match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Serialization failed: {err}"),
        },
        Err(err) => println!("No current record: {err}"),
    }
}

fn tally(nav: &mut Navigator<StringDisplay>) {
    match nav.summary() {
        Ok(summary) => println!(
            "{} records, {} reviewed ({} accepted, {} rejected)",
            summary.total, summary.reviewed, summary.accepted, summary.rejected
        ),
        Err(err) => println!("Tally failed: {err}"),
    }
}
