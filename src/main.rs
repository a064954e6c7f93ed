//! # chatsift CLI
//!
//! Command-line interface for the chatsift library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatsift::ChatsiftError;
use chatsift::cli::Args;
use chatsift::config::Config;
use chatsift::format::write_to_format;
use chatsift::parser::{ParseReport, ParseStatus, TranscriptParser};
use chatsift::parsing::UnmatchedLine;

/// Unmatched lines shown in the summary.
const UNMATCHED_PREVIEW: usize = 5;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(0) => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout stays the progress report.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("chatsift={level}"))),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Returns the number of output targets that could not be written.
fn run(args: &Args) -> Result<usize, ChatsiftError> {
    let total_start = Instant::now();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    args.apply_to(&mut config);
    config.validate()?;

    let formats = args.formats();

    println!("📦 chatsift v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    for format in &formats {
        println!("💾 Output:  {} ({})", args.output_path(*format), format);
    }
    if config.enrich.keywords {
        println!("🏷️  Keywords: up to {} per message", config.enrich.max_keywords);
    }
    println!();

    let mut parser = TranscriptParser::with_config(config.parser.clone());
    if let Some(enricher) = config.enrich.build() {
        parser = parser.with_enricher(enricher);
    }

    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let outcome = parser.parse(&args.input)?;
    let parse_time = parse_start.elapsed();

    match outcome.status() {
        ParseStatus::EmptyInput => {
            println!("⚠️  {}. Nothing written.", ChatsiftError::EmptyInput);
            return Ok(0);
        }
        ParseStatus::NoMessagesRecognized => {
            let unmatched = &outcome.report.unmatched;
            println!("⚠️  {}", ChatsiftError::no_messages(unmatched.len()));
            print_unmatched(unmatched);
            println!("   Nothing written.");
            return Ok(0);
        }
        ParseStatus::Parsed { count } => {
            println!("   Found {} messages ({:.2}s)", count, parse_time.as_secs_f64());
        }
    }

    let report = &outcome.report;
    print_report(report);

    println!("💾 Writing output...");
    let write_start = Instant::now();
    let mut failures = 0;
    for format in &formats {
        let path = args.output_path(*format);
        match write_to_format(&outcome.messages, &path, *format, &config.output) {
            Ok(()) => println!("   {:<5} → {}", format, path),
            Err(e) => {
                failures += 1;
                println!("   {:<5} ✗ {}: {}", format, path, e);
            }
        }
    }
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    let total_time = total_start.elapsed();

    println!();
    if failures == 0 {
        println!("✅ Done!");
    } else {
        println!(
            "❌ {} of {} outputs could not be written",
            failures,
            formats.len()
        );
    }

    println!();
    println!("📊 Summary:");
    println!("   Headers:   {}", report.headers_matched);
    println!("   Messages:  {}", outcome.messages.len());

    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = report.headers_matched as f64 / total_time.as_secs_f64();
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(failures)
}

fn print_report(report: &ParseReport) {
    if report.placeholders_dropped > 0 {
        println!("   Dropped {} placeholder messages", report.placeholders_dropped);
    }
    if report.fallback_timestamps > 0 {
        println!(
            "   {} timestamps could not be parsed and were kept raw",
            report.fallback_timestamps
        );
    }
    if report.skipped_timestamps > 0 {
        println!(
            "   Skipped {} messages with unparseable timestamps",
            report.skipped_timestamps
        );
    }
    if report.enrichment_failures > 0 {
        println!(
            "   {} messages could not be enriched",
            report.enrichment_failures
        );
    }
    if !report.unmatched.is_empty() {
        println!("   {} lines not attached to any message", report.unmatched.len());
        print_unmatched(&report.unmatched);
    }
}

fn print_unmatched(unmatched: &[UnmatchedLine]) {
    for line in unmatched.iter().take(UNMATCHED_PREVIEW) {
        println!("     line {}: {}", line.line_number, line.text);
    }
    if unmatched.len() > UNMATCHED_PREVIEW {
        println!("     ... and {} more", unmatched.len() - UNMATCHED_PREVIEW);
    }
}
