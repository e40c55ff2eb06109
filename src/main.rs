// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (env_logger, controlled by RUST_LOG or --verbose)
// 3. Pull visits from the crawl stream one by one and print them
// 4. Exit with proper code (0 = all pages OK, 1 = some pages failed,
//    2 = the crawl itself failed)
//
// Rust concepts used:
// - async/await: the crawl is a Stream we await item by item
// - Result<T, E>: For error handling
// - while let: loop until the stream runs dry
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use futures::StreamExt;
use spindel::{transform, CrawlOptions, Visit};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "spindel=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

// Runs the crawl
// Returns:
//   Ok(0) = every visited URL answered 2xx
//   Ok(1) = some URLs failed or answered an error status
//   Ok(2) = the crawl stopped on a terminal error
//   Err = bad invocation (no seeds, bad config, bad selector)
async fn run(cli: Cli) -> Result<i32> {
    let seeds = cli.seeds()?;

    let transform_html = match &cli.select {
        Some(css) => Some(transform::select(css)?),
        None => None,
    };
    let options = CrawlOptions {
        transport: cli.transport_options()?,
        transform_html,
    };

    if !cli.json {
        println!("{:<8} {:<7} {}", "STATUS", "LINKS", "URL");
        println!("{}", "=".repeat(80));
    }

    let mut pages = spindel::crawl(seeds, options);
    let mut ok_count = 0;
    let mut failed_count = 0;
    let mut terminal_error = None;

    // The limit is checked before pulling: a pull means a fetch
    while !limit_reached(cli.limit, ok_count + failed_count) {
        let visit = match pages.next().await {
            Some(Ok(visit)) => visit,
            Some(Err(e)) => {
                terminal_error = Some(e);
                break;
            }
            None => break,
        };

        if visit.is_ok() {
            ok_count += 1;
        } else {
            failed_count += 1;
        }

        if cli.json {
            println!("{}", serde_json::to_string(&visit)?);
        } else {
            println!(
                "{:<8} {:<7} {}",
                format_status(&visit),
                visit.hrefs().len(),
                visit.url()
            );
        }
    }

    // Stop the crawl before printing the summary
    drop(pages);

    if !cli.json {
        println!();
        println!("📊 Summary:");
        println!("   ✅ OK: {}", ok_count);
        println!("   ❌ Failed: {}", failed_count);
        println!("   📋 Total: {}", ok_count + failed_count);
    }

    if let Some(e) = terminal_error {
        eprintln!("Error: crawl stopped: {}", e);
        return Ok(2);
    }

    if failed_count > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Status column: the HTTP status code, or the error code when there was
// no response at all
fn format_status(visit: &Visit) -> String {
    match visit {
        Visit::Page(page) => page.status_code.to_string(),
        Visit::Error(error) => error.code.clone().unwrap_or_else(|| "ERROR".to_string()),
    }
}

fn limit_reached(limit: Option<usize>, visited: usize) -> bool {
    limit.is_some_and(|limit| visited >= limit)
}
