use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use options_pricer_client::{logging, processor, AppConfig, OptionRecord, PricingClient};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging(logging::LOG_DIR).context("Failed to initialise logging")?;

    let cfg = AppConfig::from_env();
    cfg.validate()?;

    println!("{}", "=".repeat(60).blue());
    println!("{}", "Options Pricer Client".green().bold());
    println!("{}", "=".repeat(60).blue());
    println!("{} Server: {}", "ℹ".blue(), cfg.base_url);
    println!("{} Symbols: {}", "ℹ".blue(), cfg.symbols.join(", "));
    println!("{} Rate: {}", "ℹ".blue(), cfg.rate);
    println!("{} Max concurrent requests: {}", "ℹ".blue(), cfg.max_concurrent);
    println!();

    let client = PricingClient::with_base_url(cfg.base_url.clone())
        .context("Failed to build HTTP client")?;

    // Step 1: Fetch priced options
    println!("{}", "Fetching priced options...".cyan());
    let start_time = std::time::Instant::now();
    let results = client
        .fetch_many(&cfg.symbols, cfg.rate, cfg.max_concurrent)
        .await;
    let elapsed = start_time.elapsed();

    let mut successful: BTreeMap<String, Vec<OptionRecord>> = BTreeMap::new();
    let mut failed = Vec::new();

    for (symbol, result) in results {
        match result {
            Ok(mut records) => {
                let dropped = processor::drop_non_finite(&mut records);
                if dropped > 0 {
                    warn!(symbol = %symbol, dropped, "Skipping records with non-finite values");
                }
                processor::rank_by_score(&mut records);
                successful.insert(symbol, records);
                print!("{}", ".".green());
            }
            Err(e) => {
                failed.push((symbol, e.to_string()));
                print!("{}", "✗".red());
            }
        }
    }
    println!("\n");

    // Step 2: Summary
    let today = Local::now().date_naive();

    println!("{}", "=".repeat(60).blue());
    println!("{}", "Summary".cyan().bold());
    println!("{}", "=".repeat(60).blue());
    println!("{} Successful: {}", "✓".green(), successful.len());
    println!("{} Failed: {}", "✗".red(), failed.len());
    println!("{} Time taken: {:.2}s", "⏱".yellow(), elapsed.as_secs_f64());
    println!();

    for (symbol, records) in &successful {
        let summary = processor::summarize(symbol, records, today);
        println!(
            "  {} {} → {} records ({} calls / {} puts)",
            "✓".green(),
            symbol.yellow(),
            summary.total,
            summary.calls,
            summary.puts
        );
        if let Some(top) = &summary.top_pick {
            println!(
                "      top: {} {:.2} exp {} score {:.3} → {} ({})",
                top.option_type,
                top.strike,
                top.expiration,
                top.enhanced_score,
                top.action.bold(),
                top.action_reason
            );
        }
        if summary.total == 0 {
            println!("      {}", "no priced options returned".dimmed());
        }
    }
    println!();

    if !failed.is_empty() {
        println!("{}", "Failed Symbols:".red());
        for (symbol, error) in &failed {
            println!(
                "  {} {} → {}",
                "✗".red(),
                symbol.yellow(),
                error.chars().take(80).collect::<String>()
            );
        }
        println!();
    }

    // Step 3: Save to JSON
    std::fs::write(&cfg.output_path, serde_json::to_string_pretty(&successful)?)
        .with_context(|| format!("Failed to write {}", cfg.output_path))?;
    info!(path = %cfg.output_path, symbols = successful.len(), "Saved results");
    println!(
        "{} Saved {} symbols to {}",
        "✓".green(),
        successful.len(),
        cfg.output_path
    );

    println!("{}", "=".repeat(60).blue());
    println!("{}", "Done!".green().bold());
    println!("{}", "=".repeat(60).blue());

    Ok(())
}
