// In app/src/output.rs

use anyhow::Result;
use engine::{PricingOutcome, to_records};

/// Prints one line per product, plus signals and warnings when `verbose`.
pub fn print_table(outcomes: &[PricingOutcome], verbose: bool) {
    println!("\nDynamic Pricing Results\n-----------------------");
    for outcome in outcomes {
        match outcome {
            PricingOutcome::Priced(r) => {
                println!(
                    "{:20} | price: ${:>10} | markup: {:>6.2}% | priced",
                    r.product_name,
                    r.quoted_price,
                    r.final_markup * 100.0
                );
                if verbose {
                    println!(
                        "    signals -> volatility={:.4}, momentum={:.4}, moving_average={:.4}, spread_risk={:.4}, raw_markup={:.4}, volatility_index={:.4}",
                        r.signals.volatility,
                        r.signals.momentum,
                        r.signals.moving_average,
                        r.signals.spread_risk,
                        r.raw_markup,
                        r.volatility_index
                    );
                }
                for warning in &r.warnings {
                    println!("    warning -> {warning}");
                }
            }
            PricingOutcome::Failed { product_name, error } => {
                println!("{:20} | {} | {}", product_name, error.kind(), error);
            }
        }
    }
}

/// Prints the flat records as a JSON array.
pub fn print_json(outcomes: &[PricingOutcome]) -> Result<()> {
    let records = to_records(outcomes);
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
