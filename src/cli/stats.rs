use console::style;

use crate::cli::commands::StatsArgs;
use crate::db::Database;
use crate::engine::risk;
use crate::errors::SharescopeError;

pub fn handle_stats(args: StatsArgs) -> Result<(), SharescopeError> {
    let db = Database::new(&args.db)?;
    let inventory = db.full_inventory()?;
    let stats = risk::aggregate(&inventory);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", style("Inventory statistics").bold());
    println!("  Unique shares:          {}", stats.unique_shares);
    println!("  Total share rows:       {}", stats.total_shares);
    println!("  Unique sensitive files: {}", stats.unique_sensitive_files);
    println!("  Total detections:       {}", stats.total_sensitive_files);
    println!("  Shares w/ hidden files: {}", stats.unique_hidden_shares);
    println!("  Total hidden files:     {}", stats.total_hidden_files);

    let score = format!("{:.1}", stats.risk_score);
    let styled = if stats.risk_score >= 75.0 {
        style(score).red().bold()
    } else if stats.risk_score >= 40.0 {
        style(score).yellow().bold()
    } else {
        style(score).green().bold()
    };
    println!("  Risk score:             {}", styled);

    Ok(())
}
