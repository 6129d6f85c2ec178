use console::style;

use crate::cli::commands::SessionsArgs;
use crate::db::Database;
use crate::engine::pagination::{PaginationPlan, ACTIVITY_PAGE_SIZE};
use crate::errors::SharescopeError;
use crate::models::ScanStatus;
use crate::utils::formatting::{format_duration, format_timestamp};

pub fn handle_sessions(args: SessionsArgs) -> Result<(), SharescopeError> {
    let db = Database::new(&args.db)?;
    let plan = PaginationPlan::clamped(Some(args.page), args.limit, ACTIVITY_PAGE_SIZE);
    let total = db.count_sessions()?;
    let sessions = db.list_sessions(plan.limit, plan.offset())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!("No scan sessions.");
        return Ok(());
    }

    println!(
        "{:<5} {:<24} {:<10} {:<20} {:<10} {:>6} {:>7} {:>10}",
        "ID", "DOMAIN", "STATUS", "STARTED", "DURATION", "HOSTS", "SHARES", "SENSITIVE"
    );
    for session in &sessions {
        let status = match session.status {
            ScanStatus::Running => style("running").yellow(),
            ScanStatus::Completed => style("completed").green(),
            ScanStatus::Failed => style("failed").red(),
        };
        println!(
            "{:<5} {:<24} {:<10} {:<20} {:<10} {:>6} {:>7} {:>10}",
            session.id,
            session.domain,
            status,
            format_timestamp(Some(session.start_time)),
            format_duration(session.start_time, session.end_time),
            session.total_hosts,
            session.total_shares,
            session.total_sensitive_files,
        );
    }
    println!();
    println!("Page {} of {} ({} sessions)", plan.page, plan.total_pages(total), total);

    Ok(())
}
