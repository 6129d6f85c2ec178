use crate::cli::commands::SharesArgs;
use crate::db::Database;
use crate::engine::filter::ShareFilter;
use crate::engine::pagination::{PaginationPlan, SHARE_PAGE_SIZE};
use crate::errors::SharescopeError;

pub fn handle_shares(args: SharesArgs) -> Result<(), SharescopeError> {
    let db = Database::new(&args.db)?;

    if let Some(session) = args.session {
        db.require_session(session)?;
    }

    let filter = ShareFilter::from_request(
        args.search,
        args.detection_type,
        args.match_field.into(),
        args.match_value,
        args.session,
    );

    let inventory = db.full_inventory()?;
    let rows = filter.apply(&inventory);

    let plan = PaginationPlan::clamped(Some(args.page), args.limit, SHARE_PAGE_SIZE);
    let total = rows.len();
    let window = plan.slice(&rows);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&window)?);
        return Ok(());
    }

    if window.is_empty() {
        println!("No matching shares.");
        return Ok(());
    }

    println!(
        "{:<20} {:<24} {:<10} {:>8} {:>8} {:>10}",
        "HOST", "SHARE", "ACCESS", "FILES", "HIDDEN", "SENSITIVE"
    );
    for row in window {
        println!(
            "{:<20} {:<24} {:<10} {:>8} {:>8} {:>10}",
            row.share.hostname,
            row.share.share_name,
            row.share.access_level.as_str(),
            row.share.total_files,
            row.share.hidden_files,
            row.sensitive_file_count,
        );
    }
    println!();
    println!("Page {} of {} ({} shares)", plan.page, plan.total_pages(total), total);

    Ok(())
}
