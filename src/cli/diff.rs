use console::style;

use crate::cli::commands::DiffArgs;
use crate::db::Database;
use crate::engine::diff::{self, ChangeType, ShareDiff};
use crate::errors::SharescopeError;
use crate::utils::formatting::format_timestamp;

pub fn handle_diff(args: DiffArgs) -> Result<(), SharescopeError> {
    let db = Database::new(&args.db)?;
    let report = diff::compare_sessions(&db, args.session_a, args.session_b)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let [a, b] = &report.sessions;
    println!(
        "Session {} ({}) -> session {} ({})",
        a.id,
        format_timestamp(Some(a.start_time)),
        b.id,
        format_timestamp(Some(b.start_time)),
    );
    println!();

    if report.differences.is_empty() {
        println!("No differences.");
        return Ok(());
    }

    for share in &report.differences {
        print_share(share);
    }

    let summary = &report.summary;
    println!();
    println!(
        "{} differences: {} added, {} removed, {} modified",
        summary.total_differences,
        style(summary.added).green(),
        style(summary.removed).red(),
        style(summary.modified).yellow(),
    );
    if summary.files_added + summary.files_removed + summary.files_modified > 0 {
        println!(
            "Sensitive files: {} added, {} removed, {} modified",
            style(summary.files_added).green(),
            style(summary.files_removed).red(),
            style(summary.files_modified).yellow(),
        );
    }

    Ok(())
}

fn print_share(share: &ShareDiff) {
    let marker = match share.change_type {
        ChangeType::Added => style("+").green().bold(),
        ChangeType::Removed => style("-").red().bold(),
        ChangeType::Modified => style("~").yellow().bold(),
    };
    println!("{} \\\\{}\\{}", marker, share.hostname, share.share_name);

    if share.change_type == ChangeType::Modified {
        print_change(
            "access",
            share.session1_access_level.map(|a| a.as_str().to_string()),
            share.session2_access_level.map(|a| a.as_str().to_string()),
        );
        print_change(
            "total files",
            share.session1_total_files.map(|v| v.to_string()),
            share.session2_total_files.map(|v| v.to_string()),
        );
        print_change(
            "hidden files",
            share.session1_hidden_files.map(|v| v.to_string()),
            share.session2_hidden_files.map(|v| v.to_string()),
        );
        print_change(
            "sensitive files",
            share.session1_sensitive_files.map(|v| v.to_string()),
            share.session2_sensitive_files.map(|v| v.to_string()),
        );
    }

    for file in share.file_changes.iter().flatten() {
        let marker = match file.change_type {
            ChangeType::Added => style("+").green(),
            ChangeType::Removed => style("-").red(),
            ChangeType::Modified => style("~").yellow(),
        };
        match file.change_type {
            ChangeType::Added => {
                println!("    {} {} [{}]", marker, file.file_name, file.new_detection_types.join(", "));
            }
            ChangeType::Removed => {
                println!("    {} {} [{}]", marker, file.file_name, file.old_detection_types.join(", "));
            }
            ChangeType::Modified => {
                println!(
                    "    {} {} [{}] -> [{}]",
                    marker,
                    file.file_name,
                    file.old_detection_types.join(", "),
                    file.new_detection_types.join(", "),
                );
            }
        }
    }
}

fn print_change(label: &str, old: Option<String>, new: Option<String>) {
    if old == new {
        return;
    }
    println!(
        "    {}: {} -> {}",
        label,
        old.unwrap_or_else(|| "-".to_string()),
        new.unwrap_or_else(|| "-".to_string()),
    );
}
