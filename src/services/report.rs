use colored::Colorize;

use super::show::{EloMovement, ShowSummary};

/// Render a show summary for the console: results, skips, title changes and
/// each wrestler's net rating movement.
pub fn render_summary(summary: &ShowSummary) -> String {
    let mut report = String::new();

    report.push_str(&format!(
        "{}\n",
        format!("=== Show Results ({} ratings) ===", summary.strategy).bold()
    ));
    report.push_str(&format!(
        "{} matches applied, {} skipped\n\n",
        summary.applied.len(),
        summary.skipped.len()
    ));

    for applied in &summary.applied {
        let label = if applied.is_draw { "DRAW".yellow() } else { "FINAL".green() };
        report.push_str(&format!("  {} {}\n", label, applied.descriptor));
        if let Some(promo) = &applied.promo {
            report.push_str(&format!("    {}\n", promo.italic()));
        }
        for change in &applied.title_changes {
            report.push_str(&format!(
                "    {} {} wins the {} from {}\n",
                "🏆".bold(),
                change.to,
                change.title,
                change.from
            ));
        }
    }

    if !summary.skipped.is_empty() {
        report.push_str(&format!("\n{}\n", "Skipped:".yellow().bold()));
        for error in &summary.skipped {
            report.push_str(&format!("  ⚠ {}\n", error));
        }
    }

    if !summary.movements.is_empty() {
        report.push_str(&format!("\n{}\n", "Rating changes:".bold()));
        report.push_str(&format!("{:<6} {:<24} {:>6} {:>6}\n", "Rank", "Wrestler", "Elo", "Δ"));
        report.push_str(&"-".repeat(46));
        report.push('\n');
        for movement in &summary.movements {
            report.push_str(&format_movement(movement));
        }
    }

    report
}

pub fn print_summary(summary: &ShowSummary) {
    println!("{}", render_summary(summary));
}

fn format_movement(movement: &EloMovement) -> String {
    let rank = movement.rank.map(|r| format!("#{}", r)).unwrap_or_default();
    format!(
        "{:<6} {:<24} {:>6} {:>6}\n",
        rank,
        movement.name,
        movement.after,
        format_delta(movement.delta())
    )
}

/// `+N` in green, `-N` in red, `=0` dimmed
pub fn format_delta(delta: i32) -> String {
    if delta > 0 {
        format!("+{}", delta).green().bold().to_string()
    } else if delta < 0 {
        delta.to_string().red().bold().to_string()
    } else {
        "=0".dimmed().to_string()
    }
}
