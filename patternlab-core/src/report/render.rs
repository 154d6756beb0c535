//! Plain-text rendering of the pattern check.

use super::table::{week_rows, Direction, ManualCount, WeekRow};
use super::verdict::Verdict;
use crate::domain::WeeklyBar;
use crate::pattern::{Classification, Pattern, COMPARISONS, WINDOW_WEEKS};
use crate::pipeline::Analysis;
use tracing::warn;

const RULE_WIDTH: usize = 80;
const TABLE_WIDTH: usize = 70;

/// Section title between two full-width rules.
pub fn render_banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{title}\n{rule}\n\n")
}

/// Series overview: daily rows and their source, week count and date range.
pub fn render_overview(analysis: &Analysis) -> String {
    format!(
        "Daily rows: {} ({})\nTotal weeks: {}\nRange: {} to {}\n\n",
        analysis.daily_rows,
        analysis.source,
        analysis.total_weeks,
        analysis.first_week,
        analysis.last_week
    )
}

/// The up + down == 10 consistency line. Never fatal; logs a warning on failure.
pub fn render_consistency(pattern: &Pattern) -> String {
    consistency_line(
        usize::from(pattern.up_count()),
        usize::from(pattern.down_count()),
    )
}

fn consistency_line(up: usize, down: usize) -> String {
    if up + down == COMPARISONS {
        format!("✓ Validation passed: Up ({up}) + Down ({down}) = {COMPARISONS}\n")
    } else {
        warn!(up, down, "pattern counts do not sum to {COMPARISONS}");
        format!("⚠️  WARNING: Pattern counting error! Up ({up}) + Down ({down}) ≠ {COMPARISONS}\n")
    }
}

/// Classification summary block.
pub fn render_summary(classification: &Classification) -> String {
    let pattern = &classification.pattern;
    let mut out = render_banner(&format!(
        "STEP 1: CURRENT {WINDOW_WEEKS}-WEEK SEQUENCE ({COMPARISONS} COMPARISONS)"
    ));
    out.push_str(&render_consistency(pattern));
    out.push('\n');
    out.push_str(&format!("Pattern: {pattern}\n"));
    out.push_str(&format!("Up Weeks: {}\n", pattern.up_count()));
    out.push_str(&format!("Down Weeks: {}\n", pattern.down_count()));
    out.push_str(&format!(
        "Trajectory: {} (slope: {:.4})\n",
        pattern.trajectory(),
        classification.slope
    ));
    out.push_str(&format!("Entry Price: ${:.2}\n", classification.entry_price));
    out.push_str(&format!(
        "Period: {} to {}\n\n",
        classification.period_start, classification.period_end
    ));
    out
}

fn render_row(row: &WeekRow) -> String {
    match (row.direction, row.change, row.change_pct) {
        (Direction::Baseline, _, _) | (_, None, _) | (_, _, None) => format!(
            "{:<6} {:<12} ${:>9.2} {:>10} {:>10} {:<10}",
            row.week,
            row.date.to_string(),
            row.close,
            "N/A",
            "N/A",
            Direction::Baseline.label()
        ),
        (direction, Some(change), Some(pct)) => format!(
            "{:<6} {:<12} ${:>9.2} ${:>9.2} {:>9.1}% {:<10}",
            row.week,
            row.date.to_string(),
            row.close,
            change,
            pct,
            direction.label()
        ),
    }
}

/// Week-by-week table plus the manual recount and its agreement with the classifier.
pub fn render_verification(window: &[WeeklyBar], classification: &Classification) -> String {
    let rows = week_rows(window);
    let manual = ManualCount::from_rows(&rows);
    let pattern = &classification.pattern;

    let mut out = render_banner("DEBUG: MANUAL WEEK-BY-WEEK VERIFICATION");
    out.push_str(&format!(
        "{:<6} {:<12} {:>10} {:>10} {:>10} {:<10}\n",
        "Week", "Date", "Close", "Change", "% Change", "Direction"
    ));
    out.push_str(&"-".repeat(TABLE_WIDTH));
    out.push('\n');
    for row in &rows {
        out.push_str(render_row(row).trim_end());
        out.push('\n');
    }
    out.push_str(&"-".repeat(TABLE_WIDTH));
    out.push_str("\n\n");

    out.push_str(&format!(
        "Manual Count ({COMPARISONS} valid week-to-week comparisons):\n"
    ));
    out.push_str(&format!("  Up weeks:   {}\n", manual.up));
    out.push_str(&format!("  Down weeks: {}\n", manual.down));
    out.push_str(&format!(
        "  Total:      {} (should be {COMPARISONS})\n\n",
        manual.total()
    ));

    if manual.agrees_with(pattern) {
        out.push_str("✓ SUCCESS: Code calculation matches manual count!\n");
    } else {
        warn!(
            computed = %pattern,
            manual_up = manual.up,
            manual_down = manual.down,
            "manual recount disagrees with classifier"
        );
        out.push_str("❌ MISMATCH: Code calculation differs from manual count!\n");
        out.push_str(&format!(
            "  Code: {} up, {} down\n",
            pattern.up_count(),
            pattern.down_count()
        ));
        out.push_str(&format!("  Manual: {} up, {} down\n", manual.up, manual.down));
    }
    out.push('\n');
    out
}

/// Comparison against the expected reference pattern.
pub fn render_validation(ticker: &str, expected: &Pattern, actual: &Pattern) -> String {
    let mut out = render_banner("REFERENCE VALIDATION");
    out.push_str(&format!("Ticker: {ticker}\n"));
    out.push_str(&format!("Expected Pattern: {expected}\n"));
    out.push_str(&format!("Calculated Pattern: {actual}\n\n"));

    match Verdict::evaluate(expected, actual) {
        Verdict::Match => {
            out.push_str("✅ PERFECT MATCH: Pattern identification is CORRECT!\n");
        }
        Verdict::CountsDiffer { expected, actual } => {
            out.push_str(&format!(
                "✓ Trajectory matches (both {})\n",
                actual.trajectory().word()
            ));
            out.push_str("⚠️  Up/Down counts differ:\n");
            out.push_str(&format!(
                "   Expected: {} up, {} down\n",
                expected.up_count(),
                expected.down_count()
            ));
            out.push_str(&format!(
                "   Got: {} up, {} down\n\n",
                actual.up_count(),
                actual.down_count()
            ));
            out.push_str("This may be due to:\n");
            out.push_str("  - Different date ranges analyzed (the reference uses a specific end date)\n");
            out.push_str("  - Different data sources or weekly aggregation methods\n");
            if usize::from(actual.up_count()) + usize::from(actual.down_count()) == COMPARISONS {
                out.push('\n');
                out.push_str(&format!(
                    "✓ However, the calculation correctly uses {COMPARISONS} comparisons\n"
                ));
            }
        }
        Verdict::TrajectoryDiffers { expected, actual } => {
            out.push_str("✗ Trajectory differs\n");
            out.push_str(&format!("   Expected: {expected}\n"));
            out.push_str(&format!("   Got: {actual}\n"));
        }
    }
    out.push('\n');
    out
}

/// Full report: overview, summary, verification table and reference validation.
pub fn render_report(analysis: &Analysis, expected: &Pattern) -> String {
    let mut out = render_overview(analysis);
    out.push_str(&render_summary(&analysis.classification));
    out.push_str(&render_verification(&analysis.window, &analysis.classification));
    out.push_str(&render_validation(
        &analysis.symbol,
        expected,
        &analysis.classification.pattern,
    ));
    out.push_str(&render_banner("CHECK COMPLETE"));
    out
}
