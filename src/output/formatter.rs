use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::achievements::AchievementSchema;
use crate::faculty::FacultyRecord;
use crate::ranking::RankedEntry;
use crate::stats::DashboardStats;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Medal marker for the podium positions, "#N" for everyone else.
fn rank_marker(rank: usize) -> String {
    match rank {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("#{}", n),
    }
}

/// Format the leaderboard, one line per faculty member.
/// Columns: rank, total, name, department. No headers.
/// Rank column: 4 chars (fits "99th"), total column: 6 chars, right-aligned.
pub fn format_leaderboard(entries: &[RankedEntry], use_colors: bool) -> String {
    if entries.is_empty() {
        return "No faculty records found.".to_string();
    }

    let term_width = get_terminal_width();
    let rank_width = 4;
    let total_width = 6;
    let separator = "  ";

    entries
        .iter()
        .map(|entry| {
            let rank_str = format!("{:>width$}", rank_marker(entry.rank), width = rank_width);
            let total_str = format!("{:>width$}", entry.total_achievements, width = total_width);
            let department = entry.record.department.as_str();

            let fixed_width =
                rank_width + total_width + separator.len() * 3 + department.chars().count();
            let name = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_name(&entry.record.name, width - fixed_width)
                } else {
                    truncate_name(&entry.record.name, 20)
                }
            } else {
                entry.record.name.clone()
            };

            if use_colors {
                let rank_colored = match entry.rank {
                    1 => rank_str.yellow().bold().to_string(),
                    2 | 3 => rank_str.bold().to_string(),
                    _ => rank_str.dimmed().to_string(),
                };
                format!(
                    "{} {}{}{}{}{}",
                    rank_colored,
                    total_str.bold(),
                    separator,
                    name,
                    separator,
                    department.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str, total_str, separator, name, separator, department
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line comparing the leader against the department target row.
pub fn format_target_comparison(
    target: &FacultyRecord,
    schema: &AchievementSchema,
    top_total: u64,
    use_colors: bool,
) -> String {
    let target_total = crate::ranking::compute_total(target, schema);
    let gap = target_total.saturating_sub(top_total);
    let line = if gap == 0 {
        format!("Target: {} (met by the leader)", target_total)
    } else {
        format!("Target: {} (leader is {} behind)", target_total, gap)
    };
    if use_colors {
        line.dimmed().to_string()
    } else {
        line
    }
}

/// Format a single faculty member with per-field counts (for `show`)
pub fn format_detail(
    record: &FacultyRecord,
    schema: &AchievementSchema,
    total: u64,
    rank: Option<usize>,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();

    let header = format!("{} ({})", record.name, record.id);
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });
    lines.push(format!(
        "  {} - {}",
        record.designation, record.department
    ));

    for field in schema.fields() {
        let count = record.achievement(&field.key).unwrap_or(0);
        lines.push(format!("  {:<24} {}", field.label, count));
    }

    lines.push(format!("  {:<24} {}", "Total achievements", total));
    match rank {
        Some(rank) => lines.push(format!("  {:<24} {}", "Rank", rank_marker(rank))),
        None => lines.push(format!("  {:<24} not ranked", "Rank")),
    }

    if let Some(pass) = &record.academicpasspercentage {
        lines.push(format!("  {:<24} {}", "Academic pass %", pass));
    }
    if let Some(mentoring) = &record.effectivementoring {
        lines.push(format!("  {:<24} {}", "Effective mentoring", mentoring));
    }

    lines.join("\n")
}

/// Headline dashboard numbers, one line.
pub fn format_stats(stats: &DashboardStats, use_colors: bool) -> String {
    let line = format!(
        "{} faculty | {} publications | {} patents | {} student projects",
        stats.faculty_count,
        stats.total_publications,
        stats.total_patents,
        stats.total_student_projects
    );
    if use_colors {
        line.dimmed().to_string()
    } else {
        line
    }
}

/// Format the leaderboard as tab-separated values for scripting
/// Columns: rank, total, id, name, department (no headers, no colors)
pub fn format_tsv(entries: &[RankedEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                entry.rank,
                entry.total_achievements,
                entry.record.id,
                entry.record.name,
                entry.record.department
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
