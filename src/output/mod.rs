pub mod formatter;

pub use formatter::{
    format_detail, format_leaderboard, format_stats, format_target_comparison, format_tsv,
    should_use_colors,
};
