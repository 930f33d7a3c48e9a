//! Time formatting helpers.

/// Nominal spacing between blocks of the host chain, in seconds.
pub const BLOCK_TIME_SECS: u64 = 600;

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Approximate wall-clock span of `blocks` blocks, e.g. `"~145d 20h"`.
pub fn format_block_span(blocks: u64) -> String {
    format!("~{}", format_duration(blocks.saturating_mul(BLOCK_TIME_SECS)))
}
