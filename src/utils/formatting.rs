pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Fixed-width bar for a 0-100 score, used in terminal output.
pub fn score_bar(score: u8, width: usize) -> String {
    let filled = (score.min(100) as usize * width + 50) / 100;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(250), "250ms");
        assert_eq!(format_duration(1500), "1.5s");
        assert_eq!(format_duration(125_000), "2m 5s");
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(0, 10), "..........");
        assert_eq!(score_bar(100, 10), "##########");
        assert_eq!(score_bar(55, 10), "######....");
    }
}
