/// Text progress bar, e.g. `[████░░░░░░] 40%`. Percent is clamped to 0..=100.
pub fn progress_bar(percent: i32, width: usize) -> String {
    let clamped = percent.clamp(0, 100) as usize;
    let filled = clamped * width / 100;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_proportionally() {
        assert_eq!(progress_bar(40, 10), "[████░░░░░░] 40%");
        assert_eq!(progress_bar(0, 4), "[░░░░] 0%");
        assert_eq!(progress_bar(100, 4), "[████] 100%");
    }

    #[test]
    fn out_of_range_values_are_clamped_in_the_bar() {
        assert_eq!(progress_bar(150, 4), "[████] 150%");
        assert_eq!(progress_bar(-5, 4), "[░░░░] -5%");
    }
}
