use lectern_domain::ProgressSummary;

/// `completed / total` as a whole percentage, halves rounded up.
///
/// Zero lessons is 0%, and the result never exceeds 100 even if `completed > total`.
#[must_use]
pub fn completion_percentage(total: usize, completed: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let (total, completed) = (total as u128, completed as u128);
    let rounded = (completed * 200 + total) / (total * 2);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

#[must_use]
pub fn summarize(total: usize, completed: usize) -> ProgressSummary {
    ProgressSummary { completed, total, percentage: completion_percentage(total, completed) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(4, 2), 50);
        assert_eq!(completion_percentage(3, 1), 33);
        assert_eq!(completion_percentage(3, 2), 67);
        assert_eq!(completion_percentage(5, 2), 40);
        assert_eq!(completion_percentage(8, 1), 13);
        assert_eq!(completion_percentage(200, 1), 1);
        assert_eq!(completion_percentage(201, 1), 0);
    }

    #[test]
    fn clamps_to_one_hundred() {
        assert_eq!(completion_percentage(2, 5), 100);
        assert_eq!(completion_percentage(usize::MAX, usize::MAX), 100);
    }
}
