/// Parses a lesson duration written as `mm:ss` into seconds.
///
/// Minutes may exceed 59 (`"75:00"`); seconds may not. Anything else is `None`.
#[must_use]
pub fn parse_duration(text: &str) -> Option<u32> {
    let (minutes, seconds) = text.trim().split_once(':')?;
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(minutes) || !digits(seconds) || seconds.len() != 2 {
        return None;
    }
    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    minutes.checked_mul(60)?.checked_add(seconds)
}
