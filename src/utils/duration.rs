/// Parse a compact duration string like "1d3h", "45m" or "2w" into seconds.
///
/// Accepted unit suffixes: w (weeks), d (days), h (hours), m (minutes),
/// s (seconds). A bare number counts as minutes.
pub fn parse_duration(input: &str) -> Result<u64, String> {
    let input = input.trim().to_ascii_lowercase();
    if input.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total: u64 = 0;
    let mut digits = String::new();

    for c in input.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        if digits.is_empty() {
            return Err(format!("unexpected character '{}'", c));
        }

        let value: u64 = digits
            .parse()
            .map_err(|_| format!("number too large: {}", digits))?;
        digits.clear();

        let unit: u64 = match c {
            'w' => 7 * 24 * 3600,
            'd' => 24 * 3600,
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(format!("unknown unit '{}'", c)),
        };

        total = total
            .checked_add(value.saturating_mul(unit))
            .ok_or_else(|| "duration overflow".to_string())?;
    }

    // Trailing bare number defaults to minutes
    if !digits.is_empty() {
        let value: u64 = digits
            .parse()
            .map_err(|_| format!("number too large: {}", digits))?;
        total = total
            .checked_add(value.saturating_mul(60))
            .ok_or_else(|| "duration overflow".to_string())?;
    }

    if total == 0 {
        return Err("duration must be positive".to_string());
    }

    Ok(total)
}

/// Render a duration in seconds as a short human-readable string.
pub fn format_duration(total_secs: u64) -> String {
    let mut parts = Vec::new();
    let mut rest = total_secs;

    for (unit_secs, name) in [
        (7 * 24 * 3600, "week"),
        (24 * 3600, "day"),
        (3600, "hour"),
        (60, "minute"),
        (1, "second"),
    ] {
        let count = rest / unit_secs;
        if count > 0 {
            parts.push(format!(
                "{} {}{}",
                count,
                name,
                if count == 1 { "" } else { "s" }
            ));
            rest %= unit_secs;
        }
        if parts.len() == 2 {
            break;
        }
    }

    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound() {
        assert_eq!(parse_duration("1d3h"), Ok(27 * 3600));
        assert_eq!(parse_duration("2w"), Ok(14 * 24 * 3600));
        assert_eq!(parse_duration("1h30m"), Ok(5400));
        assert_eq!(parse_duration("90s"), Ok(90));
    }

    #[test]
    fn test_parse_bare_number_is_minutes() {
        assert_eq!(parse_duration("45"), Ok(45 * 60));
        assert_eq!(parse_duration("1h30"), Ok(5400));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("d3").is_err());
        assert!(parse_duration("1y").is_err());
        assert!(parse_duration("0m").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(format_duration(27 * 3600), "1 day 3 hours");
        assert_eq!(format_duration(60), "1 minute");
        assert_eq!(format_duration(5400), "1 hour 30 minutes");
        assert_eq!(format_duration(0), "0 seconds");
    }
}
