use chrono::{DateTime, Utc};

/// Compact relative timestamp shown next to each conversation.
pub(crate) fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}

/// Up to two uppercase initials for the avatar placeholder.
pub(crate) fn initials(name: &str) -> String {
    let first_letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect();
    first_letters.to_uppercase().chars().take(2).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-03-18T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn relative_time_buckets() {
        let now = now();
        assert_eq!(format_relative_time(now, now), "Just now");
        assert_eq!(format_relative_time(now - Duration::seconds(59), now), "Just now");
        assert_eq!(format_relative_time(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_relative_time(now - Duration::minutes(59), now), "59m ago");
        assert_eq!(format_relative_time(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_relative_time(now - Duration::hours(23), now), "23h ago");
        assert_eq!(format_relative_time(now - Duration::days(1), now), "1d ago");
        assert_eq!(format_relative_time(now - Duration::days(40), now), "40d ago");
    }

    #[test]
    fn relative_time_future_counts_as_just_now() {
        let now = now();
        assert_eq!(format_relative_time(now + Duration::minutes(10), now), "Just now");
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("Grace Brewster Murray Hopper"), "GB");
        assert_eq!(initials("plato"), "P");
        assert_eq!(initials(""), "");
        assert_eq!(initials("  spaced   out  "), "SO");
    }
}
