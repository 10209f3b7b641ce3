/// Neutralize mass-mention tokens in a reason string.
///
/// A zero-width space after the @ keeps the text readable while preventing
/// the ping when the reason is echoed into a channel. Moderators who may
/// mention everyone keep their reason untouched.
pub fn sanitize_reason(reason: &str, allow_mass_mentions: bool) -> String {
    if allow_mass_mentions {
        return reason.to_string();
    }

    reason
        .replace("@everyone", "@\u{200b}everyone")
        .replace("@here", "@\u{200b}here")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutralizes_mass_mentions() {
        let out = sanitize_reason("spam @everyone and @here", false);
        assert!(!out.contains("@everyone"));
        assert!(!out.contains("@here"));
        assert!(out.contains("everyone"));
    }

    #[test]
    fn test_privileged_reason_untouched() {
        assert_eq!(
            sanitize_reason("ping @everyone", true),
            "ping @everyone"
        );
    }

    #[test]
    fn test_plain_reason_untouched() {
        assert_eq!(sanitize_reason("being rude", false), "being rude");
    }
}
