use once_cell::sync::Lazy;

/// Host fragments that mark a Discord invite link in a display name.
static INVITE_TOKENS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "discord.gg/",
        "discord.io/",
        "discord.me/",
        "discord.li/",
        "discord.com/invite",
        "discordapp.com/invite",
        ".gg/",
    ]
});

/// Whether the given display name carries an invite-style link token.
pub fn contains_invite_link(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    INVITE_TOKENS.iter().any(|token| name.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_invites() {
        assert!(contains_invite_link("join discord.gg/abc123"));
        assert!(contains_invite_link("DISCORD.GG/RAID"));
        assert!(contains_invite_link("discordapp.com/invite/xyz"));
        assert!(contains_invite_link("dsc .gg/free-nitro"));
    }

    #[test]
    fn test_ignores_normal_names() {
        assert!(!contains_invite_link("Alice"));
        assert!(!contains_invite_link("discord fan"));
        assert!(!contains_invite_link("gg wp"));
    }
}
