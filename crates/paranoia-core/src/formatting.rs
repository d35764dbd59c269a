//! Text helpers for published answers.

/// Longest answer the bot will publish verbatim.
pub const ANSWER_LIMIT: usize = 712;
/// Where over-long answers are cut before the ellipsis marker.
const TRUNCATE_AT: usize = 709;

/// Cap an answer at [`ANSWER_LIMIT`] characters.
///
/// Longer answers become their first 709 characters followed by three
/// literal dots, for exactly 712 characters total. Counts characters, not
/// bytes, so multi-byte input is never split mid-codepoint.
pub fn truncate_answer(answer: &str) -> String {
    if answer.chars().count() <= ANSWER_LIMIT {
        return answer.to_string();
    }
    let mut out: String = answer.chars().take(TRUNCATE_AT).collect();
    out.push_str("...");
    out
}

/// CDN url for the author icon on published answers.
pub fn avatar_url(user_id: u64, avatar_hash: &str) -> String {
    format!("https://cdn.discordapp.com/avatars/{user_id}/{avatar_hash}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_answers_pass_through() {
        assert_eq!(truncate_answer(""), "");
        assert_eq!(truncate_answer("yes"), "yes");

        let exactly = "a".repeat(ANSWER_LIMIT);
        assert_eq!(truncate_answer(&exactly), exactly);
    }

    #[test]
    fn long_answers_cut_to_exactly_712() {
        let long = "b".repeat(800);
        let out = truncate_answer(&long);
        assert_eq!(out.chars().count(), ANSWER_LIMIT);
        assert_eq!(out, format!("{}...", "b".repeat(709)));
    }

    #[test]
    fn one_over_the_limit_is_truncated() {
        let long = "c".repeat(ANSWER_LIMIT + 1);
        let out = truncate_answer(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), ANSWER_LIMIT);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "ü".repeat(800);
        let out = truncate_answer(&long);
        assert_eq!(out.chars().count(), ANSWER_LIMIT);
        assert_eq!(out, format!("{}...", "ü".repeat(709)));
    }

    #[test]
    fn avatar_url_shape() {
        assert_eq!(
            avatar_url(42, "abc123"),
            "https://cdn.discordapp.com/avatars/42/abc123.png"
        );
    }
}
