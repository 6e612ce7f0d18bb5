//! Service-flag extraction.

use super::schema;

/// Extract named service attributes from the raw `#`-delimited flag string.
///
/// Each token is checked against the fixed vocabulary by substring
/// containment; the first vocabulary entry that matches a token wins and the
/// rest are not tried for that token. Upstream tokens carry extra markup
/// around the flag name, hence containment rather than equality.
///
/// The result has set semantics: a flag hit by several tokens appears once,
/// in first-hit order.
pub fn extract_service_flags(raw: &str) -> Vec<String> {
    let mut flags: Vec<String> = Vec::new();

    if raw.is_empty() {
        return flags;
    }

    for token in raw.split(schema::FLAG_DELIMITER) {
        let Some(flag) = schema::SERVICE_FLAGS.iter().find(|f| token.contains(**f)) else {
            continue;
        };
        if !flags.iter().any(|seen| seen == flag) {
            flags.push((*flag).to_string());
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_flags() {
        assert!(extract_service_flags("").is_empty());
    }

    #[test]
    fn unknown_tokens_yield_no_flags() {
        assert!(extract_service_flags("Q#Z#D1D1").is_empty());
    }

    #[test]
    fn token_containing_flag_matches() {
        let flags = extract_service_flags("复兴号动车组#Q");
        assert_eq!(flags, vec!["复兴号"]);
    }

    #[test]
    fn multiple_tokens_collect_multiple_flags() {
        let flags = extract_service_flags("智能动车组#复兴号#静音车厢");
        assert_eq!(flags, vec!["智能动车组", "复兴号", "静音车厢"]);
    }

    #[test]
    fn duplicate_hits_collapse() {
        let flags = extract_service_flags("复兴号#复兴号智能化#复兴号");
        assert_eq!(flags, vec!["复兴号"]);
    }

    /// First vocabulary match wins per token: a token containing two flags
    /// only reports the one listed earlier in the vocabulary. Documented
    /// upstream behavior, kept as-is.
    #[test]
    fn first_vocabulary_match_wins_within_token() {
        let flags = extract_service_flags("智能动车组复兴号");
        assert_eq!(flags, vec!["智能动车组"]);
    }

    #[test]
    fn order_follows_first_hit() {
        let flags = extract_service_flags("老年优惠#智能动车组");
        assert_eq!(flags, vec!["老年优惠", "智能动车组"]);
    }
}
