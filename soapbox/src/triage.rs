use soapbox_api_types::Priority;

/// Words that mark a submission as throwaway. A complaint is rejected when any
/// whitespace separated word of the lowercased text matches one of these.
const SPAM_WORDS: [&str; 10] = [
    "hi", "hello", "hey", "test", "ok", "hii", "nothing", "abcd", "asdf", "1234",
];

/// Minimum length (in characters) a trimmed complaint must reach before it is
/// taken seriously.
const MIN_COMPLAINT_LEN: usize = 10;

/// Keyword triage over the raw complaint text. Matches are substring matches
/// on the lowercased text, so "overflowing" and "annoying" both count.
pub(crate) fn assign_priority(text: &str) -> Priority {
    let text = text.to_lowercase();
    if ["no", "overflow", "danger"]
        .iter()
        .any(|keyword| text.contains(keyword))
    {
        Priority::High
    } else if ["delay", "problem"]
        .iter()
        .any(|keyword| text.contains(keyword))
    {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Filters out greetings, keyboard mashing and one liners too short to act on.
pub(crate) fn is_spam(text: &str) -> bool {
    let text = text.to_lowercase();
    let text = text.trim();
    if text
        .split_whitespace()
        .any(|word| SPAM_WORDS.contains(&word))
    {
        return true;
    }
    text.chars().count() < MIN_COMPLAINT_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_hits_map_to_priorities() {
        assert_eq!(
            assign_priority("There is no water in our street"),
            Priority::High
        );
        assert_eq!(
            assign_priority("Garbage bin OVERFLOW near the market"),
            Priority::High
        );
        assert_eq!(
            assign_priority("Dangerous pothole on the highway"),
            Priority::High
        );
        assert_eq!(
            assign_priority("Water supply delayed again this week"),
            Priority::Medium
        );
        assert_eq!(
            assign_priority("Streetlight problem on elm avenue"),
            Priority::Medium
        );
        assert_eq!(
            assign_priority("Please trim the park hedges"),
            Priority::Low
        );
    }

    #[test]
    fn priority_matches_inside_words() {
        // Substring matching is intentional: "annoying" contains "no".
        assert_eq!(
            assign_priority("Annoying construction noise at midnight"),
            Priority::High
        );
        assert_eq!(
            assign_priority("Drain overflowing since yesterday"),
            Priority::High
        );
    }

    #[test]
    fn high_wins_over_medium() {
        // "no" and "delay" both hit; the high keyword decides.
        assert_eq!(
            assign_priority("No update, they delay the repair forever"),
            Priority::High
        );
    }

    #[test]
    fn spam_words_are_rejected_case_insensitively() {
        assert!(is_spam("hello"));
        assert!(is_spam("HELLO there, this is long enough"));
        assert!(is_spam("asdf asdf asdf asdf"));
        assert!(is_spam("this is just a test of the system"));
    }

    #[test]
    fn spam_words_only_match_whole_words() {
        // "hilltop" contains "hi" but is not the word "hi".
        assert!(!is_spam("The hilltop road is washed out completely"));
    }

    #[test]
    fn short_complaints_are_spam() {
        assert!(is_spam("Bad road"));
        assert!(is_spam("   "));
        assert!(!is_spam("Bad road near the school"));
    }

    #[test]
    fn nothing_is_spam_but_still_high_priority() {
        // Both rules see the same word differently: is_spam matches the whole
        // word "nothing", assign_priority matches the "no" inside it.
        assert!(is_spam("nothing"));
        assert_eq!(assign_priority("nothing works here"), Priority::High);
    }
}
