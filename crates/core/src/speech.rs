//! Canned Speech and Sentence Assembly
//!
//! The fixed phrases the skill speaks, plus the small grammar helpers that
//! assemble arrival sentences: list joining with a spoken conjunction and
//! singular/plural agreement on the train count.

/// Spoken when the user opens the skill without a specific request.
pub const LAUNCH_PROMPT: &str =
    "Welcome to Metro Transit. Which station would you like train arrivals for?";
/// Spoken when the user does not answer the launch prompt.
pub const LAUNCH_REPROMPT: &str =
    "You can ask for train arrivals at a station, or for current service advisories.";

pub const HELP_TEXT: &str = "Ask me when the next train leaves a station, for example: \
    when is the next train from metro center. You can also ask for service advisories.";
pub const HELP_CARD_TITLE: &str = "Metro Transit Help";
pub const HELP_CARD_TEXT: &str = "Ask for train arrivals at a station, for example \
    \"when is the next train from metro center\", or ask for current service advisories.";

/// Spoken on any transit API failure.
pub const SERVICE_UNAVAILABLE: &str =
    "Sorry, Metro Transit information is unavailable right now. Please try again later.";
/// Spoken when a station query finds no qualifying arrivals.
pub const NO_ARRIVALS: &str = "There are no trains currently arriving at that station.";
/// Spoken when the advisories payload is missing its incident list.
pub const ADVISORIES_UNAVAILABLE: &str =
    "Sorry, I could not read the current service advisories. Please try again later.";
/// Spoken when the station slot arrived without a value.
pub const STATION_NOT_HEARD: &str =
    "Sorry, I didn't catch the station name. Please ask again.";
/// Spoken when the destination slot arrived without a value.
pub const DESTINATION_NOT_HEARD: &str =
    "Sorry, I didn't catch the destination. Please ask again.";

/// The error for a spoken station name the directory cannot resolve.
pub fn station_not_understood(spoken_name: &str) -> String {
    format!(
        "Sorry, I don't know a station called {}. Please ask again.",
        spoken_name
    )
}

/// The error for a destination absent from the cached arrival board.
pub fn destination_not_recognized(spoken_name: &str) -> String {
    format!("Sorry, I don't see any trains heading to {}.", spoken_name)
}

/// Joins items the way they are spoken: "a", "a and b", "a, b and c".
pub fn join_with_conjunction<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [rest @ .., last] => format!(
            "{} {} {}",
            rest.iter()
                .map(|item| item.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            conjunction,
            last.as_ref()
        ),
    }
}

/// The disambiguation question asked after a station query.
pub fn destination_prompt(destinations: &[&str]) -> String {
    format!(
        "Are you going to {}?",
        join_with_conjunction(destinations, "or")
    )
}

/// The terminal arrival sentence for one destination.
///
/// Noun and verb agree with the number of cached countdowns.
pub fn arrival_sentence(destination: &str, countdowns: &[String]) -> String {
    let times = join_with_conjunction(countdowns, "and");
    if countdowns.len() == 1 {
        format!(
            "The next train heading to {} arrives in {} minutes.",
            destination, times
        )
    } else {
        format!(
            "The next {} trains heading to {} arrive in {} minutes.",
            countdowns.len(),
            destination,
            times
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_with_conjunction() {
        assert_eq!(join_with_conjunction::<&str>(&[], "and"), "");
        assert_eq!(join_with_conjunction(&["a"], "and"), "a");
        assert_eq!(join_with_conjunction(&["a", "b"], "and"), "a and b");
        assert_eq!(join_with_conjunction(&["a", "b", "c"], "or"), "a, b or c");
    }

    #[test]
    fn test_destination_prompt_single() {
        assert_eq!(
            destination_prompt(&["shady grove"]),
            "Are you going to shady grove?"
        );
    }

    #[test]
    fn test_destination_prompt_multiple() {
        assert_eq!(
            destination_prompt(&["shady grove", "glenmont", "silver spring"]),
            "Are you going to shady grove, glenmont or silver spring?"
        );
    }

    #[test]
    fn test_arrival_sentence_singular() {
        let sentence = arrival_sentence("glenmont", &["4".to_string()]);
        assert_eq!(
            sentence,
            "The next train heading to glenmont arrives in 4 minutes."
        );
    }

    #[test]
    fn test_arrival_sentence_plural() {
        let sentence = arrival_sentence("shady grove", &["5".to_string(), "12".to_string()]);
        assert_eq!(
            sentence,
            "The next 2 trains heading to shady grove arrive in 5 and 12 minutes."
        );
    }

    #[test]
    fn test_arrival_sentence_three_trains() {
        let countdowns = vec!["BRD".to_string(), "6".to_string(), "14".to_string()];
        assert_eq!(
            arrival_sentence("vienna", &countdowns),
            "The next 3 trains heading to vienna arrive in BRD, 6 and 14 minutes."
        );
    }
}
