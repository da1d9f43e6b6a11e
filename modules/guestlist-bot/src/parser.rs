use guestlist_common::{EventSubmission, GuestlistError};

/// Separator between the event name, date, and participants blob.
const FIELD_SEPARATOR: char = '$';

/// Literal separator between participant names.
const NAME_SEPARATOR: &str = ", ";

/// Parse one `Name$Date$P1, P2, ...` line into a submission.
///
/// Exactly three `$`-delimited segments are required. Participant names are
/// trimmed and empty fragments dropped; a submission with zero surviving
/// names is valid (the projector appends nothing for it).
pub fn parse(raw: &str) -> Result<EventSubmission, GuestlistError> {
    let parts: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    let [name, date, blob] = parts.as_slice() else {
        return Err(GuestlistError::Parse(format!(
            "expected 3 '$'-separated fields, got {}",
            parts.len()
        )));
    };

    let participants = blob
        .split(NAME_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect();

    Ok(EventSubmission {
        event_name: name.trim().to_string(),
        event_date: date.trim().to_string(),
        participants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_submission_parses() {
        let submission = parse("N$D$A, B").unwrap();
        assert_eq!(submission.event_name, "N");
        assert_eq!(submission.event_date, "D");
        assert_eq!(submission.participants, vec!["A", "B"]);
    }

    #[test]
    fn single_participant_parses() {
        let submission = parse("Hackathon$2024-03-01$Alice").unwrap();
        assert_eq!(submission.participants, vec!["Alice"]);
    }

    #[test]
    fn missing_separators_is_an_error() {
        assert!(matches!(parse("BadFormat"), Err(GuestlistError::Parse(_))));
        assert!(matches!(parse("Name$Date"), Err(GuestlistError::Parse(_))));
    }

    #[test]
    fn extra_separator_is_an_error() {
        assert!(matches!(
            parse("Name$Date$A, B$extra"),
            Err(GuestlistError::Parse(_))
        ));
    }

    #[test]
    fn names_are_trimmed_and_empty_fragments_dropped() {
        let submission = parse("N$D$ Alice , , Bob ").unwrap();
        assert_eq!(submission.participants, vec!["Alice", "Bob"]);
    }

    #[test]
    fn zero_participants_is_valid_but_empty() {
        let submission = parse("Party$2024-01-01$").unwrap();
        assert!(submission.participants.is_empty());
    }

    #[test]
    fn name_and_date_are_trimmed() {
        // The router strips the bot handle off the front, leaving whitespace.
        let submission = parse(" Hackathon$ 2024-03-01 $Alice").unwrap();
        assert_eq!(submission.event_name, "Hackathon");
        assert_eq!(submission.event_date, "2024-03-01");
    }
}
