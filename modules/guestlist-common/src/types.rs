/// One parsed `Name$Date$P1, P2, ...` submission. Ephemeral — lives only for
/// the duration of one projection call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSubmission {
    pub event_name: String,
    /// Free-form, not validated.
    pub event_date: String,
    /// Ordered; may be empty.
    pub participants: Vec<String>,
}

impl EventSubmission {
    /// The row block to append: the first row carries the event name and
    /// date next to the first participant, every later row only a name.
    pub fn participant_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.participants.len());
        for (i, participant) in self.participants.iter().enumerate() {
            if i == 0 {
                rows.push(vec![
                    self.event_name.clone(),
                    self.event_date.clone(),
                    participant.clone(),
                ]);
            } else {
                rows.push(vec![String::new(), String::new(), participant.clone()]);
            }
        }
        rows
    }
}

/// One tab of the target spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub sheet_id: i64,
    pub title: String,
}

/// The 0-based half-open row span an append landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendedRange {
    pub start_row: u32,
    pub end_row: u32,
}
