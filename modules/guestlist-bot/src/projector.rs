use std::sync::Arc;

use tracing::info;

use guestlist_common::{EventSubmission, GuestlistError};

use crate::traits::SheetStore;

/// Fixed three-column header written into row 1 of every new tab.
pub const HEADER: [&str; 3] = ["Event Name", "Event Date", "Participant Name"];

/// Projects parsed submissions into the spreadsheet: one tab per event,
/// lazily created, participant blocks appended beneath existing content.
pub struct Projector {
    store: Arc<dyn SheetStore>,
}

impl Projector {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    /// Ensure the event's tab exists, write the header if the tab is new,
    /// append the participant block, and style the touched ranges.
    ///
    /// No transaction: rows already appended stay even if styling fails.
    pub async fn project(&self, submission: &EventSubmission) -> Result<String, GuestlistError> {
        let tabs = self.store.tabs().await?;
        let existing = tabs
            .into_iter()
            .find(|tab| tab.title == submission.event_name);

        // The tab id is resolved on both branches so styling always has a
        // valid target.
        let (tab, created) = match existing {
            Some(tab) => (tab, false),
            None => (self.store.create_tab(&submission.event_name).await?, true),
        };

        if created {
            self.store.write_header(&tab.title, &HEADER).await?;
        }

        let rows = submission.participant_rows();
        if rows.is_empty() {
            info!(event = %submission.event_name, "Submission had no participants; tab ensured only");
        } else {
            let block = self.store.append_rows(&tab.title, rows).await?;
            self.store.style_event_tab(tab.sheet_id, block).await?;
            info!(
                event = %submission.event_name,
                participants = submission.participants.len(),
                created,
                "Projected submission"
            );
        }

        Ok(format!(
            "Event '{}' logged successfully.",
            submission.event_name
        ))
    }
}
