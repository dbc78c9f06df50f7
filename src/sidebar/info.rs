// Revision-info summary shown at the top of the sidebar

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::revision::ContentRevision;
use crate::workflow::ModerationState;

/// Presentation data for the sidebar info block. The host's renderer
/// turns this into markup; this crate only supplies the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionSummary {
    /// Entity label
    pub title: String,
    /// Display label of the current moderation state
    pub state_label: String,
    /// Id of the revision being summarized
    pub revision_id: u64,
    /// Revision author, when the entity keeps a revision log
    pub author: Option<String>,
    /// Raw edit timestamp, from the revision log or the changed field
    pub edited: Option<DateTime<Utc>>,
    /// Formatted edit timestamp: relative for recent edits, absolute
    /// otherwise
    pub edited_display: Option<String>,
}

impl RevisionSummary {
    /// Build the summary for a revision.
    ///
    /// Branches on the optional capabilities of the revision: a
    /// revision log supplies author and creation time; without one,
    /// the changed timestamp (if tracked) still yields a time line.
    pub fn build(
        revision: &ContentRevision,
        state: &ModerationState,
        now: DateTime<Utc>,
        recent_window: Duration,
    ) -> Self {
        let (author, edited) = match revision.revision_log() {
            Some(log) => (Some(log.author.clone()), Some(log.created)),
            None => (None, revision.changed()),
        };

        let edited_display = edited.map(|time| format_edit_time(time, now, recent_window));

        Self {
            title: revision.title.clone(),
            state_label: state.label.clone(),
            revision_id: revision.revision_id,
            author,
            edited,
            edited_display,
        }
    }
}

/// Edits younger than the window render as a single-granularity time
/// difference ("3 hours ago"); older edits render as an absolute date.
fn format_edit_time(time: DateTime<Utc>, now: DateTime<Utc>, recent_window: Duration) -> String {
    let age = now.signed_duration_since(time);
    if age < recent_window {
        format!("{} ago", humanize_age(age))
    } else {
        format!("on {}", time.format("%m/%d/%Y - %I:%M %p"))
    }
}

fn humanize_age(age: Duration) -> String {
    let seconds = age.num_seconds().max(0);

    let (count, unit) = if seconds < 60 {
        (seconds, "second")
    } else if seconds < 3600 {
        (seconds / 60, "minute")
    } else if seconds < 86_400 {
        (seconds / 3600, "hour")
    } else if seconds < 7 * 86_400 {
        (seconds / 86_400, "day")
    } else {
        (seconds / (7 * 86_400), "week")
    };

    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
