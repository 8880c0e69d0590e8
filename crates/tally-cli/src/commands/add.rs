//! Add command for logging a new event.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use tally_core::{Category, RecordStore, Tracker};

use crate::commands::show;
use crate::notify::{self, Notification, Outcome};

/// Logs `category` at `now` and prints the refreshed view.
pub fn run<S: RecordStore, W: Write>(
    writer: &mut W,
    tracker: &mut Tracker<S>,
    category: Category,
    now: DateTime<FixedOffset>,
) -> Result<Outcome> {
    let (id, view) = match tracker.submit_at(category, now) {
        Ok(saved) => saved,
        Err(err) => return Ok(Outcome::Failed(notify::failure("saving the record", &err))),
    };

    let notification = Notification::success(
        "Record saved",
        format!("Saved {category} record #{id}."),
    );
    writeln!(writer, "{notification}")?;
    writeln!(writer)?;
    show::render(writer, &view, now.date_naive())?;
    Ok(Outcome::Done)
}
