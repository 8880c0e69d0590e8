//! Show command and the plain-text view renderer shared by other commands.

use std::io::{self, Write};

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::{Category, RecordStore, Tracker, View};

use crate::notify::{self, Outcome};

/// Runs the show command for `date` (`None` shows every day).
pub fn run<S: RecordStore, W: Write>(
    writer: &mut W,
    tracker: &mut Tracker<S>,
    date: Option<NaiveDate>,
    json: bool,
    today: NaiveDate,
) -> Result<Outcome> {
    let view = match tracker.filter_by_date(date) {
        Ok(view) => view,
        Err(err) => return Ok(Outcome::Failed(notify::failure("loading the records", &err))),
    };

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&view)?)?;
    } else {
        render(writer, &view, today)?;
    }
    Ok(Outcome::Done)
}

/// Writes the per-category listing.
///
/// The delta line only appears when the view is scoped to `today`.
pub fn render<W: Write>(writer: &mut W, view: &View, today: NaiveDate) -> io::Result<()> {
    match view.selected_date {
        Some(day) => writeln!(writer, "Date: {}", day.format("%d-%m-%Y"))?,
        None => writeln!(writer, "Date: all days")?,
    }
    let shows_today = view.selected_date == Some(today);

    for category in Category::ALL {
        let records = view.records(category);
        writeln!(writer)?;
        writeln!(writer, "{} records ({})", category.label(), records.len())?;

        if records.is_empty() {
            if view.selected_date.is_some() {
                writeln!(writer, "  No {category} records on that date")?;
            } else {
                writeln!(writer, "  No {category} records")?;
            }
            continue;
        }

        for record in records {
            writeln!(
                writer,
                "  #{:<5}{}",
                record.id.get(),
                record.timestamp.format("%d-%b-%y %I:%M %P")
            )?;
        }

        if let Some(duplicate) = view.duplicates.iter().find(|d| d.category == category) {
            writeln!(
                writer,
                "  Warning: records #{} and #{} were logged at the same time",
                duplicate.newest, duplicate.previous
            )?;
        }

        if shows_today {
            if let Some(minutes) = view.delta(category) {
                let unit = if minutes == 1 { "minute" } else { "minutes" };
                writeln!(
                    writer,
                    "  Time between the last two {category} records: {minutes} {unit}"
                )?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, FixedOffset};
    use insta::assert_snapshot;
    use tally_core::MemoryStore;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.create(Category::Water, at("2025-03-04T10:00:00-05:00")).unwrap();
        store.create(Category::Water, at("2025-03-04T10:07:00-05:00")).unwrap();
        store.create(Category::Restroom, at("2025-03-03T21:15:00-05:00")).unwrap();
        store
    }

    #[test]
    fn show_today_includes_delta() {
        let mut tracker = Tracker::with_selected_date(seeded_store(), None);
        let mut output = Vec::new();

        let outcome = run(&mut output, &mut tracker, Some(day("2025-03-04")), false, day("2025-03-04")).unwrap();
        assert!(matches!(outcome, Outcome::Done));

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Date: 04-03-2025

        Water records (2)
          #2    04-Mar-25 10:07 am
          #1    04-Mar-25 10:00 am
          Time between the last two water records: 7 minutes

        Restroom records (0)
          No restroom records on that date
        ");
    }

    #[test]
    fn show_past_day_hides_delta() {
        let mut tracker = Tracker::with_selected_date(seeded_store(), None);
        let mut output = Vec::new();

        run(&mut output, &mut tracker, Some(day("2025-03-04")), false, day("2025-03-05")).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Water records (2)"));
        assert!(!output.contains("Time between"));
        // The delta is still persisted.
        let stored = tracker.store().list_all().unwrap();
        assert_eq!(stored[1].elapsed_minutes, Some(7));
    }

    #[test]
    fn show_all_days_lists_everything() {
        let mut tracker = Tracker::with_selected_date(seeded_store(), None);
        let mut output = Vec::new();

        run(&mut output, &mut tracker, None, false, day("2025-03-04")).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Date: all days

        Water records (2)
          #2    04-Mar-25 10:07 am
          #1    04-Mar-25 10:00 am

        Restroom records (1)
          #3    03-Mar-25 09:15 pm
        ");
    }

    #[test]
    fn show_reports_duplicates() {
        let mut store = MemoryStore::new();
        store.create(Category::Restroom, at("2025-03-04T10:00:00-05:00")).unwrap();
        store.create(Category::Restroom, at("2025-03-04T10:00:00-05:00")).unwrap();
        let mut tracker = Tracker::with_selected_date(store, None);
        let mut output = Vec::new();

        run(&mut output, &mut tracker, Some(day("2025-03-04")), false, day("2025-03-04")).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Warning: records #1 and #2 were logged at the same time"));
        assert!(!output.contains("Time between the last two restroom records"));
    }

    #[test]
    fn show_json_serializes_view() {
        let mut tracker = Tracker::with_selected_date(seeded_store(), None);
        let mut output = Vec::new();

        run(&mut output, &mut tracker, Some(day("2025-03-04")), true, day("2025-03-04")).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["selected_date"], "2025-03-04");
        assert_eq!(value["deltas"]["water"], 7);
        assert!(value["deltas"]["restroom"].is_null());
        assert_eq!(value["by_category"]["water"][0]["id"], 2);
    }

    #[test]
    fn show_failure_becomes_notification() {
        let mut store = MemoryStore::new();
        store.set_unavailable(true);
        let mut tracker = Tracker::with_selected_date(store, None);
        let mut output = Vec::new();

        let outcome = run(&mut output, &mut tracker, None, false, day("2025-03-04")).unwrap();

        let Outcome::Failed(notification) = outcome else {
            panic!("expected failure");
        };
        assert!(notification.description.starts_with("There was an error loading the records"));
        assert!(output.is_empty());
    }
}
