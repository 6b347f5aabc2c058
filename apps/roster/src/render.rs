//! Plain-text rendering of the two birth-year lists.

use std::fmt::Write as _;

use roster_core::{LoadState, RosterController};
use shared::domain::UserRecord;

pub fn render(roster: &RosterController, load: &LoadState, status: &str) -> String {
    let mut out = String::new();
    let year = roster.split_year();

    if load.is_loading {
        out.push_str("Loading users...\n");
    }
    if load.has_error {
        out.push_str("Failed to load users; showing the last loaded list.\n");
    }

    render_section(&mut out, roster, &format!("Users born before {year}"), &roster.views().before);
    render_section(&mut out, roster, &format!("Users born after {year}"), &roster.views().after);

    if !status.is_empty() {
        let _ = writeln!(out, "> {status}");
    }
    out
}

fn render_section(out: &mut String, roster: &RosterController, title: &str, rows: &[UserRecord]) {
    let _ = writeln!(out, "{title}");
    if rows.is_empty() {
        out.push_str("  (none)\n");
    }
    for user in rows {
        let _ = writeln!(out, "  {}: {} - {}", user.id, user.display_name, user.birth_date);
        if let Some(pending) = roster.pending_value(user.id) {
            let _ = writeln!(out, "      [editing] {pending}  (apply | cancel)");
        }
    }
}
