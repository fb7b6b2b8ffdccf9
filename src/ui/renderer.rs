//! Plain-text rendering of the list view.
//!
//! Produces the lines the terminal shell prints. Rendering is a pure
//! function of the [`ListView`] so it can be asserted on directly.

use crate::ui::viewmodel::{ListView, RowView};
use std::fmt::Write as _;

/// Renders the view to a string, one line per entry.
///
/// # Example
///
/// ```rust
/// use todo_sync::app::ListState;
/// use todo_sync::ui::render;
///
/// let text = render(&ListState::default().compute_view());
/// assert!(text.starts_with("Todos (0)"));
/// ```
#[must_use]
pub fn render(view: &ListView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.heading);

    if let Some(message) = &view.empty_message {
        let _ = writeln!(out, "  {message}");
    }

    for row in &view.rows {
        render_row(&mut out, row);
    }

    if !view.compose.is_empty() {
        let _ = writeln!(out, "new: {}", format_draft(&view.compose.title, &view.compose.description));
    }

    out
}

fn render_row(out: &mut String, row: &RowView) {
    let mark = if row.completed { 'x' } else { ' ' };

    match &row.editing {
        Some(draft) => {
            let _ = writeln!(
                out,
                "  [{mark}] #{} (editing) {}",
                row.id,
                format_draft(&draft.title, &draft.description)
            );
        }
        None => {
            let _ = writeln!(out, "  [{mark}] #{} {}  (created {})", row.id, row.title, row.created_label);
            if !row.description.is_empty() {
                let _ = writeln!(out, "        {}", row.description);
            }
        }
    }
}

fn format_draft(title: &str, description: &str) -> String {
    if description.is_empty() {
        format!("{title:?}")
    } else {
        format!("{title:?} | {description:?}")
    }
}
