//! Plain-text rendering of notes, lists and error notices.

use notes_client::Operation;
use notes_core::presentation::{
    format_timestamp, needs_expansion, short_id, ErrorNotice, COLLAPSE_THRESHOLD, LOADING_NOTES,
    NO_NOTES_FOUND,
};
use notes_core::types::Note;
use notes_store::NotesSnapshot;

/// Render the collection view: loading, fetch error, empty, or the notes.
pub fn render_list(snapshot: &NotesSnapshot) -> String {
    if snapshot.is_loading {
        return LOADING_NOTES.to_string();
    }

    if let Some(err) = &snapshot.last_error {
        let notice = ErrorNotice::from_message(&err.message, Operation::Fetch.default_message());
        return render_notice(&notice);
    }

    if snapshot.notes.is_empty() {
        return NO_NOTES_FOUND.to_string();
    }

    snapshot
        .notes
        .iter()
        .map(|note| render_note(note, false))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render one note card. Long content is collapsed unless `expanded`.
pub fn render_note(note: &Note, expanded: bool) -> String {
    let mut out = format!("{}\n", note.title);

    if expanded || !needs_expansion(&note.content) {
        out.push_str(&note.content);
    } else {
        let preview: String = note.content.chars().take(COLLAPSE_THRESHOLD).collect();
        out.push_str(&preview);
        out.push_str("... (Read more)");
    }
    out.push('\n');

    if !note.tags.is_empty() {
        let tags: Vec<String> = note.tags.iter().map(|t| format!("#{t}")).collect();
        out.push_str(&tags.join(" "));
        out.push('\n');
    }

    out.push_str(&format!(
        "Created: {} | Updated: {} | ID: {}",
        format_timestamp(&note.created_at),
        format_timestamp(&note.updated_at),
        short_id(&note.id),
    ));
    out
}

/// Render an error notice, with its heading on its own line.
pub fn render_notice(notice: &ErrorNotice) -> String {
    match notice.heading() {
        Some(heading) => format!("{heading}\n{}", notice.message),
        None => notice.message.clone(),
    }
}
