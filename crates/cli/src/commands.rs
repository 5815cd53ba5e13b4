//! Command execution against the notes store.

use notes_client::NoteService;
use notes_core::presentation::{short_id, CREATE_FALLBACK, DELETE_FALLBACK, UPDATE_FALLBACK};
use notes_core::types::NoteInput;
use notes_core::validation::parse_tags;
use notes_store::{NotesHandle, StoreError};

use crate::cli::{Command, NoteArgs};
use crate::render::{render_list, render_notice};

/// Run one command. `Ok` and `Err` both carry the text to print; `Err`
/// means the command failed.
pub async fn execute<S: NoteService>(
    command: Command,
    notes: &NotesHandle<S>,
) -> Result<String, String> {
    match command {
        Command::List => {
            let snapshot = notes.load().await;
            let out = render_list(&snapshot);
            if snapshot.last_error.is_some() {
                Err(out)
            } else {
                Ok(out)
            }
        }
        Command::Create(args) => {
            notes.set_show_create_note(true);
            let result = notes.create_note(&note_input(args)).await;
            notes.set_show_create_note(false);
            let created = result.map_err(|e| failure(&e, CREATE_FALLBACK))?;

            Ok(with_list(notes, format!("Created note {}", short_id(&created.id))).await)
        }
        Command::Update { id, note } => {
            let updated = notes
                .update_note(&id, &note_input(note))
                .await
                .map_err(|e| failure(&e, UPDATE_FALLBACK))?;

            Ok(with_list(notes, format!("Updated note {}", short_id(&updated.id))).await)
        }
        Command::Delete { id } => {
            notes
                .delete_note(&id)
                .await
                .map_err(|e| failure(&e, DELETE_FALLBACK))?;

            Ok(with_list(notes, format!("Deleted note {}", short_id(&id))).await)
        }
    }
}

fn note_input(args: NoteArgs) -> NoteInput {
    NoteInput {
        title: args.title,
        content: args.content,
        tags: parse_tags(&args.tags),
    }
}

fn failure(err: &StoreError, fallback: &str) -> String {
    tracing::debug!(error = %err, rate_limited = err.is_rate_limited(), "Command failed");
    render_notice(&err.notice(fallback))
}

/// Append the refetched collection to a mutation's confirmation line.
async fn with_list<S: NoteService>(notes: &NotesHandle<S>, headline: String) -> String {
    let snapshot = notes.load().await;
    format!("{headline}\n\n{}", render_list(&snapshot))
}
