use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(version, about = "Command-line client for the notes service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List all notes.
    List,
    /// Create a note.
    Create(NoteArgs),
    /// Replace a note's title, content and tags.
    Update {
        id: String,
        #[command(flatten)]
        note: NoteArgs,
    },
    /// Delete a note.
    Delete { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct NoteArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
    /// Comma-separated, e.g. "work, personal, ideas".
    #[arg(long, default_value = "")]
    pub tags: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_tags() {
        let cli = Cli::try_parse_from([
            "notes-cli", "create", "--title", "A", "--content", "B", "--tags", "work, ideas",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Create(NoteArgs {
                title: "A".into(),
                content: "B".into(),
                tags: "work, ideas".into(),
            })
        );
    }

    #[test]
    fn parses_update_with_positional_id() {
        let cli = Cli::try_parse_from([
            "notes-cli", "update", "42", "--title", "A", "--content", "B",
        ])
        .unwrap();

        let Command::Update { id, note } = cli.command else {
            panic!("expected update");
        };
        assert_eq!(id, "42");
        assert_eq!(note.tags, "");
    }

    #[test]
    fn delete_requires_id() {
        assert!(Cli::try_parse_from(["notes-cli", "delete"]).is_err());
    }
}
