//! Notes sync CLI - loads the board from a running notes backend, applies
//! one change through the sync agent, and prints the resulting board.
//!
//! Default API: http://127.0.0.1:3000

use clap::{Parser, Subcommand};
use notes_sync::{HttpNotesApi, SyncAgent, SyncState};
use notes_types::NoteId;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "notes-sync", version, about = "Sync and edit notes from the terminal")]
struct Cli {
    /// Base URL of the notes backend
    #[arg(long, env = "NOTES_API_URL", default_value = "http://127.0.0.1:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show all notes
    List,
    /// Create a note
    Add {
        /// Color token, e.g. "#ffcc00"
        #[arg(long)]
        color: Option<String>,
        /// Note text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a note by id
    Delete { id: String },
}

fn print_board(state: &SyncState) {
    if state.is_empty() {
        println!("(no notes)");
        return;
    }
    for note in state.notes() {
        let id = note.id.as_ref().map(NoteId::as_str).unwrap_or("-");
        println!("[{}] {} {} {}", note.key, id, note.color, note.text);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let agent = SyncAgent::new(HttpNotesApi::new(&cli.api_url));
    let mut state = SyncState::new();

    log::info!("Syncing with {}", agent.api().base_url());

    if let Err(e) = agent.load_notes(&mut state).await {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Command::List => Ok(()),
        Command::Add { color, text } => agent
            .submit_note(&mut state, &text.join(" "), color.as_deref())
            .await
            .map(|_| ()),
        Command::Delete { id } => {
            let id = NoteId::new(id);
            match state.key_for(&id) {
                Some(key) => agent.delete_note_from_db(&mut state, &id, key).await,
                None => {
                    eprintln!("Note {} is not on the board", id);
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        print_board(&state);
        return ExitCode::FAILURE;
    }

    print_board(&state);
    ExitCode::SUCCESS
}
