//! Save-slot inspector (default binary).
//!
//! Reads the save directory (`BLOCKTRIS_SAVE_DIR`, default `.blocktris`):
//!
//! - `blocktris show`: saved board and stats
//! - `blocktris scores`: leaderboard
//! - `blocktris clear`: delete the saved game

use anyhow::{bail, Context, Result};
use log::info;

use blocktris::core::{Leaderboard, PersistedSnapshot, SnapshotError, Storage, SNAPSHOT_KEY};
use blocktris::storage::{FileStorage, StorageConfig};
use blocktris::types::PieceKind;

const USAGE: &str = "usage: blocktris <show|scores|clear>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Show,
    Scores,
    Clear,
    Help,
}

fn parse_command() -> Result<Command> {
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        None | Some("show") => Command::Show,
        Some("scores") => Command::Scores,
        Some("clear") => Command::Clear,
        Some("--help" | "-h" | "help") => Command::Help,
        Some(other) => bail!("unknown command: {other}\n{USAGE}"),
    };
    if let Some(extra) = args.next() {
        bail!("unexpected argument: {extra}\n{USAGE}");
    }
    Ok(command)
}

fn main() -> Result<()> {
    env_logger::init();

    let command = parse_command()?;
    let config = StorageConfig::from_env();
    let mut storage = config.open();
    info!("save dir: {}", storage.dir().display());

    match command {
        Command::Show => show(&storage),
        Command::Scores => scores(&storage),
        Command::Clear => clear(&mut storage),
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

fn show(storage: &FileStorage) -> Result<()> {
    let snapshot = match PersistedSnapshot::load(storage) {
        Ok(snapshot) => snapshot,
        Err(SnapshotError::Missing) => {
            println!("no saved game in {}", storage.dir().display());
            return Ok(());
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!("reading saved game from {}", storage.dir().display())
            })
        }
    };

    for row in &snapshot.board {
        let line: String = row
            .iter()
            .map(|&code| PieceKind::from_code(code).map_or('.', piece_char))
            .collect();
        println!("|{line}|");
    }
    println!("+{}+", "-".repeat(row_width(&snapshot)));

    println!("score: {}", snapshot.score);
    println!("lines: {}", snapshot.lines_cleared);
    println!("level: {}", snapshot.level);
    println!("next:  {}", snapshot.next_piece.as_str());
    println!(
        "held:  {}{}",
        snapshot.held_piece.map_or("-", |k| k.as_str()),
        if snapshot.can_hold { "" } else { " (used)" }
    );
    Ok(())
}

fn piece_char(kind: PieceKind) -> char {
    kind.as_str().chars().next().unwrap_or('#')
}

fn row_width(snapshot: &PersistedSnapshot) -> usize {
    snapshot.board.first().map_or(0, |row| row.len())
}

fn scores(storage: &FileStorage) -> Result<()> {
    let board = Leaderboard::load(storage);
    if board.is_empty() {
        println!("no scores yet");
        return Ok(());
    }

    for (rank, entry) in board.entries().iter().enumerate() {
        println!(
            "{:>2}. {:<16} {:>8}  level {:>2}  lines {:>3}",
            rank + 1,
            entry.name,
            entry.score,
            entry.level,
            entry.lines
        );
    }
    Ok(())
}

fn clear(storage: &mut FileStorage) -> Result<()> {
    storage
        .remove(SNAPSHOT_KEY)
        .with_context(|| format!("removing saved game from {}", storage.dir().display()))?;
    println!("saved game cleared");
    Ok(())
}
