use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::analyzer::MoveValue;
use crate::player::{Move, PlayerPosition};
use crate::position::GamePosition;
use crate::rules;

/// Board columns for one player's row, left to right. The two gaps sit
/// between the exit lane and the entry lane.
const ROW_SPACES: [i8; 8] = [3, 2, 1, 0, -1, -1, 13, 12];

fn player_cell(position: PlayerPosition, space: i8, token: &str, rosette: bool) -> Cell {
    let text = if space >= 0 && position.occupies(space) {
        token.bold().to_string()
    } else if rosette {
        "*".dimmed().to_string()
    } else if space < 0 {
        String::new()
    } else {
        "\u{00b7}".dimmed().to_string()
    };
    Cell::new(text).set_alignment(CellAlignment::Center)
}

/// Render the board with the attacker on the top row, the shared lane in
/// the middle, and the defender on the bottom row.
pub fn board_display(position: GamePosition) -> String {
    let attacker = position.attacker();
    let defender = position.defender();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut top = Vec::new();
    let mut bottom = Vec::new();
    for &space in &ROW_SPACES {
        let rosette = space >= 0 && rules::is_rosette(space);
        top.push(player_cell(attacker, space, &"X".red().to_string(), rosette));
        bottom.push(player_cell(defender, space, &"O".blue().to_string(), rosette));
    }

    let middle: Vec<Cell> = (4..12)
        .map(|space| {
            let text = if attacker.occupies(space) {
                "X".red().bold().to_string()
            } else if defender.occupies(space) {
                "O".blue().bold().to_string()
            } else if rules::is_rosette(space) {
                "*".dimmed().to_string()
            } else {
                "\u{00b7}".dimmed().to_string()
            };
            Cell::new(text).set_alignment(CellAlignment::Center)
        })
        .collect();

    table.add_row(top);
    table.add_row(middle);
    table.add_row(bottom);

    format!(
        "{}\n  {} waiting {}, borne off {}\n  {} waiting {}, borne off {}",
        table,
        "X".red().bold(),
        attacker.wait_count(),
        attacker.exited_count(),
        "O".blue().bold(),
        defender.wait_count(),
        defender.exited_count(),
    )
}

pub fn value_bar(value: f64, width: usize) -> String {
    let filled = (value * width as f64) as usize;
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let pct = format!("{:.2}%", value * 100.0);

    if value >= 0.6 {
        format!("{} {}", bar.green(), pct)
    } else if value >= 0.4 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.red(), pct)
    }
}

pub fn move_display(mv: Move) -> String {
    let from = if mv.is_entry() {
        "entry".to_string()
    } else {
        mv.from.to_string()
    };
    let to = if mv.is_exit() {
        "off".to_string()
    } else {
        mv.to.to_string()
    };
    format!("{} \u{2192} {}", from, to)
}

/// Ranked-move table for an analyzed position.
pub fn moves_table(moves: &[MoveValue]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Move"),
        Cell::new("Win probability").set_alignment(CellAlignment::Right),
    ]);

    for (rank, mv) in moves.iter().enumerate() {
        let label = move_display(mv.mv);
        let styled = if rank == 0 {
            label.green().bold().to_string()
        } else {
            label
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(styled),
            Cell::new(value_bar(mv.value as f64, 20)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

pub fn print_section(title: &str, content: &str) {
    println!("\n{}", title.cyan().bold());
    println!("  {}", content);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

pub fn print_success(msg: &str) {
    println!("{}", msg.green().bold());
}
