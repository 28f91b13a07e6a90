use cavacamixa::arrangement::HAND_SIZE;
use cavacamixa::{Arrangement, GameOutcome};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Both starting hands, top card first.
pub fn print_deal_grid(arrangement: &Arrangement) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for (player, hand) in arrangement.cards().chunks(HAND_SIZE).enumerate() {
        let mut cells = vec![Cell::new(format!("P{}", player)).add_attribute(Attribute::Bold)];
        cells.extend(hand.iter().map(|&c| {
            let cell = Cell::new(c).set_alignment(CellAlignment::Center);
            if c == 0 {
                cell
            } else {
                cell.fg(Color::Red)
            }
        }));
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_outcome(outcome: &GameOutcome) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Arrangement").add_attribute(Attribute::Bold),
        Cell::new("Cards").fg(Color::Cyan),
        Cell::new("Penalty"),
        Cell::new("Hands"),
        Cell::new("Winner").fg(Color::Green),
    ]);

    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let winner = match outcome.winning_player() {
        Some(p) => Cell::new(format!("P{}", p)).fg(Color::Green),
        None => Cell::new("none (loops)").fg(Color::Red),
    };

    table.add_row(vec![
        Cell::new(outcome.arrangement),
        Cell::new(outcome.cards_played()).fg(Color::Cyan),
        Cell::new(outcome.penalty_cards_played()),
        Cell::new(outcome.hands_won()),
        winner,
    ]);
    println!("\n{}", table);
}
