//! Plain-text tables for the terminal.

use colored::Colorize;
use fairplay_core::{MoveSet, Outcome, OutcomeMatrix, RoundResult};

pub const HMAC_CALCULATOR_URL: &str = "https://www.liavaag.org/English/SHA-Generator/HMAC/";

#[derive(Clone, Copy)]
enum Tone {
    Plain,
    Committer,
    Responder,
    Cell(Outcome),
    Exit,
    Help,
}

fn paint(text: &str, tone: Tone) -> String {
    match tone {
        Tone::Plain => text.to_string(),
        Tone::Committer => text.red().to_string(),
        Tone::Responder => text.blue().to_string(),
        Tone::Cell(Outcome::Win) => text.green().bold().to_string(),
        Tone::Cell(Outcome::Lose) => text.red().bold().to_string(),
        Tone::Cell(Outcome::Draw) => text.bold().to_string(),
        Tone::Exit => text.red().to_string(),
        Tone::Help => text.blue().to_string(),
    }
}

/// Draw a bordered grid; the first row is the header.
fn grid(rows: &[Vec<(String, Tone)>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|(text, _)| text.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = widths
        .iter()
        .fold(String::from("+"), |acc, w| acc + &"-".repeat(w + 2) + "+");

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    for (i, row) in rows.iter().enumerate() {
        out.push('|');
        for (c, width) in widths.iter().enumerate() {
            let (text, tone) = row
                .get(c)
                .map(|(t, tone)| (t.as_str(), *tone))
                .unwrap_or(("", Tone::Plain));
            let padded = format!(" {:<width$} ", text, width = width);
            out.push_str(&paint(&padded, tone));
            out.push('|');
        }
        out.push('\n');
        if i == 0 {
            out.push_str(&rule);
            out.push('\n');
        }
    }
    out.push_str(&rule);
    out
}

/// Number of help pages for `moves` columns.
pub fn page_count(moves: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    moves.div_ceil(page_size).max(1)
}

/// Outcome table for one page of responder columns.
///
/// Rows are the committer's moves, columns the responder's; cells read from the
/// responder's point of view.
pub fn render_outcome_table(
    matrix: &OutcomeMatrix,
    names: &[String],
    page: usize,
    page_size: usize,
) -> String {
    let page_size = page_size.max(1);
    let pages = page_count(names.len(), page_size);
    let page = page.clamp(1, pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(names.len());

    let mut rows = Vec::with_capacity(names.len() + 1);
    let mut header = vec![("v PC / User >".to_string(), Tone::Plain)];
    header.extend(names[start..end].iter().map(|n| (n.clone(), Tone::Responder)));
    rows.push(header);

    for (name, outcomes) in names.iter().zip(matrix.rows()) {
        let mut row = vec![(name.clone(), Tone::Committer)];
        row.extend(
            outcomes[start..end]
                .iter()
                .map(|o| (o.as_str().to_string(), Tone::Cell(*o))),
        );
        rows.push(row);
    }

    format!("{}\nPage {} of {}", grid(&rows), page, pages)
}

/// Numbered move menu with the exit and help entries.
pub fn render_menu(moves: &MoveSet) -> String {
    let mut rows = vec![vec![
        ("#".to_string(), Tone::Plain),
        ("Move".to_string(), Tone::Plain),
    ]];
    rows.extend(moves.iter().map(|(index, name)| {
        vec![
            (index.one_based().to_string(), Tone::Plain),
            (name.to_string(), Tone::Plain),
        ]
    }));
    rows.push(vec![
        ("0".to_string(), Tone::Exit),
        ("EXIT".to_string(), Tone::Exit),
    ]);
    rows.push(vec![
        ("?".to_string(), Tone::Help),
        ("HELP".to_string(), Tone::Help),
    ]);
    format!("Available moves:\n{}", grid(&rows))
}

/// One-line verdict for the responder.
pub fn render_outcome(outcome: Outcome) -> String {
    match outcome {
        Outcome::Win => format!("You {}", "win!".green().bold()),
        Outcome::Lose => format!("You {}", "lose!".red().bold()),
        Outcome::Draw => format!("It's a {}", "draw!".bold()),
    }
}

/// Moves, verdict, key, and how to check the commitment by hand.
pub fn render_reveal(result: &RoundResult) -> String {
    let steps = [
        "Set \"Input Type\" to \"TEXT\" and paste the computer move into \"Input\".",
        "Set \"Key Type\" to \"HEX\" and paste the HMAC key into \"Key\".",
        "Set \"SHA variant\" to \"SHA3-256\".",
        "Set \"Output Type\" to \"HEX\".",
        "Compare the calculated HMAC with the HMAC shown before your move.",
    ];
    let mut rows = vec![vec![
        ("Step".to_string(), Tone::Plain),
        ("Instruction".to_string(), Tone::Plain),
    ]];
    rows.extend(steps.iter().enumerate().map(|(i, s)| {
        vec![((i + 1).to_string(), Tone::Plain), (s.to_string(), Tone::Plain)]
    }));

    format!(
        "Your move: {}\nComputer move: {}\n{}\nHMAC key: {}\nOnline HMAC calculator: {}\n{}",
        result.responder_move,
        result.committer_move,
        render_outcome(result.outcome),
        result.key,
        HMAC_CALCULATOR_URL,
        grid(&rows),
    )
}
