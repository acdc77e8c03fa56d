//! Interactive read loop: commitment, menu, help pages, reveal.

use anyhow::{Context, Result};
use colored::Colorize;
use fairplay_core::{GameSession, MovePicker, Round, RoundError, RoundResult};
use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::config::PlayConfig;
use crate::render;

/// What the player typed at the move prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Exit,
    Help,
    /// 1-based menu entry
    Move(usize),
    Invalid,
}

impl Choice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "?" => Choice::Help,
            other => match other.parse::<usize>() {
                Ok(0) => Choice::Exit,
                Ok(n) => Choice::Move(n),
                Err(_) => Choice::Invalid,
            },
        }
    }
}

enum Turn {
    Played,
    Quit,
}

pub struct Repl<R, W> {
    input: R,
    output: W,
    config: PlayConfig,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W, config: PlayConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Play rounds until the player leaves. Returns the completed rounds.
    pub fn run(
        &mut self,
        session: &GameSession,
        picker: &mut dyn MovePicker,
    ) -> Result<Vec<RoundResult>> {
        let mut completed = Vec::new();
        loop {
            let mut round = session.start_round(&mut *picker)?;
            writeln!(self.output, "HMAC: {}", round.commitment())?;

            if let Turn::Quit = self.take_turn(session, &mut round)? {
                writeln!(self.output, "Exiting...")?;
                return Ok(completed);
            }

            let result = round.reveal()?;
            writeln!(self.output, "{}", render::render_reveal(&result))?;
            self.record(&result)?;
            completed.push(result);

            if !self.play_again()? {
                writeln!(self.output, "Exiting...")?;
                return Ok(completed);
            }
        }
    }

    fn take_turn(&mut self, session: &GameSession, round: &mut Round<'_>) -> Result<Turn> {
        loop {
            writeln!(self.output, "{}", render::render_menu(session.moves()))?;
            let Some(line) = self.prompt("Enter your move: ")? else {
                return Ok(Turn::Quit);
            };
            match Choice::parse(&line) {
                Choice::Exit => return Ok(Turn::Quit),
                Choice::Help => self.help(session)?,
                Choice::Move(n) => match round.respond(n - 1) {
                    Ok(_) => return Ok(Turn::Played),
                    Err(RoundError::InvalidMove { .. }) => self.error(
                        "Option unavailable. Please select an option provided in the table.",
                    )?,
                    Err(e) => return Err(e.into()),
                },
                Choice::Invalid => self.error(
                    "Invalid input form.\nTo make a move, enter a (non-zero) number from the table.\nEnter '?' for help.\nEnter '0' to exit.",
                )?,
            }
        }
    }

    fn help(&mut self, session: &GameSession) -> Result<()> {
        let names = session.moves().names();
        let page_size = self.config.page_size;
        let pages = render::page_count(names.len(), page_size);
        let mut page = 1;
        loop {
            writeln!(
                self.output,
                "Displaying HELP.\nNote: results are shown from your point of view."
            )?;
            let table = render::render_outcome_table(session.matrix(), names, page, page_size);
            writeln!(self.output, "{}", table)?;
            let Some(request) =
                self.prompt("Enter '>' for next page, '<' for previous page, or '0' to exit help: ")?
            else {
                return Ok(());
            };
            match request.trim() {
                ">" => page = (page + 1).min(pages),
                "<" => page = page.saturating_sub(1).max(1),
                "0" => return Ok(()),
                _ => self.error("Invalid request.")?,
            }
        }
    }

    fn play_again(&mut self) -> Result<bool> {
        loop {
            let Some(answer) = self.prompt("Would you like to play another round? [Y/N]: ")? else {
                return Ok(false);
            };
            match answer.trim().to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => self.error(
                    "Invalid response. Enter 'Y' to play another round, otherwise 'N'.",
                )?,
            }
        }
    }

    /// Append the round to the transcript file, if one is configured.
    fn record(&mut self, result: &RoundResult) -> Result<()> {
        let Some(path) = &self.config.transcript else {
            return Ok(());
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening transcript {}", path.display()))?;
        let line = serde_json::to_string(result)?;
        writeln!(file, "{}", line)
            .with_context(|| format!("writing transcript {}", path.display()))?;
        debug!(round_id = %result.round_id, path = %path.display(), "transcript appended");
        Ok(())
    }

    /// Show `text` and read one line; `None` on end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            warn!("input closed");
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}\n{}", "ERROR:".red().bold(), message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairplay_core::{crypto, FixedPicker, MoveIndex, MoveSet, Outcome};
    use std::io::Cursor;

    fn session() -> GameSession {
        GameSession::new(MoveSet::new(["Rock", "Paper", "Scissors"]).unwrap()).unwrap()
    }

    fn play(script: &str, config: PlayConfig) -> (Vec<RoundResult>, String) {
        colored::control::set_override(false);
        let session = session();
        let mut output = Vec::new();
        let results = {
            let mut repl = Repl::new(Cursor::new(script.to_string()), &mut output, config);
            repl.run(&session, &mut FixedPicker(MoveIndex(0))).unwrap()
        };
        (results, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse("0\n"), Choice::Exit);
        assert_eq!(Choice::parse("00"), Choice::Exit);
        assert_eq!(Choice::parse(" ? "), Choice::Help);
        assert_eq!(Choice::parse("2"), Choice::Move(2));
        assert_eq!(Choice::parse("rock"), Choice::Invalid);
        assert_eq!(Choice::parse("-1"), Choice::Invalid);
        assert_eq!(Choice::parse(""), Choice::Invalid);
    }

    #[test]
    fn test_single_round_then_quit() {
        let (results, out) = play("2\nn\n", PlayConfig::default());
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.committer_move, "Rock");
        assert_eq!(result.responder_move, "Paper");
        assert_eq!(result.outcome, Outcome::Win);

        let published = out
            .lines()
            .find_map(|l| l.strip_prefix("HMAC: "))
            .unwrap();
        assert!(crypto::verify_hex("Rock", &result.key, published).unwrap());
        assert!(out.contains("You win!"));
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_bad_inputs_keep_commitment() {
        let (results, out) = play("7\nabc\n3\nn\n", PlayConfig::default());
        assert_eq!(results.len(), 1);
        assert!(out.contains("Option unavailable"));
        assert!(out.contains("Invalid input form"));
        assert_eq!(out.matches("HMAC: ").count(), 1);
        assert_eq!(results[0].outcome, Outcome::Lose);
        assert!(results[0].verify());
    }

    #[test]
    fn test_exit_before_moving_reveals_nothing() {
        let (results, out) = play("0\n", PlayConfig::default());
        assert!(results.is_empty());
        assert!(!out.contains("HMAC key"));
        assert!(out.contains("Exiting..."));
    }

    #[test]
    fn test_help_then_play_multiple_rounds() {
        let (results, out) = play("?\n>\nx\n0\n1\ny\n3\nmaybe\nN\n", PlayConfig::default());
        assert_eq!(results.len(), 2);
        assert!(out.contains("Page 1 of 1"));
        assert!(out.contains("Invalid request."));
        assert!(out.contains("Invalid response."));
        assert_eq!(results[0].outcome, Outcome::Draw);
        assert_eq!(results[1].outcome, Outcome::Lose);
        assert_ne!(results[0].key, results[1].key);
    }

    #[test]
    fn test_end_of_input_quits() {
        let (results, _) = play("1\n", PlayConfig::default());
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_transcript_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        let config = PlayConfig {
            transcript: Some(path.clone()),
            ..PlayConfig::default()
        };
        let (results, _) = play("1\ny\n2\nn\n", config);

        let contents = std::fs::read_to_string(&path).unwrap();
        let logged: Vec<RoundResult> = contents
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(logged, results);
        assert!(logged.iter().all(RoundResult::verify));
    }
}
