use std::io::Write;
use std::str::FromStr;

use engine::wheel::{SpinRejection, WheelView, SPIN_DURATION_MS};
use rand::Rng;
use strum::EnumString;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::controller::SpinController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Command {
    Add,
    Spin,
    List,
    Help,
    #[strum(serialize = "quit", serialize = "exit")]
    Quit,
}

fn parse(line: &str) -> Option<(Command, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (keyword, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    let command = Command::from_str(keyword).ok()?;
    Some((command, rest.trim().to_string()))
}

fn dispatch<R: Rng>(line: &str, controller: &mut SpinController<R>) -> bool {
    let (command, argument) = match parse(line) {
        Some(parsed) => parsed,
        None => {
            if !line.trim().is_empty() {
                println!("Unrecognized command. Type 'help' to list commands.");
            }
            return true;
        }
    };

    match command {
        Command::Add => {
            if controller.add_participant(&argument) {
                println!("Added {} to the wheel.", argument.trim());
            } else {
                println!("Nothing added: entrant names cannot be blank.");
            }
        }
        Command::Spin => match controller.request_spin() {
            Ok(()) => println!(
                "The wheel is spinning! Result in {}s...",
                SPIN_DURATION_MS / 1000
            ),
            Err(SpinRejection::AlreadySpinning) => {
                println!("The wheel is already spinning.")
            }
            Err(SpinRejection::EmptyRoster) => {
                println!("Add at least one entrant before spinning.")
            }
        },
        Command::List => print_roster(&controller.view()),
        Command::Help => print_help(),
        Command::Quit => return false,
    }
    true
}

fn print_help() {
    println!("Commands:");
    println!("  add <name>   add an entrant to the wheel");
    println!("  spin         spin the wheel");
    println!("  list         show the current entrants");
    println!("  help         show this message");
    println!("  quit         leave");
}

fn print_roster(view: &WheelView) {
    if view.participants.is_empty() {
        println!("The wheel is empty. Add entrants with: add <name>");
        return;
    }
    println!("Wheel entrants ({}):", view.participants.len());
    for (index, participant) in view.participants.iter().enumerate() {
        println!("  {}. {}", index + 1, participant);
    }
    if let Some(winner) = &view.winner {
        println!("Last winner: {}", winner);
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Line-driven front end. Reads commands while a pending spin's timer
/// runs concurrently; when the loop exits the controller (and any armed
/// timer) is dropped with it.
pub async fn run<R: Rng>(mut controller: SpinController<R>) -> std::io::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    println!("🎯 Door Prize Roulette");
    print_help();
    print_roster(&controller.view());
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !dispatch(&line, &mut controller) {
                            break;
                        }
                        prompt();
                    }
                    // Stdin closed
                    None => break,
                }
            }
            _ = controller.spin_elapsed() => {
                if let Some(winner) = controller.finish_spin() {
                    println!();
                    println!("🏆 The wheel stops on: {}!", winner);
                }
                prompt();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("spin"), Some((Command::Spin, String::new())));
        assert_eq!(
            parse("  add  Jane Smith  "),
            Some((Command::Add, "Jane Smith".to_string()))
        );
        assert_eq!(parse("LIST"), Some((Command::List, String::new())));
        assert_eq!(parse("exit"), Some((Command::Quit, String::new())));
        assert_eq!(parse("help"), Some((Command::Help, String::new())));
        assert_eq!(parse("bogus"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn test_dispatch_add_and_quit() {
        let mut controller = SpinController::new(SmallRng::seed_from_u64(1));
        assert!(dispatch("add Charlie Wilson", &mut controller));
        assert_eq!(controller.view().participants.len(), 1);

        // Blank names fall through as no-ops
        assert!(dispatch("add   ", &mut controller));
        assert_eq!(controller.view().participants.len(), 1);

        assert!(dispatch("nonsense", &mut controller));
        assert!(!dispatch("quit", &mut controller));
        assert!(!dispatch("exit", &mut controller));
    }
}
