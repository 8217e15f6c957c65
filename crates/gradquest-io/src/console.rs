//! Terminal implementations of the core's collaborator ports.
//!
//! These are deliberately thin: the engine produces every message and
//! prompt, and these types only move bytes between it and the terminal.

use std::io::{self, BufRead, Write};

use gradquest_core::traits::{AnswerSource, ChoiceDialog, MessageSink, Reply};

/// Prompts on stdout and reads answers from stdin.
///
/// End of input maps to [`Reply::Cancelled`], which doubles as the escape
/// hatch from the engine's unbounded invalid-input retry.
#[derive(Debug, Default)]
pub struct ConsoleAnswerSource;

impl AnswerSource for ConsoleAnswerSource {
    fn ask(&mut self, prompt: &str, exam_title: &str) -> Reply {
        println!("\n[{exam_title}]");
        println!("{prompt}");
        print!("Your answer: ");
        if io::stdout().flush().is_err() {
            return Reply::Cancelled;
        }

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => Reply::Cancelled,
            Ok(_) => Reply::Answer(line.trim().to_string()),
        }
    }
}

/// Asks yes/no questions on the terminal, re-prompting until it gets one.
#[derive(Debug, Default)]
pub struct ConsoleDialog;

impl ChoiceDialog for ConsoleDialog {
    fn confirm(&mut self, prompt: &str) -> bool {
        loop {
            print!("{prompt} [y/n]: ");
            if io::stdout().flush().is_err() {
                return false;
            }

            let mut line = String::new();
            match io::stdin().lock().read_line(&mut line) {
                Ok(0) | Err(_) => return false,
                Ok(_) => match line.trim().to_ascii_lowercase().as_str() {
                    "y" | "yes" => return true,
                    "n" | "no" => return false,
                    _ => println!("Please answer y or n."),
                },
            }
        }
    }
}

/// Prints notifications line by line.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}
