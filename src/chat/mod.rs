use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::error;

use crate::core::{ChatSession, Role};
use crate::errors::Error;

/// Interactive chat loop. One question at a time; a new question is only
/// read once the previous cycle has finished.
pub async fn run(session: &mut ChatSession) -> Result<(), Error> {
    for turn in session.history().turns() {
        print_turn(turn.role, &turn.text);
    }
    println!("{}", "Type 'exit' to quit.".dimmed());

    loop {
        let line: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::Input(std::io::Error::other(e)))?;

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        let spinner = thinking_spinner();
        let outcome = session.answer(question).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(answer) => print_turn(Role::Assistant, &answer),
            Err(e) => {
                error!("cycle failed: {}", e);
                println!("{} {}", "error:".red().bold(), e);
            }
        }
    }

    Ok(())
}

fn print_turn(role: Role, text: &str) {
    match role {
        Role::User => println!("{} {}", "You:".blue().bold(), text),
        Role::Assistant => println!("{} {}", "Assistant:".green().bold(), text),
    }
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
