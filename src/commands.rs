// src/commands.rs

use crate::models::{DifficultyFilter, Problem};
use crate::render;
use crate::repository;
use crate::study;
use anyhow::{Context as _, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use log::{debug, warn};
use rusqlite::Connection;
use std::io::{self, BufRead, Write};

// --- Command Table ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub type Handler = fn(&mut Context<'_>, &[&str]) -> Result<Flow>;

pub struct CommandDescriptor {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub handler: Handler,
}

/// Everything a command needs. Built once per session.
pub struct Context<'a> {
    pub conn: &'a Connection,
    pub input: &'a mut dyn BufRead,
    pub commands: &'a [CommandDescriptor],
}

pub fn command_table() -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor {
            name: "help",
            aliases: &[],
            description: "Display available commands",
            handler: help_command,
        },
        CommandDescriptor {
            name: "exit",
            aliases: &["quit"],
            description: "Exit the application",
            handler: exit_command,
        },
        CommandDescriptor {
            name: "study",
            aliases: &[],
            description: "Get your next questions to study",
            handler: study_command,
        },
        CommandDescriptor {
            name: "mark",
            aliases: &["done"],
            description: "Mark a problem completed: mark --rating 1|2|3 <title>",
            handler: mark_command,
        },
        CommandDescriptor {
            name: "review",
            aliases: &[],
            description: "View your review history and upcoming reviews",
            handler: review_command,
        },
        CommandDescriptor {
            name: "stat",
            aliases: &["stats"],
            description: "View your overall study statistics",
            handler: stat_command,
        },
        CommandDescriptor {
            name: "open",
            aliases: &[],
            description: "Open a problem on LeetCode: open <title>",
            handler: open_command,
        },
    ]
}

pub fn find_command<'c>(
    commands: &'c [CommandDescriptor],
    name: &str,
) -> Option<&'c CommandDescriptor> {
    commands
        .iter()
        .find(|c| c.name == name || c.aliases.iter().any(|alias| *alias == name))
}

/// Runs one input line. Blank lines and unknown commands are not errors.
pub fn dispatch(ctx: &mut Context<'_>, line: &str) -> Result<Flow> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((name, args)) = parts.split_first() else {
        return Ok(Flow::Continue);
    };

    match find_command(ctx.commands, name) {
        Some(command) => {
            debug!("Dispatching '{}' with {:?}", command.name, args);
            (command.handler)(ctx, args)
        }
        None => {
            println!("Unknown command: {}. Type 'help' for available commands.", name);
            Ok(Flow::Continue)
        }
    }
}

pub fn run_repl(ctx: &mut Context<'_>) -> Result<()> {
    loop {
        let Some(line) = prompt(&mut *ctx.input, "Study > ")? else {
            println!();
            return Ok(());
        };
        match dispatch(ctx, &line) {
            Ok(Flow::Exit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => {
                warn!("Command failed: {:#}", e);
                println!("{} {:#}", "Error:".red(), e);
            }
        }
    }
}

/// Prints `message` and reads one trimmed line. `None` on end of input.
fn prompt<R: BufRead + ?Sized>(input: &mut R, message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Parses command arguments with clap. Usage errors and `--help` are printed
/// and yield `None`.
fn parse_args<T: Parser>(name: &str, args: &[&str]) -> Result<Option<T>> {
    match T::try_parse_from(std::iter::once(name).chain(args.iter().copied())) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            e.print()?;
            Ok(None)
        }
    }
}

// --- Arguments ---

#[derive(Parser, Debug)]
#[command(about = "Get your next questions to study")]
pub struct StudyArgs {
    /// Difficulty level (easy, medium, hard, any OR e, m, h, a)
    #[arg(short, long, default_value = "any")]
    pub difficulty: DifficultyFilter,

    /// Number of questions
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub count: i64,
}

#[derive(Parser, Debug)]
#[command(about = "View your review history and upcoming reviews")]
pub struct ReviewArgs {
    /// Filter by difficulty (easy, medium, hard, any)
    #[arg(short, long, default_value = "any")]
    pub difficulty: DifficultyFilter,
}

#[derive(Parser, Debug)]
#[command(about = "Mark a problem as completed")]
pub struct MarkArgs {
    /// Effort rating: 1=Easy, 2=Medium, 3=Hard
    #[arg(short, long)]
    pub rating: i64,

    /// Problem title
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Open a problem on LeetCode")]
pub struct OpenArgs {
    /// Problem title
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,
}

// --- Handlers ---

fn help_command(ctx: &mut Context<'_>, _args: &[&str]) -> Result<Flow> {
    println!();
    println!("Available Commands:");
    println!("==================");
    for cmd in ctx.commands {
        println!("  {:<10} - {}", cmd.name, cmd.description);
    }
    println!();
    println!("Example usage:");
    println!("  study --difficulty easy --count 5");
    println!("  study -d medium -c 3");
    println!("  mark -r 2 Two Sum");
    println!();
    Ok(Flow::Continue)
}

fn exit_command(_ctx: &mut Context<'_>, _args: &[&str]) -> Result<Flow> {
    println!("Thanks for studying! Happy coding!");
    Ok(Flow::Exit)
}

fn study_command(ctx: &mut Context<'_>, args: &[&str]) -> Result<Flow> {
    let Some(args) = parse_args::<StudyArgs>("study", args)? else {
        return Ok(Flow::Continue);
    };
    let count = usize::try_from(args.count).unwrap_or(0);

    let mut problems = study::next_candidates(ctx.conn, args.difficulty, count, Utc::now())
        .context("select study problems")?;
    render::print_candidates(&problems);

    while !problems.is_empty() {
        let Some(answer) = prompt(&mut *ctx.input, "Mark any as completed? (y/n): ")? else {
            break;
        };
        match answer.to_lowercase().as_str() {
            "n" | "no" => break,
            "y" | "yes" => {}
            _ => continue,
        }

        let Some(input) = prompt(&mut *ctx.input, "Enter problem number (e.g. 1 or 3): ")? else {
            break;
        };
        if input.is_empty() {
            continue;
        }
        let index = match input.parse::<usize>() {
            Ok(n) if (1..=problems.len()).contains(&n) => n - 1,
            _ => {
                println!("Invalid problem number: {}", input);
                continue;
            }
        };

        let message = format!(
            "\nHow hard was '{}'? (1=Easy, 2=Medium, 3=Hard): ",
            problems[index].title
        );
        let Some(rating) = prompt(&mut *ctx.input, &message)? else {
            break;
        };
        let rating = match rating.parse::<i64>() {
            Ok(r) if (1..=3).contains(&r) => r,
            _ => {
                println!("Invalid rating, skipping...");
                continue;
            }
        };

        match mark_problem(ctx.conn, &problems[index], rating) {
            Ok(()) => {
                problems.remove(index);
                render::print_remaining(&problems);
            }
            Err(e) => println!("Error updating problem: {:#}", e),
        }
    }

    Ok(Flow::Continue)
}

fn mark_problem(conn: &Connection, problem: &Problem, rating: i64) -> Result<()> {
    let event = study::record_completion(conn, &problem.title, rating, Utc::now())?;
    println!(
        "{}",
        format!(
            "✓ Marked '{}' as completed with effort rating {} (next review in {} days)",
            problem.title, rating, event.interval_days
        )
        .green()
    );
    Ok(())
}

fn mark_command(ctx: &mut Context<'_>, args: &[&str]) -> Result<Flow> {
    let Some(args) = parse_args::<MarkArgs>("mark", args)? else {
        return Ok(Flow::Continue);
    };
    let title = args.title.join(" ");
    let problem = repository::find_problem(ctx.conn, &title)?;
    mark_problem(ctx.conn, &problem, args.rating)?;
    Ok(Flow::Continue)
}

fn review_command(ctx: &mut Context<'_>, args: &[&str]) -> Result<Flow> {
    let Some(args) = parse_args::<ReviewArgs>("review", args)? else {
        return Ok(Flow::Continue);
    };
    let entries = study::review_history(ctx.conn, args.difficulty, Utc::now())
        .context("load review history")?;
    render::print_review_history(&entries);
    Ok(Flow::Continue)
}

fn stat_command(ctx: &mut Context<'_>, _args: &[&str]) -> Result<Flow> {
    let stats = study::overall_stats(ctx.conn, Utc::now()).context("get stats")?;
    render::print_stats(&stats);
    Ok(Flow::Continue)
}

fn open_command(ctx: &mut Context<'_>, args: &[&str]) -> Result<Flow> {
    let Some(args) = parse_args::<OpenArgs>("open", args)? else {
        return Ok(Flow::Continue);
    };
    let problem = repository::find_problem(ctx.conn, &args.title.join(" "))?;
    let url = problem.url();
    println!("Opening {}", url);
    webbrowser::open(&url).map_err(|e| crate::error::StudyError::Browser(e.to_string()))?;
    Ok(Flow::Continue)
}
