// src/main.rs

use anyhow::Context as _;
use clap::Parser;
use log::info;
use neetcode_study::commands::{self, Context};
use neetcode_study::config::{Cli, Config};
use neetcode_study::{database, render};
use rusqlite::Connection;
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level.as_str()),
    )
    .init();

    info!("Starting NeetCode Study...");
    let config = Config::from_cli(cli).context("Failed to prepare data directory")?;

    info!("Database path: {:?}", config.db_path);
    let conn = Connection::open(&config.db_path)
        .with_context(|| format!("Failed to open DB at {}", config.db_path.display()))?;

    // Init Database (Schema + Seeds)
    database::init_db(&conn, config.seed_path.as_deref()).context("Failed to init DB")?;

    render::print_banner();

    let table = commands::command_table();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut ctx = Context {
        conn: &conn,
        input: &mut input,
        commands: &table,
    };
    commands::run_repl(&mut ctx)
}
