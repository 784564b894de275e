//! Line-oriented task list driver.
//!
//! # Responsibility
//! - Stand in for the UI surface: read actions from stdin, render projections.
//! - Keep all task semantics inside `tasklist_core`.

mod actions;
mod command;
mod render;

use command::{parse_command, Command};
use log::warn;
use std::io::{self, BufRead, Write};
use tasklist_core::{
    init_logging, AppConfig, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore,
    TaskSession, TaskStore,
};

fn main() {
    let config = AppConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = TaskStore::with_key(open_backend(&config), config.storage_key.clone());
    let mut session = TaskSession::open(store);
    println!("{}", render::render(&session.render()));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        if let Err(err) = stdout.flush() {
            eprintln!("failed to write output: {err}");
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("failed to read input: {err}");
                break;
            }
        }

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                if let Err(print_err) = err.print() {
                    eprintln!("failed to write output: {print_err}");
                    break;
                }
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        match actions::run(&mut session, command) {
            Ok(projection) => println!("{}", render::render(&projection)),
            Err(message) => eprintln!("{message}"),
        }
    }
}

fn open_backend(config: &AppConfig) -> Box<dyn KeyValueStore> {
    match SqliteKeyValueStore::open(&config.db_path) {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("event=cli_open module=cli status=degraded error={err}");
            eprintln!(
                "cannot open `{}` ({err}); tasks will not survive this session",
                config.db_path.display()
            );
            Box::new(MemoryKeyValueStore::new())
        }
    }
}
