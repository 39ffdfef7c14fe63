use std::io::{self, Write};

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use log::info;

use taskline::cli::{Cli, Commands, handle_quick_add};
use taskline::session::run_session;
use taskline::{Config, Messages, Profile, Storage, Task, TaskStore, logging, utils};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let config = match &cli.config {
        Some(path) => Config::load_from_path(&utils::expand_path(path))?,
        None => Config::load_with_profile(profile)?,
    };

    // Stdout belongs to the conversation; diagnostics go to rotating files.
    // A logging failure costs us diagnostics, not the session.
    let _logger = utils::get_data_dir(profile).and_then(|data_dir| {
        logging::init_logging(&config.log_level, &data_dir.join("logs"))
            .map_err(|err| eprintln!("warning: file logging disabled: {err}"))
            .ok()
    });

    // Unavailable storage at startup is the one unrecoverable error.
    let storage = Storage::new(config.save_file_path(profile));
    let created = storage
        .ensure_exists()
        .map_err(|err| eyre!("cannot prepare the save file: {err}"))?;
    let report = storage
        .load()
        .map_err(|err| eyre!("cannot read the save file: {err}"))?;
    if !report.skipped.is_empty() {
        eprintln!(
            "warning: skipped {} unreadable line(s) in the save file",
            report.skipped.len()
        );
    }
    let mut store = TaskStore::with_tasks(report.tasks);
    info!(
        "loaded {} task(s) from {}",
        store.len(),
        storage.path().display()
    );

    match cli.command {
        Some(Commands::AddTodo { description }) => {
            handle_quick_add(Task::todo(description), &mut store, &storage)?;
        }
        Some(Commands::AddDeadline { description, by }) => {
            handle_quick_add(Task::deadline(description, by), &mut store, &storage)?;
        }
        Some(Commands::AddEvent {
            description,
            from,
            to,
        }) => {
            handle_quick_add(Task::event(description, from, to), &mut store, &storage)?;
        }
        Some(Commands::Chat) | None => {
            let messages = Messages::default();
            let stdout = io::stdout();
            let mut output = stdout.lock();
            if created || store.is_empty() {
                writeln!(output, "{}", messages.greeting)?;
                writeln!(output, "{}", messages.help)?;
            } else {
                writeln!(output, "{}", messages.resume)?;
            }

            let stdin = io::stdin();
            let mut input = stdin.lock();
            run_session(&mut input, &mut output, &mut store, &storage, &messages)?;
        }
    }

    Ok(())
}
