//! dayplan CLI - a daily planner with a focus timer
//!
//! Plan your day from the terminal:
//! - focus timer with short and long breaks, served by a background daemon
//! - per-day task lists and quick notes
//! - daily summary combining tasks and recorded focus time

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser};
use uuid::Uuid;

use dayplan::auth::{Credentials, IdentityProvider, MockIdentityProvider, SessionContext};
use dayplan::cli::{
    commands::{TaskAddArgs, TaskListArgs},
    Cli, Commands, Display, IpcClient, NoteCommands, SetArgs, SoundState, TaskCommands,
};
use dayplan::daemon::{self, DaemonOptions};
use dayplan::planner::{daily_summary, sort_notes, sort_tasks, task_stats, Note, Task, TaskFilter};
use dayplan::store::{JsonStore, NoteRepository, SessionLog, TaskRepository};
use dayplan::types::SetParams;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        // Timer commands go through the daemon.
        Some(Commands::Start) => {
            let client = IpcClient::new()?;
            let response = client.start().await?;
            Display::show_timer_response(&response);
        }
        Some(Commands::Pause) => {
            let client = IpcClient::new()?;
            let response = client.pause().await?;
            Display::show_timer_response(&response);
        }
        Some(Commands::Reset) => {
            let client = IpcClient::new()?;
            let response = client.reset().await?;
            Display::show_timer_response(&response);
        }
        Some(Commands::Mode { mode }) => {
            let client = IpcClient::new()?;
            let response = client.change_mode(mode).await?;
            Display::show_timer_response(&response);
        }
        Some(Commands::Status) => {
            let client = IpcClient::new()?;
            let response = client.status().await?;
            Display::show_status(&response);
        }
        Some(Commands::Set(args)) => {
            let params = set_params(&args)?;
            let client = IpcClient::new()?;
            let response = client.set(params).await?;
            Display::show_timer_response(&response);
        }
        Some(Commands::Sound { state }) => {
            let client = IpcClient::new()?;
            let response = client.sound(state == SoundState::On).await?;
            Display::show_timer_response(&response);
        }

        // Planner commands work on the store directly.
        Some(Commands::Task { command }) => execute_task(command)?,
        Some(Commands::Note { command }) => execute_note(command)?,
        Some(Commands::Summary { date }) => {
            let store = open_store()?;
            let date = resolve_date(date.as_deref())?;
            let tasks = TaskRepository::new(&store).all();
            let sessions = SessionLog::new(&store).all();
            Display::show_summary(&daily_summary(&tasks, &sessions, date));
        }
        Some(Commands::Stats) => {
            let store = open_store()?;
            let tasks = TaskRepository::new(&store).all();
            let sessions = SessionLog::new(&store).all();
            Display::show_stats(&task_stats(&tasks));
            Display::show_focus_stats(&sessions);
        }

        Some(Commands::Login { email, name }) => {
            execute_login(&email, name.as_deref())?;
        }
        Some(Commands::Logout) => {
            execute_logout().await?;
        }

        Some(Commands::Daemon { no_sound }) => {
            daemon::run(DaemonOptions::from_defaults(no_sound)?).await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Executes a task subcommand against the store.
fn execute_task(command: TaskCommands) -> Result<()> {
    let store = open_store()?;
    let repo = TaskRepository::new(&store);

    match command {
        TaskCommands::Add(args) => {
            let TaskAddArgs {
                title,
                start,
                end,
                kind,
                priority,
                description,
                date,
            } = args;
            let date = resolve_date(date.as_deref())?;
            let task = Task::new(&title, kind, priority, &start, &end, &description)?;
            let id = task.id;
            repo.append(date, task)?;
            println!("Added task {}", id);
        }
        TaskCommands::List(args) => {
            let TaskListArgs {
                date,
                kind,
                priority,
                search,
                order,
            } = args;
            let date = resolve_date(date.as_deref())?;
            let filter = TaskFilter {
                kind,
                priority,
                search,
            };
            let mut tasks = filter.apply(&repo.list_by_date(date));
            sort_tasks(&mut tasks, order);
            Display::show_tasks(&dayplan::planner::date_key(date), &tasks);
        }
        TaskCommands::Done { id, date } => {
            let date = resolve_date(date.as_deref())?;
            let id = parse_id(&id)?;
            match repo.toggle_completed(date, id)? {
                Some(true) => println!("Task marked done"),
                Some(false) => println!("Task marked not done"),
                None => anyhow::bail!("No task with id {} on {}", id, date),
            }
        }
        TaskCommands::Delete { id, date } => {
            let date = resolve_date(date.as_deref())?;
            let id = parse_id(&id)?;
            if repo.delete(date, id)? {
                println!("Task deleted");
            } else {
                println!("No task with id {} on {}", id, date);
            }
        }
    }

    Ok(())
}

/// Executes a note subcommand against the store.
fn execute_note(command: NoteCommands) -> Result<()> {
    let store = open_store()?;
    let repo = NoteRepository::new(&store);

    match command {
        NoteCommands::Add { content } => {
            let note = Note::new(content);
            let id = note.id;
            repo.append(note)?;
            println!("Added note {}", id);
        }
        NoteCommands::List { search, order } => {
            let mut notes = repo.all();
            if let Some(needle) = search {
                notes.retain(|n| n.matches_search(&needle));
            }
            sort_notes(&mut notes, order);
            Display::show_notes(&notes);
        }
        NoteCommands::Edit { id, content } => {
            let id = parse_id(&id)?;
            if repo.update_content(id, &content)? {
                println!("Note updated");
            } else {
                anyhow::bail!("No note with id {}", id);
            }
        }
        NoteCommands::Delete { id } => {
            let id = parse_id(&id)?;
            if repo.delete(id)? {
                println!("Note deleted");
            } else {
                println!("No note with id {}", id);
            }
        }
    }

    Ok(())
}

/// Signs in and persists the session.
fn execute_login(email: &str, name: Option<&str>) -> Result<()> {
    let password = prompt_password()?;

    let provider = MockIdentityProvider::new();
    let event = match name {
        Some(_) => provider.sign_up(&Credentials::new(email, password), name)?,
        None => provider.sign_in(&Credentials::new(email, password))?,
    };

    let store = open_store()?;
    SessionContext::save(&store, &event.username)?;
    Display::show_login_success(&event.username);

    Ok(())
}

/// Signs out: asks the daemon first so the timer stops, falling back to
/// clearing the store when the daemon is not running.
async fn execute_logout() -> Result<()> {
    match IpcClient::new()?.logout().await {
        Ok(_) => {}
        Err(e) => {
            tracing::warn!("Daemon unreachable, clearing session locally: {}", e);
            let store = open_store()?;
            SessionContext::clear(&store)?;
        }
    }

    Display::show_logout_success();
    Ok(())
}

/// Opens the store at its default location.
fn open_store() -> Result<JsonStore> {
    Ok(JsonStore::open(JsonStore::default_path()?)?)
}

/// Resolves an optional YYYY-MM-DD argument, defaulting to today.
fn resolve_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s)),
        None => Ok(Local::now().date_naive()),
    }
}

/// Parses a task or note id.
fn parse_id(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).with_context(|| format!("Invalid id '{}'", s))
}

/// Converts set arguments into IPC parameters, rejecting an empty set.
fn set_params(args: &SetArgs) -> Result<SetParams> {
    let params = SetParams {
        focus_minutes: args.focus,
        short_break_minutes: args.short_break,
        long_break_minutes: args.long_break,
    };
    if params.is_empty() {
        anyhow::bail!("Give at least one of --focus, --short-break, --long-break");
    }
    Ok(params)
}

/// Prompts for a password on stdin.
fn prompt_password() -> Result<String> {
    print!("Password: ");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut password = String::new();
    std::io::stdin()
        .read_line(&mut password)
        .context("Failed to read password")?;

    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
