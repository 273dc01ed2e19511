//! `spinit` command-line front end.
//!
//! # Responsibility
//! - Parse user intents and forward them to the core `App`.
//! - Render the resulting view snapshot to the terminal.

mod config;
mod render;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use config::CliConfig;
use log::info;
use spinit_core::{
    default_log_level, init_logging, App, NoteDraft, Priority, SqliteKvStore, TaskDraft,
    TaskFilter,
};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "spinit", version, about = "Tasks, notes and a focus timer in your terminal")]
struct Cli {
    #[arg(long, global = true, help = "Data directory (defaults to $SPINIT_DATA_DIR or the platform data dir)")]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Log level: trace|debug|info|warn|error")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand, about = "Create, complete or delete tasks")]
    Task(TaskCommand),
    #[command(about = "Show the inbox with filters")]
    Inbox(InboxArgs),
    #[command(about = "Show undated tasks")]
    Todo {
        #[arg(long, default_value = "")]
        search: String,
    },
    #[command(about = "Show tasks due today and upcoming")]
    Today,
    #[command(subcommand, about = "Create or delete notes")]
    Note(NoteCommand),
    #[command(about = "List notes")]
    Notes {
        #[arg(long, default_value = "")]
        search: String,
    },
    #[command(about = "Show a month grid and one day's tasks")]
    Calendar {
        #[arg(long, value_parser = parse_month, help = "Month as YYYY-MM")]
        month: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date, help = "Day as YYYY-MM-DD")]
        day: Option<NaiveDate>,
        #[arg(
            long,
            default_value_t = 0,
            allow_negative_numbers = true,
            help = "Months to step from the shown month (negative steps back)"
        )]
        shift: i32,
    },
    #[command(about = "Run a focus countdown")]
    Timer {
        #[arg(long, help = "Session length in minutes (1-480, default 25)")]
        minutes: Option<String>,
    },
    #[command(about = "Show focus statistics")]
    Stats,
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    Add {
        title: String,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        label: String,
        #[arg(long, value_parser = parse_priority, default_value = "normal")]
        priority: Priority,
    },
    Done {
        id: String,
    },
    Undone {
        id: String,
    },
    Rm {
        id: String,
    },
}

#[derive(Args, Debug)]
struct InboxArgs {
    #[arg(long, default_value = "")]
    label: String,
    #[arg(long, value_parser = parse_priority)]
    priority: Option<Priority>,
    #[arg(long, help = "Include completed tasks")]
    all: bool,
    #[arg(long, default_value = "")]
    search: String,
}

#[derive(Subcommand, Debug)]
enum NoteCommand {
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long, default_value = "", help = "Comma-separated tags")]
        tags: String,
    },
    Rm {
        id: String,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn parse_month(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM: {err}"))
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    value.parse()
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let config = CliConfig::resolve(cli.data_dir.clone(), level)
        .ok_or_else(|| anyhow!("cannot determine a data directory; pass --data-dir"))?;

    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("failed to create {}", config.data_dir.display()))?;
    init_logging(&config.log_level, &config.log_dir())?;
    info!(
        "event=cli_start module=cli status=ok data_dir={}",
        config.data_dir.display()
    );

    let store = SqliteKvStore::open(config.db_path())?;
    let mut app = App::new(store);
    dispatch(&mut app, cli.command)
}

fn dispatch(app: &mut App<SqliteKvStore>, command: Command) -> Result<()> {
    match command {
        Command::Task(task) => run_task(app, task),
        Command::Inbox(args) => {
            app.set_filter(TaskFilter {
                label: args.label,
                priority: args.priority,
                show_completed: args.all,
                search: args.search,
            });
            render::print_tasks("Inbox", &app.snapshot().inbox);
            Ok(())
        }
        Command::Todo { search } => {
            app.set_search(search);
            render::print_tasks("To-Do", &app.snapshot().todo);
            Ok(())
        }
        Command::Today => {
            let view = app.snapshot();
            render::print_tasks("Today", &view.today);
            render::print_tasks("Upcoming", &view.upcoming);
            Ok(())
        }
        Command::Note(note) => run_note(app, note),
        Command::Notes { search } => {
            app.set_note_search(search);
            render::print_notes(&app.snapshot().notes);
            Ok(())
        }
        Command::Calendar { month, day, shift } => {
            if let Some(day) = day {
                app.show_month(day);
                app.select_day(day);
            }
            if let Some(month) = month {
                app.show_month(month);
            }
            for _ in 0..shift.unsigned_abs() {
                if shift < 0 {
                    app.previous_month();
                } else {
                    app.next_month();
                }
            }
            let view = app.snapshot();
            render::print_calendar(&view.calendar);
            render::print_day_panel(&view.day_panel);
            Ok(())
        }
        Command::Timer { minutes } => run_timer(app, minutes),
        Command::Stats => {
            render::print_stats(&app.snapshot());
            Ok(())
        }
    }
}

fn run_task(app: &mut App<SqliteKvStore>, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::Add {
            title,
            date,
            label,
            priority,
        } => {
            let draft = TaskDraft::new(title)
                .with_date(date)
                .with_label(label.trim())
                .with_priority(priority);
            match app.submit_task(draft)? {
                Some(id) => println!("added {}", render::short_id(&id)),
                None => println!("nothing added: title is blank"),
            }
        }
        TaskCommand::Done { id } => set_done(app, &id, true)?,
        TaskCommand::Undone { id } => set_done(app, &id, false)?,
        TaskCommand::Rm { id } => {
            if let Some(task_id) = app.find_task_id(&id) {
                app.delete_task(task_id)?;
                println!("deleted {}", render::short_id(&task_id));
            } else {
                println!("no unique task matches `{id}`");
            }
        }
    }
    Ok(())
}

fn set_done(app: &mut App<SqliteKvStore>, id: &str, done: bool) -> Result<()> {
    match app.find_task_id(id) {
        Some(task_id) => {
            app.set_task_done(task_id, done)?;
            let state = if done { "done" } else { "open" };
            println!("{} marked {state}", render::short_id(&task_id));
        }
        None => println!("no unique task matches `{id}`"),
    }
    Ok(())
}

fn run_note(app: &mut App<SqliteKvStore>, command: NoteCommand) -> Result<()> {
    match command {
        NoteCommand::Add {
            title,
            content,
            tags,
        } => match app.submit_note(NoteDraft::from_input(&title, &content, &tags))? {
            Some(id) => println!("added {}", render::short_id(&id)),
            None => println!("nothing added: title and content are blank"),
        },
        NoteCommand::Rm { id } => match app.find_note_id(&id) {
            Some(note_id) => {
                app.delete_note(note_id)?;
                println!("deleted {}", render::short_id(&note_id));
            }
            None => println!("no unique note matches `{id}`"),
        },
    }
    Ok(())
}

fn run_timer(app: &mut App<SqliteKvStore>, minutes: Option<String>) -> Result<()> {
    app.set_timer_input(minutes);
    app.attach_sink(Box::new(render::TimerLine));
    app.start_timer();

    while app.timer().is_running() {
        thread::sleep(Duration::from_secs(1));
        app.tick_timer()?;
    }

    let stats = app.stats();
    println!();
    println!(
        "session complete: {} session(s), {} focus minute(s) total",
        stats.sessions, stats.minutes
    );
    Ok(())
}
