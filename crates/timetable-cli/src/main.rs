use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use timetable_core::{Bucket, TimetableConfig};
use tracing::info;

mod app;
mod cli;
mod render;

use app::App;
use cli::{AddArgs, CellArgs, Cli, Command, ShellCommand, ShellLine};

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timetable=info,timetable_lessons=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Show);

    // classification needs no storage
    if let Command::Bucket { time } = &command {
        println!("{}", Bucket::classify_str(time));
        return Ok(ExitCode::SUCCESS);
    }

    // load config: --config > TIMETABLE_CONFIG env > ~/.timetable/timetable.toml
    let config_path = cli.config.or_else(|| std::env::var("TIMETABLE_CONFIG").ok());
    let mut config = TimetableConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        TimetableConfig::default()
    });
    if let Some(path) = cli.database {
        config.database.path = path;
    }
    ensure_parent_dir(&config.database.path);
    info!(path = %config.database.path, "using lesson database");

    let mut app = App::start(config.database);

    let ok = match command {
        Command::Show => {
            print!("{}", render::grid_table(&app.grid().render()));
            true
        }
        Command::List { json } => {
            let lessons = app.lessons();
            if json {
                println!("{}", serde_json::to_string_pretty(&lessons)?);
            } else {
                print!("{}", render::lesson_lines(&lessons));
            }
            true
        }
        Command::Add(args) => run_add(&mut app, args),
        Command::Remove(cell) => run_remove(&mut app, cell),
        Command::Shell => run_shell(&mut app)?,
        Command::Bucket { .. } => true,
    };
    flush_alerts(&mut app);

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn run_add(app: &mut App, args: AddArgs) -> bool {
    let time = args.time.unwrap_or_else(|| args.at.time());
    app.add(&args.name, time, args.at)
}

fn run_remove(app: &mut App, cell: CellArgs) -> bool {
    app.remove(cell.slot, cell.day)
}

/// Keep one grid alive across commands read from stdin until `quit` or EOF.
fn run_shell(app: &mut App) -> anyhow::Result<bool> {
    flush_alerts(app);
    print!("{}", render::grid_table(&app.grid().render()));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("timetable> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let Some(words) = ShellLine::words(&line) else {
            tracing::warn!("unbalanced quotes, line ignored");
            eprintln!("[warning] Input: unbalanced quotes");
            continue;
        };
        if words.is_empty() {
            continue;
        }
        let parsed = match ShellLine::try_parse_from(words) {
            Ok(p) => p,
            Err(e) => {
                let _ = e.print();
                continue;
            }
        };

        match parsed.command {
            ShellCommand::Show => print!("{}", render::grid_table(&app.grid().render())),
            ShellCommand::List => print!("{}", render::lesson_lines(&app.lessons())),
            ShellCommand::Add(args) => {
                if run_add(app, args) {
                    print!("{}", render::grid_table(&app.grid().render()));
                }
            }
            ShellCommand::Remove(cell) => {
                if run_remove(app, cell) {
                    print!("{}", render::grid_table(&app.grid().render()));
                }
            }
            ShellCommand::Quit => break,
        }
        flush_alerts(app);
    }

    info!("timetable session closed");
    Ok(true)
}

fn flush_alerts(app: &mut App) {
    for alert in app.take_alerts() {
        eprintln!("{}", render::alert_line(&alert));
    }
}

fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
}
