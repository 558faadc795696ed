use chrono::{NaiveDateTime, NaiveTime, Weekday};
use clap::{Parser, Subcommand};
use timetable_core::{parse_date_time, parse_time_of_day, Bucket};

/// Record weekly study lessons into a 7-day × 3-timeslot grid.
#[derive(Debug, Parser)]
#[command(name = "timetable", version)]
pub struct Cli {
    /// Config file (defaults to $TIMETABLE_CONFIG, then ~/.timetable/timetable.toml).
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Override the database path from the config.
    #[arg(long, global = true)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the weekly grid.
    Show,
    /// List every stored lesson.
    List {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Add a lesson.
    Add(AddArgs),
    /// Remove the lesson shown in a grid cell (all rows with that name).
    Remove(CellArgs),
    /// Print the timeslot a time of day falls into.
    Bucket {
        /// Time as HH:MM or HH:MM:SS.
        time: String,
    },
    /// Interactive session that keeps the grid open until `quit`.
    Shell,
}

#[derive(Debug, Clone, clap::Args)]
pub struct AddArgs {
    /// Lesson name.
    pub name: String,
    /// Date and time of the lesson (YYYY-MM-DD HH:MM or YYYY-MM-DDTHH:MM).
    #[arg(long, value_parser = date_time_arg)]
    pub at: NaiveDateTime,
    /// Time of day, if different from the time part of --at (HH:MM).
    #[arg(long, value_parser = time_arg)]
    pub time: Option<NaiveTime>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CellArgs {
    /// Weekday column, e.g. monday or mon.
    #[arg(long, value_parser = weekday_arg)]
    pub day: Weekday,
    /// Timeslot row: morning, afternoon or evening.
    #[arg(long, value_parser = bucket_arg)]
    pub slot: Bucket,
}

/// One line typed into the interactive session.
#[derive(Debug, Parser)]
#[command(name = "timetable-shell", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

impl ShellLine {
    /// Split a typed line into words, honouring quotes so names and
    /// date-times may contain spaces. `None` when quotes are unbalanced.
    pub fn words(line: &str) -> Option<Vec<String>> {
        shlex::split(line)
    }
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    Show,
    List,
    Add(AddArgs),
    Remove(CellArgs),
    #[command(alias = "exit")]
    Quit,
}

fn date_time_arg(s: &str) -> Result<NaiveDateTime, String> {
    parse_date_time(s).ok_or_else(|| format!("expected YYYY-MM-DD HH:MM, got {s:?}"))
}

fn time_arg(s: &str) -> Result<NaiveTime, String> {
    parse_time_of_day(s).ok_or_else(|| format!("expected HH:MM, got {s:?}"))
}

fn weekday_arg(s: &str) -> Result<Weekday, String> {
    s.parse::<Weekday>()
        .map_err(|_| format!("unknown weekday: {s}"))
}

fn bucket_arg(s: &str) -> Result<Bucket, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_separate_time() {
        let cli = Cli::try_parse_from([
            "timetable",
            "add",
            "Math",
            "--at",
            "2024-06-03 09:00",
            "--time",
            "08:45",
        ])
        .unwrap();
        let Some(Command::Add(args)) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.name, "Math");
        assert_eq!(args.time, NaiveTime::from_hms_opt(8, 45, 0));
    }

    #[test]
    fn parses_remove_cell() {
        let cli =
            Cli::try_parse_from(["timetable", "remove", "--day", "Wed", "--slot", "evening"]).unwrap();
        let Some(Command::Remove(cell)) = cli.command else {
            panic!("expected remove");
        };
        assert_eq!(cell.day, Weekday::Wed);
        assert_eq!(cell.slot, Bucket::Evening);
    }

    #[test]
    fn rejects_bad_date() {
        assert!(Cli::try_parse_from(["timetable", "add", "Math", "--at", "tomorrow"]).is_err());
    }

    #[test]
    fn shell_line_parses_without_binary_name() {
        let line = ShellLine::try_parse_from(["remove", "--day", "mon", "--slot", "morning"]).unwrap();
        assert!(matches!(line.command, ShellCommand::Remove(_)));
        let line = ShellLine::try_parse_from(["exit"]).unwrap();
        assert!(matches!(line.command, ShellCommand::Quit));
    }

    #[test]
    fn shell_line_keeps_quoted_name_and_date_time() {
        let words =
            ShellLine::words(r#"add "Computer Science" --at "2024-06-03 09:00""#).unwrap();
        let line = ShellLine::try_parse_from(words).unwrap();
        let ShellCommand::Add(args) = line.command else {
            panic!("expected add");
        };
        assert_eq!(args.name, "Computer Science");
        assert_eq!(args.at, parse_date_time("2024-06-03 09:00").unwrap());
    }

    #[test]
    fn shell_line_with_unbalanced_quote_is_rejected() {
        assert!(ShellLine::words(r#"add "Computer Science --at 2024-06-03T09:00"#).is_none());
    }
}
