use chrono::Utc;
use clap::{Parser, Subcommand};
use echeancier::{
    export_file_name, AppConfig, AppError, Exporter, JsonFileFeed, LopdfConverter, NdjsonFeed, RecordAdapter,
    RecordFeed, ScheduleState, ScheduleView, Session, TableEntry,
};
use echeancier_types::TABLE_COLUMNS;
use std::path::{Path, PathBuf};
use tokio::io::BufReader;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "echeancier", version, about = "Render and export loan amortization schedules", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rendered schedule
    Render {
        /// JSON document keyed by table name
        #[arg(long)]
        data: PathBuf,

        /// Print the view as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write the schedule as a PDF with page numbers
    Export {
        /// JSON document keyed by table name
        #[arg(long)]
        data: PathBuf,

        /// Directory the PDF is written to
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// File name prefix, the date is appended
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Read record batches and commands as JSON lines from stdin
    Watch {
        /// Directory the PDFs are written to
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// File name prefix, the date is appended
        #[arg(long)]
        prefix: Option<String>,
    },
}

fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    match path {
        Some(path) => Ok(AppConfig::load(path)?),
        None => Ok(AppConfig::default()),
    }
}

fn apply_overrides(config: &mut AppConfig, out_dir: Option<PathBuf>, prefix: Option<String>) {
    if let Some(out_dir) = out_dir {
        config.output_dir = out_dir;
    }
    if let Some(prefix) = prefix {
        config.file_prefix = prefix;
    }
}

/// Reads a tables document into a fresh state. An unreadable document is
/// not fatal: the schedule is rendered without data.
async fn load_state(data: &Path, config: &AppConfig) -> ScheduleState {
    let adapter = RecordAdapter::new(config.tables.clone());
    let mut state = ScheduleState::new();
    match JsonFileFeed::open(data).await {
        Ok(mut feed) => {
            while let Some(batch) = feed.next_batch().await {
                if let Some(update) = adapter.adapt(&batch) {
                    state.apply(update);
                }
            }
        }
        Err(e) => log::warn!("Data source unavailable ({}); continuing without data", e),
    }
    state
}

fn print_view(view: &ScheduleView) {
    println!("{}", view.title);
    for (label, value) in view.header.entries() {
        println!("  {:<16} {}", label, value);
    }
    println!();
    println!("{}", TABLE_COLUMNS.join(" | "));
    for entry in &view.table {
        match entry {
            TableEntry::Row(row) => println!("{}", row.cells.join(" | ")),
            TableEntry::Placeholder { message, .. } => println!("{}", message),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("echeancier=info")).init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Render { data, json } => {
            let view = load_state(&data, &config).await.render(&config.messages);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_view(&view);
            }
        }
        Command::Export { data, out_dir, prefix } => {
            apply_overrides(&mut config, out_dir, prefix);
            let view = load_state(&data, &config).await.render(&config.messages);
            let path = config
                .output_dir
                .join(export_file_name(&config.file_prefix, Utc::now().date_naive()));
            let exporter = Exporter::new(LopdfConverter::new(), &config);
            let written = exporter.export(&view, &path).await?;
            println!("{}", written.display());
        }
        Command::Watch { out_dir, prefix } => {
            apply_overrides(&mut config, out_dir, prefix);
            let session = Session::new(LopdfConverter::new(), config);
            let mut status = session.subscribe_status();
            tokio::spawn(async move {
                while status.changed().await.is_ok() {
                    let text = status.borrow_and_update().text().to_string();
                    if !text.is_empty() {
                        eprintln!("{}", text);
                    }
                }
            });

            let (commands, receiver) = mpsc::channel(16);
            let feed = NdjsonFeed::with_commands(BufReader::new(tokio::io::stdin()), commands);
            let outcome = session.run(feed, receiver).await;
            for written in outcome.exports.into_iter().flatten() {
                println!("{}", written.display());
            }
        }
    }
    Ok(())
}
