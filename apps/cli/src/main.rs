use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use client_core::{load_settings, BookManager, FormField, HttpRecordStore, StatusKind};

mod render;

#[derive(Parser, Debug)]
#[command(name = "library", about = "Manage books held by a bookapi service")]
struct Cli {
    /// Service base URL; `/bookapi` is appended. Overrides library.toml and LIBRARY_API_URL.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every book.
    List,
    /// Look up one book by id.
    Get { id: String },
    /// Add a book; id and title are required.
    Add(BookFields),
    /// Edit an existing book; omitted fields keep their stored values.
    Update {
        id: String,
        #[command(flatten)]
        fields: UpdateFields,
    },
    /// Delete a book by id.
    Delete { id: String },
}

#[derive(ClapArgs, Debug)]
struct BookFields {
    #[arg(long, default_value = "")]
    id: String,
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long, default_value = "")]
    author: String,
    #[arg(long, default_value = "")]
    publisher: String,
    #[arg(long, default_value = "")]
    year: String,
    #[arg(long, default_value = "")]
    genre: String,
}

impl BookFields {
    fn edits(self) -> Vec<(FormField, String)> {
        vec![
            (FormField::Id, self.id),
            (FormField::Title, self.title),
            (FormField::Author, self.author),
            (FormField::Publisher, self.publisher),
            (FormField::Year, self.year),
            (FormField::Genre, self.genre),
        ]
    }
}

#[derive(ClapArgs, Debug)]
struct UpdateFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    publisher: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    genre: Option<String>,
}

impl UpdateFields {
    fn edits(self) -> Vec<(FormField, String)> {
        [
            (FormField::Title, self.title),
            (FormField::Author, self.author),
            (FormField::Publisher, self.publisher),
            (FormField::Year, self.year),
            (FormField::Genre, self.genre),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .collect()
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }
    let store = HttpRecordStore::new(&settings.api_base_url)
        .with_context(|| format!("cannot use api url '{}'", settings.api_base_url))?;
    tracing::debug!(api_root = %store.api_root(), "using bookapi");

    let mut manager = BookManager::new(Arc::new(store));
    manager.mount().await;
    run(&mut manager, cli.command).await;

    let view = manager.view();
    print!("{}", render::render_view(&view));
    let failed = view
        .banner
        .is_some_and(|banner| banner.kind == StatusKind::Failure);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn run(manager: &mut BookManager, command: Command) {
    match command {
        Command::List => {}
        Command::Get { id } => manager.fetch(id).await,
        Command::Add(fields) => {
            for (field, value) in fields.edits() {
                manager.edit_field(field, value).await;
            }
            manager.submit().await;
        }
        Command::Update { id, fields } => {
            manager.fetch(id).await;
            let Some(record) = manager.state().search_result.clone() else {
                return;
            };
            manager.select_for_edit(record).await;
            for (field, value) in fields.edits() {
                manager.edit_field(field, value).await;
            }
            manager.submit().await;
        }
        Command::Delete { id } => manager.delete(id).await,
    }
}
