mod config;
mod init;
mod seed;

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use docent_chat::{Assistant, ChatMessage, Role};
use docent_kb::loader::{DocumentLoader, TextLoader};
use docent_kb::{Chunker, IngestionPipeline, KnowledgeStore, SettingsStore, SqliteStore};
use tokio::io::AsyncBufReadExt;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "docent", version, about = "Lexical FAQ-retrieval assistant")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "docent.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Chat with the knowledge base on stdin/stdout.
    Chat,
    /// Ingest a file into the knowledge base.
    Ingest {
        path: PathBuf,
        /// Category assigned to the document; defaults to the configured one.
        #[arg(long)]
        category: Option<String>,
    },
    /// List stored documents.
    List,
    /// Show one document and its chunks.
    Show { id: String },
    /// Remove a document and every chunk derived from it.
    Remove { id: String },
    /// Re-chunk one document, or all documents when no id is given.
    Rechunk { id: Option<String> },
    /// Ingest the built-in starter FAQ.
    Seed,
    /// Interactive setup: write a config file and the initial settings.
    Init {
        /// Where to write the config file (defaults to ./docent.toml).
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    init_subscriber(&config);

    if let Command::Init { output } = &cli.command {
        return init::run(output.clone(), &config).await;
    }

    let store = open_store(&config).await?;
    let pipeline = IngestionPipeline::new(
        Chunker::default(),
        Arc::clone(&store) as Arc<dyn KnowledgeStore>,
    );

    match cli.command {
        Command::Chat => chat_loop(&store).await,
        Command::Ingest { path, category } => {
            let category = category.unwrap_or_else(|| config.chat.default_category.clone());
            ingest(&pipeline, &path, &category).await
        }
        Command::List => list_documents(&store).await,
        Command::Show { id } => show_document(&store, &id).await,
        Command::Remove { id } => {
            store
                .delete_document(&id)
                .await
                .with_context(|| format!("failed to remove document {id}"))?;
            println!("removed {id}");
            Ok(())
        }
        Command::Rechunk { id } => rechunk(&pipeline, id.as_deref()).await,
        Command::Seed => {
            let kb = Arc::clone(&store) as Arc<dyn KnowledgeStore>;
            let count = seed::run(&kb, &pipeline).await?;
            println!("seeded starter FAQ ({count} chunks)");
            Ok(())
        }
        Command::Init { .. } => unreachable!("handled before store setup"),
    }
}

fn init_subscriber(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log.filter.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<SqliteStore>> {
    let path = &config.database.path;
    if path != ":memory:"
        && let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create database directory {}", parent.display()))?;
    }
    let store = SqliteStore::new(path)
        .await
        .with_context(|| format!("failed to open knowledge base at {path}"))?;
    Ok(Arc::new(store))
}

async fn chat_loop(store: &Arc<SqliteStore>) -> anyhow::Result<()> {
    let assistant = Assistant::new(
        Arc::clone(store) as Arc<dyn KnowledgeStore>,
        Arc::clone(store) as Arc<dyn SettingsStore>,
    );
    let settings = store.fetch_settings().await?;
    println!("{} — {}", settings.app_name, settings.welcome_message);
    println!("(type 'exit' to quit)\n");

    let mut history: Vec<ChatMessage> = Vec::new();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }
        if matches!(utterance, "exit" | "quit") {
            break;
        }

        let reply = assistant.answer(utterance, &history).await?;
        println!("\n{}\n", reply.message);
        if let Some(link) = &reply.map_link {
            println!("🗺️  {link}\n");
        }

        history.push(ChatMessage {
            role: Role::User,
            content: utterance.to_owned(),
        });
        history.push(ChatMessage {
            role: Role::Assistant,
            content: reply.message,
        });
    }
    Ok(())
}

async fn ingest(pipeline: &IngestionPipeline, path: &Path, category: &str) -> anyhow::Result<()> {
    let loader = loader_for(path)?;
    let count = pipeline
        .load_and_ingest(loader.as_ref(), path, category)
        .await
        .with_context(|| format!("failed to ingest {}", path.display()))?;
    println!("ingested {} ({count} chunks)", path.display());
    Ok(())
}

fn loader_for(path: &Path) -> anyhow::Result<Box<dyn DocumentLoader>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    #[cfg(feature = "pdf")]
    if ext == "pdf" {
        return Ok(Box::new(docent_kb::loader::PdfLoader::default()));
    }
    #[cfg(not(feature = "pdf"))]
    if ext == "pdf" {
        bail!("PDF support is not enabled; rebuild with --features pdf");
    }
    let loader = TextLoader::default();
    if !loader.supported_extensions().contains(&ext.as_str()) {
        bail!("unsupported file extension: {ext:?}");
    }
    Ok(Box::new(loader))
}

async fn list_documents(store: &Arc<SqliteStore>) -> anyhow::Result<()> {
    let documents = store.list_documents().await?;
    if documents.is_empty() {
        println!("no documents ingested yet — try `docent seed`");
        return Ok(());
    }
    for document in documents {
        let chunks = store.chunks_for_document(&document.id).await?;
        let flag = if document.active { "" } else { " [inactive]" };
        println!(
            "{}  {}  ({}, {} chunks){flag}",
            document.id,
            document.name,
            document.category,
            chunks.len()
        );
    }
    Ok(())
}

async fn show_document(store: &Arc<SqliteStore>, id: &str) -> anyhow::Result<()> {
    let document = store
        .get_document(id)
        .await?
        .with_context(|| format!("document not found: {id}"))?;
    println!("name:       {}", document.name);
    println!("category:   {}", document.category);
    println!("media type: {}", document.media_type);
    println!("size:       {} bytes", document.size_bytes);
    if !document.description.is_empty() {
        println!("about:      {}", document.description);
    }

    let chunks = store.chunks_for_document(id).await?;
    println!("chunks:     {}", chunks.len());
    for chunk in chunks {
        let head = match &chunk.question {
            Some(question) => question.clone(),
            None => chunk.answer.chars().take(60).collect(),
        };
        println!(
            "  [{}] {} {} ({})",
            chunk.ordinal,
            chunk.kind.as_str(),
            head,
            chunk.keywords.join(", ")
        );
    }
    Ok(())
}

async fn rechunk(pipeline: &IngestionPipeline, id: Option<&str>) -> anyhow::Result<()> {
    match id {
        Some(id) => {
            let count = pipeline.rechunk(id).await?;
            println!("re-chunked {id} ({count} chunks)");
        }
        None => {
            let summary = pipeline.rechunk_all().await?;
            println!(
                "re-chunked {} document(s), {} chunks, {} failure(s)",
                summary.documents, summary.chunks, summary.failures
            );
        }
    }
    Ok(())
}
