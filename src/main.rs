use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use missions::config::Config;
use missions::db::{self, Database, MemoryKv};
use missions::error::StorageError;
use missions::{render, shell, KvGateway, MissionId, MissionStore, Session};

#[derive(Parser)]
#[command(name = "missions")]
#[command(about = "Keep track of your missions")]
struct Cli {
    /// Database file (overrides MISSIONS_DB and the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Keep missions in memory only; nothing is read from or written to disk
    #[arg(long, global = true, conflicts_with = "db")]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all missions, newest first
    List,
    /// Add a mission
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Mark a mission done, or not done again
    Toggle { id: MissionId },
    /// Change a mission's title or description
    Edit {
        id: MissionId,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a mission
    Delete { id: MissionId },
    /// Show a mission's details
    Show { id: MissionId },
    /// Start an interactive shell
    Shell,
}

/// Initialize tracing on stderr so stdout only carries mission output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "missions=warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_database(path: PathBuf) -> Result<Database, StorageError> {
    let db = Database::open(path)?;
    db.migrate()?;
    Ok(db)
}

/// Build the store. Storage problems never stop the program: without a
/// usable database the missions are kept in memory for this run.
fn open_store(cli: &Cli) -> MissionStore {
    if cli.ephemeral {
        return MissionStore::initialize(KvGateway::new(MemoryKv::new()));
    }

    let config = Config::load();
    let path = match cli.db.clone().or(config.database_path) {
        Some(path) => Ok(path),
        None => db::default_path(),
    };

    match path.and_then(open_database) {
        Ok(db) => MissionStore::initialize(KvGateway::new(db)),
        Err(e) => {
            tracing::warn!("Database unavailable, keeping missions in memory: {}", e);
            MissionStore::initialize(KvGateway::new(MemoryKv::new()))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut session = Session::new(open_store(&cli));

    match cli.command {
        None | Some(Commands::List) => {
            let store = session.store();
            print!("{}", render::render_list(store.missions(), None, None));
        }
        Some(Commands::Add { title, description }) => {
            session.set_draft_title(title);
            session.set_draft_description(description);
            match session.submit_draft() {
                Some(id) => println!("Added mission #{}", id),
                None => println!("A mission needs a title; nothing was added."),
            }
        }
        Some(Commands::Toggle { id }) => {
            session.toggle(id);
            match session.store().get(id) {
                Some(m) if m.is_completed => println!("Completed #{}: {}", id, m.task),
                Some(m) => println!("Reopened #{}: {}", id, m.task),
                None => println!("No mission #{}", id),
            }
        }
        Some(Commands::Edit {
            id,
            title,
            description,
        }) => {
            if !session.begin_edit(id) {
                println!("No mission #{}", id);
                return Ok(());
            }
            if let Some(title) = title {
                session.set_edit_title(title);
            }
            if let Some(description) = description {
                session.set_edit_description(description);
            }
            if session.save_edit() {
                println!("Saved mission #{}", id);
            } else {
                println!("A mission needs a title; nothing was changed.");
            }
        }
        Some(Commands::Delete { id }) => {
            if session.store().get(id).is_some() {
                session.delete(id);
                println!("Deleted mission #{}", id);
            } else {
                println!("No mission #{}", id);
            }
        }
        Some(Commands::Show { id }) => match session.select(id) {
            Some(mission) => print!("{}", render::render_detail(mission)),
            None => println!("No mission #{}", id),
        },
        Some(Commands::Shell) => {
            shell::run(&mut session, io::stdin().lock(), &mut io::stdout())?;
        }
    }

    Ok(())
}
