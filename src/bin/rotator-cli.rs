#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use rotator::{
    io,
    model::Rotation,
    rotation,
    storage::{JsonStorage, Storage},
};
use chrono::Utc;
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de rotation équitable
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de la rotation
    #[arg(long, global = true, default_value = "rotation.json")]
    state: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un ou plusieurs membres (dans l'ordre donné)
    Add {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Assigner le prochain membre
    Next,

    /// Sauter le membre courant et assigner un remplaçant
    Skip,

    /// Annuler la dernière assignation
    Revert,

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Repartir d'une rotation vide
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.state)?;
    let current = storage.load()?;

    let code = match cli.cmd {
        Commands::Add { ids } => {
            let next = ids
                .iter()
                .try_fold(current, |r, id| rotation::add_member(&r, id))?;
            storage.save(&next)?;
            println!("{} member(s) in rotation", next.len());
            0
        }
        Commands::Next => {
            let next = rotation::assign_next(&current, Utc::now())?;
            storage.save(&next)?;
            print_current(&next)?;
            0
        }
        Commands::Skip => {
            let next = rotation::skip_and_assign_next(&current, Utc::now())?;
            storage.save(&next)?;
            print_current(&next)?;
            0
        }
        Commands::Revert => {
            let next = rotation::revert_assignment(&current)?;
            storage.save(&next)?;
            print_current(&next)?;
            0
        }
        Commands::List { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_rotation_json(path, &current)?;
            }
            if let Some(path) = out_csv {
                io::export_members_csv(path, &current)?;
            }
            if current.is_empty() {
                eprintln!("rotation is empty");
                // Code 2 = WARNING/INCOMPLETE
                2
            } else {
                for line in io::render_table(&current) {
                    println!("{line}");
                }
                0
            }
        }
        Commands::Clear => {
            storage.save(&rotation::initial_state())?;
            0
        }
    };

    std::process::exit(code);
}

fn print_current(state: &Rotation) -> Result<()> {
    let member = state.current_member().context("no current member")?;
    let count = state
        .find_member(member.id.as_str())
        .map_or(member.count, |m| m.count);
    println!("{} (count {})", member.id, count);
    Ok(())
}
