//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::Influence;

/// Zoo hotel manager: animals, habitats, staff, trees and vaccinations
#[derive(Parser, Debug)]
#[command(name = "hva")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Hotel snapshot file (overrides configured state_file)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub state: Option<PathBuf>,

    /// Extra config file layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an empty hotel in the state file
    New {
        /// Discard an existing hotel
        #[arg(short, long)]
        force: bool,
    },

    /// Replay an import file into the hotel
    Import {
        /// Pipe-delimited import file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Apply all records or none
        #[arg(short, long)]
        atomic: bool,
    },

    /// List entities
    Show {
        #[command(subcommand)]
        command: ShowCommands,
    },

    /// Register a new entity
    Register {
        #[command(subcommand)]
        command: RegisterCommands,
    },

    /// Habitat queries and changes
    Habitat {
        #[command(subcommand)]
        command: HabitatCommands,
    },

    /// Animal queries and changes
    Animal {
        #[command(subcommand)]
        command: AnimalCommands,
    },

    /// Worker queries and changes
    Worker {
        #[command(subcommand)]
        command: WorkerCommands,
    },

    /// Vaccinate an animal
    Vaccinate {
        animal: String,
        vaccine: String,
        vet: String,
    },

    /// Show or advance the season
    Season {
        #[command(subcommand)]
        command: SeasonCommands,
    },

    /// Global satisfaction of the hotel
    Satisfaction,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ShowCommands {
    Animals,
    Habitats,
    Species,
    Trees,
    Workers,
    Vaccines,
    /// Every vaccination, oldest first
    Vaccinations,
    /// Vaccinations whose outcome was not NORMAL
    WrongVaccinations,
}

#[derive(Subcommand, Debug)]
pub enum RegisterCommands {
    Species {
        id: String,
        name: String,
    },
    Animal {
        id: String,
        name: String,
        species: String,
        habitat: String,
    },
    Habitat {
        id: String,
        name: String,
        area: u32,
    },
    Worker {
        id: String,
        name: String,
        /// VET or TRT
        kind: String,
    },
    Tree {
        id: String,
        name: String,
        age: u32,
        difficulty: u32,
        /// CADUCA or PERENE
        kind: String,
        /// Plant the tree in this habitat
        #[arg(long)]
        habitat: Option<String>,
    },
    Vaccine {
        id: String,
        name: String,
        /// Comma-separated species ids
        #[arg(default_value = "")]
        species: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum HabitatCommands {
    /// Animals housed in a habitat
    Animals { habitat: String },
    /// Trees planted in a habitat
    Trees { habitat: String },
    /// Plant a registered tree in a habitat
    Plant { habitat: String, tree: String },
    /// Change a habitat's area
    Area { habitat: String, area: u32 },
    /// Set how a habitat suits a species (POS, NEU or NEG)
    Influence {
        habitat: String,
        species: String,
        influence: Influence,
    },
}

#[derive(Subcommand, Debug)]
pub enum AnimalCommands {
    /// Move an animal to another habitat
    Transfer { animal: String, habitat: String },
    /// Satisfaction of one animal
    Satisfaction { animal: String },
    /// Vaccinations an animal received
    Acts { animal: String },
    /// The most satisfied animal
    MostSatisfied,
}

#[derive(Subcommand, Debug)]
pub enum WorkerCommands {
    AddResponsibility {
        worker: String,
        responsibility: String,
    },
    RemoveResponsibility {
        worker: String,
        responsibility: String,
    },
    /// Satisfaction of one worker
    Satisfaction { worker: String },
    /// Vaccinations performed by a vet
    Acts { vet: String },
    /// Workers with more than N responsibilities
    Busiest {
        #[arg(default_value_t = 0)]
        more_than: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum SeasonCommands {
    Show,
    Advance,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
}
