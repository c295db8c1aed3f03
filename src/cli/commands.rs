//! Command dispatch
//!
//! Every hotel command runs against the session loaded from the state file;
//! the snapshot is rewritten only when the session reports changes.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::HotelSession;
use crate::cli::args::{
    AnimalCommands, Cli, Commands, ConfigCommands, HabitatCommands, RegisterCommands,
    SeasonCommands, ShowCommands, WorkerCommands,
};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{expand_path, Settings};
use crate::domain::{Hotel, VaccineDamage};
use crate::infrastructure::di::ServiceContainer;

/// Run the parsed command line.
pub fn execute(cli: &Cli) -> CliResult<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(state) = &cli.state {
        settings.state_file = expand_path(state);
    }
    debug!("execute: state_file={}", settings.state_file.display());
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => cmd_config(&container, command),
        Commands::New { force } => cmd_new(&container, *force),
        command => {
            let state_file = container.settings.state_file.clone();
            let mut session = container.snapshots.load_or_new(&state_file)?;
            let result = run(&container, &mut session, command);
            // a failed non-atomic import leaves earlier records applied; keep them
            persist(&container, &mut session)?;
            result
        }
    }
}

fn persist(container: &ServiceContainer, session: &mut HotelSession) -> CliResult<()> {
    if session.is_modified()? {
        container.snapshots.save(session)?;
        debug!("persist: snapshot written");
    } else {
        debug!("persist: no changes");
    }
    Ok(())
}

fn run(container: &ServiceContainer, session: &mut HotelSession, command: &Commands) -> CliResult<()> {
    match command {
        Commands::Import { file, atomic } => cmd_import(container, session.hotel_mut(), file, *atomic),
        Commands::Show { command } => cmd_show(session.hotel(), command),
        Commands::Register { command } => cmd_register(session.hotel_mut(), command),
        Commands::Habitat { command } => cmd_habitat(session.hotel_mut(), command),
        Commands::Animal { command } => cmd_animal(session.hotel_mut(), command),
        Commands::Worker { command } => cmd_worker(session.hotel_mut(), command),
        Commands::Vaccinate {
            animal,
            vaccine,
            vet,
        } => cmd_vaccinate(session.hotel_mut(), animal, vaccine, vet),
        Commands::Season { command } => cmd_season(session.hotel_mut(), command),
        Commands::Satisfaction => {
            output::info(&output::rounded(session.hotel().satisfaction()));
            Ok(())
        }
        Commands::New { .. } | Commands::Config { .. } | Commands::Completion { .. } => {
            Err(CliError::Usage("command does not operate on a hotel".into()))
        }
    }
}

fn cmd_new(container: &ServiceContainer, force: bool) -> CliResult<()> {
    let path = container.settings.state_file.as_path();
    if container.fs.exists(path) && !force {
        return Err(CliError::Usage(format!(
            "hotel already exists: {} (use --force to discard it)",
            path.display()
        )));
    }

    let mut session = HotelSession::new(Hotel::new())?;
    container.snapshots.save_as(&mut session, path)?;
    output::success(&format!("new hotel: {}", path.display()));
    Ok(())
}

#[instrument(skip(container, hotel))]
fn cmd_import(container: &ServiceContainer, hotel: &mut Hotel, file: &Path, atomic: bool) -> CliResult<()> {
    let summary = if atomic {
        container.import.import_file_atomically(hotel, file)?
    } else {
        container.import.import_file(hotel, file)?
    };
    output::success(&format!("imported {} records from {}", summary.total(), file.display()));
    Ok(())
}

fn cmd_show(hotel: &Hotel, command: &ShowCommands) -> CliResult<()> {
    match command {
        ShowCommands::Animals => hotel
            .animals()
            .for_each(|animal| output::info(&hotel.describe_animal(animal))),
        ShowCommands::Habitats => hotel.habitats().for_each(|habitat| {
            output::info(habitat);
            hotel
                .habitat_trees(habitat.id.as_str())
                .unwrap_or_default()
                .into_iter()
                .for_each(|tree| output::info(&hotel.describe_tree(tree)));
        }),
        ShowCommands::Species => hotel
            .all_species()
            .for_each(|species| output::info(&format!("ESPÉCIE|{}|{}", species.id, species.name))),
        ShowCommands::Trees => hotel
            .trees()
            .for_each(|tree| output::info(&hotel.describe_tree(tree))),
        ShowCommands::Workers => hotel.workers().for_each(output::info),
        ShowCommands::Vaccines => hotel.vaccines().for_each(output::info),
        ShowCommands::Vaccinations => hotel.vaccinations().iter().for_each(output::info),
        ShowCommands::WrongVaccinations => hotel
            .wrong_vaccinations()
            .into_iter()
            .for_each(output::info),
    }
    Ok(())
}

fn cmd_register(hotel: &mut Hotel, command: &RegisterCommands) -> CliResult<()> {
    match command {
        RegisterCommands::Species { id, name } => {
            hotel.add_species(id, name)?;
        }
        RegisterCommands::Animal {
            id,
            name,
            species,
            habitat,
        } => {
            hotel.add_animal(id, name, species, habitat)?;
        }
        RegisterCommands::Habitat { id, name, area } => {
            hotel.add_habitat(id, name, *area)?;
        }
        RegisterCommands::Worker { id, name, kind } => {
            hotel.add_worker(id, name, kind)?;
        }
        RegisterCommands::Tree {
            id,
            name,
            age,
            difficulty,
            kind,
            habitat,
        } => {
            match habitat {
                Some(habitat) => {
                    hotel.add_tree_to_habitat(habitat, id, name, *age, *difficulty, kind)?;
                }
                None => {
                    hotel.add_tree(id, name, *age, *difficulty, kind)?;
                }
            }
            output::info(&hotel.describe_tree(hotel.tree(id)?));
            return Ok(());
        }
        RegisterCommands::Vaccine { id, name, species } => {
            hotel.add_vaccine(id, name, species)?;
        }
    }
    output::success("registered");
    Ok(())
}

fn cmd_habitat(hotel: &mut Hotel, command: &HabitatCommands) -> CliResult<()> {
    match command {
        HabitatCommands::Animals { habitat } => hotel
            .habitat_animals(habitat)?
            .into_iter()
            .for_each(|animal| output::info(&hotel.describe_animal(animal))),
        HabitatCommands::Trees { habitat } => hotel
            .habitat_trees(habitat)?
            .into_iter()
            .for_each(|tree| output::info(&hotel.describe_tree(tree))),
        HabitatCommands::Plant { habitat, tree } => hotel.plant_tree(habitat, tree)?,
        HabitatCommands::Area { habitat, area } => hotel.change_habitat_area(habitat, *area)?,
        HabitatCommands::Influence {
            habitat,
            species,
            influence,
        } => hotel.change_habitat_suitability(habitat, species, *influence)?,
    }
    Ok(())
}

fn cmd_animal(hotel: &mut Hotel, command: &AnimalCommands) -> CliResult<()> {
    match command {
        AnimalCommands::Transfer { animal, habitat } => hotel.transfer_animal(animal, habitat)?,
        AnimalCommands::Satisfaction { animal } => {
            output::info(&output::rounded(hotel.animal_satisfaction(animal)?));
        }
        AnimalCommands::Acts { animal } => hotel
            .animal_vaccinations(animal)?
            .into_iter()
            .for_each(output::info),
        AnimalCommands::MostSatisfied => match hotel.most_satisfied_animal() {
            Some(animal) => output::info(&hotel.describe_animal(animal)),
            None => output::warning("no animals"),
        },
    }
    Ok(())
}

fn cmd_worker(hotel: &mut Hotel, command: &WorkerCommands) -> CliResult<()> {
    match command {
        WorkerCommands::AddResponsibility {
            worker,
            responsibility,
        } => hotel.add_responsibility(worker, responsibility)?,
        WorkerCommands::RemoveResponsibility {
            worker,
            responsibility,
        } => hotel.remove_responsibility(worker, responsibility)?,
        WorkerCommands::Satisfaction { worker } => {
            output::info(&output::rounded(hotel.worker_satisfaction(worker)?));
        }
        WorkerCommands::Acts { vet } => hotel
            .vet_vaccinations(vet)?
            .into_iter()
            .for_each(output::info),
        WorkerCommands::Busiest { more_than } => hotel
            .workers_with_more_responsibilities_than(*more_than)
            .into_iter()
            .for_each(output::info),
    }
    Ok(())
}

fn cmd_vaccinate(hotel: &mut Hotel, animal: &str, vaccine: &str, vet: &str) -> CliResult<()> {
    let record = hotel.vaccinate_animal(animal, vaccine, vet)?;
    let damage = record.damage;
    output::info(record);
    if damage != VaccineDamage::Normal {
        output::warning(&format!("vaccine {} is not meant for {}: {}", vaccine, animal, damage));
    }
    Ok(())
}

fn cmd_season(hotel: &mut Hotel, command: &SeasonCommands) -> CliResult<()> {
    let season = match command {
        SeasonCommands::Show => hotel.season(),
        SeasonCommands::Advance => hotel.progress_season(),
    };
    output::action("season", &format!("{} ({:?})", season, season));
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective configuration");
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
