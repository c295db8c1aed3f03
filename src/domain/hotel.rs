//! The hotel aggregate: owns every entity and enforces referential integrity.
//!
//! Every mutation validates all of its preconditions before touching any
//! state, so a failed call leaves the hotel exactly as it was.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::entities::{
    Animal, Habitat, Influence, RecordId, Species, Tree, Vaccine, VaccineDamage, VaccineRecord,
    Worker, WorkerKind, WorkerRole,
};
use super::error::{DomainError, DomainResult};
use super::key::{Directory, Key};
use super::season::{Season, TreeKind};
use super::vaccination;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    season: Season,
    species: Directory<Species>,
    habitats: Directory<Habitat>,
    animals: Directory<Animal>,
    workers: Directory<Worker>,
    trees: Directory<Tree>,
    vaccines: Directory<Vaccine>,
    vaccinations: Vec<VaccineRecord>,
}

impl Hotel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn season(&self) -> Season {
        self.season
    }

    // ============================================================
    // Lookups
    // ============================================================

    pub fn species(&self, id: &str) -> DomainResult<&Species> {
        self.species
            .get(id)
            .ok_or_else(|| DomainError::SpeciesNotFound(id.to_string()))
    }

    pub fn habitat(&self, id: &str) -> DomainResult<&Habitat> {
        self.habitats
            .get(id)
            .ok_or_else(|| DomainError::HabitatNotFound(id.to_string()))
    }

    pub fn animal(&self, id: &str) -> DomainResult<&Animal> {
        self.animals
            .get(id)
            .ok_or_else(|| DomainError::AnimalNotFound(id.to_string()))
    }

    pub fn worker(&self, id: &str) -> DomainResult<&Worker> {
        self.workers
            .get(id)
            .ok_or_else(|| DomainError::WorkerNotFound(id.to_string()))
    }

    pub fn tree(&self, id: &str) -> DomainResult<&Tree> {
        self.trees
            .get(id)
            .ok_or_else(|| DomainError::TreeNotFound(id.to_string()))
    }

    pub fn vaccine(&self, id: &str) -> DomainResult<&Vaccine> {
        self.vaccines
            .get(id)
            .ok_or_else(|| DomainError::VaccineNotFound(id.to_string()))
    }

    pub fn record(&self, id: RecordId) -> Option<&VaccineRecord> {
        self.vaccinations.get(id.index())
    }

    pub fn all_species(&self) -> impl Iterator<Item = &Species> {
        self.species.values()
    }

    pub fn habitats(&self) -> impl Iterator<Item = &Habitat> {
        self.habitats.values()
    }

    pub fn animals(&self) -> impl Iterator<Item = &Animal> {
        self.animals.values()
    }

    pub fn workers(&self) -> impl Iterator<Item = &Worker> {
        self.workers.values()
    }

    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.values()
    }

    pub fn vaccines(&self) -> impl Iterator<Item = &Vaccine> {
        self.vaccines.values()
    }

    /// Hotel-wide vaccination registry, in registration order.
    pub fn vaccinations(&self) -> &[VaccineRecord] {
        &self.vaccinations
    }

    // ============================================================
    // Registration
    // ============================================================

    /// Fails when either the id or the name (ignoring case) is taken.
    pub fn add_species(&mut self, id: &str, name: &str) -> DomainResult<&Species> {
        let folded_name = name.to_lowercase();
        if self.species.contains(id)
            || self
                .species
                .values()
                .any(|s| s.name.to_lowercase() == folded_name)
        {
            return Err(DomainError::DuplicateSpecies(id.to_string()));
        }

        self.species
            .put(id, Species::new(Key::new(id), name.to_string()));
        self.species(id)
    }

    /// Checks, in order: duplicate id, species, habitat.
    pub fn add_animal(
        &mut self,
        id: &str,
        name: &str,
        species_id: &str,
        habitat_id: &str,
    ) -> DomainResult<&Animal> {
        if self.animals.contains(id) {
            return Err(DomainError::DuplicateAnimal(id.to_string()));
        }
        let species_key = self.species(species_id)?.id.clone();
        let habitat_key = self.habitat(habitat_id)?.id.clone();
        let animal_key = Key::new(id);

        if let Some(species) = self.species.get_mut(species_id) {
            species.animals.insert(animal_key.clone());
        }
        if let Some(habitat) = self.habitats.get_mut(habitat_id) {
            habitat.house(&species_key, &animal_key);
        }
        self.animals.put(
            animal_key.clone(),
            Animal {
                id: animal_key,
                name: name.to_string(),
                species: species_key,
                habitat: habitat_key,
                vaccinations: Vec::new(),
            },
        );
        self.animal(id)
    }

    /// `kind` is `VET` or `TRT`.
    pub fn add_worker(&mut self, id: &str, name: &str, kind: &str) -> DomainResult<&Worker> {
        if self.workers.contains(id) {
            return Err(DomainError::DuplicateWorker(id.to_string()));
        }
        let kind: WorkerKind = kind.parse()?;

        self.workers
            .put(id, Worker::new(Key::new(id), name.to_string(), kind));
        self.worker(id)
    }

    pub fn add_habitat(&mut self, id: &str, name: &str, area: u32) -> DomainResult<&Habitat> {
        if self.habitats.contains(id) {
            return Err(DomainError::DuplicateHabitat(id.to_string()));
        }

        self.habitats
            .put(id, Habitat::new(Key::new(id), name.to_string(), area));
        self.habitat(id)
    }

    /// `kind` is `CADUCA` (deciduous) or `PERENE` (evergreen). The tree is
    /// born in the current season.
    pub fn add_tree(
        &mut self,
        id: &str,
        name: &str,
        age: u32,
        cleaning_difficulty: u32,
        kind: &str,
    ) -> DomainResult<&Tree> {
        if self.trees.contains(id) {
            return Err(DomainError::DuplicateTree(id.to_string()));
        }
        let kind: TreeKind = kind.parse()?;

        self.trees.put(
            id,
            Tree {
                id: Key::new(id),
                name: name.to_string(),
                age,
                cleaning_difficulty,
                birth_season: self.season,
                kind,
            },
        );
        self.tree(id)
    }

    /// Registers a tree and plants it in `habitat_id`. The habitat is
    /// checked first, so nothing is registered when it is missing.
    pub fn add_tree_to_habitat(
        &mut self,
        habitat_id: &str,
        id: &str,
        name: &str,
        age: u32,
        cleaning_difficulty: u32,
        kind: &str,
    ) -> DomainResult<&Tree> {
        self.habitat(habitat_id)?;
        self.add_tree(id, name, age, cleaning_difficulty, kind)?;
        self.plant_tree(habitat_id, id)?;
        self.tree(id)
    }

    /// Attach an already registered tree to a habitat.
    pub fn plant_tree(&mut self, habitat_id: &str, tree_id: &str) -> DomainResult<()> {
        self.habitat(habitat_id)?;
        let tree_key = self.tree(tree_id)?.id.clone();

        if let Some(habitat) = self.habitats.get_mut(habitat_id) {
            habitat.trees.insert(tree_key);
        }
        Ok(())
    }

    /// `species_csv` is a comma-separated list of species ids; blank means
    /// the vaccine is safe for no species.
    pub fn add_vaccine(&mut self, id: &str, name: &str, species_csv: &str) -> DomainResult<&Vaccine> {
        if self.vaccines.contains(id) {
            return Err(DomainError::DuplicateVaccine(id.to_string()));
        }

        let mut covered = BTreeSet::new();
        if !species_csv.trim().is_empty() {
            for species_id in species_csv.split(',').map(str::trim) {
                covered.insert(self.species(species_id)?.id.clone());
            }
        }

        self.vaccines.put(
            id,
            Vaccine {
                id: Key::new(id),
                name: name.to_string(),
                applications: 0,
                species: covered,
            },
        );
        self.vaccine(id)
    }

    // ============================================================
    // Changes
    // ============================================================

    pub fn transfer_animal(&mut self, animal_id: &str, habitat_id: &str) -> DomainResult<()> {
        let animal = self.animal(animal_id)?;
        let (animal_key, species_key, old_habitat) =
            (animal.id.clone(), animal.species.clone(), animal.habitat.clone());
        let new_habitat = self.habitat(habitat_id)?.id.clone();

        if let Some(habitat) = self.habitats.get_mut(old_habitat.as_str()) {
            habitat.evict(&species_key, &animal_key);
        }
        if let Some(habitat) = self.habitats.get_mut(new_habitat.as_str()) {
            habitat.house(&species_key, &animal_key);
        }
        if let Some(animal) = self.animals.get_mut(animal_id) {
            animal.habitat = new_habitat;
        }
        Ok(())
    }

    /// Species (vet) or habitat (caretaker) responsibility. Adding one that
    /// is already held is a no-op.
    pub fn add_responsibility(&mut self, worker_id: &str, responsibility_id: &str) -> DomainResult<()> {
        let worker = self
            .workers
            .get_mut(worker_id)
            .ok_or_else(|| DomainError::WorkerNotFound(worker_id.to_string()))?;
        let not_found = || DomainError::ResponsibilityNotFound {
            worker: worker_id.to_string(),
            responsibility: responsibility_id.to_string(),
        };

        match &mut worker.role {
            WorkerRole::Vet(duties) => {
                let species = self
                    .species
                    .get_mut(responsibility_id)
                    .ok_or_else(not_found)?;
                species.vets.insert(worker.id.clone());
                duties.species.insert(species.id.clone());
            }
            WorkerRole::CareTaker(duties) => {
                let habitat = self
                    .habitats
                    .get_mut(responsibility_id)
                    .ok_or_else(not_found)?;
                habitat.caretakers.insert(worker.id.clone());
                duties.habitats.insert(habitat.id.clone());
            }
        }
        Ok(())
    }

    /// Fails with `ResponsibilityNotFound` when the worker does not hold it.
    pub fn remove_responsibility(
        &mut self,
        worker_id: &str,
        responsibility_id: &str,
    ) -> DomainResult<()> {
        let worker = self
            .workers
            .get_mut(worker_id)
            .ok_or_else(|| DomainError::WorkerNotFound(worker_id.to_string()))?;
        let responsibility = Key::new(responsibility_id);
        let not_held = || DomainError::ResponsibilityNotFound {
            worker: worker_id.to_string(),
            responsibility: responsibility_id.to_string(),
        };

        match &mut worker.role {
            WorkerRole::Vet(duties) => {
                if !duties.species.remove(&responsibility) {
                    return Err(not_held());
                }
                if let Some(species) = self.species.get_mut(responsibility_id) {
                    species.vets.remove(&worker.id);
                }
            }
            WorkerRole::CareTaker(duties) => {
                if !duties.habitats.remove(&responsibility) {
                    return Err(not_held());
                }
                if let Some(habitat) = self.habitats.get_mut(responsibility_id) {
                    habitat.caretakers.remove(&worker.id);
                }
            }
        }
        Ok(())
    }

    pub fn change_habitat_area(&mut self, habitat_id: &str, area: u32) -> DomainResult<()> {
        let habitat = self
            .habitats
            .get_mut(habitat_id)
            .ok_or_else(|| DomainError::HabitatNotFound(habitat_id.to_string()))?;
        habitat.area = area;
        Ok(())
    }

    /// A neutral influence clears any stored entry.
    pub fn change_habitat_suitability(
        &mut self,
        habitat_id: &str,
        species_id: &str,
        influence: Influence,
    ) -> DomainResult<()> {
        self.habitat(habitat_id)?;
        let species_key = self.species(species_id)?.id.clone();

        if let Some(habitat) = self.habitats.get_mut(habitat_id) {
            habitat.set_influence(&species_key, influence);
        }
        Ok(())
    }

    /// Vaccinate an animal, classify the outcome and register it with the
    /// animal, the vet and the hotel.
    ///
    /// A worker that is not a vet is reported as `WorkerNotFound`.
    pub fn vaccinate_animal(
        &mut self,
        animal_id: &str,
        vaccine_id: &str,
        vet_id: &str,
    ) -> DomainResult<&VaccineRecord> {
        let animal = self.animal(animal_id)?;
        let vaccine = self.vaccine(vaccine_id)?;
        let worker = self.worker(vet_id)?;
        let duties = worker
            .as_vet()
            .ok_or_else(|| DomainError::WorkerNotFound(vet_id.to_string()))?;
        if !duties.is_responsible_for(&animal.species) {
            return Err(DomainError::WorkerNotAuthorized {
                worker: worker.id.to_string(),
                species: animal.species.to_string(),
            });
        }

        let species = self.species(animal.species.as_str())?;
        let damage = vaccination::assess(vaccine, species, &self.species);
        let record = VaccineRecord {
            vaccine: vaccine.id.clone(),
            vet: worker.id.clone(),
            species: animal.species.clone(),
            animal: animal.id.clone(),
            damage,
        };
        let record_id = RecordId(self.vaccinations.len());

        if let Some(animal) = self.animals.get_mut(animal_id) {
            animal.vaccinations.push(record_id);
        }
        if let Some(WorkerRole::Vet(duties)) = self.workers.get_mut(vet_id).map(|w| &mut w.role) {
            duties.vaccinations.push(record_id);
        }
        if let Some(vaccine) = self.vaccines.get_mut(vaccine_id) {
            vaccine.applications += 1;
        }
        self.vaccinations.push(record);
        Ok(&self.vaccinations[record_id.index()])
    }

    /// Advance to the next season. Trees born in the new season grow a year.
    pub fn progress_season(&mut self) -> Season {
        self.season = self.season.next();
        let season = self.season;
        self.trees
            .values_mut()
            .filter(|tree| tree.birth_season == season)
            .for_each(Tree::grow);
        season
    }

    // ============================================================
    // Queries
    // ============================================================

    pub fn habitat_animals(&self, habitat_id: &str) -> DomainResult<Vec<&Animal>> {
        let habitat = self.habitat(habitat_id)?;
        let mut animals: Vec<&Animal> = habitat
            .animals()
            .filter_map(|id| self.animals.get(id.as_str()))
            .collect();
        animals.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(animals)
    }

    pub fn habitat_trees(&self, habitat_id: &str) -> DomainResult<Vec<&Tree>> {
        let habitat = self.habitat(habitat_id)?;
        Ok(habitat
            .trees()
            .filter_map(|id| self.trees.get(id.as_str()))
            .collect())
    }

    pub fn animal_vaccinations(&self, animal_id: &str) -> DomainResult<Vec<&VaccineRecord>> {
        let animal = self.animal(animal_id)?;
        Ok(self.resolve_records(animal.vaccinations()))
    }

    /// A worker that is not a vet is reported as `WorkerNotFound`.
    pub fn vet_vaccinations(&self, vet_id: &str) -> DomainResult<Vec<&VaccineRecord>> {
        let duties = self
            .worker(vet_id)?
            .as_vet()
            .ok_or_else(|| DomainError::WorkerNotFound(vet_id.to_string()))?;
        Ok(self.resolve_records(duties.vaccinations()))
    }

    pub fn wrong_vaccinations(&self) -> Vec<&VaccineRecord> {
        self.vaccinations
            .iter()
            .filter(|record| record.damage != VaccineDamage::Normal)
            .collect()
    }

    /// Workers holding strictly more than `count` responsibilities.
    pub fn workers_with_more_responsibilities_than(&self, count: usize) -> Vec<&Worker> {
        self.workers
            .values()
            .filter(|worker| worker.responsibility_count() > count)
            .collect()
    }

    fn resolve_records(&self, ids: &[RecordId]) -> Vec<&VaccineRecord> {
        ids.iter().filter_map(|id| self.record(*id)).collect()
    }
}
