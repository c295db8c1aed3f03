//! Satisfaction scores, recomputed from the graph on every call.
//!
//! Worker formulas are plain functions so a caller can swap them per
//! evaluation; [`SatisfactionEngine::default`] carries the standard ones.

use super::entities::{Animal, CareTakerDuties, VetDuties, Worker, WorkerRole};
use super::error::DomainResult;
use super::hotel::Hotel;

pub type VetFormula = fn(&VetDuties, &Hotel) -> f64;
pub type CareTakerFormula = fn(&CareTakerDuties, &Hotel) -> f64;

#[derive(Clone, Copy)]
pub struct SatisfactionEngine {
    pub vet: VetFormula,
    pub caretaker: CareTakerFormula,
}

impl Default for SatisfactionEngine {
    fn default() -> Self {
        Self {
            vet: vet_satisfaction,
            caretaker: caretaker_satisfaction,
        }
    }
}

impl SatisfactionEngine {
    pub fn animal(&self, animal: &Animal, hotel: &Hotel) -> f64 {
        animal_satisfaction(animal, hotel)
    }

    pub fn worker(&self, worker: &Worker, hotel: &Hotel) -> f64 {
        match &worker.role {
            WorkerRole::Vet(duties) => (self.vet)(duties, hotel),
            WorkerRole::CareTaker(duties) => (self.caretaker)(duties, hotel),
        }
    }

    /// Sum over every animal and every worker.
    pub fn hotel(&self, hotel: &Hotel) -> f64 {
        let animals: f64 = hotel.animals().map(|a| self.animal(a, hotel)).sum();
        let workers: f64 = hotel.workers().map(|w| self.worker(w, hotel)).sum();
        animals + workers
    }
}

/// `20 + 3*same - 2*(population - same) + area/population + influence`
///
/// Integer arithmetic throughout. The animal itself counts towards the
/// population, so the division is always defined for a housed animal.
pub fn animal_satisfaction(animal: &Animal, hotel: &Hotel) -> f64 {
    let Ok(habitat) = hotel.habitat(animal.habitat.as_str()) else {
        return 0.0;
    };
    let same = habitat.same_species_count(&animal.species) as i64;
    let population = habitat.population() as i64;
    let per_capita_area = i64::from(habitat.area)
        .checked_div(population)
        .unwrap_or(0);

    (20 + 3 * same - 2 * (population - same) + per_capita_area
        + habitat.influence(&animal.species).value()) as f64
}

/// `20 - Σ(animals_of_species / vets_of_species)` with truncating division.
///
/// A species without vets contributes nothing rather than dividing by zero.
pub fn vet_satisfaction(duties: &VetDuties, hotel: &Hotel) -> f64 {
    let load: usize = duties
        .species()
        .filter_map(|id| hotel.species(id.as_str()).ok())
        .map(|species| {
            species
                .animal_count()
                .checked_div(species.vet_count())
                .unwrap_or(0)
        })
        .sum();

    20.0 - load as f64
}

/// `300 - Σ(work_in_habitat / caretakers_of_habitat)` where
/// `work_in_habitat = area + 3*population + Σ trunc(tree cleaning effort)`.
pub fn caretaker_satisfaction(duties: &CareTakerDuties, hotel: &Hotel) -> f64 {
    let season = hotel.season();
    let load: i64 = duties
        .habitats()
        .filter_map(|id| hotel.habitat(id.as_str()).ok())
        .map(|habitat| {
            let cleaning: i64 = habitat
                .trees()
                .filter_map(|id| hotel.tree(id.as_str()).ok())
                .map(|tree| tree.total_cleaning_effort(season) as i64)
                .sum();
            let work =
                i64::from(habitat.area) + 3 * habitat.population() as i64 + cleaning;
            work.checked_div(habitat.caretaker_count() as i64)
                .unwrap_or(0)
        })
        .sum();

    300.0 - load as f64
}

impl Hotel {
    pub fn animal_satisfaction(&self, animal_id: &str) -> DomainResult<f64> {
        let animal = self.animal(animal_id)?;
        Ok(SatisfactionEngine::default().animal(animal, self))
    }

    pub fn worker_satisfaction(&self, worker_id: &str) -> DomainResult<f64> {
        self.worker_satisfaction_with(&SatisfactionEngine::default(), worker_id)
    }

    pub fn worker_satisfaction_with(
        &self,
        engine: &SatisfactionEngine,
        worker_id: &str,
    ) -> DomainResult<f64> {
        let worker = self.worker(worker_id)?;
        Ok(engine.worker(worker, self))
    }

    /// Aggregate satisfaction of animals and workers.
    pub fn satisfaction(&self) -> f64 {
        SatisfactionEngine::default().hotel(self)
    }

    pub fn satisfaction_with(&self, engine: &SatisfactionEngine) -> f64 {
        engine.hotel(self)
    }

    /// Highest-scoring animal; ties go to the lowest id.
    pub fn most_satisfied_animal(&self) -> Option<&Animal> {
        let engine = SatisfactionEngine::default();
        self.animals().fold(None, |best: Option<(&Animal, f64)>, animal| {
            let score = engine.animal(animal, self);
            match best {
                Some((_, top)) if top >= score => best,
                _ => Some((animal, score)),
            }
        })
        .map(|(animal, _)| animal)
    }
}
