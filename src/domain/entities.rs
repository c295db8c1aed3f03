//! Domain entities: the records owned by the hotel.
//!
//! Cross-entity links are stored as [`Key`]s into the hotel's directories,
//! never as owned copies. The [`Hotel`](super::Hotel) keeps both sides of
//! every link in sync.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::key::Key;
use super::season::{Foliage, Season, TreeKind};

/// How a habitat suits a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Influence {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Influence {
    /// Satisfaction modifier.
    pub fn value(self) -> i64 {
        match self {
            Influence::Positive => 20,
            Influence::Neutral => 0,
            Influence::Negative => -20,
        }
    }
}

impl FromStr for Influence {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POS" => Ok(Influence::Positive),
            "NEU" => Ok(Influence::Neutral),
            "NEG" => Ok(Influence::Negative),
            other => Err(DomainError::UnrecognizedInfluence(other.to_string())),
        }
    }
}

/// Outcome of administering a vaccine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VaccineDamage {
    Normal,
    Confusion,
    Accident,
    Error,
}

impl VaccineDamage {
    pub fn label(self) -> &'static str {
        match self {
            VaccineDamage::Normal => "NORMAL",
            VaccineDamage::Confusion => "CONFUSÃO",
            VaccineDamage::Accident => "ACIDENTE",
            VaccineDamage::Error => "ERRO",
        }
    }
}

impl fmt::Display for VaccineDamage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: Key,
    pub name: String,
    pub(crate) animals: BTreeSet<Key>,
    pub(crate) vets: BTreeSet<Key>,
}

impl Species {
    pub(crate) fn new(id: Key, name: String) -> Self {
        Self {
            id,
            name,
            animals: BTreeSet::new(),
            vets: BTreeSet::new(),
        }
    }

    pub fn animals(&self) -> impl Iterator<Item = &Key> {
        self.animals.iter()
    }

    pub fn vets(&self) -> impl Iterator<Item = &Key> {
        self.vets.iter()
    }

    pub fn animal_count(&self) -> usize {
        self.animals.len()
    }

    pub fn vet_count(&self) -> usize {
        self.vets.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habitat {
    pub id: Key,
    pub name: String,
    pub area: u32,
    /// Housed animals, bucketed by species. Empty buckets are pruned.
    pub(crate) animals: BTreeMap<Key, Vec<Key>>,
    /// Non-neutral influences only.
    pub(crate) influences: BTreeMap<Key, Influence>,
    pub(crate) caretakers: BTreeSet<Key>,
    pub(crate) trees: BTreeSet<Key>,
}

impl Habitat {
    pub(crate) fn new(id: Key, name: String, area: u32) -> Self {
        Self {
            id,
            name,
            area,
            animals: BTreeMap::new(),
            influences: BTreeMap::new(),
            caretakers: BTreeSet::new(),
            trees: BTreeSet::new(),
        }
    }

    /// Animal ids across all species buckets.
    pub fn animals(&self) -> impl Iterator<Item = &Key> {
        self.animals.values().flatten()
    }

    /// Animals of one species housed here.
    pub fn animals_of(&self, species: &Key) -> &[Key] {
        self.animals.get(species).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_species_bucket(&self, species: &Key) -> bool {
        self.animals.contains_key(species)
    }

    pub fn population(&self) -> usize {
        self.animals.values().map(Vec::len).sum()
    }

    pub fn same_species_count(&self, species: &Key) -> usize {
        self.animals_of(species).len()
    }

    pub fn influence(&self, species: &Key) -> Influence {
        self.influences.get(species).copied().unwrap_or_default()
    }

    pub fn caretakers(&self) -> impl Iterator<Item = &Key> {
        self.caretakers.iter()
    }

    pub fn caretaker_count(&self) -> usize {
        self.caretakers.len()
    }

    pub fn trees(&self) -> impl Iterator<Item = &Key> {
        self.trees.iter()
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub(crate) fn house(&mut self, species: &Key, animal: &Key) {
        self.animals
            .entry(species.clone())
            .or_default()
            .push(animal.clone());
    }

    pub(crate) fn evict(&mut self, species: &Key, animal: &Key) {
        if let Some(bucket) = self.animals.get_mut(species) {
            bucket.retain(|id| id != animal);
            if bucket.is_empty() {
                self.animals.remove(species);
            }
        }
    }

    pub(crate) fn set_influence(&mut self, species: &Key, influence: Influence) {
        if influence == Influence::Neutral {
            self.influences.remove(species);
        } else {
            self.influences.insert(species.clone(), influence);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: Key,
    pub name: String,
    pub species: Key,
    pub habitat: Key,
    pub(crate) vaccinations: Vec<RecordId>,
}

impl Animal {
    pub fn vaccinations(&self) -> &[RecordId] {
        &self.vaccinations
    }
}

/// Worker variant as named in the import/display formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerKind {
    Vet,
    CareTaker,
}

impl WorkerKind {
    pub fn tag(self) -> &'static str {
        match self {
            WorkerKind::Vet => "VET",
            WorkerKind::CareTaker => "TRT",
        }
    }
}

impl FromStr for WorkerKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VET" => Ok(WorkerKind::Vet),
            "TRT" => Ok(WorkerKind::CareTaker),
            other => Err(DomainError::UnrecognizedWorkerKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: Key,
    pub name: String,
    pub role: WorkerRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerRole {
    Vet(VetDuties),
    CareTaker(CareTakerDuties),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VetDuties {
    pub(crate) species: BTreeSet<Key>,
    pub(crate) vaccinations: Vec<RecordId>,
}

impl VetDuties {
    pub fn species(&self) -> impl Iterator<Item = &Key> {
        self.species.iter()
    }

    pub fn is_responsible_for(&self, species: &Key) -> bool {
        self.species.contains(species)
    }

    pub fn vaccinations(&self) -> &[RecordId] {
        &self.vaccinations
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareTakerDuties {
    pub(crate) habitats: BTreeSet<Key>,
}

impl CareTakerDuties {
    pub fn habitats(&self) -> impl Iterator<Item = &Key> {
        self.habitats.iter()
    }
}

impl Worker {
    pub(crate) fn new(id: Key, name: String, kind: WorkerKind) -> Self {
        let role = match kind {
            WorkerKind::Vet => WorkerRole::Vet(VetDuties::default()),
            WorkerKind::CareTaker => WorkerRole::CareTaker(CareTakerDuties::default()),
        };
        Self { id, name, role }
    }

    pub fn kind(&self) -> WorkerKind {
        match self.role {
            WorkerRole::Vet(_) => WorkerKind::Vet,
            WorkerRole::CareTaker(_) => WorkerKind::CareTaker,
        }
    }

    pub fn as_vet(&self) -> Option<&VetDuties> {
        match &self.role {
            WorkerRole::Vet(duties) => Some(duties),
            WorkerRole::CareTaker(_) => None,
        }
    }

    /// Species (vet) or habitat (caretaker) ids this worker answers for.
    pub fn responsibilities(&self) -> impl Iterator<Item = &Key> {
        match &self.role {
            WorkerRole::Vet(duties) => duties.species.iter(),
            WorkerRole::CareTaker(duties) => duties.habitats.iter(),
        }
    }

    pub fn responsibility_count(&self) -> usize {
        match &self.role {
            WorkerRole::Vet(duties) => duties.species.len(),
            WorkerRole::CareTaker(duties) => duties.habitats.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub id: Key,
    pub name: String,
    pub age: u32,
    pub cleaning_difficulty: u32,
    /// Season the tree was registered in; it ages on every return to it.
    pub birth_season: Season,
    pub kind: TreeKind,
}

impl Tree {
    pub fn seasonal_effort(&self, season: Season) -> u32 {
        season.seasonal_effort(self.kind)
    }

    pub fn foliage(&self, season: Season) -> Foliage {
        season.foliage(self.kind)
    }

    /// `difficulty * seasonal_effort * ln(age + 1)`
    pub fn total_cleaning_effort(&self, season: Season) -> f64 {
        f64::from(self.cleaning_difficulty)
            * f64::from(self.seasonal_effort(season))
            * (f64::from(self.age) + 1.0).ln()
    }

    pub(crate) fn grow(&mut self) {
        self.age += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccine {
    pub id: Key,
    pub name: String,
    pub applications: u32,
    pub(crate) species: BTreeSet<Key>,
}

impl Vaccine {
    /// Species the vaccine is formulated for.
    pub fn species(&self) -> impl Iterator<Item = &Key> {
        self.species.iter()
    }

    pub fn covers(&self, species: &Key) -> bool {
        self.species.contains(species)
    }
}

/// Position of a record in the hotel-wide vaccination registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub(crate) usize);

impl RecordId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One vaccination event. Never mutated once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccineRecord {
    pub vaccine: Key,
    pub vet: Key,
    /// Species of the animal at vaccination time.
    pub species: Key,
    pub animal: Key,
    pub damage: VaccineDamage,
}
