//! Pipe-delimited display lines consumed by the presentation layer.

use std::fmt;

use itertools::Itertools;

use super::entities::{Animal, Habitat, Tree, Vaccine, VaccineRecord, Worker};
use super::hotel::Hotel;
use super::key::Key;

/// `|id1,id2,...` in sorted id order, or nothing when empty.
fn id_clause<'a>(ids: impl Iterator<Item = &'a Key>) -> String {
    let joined = ids.map(Key::as_str).sorted().join(",");
    if joined.is_empty() {
        joined
    } else {
        format!("|{}", joined)
    }
}

impl fmt::Display for Habitat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HABITAT|{}|{}|{}|{}",
            self.id,
            self.name,
            self.area,
            self.tree_count()
        )
    }
}

impl fmt::Display for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}{}",
            self.kind().tag(),
            self.id,
            self.name,
            id_clause(self.responsibilities())
        )
    }
}

impl fmt::Display for Vaccine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VACINA|{}|{}|{}{}",
            self.id,
            self.name,
            self.applications,
            id_clause(self.species())
        )
    }
}

impl fmt::Display for VaccineRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REGISTO-VACINA|{}|{}|{}", self.vaccine, self.vet, self.species)
    }
}

impl Hotel {
    /// `ANIMAL|id|name|species|health|habitat`, health being the damage
    /// labels of its vaccinations or `VOID`.
    pub fn describe_animal(&self, animal: &Animal) -> String {
        let health = animal
            .vaccinations()
            .iter()
            .filter_map(|id| self.record(*id))
            .map(|record| record.damage.label())
            .join(",");
        let health = if health.is_empty() { "VOID".to_string() } else { health };

        format!(
            "ANIMAL|{}|{}|{}|{}|{}",
            animal.id, animal.name, animal.species, health, animal.habitat
        )
    }

    /// `ARVORE|id|name|age|difficulty|kind|foliage` in the current season.
    pub fn describe_tree(&self, tree: &Tree) -> String {
        format!(
            "ARVORE|{}|{}|{}|{}|{}|{}",
            tree.id,
            tree.name,
            tree.age,
            tree.cleaning_difficulty,
            tree.kind,
            tree.foliage(self.season())
        )
    }
}
