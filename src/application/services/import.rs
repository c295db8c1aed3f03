//! Bulk import of pipe-delimited hotel records
//!
//! Each non-blank line is one record whose first field names its kind.
//! Records are replayed through the hotel's mutation API in file order,
//! so a record may only reference entities imported on earlier lines.
//! The first failure aborts the import; lines before it stay applied
//! unless [`ImportService::import_file_atomically`] is used.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{DomainResult, Hotel, WorkerKind};
use crate::infrastructure::traits::FileSystem;

/// Record kinds, keyed by their leading tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    Species,
    Animal,
    Tree,
    Habitat,
    CareTaker,
    Vet,
    Vaccine,
}

impl RecordKind {
    pub const ALL: [RecordKind; 7] = [
        RecordKind::Species,
        RecordKind::Animal,
        RecordKind::Tree,
        RecordKind::Habitat,
        RecordKind::CareTaker,
        RecordKind::Vet,
        RecordKind::Vaccine,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            RecordKind::Species => "ESPÉCIE",
            RecordKind::Animal => "ANIMAL",
            RecordKind::Tree => "ÁRVORE",
            RecordKind::Habitat => "HABITAT",
            RecordKind::CareTaker => "TRATADOR",
            RecordKind::Vet => "VETERINÁRIO",
            RecordKind::Vaccine => "VACINA",
        }
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| format!("unknown record type: {}", s))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Records applied by a successful import, per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    counts: BTreeMap<RecordKind, usize>,
}

impl ImportSummary {
    pub fn count(&self, kind: RecordKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    fn record(&mut self, kind: RecordKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }
}

/// Positional fields of one import line.
struct Fields<'a> {
    line: usize,
    parts: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            parts: text.split('|').collect(),
        }
    }

    fn tag(&self) -> &'a str {
        self.parts[0]
    }

    fn required(&self, index: usize, name: &str) -> ApplicationResult<&'a str> {
        self.parts
            .get(index)
            .copied()
            .ok_or_else(|| ApplicationError::entry(self.line, format!("missing field: {}", name)))
    }

    /// A trailing list field; absent and empty are the same.
    fn optional(&self, index: usize) -> Option<&'a str> {
        self.parts.get(index).copied().filter(|s| !s.is_empty())
    }

    fn number(&self, index: usize, name: &str) -> ApplicationResult<u32> {
        let raw = self.required(index, name)?;
        raw.trim().parse().map_err(|_| {
            ApplicationError::entry(self.line, format!("{} is not a non-negative integer: {}", name, raw))
        })
    }

    fn apply<T>(&self, result: DomainResult<T>) -> ApplicationResult<T> {
        result.map_err(|e| ApplicationError::entry(self.line, format!("invalid entry: {}", e)))
    }
}

/// Service replaying import files into a hotel.
pub struct ImportService {
    fs: Arc<dyn FileSystem>,
}

impl ImportService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Import a file into `hotel`. Not atomic: records before the failing
    /// line remain applied.
    #[instrument(skip(self, hotel))]
    pub fn import_file(&self, hotel: &mut Hotel, path: &Path) -> ApplicationResult<ImportSummary> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read import file", path)?;
        self.import_str(hotel, &content)
    }

    /// Import a file into a copy of `hotel` and keep the copy only when
    /// every record applied.
    #[instrument(skip(self, hotel))]
    pub fn import_file_atomically(
        &self,
        hotel: &mut Hotel,
        path: &Path,
    ) -> ApplicationResult<ImportSummary> {
        let mut staged = hotel.clone();
        let summary = self.import_file(&mut staged, path)?;
        *hotel = staged;
        debug!("import_file_atomically: committed {} records", summary.total());
        Ok(summary)
    }

    /// Replay `content` line by line.
    pub fn import_str(&self, hotel: &mut Hotel, content: &str) -> ApplicationResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (index, text) in content.lines().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            let fields = Fields::new(index + 1, text);
            let kind = self.apply_line(hotel, &fields)?;
            summary.record(kind);
        }

        debug!("import_str: applied {} records", summary.total());
        Ok(summary)
    }

    fn apply_line(&self, hotel: &mut Hotel, fields: &Fields<'_>) -> ApplicationResult<RecordKind> {
        let kind: RecordKind = fields
            .tag()
            .parse()
            .map_err(|message| ApplicationError::entry(fields.line, message))?;
        debug!("line {}: {}", fields.line, kind);

        match kind {
            RecordKind::Species => {
                let id = fields.required(1, "id")?;
                let name = fields.required(2, "name")?;
                fields.apply(hotel.add_species(id, name))?;
            }
            RecordKind::Animal => {
                let id = fields.required(1, "id")?;
                let name = fields.required(2, "name")?;
                let species = fields.required(3, "species")?;
                let habitat = fields.required(4, "habitat")?;
                fields.apply(hotel.add_animal(id, name, species, habitat))?;
            }
            RecordKind::Tree => {
                let id = fields.required(1, "id")?;
                let name = fields.required(2, "name")?;
                let age = fields.number(3, "age")?;
                let difficulty = fields.number(4, "cleaning difficulty")?;
                let tree_kind = fields.required(5, "tree kind")?;
                fields.apply(hotel.add_tree(id, name, age, difficulty, tree_kind))?;
            }
            RecordKind::Habitat => {
                let id = fields.required(1, "id")?;
                let name = fields.required(2, "name")?;
                let area = fields.number(3, "area")?;
                fields.apply(hotel.add_habitat(id, name, area))?;
                for tree in list(fields.optional(4)) {
                    fields.apply(hotel.plant_tree(id, tree))?;
                }
            }
            RecordKind::CareTaker | RecordKind::Vet => {
                let worker_kind = if kind == RecordKind::Vet {
                    WorkerKind::Vet
                } else {
                    WorkerKind::CareTaker
                };
                let id = fields.required(1, "id")?;
                let name = fields.required(2, "name")?;
                // the worker stays registered if a responsibility fails
                fields.apply(hotel.add_worker(id, name, worker_kind.tag()))?;
                for responsibility in list(fields.optional(3)) {
                    fields.apply(hotel.add_responsibility(id, responsibility))?;
                }
            }
            RecordKind::Vaccine => {
                let id = fields.required(1, "id")?;
                let name = fields.required(2, "name")?;
                let species = fields.optional(3).unwrap_or("");
                fields.apply(hotel.add_vaccine(id, name, species))?;
            }
        }
        Ok(kind)
    }
}

fn list(field: Option<&str>) -> impl Iterator<Item = &str> {
    field
        .into_iter()
        .flat_map(|ids| ids.split(','))
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::RealFileSystem;

    fn service() -> ImportService {
        ImportService::new(Arc::new(RealFileSystem))
    }

    #[test]
    fn test_record_kind_parses_accented_tags() {
        assert_eq!("ESPÉCIE".parse::<RecordKind>(), Ok(RecordKind::Species));
        assert_eq!("ÁRVORE".parse::<RecordKind>(), Ok(RecordKind::Tree));
        assert_eq!("VETERINÁRIO".parse::<RecordKind>(), Ok(RecordKind::Vet));
        assert!("ARVORE".parse::<RecordKind>().is_err());
    }

    #[test]
    fn test_missing_field_reports_line() {
        let mut hotel = Hotel::new();
        let err = service()
            .import_str(&mut hotel, "ESPÉCIE|S1|Leão\nANIMAL|A1|Simba")
            .unwrap_err();
        assert!(matches!(err, ApplicationError::UnrecognizedEntry { line: 2, .. }));
    }

    #[test]
    fn test_trailing_empty_list_is_no_list() {
        let mut hotel = Hotel::new();
        service()
            .import_str(&mut hotel, "VACINA|V1|Nada|\nTRATADOR|T1|Rui|")
            .unwrap();
        assert_eq!(hotel.vaccine("V1").unwrap().species().count(), 0);
        assert_eq!(hotel.worker("T1").unwrap().responsibility_count(), 0);
    }
}
