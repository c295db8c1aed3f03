//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent integrity violations of the hotel graph.
/// Every variant carries the offending identifier(s) as typed by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("animal not found: {0}")]
    AnimalNotFound(String),

    #[error("species not found: {0}")]
    SpeciesNotFound(String),

    #[error("habitat not found: {0}")]
    HabitatNotFound(String),

    #[error("worker not found: {0}")]
    WorkerNotFound(String),

    #[error("tree not found: {0}")]
    TreeNotFound(String),

    #[error("vaccine not found: {0}")]
    VaccineNotFound(String),

    #[error("responsibility {responsibility} not found for worker {worker}")]
    ResponsibilityNotFound {
        worker: String,
        responsibility: String,
    },

    #[error("duplicate animal: {0}")]
    DuplicateAnimal(String),

    #[error("duplicate species: {0}")]
    DuplicateSpecies(String),

    #[error("duplicate habitat: {0}")]
    DuplicateHabitat(String),

    #[error("duplicate worker: {0}")]
    DuplicateWorker(String),

    #[error("duplicate tree: {0}")]
    DuplicateTree(String),

    #[error("duplicate vaccine: {0}")]
    DuplicateVaccine(String),

    #[error("unrecognized worker kind: {0}")]
    UnrecognizedWorkerKind(String),

    #[error("unrecognized tree kind: {0}")]
    UnrecognizedTreeKind(String),

    #[error("unrecognized influence: {0}")]
    UnrecognizedInfluence(String),

    #[error("worker {worker} is not responsible for species {species}")]
    WorkerNotAuthorized { worker: String, species: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
