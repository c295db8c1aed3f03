//! Zoo hotel core: an entity graph of species, habitats, animals, workers,
//! trees and vaccines, with seasonal tree care, satisfaction scores, a
//! vaccination damage heuristic and a bulk importer.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
