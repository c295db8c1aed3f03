//! Domain layer: the hotel entity graph and its derived computations
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod hotel;
pub mod key;
pub mod render;
pub mod satisfaction;
pub mod season;
pub mod vaccination;

pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use hotel::Hotel;
pub use key::{Directory, Key};
pub use satisfaction::SatisfactionEngine;
pub use season::{Foliage, Season, TreeKind};
