//! Seasons and the per-tree-kind workload/foliage table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Hotel season. Cycles Spring → Summer → Fall → Winter → Spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn next(self) -> Season {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    /// Position in the cycle, Spring = 0.
    pub fn ordinal(self) -> u8 {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }

    pub fn seasonal_effort(self, kind: TreeKind) -> u32 {
        match (self, kind) {
            (Season::Spring, _) => 1,
            (Season::Summer, TreeKind::Deciduous) => 2,
            (Season::Summer, TreeKind::Evergreen) => 1,
            (Season::Fall, TreeKind::Deciduous) => 5,
            (Season::Fall, TreeKind::Evergreen) => 1,
            (Season::Winter, TreeKind::Deciduous) => 0,
            (Season::Winter, TreeKind::Evergreen) => 2,
        }
    }

    pub fn foliage(self, kind: TreeKind) -> Foliage {
        match (self, kind) {
            (Season::Spring, _) => Foliage::GeneratingLeaves,
            (Season::Summer, _) => Foliage::WithLeaves,
            (Season::Fall, TreeKind::Deciduous) => Foliage::FallingLeaves,
            (Season::Fall, TreeKind::Evergreen) => Foliage::WithLeaves,
            (Season::Winter, TreeKind::Deciduous) => Foliage::WithoutLeaves,
            (Season::Winter, TreeKind::Evergreen) => Foliage::FallingLeaves,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ordinal())
    }
}

/// Tree variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeKind {
    Evergreen,
    Deciduous,
}

impl TreeKind {
    /// Tag used by the import and display formats.
    pub fn tag(self) -> &'static str {
        match self {
            TreeKind::Evergreen => "PERENE",
            TreeKind::Deciduous => "CADUCA",
        }
    }
}

impl FromStr for TreeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PERENE" => Ok(TreeKind::Evergreen),
            "CADUCA" => Ok(TreeKind::Deciduous),
            other => Err(DomainError::UnrecognizedTreeKind(other.to_string())),
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Foliage state of a tree in a given season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Foliage {
    WithLeaves,
    WithoutLeaves,
    FallingLeaves,
    GeneratingLeaves,
}

impl Foliage {
    pub fn label(self) -> &'static str {
        match self {
            Foliage::WithLeaves => "COMFOLHAS",
            Foliage::WithoutLeaves => "SEMFOLHAS",
            Foliage::FallingLeaves => "LARGARFOLHAS",
            Foliage::GeneratingLeaves => "GERARFOLHAS",
        }
    }
}

impl fmt::Display for Foliage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
