//! Damage classification for vaccines given to possibly uncovered species.

use std::collections::HashMap;

use super::entities::{Species, Vaccine, VaccineDamage};
use super::key::Directory;

/// Classify the outcome of giving `vaccine` to an animal of `species`.
///
/// Covered species are always `Normal`. Otherwise the worst name distance
/// to any covered species decides: 0 is `Confusion`, 1..=4 `Accident`,
/// anything above `Error`. A vaccine covering no species is `Error`.
pub fn assess(vaccine: &Vaccine, species: &Species, registry: &Directory<Species>) -> VaccineDamage {
    if vaccine.covers(&species.id) {
        return VaccineDamage::Normal;
    }

    let worst = vaccine
        .species()
        .filter_map(|covered| registry.get(covered.as_str()))
        .map(|covered| name_distance(&species.name, &covered.name))
        .max();

    match worst {
        Some(distance) => damage_for_distance(distance),
        None => VaccineDamage::Error,
    }
}

/// `max(len(a), len(b))` minus the size of the multiset intersection of
/// their characters.
pub fn name_distance(a: &str, b: &str) -> usize {
    let longest = a.chars().count().max(b.chars().count());
    longest - common_char_count(a, b)
}

/// Characters shared by `a` and `b`, each occurrence consumed at most once.
pub fn common_char_count(a: &str, b: &str) -> usize {
    let mut bag: HashMap<char, usize> = HashMap::new();
    for c in a.chars() {
        *bag.entry(c).or_default() += 1;
    }

    b.chars()
        .filter(|c| match bag.get_mut(c) {
            Some(left) if *left > 0 => {
                *left -= 1;
                true
            }
            _ => false,
        })
        .count()
}

pub fn damage_for_distance(distance: usize) -> VaccineDamage {
    match distance {
        0 => VaccineDamage::Confusion,
        1..=4 => VaccineDamage::Accident,
        _ => VaccineDamage::Error,
    }
}
