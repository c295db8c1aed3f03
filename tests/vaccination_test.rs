//! Integration tests for vaccinating animals and classifying the damage.

use rstest::{fixture, rstest};

use hva::domain::{DomainError, Hotel, VaccineDamage};

/// Vet V1 answers for every species; C1 is a caretaker.
///
/// Species names are chosen for their character bags:
/// `amor`/`roma` are anagrams, `Leão`/`Leoa` differ by one character,
/// `Pinguim` shares nothing with `Leão`.
#[fixture]
fn hotel() -> Hotel {
    let mut hotel = Hotel::new();
    hotel.add_habitat("H1", "Savana", 100).unwrap();
    for (id, name) in [
        ("S1", "Leão"),
        ("S2", "Leoa"),
        ("S3", "Pinguim"),
        ("S4", "amor"),
        ("S5", "roma"),
    ] {
        hotel.add_species(id, name).unwrap();
        hotel.add_animal(&format!("A{}", &id[1..]), name, id, "H1").unwrap();
    }
    hotel.add_worker("V1", "Rita", "VET").unwrap();
    hotel.add_worker("V2", "Ana", "VET").unwrap();
    hotel.add_worker("C1", "Rui", "TRT").unwrap();
    for species in ["S1", "S2", "S3", "S4", "S5"] {
        hotel.add_responsibility("V1", species).unwrap();
    }
    hotel.add_vaccine("VAC1", "Rabies", "S1").unwrap();
    hotel.add_vaccine("VAC2", "Amorina", "S4").unwrap();
    hotel.add_vaccine("VAC3", "Placebo", "").unwrap();
    hotel
}

#[rstest]
#[case("A1", "VAC1", VaccineDamage::Normal)]
#[case("A4", "VAC2", VaccineDamage::Normal)]
#[case("A5", "VAC2", VaccineDamage::Confusion)]
#[case("A2", "VAC1", VaccineDamage::Accident)]
#[case("A3", "VAC1", VaccineDamage::Error)]
#[case("A1", "VAC3", VaccineDamage::Error)]
fn given_vaccine_and_animal_when_vaccinating_then_damage_is_classified(
    mut hotel: Hotel,
    #[case] animal: &str,
    #[case] vaccine: &str,
    #[case] expected: VaccineDamage,
) {
    // Act
    let record = hotel.vaccinate_animal(animal, vaccine, "V1").unwrap();

    // Assert
    assert_eq!(record.damage, expected);
}

#[rstest]
fn given_successful_vaccination_when_inspecting_then_registered_everywhere(mut hotel: Hotel) {
    // Act
    hotel.vaccinate_animal("a2", "vac1", "v1").unwrap();

    // Assert
    let record = &hotel.vaccinations()[0];
    assert_eq!(record.vaccine.as_str(), "VAC1");
    assert_eq!(record.vet.as_str(), "V1");
    assert_eq!(record.species.as_str(), "S2");
    assert_eq!(record.animal.as_str(), "A2");
    assert_eq!(hotel.animal_vaccinations("A2").unwrap(), vec![record]);
    assert_eq!(hotel.vet_vaccinations("V1").unwrap(), vec![record]);
    assert_eq!(hotel.vaccine("VAC1").unwrap().applications, 1);
    assert_eq!(record.to_string(), "REGISTO-VACINA|VAC1|V1|S2");
}

#[rstest]
fn given_several_outcomes_when_describing_animal_then_health_lists_labels(mut hotel: Hotel) {
    // Arrange
    hotel.vaccinate_animal("A2", "VAC1", "V1").unwrap();
    hotel.vaccinate_animal("A2", "VAC3", "V1").unwrap();

    // Act
    let line = hotel.describe_animal(hotel.animal("A2").unwrap());

    // Assert
    assert_eq!(line, "ANIMAL|A2|Leoa|S2|ACIDENTE,ERRO|H1");
}

#[rstest]
fn given_mixed_outcomes_when_listing_wrong_vaccinations_then_normal_excluded(mut hotel: Hotel) {
    // Arrange
    hotel.vaccinate_animal("A1", "VAC1", "V1").unwrap();
    hotel.vaccinate_animal("A5", "VAC2", "V1").unwrap();
    hotel.vaccinate_animal("A4", "VAC2", "V1").unwrap();
    hotel.vaccinate_animal("A3", "VAC1", "V1").unwrap();

    // Act
    let wrong: Vec<(&str, VaccineDamage)> = hotel
        .wrong_vaccinations()
        .into_iter()
        .map(|r| (r.animal.as_str(), r.damage))
        .collect();

    // Assert
    assert_eq!(
        wrong,
        vec![("A5", VaccineDamage::Confusion), ("A3", VaccineDamage::Error)]
    );
    assert_eq!(hotel.vaccinations().len(), 4);
}

#[rstest]
fn given_vet_without_species_when_vaccinating_then_not_authorized(mut hotel: Hotel) {
    // Arrange
    let before = hotel.clone();

    // Act
    let result = hotel.vaccinate_animal("A1", "VAC1", "V2");

    // Assert
    assert_eq!(
        result.unwrap_err(),
        DomainError::WorkerNotAuthorized {
            worker: "V2".into(),
            species: "S1".into(),
        }
    );
    assert_eq!(hotel, before);
}

#[rstest]
#[case("A9", "VAC1", "V1", DomainError::AnimalNotFound("A9".into()))]
#[case("A1", "VAC9", "V1", DomainError::VaccineNotFound("VAC9".into()))]
#[case("A1", "VAC1", "V9", DomainError::WorkerNotFound("V9".into()))]
#[case("A1", "VAC1", "C1", DomainError::WorkerNotFound("C1".into()))]
fn given_bad_reference_when_vaccinating_then_not_found(
    mut hotel: Hotel,
    #[case] animal: &str,
    #[case] vaccine: &str,
    #[case] vet: &str,
    #[case] expected: DomainError,
) {
    // Act
    let result = hotel.vaccinate_animal(animal, vaccine, vet);

    // Assert
    assert_eq!(result.unwrap_err(), expected);
    assert!(hotel.vaccinations().is_empty());
}

#[rstest]
fn given_caretaker_when_listing_vet_acts_then_worker_not_found(hotel: Hotel) {
    // Act
    let result = hotel.vet_vaccinations("C1");

    // Assert
    assert_eq!(result.unwrap_err(), DomainError::WorkerNotFound("C1".into()));
}

#[rstest]
fn given_covered_species_when_any_authorized_vet_vaccinates_then_normal(mut hotel: Hotel) {
    // Arrange
    hotel.add_responsibility("V2", "S1").unwrap();

    // Act
    let by_v1 = hotel.vaccinate_animal("A1", "VAC1", "V1").unwrap().damage;
    let by_v2 = hotel.vaccinate_animal("A1", "VAC1", "V2").unwrap().damage;

    // Assert
    assert_eq!(by_v1, VaccineDamage::Normal);
    assert_eq!(by_v2, VaccineDamage::Normal);
    assert_eq!(hotel.vaccine("VAC1").unwrap().applications, 2);
}
