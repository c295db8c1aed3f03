//! Integration tests for changes and queries on a populated hotel:
//! transfers, responsibilities, habitat changes, seasons and listings.

use rstest::{fixture, rstest};

use hva::domain::{DomainError, Foliage, Hotel, Influence, Key, Season, WorkerKind};

#[fixture]
fn hotel() -> Hotel {
    let mut hotel = Hotel::new();
    hotel.add_species("S1", "Leão").unwrap();
    hotel.add_species("S2", "Pinguim").unwrap();
    hotel.add_habitat("H1", "Savana", 100).unwrap();
    hotel.add_habitat("H2", "Gelo", 20).unwrap();
    hotel.add_animal("A1", "Simba", "S1", "H1").unwrap();
    hotel.add_animal("A2", "Nala", "S1", "H1").unwrap();
    hotel.add_animal("A3", "Pingu", "S2", "H1").unwrap();
    hotel.add_worker("V1", "Rita", "VET").unwrap();
    hotel.add_worker("C1", "Rui", "TRT").unwrap();
    hotel
}

// ============================================================
// Transfers
// ============================================================

#[rstest]
fn given_animal_in_h1_when_transferred_then_moves_between_habitats(mut hotel: Hotel) {
    // Act
    hotel.transfer_animal("A1", "H2").unwrap();

    // Assert
    let h1 = hotel.habitat("H1").unwrap();
    let h2 = hotel.habitat("H2").unwrap();
    let a1 = Key::new("A1");
    assert!(!h1.animals().any(|id| *id == a1));
    assert!(h2.animals().any(|id| *id == a1));
    assert_eq!(hotel.animal("A1").unwrap().habitat.as_str(), "H2");
    assert!(h1.has_species_bucket(&Key::new("S1")), "A2 still houses S1 in H1");
}

#[rstest]
fn given_last_of_species_when_transferred_then_bucket_is_pruned(mut hotel: Hotel) {
    // Act
    hotel.transfer_animal("A3", "H2").unwrap();

    // Assert
    let s2 = Key::new("S2");
    assert!(!hotel.habitat("H1").unwrap().has_species_bucket(&s2));
    assert_eq!(hotel.habitat("H2").unwrap().animals_of(&s2).len(), 1);
    assert_eq!(hotel.habitat("H1").unwrap().population(), 2);
}

#[rstest]
#[case("A9", "H2", DomainError::AnimalNotFound("A9".into()))]
#[case("A1", "H9", DomainError::HabitatNotFound("H9".into()))]
fn given_unknown_id_when_transferring_then_not_found_and_unchanged(
    mut hotel: Hotel,
    #[case] animal: &str,
    #[case] habitat: &str,
    #[case] expected: DomainError,
) {
    // Arrange
    let before = hotel.clone();

    // Act
    let result = hotel.transfer_animal(animal, habitat);

    // Assert
    assert_eq!(result.unwrap_err(), expected);
    assert_eq!(hotel, before);
}

// ============================================================
// Responsibilities
// ============================================================

#[rstest]
fn given_vet_when_adding_species_responsibility_then_both_sides_link(mut hotel: Hotel) {
    // Act
    hotel.add_responsibility("v1", "s1").unwrap();

    // Assert
    let vet = hotel.worker("V1").unwrap();
    assert_eq!(vet.kind(), WorkerKind::Vet);
    assert!(vet.as_vet().unwrap().is_responsible_for(&Key::new("S1")));
    assert_eq!(hotel.species("S1").unwrap().vet_count(), 1);
}

#[rstest]
fn given_caretaker_when_adding_habitat_responsibility_then_both_sides_link(mut hotel: Hotel) {
    // Act
    hotel.add_responsibility("C1", "H1").unwrap();

    // Assert
    assert_eq!(hotel.worker("C1").unwrap().responsibility_count(), 1);
    assert_eq!(hotel.habitat("H1").unwrap().caretaker_count(), 1);
}

#[rstest]
#[case("V1", "H1")]
#[case("C1", "S1")]
#[case("V1", "S9")]
fn given_responsibility_of_wrong_kind_when_adding_then_responsibility_not_found(
    mut hotel: Hotel,
    #[case] worker: &str,
    #[case] responsibility: &str,
) {
    // Act
    let result = hotel.add_responsibility(worker, responsibility);

    // Assert
    assert_eq!(
        result.unwrap_err(),
        DomainError::ResponsibilityNotFound {
            worker: worker.to_string(),
            responsibility: responsibility.to_string(),
        }
    );
}

#[rstest]
fn given_unknown_worker_when_adding_responsibility_then_worker_not_found(mut hotel: Hotel) {
    // Act
    let result = hotel.add_responsibility("W9", "S1");

    // Assert
    assert_eq!(result.unwrap_err(), DomainError::WorkerNotFound("W9".into()));
}

#[rstest]
fn given_species_not_held_when_removing_then_fails_and_set_unchanged(mut hotel: Hotel) {
    // Arrange
    hotel.add_responsibility("V1", "S1").unwrap();

    // Act
    let result = hotel.remove_responsibility("V1", "S2");

    // Assert
    assert!(matches!(
        result,
        Err(DomainError::ResponsibilityNotFound { .. })
    ));
    let held: Vec<&str> = hotel
        .worker("V1")
        .unwrap()
        .responsibilities()
        .map(Key::as_str)
        .collect();
    assert_eq!(held, vec!["S1"]);
}

#[rstest]
fn given_held_responsibility_when_removing_then_both_sides_unlink(mut hotel: Hotel) {
    // Arrange
    hotel.add_responsibility("C1", "H1").unwrap();
    hotel.add_responsibility("V1", "S1").unwrap();

    // Act
    hotel.remove_responsibility("c1", "h1").unwrap();
    hotel.remove_responsibility("V1", "S1").unwrap();

    // Assert
    assert_eq!(hotel.worker("C1").unwrap().responsibility_count(), 0);
    assert_eq!(hotel.habitat("H1").unwrap().caretaker_count(), 0);
    assert_eq!(hotel.species("S1").unwrap().vet_count(), 0);
}

#[rstest]
fn given_workers_when_filtering_by_responsibility_count_then_strictly_greater(mut hotel: Hotel) {
    // Arrange
    hotel.add_responsibility("V1", "S1").unwrap();
    hotel.add_responsibility("V1", "S2").unwrap();
    hotel.add_responsibility("C1", "H1").unwrap();

    // Act
    let busy: Vec<&str> = hotel
        .workers_with_more_responsibilities_than(1)
        .into_iter()
        .map(|w| w.id.as_str())
        .collect();

    // Assert
    assert_eq!(busy, vec!["V1"]);
    assert_eq!(hotel.workers_with_more_responsibilities_than(0).len(), 2);
    assert!(hotel.workers_with_more_responsibilities_than(2).is_empty());
}

// ============================================================
// Habitat changes
// ============================================================

#[rstest]
fn given_habitat_when_changing_area_then_area_is_updated(mut hotel: Hotel) {
    // Act
    hotel.change_habitat_area("H2", 35).unwrap();

    // Assert
    assert_eq!(hotel.habitat("H2").unwrap().area, 35);
}

#[rstest]
fn given_positive_influence_when_reset_to_neutral_then_lookup_defaults(mut hotel: Hotel) {
    // Arrange
    let s1 = Key::new("S1");
    hotel
        .change_habitat_suitability("H1", "S1", Influence::Positive)
        .unwrap();
    assert_eq!(hotel.habitat("H1").unwrap().influence(&s1), Influence::Positive);

    // Act
    hotel
        .change_habitat_suitability("H1", "s1", Influence::Neutral)
        .unwrap();

    // Assert
    assert_eq!(hotel.habitat("H1").unwrap().influence(&s1), Influence::Neutral);
}

#[rstest]
fn given_unknown_species_when_changing_suitability_then_species_not_found(mut hotel: Hotel) {
    // Act
    let result = hotel.change_habitat_suitability("H1", "S9", Influence::Negative);

    // Assert
    assert_eq!(result.unwrap_err(), DomainError::SpeciesNotFound("S9".into()));
}

#[rstest]
fn given_registered_tree_when_planting_then_habitat_lists_it(mut hotel: Hotel) {
    // Arrange
    hotel.add_tree("T1", "Carvalho", 5, 2, "CADUCA").unwrap();

    // Act
    hotel.plant_tree("H2", "t1").unwrap();

    // Assert
    assert_eq!(hotel.habitat("H2").unwrap().tree_count(), 1);
    assert_eq!(
        hotel.plant_tree("H2", "T9").unwrap_err(),
        DomainError::TreeNotFound("T9".into())
    );
}

// ============================================================
// Seasons
// ============================================================

#[rstest]
fn given_new_hotel_when_progressing_four_times_then_back_to_spring(mut hotel: Hotel) {
    // Arrange
    assert_eq!(hotel.season(), Season::Spring);

    // Act
    let seen: Vec<Season> = (0..4).map(|_| hotel.progress_season()).collect();

    // Assert
    assert_eq!(
        seen,
        vec![Season::Summer, Season::Fall, Season::Winter, Season::Spring]
    );
}

#[rstest]
fn given_trees_born_in_different_seasons_when_cycling_then_each_ages_once(mut hotel: Hotel) {
    // Arrange
    hotel.add_tree("T1", "Carvalho", 5, 2, "CADUCA").unwrap();
    hotel.progress_season();
    hotel.add_tree("T2", "Pinheiro", 3, 1, "PERENE").unwrap();

    // Act: T1 was born in spring, T2 in summer
    hotel.progress_season(); // fall
    hotel.progress_season(); // winter
    let before_anniversary = hotel.tree("T1").unwrap().age;
    hotel.progress_season(); // spring

    // Assert
    assert_eq!(before_anniversary, 5);
    assert_eq!(hotel.tree("T1").unwrap().age, 6);
    assert_eq!(hotel.tree("T2").unwrap().age, 3);

    hotel.progress_season(); // summer
    assert_eq!(hotel.tree("T2").unwrap().age, 4);
    assert_eq!(hotel.tree("T1").unwrap().age, 6);
}

#[rstest]
#[case(1, Foliage::WithLeaves, Foliage::WithLeaves)]
#[case(2, Foliage::FallingLeaves, Foliage::WithLeaves)]
#[case(3, Foliage::WithoutLeaves, Foliage::FallingLeaves)]
fn given_season_steps_when_reading_foliage_then_follows_table(
    mut hotel: Hotel,
    #[case] steps: usize,
    #[case] deciduous: Foliage,
    #[case] evergreen: Foliage,
) {
    // Arrange
    hotel.add_tree("T1", "Carvalho", 5, 2, "CADUCA").unwrap();
    hotel.add_tree("T2", "Pinheiro", 3, 1, "PERENE").unwrap();

    // Act
    (0..steps).for_each(|_| {
        hotel.progress_season();
    });

    // Assert
    let season = hotel.season();
    assert_eq!(hotel.tree("T1").unwrap().foliage(season), deciduous);
    assert_eq!(hotel.tree("T2").unwrap().foliage(season), evergreen);
}

// ============================================================
// Listings
// ============================================================

#[rstest]
fn given_habitat_when_listing_animals_then_sorted_by_id(mut hotel: Hotel) {
    // Arrange
    hotel.add_animal("A0", "Kiara", "S1", "H1").unwrap();

    // Act
    let ids: Vec<&str> = hotel
        .habitat_animals("H1")
        .unwrap()
        .into_iter()
        .map(|a| a.id.as_str())
        .collect();

    // Assert
    assert_eq!(ids, vec!["A0", "A1", "A2", "A3"]);
    assert_eq!(
        hotel.habitat_animals("H9").unwrap_err(),
        DomainError::HabitatNotFound("H9".into())
    );
}

#[rstest]
fn given_mixed_case_ids_when_listing_animals_then_case_insensitive_order(mut hotel: Hotel) {
    // Arrange
    hotel.add_animal("b1", "Zazu", "S1", "H2").unwrap();
    hotel.add_animal("B0", "Rafiki", "S1", "H2").unwrap();

    // Act
    let ids: Vec<&str> = hotel.animals().map(|a| a.id.as_str()).collect();

    // Assert
    assert_eq!(ids, vec!["A1", "A2", "A3", "B0", "b1"]);
}
