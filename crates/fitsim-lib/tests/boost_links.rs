mod common;

use common::{fixture_hangar, load_catalog};
use fitsim_lib::fit::BOOSTER_VAULT;
use fitsim_lib::{AttributeGraph, ModifierGraph, DEFAULT_VAULT};

#[test]
fn boosters_in_another_vault_still_apply() {
    let catalog = load_catalog();
    let graph = ModifierGraph::new(&catalog);
    let (mut hangar, target) = fixture_hangar(&catalog, "rifter_autocannons.json");

    let booster = hangar.loadouts_in(BOOSTER_VAULT)[0];
    assert_eq!(hangar.vault_of(target), Some(DEFAULT_VAULT));
    assert_ne!(hangar.vault_of(target), hangar.vault_of(booster));

    let loadout = hangar.get_mut(target).expect("target stored");
    graph.recompute(loadout);
    let applied = &loadout.derived().expect("recomputed").applied_boosts;

    assert_eq!(applied.len(), 2);
    assert!(applied.iter().all(|boost| boost.source == booster));
    assert_eq!(applied[0].attribute, "maxVelocity");
    assert_eq!(applied[1].attribute, "maxTargetRange");
}

#[test]
fn moving_the_booster_between_vaults_keeps_the_link() {
    let catalog = load_catalog();
    let graph = ModifierGraph::new(&catalog);
    let (mut hangar, target) = fixture_hangar(&catalog, "rifter_autocannons.json");
    let booster = hangar.loadouts_in(BOOSTER_VAULT)[0];

    hangar.create_vault("Fleet");
    hangar.move_to_vault(booster, "Fleet").expect("vault exists");
    hangar.delete_vault(BOOSTER_VAULT).expect("not the last vault");

    let loadout = hangar.get_mut(target).expect("target stored");
    graph.recompute(loadout);
    assert!(!loadout
        .derived()
        .expect("recomputed")
        .applied_boosts
        .is_empty());
}

#[test]
fn inactive_and_unlinked_boosters_apply_nothing() {
    let catalog = load_catalog();
    let graph = ModifierGraph::new(&catalog);
    let (mut hangar, target) = fixture_hangar(&catalog, "rifter_autocannons.json");
    let booster = hangar.loadouts_in(BOOSTER_VAULT)[0];

    let loadout = hangar.get_mut(target).expect("target stored");
    assert_eq!(loadout.set_boost_active(booster, false), Some(true));
    graph.recompute(loadout);
    assert!(loadout.derived().expect("recomputed").applied_boosts.is_empty());

    assert!(hangar.unlink_booster(target, booster).expect("target exists"));
    let loadout = hangar.get(target).expect("target stored");
    assert!(loadout.boost_links().is_empty());
}
