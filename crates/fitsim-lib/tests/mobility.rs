mod common;

use common::{assert_close, fixture_loadout, load_catalog};
use fitsim_lib::{ModifierGraph, PropulsionKind, Simulator, SpeedSource};

#[test]
fn fitted_afterburner_and_boosts() {
    let catalog = load_catalog();
    let graph = ModifierGraph::new(&catalog);
    let sim = Simulator::new(&catalog, &graph);
    let mut loadout = fixture_loadout(&catalog, "rifter_autocannons.json");

    let breakdown = sim.mobility(Some(&mut loadout));

    let with_prop_no_boost = breakdown.speed_with_prop_no_boost.expect("speed");
    let with_prop_with_boost = breakdown.speed_with_prop_with_boost.expect("speed");
    let no_prop_no_boost = breakdown.speed_no_prop_no_boost.expect("speed");
    let no_prop_with_boost = breakdown.speed_no_prop_with_boost.expect("speed");

    assert_close(with_prop_no_boost, 355.0 * 2.35 * 1.125);
    assert_close(with_prop_with_boost, 355.0 * 2.35 * 1.125 * 1.15);
    assert_close(no_prop_no_boost, 355.0 * 1.125);
    assert_close(no_prop_with_boost, 355.0 * 1.125 * 1.15);
    assert!(with_prop_with_boost > no_prop_with_boost);

    assert_close(breakdown.lock_range_no_boost.expect("lock"), 22500.0 * 1.3);
    assert_close(breakdown.lock_range_with_boost.expect("lock"), 22500.0 * 1.3 * 1.2);

    assert_eq!(
        breakdown.fitted_prop_label.as_deref(),
        Some("1MN Afterburner II (Afterburner)")
    );
    assert_eq!(breakdown.afterburner.source, SpeedSource::Fitted);
    assert_eq!(breakdown.afterburner.no_boost, Some(with_prop_no_boost));
}

#[test]
fn carried_microwarpdrive_replaces_fitted_afterburner() {
    let catalog = load_catalog();
    let graph = ModifierGraph::new(&catalog);
    let sim = Simulator::new(&catalog, &graph);
    let mut loadout = fixture_loadout(&catalog, "rifter_autocannons.json");

    let breakdown = sim.mobility(Some(&mut loadout));

    let mwd = &breakdown.microwarpdrive;
    assert_eq!(mwd.source, SpeedSource::Replaced);
    assert_eq!(mwd.module.as_deref(), Some("5MN Microwarpdrive II"));
    assert_close(mwd.no_boost.expect("speed"), 355.0 * 6.05 * 1.125);
    assert_close(mwd.with_boost.expect("speed"), 355.0 * 6.05 * 1.125 * 1.15);

    assert_eq!(breakdown.cargo_propulsion.len(), 1);
    assert_eq!(
        breakdown.cargo_propulsion[0].kind,
        PropulsionKind::Microwarpdrive
    );
}

#[test]
fn carried_modules_fill_free_slots() {
    let catalog = load_catalog();
    let graph = ModifierGraph::new(&catalog);
    let sim = Simulator::new(&catalog, &graph);
    let mut loadout = fixture_loadout(&catalog, "rifter_no_prop.json");

    let breakdown = sim.mobility(Some(&mut loadout));

    assert!(breakdown.fitted_prop_label.is_none());
    assert_eq!(
        breakdown.speed_no_prop_no_boost,
        breakdown.speed_with_prop_no_boost
    );
    assert_eq!(
        breakdown.speed_no_prop_with_boost,
        breakdown.speed_with_prop_with_boost
    );

    assert_eq!(breakdown.afterburner.source, SpeedSource::Inserted);
    assert_close(breakdown.afterburner.no_boost.expect("speed"), 355.0 * 2.35);
    assert_eq!(breakdown.microwarpdrive.source, SpeedSource::Inserted);
    assert_close(breakdown.microwarpdrive.no_boost.expect("speed"), 355.0 * 6.05);

    let carried: Vec<&str> = breakdown
        .cargo_propulsion
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(carried, vec!["1MN Afterburner II", "5MN Microwarpdrive II"]);
    assert_eq!(loadout.modules().len(), 4);
}

#[test]
fn speed_limit_caps_velocity() {
    let catalog = load_catalog();
    let graph = ModifierGraph::new(&catalog);
    let sim = Simulator::new(&catalog, &graph);
    let mut loadout = fixture_loadout(&catalog, "condor_capped.json");

    let breakdown = sim.mobility(Some(&mut loadout));

    assert_eq!(breakdown.speed_with_prop_no_boost, Some(900.0));
    assert_eq!(breakdown.speed_no_prop_no_boost, Some(325.0));
    assert_close(breakdown.lock_range_no_boost.expect("lock"), 27000.0);
    assert_eq!(breakdown.microwarpdrive.source, SpeedSource::Fitted);
}

#[test]
fn group_limit_falls_back_to_replacing_fitted_propulsion() {
    let catalog = load_catalog();
    let graph = ModifierGraph::new(&catalog);
    let sim = Simulator::new(&catalog, &graph);
    let mut loadout = fixture_loadout(&catalog, "condor_capped.json");
    let before = loadout.state();

    let breakdown = sim.mobility(Some(&mut loadout));

    // inserting next to the fitted MWD exceeds maxGroupFitted, so the AB swaps in
    let ab = &breakdown.afterburner;
    assert_eq!(ab.source, SpeedSource::Replaced);
    assert_eq!(ab.module.as_deref(), Some("1MN Afterburner II"));
    assert_close(ab.no_boost.expect("speed"), 325.0 * 2.35);
    assert_close(ab.with_boost.expect("speed"), 325.0 * 2.35);
    assert_eq!(loadout.state(), before);
}

#[test]
fn hullless_loadout_is_unavailable() {
    let catalog = load_catalog();
    let graph = ModifierGraph::new(&catalog);
    let sim = Simulator::new(&catalog, &graph);
    let mut loadout = fixture_loadout(&catalog, "hullless.json");

    let breakdown = sim.mobility(Some(&mut loadout));

    assert!(breakdown.speed_with_prop_no_boost.is_none());
    assert!(breakdown.lock_range_with_boost.is_none());
    assert_eq!(breakdown.afterburner.source, SpeedSource::NoSlot);
    assert_eq!(breakdown.microwarpdrive.source, SpeedSource::NoCandidate);
    assert_eq!(breakdown.cargo_propulsion.len(), 1);
}

#[test]
fn absent_loadout_is_all_unavailable() {
    let catalog = load_catalog();
    let graph = ModifierGraph::new(&catalog);
    let sim = Simulator::new(&catalog, &graph);

    let breakdown = sim.mobility(None);

    assert!(breakdown.speed_no_prop_no_boost.is_none());
    assert!(breakdown.speed_with_prop_with_boost.is_none());
    assert!(breakdown.lock_range_no_boost.is_none());
    assert!(breakdown.fitted_prop_label.is_none());
    assert_eq!(breakdown.afterburner.source, SpeedSource::NoCandidate);
    assert!(breakdown.microwarpdrive.with_boost.is_none());
    assert!(breakdown.cargo_propulsion.is_empty());
}

#[test]
fn breakdown_serializes_to_json() {
    let catalog = load_catalog();
    let graph = ModifierGraph::new(&catalog);
    let sim = Simulator::new(&catalog, &graph);
    let mut loadout = fixture_loadout(&catalog, "rifter_autocannons.json");

    let breakdown = sim.mobility(Some(&mut loadout));
    let json = serde_json::to_value(&breakdown).expect("serializes");
    assert_eq!(json["afterburner"]["source"], "fitted");
    assert_eq!(json["microwarpdrive"]["source"], "replaced");
    assert_eq!(json["cargo_propulsion"][0]["kind"], "Microwarpdrive");
}
