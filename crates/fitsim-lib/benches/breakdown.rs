use criterion::{criterion_group, criterion_main, Criterion};
use fitsim_lib::{Catalog, Loadout, LoadoutSpec, ModifierGraph, Simulator};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_path(&fixtures_dir().join("catalog.json")).expect("fixture catalog loads")
});
static AUTOCANNON_RIFTER: Lazy<Loadout> = Lazy::new(|| fixture_loadout("rifter_autocannons.json"));
static MIXED_RIFTER: Lazy<Loadout> = Lazy::new(|| fixture_loadout("rifter_no_prop.json"));

fn fixture_loadout(name: &str) -> Loadout {
    let spec = LoadoutSpec::from_path(&fixtures_dir().join("loadouts").join(name))
        .expect("fixture loadout parses");
    let (hangar, id) = spec.into_hangar(&CATALOG).expect("fixture loadout builds");
    hangar.get(id).cloned().expect("target loadout stored")
}

fn benchmark_breakdowns(c: &mut Criterion) {
    let catalog = &*CATALOG;
    let graph = ModifierGraph::new(catalog);
    let sim = Simulator::new(catalog, &graph);

    c.bench_function("ammo_breakdown_autocannon_rifter", |b| {
        let mut loadout = AUTOCANNON_RIFTER.clone();
        b.iter(|| black_box(sim.ammo_breakdown(Some(&mut loadout)).len()));
    });

    c.bench_function("mobility_replace_prop", |b| {
        let mut loadout = AUTOCANNON_RIFTER.clone();
        b.iter(|| black_box(sim.mobility(Some(&mut loadout)).microwarpdrive.with_boost));
    });

    c.bench_function("mobility_insert_props", |b| {
        let mut loadout = MIXED_RIFTER.clone();
        b.iter(|| black_box(sim.mobility(Some(&mut loadout)).afterburner.no_boost));
    });
}

criterion_group!(benches, benchmark_breakdowns);
criterion_main!(benches);
