//! Items command handler for listing catalog entries.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use fitsim_lib::{Catalog, Item, ItemCategory};

use fitsim_cli::output::{print_json, OutputFormat};
use fitsim_cli::terminal::ColorPalette;

/// Category filter accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Ship,
    Module,
    Charge,
    Commodity,
}

impl From<CategoryArg> for ItemCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Ship => ItemCategory::Ship,
            CategoryArg::Module => ItemCategory::Module,
            CategoryArg::Charge => ItemCategory::Charge,
            CategoryArg::Commodity => ItemCategory::Commodity,
        }
    }
}

#[derive(Serialize)]
struct ItemSummary<'a> {
    id: u32,
    name: &'a str,
    category: ItemCategory,
    group: &'a str,
}

pub fn handle_items(
    catalog: &Catalog,
    category: Option<CategoryArg>,
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<()> {
    let items = match category {
        Some(arg) => catalog.items_in(arg.into()),
        None => catalog.items_sorted(),
    };

    if format == OutputFormat::Json {
        let summaries: Vec<ItemSummary<'_>> = items.iter().copied().map(summarize).collect();
        return print_json(&summaries);
    }

    if items.is_empty() {
        println!("{}No items match.{}", palette.warning, palette.reset);
        return Ok(());
    }

    println!("{}", palette.heading(&format!("Items ({}):", items.len())));
    println!(
        "{}{:>8}  {:<34} {:<10} {}{}",
        palette.header, "ID", "Name", "Category", "Group", palette.reset
    );
    for item in items {
        println!(
            "{:>8}  {:<34} {:<10} {}",
            item.id,
            item.name,
            item.category.label(),
            palette.muted(&item.group)
        );
    }
    Ok(())
}

fn summarize(item: &Item) -> ItemSummary<'_> {
    ItemSummary {
        id: item.id.0,
        name: &item.name,
        category: item.category,
        group: &item.group,
    }
}
