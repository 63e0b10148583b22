//! Non-interactive commands: the same session engine as the TUI, printed once.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use menufind_core::{
    Catalog, DisplayedItem, Event, MenuItem, MenuView, Restaurant, RestaurantId, Session,
    Suggestions,
};
use serde::Serialize;

#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    /// Text to look for in restaurant names (case-insensitive)
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Treat the query as a freshly focused search field, so an empty query lists everything
    #[arg(long)]
    pub focus: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MenuArgs {
    /// Restaurant id, or text matched against restaurant names
    #[arg(value_name = "RESTAURANT")]
    pub restaurant: String,

    /// Only items whose name or category contains this text
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    pub name: String,

    /// Only items with an ingredient containing this text
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    pub ingredient: String,

    /// Show ingredient lists
    #[arg(short, long)]
    pub expand: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct RestaurantSummary<'a> {
    id: &'a str,
    name: &'a str,
}

impl<'a> From<&'a Restaurant> for RestaurantSummary<'a> {
    fn from(restaurant: &'a Restaurant) -> Self {
        Self {
            id: restaurant.id.as_str(),
            name: &restaurant.name,
        }
    }
}

#[derive(Serialize)]
struct MenuReport<'a> {
    restaurant: RestaurantSummary<'a>,
    items: Vec<&'a MenuItem>,
}

fn load_session(data: &Path) -> Result<Session> {
    let catalog = Catalog::from_dir(data)
        .with_context(|| format!("Failed to load catalog from {}", data.display()))?;
    Ok(Session::new(Arc::new(catalog)))
}

pub fn suggest(data: &Path, args: SuggestArgs) -> Result<()> {
    let mut session = load_session(data)?;
    session.handle(Event::RestaurantQueryChanged(args.query));
    if args.focus {
        session.handle(Event::RestaurantFieldFocused);
    }

    let mut out = io::stdout().lock();
    if args.json {
        let summaries: Vec<RestaurantSummary> = session.candidates().map(Into::into).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&summaries)?)?;
        return Ok(());
    }

    match session.suggestions() {
        Suggestions::Idle => {
            let hint = "Type a query, or pass --focus to list every restaurant";
            writeln!(out, "{}", hint.dimmed())?;
        }
        Suggestions::NoResults => writeln!(out, "No results")?,
        Suggestions::Matches(_) => {
            for restaurant in session.candidates() {
                let id = format!("({})", restaurant.id);
                writeln!(out, "{} {}", restaurant.name.bold(), id.dimmed())?;
            }
        }
    }
    Ok(())
}

pub fn menu(data: &Path, args: MenuArgs) -> Result<()> {
    let mut session = load_session(data)?;

    // Exact id first, then the same best-match commit the search field uses
    let selection = if session.catalog().by_id(&args.restaurant).is_some() {
        session.select(&RestaurantId::new(args.restaurant.as_str()))
    } else {
        session.handle(Event::RestaurantQueryChanged(args.restaurant.clone()));
        session.handle(Event::Commit)
    };
    if selection.is_none() {
        anyhow::bail!("No restaurant matches '{}'", args.restaurant);
    }

    session.handle(Event::NameQueryChanged(args.name));
    session.handle(Event::IngredientQueryChanged(args.ingredient));
    if args.expand {
        session.handle(Event::ExpandAll);
    }

    let restaurant = session.current_restaurant().context("Selection was lost")?;
    let rows = session.displayed_items();

    let mut out = io::stdout().lock();
    if args.json {
        let report = MenuReport {
            restaurant: restaurant.into(),
            items: rows.iter().map(|row| row.item).collect(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(out, "{}", restaurant.name.bold())?;
    if let MenuView::Items(_) = session.menu() {
        write_menu_table(&rows, &mut out)?;
    } else {
        writeln!(out, "No matching items")?;
    }
    Ok(())
}

fn write_menu_table<W: Write>(rows: &[DisplayedItem<'_>], mut writer: W) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Item", "Category", "Price", "Ingredients"]);

    for row in rows {
        let item = row.item;
        let ingredients = if !row.panel.is_expanded() {
            format!("{} ingredients", item.ingredients.len())
        } else if item.ingredients.is_empty() {
            "none listed".to_string()
        } else {
            item.ingredients.join("\n")
        };
        table.add_row(vec![
            item.name.clone(),
            item.category.clone().unwrap_or_default(),
            item.price.as_ref().map(ToString::to_string).unwrap_or_default(),
            ingredients,
        ]);
    }

    writeln!(writer, "{table}")
}

pub fn check(data: &Path) -> Result<()> {
    let catalog = Catalog::from_dir(data)
        .with_context(|| format!("Failed to load catalog from {}", data.display()))?;
    println!(
        "{} {} restaurants, {} menu items in {}",
        "✓".green(),
        catalog.len(),
        catalog.item_count(),
        data.display()
    );
    Ok(())
}
