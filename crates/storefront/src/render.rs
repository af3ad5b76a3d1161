use crate::prelude::{println, *};
use colored::Colorize;
use storefront_core::view::{DetailView, ListView, LoadMore};

/// Sink for list views produced by the controller
pub trait Render {
    fn render(&mut self, view: &ListView);
}

/// Prints every view to stdout, either as text or as one JSON document per line
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer {
    pub json: bool,
}

impl TerminalRenderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl Render for TerminalRenderer {
    fn render(&mut self, view: &ListView) {
        if self.json {
            match serde_json::to_string(view) {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("Failed to serialize list view: {e}"),
            }
        } else {
            print!("{}", format_list_text(view));
        }
    }
}

/// Convert list view to JSON string
pub fn format_list_json(view: &ListView) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Convert detail view to JSON string
pub fn format_detail_json(view: &DetailView) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_products_table(view: &ListView) -> String {
    let mut table = new_table();
    table.add_row(prettytable::row!["ID", "Title", "Price", "Category", "Rating"]);

    for card in &view.cards {
        table.add_row(prettytable::row![
            card.id,
            &card.title,
            &card.price_label,
            &card.category,
            f!("{:.1}", card.rate)
        ]);
    }

    table.to_string()
}

/// Convert list view to formatted text with colors
pub fn format_list_text(view: &ListView) -> String {
    let mut result = String::new();

    // Header
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        f!("PRODUCTS ({})", view.results_label).bright_cyan().bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    if let Some(error) = &view.error {
        result.push_str(&f!("\n{} {}\n", "Error:".red().bold(), error.red()));
    }

    match &view.empty_message {
        Some(message) => result.push_str(&f!("\n{}\n", message.yellow())),
        None => result.push_str(&f!("\n{}", format_products_table(view))),
    }

    // Filter panel
    result.push_str(&f!("\n{}\n", "Filter".bright_white().bold()));
    if view.filters.is_empty() {
        result.push_str(&f!("  {}\n", "(no categories yet)".bright_black()));
    }
    for option in &view.filters {
        let mark = if option.checked { "[x]" } else { "[ ]" };
        result.push_str(&f!(
            "  {} {} {}\n",
            mark.green(),
            option.category,
            f!("({})", option.id).bright_black()
        ));
    }

    result.push_str(&f!(
        "\n{}: {} | {}: {} | {}: {}\n",
        "Search".green(),
        if view.search_term.is_empty() {
            "(none)".bright_black()
        } else {
            view.search_term.bright_white()
        },
        "Sort".green(),
        view.sort_key.to_string().bright_white(),
        "Page".green(),
        view.page_number.to_string().bright_white()
    ));

    match view.load_more {
        LoadMore::Ready => result.push_str(&f!(
            "{}: {}\n",
            "Load more".green(),
            "more".cyan()
        )),
        LoadMore::Loading => {
            result.push_str(&f!("{}\n", "Loading more products...".yellow()))
        }
        LoadMore::Hidden => {}
    }

    result
}

/// Convert detail view to formatted text with colors
pub fn format_detail_text(view: &DetailView, expanded: bool) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!("{}\n", view.page_title.bright_cyan().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&f!("\n{}\n", view.title.white().bold()));
    result.push_str(&f!(
        "    {}: {} | {}: {}\n",
        "Price".green(),
        view.price_label.bright_yellow(),
        "Category".green(),
        view.category.bright_white()
    ));
    result.push_str(&f!(
        "    {}: {} {} ({})\n",
        "Rating".green(),
        star_bar(view.star_percentage).bright_yellow(),
        f!("{:.1}", view.rate).bright_white(),
        view.rating_count.to_string().bright_magenta()
    ));
    result.push_str(&f!(
        "    {}: {}\n",
        "Image".green(),
        view.image.cyan().underline()
    ));

    result.push_str(&f!("\n{}\n", "Description".bright_white().bold()));
    match &view.description.remainder {
        Some(remainder) if expanded => {
            result.push_str(&f!("{}{}\n", view.description.preview, remainder));
        }
        Some(_) => {
            result.push_str(&f!(
                "{}...\n{}\n",
                view.description.preview,
                f!("Read more: storefront show {} --full", view.id).cyan()
            ));
        }
        None => result.push_str(&f!("{}\n", view.description.preview)),
    }

    result.push('\n');
    result
}

/// Five-star bar filled in half-star steps
fn star_bar(percentage: u8) -> String {
    let halves = (usize::from(percentage.min(100)) + 5) / 10;
    let full = halves / 2;
    let half = halves % 2;
    let empty = 5 - full - half;

    f!("{}{}{}", "★".repeat(full), "⯪".repeat(half), "☆".repeat(empty))
}
