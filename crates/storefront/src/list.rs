use crate::prelude::{eprintln, println, *};
use futures::future::join_all;
use storefront_core::catalog::SortKey;
use storefront_core::state::CollectionState;
use storefront_core::view::{build_list_view, ListView};

use crate::render::{format_list_json, format_list_text};
use crate::source::{HttpSource, ProductSource};

/// Most pages a single `list` call will fetch
pub const MAX_PAGES: u32 = 50;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Number of pages to load, starting at page 1
    #[arg(
        short,
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGES))
    )]
    pub pages: u32,

    /// Only show products whose title contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only show products in this category (repeat for several)
    #[arg(short, long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Sort order: none, price-asc, price-desc, popularity, title
    #[arg(long, default_value = "none")]
    pub sort: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let source = HttpSource::from_global(&global);

    if global.verbose {
        eprintln!(
            "Fetching {} page(s) from {}...",
            options.pages.clamp(1, MAX_PAGES),
            source.base_url()
        );
    }

    let spinner = (!options.json).then(|| spinner("Loading products..."));
    let view = list_products_data(&source, &options).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let view = view?;

    if options.json {
        println!("{}", format_list_json(&view)?);
    } else {
        print!("{}", format_list_text(&view));
    }

    Ok(())
}

/// Fetch pages `1..=pages` and build the list view for the given options
///
/// Pages are requested concurrently and merged in page order, so the
/// collection keeps the same order a sequence of "load more" requests would
/// produce.
pub async fn list_products_data<S: ProductSource>(
    source: &S,
    options: &ListOptions,
) -> Result<ListView> {
    let pages: Vec<u32> = (1..=options.pages.clamp(1, MAX_PAGES)).collect();
    let results = join_all(pages.iter().map(|page| source.fetch_page(*page))).await;

    let mut state = CollectionState::new();
    for (page, result) in pages.into_iter().zip(results) {
        let products = result.map_err(|e| eyre!("Failed to fetch page {}: {}", page, e))?;
        state.merge_page(page, products);
    }

    for category in &options.categories {
        state.toggle_filter(category, true);
    }
    state.set_search(options.search.clone());
    state.set_sort(SortKey::parse(&options.sort));

    Ok(build_list_view(&state, false, None))
}
