use crate::prelude::{eprintln, println, *};
use regex::Regex;
use storefront_core::view::{build_detail_view, DetailView};

use crate::render::{format_detail_json, format_detail_text};
use crate::source::{HttpSource, ProductSource};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ShowOptions {
    /// Product ID or detail link (e.g., "3" or "product_details.html?id=3")
    pub product: String,

    /// Show the whole description instead of folding it
    #[arg(long)]
    pub full: bool,

    /// Site name used for the page title
    #[arg(long, default_value = "Storefront")]
    pub site_title: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ShowOptions, global: crate::Global) -> Result<()> {
    let source = HttpSource::from_global(&global);
    let id = extract_product_id(&options.product)?;

    if global.verbose {
        eprintln!("Fetching product ID: {}", id);
    }

    let spinner = (!options.json).then(|| spinner("Loading product..."));
    let view = show_product_data(&source, id, &options.site_title).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let view = view?;

    if options.json {
        println!("{}", format_detail_json(&view)?);
    } else {
        print!("{}", format_detail_text(&view, options.full));
    }

    Ok(())
}

/// Fetch one product and build its detail view
pub async fn show_product_data<S: ProductSource>(
    source: &S,
    id: u64,
    site_title: &str,
) -> Result<DetailView> {
    let product = source
        .fetch_product(id)
        .await
        .map_err(|e| eyre!("Failed to fetch product {}: {}", id, e))?;

    Ok(build_detail_view(&product, site_title))
}

pub fn extract_product_id(input: &str) -> Result<u64> {
    // Try to parse as number first
    if let Ok(id) = input.trim().parse::<u64>() {
        return Ok(id);
    }

    // Try to extract from a detail link
    let re = Regex::new(r"[?&]id=(\d+)").context("Invalid product link pattern")?;
    if let Some(id_match) = re.captures(input).and_then(|caps| caps.get(1)) {
        return id_match
            .as_str()
            .parse::<u64>()
            .map_err(|_| eyre!("Failed to parse product ID from link"));
    }

    Err(eyre!("Invalid product ID or link: {}", input))
}
