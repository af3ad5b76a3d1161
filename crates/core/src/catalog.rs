//! Filter and sort engine for the product collection
//!
//! [`compute`] is the only way a display list is produced. It is a pure
//! function of its arguments: filtering first, then a stable sort, so products
//! with equal sort keys keep their relative fetch order.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::product::Product;

/// Ordering applied to the filtered product list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    Popularity,
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::Popularity,
        SortKey::Title,
    ];

    /// Parse a sort key, falling back to [`SortKey::None`] for unknown values
    ///
    /// Accepts the kebab-case names (`price-asc`) as well as the select-box
    /// values used by the storefront pages (`ascendingOrder`).
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "price-asc" | "ascendingOrder" => SortKey::PriceAsc,
            "price-desc" | "descendingOrder" => SortKey::PriceDesc,
            "popularity" => SortKey::Popularity,
            "title" => SortKey::Title,
            _ => SortKey::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Popularity => "popularity",
            SortKey::Title => "title",
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::parse(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a product passes the category and search filters
///
/// An empty filter set accepts every category. The search term is matched
/// case-insensitively anywhere in the title.
pub fn matches(product: &Product, filters: &BTreeSet<String>, search: &str) -> bool {
    let matches_category = filters.is_empty() || filters.contains(&product.category);
    let matches_search = product
        .title
        .to_lowercase()
        .contains(&search.to_lowercase());

    matches_category && matches_search
}

/// Compute the ordered display list for the given collection and view options
pub fn compute<'a>(
    products: &'a [Product],
    filters: &BTreeSet<String>,
    search: &str,
    sort: SortKey,
) -> Vec<&'a Product> {
    let mut list: Vec<&Product> = products
        .iter()
        .filter(|product| matches(product, filters, search))
        .collect();

    // `sort_by` and `sort_by_cached_key` are both stable.
    match sort {
        SortKey::PriceAsc => list.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => list.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Popularity => list.sort_by(|a, b| b.rating.rate.total_cmp(&a.rating.rate)),
        SortKey::Title => list.sort_by_cached_key(|product| CollationKey::new(&product.title)),
        SortKey::None => {}
    }

    list
}

/// Distinct categories in the order they were first fetched
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    products
        .iter()
        .filter(|product| seen.insert(product.category.clone()))
        .map(|product| product.category.clone())
        .collect()
}

/// Compare two strings the way a root-locale collator does
///
/// Base letters decide first, ignoring case and accents. Accents break ties
/// next, then case with lowercase before uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    primary: String,
    secondary: String,
    tertiary: Vec<u8>,
    raw: String,
}

impl CollationKey {
    fn new(value: &str) -> Self {
        let decomposed: Vec<char> = value.nfd().collect();

        let primary = decomposed
            .iter()
            .filter(|c| !is_combining_mark(**c))
            .flat_map(|c| c.to_lowercase())
            .collect();
        let secondary = decomposed.iter().flat_map(|c| c.to_lowercase()).collect();
        let tertiary = decomposed
            .iter()
            .filter(|c| !is_combining_mark(**c))
            .map(|c| u8::from(c.is_uppercase()))
            .collect();

        Self {
            primary,
            secondary,
            tertiary,
            raw: value.to_string(),
        }
    }
}
