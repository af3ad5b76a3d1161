//! Presentation descriptions for the list and detail pages
//!
//! These are plain data: the shell decides whether they become a table,
//! coloured text or JSON.

use serde::Serialize;

use crate::catalog::SortKey;
use crate::product::Product;
use crate::state::CollectionState;

/// Shown instead of cards when the display list is empty
pub const EMPTY_MESSAGE: &str = "No product found";

/// Character count shown before the "read more" fold
pub const READ_MORE_AT: usize = 122;

/// Description used when a product has none of its own
pub const PLACEHOLDER_DESCRIPTION: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Phasellus imperdiet, nulla et dictum interdum, nisi lorem egestas vitae scelerisque enim ligula venenatis dolor. Maecenas nisl est, ultrices nec congue eget, auctor vitae massa. Fusce luctus vestibulum augue ut aliquet. Nunc sagittis dictum nisi, sed ullamcorper ipsum dignissim ac. In at libero sed nunc venenatis imperdiet sed ornare turpis. Donec vitae dui eget tellus gravida venenatis. Integer fringilla congue eros non fermentum.";

const STAR_TOTAL: f64 = 5.0;

/// One product card in the list
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ProductCard {
    pub id: u64,
    pub title: String,
    pub price_label: String,
    pub category: String,
    pub image: String,
    pub rate: f64,
    pub detail_link: String,
}

/// One checkbox in the category filter panel
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FilterOption {
    pub id: String,
    pub category: String,
    pub checked: bool,
}

/// State of the "load more" trigger
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadMore {
    /// Filters or a search narrow the view
    Hidden,
    /// A page request is in flight
    Loading,
    Ready,
}

/// Complete product list view
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ListView {
    pub result_count: usize,
    pub results_label: String,
    pub cards: Vec<ProductCard>,
    pub empty_message: Option<String>,
    pub filters: Vec<FilterOption>,
    pub search_term: String,
    pub sort_key: SortKey,
    pub page_number: u32,
    pub load_more: LoadMore,
    pub error: Option<String>,
}

/// Description split at the "read more" fold
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ReadMore {
    pub preview: String,
    pub remainder: Option<String>,
}

/// Complete product detail view
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DetailView {
    pub id: u64,
    pub title: String,
    pub page_title: String,
    pub price_label: String,
    pub category: String,
    pub image: String,
    pub rate: f64,
    pub rating_count: u64,
    pub star_percentage: u8,
    pub description: ReadMore,
}

pub fn format_price(price: f64) -> String {
    format!("${price}")
}

pub fn results_label(count: usize) -> String {
    format!("{count} Results")
}

pub fn detail_link(id: u64) -> String {
    format!("product_details.html?id={id}")
}

/// Build a card for one product
pub fn product_card(product: &Product) -> ProductCard {
    ProductCard {
        id: product.id,
        title: product.title.clone(),
        price_label: format_price(product.price),
        category: product.category.clone(),
        image: product.image.clone(),
        rate: product.rating.rate,
        detail_link: detail_link(product.id),
    }
}

/// Build the filter panel from the categories seen so far
///
/// Checkbox ids are 1-based and follow first-seen category order.
pub fn filter_options(state: &CollectionState) -> Vec<FilterOption> {
    state
        .categories()
        .into_iter()
        .enumerate()
        .map(|(index, category)| FilterOption {
            id: format!("category_{}", index + 1),
            checked: state.filters().contains(&category),
            category,
        })
        .collect()
}

/// Build the list view for the current state
///
/// # Arguments
/// * `state` - Collection state to render
/// * `loading` - Whether a page request is in flight
/// * `error` - Notice from the last failed fetch, if any
pub fn build_list_view(state: &CollectionState, loading: bool, error: Option<&str>) -> ListView {
    let cards: Vec<ProductCard> = state
        .display_list()
        .into_iter()
        .map(product_card)
        .collect();

    let load_more = if !state.can_load_more() {
        LoadMore::Hidden
    } else if loading {
        LoadMore::Loading
    } else {
        LoadMore::Ready
    };

    ListView {
        result_count: cards.len(),
        results_label: results_label(cards.len()),
        empty_message: cards.is_empty().then(|| EMPTY_MESSAGE.to_string()),
        cards,
        filters: filter_options(state),
        search_term: state.search().to_string(),
        sort_key: state.sort(),
        page_number: state.page(),
        load_more,
        error: error.map(str::to_string),
    }
}

/// Star fill percentage rounded to the nearest ten
pub fn star_percentage(rate: f64) -> u8 {
    let percentage = (rate / STAR_TOTAL) * 100.0;
    let rounded = (percentage / 10.0).round() * 10.0;
    rounded.clamp(0.0, 100.0) as u8
}

/// Split text at the "read more" fold
pub fn split_read_more(text: &str, at: usize) -> ReadMore {
    match text.char_indices().nth(at) {
        Some((offset, _)) => ReadMore {
            preview: text[..offset].to_string(),
            remainder: Some(text[offset..].to_string()),
        },
        None => ReadMore {
            preview: text.to_string(),
            remainder: None,
        },
    }
}

/// Page title for a product, keeping the site part of the current title
///
/// "Store | Old product" becomes "Store | New product".
pub fn page_title(current: &str, product_title: &str) -> String {
    let site = current.split('|').next().unwrap_or_default().trim();
    if site.is_empty() {
        product_title.to_string()
    } else {
        format!("{site} | {product_title}")
    }
}

/// Build the detail view for one product
pub fn build_detail_view(product: &Product, site_title: &str) -> DetailView {
    let description = product
        .description
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(PLACEHOLDER_DESCRIPTION);

    DetailView {
        id: product.id,
        title: product.title.clone(),
        page_title: page_title(site_title, &product.title),
        price_label: format_price(product.price),
        category: product.category.clone(),
        image: product.image.clone(),
        rate: product.rating.rate,
        rating_count: product.rating.count,
        star_percentage: star_percentage(product.rating.rate),
        description: split_read_more(description, READ_MORE_AT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Rating;

    fn create_test_product(id: u64, title: &str, price: f64, category: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            category: category.to_string(),
            image: format!("https://fakestoreapi.com/img/{id}.jpg"),
            rating: Rating {
                rate: 3.9,
                count: 120,
            },
            description: None,
        }
    }

    fn loaded_state() -> CollectionState {
        let mut state = CollectionState::new();
        state.merge_page(
            1,
            vec![
                create_test_product(1, "Shirt", 20.0, "men"),
                create_test_product(2, "Bag", 10.5, "women"),
            ],
        );
        state
    }

    // ============================================================================
    // list view tests
    // ============================================================================

    #[test]
    fn test_build_list_view_basic() {
        let view = build_list_view(&loaded_state(), false, None);

        assert_eq!(view.result_count, 2);
        assert_eq!(view.results_label, "2 Results");
        assert_eq!(view.cards.len(), 2);
        assert!(view.empty_message.is_none());
        assert_eq!(view.load_more, LoadMore::Ready);
        assert_eq!(view.page_number, 1);
        assert!(view.error.is_none());
    }

    #[test]
    fn test_build_list_view_cards() {
        let view = build_list_view(&loaded_state(), false, None);
        let card = &view.cards[1];

        assert_eq!(card.id, 2);
        assert_eq!(card.title, "Bag");
        assert_eq!(card.price_label, "$10.5");
        assert_eq!(card.detail_link, "product_details.html?id=2");
        assert_eq!(card.image, "https://fakestoreapi.com/img/2.jpg");
    }

    #[test]
    fn test_build_list_view_empty() {
        let mut state = loaded_state();
        state.set_search("zzz");

        let view = build_list_view(&state, false, None);

        assert_eq!(view.result_count, 0);
        assert_eq!(view.results_label, "0 Results");
        assert!(view.cards.is_empty());
        assert_eq!(view.empty_message.as_deref(), Some("No product found"));
        assert_eq!(view.load_more, LoadMore::Hidden);
    }

    #[test]
    fn test_build_list_view_filters() {
        let mut state = loaded_state();
        state.toggle_filter("women", true);

        let view = build_list_view(&state, false, None);

        assert_eq!(
            view.filters,
            vec![
                FilterOption {
                    id: "category_1".to_string(),
                    category: "men".to_string(),
                    checked: false,
                },
                FilterOption {
                    id: "category_2".to_string(),
                    category: "women".to_string(),
                    checked: true,
                },
            ]
        );
        assert_eq!(view.result_count, 1);
        assert_eq!(view.load_more, LoadMore::Hidden);
    }

    #[test]
    fn test_build_list_view_loading_and_error() {
        let view = build_list_view(&loaded_state(), true, Some("HTTP 500"));

        assert_eq!(view.load_more, LoadMore::Loading);
        assert_eq!(view.error.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn test_build_list_view_json_shape() {
        let mut state = loaded_state();
        state.set_sort(SortKey::PriceDesc);
        let view = build_list_view(&state, false, None);

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["sort_key"], "price-desc");
        assert_eq!(json["load_more"], "ready");
        assert_eq!(json["cards"][0]["title"], "Shirt");
        assert!(json["error"].is_null());
    }

    // ============================================================================
    // detail view tests
    // ============================================================================

    #[test]
    fn test_star_percentage() {
        assert_eq!(star_percentage(3.9), 80);
        assert_eq!(star_percentage(4.1), 80);
        assert_eq!(star_percentage(4.8), 100);
        assert_eq!(star_percentage(2.5), 50);
        assert_eq!(star_percentage(0.0), 0);
        assert_eq!(star_percentage(5.0), 100);
    }

    #[test]
    fn test_split_read_more_long_text() {
        let split = split_read_more(PLACEHOLDER_DESCRIPTION, READ_MORE_AT);

        assert_eq!(split.preview.chars().count(), READ_MORE_AT);
        let remainder = split.remainder.unwrap();
        assert_eq!(
            format!("{}{}", split.preview, remainder),
            PLACEHOLDER_DESCRIPTION
        );
    }

    #[test]
    fn test_split_read_more_short_text() {
        let split = split_read_more("Short description", READ_MORE_AT);

        assert_eq!(split.preview, "Short description");
        assert!(split.remainder.is_none());
    }

    #[test]
    fn test_split_read_more_exact_length() {
        let text = "a".repeat(READ_MORE_AT);
        let split = split_read_more(&text, READ_MORE_AT);

        assert_eq!(split.preview, text);
        assert!(split.remainder.is_none());
    }

    #[test]
    fn test_split_read_more_multibyte() {
        let split = split_read_more("héllo wörld", 3);

        assert_eq!(split.preview, "hél");
        assert_eq!(split.remainder.as_deref(), Some("lo wörld"));
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title("Storefront | Old", "Bag"), "Storefront | Bag");
        assert_eq!(page_title("Storefront", "Bag"), "Storefront | Bag");
        assert_eq!(page_title("", "Bag"), "Bag");
    }

    #[test]
    fn test_build_detail_view() {
        let mut product = create_test_product(7, "White Gold Plated Princess", 9.99, "jewelery");
        product.description = Some("Classic Created Wedding Engagement Ring".to_string());

        let view = build_detail_view(&product, "Storefront");

        assert_eq!(view.id, 7);
        assert_eq!(view.page_title, "Storefront | White Gold Plated Princess");
        assert_eq!(view.price_label, "$9.99");
        assert_eq!(view.rating_count, 120);
        assert_eq!(view.star_percentage, 80);
        assert_eq!(
            view.description.preview,
            "Classic Created Wedding Engagement Ring"
        );
        assert!(view.description.remainder.is_none());
    }

    #[test]
    fn test_build_detail_view_placeholder_description() {
        let product = create_test_product(1, "Shirt", 20.0, "men");

        let view = build_detail_view(&product, "Storefront");

        assert!(PLACEHOLDER_DESCRIPTION.starts_with(&view.description.preview));
        assert!(view.description.remainder.is_some());
    }
}
