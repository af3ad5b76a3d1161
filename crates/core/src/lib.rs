//! Core library for storefront
//!
//! This crate implements the **Functional Core** of the storefront application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`storefront_core`** (this crate): Pure transformation functions with zero I/O
//! - **`storefront`**: HTTP, terminal output and the event loop (the Imperative Shell)
//!
//! Every function here is deterministic: the same collection and view options
//! always produce the same display list, so the whole pipeline is tested with
//! fixture data and no mocking.
//!
//! # Module Organization
//!
//! - [`product`]: Product records as returned by the store API
//! - [`catalog`]: The filter/sort engine that turns a collection into a display list
//! - [`state`]: Accumulated products and the active search, filters and sort key
//! - [`debounce`]: Ticket bookkeeping for debounced search input
//! - [`view`]: Presentation descriptions for the list and detail pages
//!
//! # Example Usage
//!
//! ```rust
//! use storefront_core::catalog::SortKey;
//! use storefront_core::product::{Product, Rating};
//! use storefront_core::state::CollectionState;
//! use storefront_core::view::build_list_view;
//!
//! let mut state = CollectionState::new();
//! state.merge_page(
//!     1,
//!     vec![Product {
//!         id: 1,
//!         title: "Shirt".to_string(),
//!         price: 20.0,
//!         category: "men".to_string(),
//!         image: "https://fakestoreapi.com/img/1.jpg".to_string(),
//!         rating: Rating { rate: 4.1, count: 259 },
//!         description: None,
//!     }],
//! );
//! state.set_sort(SortKey::PriceAsc);
//!
//! let view = build_list_view(&state, false, None);
//! assert_eq!(view.results_label, "1 Results");
//! ```

pub mod catalog;
pub mod debounce;
pub mod product;
pub mod state;
pub mod view;
