//! # knights
//!
//! Scraper for the Knights Restaurants daily specials pages.
//!
//! The site publishes one static HTML page per meal and location. Each menu
//! line lives in its own table cell, with the visual hierarchy expressed
//! through inline `FONT-SIZE` styling instead of markup structure. This
//! crate fetches one page, extracts the cell text in document order, and
//! maps the font-size hints to leading spaces.
//!
//! ## Quick Start
//!
//! ```no_run
//! use knights::{extract_specials, fetch_page, specials_url, Indent, Location, Meal};
//!
//! let url = specials_url(Meal::Lunch, Location::Downtown);
//! let body = fetch_page(&url).unwrap();
//! let specials = extract_specials(body, Indent::FontSize).unwrap();
//! for line in &specials {
//!     println!("{line}");
//! }
//! ```

pub mod error;
pub mod extract;
pub mod fetch;
pub mod render;

pub use error::{Error, Result};
pub use extract::{extract_specials, Indent};
pub use fetch::{fetch_page, specials_url, Location, Meal, BASE_URL};
