//! Retrieval of the specials pages.
//!
//! The site publishes one static page per meal and location; there is no
//! query surface, just six fixed documents under one base path.

use std::io::Read;
use std::time::Duration;

use crate::error::{Error, Result};

/// All specials pages hang off this path.
pub const BASE_URL: &str = "http://www.knightsrestaurants.com/specials/";

/// Overall bound on one request, connect through body.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Which menu to pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meal {
    Lunch,
    Dinner,
}

/// Which restaurant's page to pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Downtown,
    AnnArbor,
    Jackson,
}

/// Build the page URL for a meal/location pair.
pub fn specials_url(meal: Meal, location: Location) -> String {
    let page = match (meal, location) {
        (Meal::Lunch, Location::Downtown) => "lunch_klm.html",
        (Meal::Dinner, Location::Downtown) => "dinner_klm.html",
        (Meal::Lunch, Location::AnnArbor) => "lunch_kbr.html",
        (Meal::Dinner, Location::AnnArbor) => "dinner_kbr.html",
        (Meal::Lunch, Location::Jackson) => "lunch_krj.html",
        (Meal::Dinner, Location::Jackson) => "dinner_krj.html",
    };
    format!("{BASE_URL}{page}")
}

/// Perform one blocking GET and hand back the body as a byte stream.
///
/// A non-2xx status is an error in its own right; everything else the
/// transport can fail with is wrapped as [`Error::Transport`].
pub fn fetch_page(url: &str) -> Result<Box<dyn Read + Send + Sync + 'static>> {
    let agent = ureq::AgentBuilder::new()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("knights/", env!("CARGO_PKG_VERSION")))
        .build();

    log::debug!("GET {url}");
    match agent.get(url).call() {
        Ok(resp) => Ok(resp.into_reader()),
        Err(ureq::Error::Status(code, _)) => Err(Error::Status(code)),
        Err(e) => Err(Error::Transport(Box::new(e))),
    }
}
