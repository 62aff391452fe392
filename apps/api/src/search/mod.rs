// Job search forwarding.
// Scraping itself happens in an external service reached through `JobScraper`.

pub mod catalog;
pub mod company;
pub mod handlers;
pub mod scraper;
