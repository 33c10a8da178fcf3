use serde::{Deserialize, Serialize};

/// One scraped product listing.
///
/// The field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Number of filled rating icons on the listing.
    pub rating: u32,
    pub num_of_reviews: u32,
}

/// A target page and the name its CSV file is written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageJob {
    pub name: &'static str,
    pub url: String,
}

impl PageJob {
    /// The file name this job's products are written to.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}
