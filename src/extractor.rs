use crate::{Product, Result, ScraperError};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

/// Selector of one product card.
pub const LISTING_SELECTOR: &str = ".product-wrapper";
/// Class of the "load more" button on paginated listings.
pub const REVEAL_CONTROL_CLASS: &str = "ecomerce-items-scroll-more";

/// The `ProductExtractor` struct turns product cards of the demo shop into `Product` records.
/// All selectors are compiled once, when the extractor is created.
pub struct ProductExtractor {
    listing: Selector,
    reveal_control: Selector,
    title: Selector,
    description: Selector,
    price: Selector,
    rating_icon: Selector,
    review_count: Selector,
}

impl ProductExtractor {
    /// Creates a new `ProductExtractor` for the demo shop markup.
    pub fn new() -> Result<Self> {
        Ok(Self {
            listing: selector(LISTING_SELECTOR)?,
            reveal_control: selector(&format!(".{REVEAL_CONTROL_CLASS}"))?,
            title: selector(".title")?,
            description: selector(".description")?,
            price: selector(".price")?,
            rating_icon: selector(".ws-icon")?,
            review_count: selector(".ratings > .review-count")?,
        })
    }

    /// Checks whether the document has a "load more" button, i.e. whether some listings are
    /// only revealed through interaction.
    pub fn has_reveal_control(&self, document: &Html) -> bool {
        document.select(&self.reveal_control).next().is_some()
    }

    /// Extracts every product card of the given document, in document order.
    ///
    /// # Arguments
    ///
    /// * `document` - The parsed listing page.
    ///
    /// # Returns
    ///
    /// A `Result` containing all products, or the first extraction error encountered.
    #[instrument(skip_all)]
    pub fn extract_all(&self, document: &Html) -> Result<Vec<Product>> {
        let products = document
            .select(&self.listing)
            .map(|card| self.extract(card))
            .collect::<Result<Vec<_>>>()?;

        debug!(count = products.len(), "Extracted products");
        Ok(products)
    }

    /// Extracts one product from a product card.
    ///
    /// # Arguments
    ///
    /// * `card` - The element matching the listing selector.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Product`, or `MissingField`/`Parse` if the card is broken.
    pub fn extract(&self, card: ElementRef<'_>) -> Result<Product> {
        // The visible title is ellipsized; the attribute carries the full name.
        let title = self
            .first(card, &self.title, "title")?
            .value()
            .attr("title")
            .ok_or(ScraperError::MissingField("title"))?
            .to_string();

        let description = element_text(self.first(card, &self.description, "description")?)
            .replace('\u{a0}', " ");

        let price = parse_price(&element_text(self.first(card, &self.price, "price")?))?;

        let rating = u32::try_from(card.select(&self.rating_icon).count()).map_err(|_| {
            ScraperError::Parse {
                field: "rating",
                value: "icon count".to_string(),
            }
        })?;

        let review_count = self.first(card, &self.review_count, "num_of_reviews")?;
        let num_of_reviews = parse_review_count(&element_text(review_count))?;

        Ok(Product {
            title,
            description,
            price,
            rating,
            num_of_reviews,
        })
    }

    fn first<'a>(
        &self,
        card: ElementRef<'a>,
        selector: &Selector,
        field: &'static str,
    ) -> Result<ElementRef<'a>> {
        card.select(selector)
            .next()
            .ok_or(ScraperError::MissingField(field))
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::InvalidSelector(format!("{css}: {e}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Parses a price such as `$599.99`.
fn parse_price(text: &str) -> Result<f64> {
    let invalid = || ScraperError::Parse {
        field: "price",
        value: text.to_string(),
    };

    let price: f64 = text.replace('$', "").trim().parse().map_err(|_| invalid())?;
    if !price.is_finite() || price < 0.0 {
        return Err(invalid());
    }
    Ok(price)
}

/// Parses the leading number of a review count such as `7 reviews`.
fn parse_review_count(text: &str) -> Result<u32> {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| ScraperError::Parse {
            field: "num_of_reviews",
            value: text.to_string(),
        })
}
