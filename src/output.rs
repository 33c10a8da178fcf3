use crate::{Product, Result};
use std::io;
use std::path::Path;
use tracing::instrument;

/// Column names of every products file, in order.
pub const HEADER: [&str; 5] = ["title", "description", "price", "rating", "num_of_reviews"];

/// Writes the products to a CSV file, replacing any previous file at `path`.
#[instrument(skip(products), fields(products = products.len()))]
pub fn write_products(path: &Path, products: &[Product]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_products_to(file, products)
}

/// Writes a header row and one row per product to `writer`, each ending in `\r\n`.
///
/// The header is written even when there are no products.
pub fn write_products_to<W: io::Write>(writer: W, products: &[Product]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for product in products {
        wtr.serialize(product)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads a products file written by [`write_products`].
pub fn read_products(path: &Path) -> Result<Vec<Product>> {
    let file = std::fs::File::open(path)?;
    read_products_from(file)
}

pub fn read_products_from<R: io::Read>(reader: R) -> Result<Vec<Product>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let products = rdr.deserialize().collect::<std::result::Result<Vec<Product>, _>>()?;
    Ok(products)
}
