use crate::{PageJob, Result};
use url::Url;

/// Path of the "load more" variant of the demo shop, relative to the site root.
const HOME_PATH: &str = "test-sites/e-commerce/more/";

/// Builds the fixed list of pages to scrape, in the order they are processed.
///
/// Paths are resolved as URL references, so a trailing slash on a parent decides whether the
/// child nests under it (`computers/` + `laptops`) or replaces its last segment.
pub fn page_jobs(base_url: &str) -> Result<Vec<PageJob>> {
    let base = Url::parse(base_url)?;
    let home = base.join(HOME_PATH)?;
    let computers = home.join("computers/")?;
    let laptops = computers.join("laptops")?;
    let tablets = computers.join("tablets")?;
    let phones = home.join("phones/")?;
    let touch = phones.join("touch")?;

    let table = [
        ("home", home),
        ("computers", computers),
        ("laptops", laptops),
        ("tablets", tablets),
        ("phones", phones),
        ("touch", touch),
    ];

    Ok(table
        .into_iter()
        .map(|(name, url)| PageJob {
            name,
            url: url.into(),
        })
        .collect())
}
