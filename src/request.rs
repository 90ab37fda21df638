use reqwest::Client;

use crate::{Result, LISTING_URL, SITE_RECORDS_URL};

/// Requests the listing page used for site discovery.
pub(crate) async fn fetch_listing_page(client: &Client) -> Result<String> {
    let res = client.get(LISTING_URL).send().await?;
    let html = res.text().await?;
    Ok(html)
}

/// Requests one site's dispensation page, id passed as the `myID` query
/// parameter.
pub(crate) async fn fetch_site_page(client: &Client, site_id: u32) -> Result<String> {
    let res = client
        .get(SITE_RECORDS_URL)
        .query(&[("myID", site_id)])
        .send()
        .await?;
    let html = res.text().await?;
    Ok(html)
}
