use std::env;

use anyhow::Result;
use reqwest::{Client, Response};
use serde_json::json;

const DEFAULT_URL: &str = "http://localhost:3000";
const SAMPLE_REGION: &str = "Jawa Barat";

#[tokio::main]
async fn main() -> Result<()> {
    let base_url = env::var("FOOD_API_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let base_url = base_url.trim_end_matches('/');
    let client = Client::new();

    show("GET /", client.get(format!("{base_url}/")).send().await?).await?;

    let sample = json!({
        "daerah": SAMPLE_REGION,
        "makanan": "Sate Maranggi",
        "deskripsi": "Sate sapi khas Purwakarta",
    });
    show(
        "POST /foods",
        client
            .post(format!("{base_url}/foods"))
            .json(&sample)
            .send()
            .await?,
    )
    .await?;

    show(
        "GET /foods",
        client.get(format!("{base_url}/foods")).send().await?,
    )
    .await?;

    let mut region_url = reqwest::Url::parse(&format!("{base_url}/foods"))?;
    region_url
        .path_segments_mut()
        .map_err(|()| anyhow::anyhow!("{base_url} cannot be a base URL"))?
        .push(SAMPLE_REGION);
    show(
        &format!("GET /foods/{SAMPLE_REGION}"),
        client.get(region_url).send().await?,
    )
    .await?;

    Ok(())
}

async fn show(label: &str, response: Response) -> Result<()> {
    println!("{label} -> {}", response.status());
    println!("{}", response.text().await?);

    Ok(())
}
