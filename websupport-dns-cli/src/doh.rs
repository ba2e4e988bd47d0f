//! Public DNS-over-HTTPS TXT lookup (Google JSON API)

use std::time::Duration;

use serde::Deserialize;

const RESOLVE_URL: &str = "https://dns.google/resolve";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ResolveResponse {
    #[serde(rename = "Answer", default)]
    answer: Vec<Answer>,
}

#[derive(Debug, Deserialize)]
struct Answer {
    #[serde(default)]
    data: String,
}

/// Whether any public TXT answer for `name` contains `expected`.
///
/// Lookup failures count as "not visible yet".
pub async fn txt_visible(name: &str, expected: &str) -> bool {
    match lookup_txt(name).await {
        Ok(values) => values.iter().any(|v| v.contains(expected)),
        Err(e) => {
            tracing::debug!("DoH lookup for {name} failed: {e:#}");
            false
        }
    }
}

async fn lookup_txt(name: &str) -> anyhow::Result<Vec<String>> {
    let client = reqwest::Client::builder()
        .timeout(LOOKUP_TIMEOUT)
        .build()?;

    let response: ResolveResponse = client
        .get(RESOLVE_URL)
        .query(&[("name", name), ("type", "TXT")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response.answer.into_iter().map(|a| a.data).collect())
}
