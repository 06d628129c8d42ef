use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::models::UniversityData;

/// Errors that can occur while loading the university dataset
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("CSV parse error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to read dataset file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("No {0} source configured")]
    NotConfigured(&'static str),
}

/// Anything that can produce the university dataset
///
/// Loading never fails outright: an unavailable dataset is an empty one.
pub trait UniversitySource: Send + Sync {
    fn load(&self) -> impl Future<Output = Vec<UniversityData>> + Send;
}

/// Loads universities from the REST API, falling back to a CSV file
///
/// The fallback is sequential with no retries: API first, then CSV, then
/// an empty dataset.
pub struct UniversityLoader {
    api_url: Option<String>,
    csv_source: Option<String>,
    client: Client,
}

impl UniversityLoader {
    /// Create a new loader
    ///
    /// `csv_source` is either an `http(s)://` URL or a local file path.
    pub fn new(
        api_url: Option<String>,
        csv_source: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LoaderError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_url: api_url.filter(|u| !u.trim().is_empty()),
            csv_source: csv_source.filter(|s| !s.trim().is_empty()),
            client,
        })
    }

    /// Fetch the dataset from the REST API
    pub async fn fetch_from_api(&self) -> Result<Vec<UniversityData>, LoaderError> {
        let url = self.api_url.as_deref().ok_or(LoaderError::NotConfigured("API"))?;

        tracing::debug!("Fetching universities from: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(LoaderError::ApiError(format!(
                "Failed to fetch universities: {}",
                response.status()
            )));
        }

        let universities: Vec<UniversityData> = response.json().await?;

        Ok(universities
            .into_iter()
            .filter(|u| !u.name.trim().is_empty())
            .map(fill_location)
            .collect())
    }

    /// Fetch and parse the CSV fallback
    pub async fn fetch_from_csv(&self) -> Result<Vec<UniversityData>, LoaderError> {
        let source = self.csv_source.as_deref().ok_or(LoaderError::NotConfigured("CSV"))?;

        let text = if source.starts_with("http://") || source.starts_with("https://") {
            tracing::debug!("Fetching university CSV from: {}", source);
            let response = self.client.get(source).send().await?;
            if !response.status().is_success() {
                return Err(LoaderError::ApiError(format!(
                    "Failed to fetch CSV: {}",
                    response.status()
                )));
            }
            response.text().await?
        } else {
            tracing::debug!("Reading university CSV from: {}", source);
            tokio::fs::read_to_string(source).await?
        };

        parse_csv(&text)
    }

    /// Load the dataset, API first with CSV fallback
    pub async fn load_universities(&self) -> Vec<UniversityData> {
        match self.fetch_from_api().await {
            Ok(universities) => {
                tracing::info!("Loaded {} universities from API", universities.len());
                return universities;
            }
            Err(LoaderError::NotConfigured(_)) => {
                tracing::debug!("No university API configured, using CSV");
            }
            Err(e) => {
                tracing::warn!("University API failed, falling back to CSV: {}", e);
            }
        }

        match self.fetch_from_csv().await {
            Ok(universities) => {
                tracing::info!("Loaded {} universities from CSV", universities.len());
                universities
            }
            Err(e) => {
                tracing::error!("Failed to load university CSV: {}", e);
                Vec::new()
            }
        }
    }
}

impl UniversitySource for UniversityLoader {
    fn load(&self) -> impl Future<Output = Vec<UniversityData>> + Send {
        self.load_universities()
    }
}

/// Parse CSV rows of `name, url, latitude, longitude, address`
///
/// A header row is skipped when present. Unquoted addresses that spill into
/// extra columns are rejoined. Unparseable coordinates become 0.0.
pub fn parse_csv(text: &str) -> Result<Vec<UniversityData>, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut universities = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let name = record.get(0).unwrap_or("");

        if name.is_empty() || (row == 0 && name.eq_ignore_ascii_case("name")) {
            continue;
        }

        let address = record
            .iter()
            .skip(4)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let (country, city) = split_address(&address);

        universities.push(UniversityData {
            name: name.to_string(),
            url: record.get(1).unwrap_or("").to_string(),
            latitude: parse_coordinate(record.get(2)),
            longitude: parse_coordinate(record.get(3)),
            address,
            country,
            city,
        });
    }

    Ok(universities)
}

/// Derive `(country, city)` from the trailing components of an address
pub fn split_address(address: &str) -> (String, String) {
    let parts: Vec<&str> = address
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let country = parts.last().copied().unwrap_or("").to_string();
    let city = if parts.len() >= 2 {
        parts[parts.len() - 2].to_string()
    } else {
        String::new()
    };

    (country, city)
}

fn parse_coordinate(value: Option<&str>) -> f64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0.0)
}

/// Fill in missing country/city from the address
fn fill_location(mut university: UniversityData) -> UniversityData {
    if university.country.trim().is_empty() || university.city.trim().is_empty() {
        let (country, city) = split_address(&university.address);
        if university.country.trim().is_empty() {
            university.country = country;
        }
        if university.city.trim().is_empty() {
            university.city = city;
        }
    }
    university
}
