//! Movie record as supplied by the catalog provider.
//!
//! Movies are immutable values: the controller stores, appends and filters
//! them but never edits a received record.

use serde::{Deserialize, Deserializer, Serialize};

/// Poster shown when a movie arrives without a poster URI.
pub const FALLBACK_POSTER: &str = "https://picsum.photos/seed/movie-poster/400/600";

/// Backdrop shown when a movie arrives without a backdrop URI.
pub const FALLBACK_BACKDROP: &str = "https://picsum.photos/seed/movie-bg/1200/800";

/// A single movie in the catalog.
///
/// Field names follow the provider's JSON schema, so a provider answer
/// deserializes directly into `Vec<Movie>`.
///
/// `genre` is kept as the provider's label rather than a [`Genre`](super::Genre):
/// the provider is asked for one of the fixed labels, but a label outside the
/// set must not fail the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "integral_year")]
    pub year: i32,
    pub rating: f64,
    pub description: String,
    pub genre: String,
    pub poster_url: String,
    pub backdrop_url: String,
    pub director: String,
    pub cast: Vec<String>,
    pub runtime: String,
}

impl Movie {
    /// Poster URI, or the shared fallback when the provider sent none.
    #[must_use]
    pub fn poster(&self) -> &str {
        if self.poster_url.trim().is_empty() {
            FALLBACK_POSTER
        } else {
            &self.poster_url
        }
    }

    /// Backdrop URI, or the shared fallback when the provider sent none.
    #[must_use]
    pub fn backdrop(&self) -> &str {
        if self.backdrop_url.trim().is_empty() {
            FALLBACK_BACKDROP
        } else {
            &self.backdrop_url
        }
    }
}

/// Accepts `1999` as well as `1999.0`; JSON-schema "number" fields are
/// frequently emitted as floats.
fn integral_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) {
        #[allow(clippy::cast_possible_truncation)]
        Ok(value as i32)
    } else {
        Err(serde::de::Error::custom(format!("year is not an integer: {value}")))
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str) -> Movie {
    Movie {
        id: id.to_string(),
        title: format!("Movie {id}"),
        year: 2001,
        rating: 7.5,
        description: "A film.".to_string(),
        genre: "Drama".to_string(),
        poster_url: format!("https://picsum.photos/seed/{id}/400/600"),
        backdrop_url: String::new(),
        director: "Someone".to_string(),
        cast: vec!["A".to_string(), "B".to_string()],
        runtime: "2h 1m".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROVIDER_JSON: &str = r#"[{
        "id": "m1",
        "title": "Blade Runner",
        "year": 1982.0,
        "rating": 8.1,
        "description": "Replicants.",
        "genre": "Sci-Fi",
        "poster_url": "",
        "backdrop_url": "https://picsum.photos/seed/br/1200/800",
        "director": "Ridley Scott",
        "cast": ["Harrison Ford", "Rutger Hauer"],
        "runtime": "1h 57m"
    }]"#;

    #[test]
    fn deserializes_provider_answer() {
        let movies: Vec<Movie> = serde_json::from_str(PROVIDER_JSON).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].year, 1982);
        assert_eq!(movies[0].cast, vec!["Harrison Ford", "Rutger Hauer"]);
        assert_eq!(movies[0].poster(), FALLBACK_POSTER);
        assert_eq!(movies[0].backdrop(), "https://picsum.photos/seed/br/1200/800");
    }

    #[test]
    fn rejects_fractional_year() {
        let json = PROVIDER_JSON.replace("1982.0", "1982.5");
        assert!(serde_json::from_str::<Vec<Movie>>(&json).is_err());
    }

    #[test]
    fn rejects_missing_fields() {
        let json = r#"[{"id": "m1", "title": "Untitled"}]"#;
        assert!(serde_json::from_str::<Vec<Movie>>(json).is_err());
    }
}
