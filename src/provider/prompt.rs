//! Prompt text and response schema sent to the generative provider.

use super::backend::MovieQuery;
use serde_json::{json, Value as JsonValue};

/// Fields every movie object must carry, in schema order.
const MOVIE_FIELDS: [&str; 11] = [
    "id",
    "title",
    "year",
    "rating",
    "description",
    "genre",
    "poster_url",
    "backdrop_url",
    "director",
    "cast",
    "runtime",
];

/// Prompt asking for one catalog batch.
///
/// ```
/// use cinemagic::provider::{prompt, MovieQuery};
/// use cinemagic::Genre;
///
/// let text = prompt::catalog_prompt(&MovieQuery::new("heist", Genre::Drama, 12));
/// assert!(text.starts_with("Generate a list of 12 popular movies."));
/// assert!(text.contains("Search query: \"heist\"."));
/// assert!(text.contains("Filter by genre: \"Drama\"."));
/// ```
#[must_use]
pub fn catalog_prompt(query: &MovieQuery) -> String {
    let mut lines = vec![format!("Generate a list of {} popular movies.", query.limit)];

    if let Some(search) = &query.search {
        lines.push(format!("Search query: \"{search}\"."));
    }

    lines.push(match query.genre {
        Some(genre) => format!("Filter by genre: \"{}\".", genre.label()),
        None => "Include a diverse mix of genres.".to_string(),
    });

    lines.push("Make sure the data is realistic. Use unsplash or picsum IDs for poster_url and backdrop_url if you don't have real ones.".to_string());
    lines.push("Return JSON format.".to_string());

    lines.join("\n")
}

/// Prompt asking for movies similar to `title`.
#[must_use]
pub fn recommendation_prompt(title: &str, count: usize) -> String {
    format!("Based on the movie \"{title}\", recommend {count} similar movies in JSON format.")
}

/// JSON schema of the expected answer: an array of fully populated movies.
#[must_use]
pub fn movie_schema() -> JsonValue {
    let properties: serde_json::Map<String, JsonValue> = MOVIE_FIELDS
        .iter()
        .map(|field| {
            let schema = match *field {
                "year" | "rating" => json!({ "type": "NUMBER" }),
                "cast" => json!({ "type": "ARRAY", "items": { "type": "STRING" } }),
                _ => json!({ "type": "STRING" }),
            };
            ((*field).to_string(), schema)
        })
        .collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": properties,
            "required": MOVIE_FIELDS,
        }
    })
}
