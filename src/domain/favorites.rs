//! The watchlist: an insertion-ordered set of movie ids.

use serde::{Deserialize, Serialize};

/// Set of favorite movie ids.
///
/// Ids keep the order in which they were added so the persisted array reads
/// the way the user built it. Membership only changes through
/// [`Favorites::toggle`], which keeps the set free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(Vec<String>);

impl Favorites {
    /// Builds a set from restored ids, dropping repeats.
    #[must_use]
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut favorites = Self::default();
        for id in ids {
            if !favorites.contains(&id) {
                favorites.0.push(id);
            }
        }
        favorites
    }

    /// Adds `id` when absent, removes it when present.
    ///
    /// Returns `true` if the id is a favorite afterwards.
    ///
    /// ```
    /// use cinemagic::domain::Favorites;
    ///
    /// let mut favorites = Favorites::default();
    /// assert!(favorites.toggle("m1"));
    /// assert!(!favorites.toggle("m1"));
    /// assert!(favorites.is_empty());
    /// ```
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.0.iter().position(|fid| fid == id) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(id.to_string());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|fid| fid == id)
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original() {
        let original = Favorites::from_ids(vec!["a".to_string(), "b".to_string()]);
        for id in ["a", "b", "c"] {
            let mut favorites = original.clone();
            favorites.toggle(id);
            favorites.toggle(id);
            assert_eq!(favorites.ids().len(), original.len());
            assert!(favorites.ids().iter().all(|fid| original.contains(fid)));
        }
    }

    #[test]
    fn restore_drops_duplicates() {
        let favorites = Favorites::from_ids(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(favorites.ids(), ["a", "b"]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let favorites = Favorites::from_ids(vec!["m1".into(), "m2".into()]);
        assert_eq!(serde_json::to_string(&favorites).unwrap(), r#"["m1","m2"]"#);
    }
}
