use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenreCount {
    pub name: String,
    pub movie_count: i64,
}

/// Tallies genres across movies' comma-separated genre fields.
/// Most used first, ties broken by name.
pub fn count_genres<I, S>(values: I) -> Vec<GenreCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, i64> = HashMap::new();
    for value in values {
        for name in value.as_ref().split(',').map(str::trim).filter(|n| !n.is_empty()) {
            *counts.entry(name.to_string()).or_default() += 1;
        }
    }

    let mut genres: Vec<GenreCount> = counts
        .into_iter()
        .map(|(name, movie_count)| GenreCount { name, movie_count })
        .collect();
    genres.sort_by(|a, b| b.movie_count.cmp(&a.movie_count).then_with(|| a.name.cmp(&b.name)));
    genres
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_counts() {
        let genres = count_genres(["Drama, Crime", "Drama", " Sci-Fi ,Drama", "Crime,,"]);
        assert_eq!(
            genres,
            vec![
                GenreCount { name: "Drama".into(), movie_count: 3 },
                GenreCount { name: "Crime".into(), movie_count: 2 },
                GenreCount { name: "Sci-Fi".into(), movie_count: 1 },
            ]
        );
    }

    #[test]
    fn ties_sort_by_name() {
        let genres = count_genres(["Western", "Comedy"]);
        assert_eq!(genres[0].name, "Comedy");
        assert_eq!(genres[1].name, "Western");
    }

    #[test]
    fn nothing_to_count() {
        assert!(count_genres(Vec::<String>::new()).is_empty());
        assert!(count_genres([" , "]).is_empty());
    }
}
