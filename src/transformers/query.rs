use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::Search;

/// Builds the text sent to the image search.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    queries: Vec<String>,
    negative_terms: Vec<String>,
}

impl QueryBuilder {
    pub fn new(search: &Search) -> Self {
        Self {
            queries: search.queries.clone(),
            negative_terms: search.negative_terms.clone(),
        }
    }

    /// The trimmed user query, or a random curated one when it is missing or blank.
    pub fn base_query<R: Rng + ?Sized>(&self, user_query: Option<&str>, rng: &mut R) -> String {
        match user_query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => query.to_string(),
            None => self.queries.choose(rng).cloned().unwrap_or_default(),
        }
    }

    /// Appends every negative term as `-term`.
    pub fn with_negatives(&self, base: &str) -> String {
        std::iter::once(base.to_string())
            .chain(self.negative_terms.iter().map(|term| format!("-{}", term)))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn build<R: Rng + ?Sized>(&self, user_query: Option<&str>, rng: &mut R) -> String {
        self.with_negatives(&self.base_query(user_query, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn builder() -> QueryBuilder {
        QueryBuilder::new(&Config::default().search)
    }

    #[test]
    fn test_user_query_is_trimmed() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            builder().base_query(Some("  phidippus regius \n"), &mut rng),
            "phidippus regius"
        );
    }

    #[test]
    fn test_blank_user_query_picks_curated() {
        let builder = builder();
        let curated = Config::default().search.queries;
        let mut rng = StdRng::seed_from_u64(2);

        for user_query in [None, Some(""), Some("   ")] {
            let query = builder.base_query(user_query, &mut rng);
            assert!(curated.contains(&query), "unexpected query {:?}", query);
        }
    }

    #[test]
    fn test_same_seed_same_pick() {
        let builder = builder();
        let first = builder.base_query(None, &mut StdRng::seed_from_u64(42));
        let second = builder.base_query(None, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_negatives_appended() {
        let mut rng = StdRng::seed_from_u64(3);
        let query = builder().build(Some("maratus"), &mut rng);

        assert!(query.starts_with("maratus -lizard -gecko -iguana"));
        assert!(query.ends_with("-tarantula"));
        assert_eq!(query.split(' ').count(), 13);
    }

    #[test]
    fn test_no_negatives() {
        let builder = QueryBuilder {
            queries: vec!["salticidae".to_string()],
            negative_terms: vec![],
        };
        assert_eq!(builder.build(None, &mut StdRng::seed_from_u64(4)), "salticidae");
    }
}
