pub(crate) mod filter;
pub(crate) mod query;

pub(crate) use filter::CandidateFilter;
pub(crate) use query::QueryBuilder;
