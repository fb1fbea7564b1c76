pub(crate) mod fallback;
pub(crate) mod orchestrator;

pub(crate) use fallback::FallbackSelector;
pub(crate) use orchestrator::Resolver;
