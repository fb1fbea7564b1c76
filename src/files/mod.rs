pub(crate) mod remote;

pub(crate) use remote::ImageFetcher;
