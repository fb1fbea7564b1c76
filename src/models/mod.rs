pub mod candidate;
pub mod image;
pub mod response;

pub use candidate::{RawImageResult, SearchCandidate};
pub use image::{FetchedImage, ImageSource, Resolution};
pub use response::{ErrorBody, ImageMetadata};
