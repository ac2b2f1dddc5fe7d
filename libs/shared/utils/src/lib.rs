pub mod extractor;
pub mod test_utils;

pub use extractor::JsonBody;
