//! Supplementary survey questions fetched over HTTP

mod client;
mod fetcher;
mod traits;

pub use client::{HttpQuestionSource, DEFAULT_ENDPOINT};
pub use fetcher::{QuestionFetcher, QuestionUpdate};
pub use traits::QuestionSource;

#[cfg(test)]
pub use client::FetchError;
#[cfg(test)]
pub use traits::MockQuestionSource;
