//! Verse references, records, the local corpus, and audio URLs.

mod audio;
mod corpus;
mod types;

pub use audio::AudioUrlTemplate;
pub use corpus::{Corpus, CorpusError};
pub use types::*;
