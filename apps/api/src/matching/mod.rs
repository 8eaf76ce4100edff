//! Job matching: stop words, the TF-IDF vector index and the recommender.

pub mod handlers;
pub mod index;
pub mod recommender;
pub mod stop_words;
