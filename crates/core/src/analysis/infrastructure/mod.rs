pub mod cached_analyzer;
pub mod watson_analyzer;
