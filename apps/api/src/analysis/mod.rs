// Offer-document legitimacy analysis.
// Pipeline: classify → extract identity → registry lookup → score.
// Registry and text extraction are collaborators behind traits; everything else is pure.

pub mod analyzer;
pub mod catalog;
pub mod classifier;
pub mod document;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod scorer;

#[cfg(test)]
pub mod testing;
