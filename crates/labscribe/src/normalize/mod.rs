//! Deduplication and catalog-driven normalization of candidate tests.

mod dedupe;
mod normalizer;

pub use dedupe::dedupe;
pub use normalizer::{
    test_confidence, NormalizationResult, Normalizer, SingleNormalization,
    BATCH_NORMALIZATION_CONFIDENCE,
};
