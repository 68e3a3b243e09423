//! Source text adapters
//!
//! - [`UsfmCorpus`]: translated verse text parsed from a USFM book file
//! - [`CsvGroundTruth`]: expert face annotations from a CSV table

mod ground_truth;
mod usfm;

pub use ground_truth::CsvGroundTruth;
pub use usfm::UsfmCorpus;
