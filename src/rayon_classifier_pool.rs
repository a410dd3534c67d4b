//! Parallel record classification using Rayon.
//!
//! This module provides [`classify_batch_parallel`] which leverages Rayon's
//! work-stealing thread pool to classify many records at once. Every engine
//! in the classifier is pure and `Send + Sync`, so records are independent
//! tasks and one shared classifier serves all of them.
//!
//! # Examples
//!
//! ```
//! use marc_facets::rayon_classifier_pool::classify_batch_parallel;
//! use marc_facets::{Leader, Record, RecordClassifier};
//!
//! let records = vec![Record::new(Leader::default()); 3];
//! let classifier = RecordClassifier::new();
//!
//! let facets = classify_batch_parallel(&records, &classifier);
//! assert_eq!(facets.len(), 3);
//! ```

use crate::classifier::{RecordClassifier, RecordFacets};
use crate::record::Record;

/// Classify a batch of records in parallel using Rayon.
///
/// Each record is an independent task on Rayon's thread pool (respecting
/// `RAYON_NUM_THREADS`). Output order matches input order, and within each
/// result the engines' emission order is preserved exactly as in the
/// sequential path.
///
/// # Arguments
///
/// * `records` - The records to classify
/// * `classifier` - A shared classifier used by every task
///
/// # Returns
///
/// One [`RecordFacets`] per input record, in input order.
#[must_use]
pub fn classify_batch_parallel(
    records: &[Record],
    classifier: &RecordClassifier,
) -> Vec<RecordFacets> {
    use rayon::prelude::*;

    records
        .par_iter()
        .map(|record| classifier.classify(record))
        .collect()
}

/// Classify a limited batch of records in parallel.
///
/// Like [`classify_batch_parallel`], but stops after `limit` records.
/// Useful for pipeline stages that need to control batch size.
///
/// # Arguments
///
/// * `records` - The records to classify
/// * `classifier` - A shared classifier used by every task
/// * `limit` - Maximum number of records to classify
///
/// # Returns
///
/// Up to `limit` results, in input order.
#[must_use]
pub fn classify_batch_parallel_limited(
    records: &[Record],
    classifier: &RecordClassifier,
    limit: usize,
) -> Vec<RecordFacets> {
    let capped = limit.min(records.len());
    classify_batch_parallel(&records[..capped], classifier)
}
