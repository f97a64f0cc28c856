//! Embedding pathway-analysis results into an [`Experiment`].
//!
//! Embedding is copy-and-replace: the input experiment is borrowed, validated
//! first, and a modified copy is returned. A failed call leaves the caller's
//! object untouched and nothing partially inserted.

use crate::data::{EmbeddedResult, Experiment, PATHWAY_COLUMN, ResultTable};
use anyhow::{Result, anyhow};
use std::collections::HashMap;

/// Embed a pathway-result table on an experiment under a result-set name.
///
/// The table must carry a `pathway` label column. If `pathways` is supplied,
/// `pathway_type` must be supplied too; the pathways list is stored under the
/// type tag so result sets sharing a pathway universe can share one list, and
/// `feature_stats` (the per-feature ranking statistic used by the upstream
/// enrichment test) is stored under the result-set name. Re-embedding under
/// an existing name or pathway type overwrites that entry.
///
/// # Arguments
///
/// * `experiment` - Target data object; borrowed, never mutated
/// * `table` - Pathway-result table, one row per pathway
/// * `name` - Result-set name the table is stored under
/// * `class` - Class tag of the producing tool, e.g. `"fgsea"`
/// * `pathway_type` - Tag of the pathway universe, e.g. `"GO"`
/// * `pathways` - Pathway id → member feature ids
/// * `feature_stats` - Feature id → ranking statistic
///
/// # Returns
///
/// A copy of the experiment with the entries inserted.
///
/// # Example
///
/// ```
/// use nalgebra_sparse::{CooMatrix, CsrMatrix};
/// use pathway_panels::data::{Experiment, ResultTable, embed_pathway_results};
///
/// let assay = CsrMatrix::from(&CooMatrix::<f64>::new(2, 1));
/// let experiment = Experiment::new(assay, vec!["g1".into(), "g2".into()]).unwrap();
///
/// let mut table = ResultTable::new(1);
/// table.push_label_column("pathway", vec!["GO:1".into()]).unwrap();
/// table.push_numeric_column("pval", vec![0.02]).unwrap();
///
/// let embedded =
///     embed_pathway_results(&experiment, table, "go-results", "fgsea", None, None, None)
///         .unwrap();
/// assert!(embedded.pathway_results().result("go-results").is_some());
/// ```
pub fn embed_pathway_results<T>(
    experiment: &Experiment<T>,
    table: ResultTable<T>,
    name: &str,
    class: &str,
    pathway_type: Option<&str>,
    pathways: Option<HashMap<String, Vec<String>>>,
    feature_stats: Option<HashMap<String, T>>,
) -> Result<Experiment<T>>
where
    T: Clone,
{
    if name.is_empty() {
        return Err(anyhow!("Result-set name cannot be empty"));
    }
    if table.pathway_ids().is_none() {
        return Err(anyhow!(
            "Result table for '{}' must contain a '{}' column",
            name,
            PATHWAY_COLUMN
        ));
    }
    if pathways.is_some() && pathway_type.is_none() {
        return Err(anyhow!(
            "A pathways list for '{}' requires a pathway type",
            name
        ));
    }

    let mut embedded = experiment.clone();
    let registry = embedded.pathway_results_mut();

    registry.insert_result(
        name,
        EmbeddedResult {
            class: class.to_string(),
            pathway_type: pathway_type.map(|t| t.to_string()),
            table,
        },
    );
    if let (Some(pathway_type), Some(pathways)) = (pathway_type, pathways) {
        registry.insert_pathways(pathway_type, pathways);
    }
    if let Some(stats) = feature_stats {
        registry.insert_feature_statistics(name, stats);
    }

    Ok(embedded)
}
