//! Core data model for embedded pathway-analysis results.
//!
//! An [`Experiment`] composes a sparse assay matrix (features × samples) with
//! its feature names and a [`PathwayRegistry`]: a typed side table holding
//! named pathway-result tables, pathways lists keyed by pathway type, and
//! feature-ranking statistic vectors keyed by result-set name. The registry
//! replaces the unstructured metadata slot a host framework would otherwise
//! provide, so panel code never type-checks metadata contents at runtime.

pub mod embed;

pub use embed::embed_pathway_results;

use anyhow::{Result, anyhow};
use nalgebra_sparse::CsrMatrix;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the label column every embeddable result table must carry.
pub const PATHWAY_COLUMN: &str = "pathway";

/// A column-oriented pathway-result table.
///
/// One row per pathway; label columns hold identifiers and annotations,
/// numeric columns hold scores and significance values. Column insertion
/// order is preserved so the table panel can render columns the way the
/// producing tool ordered them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable<T> {
    n_rows: usize,
    label_columns: Vec<(String, Vec<String>)>,
    numeric_columns: Vec<(String, Vec<T>)>,
}

impl<T> ResultTable<T> {
    /// Create an empty table with a fixed row count.
    pub fn new(n_rows: usize) -> Self {
        ResultTable {
            n_rows,
            label_columns: Vec::new(),
            numeric_columns: Vec::new(),
        }
    }

    /// Number of rows (pathways) in the table.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Append a label (string) column.
    ///
    /// Fails if the column length does not match the table's row count or if
    /// a column with the same name already exists.
    pub fn push_label_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        self.check_new_column(name, values.len())?;
        self.label_columns.push((name.to_string(), values));
        Ok(())
    }

    /// Append a numeric column.
    ///
    /// Fails if the column length does not match the table's row count or if
    /// a column with the same name already exists.
    pub fn push_numeric_column(&mut self, name: &str, values: Vec<T>) -> Result<()> {
        self.check_new_column(name, values.len())?;
        self.numeric_columns.push((name.to_string(), values));
        Ok(())
    }

    fn check_new_column(&self, name: &str, len: usize) -> Result<()> {
        if len != self.n_rows {
            return Err(anyhow!(
                "Column '{}' has {} values but the table has {} rows",
                name,
                len,
                self.n_rows
            ));
        }
        if self.has_column(name) {
            return Err(anyhow!("Column '{}' already exists", name));
        }
        Ok(())
    }

    /// Whether a column with this name exists (label or numeric).
    pub fn has_column(&self, name: &str) -> bool {
        self.label_columns.iter().any(|(n, _)| n == name)
            || self.numeric_columns.iter().any(|(n, _)| n == name)
    }

    /// All column names, label columns first, in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.label_columns
            .iter()
            .map(|(n, _)| n.as_str())
            .chain(self.numeric_columns.iter().map(|(n, _)| n.as_str()))
            .collect()
    }

    /// Values of a label column, if present.
    pub fn label_column(&self, name: &str) -> Option<&[String]> {
        self.label_columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Values of a numeric column, if present.
    pub fn numeric_column(&self, name: &str) -> Option<&[T]> {
        self.numeric_columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// The required `pathway` identifier column, if present.
    pub fn pathway_ids(&self) -> Option<&[String]> {
        self.label_column(PATHWAY_COLUMN)
    }

    /// Row index of a pathway identifier, if present in the `pathway` column.
    pub fn row_of(&self, pathway_id: &str) -> Option<usize> {
        self.pathway_ids()?.iter().position(|p| p == pathway_id)
    }
}

/// One embedded result set: the table plus its class and pathway-type tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedResult<T> {
    /// Class tag of the producing tool, e.g. `"fgsea"`.
    pub class: String,
    /// Pathway-type tag linking the result to a registered pathways list,
    /// e.g. `"GO"`. Results without a type cannot render enrichment curves.
    pub pathway_type: Option<String>,
    /// The result table itself.
    pub table: ResultTable<T>,
}

/// Typed registry of everything embedded on an [`Experiment`].
///
/// Result tables are keyed by result-set name, pathways lists by pathway
/// type (so result sets sharing a pathway universe share one list), and
/// feature statistics by result-set name. All entries overwrite on re-embed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayRegistry<T> {
    result_tables: HashMap<String, EmbeddedResult<T>>,
    pathways_by_type: HashMap<String, HashMap<String, Vec<String>>>,
    feature_stats: HashMap<String, HashMap<String, T>>,
}

impl<T> Default for PathwayRegistry<T> {
    fn default() -> Self {
        PathwayRegistry {
            result_tables: HashMap::new(),
            pathways_by_type: HashMap::new(),
            feature_stats: HashMap::new(),
        }
    }
}

impl<T> PathwayRegistry<T> {
    /// Look up an embedded result set by name.
    pub fn result(&self, name: &str) -> Option<&EmbeddedResult<T>> {
        self.result_tables.get(name)
    }

    /// Names of all embedded result sets, sorted.
    pub fn result_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.result_tables.keys().map(|n| n.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Pathway types with a registered pathways list, sorted.
    pub fn pathway_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.pathways_by_type.keys().map(|n| n.as_str()).collect();
        types.sort_unstable();
        types
    }

    /// The pathways list (pathway id → member feature ids) for a pathway type.
    pub fn pathways(&self, pathway_type: &str) -> Option<&HashMap<String, Vec<String>>> {
        self.pathways_by_type.get(pathway_type)
    }

    /// The feature-ranking statistic vector embedded with a result set.
    pub fn feature_statistics(&self, result_name: &str) -> Option<&HashMap<String, T>> {
        self.feature_stats.get(result_name)
    }

    pub(crate) fn insert_result(&mut self, name: &str, result: EmbeddedResult<T>) {
        self.result_tables.insert(name.to_string(), result);
    }

    pub(crate) fn insert_pathways(
        &mut self,
        pathway_type: &str,
        pathways: HashMap<String, Vec<String>>,
    ) {
        self.pathways_by_type
            .insert(pathway_type.to_string(), pathways);
    }

    pub(crate) fn insert_feature_statistics(&mut self, name: &str, stats: HashMap<String, T>) {
        self.feature_stats.insert(name.to_string(), stats);
    }
}

/// An annotated expression matrix with embedded pathway results.
///
/// Features are rows, samples are columns. The registry is attached by
/// composition and is read-only from the panels' perspective; embedding
/// produces a modified copy rather than mutating in place.
#[derive(Debug, Clone)]
pub struct Experiment<T> {
    assay: CsrMatrix<T>,
    feature_names: Vec<String>,
    registry: PathwayRegistry<T>,
}

impl<T> Experiment<T> {
    /// Create an experiment from an assay matrix and one name per feature row.
    pub fn new(assay: CsrMatrix<T>, feature_names: Vec<String>) -> Result<Self> {
        if assay.nrows() != feature_names.len() {
            return Err(anyhow!(
                "Assay has {} feature rows but {} feature names were given",
                assay.nrows(),
                feature_names.len()
            ));
        }
        Ok(Experiment {
            assay,
            feature_names,
            registry: PathwayRegistry::default(),
        })
    }

    /// The assay matrix (features × samples).
    pub fn assay(&self) -> &CsrMatrix<T> {
        &self.assay
    }

    /// Number of features (assay rows).
    pub fn n_features(&self) -> usize {
        self.assay.nrows()
    }

    /// Number of samples (assay columns).
    pub fn n_samples(&self) -> usize {
        self.assay.ncols()
    }

    /// Feature names, one per assay row.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Whether a feature identifier names a row of the assay.
    pub fn has_feature(&self, name: &str) -> bool {
        self.feature_names.iter().any(|f| f == name)
    }

    /// The embedded pathway-results registry.
    pub fn pathway_results(&self) -> &PathwayRegistry<T> {
        &self.registry
    }

    pub(crate) fn pathway_results_mut(&mut self) -> &mut PathwayRegistry<T> {
        &mut self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_sparse::CooMatrix;

    fn small_experiment() -> Experiment<f64> {
        let mut coo = CooMatrix::new(3, 2);
        coo.push(0, 0, 1.0);
        coo.push(1, 1, 2.0);
        coo.push(2, 0, 3.0);
        let matrix = CsrMatrix::from(&coo);
        Experiment::new(
            matrix,
            vec!["g1".to_string(), "g2".to_string(), "g3".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_experiment_dimension_mismatch() {
        let coo: CooMatrix<f64> = CooMatrix::new(3, 2);
        let matrix = CsrMatrix::from(&coo);
        let result = Experiment::new(matrix, vec!["g1".to_string()]);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("3 feature rows but 1 feature names")
        );
    }

    #[test]
    fn test_experiment_feature_lookup() {
        let experiment = small_experiment();
        assert_eq!(experiment.n_features(), 3);
        assert_eq!(experiment.n_samples(), 2);
        assert!(experiment.has_feature("g2"));
        assert!(!experiment.has_feature("g9"));
    }

    #[test]
    fn test_result_table_columns() {
        let mut table: ResultTable<f64> = ResultTable::new(2);
        table
            .push_label_column(PATHWAY_COLUMN, vec!["GO:1".to_string(), "GO:2".to_string()])
            .unwrap();
        table.push_numeric_column("pval", vec![0.01, 0.2]).unwrap();

        assert_eq!(table.column_names(), vec!["pathway", "pval"]);
        assert_eq!(table.row_of("GO:2"), Some(1));
        assert_eq!(table.row_of("GO:9"), None);
        assert_eq!(table.numeric_column("pval"), Some(&[0.01, 0.2][..]));
        assert!(table.label_column("pval").is_none());
    }

    #[test]
    fn test_result_table_rejects_bad_columns() {
        let mut table: ResultTable<f64> = ResultTable::new(2);
        // Wrong length
        let result = table.push_numeric_column("es", vec![1.0]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("1 values"));

        // Duplicate name
        table.push_numeric_column("es", vec![1.0, 2.0]).unwrap();
        assert!(table.push_numeric_column("es", vec![3.0, 4.0]).is_err());
        assert!(
            table
                .push_label_column("es", vec!["a".to_string(), "b".to_string()])
                .is_err()
        );
    }

    #[test]
    fn test_registry_sorted_listings() {
        let mut registry: PathwayRegistry<f64> = PathwayRegistry::default();
        registry.insert_result(
            "b",
            EmbeddedResult {
                class: "fgsea".to_string(),
                pathway_type: None,
                table: ResultTable::new(0),
            },
        );
        registry.insert_result(
            "a",
            EmbeddedResult {
                class: "fgsea".to_string(),
                pathway_type: None,
                table: ResultTable::new(0),
            },
        );
        assert_eq!(registry.result_names(), vec!["a", "b"]);
        assert!(registry.result("a").is_some());
        assert!(registry.result("c").is_none());
    }
}
