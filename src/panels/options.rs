//! Pluggable, user-supplied panel callbacks.
//!
//! The host exposes a generic option registry scoped to the data object; the
//! panels use exactly two entries from it: an optional details renderer for
//! the table panel's supplementary content, and pathway-to-feature map
//! functions keyed by pathway type for propagating a pathway-level selection
//! to feature-level panels. Both are plain callables registered by the host
//! application, not subclasses.

use crate::data::Experiment;
use std::collections::HashMap;

/// Renders supplementary descriptive content for a selected pathway,
/// e.g. an ontology-term definition.
pub type DetailsRenderer = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Maps a pathway identifier to the feature (row) identifiers belonging to
/// it on a given experiment. Must be pure: identical inputs yield identical
/// feature sets.
pub type MapFunction<T> = Box<dyn Fn(&str, &Experiment<T>) -> Vec<String> + Send + Sync>;

/// Registry of user-supplied callbacks consumed by the panels.
pub struct PanelOptions<T> {
    details_renderer: Option<DetailsRenderer>,
    map_functions: HashMap<String, MapFunction<T>>,
}

impl<T> Default for PanelOptions<T> {
    fn default() -> Self {
        PanelOptions {
            details_renderer: None,
            map_functions: HashMap::new(),
        }
    }
}

impl<T> PanelOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the details renderer invoked with the selected pathway id.
    pub fn set_details_renderer<F>(&mut self, renderer: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.details_renderer = Some(Box::new(renderer));
    }

    /// Register a map function for one pathway type, replacing any previous
    /// function for that type.
    pub fn register_map_function<F>(&mut self, pathway_type: &str, map: F)
    where
        F: Fn(&str, &Experiment<T>) -> Vec<String> + Send + Sync + 'static,
    {
        self.map_functions.insert(pathway_type.to_string(), Box::new(map));
    }

    /// Whether a map function is registered for a pathway type.
    pub fn has_map_function(&self, pathway_type: &str) -> bool {
        self.map_functions.contains_key(pathway_type)
    }

    /// Details content for a pathway, if a renderer is registered.
    pub fn details_for(&self, pathway_id: &str) -> Option<String> {
        self.details_renderer.as_ref().map(|f| f(pathway_id))
    }

    /// Resolve a pathway to its member feature identifiers.
    ///
    /// A registered map function for the pathway type takes precedence;
    /// otherwise the pathways list embedded under that type is consulted,
    /// keeping only members that name a feature row of the experiment. The
    /// result is sorted and deduplicated, so equal inputs compare equal.
    /// Returns `None` when neither source can resolve the pathway.
    pub fn map_pathway(
        &self,
        pathway_type: &str,
        pathway_id: &str,
        experiment: &Experiment<T>,
    ) -> Option<Vec<String>> {
        let mut features = match self.map_functions.get(pathway_type) {
            Some(map) => map(pathway_id, experiment),
            None => experiment
                .pathway_results()
                .pathways(pathway_type)?
                .get(pathway_id)?
                .iter()
                .filter(|f| experiment.has_feature(f))
                .cloned()
                .collect(),
        };
        features.sort_unstable();
        features.dedup();
        Some(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PATHWAY_COLUMN, ResultTable, embed_pathway_results};
    use nalgebra_sparse::{CooMatrix, CsrMatrix};

    fn experiment_with_pathways() -> Experiment<f64> {
        let coo: CooMatrix<f64> = CooMatrix::new(3, 1);
        let matrix = CsrMatrix::from(&coo);
        let experiment = Experiment::new(
            matrix,
            vec!["g1".to_string(), "g2".to_string(), "g3".to_string()],
        )
        .unwrap();

        let mut table = ResultTable::new(1);
        table
            .push_label_column(PATHWAY_COLUMN, vec!["GO:1".to_string()])
            .unwrap();
        let pathways = HashMap::from([(
            "GO:1".to_string(),
            // "g9" is not a feature of the experiment and must be dropped.
            vec!["g2".to_string(), "g1".to_string(), "g9".to_string()],
        )]);
        embed_pathway_results(
            &experiment,
            table,
            "go",
            "fgsea",
            Some("GO"),
            Some(pathways),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_fallback_to_embedded_pathways() {
        let experiment = experiment_with_pathways();
        let options: PanelOptions<f64> = PanelOptions::new();

        let features = options.map_pathway("GO", "GO:1", &experiment).unwrap();
        assert_eq!(features, vec!["g1".to_string(), "g2".to_string()]);
        assert!(options.map_pathway("GO", "GO:9", &experiment).is_none());
        assert!(options.map_pathway("KEGG", "GO:1", &experiment).is_none());
    }

    #[test]
    fn test_registered_map_function_takes_precedence() {
        let experiment = experiment_with_pathways();
        let mut options: PanelOptions<f64> = PanelOptions::new();
        options.register_map_function("GO", |_: &str, _: &Experiment<f64>| {
            vec!["g3".to_string(), "g3".to_string()]
        });

        assert!(options.has_map_function("GO"));
        let features = options.map_pathway("GO", "GO:1", &experiment).unwrap();
        // Deduplicated set semantics.
        assert_eq!(features, vec!["g3".to_string()]);
    }

    #[test]
    fn test_map_function_is_pure() {
        let experiment = experiment_with_pathways();
        let options: PanelOptions<f64> = PanelOptions::new();

        let first = options.map_pathway("GO", "GO:1", &experiment);
        let second = options.map_pathway("GO", "GO:1", &experiment);
        assert_eq!(first, second);
    }

    #[test]
    fn test_details_renderer() {
        let mut options: PanelOptions<f64> = PanelOptions::new();
        assert!(options.details_for("GO:1").is_none());

        options.set_details_renderer(|id: &str| format!("definition of {}", id));
        assert_eq!(
            options.details_for("GO:1"),
            Some("definition of GO:1".to_string())
        );
    }
}
