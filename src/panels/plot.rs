//! The enrichment curve panel.

use crate::data::Experiment;
use crate::enrichment::{EnrichmentCurve, running_score};
use crate::panels::{Panel, PanelDimensions, PanelOptions, PanelView, Selection, SelectionKind};
use serde::Serialize;
use single_utilities::traits::FloatOps;

/// Rendered curve data for one pathway of one result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotView<T> {
    pub result_name: String,
    pub pathway: String,
    /// Weighting exponent the curve was computed with.
    pub weight: T,
    pub curve: EnrichmentCurve<T>,
    pub dimensions: PanelDimensions,
}

/// Outcome of resolving curve data for a pathway.
///
/// The two degraded variants are non-fatal by design: the panel renders them
/// as placeholder views with the message, never as an application error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CurveOutcome<T> {
    /// Curve data is available.
    Ready(EnrichmentCurve<T>),
    /// Auxiliary data (result set, pathway type, pathways list or feature
    /// statistics) is not registered.
    Unavailable { message: String },
    /// The pathway is absent from the registered pathways list, or none of
    /// its members occur in the statistic vector.
    NotFound { pathway: String },
}

/// Resolve and recompute the enrichment curve for one pathway.
///
/// A result set is only eligible when its pathway type matches both a
/// registered pathways list and a registered feature-statistic vector;
/// anything missing yields [`CurveOutcome::Unavailable`] rather than an
/// error.
pub fn curve_for_pathway<T>(
    experiment: &Experiment<T>,
    result_name: &str,
    pathway_id: &str,
    weight: T,
) -> CurveOutcome<T>
where
    T: FloatOps,
{
    let registry = experiment.pathway_results();
    let Some(result) = registry.result(result_name) else {
        return CurveOutcome::Unavailable {
            message: format!("No pathway results named '{}' are embedded", result_name),
        };
    };
    let Some(pathway_type) = result.pathway_type.as_deref() else {
        return CurveOutcome::Unavailable {
            message: format!(
                "Result '{}' has no pathway type, so no pathways list applies",
                result_name
            ),
        };
    };
    let Some(pathways) = registry.pathways(pathway_type) else {
        return CurveOutcome::Unavailable {
            message: format!("No pathways list is registered for type '{}'", pathway_type),
        };
    };
    let Some(stats) = registry.feature_statistics(result_name) else {
        return CurveOutcome::Unavailable {
            message: format!(
                "No feature statistics are registered for result '{}'",
                result_name
            ),
        };
    };
    let Some(members) = pathways.get(pathway_id) else {
        return CurveOutcome::NotFound {
            pathway: pathway_id.to_string(),
        };
    };
    if !members.iter().any(|m| stats.contains_key(m)) {
        return CurveOutcome::NotFound {
            pathway: pathway_id.to_string(),
        };
    }

    match running_score(stats, members, weight) {
        Ok(curve) => CurveOutcome::Ready(curve),
        Err(err) => CurveOutcome::Unavailable {
            message: err.to_string(),
        },
    }
}

/// Displays the running-score enrichment curve for the pathway selected in
/// an upstream pathway table.
#[derive(Debug, Clone)]
pub struct EnrichmentPlotPanel<T> {
    result_name: String,
    pathway_id: Option<String>,
    weight: T,
    dimensions: PanelDimensions,
}

pub(crate) const ENRICHMENT_PLOT_KIND: &str = "enrichment-plot";

impl<T> EnrichmentPlotPanel<T>
where
    T: FloatOps,
{
    /// Create a panel for the result set embedded under `result_name`, with
    /// the classic weighting exponent of one.
    pub fn new(result_name: &str) -> Self {
        EnrichmentPlotPanel {
            result_name: result_name.to_string(),
            pathway_id: None,
            weight: T::one(),
            dimensions: PanelDimensions::default(),
        }
    }

    /// Pre-select the pathway to display.
    pub fn with_pathway(mut self, pathway_id: &str) -> Self {
        self.pathway_id = Some(pathway_id.to_string());
        self
    }

    /// Override the weighting exponent (zero for the unweighted statistic).
    pub fn with_weight(mut self, weight: T) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_dimensions(mut self, dimensions: PanelDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn result_name(&self) -> &str {
        &self.result_name
    }

    pub fn pathway_id(&self) -> Option<&str> {
        self.pathway_id.as_deref()
    }

    pub fn weight(&self) -> T {
        self.weight
    }
}

impl<T> Panel<T> for EnrichmentPlotPanel<T>
where
    T: FloatOps,
{
    fn kind(&self) -> &'static str {
        ENRICHMENT_PLOT_KIND
    }

    fn declared_inputs(&self) -> &'static [SelectionKind] {
        &[SelectionKind::Pathway]
    }

    fn declared_outputs(&self) -> &'static [SelectionKind] {
        &[]
    }

    fn on_selection_changed(&mut self, selection: &Selection) {
        match selection {
            Selection::Pathway(pathway) => self.pathway_id = Some(pathway.clone()),
            Selection::None => self.pathway_id = None,
            Selection::Features(_) => {}
        }
    }

    fn render(&self, experiment: &Experiment<T>, _options: &PanelOptions<T>) -> PanelView<T> {
        let Some(pathway_id) = self.pathway_id.as_deref() else {
            return PanelView::Placeholder {
                panel: ENRICHMENT_PLOT_KIND,
                message: "No pathway is selected".to_string(),
            };
        };

        match curve_for_pathway(experiment, &self.result_name, pathway_id, self.weight) {
            CurveOutcome::Ready(curve) => PanelView::Plot(PlotView {
                result_name: self.result_name.clone(),
                pathway: pathway_id.to_string(),
                weight: self.weight,
                curve,
                dimensions: self.dimensions,
            }),
            CurveOutcome::Unavailable { message } => PanelView::Placeholder {
                panel: ENRICHMENT_PLOT_KIND,
                message,
            },
            CurveOutcome::NotFound { pathway } => PanelView::Placeholder {
                panel: ENRICHMENT_PLOT_KIND,
                message: format!("Pathway '{}' was not found in the pathways list", pathway),
            },
        }
    }
}
