//! The pathway-results table panel.

use crate::data::Experiment;
use crate::panels::{Panel, PanelDimensions, PanelOptions, PanelView, Selection, SelectionKind};
use serde::Serialize;
use single_utilities::traits::FloatOps;

/// Rendered grid data for one embedded result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView<T> {
    /// Name of the embedded result set being displayed.
    pub result_name: String,
    /// Class tag of the producing tool.
    pub class: String,
    /// Column names in display order.
    pub columns: Vec<String>,
    /// One row per pathway, cells ordered like `columns`.
    pub rows: Vec<TableRow<T>>,
    /// Index into `rows` of the selected pathway, if any.
    pub selected_row: Option<usize>,
    /// Supplementary details content for the selected pathway, if a details
    /// renderer is registered.
    pub details: Option<String>,
    pub dimensions: PanelDimensions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow<T> {
    /// The pathway identifier of this row.
    pub pathway: String,
    pub cells: Vec<TableCell<T>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TableCell<T> {
    Label(String),
    Number(T),
    /// A configured column the table does not carry.
    Missing,
}

/// Displays one embedded pathway-result table as a selectable grid.
///
/// The panel is an upstream selection source: the host reports a row click
/// through [`Panel::on_selection_changed`] with a pathway selection, and
/// downstream panels consume either the pathway itself
/// ([`PathwayTablePanel::pathway_selection`]) or the member features of the
/// selected pathway ([`PathwayTablePanel::feature_selection`]).
#[derive(Debug, Clone)]
pub struct PathwayTablePanel {
    result_name: String,
    selected_pathway: Option<String>,
    visible_columns: Option<Vec<String>>,
    dimensions: PanelDimensions,
}

pub(crate) const PATHWAY_TABLE_KIND: &str = "pathway-table";

impl PathwayTablePanel {
    /// Create a panel displaying the result set embedded under `result_name`.
    pub fn new(result_name: &str) -> Self {
        PathwayTablePanel {
            result_name: result_name.to_string(),
            selected_pathway: None,
            visible_columns: None,
            dimensions: PanelDimensions::default(),
        }
    }

    /// Pre-select a pathway row.
    pub fn with_selected_pathway(mut self, pathway_id: &str) -> Self {
        self.selected_pathway = Some(pathway_id.to_string());
        self
    }

    /// Restrict and reorder the displayed columns. Configured columns the
    /// table does not carry are skipped at render time.
    pub fn with_visible_columns(mut self, columns: Vec<String>) -> Self {
        self.visible_columns = Some(columns);
        self
    }

    pub fn with_dimensions(mut self, dimensions: PanelDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn result_name(&self) -> &str {
        &self.result_name
    }

    pub fn selected_pathway(&self) -> Option<&str> {
        self.selected_pathway.as_deref()
    }

    /// The pathway-level selection this panel currently emits.
    pub fn pathway_selection(&self) -> Selection {
        match &self.selected_pathway {
            Some(pathway) => Selection::Pathway(pathway.clone()),
            None => Selection::None,
        }
    }

    /// The feature-level selection this panel currently emits, resolved
    /// through the map function registered for the result's pathway type
    /// (e.g. to highlight member genes in an expression heatmap).
    pub fn feature_selection<T>(
        &self,
        experiment: &Experiment<T>,
        options: &PanelOptions<T>,
    ) -> Selection {
        let Some(pathway) = self.selected_pathway.as_deref() else {
            return Selection::None;
        };
        let Some(result) = experiment.pathway_results().result(&self.result_name) else {
            return Selection::None;
        };
        let Some(pathway_type) = result.pathway_type.as_deref() else {
            return Selection::None;
        };
        match options.map_pathway(pathway_type, pathway, experiment) {
            Some(features) => Selection::Features(features),
            None => Selection::None,
        }
    }
}

impl<T> Panel<T> for PathwayTablePanel
where
    T: FloatOps,
{
    fn kind(&self) -> &'static str {
        PATHWAY_TABLE_KIND
    }

    fn declared_inputs(&self) -> &'static [SelectionKind] {
        &[]
    }

    fn declared_outputs(&self) -> &'static [SelectionKind] {
        &[SelectionKind::Pathway, SelectionKind::Features]
    }

    fn on_selection_changed(&mut self, selection: &Selection) {
        match selection {
            Selection::Pathway(pathway) => self.selected_pathway = Some(pathway.clone()),
            Selection::None => self.selected_pathway = None,
            // Feature-level selections flow downstream, not into the grid.
            Selection::Features(_) => {}
        }
    }

    fn render(&self, experiment: &Experiment<T>, options: &PanelOptions<T>) -> PanelView<T> {
        let Some(result) = experiment.pathway_results().result(&self.result_name) else {
            return PanelView::Placeholder {
                panel: PATHWAY_TABLE_KIND,
                message: format!(
                    "No pathway results named '{}' are embedded in this experiment",
                    self.result_name
                ),
            };
        };
        let table = &result.table;
        let Some(pathway_ids) = table.pathway_ids() else {
            return PanelView::Placeholder {
                panel: PATHWAY_TABLE_KIND,
                message: format!(
                    "Result '{}' has no pathway identifier column",
                    self.result_name
                ),
            };
        };

        let columns: Vec<String> = match &self.visible_columns {
            Some(requested) => requested
                .iter()
                .filter(|c| table.has_column(c))
                .cloned()
                .collect(),
            None => table.column_names().iter().map(|c| c.to_string()).collect(),
        };

        let rows: Vec<TableRow<T>> = pathway_ids
            .iter()
            .enumerate()
            .map(|(row, pathway)| {
                let cells = columns
                    .iter()
                    .map(|column| {
                        if let Some(values) = table.label_column(column) {
                            TableCell::Label(values[row].clone())
                        } else if let Some(values) = table.numeric_column(column) {
                            TableCell::Number(values[row])
                        } else {
                            TableCell::Missing
                        }
                    })
                    .collect();
                TableRow {
                    pathway: pathway.clone(),
                    cells,
                }
            })
            .collect();

        let selected_row = self
            .selected_pathway
            .as_deref()
            .and_then(|pathway| table.row_of(pathway));
        let details = match (selected_row, self.selected_pathway.as_deref()) {
            (Some(_), Some(pathway)) => options.details_for(pathway),
            _ => None,
        };

        PanelView::Table(TableView {
            result_name: self.result_name.clone(),
            class: result.class.clone(),
            columns,
            rows,
            selected_row,
            details,
            dimensions: self.dimensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PATHWAY_COLUMN, ResultTable, embed_pathway_results};
    use nalgebra_sparse::{CooMatrix, CsrMatrix};
    use std::collections::HashMap;

    fn embedded_experiment() -> Experiment<f64> {
        let coo: CooMatrix<f64> = CooMatrix::new(3, 1);
        let matrix = CsrMatrix::from(&coo);
        let experiment = Experiment::new(
            matrix,
            vec!["g1".to_string(), "g2".to_string(), "g3".to_string()],
        )
        .unwrap();

        let mut table = ResultTable::new(2);
        table
            .push_label_column(PATHWAY_COLUMN, vec!["GO:1".to_string(), "GO:2".to_string()])
            .unwrap();
        table.push_numeric_column("es", vec![0.8, -0.4]).unwrap();
        table.push_numeric_column("pval", vec![0.01, 0.3]).unwrap();

        let pathways = HashMap::from([
            ("GO:1".to_string(), vec!["g1".to_string(), "g2".to_string()]),
            ("GO:2".to_string(), vec!["g3".to_string()]),
        ]);
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
    fn test_render_full_table() {
        let experiment = embedded_experiment();
        let options = PanelOptions::new();
        let panel = PathwayTablePanel::new("go");

        let PanelView::Table(view) = panel.render(&experiment, &options) else {
            panic!("Expected a table view");
        };
        assert_eq!(view.class, "fgsea");
        assert_eq!(view.columns, vec!["pathway", "es", "pval"]);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[1].pathway, "GO:2");
        assert_eq!(view.rows[1].cells[1], TableCell::Number(-0.4));
        assert_eq!(view.selected_row, None);
        assert_eq!(view.details, None);
    }

    #[test]
    fn test_render_visible_columns_and_selection() {
        let experiment = embedded_experiment();
        let mut options = PanelOptions::new();
        options.set_details_renderer(|id: &str| format!("term {}", id));

        let panel = PathwayTablePanel::new("go")
            .with_selected_pathway("GO:2")
            .with_visible_columns(vec![
                "pval".to_string(),
                "pathway".to_string(),
                "nonexistent".to_string(),
            ]);

        let PanelView::Table(view) = panel.render(&experiment, &options) else {
            panic!("Expected a table view");
        };
        // Requested order kept, unknown column skipped.
        assert_eq!(view.columns, vec!["pval", "pathway"]);
        assert_eq!(view.rows[0].cells[0], TableCell::Number(0.01));
        assert_eq!(view.selected_row, Some(1));
        assert_eq!(view.details, Some("term GO:2".to_string()));
    }

    #[test]
    fn test_render_missing_result_set() {
        let experiment = embedded_experiment();
        let options = PanelOptions::new();
        let panel = PathwayTablePanel::new("missing");

        match panel.render(&experiment, &options) {
            PanelView::Placeholder { message, .. } => {
                assert!(message.contains("No pathway results named 'missing'"));
            }
            other => panic!("Expected a placeholder, got {:?}", other),
        }
    }

    #[test]
    fn test_selection_updates_and_outputs() {
        let experiment = embedded_experiment();
        let options = PanelOptions::new();
        let mut panel = PathwayTablePanel::new("go");
        assert_eq!(panel.pathway_selection(), Selection::None);

        Panel::<f64>::on_selection_changed(&mut panel, &Selection::Pathway("GO:1".to_string()));
        assert_eq!(
            panel.pathway_selection(),
            Selection::Pathway("GO:1".to_string())
        );
        assert_eq!(
            panel.feature_selection(&experiment, &options),
            Selection::Features(vec!["g1".to_string(), "g2".to_string()])
        );

        // Feature selections do not disturb the grid's own selection.
        Panel::<f64>::on_selection_changed(
            &mut panel,
            &Selection::Features(vec!["g3".to_string()]),
        );
        assert_eq!(panel.selected_pathway(), Some("GO:1"));

        Panel::<f64>::on_selection_changed(&mut panel, &Selection::None);
        assert_eq!(panel.feature_selection(&experiment, &options), Selection::None);
    }

    #[test]
    fn test_selected_pathway_absent_from_table() {
        let experiment = embedded_experiment();
        let options = PanelOptions::new();
        let panel = PathwayTablePanel::new("go").with_selected_pathway("GO:9");

        let PanelView::Table(view) = panel.render(&experiment, &options) else {
            panic!("Expected a table view");
        };
        assert_eq!(view.selected_row, None);
    }
}
