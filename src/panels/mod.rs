//! Panel interfaces, selections and rendered views.
//!
//! The host application owns widgets, layout and reactivity; panels here
//! implement a narrow contract instead of subclassing a framework base class.
//! A [`Panel`] declares which selection kinds it consumes and emits, reacts
//! to selection changes, and renders a typed [`PanelView`] the host turns
//! into an actual widget. Every degraded state renders as
//! [`PanelView::Placeholder`] with a user-visible message; no render path
//! crashes the host.
//!
//! ## Available Panels
//!
//! - **Pathway table** ([`PathwayTablePanel`]): one embedded result table as
//!   a selectable grid, emitting pathway- and feature-level selections
//! - **Enrichment plot** ([`EnrichmentPlotPanel`]): the running-score curve
//!   for the pathway selected upstream

pub mod options;
pub mod plot;
pub mod table;

pub use options::PanelOptions;
pub use plot::{CurveOutcome, EnrichmentPlotPanel, PlotView, curve_for_pathway};
pub use table::{PathwayTablePanel, TableCell, TableRow, TableView};

use crate::data::Experiment;
use serde::Serialize;

/// A selection value travelling between panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Selection {
    /// No active selection.
    None,
    /// A single selected pathway identifier.
    Pathway(String),
    /// A set of selected feature (row) identifiers.
    Features(Vec<String>),
}

/// The kind of selection a panel consumes or emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionKind {
    Pathway,
    Features,
}

/// Host-generic panel width and height, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelDimensions {
    pub width: u32,
    pub height: u32,
}

impl Default for PanelDimensions {
    fn default() -> Self {
        PanelDimensions {
            width: 600,
            height: 400,
        }
    }
}

/// The rendered output of a panel, consumed by the host front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PanelView<T> {
    /// A pathway-results grid.
    Table(TableView<T>),
    /// A running-score enrichment curve.
    Plot(PlotView<T>),
    /// A non-fatal degraded state with an explanatory message.
    Placeholder {
        /// Kind of the panel that degraded.
        panel: &'static str,
        message: String,
    },
}

/// Contract every panel kind implements.
///
/// The host invokes these synchronously on each interaction: a selection or
/// configuration change is followed by a fresh `render`. Rendering is pure
/// with respect to the experiment and options; recomputation is cheap enough
/// to simply restart on every change.
pub trait Panel<T> {
    /// Stable identifier of the panel kind.
    fn kind(&self) -> &'static str;

    /// Selection kinds this panel consumes from upstream panels.
    fn declared_inputs(&self) -> &'static [SelectionKind];

    /// Selection kinds this panel emits to downstream panels.
    fn declared_outputs(&self) -> &'static [SelectionKind];

    /// React to a selection arriving from upstream (or from the panel's own
    /// widget, reported back by the host).
    fn on_selection_changed(&mut self, selection: &Selection);

    /// Produce the panel's current view.
    fn render(&self, experiment: &Experiment<T>, options: &PanelOptions<T>) -> PanelView<T>;
}
