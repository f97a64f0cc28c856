//! # pathway-panels
//!
//! Interactive pathway-analysis panels for annotated expression matrices.
//!
//! This crate attaches pathway-level enrichment results (e.g. produced by an
//! fgsea-style preranked test) to an in-memory expression data object, and
//! provides the data-access and computation layer behind two interactive
//! panels: a sortable, selectable pathway-results table and a running-score
//! enrichment curve for a single selected pathway. Rendering, layout and
//! reactivity belong to the host application; this crate supplies typed
//! views, selection values and placeholder states the host consumes.
//!
//! ## Core Features
//!
//! - **Result Embedding**: store named pathway-result tables, pathways lists
//!   and feature-ranking statistics on an [`data::Experiment`] with
//!   copy-and-replace semantics
//! - **Enrichment Curves**: recompute the classic weighted running-score
//!   statistic for one pathway over the ranked feature list
//! - **Panel Interfaces**: a [`panels::Panel`] trait with declared selection
//!   inputs/outputs, plus pluggable details renderers and pathway-to-feature
//!   map functions
//!
//! ## Quick Start
//!
//! Embed a result table with [`data::embed_pathway_results`], configure a
//! [`panels::PathwayTablePanel`] and an [`panels::EnrichmentPlotPanel`] on the
//! same result-set name, and forward the table's pathway selection to the
//! plot. Missing auxiliary data degrades to placeholder views, never panics.
//!
//! ## Module Organization
//!
//! - **[`data`]**: result tables, the pathway registry and the experiment object
//! - **[`enrichment`]**: running-score enrichment curve computation
//! - **[`panels`]**: panel trait, selections, views and pluggable callbacks

pub mod data;
pub mod enrichment;
pub mod panels;
