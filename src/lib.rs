#![warn(clippy::all, rust_2018_idioms)]

//! Comparison plots of precomputed neutrino cross section curves.
//!
//! A run reads a "current" curve source and optionally a "reference" one,
//! walks every directory of the current source, trims the reference curves
//! for display, computes current/reference ratios and collects one page per
//! category into a [`report::Report`], which [`render`] writes as HTML, JSON
//! or YAML.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod curve;
pub mod egui_plot_stuff;
pub mod error;
pub mod render;
pub mod report;
pub mod store;

pub use error::XSecError;
