use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;

use super::frame::{Frame, FrameScale};
use super::model::{Page, Pane, Report, Series, TitlePage};
use crate::catalog::{CategorySpec, DirectoryTag, categories};
use crate::config::ReportConfig;
use crate::curve::{Curve, CurveTrimmer, TrimError, ratio};
use crate::egui_plot_stuff::multi_graph::{LegendGlyph, MultiGraph};
use crate::egui_plot_stuff::style::DrawMode;
use crate::store::CurveStore;

/// A source path and the label it is shown under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLabel {
    pub path: PathBuf,
    pub label: String,
}

/// Everything a run needs to know besides the curves themselves.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub current: SourceLabel,
    pub reference: Option<SourceLabel>,
    pub config: ReportConfig,
}

impl RunContext {
    pub fn reference_label(&self) -> &str {
        self.reference
            .as_ref()
            .map_or("reference", |r| r.label.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub directories: usize,
    pub skipped_directories: usize,
    pub pages: usize,
    pub skipped_categories: usize,
}

struct DirectoryContext<'d> {
    name: &'d str,
    tag: DirectoryTag,
}

/// Curves of one category after the open and trim steps.
struct OpenCategory {
    current: Arc<Curve>,
    reference: Option<Arc<Curve>>,
    trimmed: Option<Curve>,
}

/// Walks directories and categories and appends one page per category that
/// the current source provides.
pub struct ReportBuilder<'a> {
    context: &'a RunContext,
    trimmer: CurveTrimmer,
    main_scale: FrameScale,
    ratio_scale: FrameScale,
    report: Report,
    summary: RunSummary,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(context: &'a RunContext) -> Result<Self, TrimError> {
        let config = &context.config;
        let trimmer = config.trimmer()?;

        let mut lines = vec![
            config.title.clone(),
            "Plotting data from:".to_owned(),
            context.current.path.display().to_string(),
        ];
        if let Some(reference) = &context.reference {
            lines.push("Comparing with reference data (markers) from:".to_owned());
            lines.push(reference.path.display().to_string());
        }

        Ok(ReportBuilder {
            context,
            trimmer,
            main_scale: FrameScale::from_config(config, config.main_pane),
            ratio_scale: FrameScale::from_config(config, config.ratio_pane),
            report: Report {
                title_page: TitlePage { lines },
                pages: Vec::new(),
            },
            summary: RunSummary::default(),
        })
    }

    /// Adds the pages of one source directory and returns how many were added.
    pub fn add_directory(&mut self, store: &CurveStore, directory: &str) -> usize {
        self.summary.directories += 1;

        let Some(tag) = DirectoryTag::parse(directory) else {
            warn!("Directory '{directory}' names no known probe, skipping it");
            self.summary.skipped_directories += 1;
            return 0;
        };

        info!("Plotting graphs from directory: {directory}");
        info!("Probe: {} ({}), target: {:?}", tag.probe.label(), tag.probe.pdg(), tag.target);

        let dir = DirectoryContext {
            name: directory,
            tag,
        };

        let mut added = 0;
        for spec in categories(&dir.tag) {
            let Some(open) = self.open_category(store, &dir, &spec) else {
                self.summary.skipped_categories += 1;
                continue;
            };
            let ratio = store
                .has_reference()
                .then(|| ratio::ratio(Some(&*open.current), open.reference.as_deref()));
            let page = self.render_page(&dir, &spec, open, ratio);
            self.report.pages.push(page);
            added += 1;
        }

        self.summary.pages += added;
        added
    }

    fn open_category(
        &self,
        store: &CurveStore,
        dir: &DirectoryContext<'_>,
        spec: &CategorySpec,
    ) -> Option<OpenCategory> {
        let set = store.curve_set(dir.name, &spec.name);
        let Some(current) = set.current else {
            debug!("No '{}' curve in directory '{}'", spec.name, dir.name);
            return None;
        };

        let trimmed = self.trimmer.trim_opt(set.reference.as_deref());
        Some(OpenCategory {
            current,
            reference: set.reference,
            trimmed,
        })
    }

    fn render_page(
        &self,
        dir: &DirectoryContext<'_>,
        spec: &CategorySpec,
        open: OpenCategory,
        ratio: Option<Option<Curve>>,
    ) -> Page {
        let config = &self.context.config;
        let current_label = self.context.current.label.as_str();
        let reference_label = self.context.reference_label();

        let mut graphs = MultiGraph::new();
        graphs.add(current_label, Arc::clone(&open.current));
        if let Some(trimmed) = open.trimmed {
            graphs.add(reference_label, Arc::new(trimmed));
        }

        let series = graphs
            .entries()
            .iter()
            .enumerate()
            .map(|(i, e)| Series {
                label: e.label.clone(),
                mode: if i == 0 {
                    DrawMode::Line
                } else {
                    DrawMode::Markers
                },
                style: e.style,
                curve: (*e.curve).clone(),
            })
            .collect();
        let legend = graphs.legend(|i| {
            if i == 0 {
                LegendGlyph::Line
            } else {
                LegendGlyph::Marker
            }
        });

        let main = Pane {
            frame: Frame::fit(
                Some(&*open.current),
                open.reference.as_deref(),
                &self.main_scale,
            )
            .with_log(true, true)
            .with_titles(&config.x_title, &config.y_title),
            series,
            legend: Some(legend),
        };

        let ratio = ratio.map(|ratio| {
            let y_title = format!("{current_label} / {reference_label}");
            Pane {
                frame: Frame::fit(ratio.as_ref(), None, &self.ratio_scale)
                    .with_log(true, false)
                    .with_titles(&config.x_title, &y_title),
                series: ratio
                    .into_iter()
                    .map(|curve| Series {
                        label: y_title.clone(),
                        mode: DrawMode::Line,
                        style: graphs.style(0).copied().unwrap_or_default(),
                        curve,
                    })
                    .collect(),
                legend: None,
            }
        });

        debug!("Rendered page '{}' for directory '{}'", spec.title, dir.name);

        Page {
            directory: dir.name.to_owned(),
            category: spec.name.clone(),
            header: spec.title.clone(),
            main,
            ratio,
        }
    }

    /// Closes the document.
    pub fn finish(self) -> (Report, RunSummary) {
        info!(
            "Report closed: {} page(s), {} category(ies) skipped, {} directory(ies) skipped",
            self.report.page_count(),
            self.summary.skipped_categories,
            self.summary.skipped_directories
        );
        (self.report, self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CurveSource;
    use crate::store::source::{CurveDocument, DirectoryDocument, SourceDocument};
    use std::collections::BTreeMap;
    use std::path::Path;

    fn source(dir: &str, curves: &[(&str, Vec<f64>, Vec<f64>)]) -> CurveSource {
        let curves = curves
            .iter()
            .map(|(name, x, y)| {
                (
                    (*name).to_owned(),
                    CurveDocument {
                        x: x.clone(),
                        y: y.clone(),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();
        let doc = SourceDocument {
            directories: vec![DirectoryDocument {
                name: dir.to_owned(),
                curves,
            }],
        };
        CurveSource::from_document(Path::new("mem.yaml"), doc).unwrap()
    }

    fn context(with_reference: bool) -> RunContext {
        RunContext {
            current: SourceLabel {
                path: PathBuf::from("current.yaml"),
                label: "v2".to_owned(),
            },
            reference: with_reference.then(|| SourceLabel {
                path: PathBuf::from("reference.yaml"),
                label: "v1".to_owned(),
            }),
            config: ReportConfig::default(),
        }
    }

    #[test]
    fn test_no_matching_categories_gives_title_page_only() {
        let store = CurveStore::from_sources(
            source("nu_mu_C12", &[("unknown", vec![1.0], vec![1.0])]),
            None,
        );
        let ctx = context(false);
        let mut builder = ReportBuilder::new(&ctx).unwrap();
        assert_eq!(builder.add_directory(&store, "nu_mu_C12"), 0);

        let (report, summary) = builder.finish();
        assert_eq!(report.page_count(), 1);
        assert!(report.pages.is_empty());
        assert_eq!(report.title_page.lines[2], "current.yaml");
        assert!(summary.skipped_categories > 0);
    }

    #[test]
    fn test_unknown_directory_is_skipped() {
        let store = CurveStore::from_sources(
            source("electrons_C12", &[("tot_cc", vec![1.0], vec![1.0])]),
            None,
        );
        let ctx = context(false);
        let mut builder = ReportBuilder::new(&ctx).unwrap();
        builder.add_directory(&store, "electrons_C12");
        let (_, summary) = builder.finish();
        assert_eq!(summary.skipped_directories, 1);
        assert_eq!(summary.pages, 0);
    }

    #[test]
    fn test_page_with_reference() {
        let store = CurveStore::from_sources(
            source(
                "nu_mu_C12",
                &[("tot_cc", vec![1.0, 10.0], vec![2.0, 4.0])],
            ),
            Some(source(
                "nu_mu_C12",
                &[("tot_cc", vec![1.0, 10.0], vec![1.0, 0.0])],
            )),
        );
        let ctx = context(true);
        let mut builder = ReportBuilder::new(&ctx).unwrap();
        assert_eq!(builder.add_directory(&store, "nu_mu_C12"), 1);
        let (report, summary) = builder.finish();

        assert_eq!(summary.pages, 1);
        assert_eq!(report.title_page.lines.len(), 5);
        let page = &report.pages[0];
        assert_eq!(page.category, "tot_cc");
        assert_eq!(page.header, "ν_μ + (C12), TOT CC");

        assert_eq!(page.main.series.len(), 2);
        assert_eq!(page.main.series[0].mode, DrawMode::Line);
        assert_eq!(page.main.series[1].mode, DrawMode::Markers);
        assert_eq!(page.main.series[1].label, "v1");
        let legend = page.main.legend.as_ref().unwrap();
        assert_eq!(legend.entries[0].glyph, LegendGlyph::Line);
        assert_eq!(legend.entries[1].glyph, LegendGlyph::Marker);
        assert!(page.main.frame.log_x && page.main.frame.log_y);

        let ratio = page.ratio.as_ref().unwrap();
        assert_eq!(ratio.frame.y_title, "v2 / v1");
        assert!(!ratio.frame.log_y);
        assert_eq!(ratio.series[0].curve.points(), &[[1.0, 2.0], [10.0, 1.0]]);
    }

    #[test]
    fn test_page_without_reference() {
        let store = CurveStore::from_sources(
            source("nu_e_H1", &[("tot_cc_p", vec![1.0, 10.0], vec![2.0, 4.0])]),
            None,
        );
        let ctx = context(false);
        let mut builder = ReportBuilder::new(&ctx).unwrap();
        builder.add_directory(&store, "nu_e_H1");
        let (report, _) = builder.finish();

        assert_eq!(report.title_page.lines.len(), 3);
        let page = &report.pages[0];
        assert!(page.ratio.is_none());
        assert_eq!(page.main.legend.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_reference_without_category_keeps_empty_ratio_pane() {
        let store = CurveStore::from_sources(
            source("nu_mu_C12", &[("tot_nc", vec![1.0, 10.0], vec![2.0, 4.0])]),
            Some(source(
                "nu_mu_C12",
                &[("tot_cc", vec![1.0, 10.0], vec![1.0, 1.0])],
            )),
        );
        let ctx = context(true);
        let mut builder = ReportBuilder::new(&ctx).unwrap();
        builder.add_directory(&store, "nu_mu_C12");
        let (report, _) = builder.finish();

        assert_eq!(report.pages.len(), 1);
        let page = &report.pages[0];
        assert_eq!(page.category, "tot_nc");
        assert_eq!(page.main.series.len(), 1);
        assert!(page.ratio.as_ref().unwrap().series.is_empty());
    }
}
