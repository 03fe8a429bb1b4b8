pub mod axes;
pub mod canvas;
pub mod page;

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use crate::config::PageSize;
use crate::report::Report;

#[derive(Debug)]
pub enum RenderError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    Format(std::fmt::Error),
    UnknownFormat(PathBuf),
}

impl From<std::io::Error> for RenderError {
    fn from(value: std::io::Error) -> Self {
        RenderError::Io(value)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(value: serde_json::Error) -> Self {
        RenderError::Json(value)
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(value: serde_yaml::Error) -> Self {
        RenderError::Yaml(value)
    }
}

impl From<std::fmt::Error> for RenderError {
    fn from(value: std::fmt::Error) -> Self {
        RenderError::Format(value)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Io(x) => write!(f, "Report could not be written: {x}"),
            RenderError::Json(x) => write!(f, "Report could not be serialized to JSON: {x}"),
            RenderError::Yaml(x) => write!(f, "Report could not be serialized to YAML: {x}"),
            RenderError::Format(x) => write!(f, "Report page could not be drawn: {x}"),
            RenderError::UnknownFormat(x) => write!(
                f,
                "Output file {} has no known extension (json, yaml, yml, html, htm)",
                x.display()
            ),
        }
    }
}

impl std::error::Error for RenderError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Html,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(OutputFormat::Json),
            Some("yaml" | "yml") => Ok(OutputFormat::Yaml),
            Some("html" | "htm") => Ok(OutputFormat::Html),
            _ => Err(RenderError::UnknownFormat(path.to_path_buf())),
        }
    }
}

/// Renders the whole report as one HTML document, one SVG per page.
pub fn render_html(report: &Report, size: &PageSize) -> Result<String, RenderError> {
    let mut out = String::with_capacity(64 * 1024);
    let title = report
        .title_page
        .lines
        .first()
        .map(String::as_str)
        .unwrap_or_default();

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, r#"<html lang="en">"#)?;
    writeln!(out, "<head>")?;
    writeln!(out, r#"<meta charset="utf-8">"#)?;
    writeln!(out, "<title>{}</title>", canvas::escape_xml(title))?;
    writeln!(
        out,
        "<style>body {{ background: #888; margin: 0; }} section.page {{ background: #fff; margin: 12px auto; width: {}px; }}</style>",
        size.width
    )?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;

    writeln!(out, r#"<section class="page" id="page-0">"#)?;
    out.push_str(&page::draw_title_page(&report.title_page, size, "p0").finish_svg()?);
    writeln!(out, "</section>")?;

    for (i, p) in report.pages.iter().enumerate() {
        writeln!(
            out,
            r#"<section class="page" id="page-{}" data-directory="{}" data-category="{}">"#,
            i + 1,
            canvas::escape_xml(&p.directory),
            canvas::escape_xml(&p.category)
        )?;
        out.push_str(&page::draw_page(p, size, &format!("p{}", i + 1)).finish_svg()?);
        writeln!(out, "</section>")?;
    }

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}

/// Writes the report to `path` in the format named by its extension.
pub fn write_report(report: &Report, path: &Path, size: &PageSize) -> Result<OutputFormat, RenderError> {
    let format = OutputFormat::from_path(path)?;
    let mut writer = BufWriter::new(File::create(path)?);

    match format {
        OutputFormat::Json => serde_json::to_writer_pretty(&mut writer, report)?,
        OutputFormat::Yaml => serde_yaml::to_writer(&mut writer, report)?,
        OutputFormat::Html => writer.write_all(render_html(report, size)?.as_bytes())?,
    }
    writer.flush()?;

    log::info!(
        "Wrote {} page(s) to {} ({:?})",
        report.page_count(),
        path.display(),
        format
    );
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Frame, Page, Pane, TitlePage};

    fn report() -> Report {
        Report {
            title_page: TitlePage {
                lines: vec!["Cross sections".to_owned()],
            },
            pages: Vec::new(),
        }
    }

    #[test]
    fn test_output_format() {
        assert_eq!(OutputFormat::from_path(Path::new("x.json")).unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("x.YML")).unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_path(Path::new("xsec.html")).unwrap(), OutputFormat::Html);
        assert!(OutputFormat::from_path(Path::new("xsec.ps")).is_err());
        assert!(OutputFormat::from_path(Path::new("xsec")).is_err());
    }

    #[test]
    fn test_title_only_html() {
        let size = PageSize {
            width: 500.0,
            height: 650.0,
        };
        let html = render_html(&report(), &size).unwrap();
        assert_eq!(html.matches(r#"<section class="page""#).count(), 1);
        assert!(html.contains("<title>Cross sections</title>"));
    }

    fn page(directory: &str) -> Page {
        let pane = Pane {
            frame: Frame {
                x_min: 0.1,
                x_max: 100.0,
                y_min: 0.5,
                y_max: 1.5,
                log_x: true,
                log_y: false,
                x_title: "E".to_owned(),
                y_title: "ratio".to_owned(),
            },
            series: Vec::new(),
            legend: None,
        };
        Page {
            directory: directory.to_owned(),
            category: "tot_cc".to_owned(),
            header: directory.to_owned(),
            main: pane.clone(),
            ratio: Some(pane),
        }
    }

    #[test]
    fn test_element_ids_unique_across_pages() {
        let size = PageSize {
            width: 500.0,
            height: 650.0,
        };
        let mut two_pages = report();
        two_pages.pages = vec![page("nu_mu_C12"), page("nu_e_C12")];
        let html = render_html(&two_pages, &size).unwrap();

        let ids: Vec<&str> = html
            .split(r#" id=""#)
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect();
        let unique: std::collections::HashSet<&str> = ids.iter().copied().collect();

        // three sections plus two clip paths on each comparison page
        assert_eq!(ids.len(), 7);
        assert_eq!(unique.len(), ids.len());
        assert!(html.contains(r#"clip-path="url(#p2-clip1)""#));
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let size = PageSize {
            width: 500.0,
            height: 650.0,
        };
        assert_eq!(write_report(&report(), &path, &size).unwrap(), OutputFormat::Json);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["title_page"]["lines"][0], "Cross sections");
        assert_eq!(value["pages"].as_array().unwrap().len(), 0);
    }
}
