//! Section diagnostics command.

use std::fs;

use anyhow::{Context, Result};
use folio_render::{App, BootstrapReport, HostDocument, LoadOutcome, RenderTargets};
use folio_static::{BuildConfig, StaticBuilder};

use crate::config::ConfigFile;

/// Run the check command.
pub async fn run(file_config: &ConfigFile, strict: bool) -> Result<()> {
    let config = BuildConfig {
        site_dir: file_config.site_dir(),
        page: file_config.site.page.clone(),
        base_url: file_config.source.base_url.clone(),
        ..Default::default()
    };

    let page_path = config.site_dir.join(&config.page);
    let html = fs::read_to_string(&page_path)
        .with_context(|| format!("Failed to read {}", page_path.display()))?;
    let document = HostDocument::parse(html);

    for target in RenderTargets::resolve(&document).missing() {
        tracing::warn!("Host page has no element for {}", target.label());
    }

    let source = StaticBuilder::content_source(&config)?;
    tracing::info!("Checking sections from {}", source.describe());

    let rendered = App::new(source).run(document).await;
    let report = rendered.report();

    for line in summarize(report) {
        tracing::info!("{}", line);
    }

    if !report.settled {
        anyhow::bail!("A section loader was lost before settling");
    }
    if strict && report.failed() > 0 {
        anyhow::bail!("{} of {} sections failed", report.failed(), report.outcomes.len());
    }

    Ok(())
}

/// One line per section outcome, followed by a totals line.
fn summarize(report: &BootstrapReport) -> Vec<String> {
    let mut lines: Vec<String> = report.outcomes.iter().map(describe).collect();
    lines.push(format!(
        "{} rendered, {} failed in {}ms",
        report.rendered(),
        report.failed(),
        report.duration.as_millis()
    ));
    lines
}

fn describe(outcome: &LoadOutcome) -> String {
    match &outcome.result {
        Ok(section) if !section.rendered => {
            format!("{:<12} loaded (reserved)", outcome.section.name())
        }
        Ok(section) if section.skipped.is_empty() => format!(
            "{:<12} ok ({} targets)",
            outcome.section.name(),
            section.written.len()
        ),
        Ok(section) => format!(
            "{:<12} ok ({} targets, {} missing from page)",
            outcome.section.name(),
            section.written.len(),
            section.skipped.len()
        ),
        Err(e) => format!("{:<12} {} error: {}", outcome.section.name(), e.kind(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use folio_content::Section;
    use folio_render::MemorySource;

    const HOST: &str = r#"<html><head><title>Loading</title></head>
<body><span id="footer-text"></span><div id="footer-links"></div></body></html>"#;

    async fn report_for(source: MemorySource) -> BootstrapReport {
        let rendered = App::new(Arc::new(source))
            .with_sections(&[Section::SiteConfig, Section::Experience, Section::Footer])
            .run(HostDocument::parse(HOST))
            .await;
        let (_, report) = rendered.into_parts();
        report
    }

    #[tokio::test]
    async fn describes_each_outcome() {
        let source = MemorySource::new()
            .with("data/site-config.json", r#"{"title": "Jane"}"#)
            .with("data/experience.json", "[]")
            .with("data/footer.json", r#"{"text": "Bye", "links": []}"#);

        let lines = summarize(&report_for(source).await);

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("site-config"));
        assert!(lines[0].contains("missing from page"));
        assert!(lines[1].contains("loaded (reserved)"));
        assert!(lines[2].starts_with("footer"));
        assert!(lines[2].contains("ok (2 targets, 1 missing from page)"));
        assert!(lines[3].starts_with("2 rendered, 0 failed"));
    }

    #[tokio::test]
    async fn names_the_failure_kind() {
        let source = MemorySource::new()
            .with("data/site-config.json", "{not json")
            .with("data/experience.json", "[]");

        let lines = summarize(&report_for(source).await);

        assert!(lines[0].contains("parse error"));
        assert!(lines[2].contains("transport error"));
        assert!(lines[3].contains("2 failed"));
    }
}
