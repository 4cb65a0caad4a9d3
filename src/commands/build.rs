//! Build the static site

use anyhow::Result;

use crate::generator::{BuildReport, Generator};
use crate::Blog;

/// Build the static site
pub fn run(blog: &Blog) -> Result<BuildReport> {
    run_with_options(blog, false)
}

/// Build, optionally cleaning the public directory first
pub fn run_with_options(blog: &Blog, clean: bool) -> Result<BuildReport> {
    let start = std::time::Instant::now();

    if clean {
        super::clean::run(blog)?;
    }

    let generator = Generator::new(blog)?;
    let report = generator.generate()?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages in {:.2}s",
        report.pages.len(),
        duration.as_secs_f64()
    );

    Ok(report)
}

/// Turn page failures into an error naming every failed page
pub fn ensure_success(report: &BuildReport) -> Result<()> {
    if report.is_success() {
        return Ok(());
    }

    let failed: Vec<String> = report
        .failures
        .iter()
        .map(|f| format!("  {}: {:#}", f.id, f.error))
        .collect();
    anyhow::bail!(
        "{} page(s) failed to build:\n{}",
        report.failures.len(),
        failed.join("\n")
    )
}
