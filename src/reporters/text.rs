//! Text (terminal) reporter with colors and formatting

use super::{AnalysisReport, FileAnalysis};
use crate::calibrate::CalibrationReport;
use crate::scoring::Likelihood;
use anyhow::Result;
use console::style;
use std::fmt::Write;

const RULE: &str = "──────────────────────────────────────";

fn styled_score(score: f64, likelihood: Likelihood) -> String {
    let text = format!("{:.1}/100", score);
    match likelihood {
        Likelihood::High => style(text).red().bold().to_string(),
        Likelihood::Moderate => style(text).yellow().bold().to_string(),
        Likelihood::Low => style(text).green().bold().to_string(),
    }
}

fn render_file(out: &mut String, file: &FileAnalysis) -> std::fmt::Result {
    writeln!(out, "{}", style(file.path.display()).cyan().bold())?;

    if let Some(error) = &file.error {
        writeln!(out, "  {} {}", style("error:").red().bold(), error)?;
        return Ok(());
    }
    let Some(analysis) = &file.analysis else {
        return Ok(());
    };

    let result = &analysis.result;
    let likelihood = result.likelihood();
    writeln!(
        out,
        "  Score: {}  {}",
        styled_score(result.score, likelihood),
        style(format!("({})", likelihood.describe())).dim()
    )?;

    if result.indicators.is_empty() {
        writeln!(out, "  {}", style("No significant indicators detected").dim())?;
        return Ok(());
    }
    // indicators and contributions are emitted together in rule order
    for (indicator, points) in result.indicators.iter().zip(result.contributions.values()) {
        writeln!(out, "  • {:<44} {}", indicator, style(format!("+{:.1}", points)).dim())?;
    }
    Ok(())
}

pub fn render_analysis(report: &AnalysisReport) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "\n{}", style("synthscan analysis").bold())?;
    writeln!(out, "{}", style(RULE).dim())?;

    for file in &report.files {
        render_file(&mut out, file)?;
        out.push('\n');
    }

    let failed = report.failed_count();
    let analyzed = report.files.len() - failed;
    write!(out, "{} analyzed", analyzed)?;
    if failed > 0 {
        write!(out, ", {}", style(format!("{} failed", failed)).red())?;
    }
    if let Some(max) = report.max_score() {
        write!(out, "  (highest score {:.1})", max)?;
    }
    out.push('\n');
    Ok(out)
}

pub fn render_calibration(report: &CalibrationReport) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "\n{}", style("synthscan calibration").bold())?;
    writeln!(out, "{}", style(RULE).dim())?;
    writeln!(out, "{}", report)?;
    Ok(out)
}
