//! Output formatters for ranking reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeRankerError};
use crate::output::report::*;
use crate::processing::ranker::RankedResult;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Skills shown per row when not in detailed mode
const SKILL_PREVIEW: usize = 5;

pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored terminal table
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    top_n: Option<usize>,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    top_n: Option<usize>,
}

pub struct HtmlFormatter {
    include_styles: bool,
    top_n: Option<usize>,
}

/// Dispatches a report to the formatter that supports the requested format.
pub struct ReportGenerator {
    formatters: Vec<Box<dyn OutputFormatter>>,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Ranking Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 1000px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .job { background: #f8f9fa; padding: 15px; border-left: 4px solid #007acc; }
        table { width: 100%; border-collapse: collapse; margin: 20px 0; }
        th, td { padding: 10px; border-bottom: 1px solid #e9ecef; text-align: left; }
        th { background: #007acc; color: white; }
        .score-badge {
            display: inline-block;
            padding: 4px 12px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
        }
        .band-strong { background: #28a745; }
        .band-moderate { background: #17a2b8; }
        .band-weak { background: #ffc107; color: #000; }
        .band-poor { background: #dc3545; }
        .skills { font-size: 0.9em; color: #495057; }
        .skipped { background: #fff3cd; padding: 15px; border-radius: 6px; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Ranking Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <h2>Job Description</h2>
        <div class="job">{{ job_preview }}</div>

        <h2>Ranking ({{ total_documents }} documents)</h2>
        {% if rows.is_empty() %}
        <p>No documents were ranked.</p>
        {% else %}
        <table>
            <tr><th>Rank</th><th>Document</th><th>Match</th><th>Skills</th></tr>
            {% for row in rows %}
            <tr>
                <td>{{ row.rank }}</td>
                <td>{{ row.label }}</td>
                <td>{{ row.percentage }}% <span class="score-badge {{ row.band_class }}">{{ row.band_label }}</span></td>
                <td class="skills">{{ row.skills }} ({{ row.skill_count }})</td>
            </tr>
            {% endfor %}
        </table>
        {% endif %}

        {% if !skipped.is_empty() %}
        <h2>Skipped Inputs</h2>
        <div class="skipped">
            <ul>
            {% for item in skipped %}
                <li><strong>{{ item.label }}</strong>: {{ item.reason }}</li>
            {% endfor %}
            </ul>
        </div>
        {% endif %}

        <div class="metadata">
            <p>Generated by resume-ranker v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    job_preview: String,
    total_documents: usize,
    rows: Vec<HtmlRow>,
    skipped: Vec<SkippedInput>,
    version: String,
}

struct HtmlRow {
    rank: usize,
    label: String,
    percentage: String,
    band_class: &'static str,
    band_label: &'static str,
    skills: String,
    skill_count: usize,
}

fn format_timestamp(report: &RankingReport) -> String {
    report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn skill_summary(result: &RankedResult, detailed: bool) -> String {
    if result.skills.is_empty() {
        return "none".to_string();
    }
    if detailed || result.skills.len() <= SKILL_PREVIEW {
        return result.skills.join(", ");
    }
    format!(
        "{}, +{} more",
        result.skills[..SKILL_PREVIEW].join(", "),
        result.skills.len() - SKILL_PREVIEW
    )
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
            top_n: None,
        }
    }

    pub fn with_top_n(mut self, top_n: Option<usize>) -> Self {
        self.top_n = top_n;
        self
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, percentage: f64) -> String {
        let band = MatchBand::from_percentage(percentage);
        let color = match band {
            MatchBand::Strong => Color::Green,
            MatchBand::Moderate => Color::Cyan,
            MatchBand::Weak => Color::Yellow,
            MatchBand::Poor => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME RANKING", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report),
            report.processing_time_ms
        ));

        output.push_str(&self.format_header("Job Description", 2));
        output.push_str(&format!("{}\n", self.colorize(&report.job_description_preview, Color::Cyan)));

        output.push_str(&self.format_header(&format!("Ranking ({} documents)", report.total_documents), 2));
        let shown = report.top(self.top_n);
        if shown.is_empty() {
            output.push_str("No documents were ranked.\n");
        }

        for result in shown {
            output.push_str(&format!(
                "{:>3}. {} {:>6.2}% {}\n",
                result.rank,
                self.colorize(&result.label, Color::White),
                result.percentage_match,
                self.format_score_badge(result.percentage_match)
            ));
            output.push_str(&format!(
                "     Skills ({}): {}\n",
                result.skill_count,
                self.colorize(&skill_summary(result, self.detailed), Color::BrightBlack)
            ));
            if self.detailed {
                output.push_str(&format!("     Similarity: {:.4}\n", result.similarity_score));
            }
        }

        if shown.len() < report.results.len() {
            output.push_str(&format!("  ... {} more not shown\n", report.results.len() - shown.len()));
        }

        if !report.skipped.is_empty() {
            output.push_str(&self.format_header("Skipped Inputs", 3));
            for skipped in &report.skipped {
                output.push_str(&format!(
                    "  • {} {}\n",
                    self.colorize(&skipped.label, Color::Yellow),
                    self.colorize(&format!("({})", skipped.reason), Color::BrightBlack)
                ));
            }
        }

        output.push_str(&format!(
            "\n{} Generated by resume-ranker v{}\n",
            self.colorize("ℹ", Color::Blue),
            env!("CARGO_PKG_VERSION")
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self {
            include_metadata,
            top_n: None,
        }
    }

    pub fn with_top_n(mut self, top_n: Option<usize>) -> Self {
        self.top_n = top_n;
        self
    }

    fn markdown_band(percentage: f64) -> &'static str {
        match MatchBand::from_percentage(percentage) {
            MatchBand::Strong => "🟢 Strong",
            MatchBand::Moderate => "🟡 Moderate",
            MatchBand::Weak => "🟠 Weak",
            MatchBand::Poor => "🔴 Poor",
        }
    }
}

/// Keep table cells on one row.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Ranking Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n\n",
                format_timestamp(report),
                report.processing_time_ms
            ));
        }

        output.push_str("## Job Description\n\n");
        output.push_str(&format!("> {}\n\n", report.job_description_preview));

        output.push_str(&format!("## Ranking ({} documents)\n\n", report.total_documents));
        let shown = report.top(self.top_n);
        if shown.is_empty() {
            output.push_str("No documents were ranked.\n\n");
        } else {
            output.push_str("| Rank | Document | Match | Band | Skills |\n");
            output.push_str("|------|----------|-------|------|--------|\n");
            for result in shown {
                output.push_str(&format!(
                    "| {} | {} | {:.2}% | {} | {} |\n",
                    result.rank,
                    escape_cell(&result.label),
                    result.percentage_match,
                    Self::markdown_band(result.percentage_match),
                    escape_cell(&skill_summary(result, true))
                ));
            }
            output.push('\n');
        }

        if !report.skipped.is_empty() {
            output.push_str("## Skipped Inputs\n\n");
            for skipped in &report.skipped {
                output.push_str(&format!("- `{}`: {}\n", skipped.label, skipped.reason));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!("*Generated by resume-ranker v{}*\n", env!("CARGO_PKG_VERSION")));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self {
            include_styles,
            top_n: None,
        }
    }

    pub fn with_top_n(mut self, top_n: Option<usize>) -> Self {
        self.top_n = top_n;
        self
    }

    fn create_template_data(&self, report: &RankingReport) -> HtmlTemplate {
        let rows = report
            .top(self.top_n)
            .iter()
            .map(|result| {
                let band = MatchBand::from_percentage(result.percentage_match);
                let band_class = match band {
                    MatchBand::Strong => "band-strong",
                    MatchBand::Moderate => "band-moderate",
                    MatchBand::Weak => "band-weak",
                    MatchBand::Poor => "band-poor",
                };
                HtmlRow {
                    rank: result.rank,
                    label: result.label.clone(),
                    percentage: format!("{:.2}", result.percentage_match),
                    band_class,
                    band_label: band.label(),
                    skills: skill_summary(result, true),
                    skill_count: result.skill_count,
                }
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: format_timestamp(report),
            processing_time: report.processing_time_ms,
            job_preview: report.job_description_preview.clone(),
            total_documents: report.total_documents,
            rows,
            skipped: report.skipped.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeRankerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, None)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_html_styles: bool,
        top_n: Option<usize>,
    ) -> Self {
        Self {
            formatters: vec![
                Box::new(ConsoleFormatter::new(use_colors, detailed).with_top_n(top_n)),
                Box::new(JsonFormatter::new(pretty_json)),
                Box::new(MarkdownFormatter::new(true).with_top_n(top_n)),
                Box::new(HtmlFormatter::new(include_html_styles).with_top_n(top_n)),
            ],
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: &OutputFormat) -> Result<String> {
        self.formatters
            .iter()
            .find(|f| f.supports_format() == *format)
            .ok_or_else(|| ResumeRankerError::OutputFormatting(format!("No formatter for {:?} output", format)))?
            .format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, job_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(job_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "job".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("{}_ranking{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> RankingReport {
        let results = vec![
            RankedResult {
                ordinal: 1,
                label: "alice.md".to_string(),
                similarity_score: 0.6123,
                percentage_match: 61.23,
                skills: vec!["python".to_string(), "sql".to_string()],
                skill_count: 2,
                rank: 1,
            },
            RankedResult {
                ordinal: 0,
                label: "bob <dev>.txt".to_string(),
                similarity_score: 0.05,
                percentage_match: 5.0,
                skills: Vec::new(),
                skill_count: 0,
                rank: 2,
            },
        ];
        let skipped = vec![SkippedInput {
            label: "notes.docx".to_string(),
            reason: "unsupported format".to_string(),
        }];
        RankingReport::new("Python developer with SQL", results, skipped, 12)
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, false).format_report(&sample_report()).unwrap();
        assert!(output.contains("RESUME RANKING"));
        assert!(output.contains("alice.md"));
        assert!(output.contains("61.23%"));
        assert!(output.contains("[STRONG]"));
        assert!(output.contains("[POOR]"));
        assert!(output.contains("notes.docx"));
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_console_top_n() {
        let output = ConsoleFormatter::new(false, false)
            .with_top_n(Some(1))
            .format_report(&sample_report())
            .unwrap();
        assert!(output.contains("alice.md"));
        assert!(!output.contains("bob"));
        assert!(output.contains("1 more not shown"));
    }

    #[test]
    fn test_json_roundtrip() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let parsed: RankingReport = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].label, "alice.md");
        assert_eq!(parsed.skipped.len(), 1);
    }

    #[test]
    fn test_markdown_table() {
        let output = MarkdownFormatter::new(false).format_report(&sample_report()).unwrap();
        assert!(output.contains("| 1 | alice.md | 61.23% | 🟢 Strong | python, sql |"));
        assert!(output.contains("- `notes.docx`: unsupported format"));
        assert!(!output.contains("Generated by"));
    }

    #[test]
    fn test_html_escapes_labels() {
        let output = HtmlFormatter::new(false).format_report(&sample_report()).unwrap();
        assert!(output.contains("<!DOCTYPE html>"));
        assert!(output.contains("bob &lt;dev&gt;.txt") || output.contains("bob &#60;dev&#62;.txt"));
        assert!(output.contains("band-strong"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, true, true, true, None);
        let report = sample_report();
        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(json.trim_start().starts_with('{'));
        let console = generator.generate_report(&report, &OutputFormat::Console).unwrap();
        assert!(console.contains("Similarity: 0.6123"));
        let html = generator.generate_report(&report, &OutputFormat::Html).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
    }

    #[test]
    fn test_generator_uses_formatter_for_each_format() {
        let generator = ReportGenerator::with_options(false, false, true, true, None);
        let report = sample_report();
        let standalone: Vec<Box<dyn OutputFormatter>> = vec![
            Box::new(ConsoleFormatter::new(false, false)),
            Box::new(JsonFormatter::new(true)),
            Box::new(MarkdownFormatter::new(true)),
        ];
        for formatter in standalone {
            let format = formatter.supports_format();
            let expected = formatter.format_report(&report).unwrap();
            let rendered = generator.generate_report(&report, &format).unwrap();
            assert_eq!(rendered, expected, "{:?}", format);
        }
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Markdown, "jobs/backend.txt", false), "backend_ranking.md");
        assert_eq!(suggest_filename(&OutputFormat::Html, "", false), "job_ranking.html");
    }

    #[test]
    fn test_save_report_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.txt");
        save_report_to_file("content", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "content");
    }
}
