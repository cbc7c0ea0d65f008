pub mod console;
pub mod html;
pub mod junit;
pub mod report_model;

pub use report_model::TestSuiteReport;

/// Output formats understood by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Console,
    Html,
    Junit,
}

impl ReportFormat {
    pub fn render(&self, report: &TestSuiteReport) -> String {
        match self {
            ReportFormat::Console => console::format_console_report(report),
            ReportFormat::Html => html::generate_html_report(report),
            ReportFormat::Junit => junit::generate_junit_xml(report),
        }
    }

    /// File written when `--output` is not given; console goes to stdout.
    pub fn default_output(&self) -> Option<&'static str> {
        match self {
            ReportFormat::Console => None,
            ReportFormat::Html => Some("report.html"),
            ReportFormat::Junit => Some("report.xml"),
        }
    }
}
