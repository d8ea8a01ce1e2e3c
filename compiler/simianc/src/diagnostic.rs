//! Source-annotated parse error reports.

use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use simian_parse::ParseError;

/// Render each error as an `ariadne` report pointing into `source`.
///
/// Spans are byte offsets. `color` selects ANSI styling; pass `false` for
/// logs and tests.
pub fn render_parse_errors(path: &str, source: &str, errors: &[ParseError], color: bool) -> String {
    let mut out = Vec::new();
    for error in errors {
        let range = clamp(error.span().to_range(), source.len());
        let report = Report::build(ReportKind::Error, path, range.start)
            .with_config(
                Config::default()
                    .with_color(color)
                    .with_index_type(IndexType::Byte),
            )
            .with_message("parse error")
            .with_label(Label::new((path, range)).with_message(error.to_string()))
            .finish();
        if report
            .write((path, Source::from(source.to_string())), &mut out)
            .is_err()
        {
            out.extend_from_slice(format!("error: {error}\n").as_bytes());
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Keep a span inside the source so the report can always find its line.
fn clamp(range: std::ops::Range<usize>, len: usize) -> std::ops::Range<usize> {
    let start = range.start.min(len);
    start..range.end.clamp(start, len)
}
