//! Printable diagnosis report.
//!
//! The report is one self-contained HTML document (inline styles, the upload
//! embedded as a data URL) so it prints the same from any browser and can be
//! saved as-is on native builds.

use api::DetectedRegion;
use time::{macros::format_description, OffsetDateTime};

use crate::{
    core::format::format_percent,
    diagnosis::{Diagnosis, Session},
    i18n::{disease_name, translate, Language},
};

mod deliver;
pub use deliver::{deliver_report, Delivery};

/// Everything a report shows, copied out of the session at export time.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
    pub diagnosis: Diagnosis,
    pub explanation: String,
    pub regions: Vec<DetectedRegion>,
    pub image_url: Option<String>,
}

impl ReportInput {
    /// `None` until an analysis has produced a result.
    pub fn from_session(session: &Session) -> Option<Self> {
        let result = session.result()?;
        Some(Self {
            diagnosis: session.diagnosis()?,
            explanation: session.explanation_text().to_string(),
            regions: result.regions.clone(),
            image_url: session.upload().map(|upload| upload.preview.clone()),
        })
    }
}

const STYLE: &str = "body{font-family:Arial,sans-serif;line-height:1.6;margin:0;padding:20px;color:#333}\
.container{max-width:800px;margin:0 auto}\
.header{text-align:center;margin-bottom:30px;padding-bottom:20px;border-bottom:1px solid #eee}\
.image-container{text-align:center;margin-bottom:30px}\
.image-container img{max-width:100%;max-height:400px;border:1px solid #ddd}\
.diagnosis{background:#f9f9f9;padding:20px;border-radius:5px;margin-bottom:30px}\
.warning{background:#fff8e1;border-left:4px solid #ffc107;padding:15px;margin-bottom:20px}\
table{width:100%;border-collapse:collapse;margin-bottom:30px}\
th,td{padding:10px;border:1px solid #ddd;text-align:left}\
th{background:#f2f2f2}\
.footer{text-align:center;margin-top:40px;font-size:12px;color:#777}\
.print-button{display:block;margin:30px auto;padding:10px 20px;background:#4CAF50;color:#fff;border:none;border-radius:4px;cursor:pointer}\
@media print{.print-button{display:none}}";

/// Renders the report for `lang`, stamped with `generated_at`.
pub fn render_report(input: &ReportInput, lang: Language, generated_at: OffsetDateTime) -> String {
    let tr = |key: &str| escape_html(&translate(lang, key, &[]));
    let date = generated_at
        .format(&format_description!(
            "[year]-[month]-[day] [hour]:[minute] UTC"
        ))
        .unwrap_or_default();

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"");
    html.push_str(lang.code());
    html.push_str("\">\n<head>\n<meta charset=\"utf-8\">\n<title>");
    html.push_str(&tr("export-title"));
    html.push_str("</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");

    html.push_str(&format!(
        "<div class=\"header\"><h1>{}</h1><p>{}</p></div>\n",
        tr("export-title"),
        escape_html(&translate(lang, "export-date", &[("date", date.as_str())]))
    ));

    if let Some(url) = &input.image_url {
        html.push_str(&format!(
            "<div class=\"image-container\"><img src=\"{}\" alt=\"{}\"></div>\n",
            escape_html(url),
            tr("export-image-alt")
        ));
    }

    html.push_str("<div class=\"diagnosis\">\n");
    match &input.diagnosis {
        Diagnosis::NoDetection => {
            html.push_str(&format!(
                "<h2>{}</h2>\n<div class=\"warning\"><p><strong>{}</strong> {}</p><p>{}</p><ul><li>{}</li><li>{}</li><li>{}</li></ul><p>{}</p></div>\n",
                tr("diagnosis-no-detection"),
                tr("diagnosis-warning"),
                tr("diagnosis-not-accurate"),
                tr("diagnosis-could-mean"),
                tr("diagnosis-reason1"),
                tr("diagnosis-reason2"),
                tr("diagnosis-reason3"),
                tr("diagnosis-consult"),
            ));
        }
        Diagnosis::Detected { label, confidence } => {
            let confidence = format_percent(*confidence);
            html.push_str(&format!(
                "<h2>{}</h2>\n<p><strong>{}</strong></p>\n",
                escape_html(&disease_name(lang, label)),
                escape_html(&translate(
                    lang,
                    "diagnosis-confidence",
                    &[("value", confidence.trim_end_matches('%'))]
                ))
            ));
        }
    }
    if !input.explanation.trim().is_empty() {
        html.push_str(&format!(
            "<h3>{}</h3>\n<p>{}</p>\n",
            tr("diagnosis-details"),
            escape_html(input.explanation.trim())
        ));
    }
    html.push_str("</div>\n");

    if !input.diagnosis.is_no_detection() && !input.regions.is_empty() {
        let count = input.regions.len().to_string();
        html.push_str(&format!(
            "<h3>{}</h3>\n<table>\n<thead><tr><th>{}</th><th>{}</th><th>{}</th></tr></thead>\n<tbody>\n",
            escape_html(&translate(
                lang,
                "detection-areas-detected",
                &[("count", count.as_str())]
            )),
            tr("export-area"),
            tr("export-classification"),
            tr("export-confidence"),
        ));
        for (index, region) in input.regions.iter().enumerate() {
            let number = (index + 1).to_string();
            let area = translate(lang, "export-area-index", &[("index", number.as_str())]);
            html.push_str(&format!(
                "<tr class=\"region-row\"><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&area),
                escape_html(&disease_name(lang, &region.label)),
                format_percent(region.confidence),
            ));
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str(&format!(
        "<div class=\"footer\"><p>{}</p><p>{}</p></div>\n",
        tr("export-footer"),
        escape_html(&date)
    ));
    html.push_str(&format!(
        "<button class=\"print-button\" onclick=\"window.print()\">{}</button>\n",
        tr("export-print")
    ));
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use api::BoundingBox;
    use time::macros::datetime;

    use super::*;

    fn region(label: &str, confidence: f64) -> DetectedRegion {
        DetectedRegion {
            bbox: Some(BoundingBox {
                x1: 0.1,
                y1: 0.1,
                x2: 0.3,
                y2: 0.3,
            }),
            label: label.into(),
            confidence,
        }
    }

    fn detected_input() -> ReportInput {
        ReportInput {
            diagnosis: Diagnosis::Detected {
                label: "Black Spot".into(),
                confidence: 0.9423,
            },
            explanation: "A fungal disease <caused> by Phyllosticta.".into(),
            regions: vec![region("Black Spot", 0.81), region("Black Spot", 0.6789)],
            image_url: Some("data:image/png;base64,AQID".into()),
        }
    }

    const AT: OffsetDateTime = datetime!(2026-03-14 09:26 UTC);

    #[test]
    fn one_row_per_detected_region() {
        let html = render_report(&detected_input(), Language::English, AT);
        assert_eq!(html.matches("<tr class=\"region-row\">").count(), 2);
        assert!(html.contains("<td>Area 1</td><td>Black Spot</td><td>81.00%</td>"));
        assert!(html.contains("<td>Area 2</td><td>Black Spot</td><td>67.89%</td>"));
        assert!(html.contains("Confidence: 94.23%"));
        assert!(html.contains("Analysis Date: 2026-03-14 09:26 UTC"));
    }

    #[test]
    fn text_is_escaped() {
        let html = render_report(&detected_input(), Language::English, AT);
        assert!(html.contains("A fungal disease &lt;caused&gt; by Phyllosticta."));
        assert!(!html.contains("<caused>"));
    }

    #[test]
    fn no_detection_shows_warning_instead_of_table() {
        let input = ReportInput {
            diagnosis: Diagnosis::NoDetection,
            explanation: String::new(),
            regions: Vec::new(),
            image_url: Some("data:image/png;base64,AQID".into()),
        };
        let html = render_report(&input, Language::English, AT);
        assert!(html.contains("class=\"warning\""));
        assert!(html.contains("<h2>No specific disease areas detected</h2>"));
        assert!(!html.contains("<table>"));
        assert!(!html.contains("Confidence:"));
    }

    #[test]
    fn missing_image_omits_the_image_section() {
        let mut input = detected_input();
        input.image_url = None;
        let html = render_report(&input, Language::English, AT);
        assert!(!html.contains("<img"));
        assert!(!html.contains("image-container\">"));
    }

    #[test]
    fn vietnamese_report_uses_vietnamese_labels() {
        let html = render_report(&detected_input(), Language::Vietnamese, AT);
        assert!(html.contains("<h2>Đốm Đen</h2>"));
        assert!(html.contains("<td>Vùng 2</td><td>Đốm Đen</td><td>67.89%</td>"));
        assert!(html.contains("Độ tin cậy: 94.23%"));
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"vi\">"));
    }
}
