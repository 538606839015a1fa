//! HTML rendering of the price board

use crate::types::PriceRecord;
use chrono::{DateTime, Utc};

/// Render the full index page
pub fn render_index(records: &[PriceRecord], generated_at: DateTime<Utc>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Gold Prices in India</title>
    <style>
        body {{ font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 56rem; color: #1f2937; }}
        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{ padding: 0.6rem 0.8rem; border-bottom: 1px solid #e5e7eb; text-align: left; }}
        th {{ background: #fef3c7; }}
        td.price {{ text-align: right; font-variant-numeric: tabular-nums; }}
        tr.failed td {{ color: #b91c1c; }}
        .error {{ font-size: 0.8rem; color: #6b7280; }}
        footer {{ margin-top: 1rem; font-size: 0.8rem; color: #6b7280; }}
    </style>
</head>
<body>
    <h1>Gold Prices in India</h1>
    {}
    <footer>Updated {}</footer>
</body>
</html>
"#,
        render_table(records),
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn render_table(records: &[PriceRecord]) -> String {
    if records.is_empty() {
        return r#"<p class="empty">No cities configured.</p>"#.to_string();
    }

    let mut html = String::from(
        r#"<table>
        <thead>
            <tr><th>City</th><th>22K</th><th>24K</th><th>Unit</th></tr>
        </thead>
        <tbody>"#,
    );

    for record in records {
        html.push_str(&render_row(record));
    }

    html.push_str("\n        </tbody>\n    </table>");
    html
}

fn render_row(record: &PriceRecord) -> String {
    let (class, note) = match &record.error {
        Some(err) => (
            r#" class="failed""#,
            format!(r#"<div class="error">{}</div>"#, escape_html(err)),
        ),
        None => ("", String::new()),
    };

    format!(
        r#"
            <tr{}><td>{}{}</td><td class="price">{}</td><td class="price">{}</td><td>{}</td></tr>"#,
        class,
        escape_html(&record.city),
        note,
        escape_html(&record.price_22k),
        escape_html(&record.price_24k),
        escape_html(&record.unit),
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(city: &str, p22: &str, p24: &str, unit: &str, error: Option<&str>) -> PriceRecord {
        PriceRecord {
            city: city.to_string(),
            price_22k: p22.to_string(),
            price_24k: p24.to_string(),
            unit: unit.to_string(),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_one_row_per_record_in_order() {
        let records = vec![
            record("Mumbai", "5000", "5400", "per gram", None),
            record("Delhi", "N/A", "5450", "per gram", None),
            record("Pune", "Error", "-", "-", Some("connection refused")),
        ];
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();

        let html = render_index(&records, at);

        assert_eq!(html.matches("<tr").count(), 4); // header + 3 rows
        let mumbai = html.find("Mumbai").unwrap();
        let delhi = html.find("Delhi").unwrap();
        let pune = html.find("Pune").unwrap();
        assert!(mumbai < delhi && delhi < pune);
        assert!(html.contains(r#"<td class="price">5000</td>"#));
        assert!(html.contains(r#"<tr class="failed"><td>Pune<div class="error">connection refused</div>"#));
        assert!(html.contains("Updated 2026-10-19 08:30:00 UTC"));
    }

    #[test]
    fn test_empty_board() {
        let html = render_index(&[], Utc::now());
        assert!(html.contains("No cities configured."));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_values_are_escaped() {
        let records = vec![record(
            "<script>alert(1)</script>",
            "5000",
            "5400",
            "\"g\" & more",
            Some("bad <body>"),
        )];

        let html = render_index(&records, Utc::now());
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&quot;g&quot; &amp; more"));
        assert!(html.contains("bad &lt;body&gt;"));
    }
}
