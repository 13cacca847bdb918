//! Static HTML product report

use crate::output::stats::ReportStats;
use crate::output::OutputResult;
use crate::record::PageRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Inline image shown when a product image fails to load
const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;utf8,\
<svg xmlns=%27http://www.w3.org/2000/svg%27 width=%27200%27 height=%27200%27>\
<rect width=%27100%25%27 height=%27100%25%27 fill=%27%23eee%27/>\
<text x=%2750%25%27 y=%2750%25%27 font-family=%27sans-serif%27 font-size=%2716%27 \
fill=%27%23999%27 text-anchor=%27middle%27 dominant-baseline=%27middle%27>No image</text></svg>";

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;background:#f5f5f7;color:#222}\
header{background:#232f3e;color:#fff;padding:24px 32px}\
.stats{display:flex;gap:16px;padding:16px 32px;flex-wrap:wrap}\
.stat{background:#fff;border-radius:8px;padding:12px 20px;box-shadow:0 1px 3px rgba(0,0,0,.1)}\
.stat b{display:block;font-size:24px}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:16px;padding:16px 32px}\
.card{background:#fff;border-radius:8px;padding:16px;box-shadow:0 1px 3px rgba(0,0,0,.1)}\
.card img{width:100%;height:200px;object-fit:contain}\
.price{font-size:20px;color:#b12704;font-weight:bold}\
.badge{display:inline-block;background:#146eb4;color:#fff;border-radius:4px;padding:2px 8px;font-size:12px}\
.empty{margin:32px;padding:32px;background:#fff;border-radius:8px;text-align:center}";

/// Writes the HTML report for a run
pub fn write_html_report(records: &[PageRecord], output_path: &Path) -> OutputResult<()> {
    let html = render_html_report(records);

    let mut file = File::create(output_path)?;
    file.write_all(html.as_bytes())?;

    Ok(())
}

/// Renders the report page
///
/// Shows aggregate counts, then one card per record, or a "no products found"
/// panel when the list is empty.
pub fn render_html_report(records: &[PageRecord]) -> String {
    let stats = ReportStats::from_records(records);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<title>Product Report</title>\n");
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n");

    html.push_str("<header><h1>Product Report</h1>");
    if let Some(latest) = records.iter().map(|r| r.retrieved_at).max() {
        html.push_str(&format!(
            "<p>Retrieved {}</p>",
            latest.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    html.push_str("</header>\n");

    html.push_str("<section class=\"stats\">\n");
    html.push_str(&stat_tile("Products", stats.total));
    html.push_str(&stat_tile("With price", stats.with_price));
    html.push_str(&stat_tile("With image", stats.with_image));
    html.push_str(&stat_tile("Sites", stats.distinct_sites));
    html.push_str("</section>\n");

    if records.is_empty() {
        html.push_str(
            "<div class=\"empty\"><h2>No products found</h2>\
             <p>None of the configured URLs produced a product record.</p></div>\n",
        );
    } else {
        html.push_str("<section class=\"grid\">\n");
        for record in records {
            html.push_str(&product_card(record));
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn stat_tile(label: &str, value: usize) -> String {
    format!(
        "<div class=\"stat\"><b>{}</b>{}</div>\n",
        value,
        escape_html(label)
    )
}

fn product_card(record: &PageRecord) -> String {
    let image_src = if record.has_image() {
        record.image_url.as_str()
    } else {
        PLACEHOLDER_IMAGE
    };
    let price = if record.has_price() {
        record.price.as_str()
    } else {
        "Price unavailable"
    };

    format!(
        "<article class=\"card\">\
         <img src=\"{src}\" alt=\"{name}\" onerror=\"this.onerror=null;this.src='{placeholder}'\">\
         <h3>{name}</h3>\
         <p class=\"price\">{price}</p>\
         <p class=\"stock\">{stock}</p>\
         <span class=\"badge\">{site}</span>\
         <p><a href=\"{url}\" target=\"_blank\" rel=\"noopener\">View product</a></p>\
         </article>\n",
        src = escape_html(image_src),
        name = escape_html(record.display_name()),
        placeholder = escape_html(PLACEHOLDER_IMAGE),
        price = escape_html(price),
        stock = escape_html(&record.stock_status),
        site = escape_html(record.site.label()),
        url = escape_html(&record.url),
    )
}

/// Escapes text for use in HTML content and double- or single-quoted attributes
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
