mod bar;
mod document;

pub use bar::{draw_category_bar_chart, BAR_FILL, SERIES_LABEL};
pub use document::{Document, Element};

use anyhow::{anyhow, Result};
use plotters_svg::SVGBackend;

/// Id of the placeholder node dashboard pages reserve for the category chart.
pub const CHART_ELEMENT_ID: &str = "categoryChart";

const CHART_SIZE: (u32, u32) = (1920 / 2, 1080 / 2);

/// Renders the complaints-per-category bar chart into the page's placeholder
/// element. Pages without the placeholder are passed through untouched; this
/// is how non dashboard pages opt out of the chart.
pub fn render_category_chart(
    document: &mut Document,
    labels: &[String],
    values: &[i64],
) -> Result<()> {
    let Some(element) = document.element_by_id(CHART_ELEMENT_ID) else {
        return Ok(());
    };
    let target = element.content_range();
    let mut buffer = String::new();
    {
        let backend = SVGBackend::with_string(&mut buffer, CHART_SIZE);
        draw_category_bar_chart(backend, labels, values)
            .map_err(|e| anyhow!("Failed to draw chart: {e}"))?;
    }
    document.replace_range(target, &buffer);
    Ok(())
}

#[cfg(test)]
mod tests {
    use plotters::style::Color;

    use super::*;

    fn page_with_placeholder() -> Document {
        Document::new("<html><body><div id=\"categoryChart\"></div></body></html>")
    }

    fn strings(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn missing_placeholder_is_a_silent_no_op() {
        let mut document = Document::new("<html><body><p>no chart here</p></body></html>");
        let before = document.html().to_string();
        render_category_chart(&mut document, &strings(&["Billing", "Service"]), &[3, 7]).unwrap();
        assert_eq!(document.html(), before);
    }

    #[test]
    fn placeholder_gets_exactly_one_chart() {
        let mut document = page_with_placeholder();
        render_category_chart(
            &mut document,
            &strings(&["Water", "Roads", "Garbage"]),
            &[1, 2, 3],
        )
        .unwrap();
        let html = document.into_html();
        assert_eq!(html.matches("<svg").count(), 1);
        for label in ["Water", "Roads", "Garbage"] {
            assert!(html.contains(label), "label {label} missing from chart");
        }
        assert!(html.contains(SERIES_LABEL));
        // bars keep the fixed fill color no matter the input
        assert!(html.to_lowercase().contains("0d6efd"));
    }

    #[test]
    fn empty_inputs_still_render_a_chart() {
        let mut document = page_with_placeholder();
        render_category_chart(&mut document, &[], &[]).unwrap();
        assert!(document.html().contains("<svg"));
    }

    #[test]
    fn fill_color_constant_is_bootstrap_primary() {
        assert_eq!(BAR_FILL.rgb(), (13, 110, 253));
    }
}
