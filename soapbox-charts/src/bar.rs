use plotters::prelude::*;
use plotters::style::RGBColor;

/// Bootstrap primary blue, the fill every dataset bar gets.
pub const BAR_FILL: RGBColor = RGBColor(13, 110, 253);

/// Name of the single dataset shown in the legend.
pub const SERIES_LABEL: &str = "Complaints";

/// Draws one bar per category onto the given backend. Labels and values are
/// taken positionally; no length check happens here, bars without a matching
/// category fall outside the axis and are clipped by the renderer.
pub fn draw_category_bar_chart<'a, T>(
    backend: T,
    labels: &[String],
    values: &[i64],
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'a>>
where
    T: 'a + DrawingBackend,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    // keep the axes drawable even when there is nothing to plot yet
    let columns = labels.len().max(1);
    let max_count = values.iter().copied().max().unwrap_or(0).max(1);
    let y_max = max_count + (max_count / 10).max(1);

    let mut chart = ChartBuilder::on(&root)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .margin(10)
        .build_cartesian_2d((0..columns).into_segmented(), 0i64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(RGBColor(60, 60, 60).mix(0.2))
        .light_line_style(RGBColor(60, 60, 60).mix(0.05))
        .x_desc("Category")
        .y_desc("Complaints")
        .x_labels(columns)
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(index) => labels.get(*index).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BAR_FILL.filled())
                .margin(8)
                .data(values.iter().enumerate().map(|(index, count)| (index, *count))),
        )?
        .label(SERIES_LABEL)
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BAR_FILL.filled()));

    chart
        .configure_series_labels()
        .border_style(RGBColor(60, 60, 60).mix(0.4))
        .background_style(WHITE.mix(0.8))
        .draw()?;

    // flush manually so backend IO errors surface here instead of on drop
    root.present()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use plotters_svg::SVGBackend;

    use super::*;

    #[test]
    fn mismatched_lengths_are_left_to_the_renderer() {
        let mut buffer = String::new();
        let backend = SVGBackend::with_string(&mut buffer, (400, 300));
        draw_category_bar_chart(backend, &["Water".to_string()], &[1, 2, 3]).unwrap();
        assert!(buffer.contains("<svg"));
    }
}
