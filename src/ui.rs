pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget},
};

use crate::{config::Config, series::ChartSeries, stats::SeriesKind};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

pub const DISMISS_HINT: &str = "(q)uit / (esc)ape";

/// Max and Avg line chart over sorted difficulty keys.
#[derive(Debug)]
pub struct ChartView<'a> {
    pub series: &'a ChartSeries,
    pub config: &'a Config,
}

impl<'a> ChartView<'a> {
    pub fn new(series: &'a ChartSeries, config: &'a Config) -> Self {
        Self { series, config }
    }

    fn footer(&self) -> String {
        match (self.series.keys.first(), self.series.keys.last()) {
            (Some(first), Some(last)) if self.series.len() > 1 => format!(
                "{} keys, {} to {}   {}",
                self.series.len(),
                first,
                last,
                DISMISS_HINT
            ),
            (Some(only), _) => format!("1 key, {}   {}", only, DISMISS_HINT),
            _ => DISMISS_HINT.to_string(),
        }
    }
}

impl Widget for &ChartView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(1),    // chart
                Constraint::Length(1), // footer
            ])
            .split(area);

        // ratatui borrows point slices, so they have to outlive the datasets
        let points: Vec<(SeriesKind, Vec<(f64, f64)>)> = SeriesKind::ALL
            .iter()
            .map(|&kind| {
                let tuples = self
                    .series
                    .points(kind)
                    .into_iter()
                    .map(Into::into)
                    .collect();
                (kind, tuples)
            })
            .collect();

        let mut datasets = Vec::with_capacity(points.len() * 2);
        for (kind, tuples) in &points {
            let style = Style::default().fg(self.config.color(*kind));
            datasets.push(
                Dataset::default()
                    .name(kind.to_string())
                    .marker(Marker::Braille)
                    .style(style)
                    .graph_type(GraphType::Line)
                    .data(tuples),
            );
            if self.config.points {
                datasets.push(
                    Dataset::default()
                        .marker(Marker::Dot)
                        .style(style.add_modifier(Modifier::BOLD))
                        .graph_type(GraphType::Scatter)
                        .data(tuples),
                );
            }
        }

        let (x_bounds, x_labels) = charting::x_axis_params(&self.series.keys);
        let y_bounds = charting::y_bounds(self.series.all_values());

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(self.config.title.clone(), bold_style)),
            )
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
            .x_axis(
                Axis::default()
                    .title(self.config.x_title.clone())
                    .bounds(x_bounds)
                    .labels(
                        x_labels
                            .into_iter()
                            .map(|l| Span::styled(l, bold_style))
                            .collect::<Vec<_>>(),
                    ),
            )
            .y_axis(
                Axis::default()
                    .title(self.config.y_title.clone())
                    .bounds(y_bounds)
                    .labels(
                        charting::y_labels(y_bounds)
                            .into_iter()
                            .map(|l| Span::styled(l, bold_style))
                            .collect::<Vec<_>>(),
                    ),
            );

        chart.render(chunks[0], buf);

        Paragraph::new(Line::from(Span::styled(self.footer(), dim_style)))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }
}
