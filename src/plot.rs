//! Scatter plots of event histories.
//!
//! Customers are drawn on a categorical y axis: each distinct customer gets an integer position, in
//! the order in which it first appears in the records. Points are coloured by event kind.
use crate::event::{CustomerID, EventKind, EventRecord};
use anyhow::{Result, ensure};
use indexmap::IndexSet;
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{Palette, Palette99};
use std::ops::Range;
use std::path::Path;

/// The default y-axis range when fixed bounds are used
pub const DEFAULT_FIXED_Y_AXIS_RANGE: (f64, f64) = (0.0, 60.0);

/// Radius of points, in pixels
const POINT_SIZE: i32 = 3;

/// Fraction of the range of `t` added to each side of the x axis
const X_AXIS_MARGIN: f64 = 0.05;

/// How the bounds of the customer (y) axis are chosen
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum YAxisBounds {
    /// The range of customer positions, padded by half a position on each side
    #[default]
    Padded,
    /// A constant range, regardless of the data
    Fixed {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
}

impl YAxisBounds {
    /// Fixed bounds covering the default range
    pub fn fixed_default() -> Self {
        let (min, max) = DEFAULT_FIXED_Y_AXIS_RANGE;
        Self::Fixed { min, max }
    }

    /// The y-axis range for the given number of customers
    pub fn range(self, num_customers: usize) -> Range<f64> {
        match self {
            // With no customers, show a single empty category
            Self::Padded => -0.5..(num_customers.max(1) as f64 - 0.5),
            Self::Fixed { min, max } => min..max,
        }
    }
}

/// Options for drawing an event history plot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotOptions {
    /// How to choose the bounds of the customer axis
    pub y_axis_bounds: YAxisBounds,
    /// Optional caption for the plot
    pub caption: Option<String>,
}

/// Positions of minor gridlines: every half-integer within `range`
pub fn minor_gridlines(range: &Range<f64>) -> Vec<f64> {
    let first = (range.start - 0.5).ceil() + 0.5;
    let count = if range.end < first {
        0
    } else {
        (range.end - first).floor() as usize + 1
    };

    (0..count).map(|i| first + i as f64).collect()
}

/// The range of `t` to show on the x axis
fn time_range(records: &[EventRecord]) -> Range<f64> {
    let Some((min, max)) = records.iter().fold(None, |acc, record| match acc {
        None => Some((record.t, record.t)),
        Some((min, max)) => Some((f64::min(min, record.t), f64::max(max, record.t))),
    }) else {
        return 0.0..1.0;
    };

    let margin = if max > min {
        (max - min) * X_AXIS_MARGIN
    } else {
        0.5
    };

    (min - margin)..(max + margin)
}

/// Number of y-axis ticks needed to put one on every integer position within `range`
fn y_tick_count(range: &Range<f64>) -> usize {
    (range.end - range.start).floor() as usize + 1
}

/// Get the colour used for the event kind at the given index
fn event_colour(index: usize) -> RGBColor {
    let (r, g, b) = Palette99::COLORS[index % Palette99::COLORS.len()];
    RGBColor(r, g, b)
}

/// Get the tick label for a position on the customer axis
fn customer_label(customers: &IndexSet<&CustomerID>, y: f64) -> String {
    if y.fract() != 0.0 || y < 0.0 {
        return String::new();
    }

    customers
        .get_index(y as usize)
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Draw a scatter plot of an event history onto the given drawing area.
///
/// `t` is plotted on the x axis and customer on the y axis, with points coloured by event kind.
/// Minor gridlines are drawn between customers. An empty set of records gives an empty plot.
///
/// # Arguments
///
/// * `area` - The drawing area to draw on
/// * `records` - Events to plot
/// * `options` - Plot options
pub fn plot_event_history<DB>(
    area: &DrawingArea<DB, Shift>,
    records: &[EventRecord],
    options: &PlotOptions,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let customers: IndexSet<&CustomerID> = records.iter().map(|r| &r.customer).collect();
    let events: IndexSet<&EventKind> = records.iter().map(|r| &r.event).collect();

    let x_range = time_range(records);
    let y_range = options.y_axis_bounds.range(customers.len());
    ensure!(
        y_range.start < y_range.end,
        "Invalid y-axis bounds: {} to {}",
        y_range.start,
        y_range.end
    );

    let mut builder = ChartBuilder::on(area);
    builder.margin(12).x_label_area_size(40).y_label_area_size(60);
    if let Some(caption) = &options.caption {
        builder.caption(caption, ("sans-serif", 20));
    }
    let mut chart = builder.build_cartesian_2d(x_range.clone(), y_range.clone())?;

    // Major gridlines are suppressed in favour of the minor ones drawn below
    let label_formatter = |y: &f64| customer_label(&customers, *y);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("t")
        .y_desc("customer")
        .y_labels(y_tick_count(&y_range))
        .y_label_formatter(&label_formatter)
        .draw()?;

    chart.draw_series(minor_gridlines(&y_range).into_iter().map(|y| {
        PathElement::new(vec![(x_range.start, y), (x_range.end, y)], BLACK.mix(0.2))
    }))?;

    for (i, event) in events.iter().enumerate() {
        let colour = event_colour(i);
        let points = records
            .iter()
            .filter(|r| r.event == **event)
            .filter_map(|r| Some((r.t, customers.get_index_of(&r.customer)? as f64)));

        chart
            .draw_series(points.map(|point| Circle::new(point, POINT_SIZE, colour.filled())))?
            .label(event.to_string())
            .legend(move |(x, y)| Circle::new((x, y), POINT_SIZE, colour.filled()));
    }

    if !events.is_empty() {
        chart
            .configure_series_labels()
            .border_style(BLACK.mix(0.4))
            .background_style(WHITE.mix(0.8))
            .draw()?;
    }

    debug!(
        "Plotted {} events for {} customers",
        records.len(),
        customers.len()
    );

    Ok(())
}

/// Plot an event history and save it as an SVG file.
///
/// # Arguments
///
/// * `records` - Events to plot
/// * `output_path` - Path of the SVG file to create
/// * `size` - Width and height of the plot in pixels
/// * `options` - Plot options
pub fn write_event_history_plot(
    records: &[EventRecord],
    output_path: &Path,
    size: (u32, u32),
    options: &PlotOptions,
) -> Result<()> {
    let root = SVGBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)?;
    plot_event_history(&root, records, options)?;
    root.present()?;

    Ok(())
}
