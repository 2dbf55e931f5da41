//! demos/render_dashboard.rs
//!
//! Loads the dashboard data, renders the page for a couple of stations, prints the view
//! model as JSON and plots the precipitation chart of the first station.
//!
//! Expects the parquet files in `$METEOSHROOMS_DATA_PATH` (or the user data directory).
//!
//! To run this demo:
//! cargo run --example render_dashboard --features examples

use std::error::Error;

use meteoshrooms::{Dashboard, DashboardControls, MapSelectionEvent, TimePeriod};
use plotlars::{Legend, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let dashboard = Dashboard::new().await?;
    println!(
        "Loaded {} stations from {}",
        dashboard.station_names().len(),
        dashboard.data_dir().display()
    );

    // Start with the default station and add one by "clicking" it on the map
    let mut selection = dashboard.new_selection();
    let click = MapSelectionEvent::from_station_names(["Basel / Binningen"]);
    if let Some(notice) = dashboard.handle_map_click(&mut selection, &click) {
        println!("{:?}", notice);
    }

    let controls = DashboardControls {
        time_period: Some(7),
        hide_map: false,
    };
    let view = dashboard.render(&selection, &controls).await?;
    println!("{}", serde_json::to_string_pretty(&view)?);

    let chart = dashboard
        .area_chart()
        .stations(selection.selected())
        .time_period(TimePeriod::new(7))
        .call()
        .await?;
    if let Some(first) = selection.selected().first() {
        let station_chart = chart
            .lazy()
            .filter(col("Station").eq(lit(first.as_str())))
            .collect()?;
        plot_precipitation(&station_chart, first, &view.area_chart.y_label);
        println!("Plot shown in browser.");
    }

    Ok(())
}

fn plot_precipitation(data: &DataFrame, station: &str, y_label: &str) {
    TimeSeriesPlot::builder()
        .data(data)
        .x("Time")
        .y("Precipitation")
        .colors(vec![Rgb(69, 157, 230)])
        .plot_title(Text::from(station).font("Arial").size(18))
        .legend(&Legend::new().x(0.05).y(0.9))
        .x_title("Time")
        .y_title(Text::from(y_label).color(Rgb(0, 0, 0)))
        .build()
        .plot();
}
