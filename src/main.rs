//! # Buoy Tracker Application Entry Point
//!
//! This binary crate wires the shared report client and the favorite station
//! store into the two surfaces of the application: the station view (`show`,
//! `set`) and the widget (`widget`), rendered as text on the terminal.

// Test modules
#[cfg(test)]
mod tests;

use buoy_data_lib::buoy_data::BuoyReportClient;
use buoy_data_lib::config::{Config, CONFIG_FILE};
use buoy_data_lib::display::{draw_ascii, render_widget};
use buoy_data_lib::station_view::StationView;
use buoy_data_lib::stations::{write_csv, StationDirectory};
use buoy_data_lib::widget::WidgetTimelineProvider;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Latest NOAA buoy swell for your favorite station
#[derive(Parser, Debug)]
#[command(name = "buoy-tracker", version)]
struct Args {
    /// Path to the configuration TOML file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the favorite station's latest swell (default)
    Show {
        /// Print the display fields as JSON
        #[arg(long)]
        json: bool,
    },
    /// Make STATION the favorite and show it
    Set { station: String },
    /// Render the widget entry
    Widget {
        /// Keep refreshing on the widget's reload schedule
        #[arg(long)]
        watch: bool,
    },
    /// Export the active NDBC stations as id,name,lat,lon CSV
    Stations {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let config = Config::load_from_path(&args.config);
    let client = BuoyReportClient::with_base_url(config.feed.base_url.as_str());
    let store = Arc::new(config.favorites());

    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    match args.command.unwrap_or(Command::Show { json: false }) {
        Command::Show { json } => {
            let mut view = StationView::new(client, store);
            let fields = rt.block_on(view.on_appear());
            if json {
                println!("{}", serde_json::to_string_pretty(fields)?);
            } else {
                draw_ascii(fields);
            }
        }
        Command::Set { station } => {
            let mut view = StationView::new(client, store);
            let fields = rt.block_on(view.submit_station(&station))?;
            draw_ascii(fields);
        }
        Command::Widget { watch } => {
            let provider = WidgetTimelineProvider::new(client, store, config.refresh_interval());
            rt.block_on(async {
                loop {
                    let timeline = provider.timeline().await;
                    for entry in &timeline.entries {
                        print!("{}", render_widget(&entry.fields));
                    }
                    if !watch {
                        break;
                    }

                    let wait = timeline.reload_in(chrono::Local::now());
                    tracing::info!(seconds = wait.as_secs(), "next widget refresh scheduled");
                    tokio::time::sleep(wait).await;
                }
            });
        }
        Command::Stations { output } => {
            let directory = StationDirectory::with_url(config.feed.stations_url.as_str());
            let stations = rt.block_on(directory.fetch_active())?;
            match output {
                Some(path) => {
                    write_csv(&stations, File::create(&path)?)?;
                    tracing::info!(count = stations.len(), path = %path.display(), "station list written");
                }
                None => write_csv(&stations, io::stdout().lock())?,
            }
        }
    }

    Ok(())
}
