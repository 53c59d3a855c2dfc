// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use running_page_stats::config;
use running_page_stats::logging;
use running_page_stats::models::{format_pace, format_run_time, int_comma, Activity, RunId};
use running_page_stats::stats::{FilterKind, StatsEngine};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "run-stats")]
#[command(version, about = "Location, period and yearly statistics for a running-page activity dataset")]
struct Cli {
    /// Config file (defaults to ./stats_config.toml, then the user config directory)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Activity dataset, overrides the configured path
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Counts of activities, years, countries, provinces and cities
    Summary,
    /// Cities by cumulative distance
    Cities,
    /// Period title frequencies
    Periods {
        /// Group by city with the treadmill entry first
        #[arg(long)]
        grouped: bool,
    },
    /// Years with activities, newest first
    Years,
    /// Activities matching a filter, newest first
    Filter {
        /// Filter kind (year, city, title, type, type-name) and value; `Total` matches everything
        #[arg(long, required = true, num_args = 2, value_names = ["KIND", "VALUE"])]
        by: Vec<String>,

        /// Second filter applied after the first
        #[arg(long, num_args = 2, value_names = ["KIND", "VALUE"])]
        then_by: Option<Vec<String>>,

        /// Oldest first
        #[arg(long)]
        oldest_first: bool,
    },
    /// Derived details for one activity
    Show {
        run_id: RunId,
    },
}

fn main() -> Result<()> {
    logging::init_from_env()?;

    let cli = Cli::parse();

    let mut stats_config = config::load_with_env(cli.config)?;
    if let Some(data) = cli.data {
        stats_config.activities_path = data;
    }

    let path = stats_config.activities_path.clone();
    let engine = StatsEngine::from_path(&path, stats_config)
        .with_context(|| format!("Failed to load activities from {}", path.display()))?;
    info!(activities = engine.activities().len(), "Running stats command");

    match cli.command {
        Commands::Summary => print_summary(&engine, cli.json),
        Commands::Cities => print_cities(&engine, cli.json),
        Commands::Periods { grouped } => print_periods(&engine, grouped, cli.json),
        Commands::Years => print_years(&engine, cli.json),
        Commands::Filter {
            by,
            then_by,
            oldest_first,
        } => {
            let (kind, value) = parse_filter(&by)?;
            let secondary = then_by.as_deref().map(parse_filter).transpose()?;
            let selected = engine.filter(kind, value, secondary, oldest_first);
            print_activities(&engine, &selected, cli.json)
        }
        Commands::Show { run_id } => {
            let activity = engine
                .activities()
                .iter()
                .find(|activity| activity.run_id == run_id)
                .ok_or_else(|| anyhow!("No activity with run_id {}", run_id))?;
            print_activity_details(&engine, activity, cli.json)
        }
    }
}

fn parse_filter(pair: &[String]) -> Result<(FilterKind, &str)> {
    match pair {
        [kind, value] => Ok((kind.parse()?, value.as_str())),
        _ => Err(anyhow!("Expected a filter kind and a value")),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_summary(engine: &StatsEngine, as_json: bool) -> Result<()> {
    let stats = engine.stats();
    let summary = stats.summary();
    if as_json {
        return print_json(&json!({
            "summary": summary,
            "thisYear": stats.this_year,
            "countries": stats.countries,
            "provinces": stats.provinces,
        }));
    }

    println!("Activities: {}", int_comma(&summary.activities.to_string()));
    println!("Years:      {} (latest {})", summary.years, stats.this_year);
    println!("Countries:  {} {}", summary.countries, stats.countries.join(", "));
    println!("Provinces:  {} {}", summary.provinces, stats.provinces.join(", "));
    println!("Cities:     {}", summary.cities);
    for entry in stats.period_ranking() {
        println!("{}: {}", entry.title, entry.count);
    }
    Ok(())
}

fn print_cities(engine: &StatsEngine, as_json: bool) -> Result<()> {
    let stats = engine.stats();
    if as_json {
        return print_json(&stats.cities);
    }

    for (city, meters) in stats.cities_by_distance() {
        println!("{:<16} {:>10.1} KM", city, meters / 1000.0);
    }
    Ok(())
}

fn print_periods(engine: &StatsEngine, grouped: bool, as_json: bool) -> Result<()> {
    let stats = engine.stats();
    match (grouped, as_json) {
        (true, true) => print_json(&stats.sorted_run_period),
        (false, true) => print_json(&stats.run_period),
        (true, false) => {
            for entry in &stats.sorted_run_period {
                println!("{:<24} {}", entry.title, entry.count);
            }
            Ok(())
        }
        (false, false) => {
            for (title, count) in stats.run_period.iter() {
                println!("{:<24} {}", title, count);
            }
            Ok(())
        }
    }
}

fn print_years(engine: &StatsEngine, as_json: bool) -> Result<()> {
    let stats = engine.stats();
    if as_json {
        return print_json(&stats.years);
    }

    for year in &stats.years {
        println!("{}", year);
    }
    Ok(())
}

fn print_activities(engine: &StatsEngine, activities: &[&Activity], as_json: bool) -> Result<()> {
    if as_json {
        return print_json(&activities);
    }

    for activity in activities {
        println!(
            "{} | {} | {} | {}",
            activity.title_for_show().trim_end(),
            engine.title(activity),
            format_run_time(&activity.moving_time),
            format_pace(activity.average_speed),
        );
    }
    println!("{} activities", activities.len());
    Ok(())
}

fn print_activity_details(engine: &StatsEngine, activity: &Activity, as_json: bool) -> Result<()> {
    let location = engine.location(activity);
    let period = engine.classify(activity);
    let path = engine.path_for_run(activity);

    if as_json {
        return print_json(&json!({
            "runId": activity.run_id,
            "title": engine.title(activity),
            "titleNoCity": engine.title_no_city(activity),
            "period": period,
            "location": location,
            "movingSeconds": activity.moving_time_seconds(),
            "pace": format_pace(activity.average_speed),
            "path": path,
        }));
    }

    println!("{}", activity.title_for_show().trim_end());
    println!("Title:    {}", engine.title(activity));
    println!("Period:   {} ({})", period, engine.title_no_city(activity));
    println!(
        "Location: {} / {} / {}",
        location.country, location.province, location.city
    );
    if let Some((lon, lat)) = location.coordinate {
        println!("Coordinate: {:.4}, {:.4}", lon, lat);
    }
    println!(
        "Time:     {} ({}s), pace {}",
        format_run_time(&activity.moving_time),
        activity.moving_time_seconds(),
        format_pace(activity.average_speed)
    );
    println!("Path:     {} points", path.len());
    Ok(())
}
