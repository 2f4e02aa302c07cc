mod natal;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use orrery::{
    Engine, Ephemeris, GeoLocation, MeanElementsEphemeris, PlanetPosition, SwissEphemerisAdapter,
};
use orrery_config::{Backend, OrreryConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Astrological computations printed as JSON")]
struct Args {
    /// Path to orrery.toml (otherwise ORRERY_CONFIG or configs/orrery.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the low-precision mean-elements model instead of Swiss Ephemeris.
    #[arg(long, global = true)]
    mean: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Zodiac positions of the ten bodies.
    Positions {
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Moon phase, illumination and next lunations.
    Moon {
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Transit aspects to a natal set.
    Aspects {
        #[arg(long)]
        natal: PathBuf,
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Daily transit summary with cosmic weather.
    Daily {
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        #[arg(long)]
        natal: Option<PathBuf>,
    },
    /// Lunations, ingresses and stations within a month.
    Month { year: i32, month: u32 },
    /// Planetary hours for a date at the observer.
    Hours {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Current and upcoming retrogrades.
    Retrogrades {
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Year timeline: retrogrades, eclipses, transits and best months.
    Year {
        year: i32,
        #[arg(long)]
        natal: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = OrreryConfig::load(args.config.as_deref())?;
    let engine = Engine::with_settings(build_ephemeris(&config, args.mean)?, config.engine_settings());
    let now = Utc::now();

    match args.command {
        Command::Positions { at } => print(&engine.resolve_positions(at.unwrap_or(now))?),
        Command::Moon { at } => print(&engine.resolve_moon_phase(at.unwrap_or(now))?),
        Command::Aspects { natal, at } => {
            let natal = natal::load_natal(&natal)?;
            print(&engine.transit_aspects(at.unwrap_or(now), &natal)?)
        }
        Command::Daily { at, natal } => {
            let natal = load_optional_natal(natal.as_deref())?;
            print(&engine.compose_daily_summary(at.unwrap_or(now), natal.as_deref())?)
        }
        Command::Month { year, month } => print(&engine.scan_month_events(year, month)?),
        Command::Hours { date, lat, lon } => {
            let observer = match (lat, lon) {
                (Some(lat), Some(lon)) => GeoLocation::new(lat, lon),
                _ => config.observer(),
            };
            let date = date.unwrap_or_else(|| engine.local_date(now));
            print(&engine.compute_planetary_hours(date, &observer, now)?)
        }
        Command::Retrogrades { at } => print(&engine.retrograde_data(at.unwrap_or(now))?),
        Command::Year { year, natal } => {
            let natal = load_optional_natal(natal.as_deref())?;
            print(&engine.build_year_timeline(year, natal.as_deref())?)
        }
    }
}

fn build_ephemeris(config: &OrreryConfig, force_mean: bool) -> anyhow::Result<Box<dyn Ephemeris>> {
    if force_mean || config.ephemeris.backend == Backend::Mean {
        log::info!("Using mean-elements ephemeris");
        return Ok(Box::new(MeanElementsEphemeris::new()));
    }
    let adapter = SwissEphemerisAdapter::new(config.ephemeris.path.clone())
        .context("Failed to initialise Swiss Ephemeris")?;
    log::info!("Using Swiss Ephemeris ({:?})", adapter.mode());
    Ok(Box::new(adapter))
}

fn load_optional_natal(path: Option<&Path>) -> anyhow::Result<Option<Vec<PlanetPosition>>> {
    path.map(natal::load_natal).transpose()
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
