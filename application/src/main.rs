use std::{fs, io, process, str::FromStr, sync::OnceLock};

use application::{
    args::{self, Command},
    config, Args, Config, Service,
};
use common::Money;
use serde::de::DeserializeOwned;
use service::{
    domain::{listing::Kind, location::table, Locations},
    infra::{memory, InMemory},
    query,
    read::listing::list,
    Query as _,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

fn main() -> process::ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    if start().is_ok() {
        process::ExitCode::SUCCESS
    } else {
        process::ExitCode::FAILURE
    }
}

fn start() -> Result<(), ()> {
    let Args { config, command } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        catalog,
        locations,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    match command {
        Command::Search(args) => search(args, catalog),
        Command::BuildLocations(args) => build_locations(args, locations),
    }
}

/// Queries the catalog with the filter assembled from the provided
/// [`args::Search`] and prints the matching listings.
fn search(args: args::Search, conf: config::Catalog) -> Result<(), ()> {
    let args::Search {
        catalog,
        division,
        district,
        upazila,
        max_price,
        max_area,
        bedrooms,
        bathrooms,
        kinds,
        furnished,
        verified,
    } = args;

    let catalog = match catalog.or(conf.path) {
        Some(path) => {
            let json = fs::read_to_string(&path).map_err(|e| {
                log::error!("failed to read catalog from `{path}`: {e}");
            })?;
            InMemory::from_json(&json).map_err(|e| {
                log::error!("failed to parse catalog from `{path}`: {e}");
            })?
        }
        None => InMemory::new(memory::sample()),
    };

    let filter = list::Filter {
        division: parse_criterion(division, "division"),
        district: parse_criterion(district, "district"),
        upazila: parse_criterion(upazila, "upazila"),
        max_price: max_price.map(Money::bdt),
        max_area,
        bedrooms: list::Rooms::from_token(&bedrooms),
        bathrooms: list::Rooms::from_token(&bathrooms),
        kinds: kinds
            .iter()
            .filter_map(|token| {
                Kind::from_str(token)
                    .map_err(|e| {
                        log::warn!("ignoring kind `{token}`: {e}");
                    })
                    .ok()
            })
            .collect(),
        furnished_only: furnished,
        verified_only: verified,
    };

    let listings = Service::new(catalog)
        .execute(query::listings::List::by(filter))
        .map_err(|e| {
            log::error!("failed to select listings: {e}");
        })?;

    for l in &listings {
        println!(
            "#{} [{}] {} | {}, {}, {} | {} | {} sqft | {}bd/{}ba{}{}",
            l.id,
            l.kind,
            l.title,
            l.location.upazila,
            l.location.district,
            l.location.division,
            l.price,
            l.area,
            l.num_bedrooms,
            l.num_bathrooms,
            if l.furnished { " | furnished" } else { "" },
            if l.verified { " | verified" } else { "" },
        );
    }
    println!("{} listing(s) matched", listings.len());

    Ok(())
}

/// Parses an optional filter criterion, dropping it with a warning whenever
/// malformed, so bad input widens the search instead of failing it.
fn parse_criterion<T: FromStr<Err = &'static str>>(
    token: Option<String>,
    what: &str,
) -> Option<T> {
    token.and_then(|t| {
        t.parse()
            .map_err(|e| {
                log::warn!("ignoring {what} `{t}`: {e}");
            })
            .ok()
    })
}

/// Rebuilds the nested [`Locations`] lookup out of the three flat reference
/// tables and writes it out as pretty-printed JSON.
fn build_locations(
    args: args::BuildLocations,
    conf: config::Locations,
) -> Result<(), ()> {
    let args::BuildLocations {
        divisions,
        districts,
        upazilas,
        out,
    } = args;

    let divisions: table::Divisions =
        read_table(&divisions.unwrap_or(conf.divisions))?;
    let districts: table::Districts =
        read_table(&districts.unwrap_or(conf.districts))?;
    let upazilas: table::Upazilas =
        read_table(&upazilas.unwrap_or(conf.upazilas))?;

    let locations = Locations::from_tables(
        &divisions.into_rows(),
        &districts.into_rows(),
        &upazilas.into_rows(),
    );

    let json = serde_json::to_vec_pretty(&locations).map_err(|e| {
        log::error!("failed to serialize locations: {e}");
    })?;

    let out = out.unwrap_or(conf.out);
    // Write-then-rename keeps a torn run from clobbering the previous lookup.
    let tmp = format!("{out}.tmp");
    fs::write(&tmp, json).map_err(|e| {
        log::error!("failed to write `{tmp}`: {e}");
    })?;
    fs::rename(&tmp, &out).map_err(|e| {
        log::error!("failed to move `{tmp}` to `{out}`: {e}");
    })?;

    log::info!(
        "wrote {} divisions to `{out}`",
        locations.divisions().count(),
    );

    Ok(())
}

/// Reads a reference table out of the JSON file at the provided `path`.
fn read_table<T: DeserializeOwned>(path: &str) -> Result<T, ()> {
    let json = fs::read_to_string(path).map_err(|e| {
        log::error!("failed to read `{path}`: {e}");
    })?;
    serde_json::from_str(&json).map_err(|e| {
        log::error!("failed to parse `{path}`: {e}");
    })
}
