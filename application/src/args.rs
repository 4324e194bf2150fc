//! [`Args`] definitions.

use clap::{Parser, Subcommand};

/// CLI of the realty classifieds system.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to run.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Searches the listings catalog.
    Search(Search),

    /// Rebuilds the nested locations lookup out of the flat reference tables.
    BuildLocations(BuildLocations),
}

/// `search` command arguments.
#[derive(Debug, clap::Args)]
pub struct Search {
    /// Path to a catalog JSON file (built-in sample catalog otherwise).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Division to require.
    #[arg(long)]
    pub division: Option<String>,

    /// District to require.
    #[arg(long)]
    pub district: Option<String>,

    /// Upazila to require.
    #[arg(long)]
    pub upazila: Option<String>,

    /// Inclusive monthly rent ceiling, in BDT.
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Inclusive area ceiling, in square feet.
    #[arg(long)]
    pub max_area: Option<u32>,

    /// Bedrooms constraint (`3`, `3+` or `any`).
    #[arg(long, default_value = "")]
    pub bedrooms: String,

    /// Bathrooms constraint (`2`, `2+` or `any`).
    #[arg(long, default_value = "")]
    pub bathrooms: String,

    /// Kinds of listings to allow (any kind whenever omitted).
    #[arg(long = "kind")]
    pub kinds: Vec<String>,

    /// Indicator whether only furnished listings pass.
    #[arg(long)]
    pub furnished: bool,

    /// Indicator whether only verified listings pass.
    #[arg(long)]
    pub verified: bool,
}

/// `build-locations` command arguments.
///
/// Paths omitted here fall back to the [`config::Locations`] ones.
///
/// [`config::Locations`]: crate::config::Locations
#[derive(Debug, clap::Args)]
pub struct BuildLocations {
    /// Path to the divisions reference table.
    #[arg(long)]
    pub divisions: Option<String>,

    /// Path to the districts reference table.
    #[arg(long)]
    pub districts: Option<String>,

    /// Path to the upazilas reference table.
    #[arg(long)]
    pub upazilas: Option<String>,

    /// Path to write the nested lookup to.
    #[arg(long)]
    pub out: Option<String>,
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::{Args, Command};

    #[test]
    fn parses_search_command() {
        let args = Args::try_parse_from([
            "app",
            "search",
            "--max-price",
            "50000",
            "--bedrooms",
            "3+",
            "--kind",
            "APARTMENT",
            "--kind",
            "HOUSE",
            "--furnished",
        ])
        .unwrap();

        let Command::Search(search) = args.command else {
            panic!("expected `search` command");
        };
        assert_eq!(search.max_price, Some(50_000));
        assert_eq!(search.bedrooms, "3+");
        assert_eq!(search.kinds, ["APARTMENT", "HOUSE"]);
        assert!(search.furnished);
        assert!(!search.verified);
        assert_eq!(search.division, None);
    }

    #[test]
    fn parses_build_locations_command() {
        let args = Args::try_parse_from([
            "app",
            "build-locations",
            "--out",
            "lookup.json",
        ])
        .unwrap();

        let Command::BuildLocations(build) = args.command else {
            panic!("expected `build-locations` command");
        };
        assert_eq!(build.out.as_deref(), Some("lookup.json"));
        assert_eq!(build.divisions, None);
    }

    #[test]
    fn requires_a_command() {
        assert!(Args::try_parse_from(["app"]).is_err());
    }
}
