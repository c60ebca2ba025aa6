use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use unitconv::catalog::{self, Catalog};
use unitconv::units::{self, ConversionKind, Unit, UnitConverter, UnitError};

#[derive(Parser)]
#[command(name = "unitconv")]
#[command(about = "Convert costs and quantities between units", long_about = None)]
struct Cli {
    /// Catalog file (.json or .toml) to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount to another unit
    Convert {
        /// Amount with unit (e.g., "2.5 kg"), or a bare number with --from
        amount: String,

        /// Source unit, when the amount has none
        #[arg(long)]
        from: Option<String>,

        /// Target unit
        #[arg(long)]
        to: String,

        /// Conversion kind: cost or quantity
        #[arg(short, long, default_value = "quantity")]
        kind: ConversionKind,

        /// Round the result to two decimals
        #[arg(long)]
        round: bool,

        /// Fail on mismatched unit types or missing cross-system conversions
        #[arg(long)]
        strict: bool,
    },

    /// List units in the catalog
    Units {
        /// Only list this unit type (e.g., "weight")
        #[arg(long)]
        unit_type: Option<String>,
    },

    /// Print the base unit for a unit
    Base {
        /// Unit identifier (e.g., "lb")
        unit: String,
    },

    /// Validate a catalog file
    Check {
        /// Catalog file path
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn run(cli: Cli) -> units::Result<()> {
    let loaded;
    let catalog = match cli.catalog.as_deref() {
        Some(path) => {
            loaded = load_catalog(path)?;
            &loaded
        }
        None => Catalog::global(),
    };

    match cli.command {
        Commands::Convert {
            amount,
            from,
            to,
            kind,
            round,
            strict,
        } => convert(catalog, &amount, from.as_deref(), &to, &kind, round, strict),
        Commands::Units { unit_type } => list_units(catalog, unit_type.as_deref()),
        Commands::Base { unit } => print_base_unit(catalog, &unit),
        Commands::Check { path } => check_catalog(&path),
    }
}

fn load_catalog(path: &Path) -> units::Result<Catalog> {
    let (catalog, validation) = catalog::load_catalog_from_file(path)?;
    if validation.has_issues() {
        eprintln!("{}", validation);
    }
    Ok(catalog)
}

fn convert(
    catalog: &Catalog,
    amount: &str,
    from: Option<&str>,
    to: &str,
    kind: &ConversionKind,
    round: bool,
    strict: bool,
) -> units::Result<()> {
    let (value, from) = if units::looks_like_amount(amount) {
        let (value, unit) = units::parse_amount(amount)?;
        if let Some(from) = from {
            if from != unit {
                return Err(UnitError::ParseError(format!(
                    "Amount '{}' conflicts with --from {}",
                    amount, from
                )));
            }
        }
        (value, unit)
    } else {
        let from = from.ok_or_else(|| {
            UnitError::ParseError(format!("No unit in '{}' and no --from given", amount))
        })?;
        (units::parse_value(amount)?, from.to_string())
    };

    let converter = UnitConverter::with_catalog(catalog, &from, to);
    let result = if strict {
        converter.try_convert(kind, value)?
    } else {
        converter.convert(kind, value)
    };

    println!(
        "{} {} = {}",
        value,
        from,
        units::format_amount(result, converter.target(), round)
    );

    Ok(())
}

fn list_units(catalog: &Catalog, unit_type: Option<&str>) -> units::Result<()> {
    let selected: Vec<_> = catalog
        .unit_types()
        .iter()
        .filter(|t| unit_type.map_or(true, |name| t.name == name))
        .collect();

    if selected.is_empty() {
        if let Some(name) = unit_type {
            return Err(UnitError::ParseError(format!("Unknown unit type '{}'", name)));
        }
    }

    for t in selected {
        println!("{} ({} units):", t.name, t.units.len());
        for unit in &t.units {
            let factor = match (unit.base_unit, unit.conversion) {
                (true, _) => "base".to_string(),
                (false, Some(factor)) => format!("x{}", factor),
                (false, None) => "-".to_string(),
            };
            println!(
                "  - {:<6} {:<12} {:<9} {}",
                unit.value, unit.text, unit.system, factor
            );
        }
        for bridge in &t.conversions {
            println!("  {} -> {}: {}", bridge.start, bridge.end, bridge.factor);
        }
    }

    Ok(())
}

fn print_base_unit(catalog: &Catalog, identifier: &str) -> units::Result<()> {
    let unit = Unit::resolve_in(catalog, identifier);
    let base = unit.base_unit_identifier()?;
    println!("{}", base);
    Ok(())
}

fn check_catalog(path: &Path) -> units::Result<()> {
    let (catalog, validation) = catalog::load_catalog_from_file(path)?;
    println!(
        "Catalog {}: {} unit types",
        path.display(),
        catalog.unit_types().len()
    );
    if validation.has_issues() {
        print!("{}", validation);
    } else {
        println!("No issues found");
    }
    Ok(())
}
