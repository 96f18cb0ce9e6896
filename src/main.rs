//! Command-line interface for the BCR reader.
//!
//! This binary parses one BCR file and prints a summary of its header, trailer
//! parameters and raster.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{error, info, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use bcr_reader::{BcrDocument, BcrReaderBuilder, DuplicateKeys, KeyCase, SectionLayout};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Inspect BCR surface-topography files",
    long_about = "Parses a BCR (ISO 25178-7 / EUNA 15178) text file and prints its header fields,\n\
                  trailer parameters and raster status."
)]
struct Args {
    /// BCR file to read
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Section counting rule
    #[arg(long, value_enum, default_value_t = LayoutArg::Standard)]
    layout: LayoutArg,

    /// Handling of repeated metadata keys
    #[arg(long, value_enum, default_value_t = DuplicatesArg::Overwrite)]
    duplicates: DuplicatesArg,

    /// Store metadata keys in upper case
    #[arg(long)]
    upper_case_keys: bool,

    /// Print the points of this profile
    #[arg(long, value_name = "N")]
    profile: Option<i64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Standard,
    Legacy,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DuplicatesArg {
    Overwrite,
    KeepFirst,
    Reject,
}

impl From<LayoutArg> for SectionLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Standard => SectionLayout::Standard,
            LayoutArg::Legacy => SectionLayout::Legacy,
        }
    }
}

impl From<DuplicatesArg> for DuplicateKeys {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::Overwrite => DuplicateKeys::Overwrite,
            DuplicatesArg::KeepFirst => DuplicateKeys::KeepFirst,
            DuplicatesArg::Reject => DuplicateKeys::Reject,
        }
    }
}

fn print_summary(doc: &BcrDocument) {
    println!("Status:        {}", doc.status());
    if let Some(err) = doc.error() {
        println!("Error:         {}", err);
        return;
    }
    println!("Version:       {}", doc.version_field());
    println!("Manufacturer:  {}", doc.manufacturer_id());
    if let (Some(created), Some(modified)) = (doc.create_date(), doc.mod_date()) {
        println!("Created:       {}", created);
        println!("Modified:      {}", modified);
    }
    println!(
        "Raster:        {} points x {} profiles",
        doc.num_points(),
        doc.num_profiles()
    );
    println!(
        "Scales:        {:e} / {:e} / {:e} m",
        doc.x_scale(),
        doc.y_scale(),
        doc.z_scale()
    );
    println!(
        "Origin:        {} / {} / {} m",
        doc.x_offset(),
        doc.y_offset(),
        doc.z_offset()
    );
    println!("Temperature:   {} °C", doc.sample_temperature());
    println!("Metadata:");
    for (key, value) in doc.metadata().iter() {
        println!("  {} = {}", key, value);
    }
}

fn run(args: &Args) -> Result<bool> {
    let key_case = if args.upper_case_keys {
        KeyCase::Upper
    } else {
        KeyCase::Preserve
    };

    let start = Instant::now();
    let doc = BcrReaderBuilder::new()
        .layout(args.layout.into())
        .duplicate_keys(args.duplicates.into())
        .key_case(key_case)
        .from_file(&args.file);
    info!(
        "📄 {} parsed in {:.2?}",
        args.file.display(),
        start.elapsed()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&doc.summary())?);
    } else {
        print_summary(&doc);
    }

    if let Some(profile) = args.profile {
        match doc.points_of_profile(profile) {
            Some(points) => {
                for point in points {
                    println!("{}\t{}\t{}", point.x, point.y, point.z);
                }
            }
            None => error!("No raster data available for profile {}", profile),
        }
    }

    Ok(doc.status().has_data())
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let args = Args::parse();

    if run(&args)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
