//! phonedata: CLI tool for phone number lookups and data file management.

use clap::{Parser, Subcommand};
use phonedata::binary::DataFileWriter;
use phonedata::config::DEFAULT_CONFIG_FILE;
use phonedata::{find, AreaCodeTable, Config, DataFile, LandlineStore};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "phonedata")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Resolve phone numbers to province, city and carrier", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one or more phone numbers
    Find {
        /// Phone numbers to resolve
        #[arg(required = true)]
        numbers: Vec<String>,

        /// Data file (overrides config)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Reference area code for local/domestic tagging (overrides config)
        #[arg(short, long)]
        area_code: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show data file header information
    Info {
        /// Data file (overrides config)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Build a data file from a text source
    Build {
        /// Input file: prefix|province|city|zip|area|carrier per line
        #[arg(short, long)]
        input: PathBuf,

        /// Output data file
        #[arg(short, long)]
        output: PathBuf,

        /// Four-character version tag
        #[arg(long, default_value = "0001")]
        version: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Find {
            numbers,
            data,
            area_code,
            json,
        } => find_numbers(&cli.config, &numbers, data, area_code, json),
        Commands::Info { data } => show_info(&cli.config, data),
        Commands::Build {
            input,
            output,
            version,
        } => build_file(&input, &output, &version),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: &Path, data: Option<PathBuf>) -> phonedata::Result<Config> {
    let mut config = Config::load_or_default(path)?.with_env();
    if let Some(data) = data {
        config.phonedata = data;
    }
    Ok(config)
}

fn find_numbers(
    config_path: &Path,
    numbers: &[String],
    data: Option<PathBuf>,
    area_code: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, data)?;
    let reference = area_code.unwrap_or(config.area_code);
    let file = DataFile::load(&config.phonedata)?;
    let table = match &config.area_codes {
        Some(path) => Some(AreaCodeTable::load(path)?),
        None => None,
    };
    let store = table.as_ref().map(|t| t as &dyn LandlineStore);

    let mut failed = false;
    for number in numbers {
        match find(&file, number, &reference, store) {
            Ok(record) if json => println!("{}", serde_json::to_string(&record)?),
            Ok(record) => println!("{}Locality: {}", record, record.locality),
            Err(e) => {
                eprintln!("{}: {}", number, e);
                failed = true;
            }
        }
    }

    if failed {
        return Err("one or more lookups failed".into());
    }
    Ok(())
}

fn show_info(config_path: &Path, data: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, data)?;
    let file = DataFile::load(&config.phonedata)?;

    let checksum: String = file.checksum().iter().map(|b| format!("{:02x}", b)).collect();
    println!("File:               {}", config.phonedata.display());
    println!("Version:            {}", file.version_str());
    println!("Size:               {} bytes", file.len());
    println!("First index offset: {}", file.first_index_offset());
    println!("Index entries:      {}", file.total_entries());
    println!("SHA-256:            {}", checksum);
    Ok(())
}

fn build_file(input: &Path, output: &Path, version: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tag: [u8; 4] = version
        .as_bytes()
        .try_into()
        .map_err(|_| format!("version tag must be 4 bytes: {:?}", version))?;

    let source = fs::File::open(input)?;
    let writer = DataFileWriter::from_source(source, tag)?;
    let data = writer.build()?;
    fs::write(output, &data)?;

    println!(
        "Built {:?} -> {:?} ({} entries, {} bytes)",
        input,
        output,
        writer.len(),
        data.len()
    );
    Ok(())
}
