//! fileshare CLI
//!
//! Works directly on a local store (same layout the server uses), without
//! going through HTTP.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fileshare::{Config, FileRecord, StorageManager};
use tracing_subscriber::{fmt, EnvFilter};

/// fileshare CLI
#[derive(Parser, Debug)]
#[command(name = "fileshare-cli")]
#[command(about = "Inspect and populate a fileshare store")]
#[command(version)]
struct Args {
    /// Content directory
    #[arg(short, long, default_value = "./storage/files")]
    storage_dir: PathBuf,

    /// Metadata document
    #[arg(short = 'M', long, default_value = "./storage/metadata.json")]
    metadata_file: PathBuf,

    /// Maximum upload size in bytes (for `put`)
    #[arg(long, default_value_t = 20 * 1024 * 1024)]
    max_upload_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every valid record
    List,

    /// Show one record
    Info {
        /// File identifier
        id: String,
    },

    /// Upload a local file
    Put {
        /// Path of the file to upload
        path: PathBuf,

        /// Name to record (defaults to the file's own name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Write a stored file's content to disk
    Get {
        /// File identifier
        id: String,

        /// Output path (defaults to the recorded file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report malformed entries, missing blobs and orphaned blobs
    Verify,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> fileshare::Result<ExitCode> {
    let config = Config::builder()
        .storage_dir(&args.storage_dir)
        .metadata_path(&args.metadata_file)
        .max_upload_size(args.max_upload_size)
        .build();
    let storage = StorageManager::open(&config)?;

    match args.command {
        Commands::List => {
            for record in storage.list_all()? {
                print_record(&record);
            }
        }
        Commands::Info { id } => match storage.get_metadata(&id)? {
            Some(record) => {
                print_record(&record);
                let blob = if storage.locate_content(&id).is_some() {
                    "present"
                } else {
                    "missing"
                };
                println!("content: {}", blob);
            }
            None => {
                eprintln!("File not found");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Put { path, name } => {
            let content = fs::read(&path)?;
            let name = name.unwrap_or_else(|| {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });
            let record = storage.upload(&content, &name)?;
            println!("{}", record.id);
        }
        Commands::Get { id, output } => {
            let download = storage.download(&id)?;
            // Recorded names are unsanitized; only ever use their last component
            let output = output.unwrap_or_else(|| {
                Path::new(&download.record.file_name)
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(&id))
            });
            fs::write(&output, &download.content)?;
            println!("{} bytes → {}", download.content.len(), output.display());
        }
        Commands::Verify => {
            let report = storage.verify()?;
            println!("valid records:     {}", report.valid_records);
            println!("malformed entries: {}", report.malformed_entries);
            for id in &report.missing_blobs {
                println!("missing blob:      {}", id);
            }
            for id in &report.orphaned_blobs {
                println!("orphaned blob:     {}", id);
            }
            if !report.is_clean() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_record(record: &FileRecord) {
    println!(
        "{}  {:>10}  {}  {}",
        record.id,
        record.size,
        record.timestamp.to_rfc3339(),
        record.file_name
    );
}
