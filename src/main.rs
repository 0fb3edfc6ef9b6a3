use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use keysplit::{
    io, SharingConfig, DEFAULT_CHUNK_SIZE, DEFAULT_SHARES, DEFAULT_THRESHOLD, SSS,
};

/// Split a private key into Shamir shares and combine them back.
///
/// Any `threshold` of the share files rebuild the key; fewer reveal nothing.
/// Combining fewer than `threshold` files is not detected: it either fails
/// to decode or produces a wrong key.
#[derive(Parser, Debug)]
#[command(name = "keysplit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a key file, or a secret read from stdin, into
    /// `<stem>_share_<n>.key` files
    Split {
        /// Key file, or a folder holding exactly one `.key` file
        #[arg(required_unless_present = "stdin")]
        path: Option<PathBuf>,

        /// Read the secret from stdin instead of a file
        #[arg(long, conflicts_with = "path")]
        stdin: bool,

        /// File stem of the share files when reading from stdin
        #[arg(long, default_value = "secret", requires = "stdin")]
        stem: String,

        /// Number of shares to create
        #[arg(short = 'n', long, default_value_t = DEFAULT_SHARES)]
        shares: u32,

        /// Number of shares needed to rebuild the key, must be <= shares
        #[arg(short = 'k', long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: u32,

        /// Bytes of the key shared per chunk
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Folder for the share files, defaults to the key's folder, or to
        /// the current folder with --stdin
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Combine share files back into the key
    Combine {
        /// Share files to combine
        paths: Vec<PathBuf>,

        /// Key name: combine every `<name>_share_<n>.key` in --dir
        #[arg(long)]
        name: Option<String>,

        /// Folder searched with --name
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Output file, defaults to `<name>_combined_private.key` with
        /// --name and to stdout otherwise
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Where the secret to split comes from.
enum Source {
    File(PathBuf),
    Stdin(String),
}

struct Loaded {
    secret: Vec<u8>,
    stem: String,
    dir: PathBuf,
    origin: String,
}

fn read_source(source: Source) -> Result<Loaded> {
    match source {
        Source::File(path) => {
            let key_path = if path.is_dir() {
                io::find_key_file(&path)?
            } else {
                path
            };

            let secret = fs::read(&key_path)
                .with_context(|| format!("reading {}", key_path.display()))?;
            let stem = io::key_stem(&key_path)?;
            let dir = match key_path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };

            Ok(Loaded {
                secret,
                stem,
                dir,
                origin: key_path.display().to_string(),
            })
        }
        Source::Stdin(stem) => {
            let mut secret = Vec::new();

            std::io::stdin()
                .read_to_end(&mut secret)
                .context("reading the secret from stdin")?;

            Ok(Loaded {
                secret,
                stem,
                dir: PathBuf::from("."),
                origin: "stdin".to_string(),
            })
        }
    }
}

fn split(source: Source, config: SharingConfig, out_dir: Option<PathBuf>) -> Result<()> {
    let loaded = read_source(source)?;
    let out_dir = out_dir.unwrap_or(loaded.dir);

    let artifacts = SSS::new(config)
        .split(&loaded.secret)
        .with_context(|| format!("splitting {}", loaded.origin))?;
    let paths = io::write_split(&artifacts, &out_dir, &loaded.stem)?;

    info!(
        "Files saved: {}",
        paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    for path in paths {
        println!("{}", path.display());
    }

    Ok(())
}

fn combine(
    mut paths: Vec<PathBuf>,
    name: Option<String>,
    dir: PathBuf,
    output: Option<PathBuf>,
) -> Result<()> {
    if let Some(name) = &name {
        paths.extend(io::find_share_files(&dir, name)?);
    }

    if paths.is_empty() {
        bail!("no share files given, pass paths or --name");
    }

    paths.sort();
    paths.dedup();

    let artifacts = paths
        .iter()
        .map(|path| {
            io::read_artifact(path).with_context(|| format!("reading {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let secret = SSS::default()
        .combine(&artifacts)
        .context("combining shares")?;

    let output = output.or_else(|| name.map(|name| dir.join(io::combined_file_name(&name))));

    match output {
        Some(output) => {
            fs::write(&output, &secret)
                .with_context(|| format!("writing {}", output.display()))?;
            info!("Files saved: {}", output.display());
            println!("{}", output.display());
        }
        None => std::io::stdout().write_all(&secret)?,
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Split {
            path,
            stdin,
            stem,
            shares,
            threshold,
            chunk_size,
            out_dir,
        } => {
            let source = match path {
                Some(path) if !stdin => Source::File(path),
                _ => Source::Stdin(stem),
            };

            split(
                source,
                SharingConfig::new(threshold, shares, chunk_size),
                out_dir,
            )
        }
        Command::Combine {
            paths,
            name,
            dir,
            output,
        } => combine(paths, name, dir, output),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error!! {:#}", e);
            ExitCode::FAILURE
        }
    }
}
