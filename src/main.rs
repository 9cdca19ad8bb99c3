use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use chordsheet::render::{render_text, render_wordml};
use chordsheet::{import_pasted, NamingStyle, Setlist, SheetError, TransposeOptions};
use clap::{Parser, Subcommand, ValueEnum};

/// Chord chart transposition and setlist rendering
#[derive(Parser)]
#[command(name = "chordsheet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log progress and skipped chords to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Transpose a tagged song body
    Transpose {
        input: PathBuf,

        /// Semitones to shift by, -12 to 12
        #[arg(short, long, allow_hyphen_values = true)]
        semitones: i32,

        /// Print accidentals as flats
        #[arg(long)]
        flats: bool,

        /// Reduce chords to root and quality
        #[arg(long)]
        simplify: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import pasted chord-over-lyrics text as a one-song setlist
    Import {
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a setlist file
    Render {
        setlist: PathBuf,

        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Wordml,
}

fn read_input(path: &Path) -> Result<String, SheetError> {
    fs::read_to_string(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn run(command: Commands) -> Result<(String, Option<PathBuf>), SheetError> {
    match command {
        Commands::Transpose {
            input,
            semitones,
            flats,
            simplify,
            output,
        } => {
            let naming = if flats { NamingStyle::Flats } else { NamingStyle::Sharps };
            let body = read_input(&input)?;
            let transposed = TransposeOptions::new(semitones, naming, simplify).apply(&body)?;
            Ok((transposed, output))
        }
        Commands::Import { input, output } => {
            let mut setlist = Setlist::new();
            setlist.add_imported(import_pasted(&read_input(&input)?));
            Ok((setlist.to_yaml()?, output))
        }
        Commands::Render {
            setlist,
            format,
            output,
        } => {
            let setlist = Setlist::load(&setlist)?;
            let rendered = match format {
                Format::Text => render_text(&setlist)?,
                Format::Wordml => render_wordml(&setlist)?,
            };
            Ok((rendered, output))
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let (content, output_path) = match run(cli.command) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &content) {
                eprintln!("Error writing to '{}': {}", path.display(), e);
                process::exit(1);
            }
            eprintln!("Wrote {}", path.display());
        }
        None => {
            print!("{}", content);
        }
    }
}
