extern crate clap;
extern crate env_logger;
extern crate gbcodon;
#[macro_use]
extern crate log;

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use env_logger::Env;

use gbcodon::error::Error;
use gbcodon::extract::Mode;
use gbcodon::fasta;
use gbcodon::fasta::FastaWriter;
use gbcodon::pipeline::Config;
use gbcodon::pipeline::Pipeline;
use gbcodon::report;

#[derive(Parser)]
#[command(version, about)]
/// Extract functional coding sequences from GenBank archives and count codon usage.
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract coding sequences from a directory of archives and count their codons.
    Run {
        /// Directory containing the GenBank archives.
        input_dir: PathBuf,
        /// Kind of sequences to write.
        #[arg(long, value_enum, default_value_t = Mode::Translation)]
        mode: Mode,
        /// Suffix of the archive file names to process.
        #[arg(long, default_value = ".gbff.gz")]
        suffix: String,
        /// Output FASTA file [default: <INPUT_DIR>/functional_CDS.fasta]
        #[arg(long)]
        fasta: Option<PathBuf>,
        /// Output CSV file [default: <INPUT_DIR>/codon_usage.csv]
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Count the codons of the nucleotide sequences of a FASTA file.
    Count {
        /// FASTA file with nucleotide coding sequences.
        fasta: PathBuf,
        /// Output CSV file.
        #[arg(long)]
        csv: PathBuf,
    },
}

fn run(
    input_dir: PathBuf,
    mode: Mode,
    suffix: String,
    fasta: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> Result<(), Error> {
    let fasta = fasta.unwrap_or_else(|| input_dir.join("functional_CDS.fasta"));
    let csv = csv.unwrap_or_else(|| input_dir.join("codon_usage.csv"));

    let mut writer = File::create(&fasta).map(FastaWriter::new)?;
    let mut pipeline = Pipeline::new(Config { mode, suffix });
    pipeline.process_dir(&input_dir, &mut writer)?;
    let count = writer.count();
    writer.flush()?;

    let summary = pipeline.finish();
    for warning in summary.warnings.iter() {
        debug!("{}", warning);
    }
    info!(
        "Extraction complete. {} functional CDS from {} records saved to {}",
        count,
        summary.records,
        fasta.display()
    );
    if !summary.warnings.is_empty() {
        warn!("{} damaged entries were skipped", summary.warnings.len());
    }

    report::write_csv(&summary.table, File::create(&csv)?)?;
    info!("Codon usage data saved to {}", csv.display());
    Ok(())
}

fn count(input: PathBuf, csv: PathBuf) -> Result<(), Error> {
    let table = fasta::tally_fasta(File::open(&input)?)?;
    report::write_csv(&table, File::create(&csv)?)?;
    info!("Codon usage data saved to {}", csv.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let result = match args.command {
        Command::Run {
            input_dir,
            mode,
            suffix,
            fasta,
            csv,
        } => run(input_dir, mode, suffix, fasta, csv),
        Command::Count { fasta, csv } => count(fasta, csv),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
