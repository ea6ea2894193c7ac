// cli.rs — Command-line interface definitions (clap derive)
//
//   vexattest attest   — build an attestation from artifacts and a VEX document
//   vexattest digest   — print the canonical SHA-256 of an attestation file

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use vexattest::hash::Algorithm;

#[derive(Parser)]
#[command(name = "vexattest")]
#[command(about = "Build in-toto attestations carrying OpenVEX predicates")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an attestation and write it as JSON
    Attest {
        /// OpenVEX document to use as the predicate (default: empty document)
        #[arg(long)]
        vex: Option<PathBuf>,

        /// File to hash and add as a subject, named by its path
        #[arg(long = "artifact", value_name = "PATH")]
        artifacts: Vec<PathBuf>,

        /// Subject with explicit digests: NAME=ALG:HEX[,ALG:HEX...]
        #[arg(long = "subject", value_name = "SPEC")]
        subjects: Vec<String>,

        /// Digest algorithm for --artifact files (repeatable)
        #[arg(long = "algorithm", value_enum, default_values_t = [DigestArg::Sha256])]
        algorithms: Vec<DigestArg>,

        /// Document @id (a fresh document gets a urn:uuid id otherwise)
        #[arg(long)]
        id: Option<String>,

        /// Document author (default: $VEXATTEST_AUTHOR)
        #[arg(long)]
        author: Option<String>,

        /// Write the attestation here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the SHA-256 of an attestation's canonical encoding
    Digest {
        /// Attestation JSON file
        attestation: PathBuf,
    },
}

/// `--algorithm` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DigestArg {
    Sha256,
    Sha512,
}

impl From<DigestArg> for Algorithm {
    fn from(arg: DigestArg) -> Self {
        match arg {
            DigestArg::Sha256 => Algorithm::Sha256,
            DigestArg::Sha512 => Algorithm::Sha512,
        }
    }
}
