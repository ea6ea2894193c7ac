// main.rs — vexattest CLI entry point
//
// A thin caller of the library: construct an attestation, add subjects,
// encode it. Logging goes to stderr so stdout carries only the document.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use vexattest::hash::{self, Algorithm};
use vexattest::{Attestation, Subject, Vex};

/// Environment fallback for `--author`.
const AUTHOR_ENV: &str = "VEXATTEST_AUTHOR";

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Attest {
            vex,
            artifacts,
            subjects,
            algorithms,
            id,
            author,
            output,
        } => {
            let author = resolve_author(author);
            let algorithms: Vec<Algorithm> = algorithms.into_iter().map(Algorithm::from).collect();
            let att = build_attestation(
                vex.as_deref(),
                &artifacts,
                &subjects,
                &algorithms,
                id,
                author,
            )?;
            write_attestation(&att, output.as_deref())
        }
        Commands::Digest { attestation } => cmd_digest(&attestation),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();
}

/// `--author` wins; otherwise a non-empty `VEXATTEST_AUTHOR`.
fn resolve_author(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var(AUTHOR_ENV).ok().filter(|a| !a.is_empty()))
}

fn build_attestation(
    vex_path: Option<&Path>,
    artifacts: &[PathBuf],
    subject_specs: &[String],
    algorithms: &[Algorithm],
    id: Option<String>,
    author: Option<String>,
) -> Result<Attestation> {
    let mut doc = match vex_path {
        Some(path) => load_vex(path)?,
        None => {
            let mut doc = Vex::new();
            doc.id = format!("urn:uuid:{}", uuid::Uuid::new_v4());
            doc.tooling = Some(format!("vexattest/{}", env!("CARGO_PKG_VERSION")));
            doc
        }
    };
    if let Some(id) = id {
        doc.id = id;
    }
    if let Some(author) = author {
        doc.author = author;
    }

    let mut algorithms = algorithms.to_vec();
    algorithms.sort();
    algorithms.dedup();

    let mut subjects = Vec::with_capacity(artifacts.len() + subject_specs.len());
    for path in artifacts {
        subjects.push(Subject {
            name: path.to_string_lossy().replace('\\', "/"),
            digest: hash::digest_file(path, &algorithms)
                .with_context(|| format!("reading {}", path.display()))?,
        });
    }
    for spec in subject_specs {
        subjects.push(parse_subject_spec(spec)?);
    }

    let mut att = Attestation::with_predicate(doc);
    att.add_subjects(subjects).context("adding subjects")?;

    if att.subjects().is_empty() {
        warn!("attestation has no subjects");
    }
    for product in att.unattested_products() {
        warn!(product, "VEX statement names a product no subject covers");
    }
    Ok(att)
}

fn load_vex(path: &Path) -> Result<Vex> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("parsing VEX document {}", path.display()))
}

/// Parse `NAME=ALG:HEX[,ALG:HEX...]`.
///
/// An empty digest list is accepted here; the attestation rejects it.
fn parse_subject_spec(spec: &str) -> Result<Subject> {
    let (name, digests) = spec
        .split_once('=')
        .with_context(|| format!("subject {:?} must look like NAME=ALG:HEX", spec))?;
    if name.is_empty() {
        bail!("subject {:?} has an empty name", spec);
    }

    let mut subject = Subject::new(name);
    for part in digests.split(',').filter(|p| !p.is_empty()) {
        let (alg, hex) = part
            .split_once(':')
            .with_context(|| format!("digest {:?} for subject {} must be ALG:HEX", part, name))?;
        if alg.is_empty() || hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("invalid digest {:?} for subject {}", part, name);
        }
        subject = subject.with_digest(alg.to_ascii_lowercase(), hex.to_ascii_lowercase());
    }
    Ok(subject)
}

fn write_attestation(att: &Attestation, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut w = BufWriter::new(file);
            att.to_json(&mut w)?;
            w.flush()
                .with_context(|| format!("writing {}", path.display()))?;
            info!(
                subjects = att.subjects().len(),
                "attestation written to {}",
                path.display()
            );
        }
        None => {
            let mut w = io::stdout().lock();
            att.to_json(&mut w)?;
            w.flush()?;
        }
    }
    Ok(())
}

fn cmd_digest(path: &Path) -> Result<()> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    // Decoding re-checks the statement type, predicate type and digests.
    let att: Attestation = serde_json::from_str(&data)
        .with_context(|| format!("parsing attestation {}", path.display()))?;
    println!("{}", att.digest()?);
    Ok(())
}
