//! Allowlist generator — entry point.
//!
//! Reads one address per line from an input file, builds the sorted-pair
//! keccak-256 Merkle tree, and emits a JSON artifact with the root hash
//! (to pass to `set_phase_merkle_root`) and one proof per address (to
//! attach to `mint_presale` / `is_allow_list_eligible` calls).
//!
//! Blank lines and lines starting with `#` are skipped.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use allowlist_gen::AllowlistTree;

#[derive(Parser)]
#[command(name = "allowlist-gen", about = "Build a phase allowlist Merkle tree")]
struct Args {
    /// Input file: one address (strkey) per line.
    input: PathBuf,

    /// Write the JSON artifact here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON artifact.
    #[arg(long)]
    pretty: bool,
}

/// The JSON artifact consumed by deployment tooling and clients.
#[derive(Serialize)]
struct Artifact {
    /// Tree root, hex-encoded, for `set_phase_merkle_root`.
    root: String,
    leaf_count: usize,
    proofs: Vec<ProofEntry>,
}

#[derive(Serialize)]
struct ProofEntry {
    address: String,
    leaf: String,
    proof: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let input = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let addresses: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let tree = AllowlistTree::from_addresses(addresses.iter().copied())?;

    let proofs = tree
        .addresses()
        .iter()
        .map(|address| {
            let proof = tree.proof_for(address)?;
            Ok(ProofEntry {
                address: address.clone(),
                leaf: hex_0x(&allowlist_gen::leaf_hash(address.as_bytes())),
                proof: proof.iter().map(|node| hex_0x(node)).collect(),
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let artifact = Artifact {
        root: hex_0x(&tree.root()),
        leaf_count: tree.len(),
        proofs,
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&artifact)?
    } else {
        serde_json::to_string(&artifact)?
    };

    match args.output {
        Some(path) => fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}

fn hex_0x(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
