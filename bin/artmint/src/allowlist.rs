//! `artmint allowlist` subcommands.

use alloy_primitives::{Address, B256};
use artmint_minter::{merkle, AllowlistTree};
use clap::Subcommand;
use eyre::{bail, eyre, Result, WrapErr};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

#[derive(Subcommand, Debug)]
pub(crate) enum AllowlistCommand {
    /// Print the Merkle root of an allowlist file
    Root {
        /// File with one address per line; blank lines and `#` comments are skipped
        file: PathBuf,
    },
    /// Print the proof for an address as a JSON array
    Proof {
        /// Allowlist file
        file: PathBuf,
        /// Address to prove
        address: Address,
    },
    /// Check a proof against a root
    Verify {
        /// Expected root
        #[arg(long)]
        root: B256,
        /// Address the proof is for
        #[arg(long)]
        address: Address,
        /// Comma separated sibling hashes
        #[arg(long, value_delimiter = ',')]
        proof: Vec<B256>,
    },
}

impl AllowlistCommand {
    pub(crate) fn execute(self, out: &mut impl Write) -> Result<()> {
        match self {
            Self::Root { file } => {
                let tree = load_tree(&file)?;
                tracing::info!(target: "artmint", leaves = tree.len(), "allowlist loaded");
                writeln!(out, "{}", tree.root())?;
            }
            Self::Proof { file, address } => {
                let tree = load_tree(&file)?;
                let proof = tree
                    .proof(address)
                    .ok_or_else(|| eyre!("{address} is not in {}", file.display()))?;
                writeln!(out, "{}", serde_json::to_string_pretty(&proof)?)?;
            }
            Self::Verify { root, address, proof } => {
                let computed = merkle::process_proof_for_address(&proof, address);
                if computed != root {
                    bail!("proof for {address} rebuilds {computed}, expected {root}");
                }
                writeln!(out, "valid")?;
            }
        }
        Ok(())
    }
}

fn load_tree(path: &Path) -> Result<AllowlistTree> {
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read allowlist {}", path.display()))?;
    let addresses = parse_addresses(&raw)?;
    if addresses.is_empty() {
        bail!("allowlist {} is empty", path.display());
    }
    Ok(AllowlistTree::from_addresses(addresses))
}

fn parse_addresses(raw: &str) -> Result<Vec<Address>> {
    raw.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or_default().trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| {
            line.parse::<Address>().wrap_err_with(|| format!("line {line_no}: invalid address"))
        })
        .collect()
}
