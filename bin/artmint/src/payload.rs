//! `artmint payload` subcommands.

use alloy_primitives::{hex, Address};
use artmint_bytecode_storage::{
    codec::{has_cleanup_logic, strip_preamble},
    creation_code, decode_creator, decode_payload, runtime_code, StoreConfig,
};
use clap::Subcommand;
use eyre::{bail, Result, WrapErr};
use std::{fs, io::Write, path::PathBuf};

#[derive(Subcommand, Debug)]
pub(crate) enum PayloadCommand {
    /// Print the hex-encoded object for a payload file
    Encode {
        /// Address recorded as the object's creator
        #[arg(long)]
        creator: Address,
        /// Payload file
        input: PathBuf,
        /// Print the creation code instead of the stored object
        #[arg(long, default_value_t = false)]
        creation: bool,
    },
    /// Write the payload of a hex-encoded object to stdout
    Decode {
        /// File holding hex-encoded runtime or creation code
        input: PathBuf,
        /// Print the creator to stderr as well
        #[arg(long, default_value_t = false)]
        show_creator: bool,
    },
}

impl PayloadCommand {
    pub(crate) fn execute(self, out: &mut impl Write) -> Result<()> {
        match self {
            Self::Encode { creator, input, creation } => {
                let payload = fs::read(&input)
                    .wrap_err_with(|| format!("failed to read payload {}", input.display()))?;
                let config = StoreConfig::from_env()?;
                let runtime = runtime_code(creator, &payload);
                if runtime.len() > config.max_object_size {
                    bail!(
                        "object of {} bytes exceeds the {} byte limit",
                        runtime.len(),
                        config.max_object_size
                    );
                }
                let code = if creation { creation_code(creator, &payload) } else { runtime };
                tracing::info!(target: "artmint", size = code.len(), creation, "payload encoded");
                writeln!(out, "{code}")?;
            }
            Self::Decode { input, show_creator } => {
                let raw = fs::read_to_string(&input)
                    .wrap_err_with(|| format!("failed to read code {}", input.display()))?;
                let code = hex::decode(raw.trim()).wrap_err("code is not valid hex")?;
                let runtime = strip_preamble(&code).unwrap_or(&code);
                if !has_cleanup_logic(runtime) {
                    tracing::warn!(
                        target: "artmint",
                        "object header does not match the cleanup logic"
                    );
                }
                if show_creator {
                    eprintln!("creator: {}", decode_creator(runtime)?);
                }
                out.write_all(decode_payload(runtime)?)?;
            }
        }
        Ok(())
    }
}
