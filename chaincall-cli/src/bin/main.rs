//! `chaincall` — IDL-driven instruction encoder.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chaincall_core::codec::InstructionCodec;
use chaincall_core::discriminator::instruction_discriminator;
use chaincall_core::hex::to_hex;
use chaincall_core::idl::ProgramIdl;
use chaincall_cli::cli::{
    parse_instruction_args, print_idl_summary, print_instruction_help, print_supported_types,
    wants_help,
};
use chaincall_cli::config::CodecArgs;
use chaincall_cli::layout::{pack, unpack};
use chaincall_cli::tx::{build_request, print_preview};

#[derive(Parser, Debug)]
#[command(name = "chaincall", version, about = "Encode program instructions from an IDL")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    codec: CodecArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode an IDL instruction and print the request body
    Encode {
        #[arg(short, long, value_name = "FILE")]
        idl: PathBuf,
        #[arg(short, long)]
        program_id: String,
        #[arg(long)]
        fee_payer: Option<String>,
        /// Print only the JSON request body
        #[arg(long)]
        json: bool,
        instruction: String,
        /// Instruction flags: --<arg> <value> --<account>-account <BASE58>
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Pack [name:]type=value fields into a buffer (no discriminator)
    Pack {
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Decode a hex buffer with a list of [name:]type declarations
    Unpack {
        #[arg(long)]
        hex: String,
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Print the discriminator for instruction names
    Discriminator {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List supported field types
    Types,
    /// Describe an IDL, or one of its instructions
    Idl {
        #[arg(short, long, value_name = "FILE")]
        idl: PathBuf,
        /// Print the parsed IDL as JSON
        #[arg(long, conflicts_with = "instruction")]
        json: bool,
        instruction: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_idl(path: &Path) -> Result<ProgramIdl> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read IDL '{}'", path.display()))?;
    ProgramIdl::from_json(&json).with_context(|| format!("Failed to parse IDL '{}'", path.display()))
}

fn run(cli: Cli) -> Result<()> {
    let codec = InstructionCodec::new(cli.codec.load_config()?);

    match cli.command {
        Command::Encode { idl, program_id, fee_payer, json, instruction, args } => {
            let idl = load_idl(&idl)?;
            let ix = idl.instruction(&instruction).ok_or_else(|| {
                let names: Vec<&str> = idl.instructions.iter().map(|i| i.name.as_str()).collect();
                anyhow!("Unknown instruction '{}'. Available: {}", instruction, names.join(", "))
            })?;
            let args = parse_instruction_args(ix, &args)?;
            if wants_help(&args) {
                print_instruction_help(ix);
                return Ok(());
            }
            let built = build_request(&codec, ix, &args, &program_id, fee_payer.as_deref())?;
            if !json {
                print_preview(ix, &built);
            }
            println!("{}", serde_json::to_string_pretty(&built.request)?);
        }
        Command::Pack { fields } => {
            let response = pack(&codec, &fields)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Unpack { hex, fields } => {
            let values = unpack(&codec, &hex, &fields)?;
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        Command::Discriminator { names } => {
            for name in names {
                let disc = instruction_discriminator(&name);
                println!("{:<24} {}  {:?}", name, to_hex(&disc), disc);
            }
        }
        Command::Types => print_supported_types(),
        Command::Idl { idl, json, instruction } => {
            let idl = load_idl(&idl)?;
            if json {
                println!("{}", idl.to_json_pretty()?);
                return Ok(());
            }
            match instruction {
                Some(name) => {
                    let ix = idl
                        .instruction(&name)
                        .ok_or_else(|| anyhow!("Unknown instruction '{}'", name))?;
                    print_instruction_help(ix);
                }
                None => print_idl_summary(&idl),
            }
        }
    }
    Ok(())
}
