use std::process;

use clap::Parser;

use rust_jvm_signature::logging::{self, SimpleLogger};
use rust_jvm_signature::parser::signature;
use rust_jvm_signature::with_warn;
use rust_jvm_signature::{MethodSignature, Type};

/// Parses JVM field and method signatures and prints what they denote.
#[derive(Debug, Parser)]
#[command(name = "jvm-sig", version)]
struct Args {
    /// Parse each signature as a method descriptor, e.g. `(Ljava/lang/String;)V`.
    #[arg(short, long)]
    method: bool,
    /// Also print stack slot sizes and consumed lengths.
    #[arg(short, long)]
    sizes: bool,
    /// Log more; repeat for debug and trace output.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// The signatures to parse.
    #[arg(required = true)]
    signatures: Vec<String>,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = SimpleLogger::init(logging::level_for_verbosity(args.verbose)) {
        eprintln!("cannot install logger: {}", e);
    }
    let mut failed = false;
    for sig in &args.signatures {
        let ok = if args.method {
            describe_method(sig, args.sizes)
        } else {
            describe_field(sig, args.sizes)
        };
        failed |= !ok;
    }
    if failed {
        process::exit(1);
    }
}

fn describe_field(sig: &str, sizes: bool) -> bool {
    let ty = match with_warn!(sig.parse::<Type>()) {
        Some(ty) => ty,
        None => return false,
    };
    println!("{:#?}", ty);
    println!("{}", ty);
    if sizes {
        if let Some((size, consumed)) = with_warn!(signature::get_type_size(sig)) {
            println!("size: {}, consumed: {}", size, consumed);
        }
    }
    true
}

fn describe_method(sig: &str, sizes: bool) -> bool {
    let method = match with_warn!(MethodSignature::parse(sig)) {
        Some(method) => method,
        None => return false,
    };
    println!("{:#?}", method);
    println!("{}", method);
    if sizes {
        if let Some((size, consumed)) = with_warn!(signature::get_argument_types_size(sig)) {
            println!("arguments size: {}, consumed: {}", size, consumed);
        }
        if let Some((size, consumed)) = with_warn!(signature::get_return_type_size(sig)) {
            println!("return size: {}, consumed: {}", size, consumed);
        }
    }
    true
}
