//! cstar CLI — compiles a cstar source file and prints the requested
//! output stage.
//!
//! Usage:
//!   cstar <file.cstr> [options]
//!
//! Options:
//!   --emit=<stage>    Output stage: tokens, ast, c (default: c)
//!   --keep-comments   Keep comment tokens in the token dump
//!   --no-color        Plain diagnostics without ANSI colors
//!   --verbose, -v     Show compilation steps
//!   --help, -h        Show this help
//!   --version, -V     Show version

mod compile;

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        print_usage();
        process::exit(0);
    }

    match args[0].as_str() {
        "--version" | "-V" => {
            println!("cstar {}", VERSION);
            process::exit(0);
        }
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        _ => {}
    }

    let opts = match compile::CompileOpts::parse(&args) {
        Ok(opts) => opts,
        Err(code) => process::exit(code),
    };

    if opts.no_color {
        yansi::disable();
    }

    match compile::run(&opts) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("cstar {} — the cstar compiler front-end", VERSION);
    println!();
    println!("USAGE:");
    println!("    cstar <file.cstr> [options]");
    println!();
    println!("OPTIONS:");
    println!("    --emit=<stage>    Output stage: tokens, ast, c (default: c)");
    println!("    --keep-comments   Keep comment tokens in the token dump");
    println!("    --no-color        Plain diagnostics without ANSI colors");
    println!("    --verbose, -v     Show compilation steps");
    println!("    --help, -h        Show this help");
    println!("    --version, -V     Show version");
}
