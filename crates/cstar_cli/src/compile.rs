//! The compilation pipeline: source file → tokens → AST → output stage.

use std::fs;
use std::path::PathBuf;

use cstar_ast::{AstDump, Program};
use cstar_codegen::Codegen;
use cstar_lexer::Lexer;
use cstar_parser::{Parser, SymbolTable};
use cstar_source::{Log, NodeFlags, Source};
use thiserror::Error;

/// What the driver prints on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStage {
    Tokens,
    Ast,
    C,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Options parsed from the command line.
#[derive(Debug, Clone)]
pub struct CompileOpts {
    pub file: PathBuf,
    pub emit: EmitStage,
    pub keep_comments: bool,
    pub no_color: bool,
    pub verbose: bool,
}

impl CompileOpts {
    pub fn parse(args: &[String]) -> Result<CompileOpts, i32> {
        let mut file = None;
        let mut emit = EmitStage::C;
        let mut keep_comments = false;
        let mut no_color = false;
        let mut verbose = false;

        for arg in args {
            if let Some(stage) = arg.strip_prefix("--emit=") {
                emit = match stage {
                    "tokens" => EmitStage::Tokens,
                    "ast" => EmitStage::Ast,
                    "c" => EmitStage::C,
                    _ => {
                        eprintln!("error: unknown emit stage '{}' (expected: tokens, ast, c)", stage);
                        return Err(1);
                    }
                };
            } else if arg == "--keep-comments" {
                keep_comments = true;
            } else if arg == "--no-color" {
                no_color = true;
            } else if arg == "--verbose" || arg == "-v" {
                verbose = true;
            } else if arg.starts_with('-') {
                eprintln!("error: unknown option '{}'", arg);
                return Err(1);
            } else if file.is_none() {
                file = Some(PathBuf::from(arg));
            } else {
                eprintln!("error: more than one input file");
                return Err(1);
            }
        }

        let Some(file) = file else {
            eprintln!("error: missing input file");
            eprintln!("Run 'cstar --help' for usage.");
            return Err(1);
        };

        Ok(CompileOpts {
            file,
            emit,
            keep_comments,
            no_color,
            verbose,
        })
    }
}

/// Run the pipeline. Returns the process exit code: 0 on success, 1 when
/// any error diagnostic was recorded.
pub fn run(opts: &CompileOpts) -> Result<i32, DriverError> {
    let contents = fs::read_to_string(&opts.file).map_err(|source| DriverError::Io {
        path: opts.file.clone(),
        source,
    })?;
    let src = Source::new(opts.file.display().to_string(), contents);

    let mut log = Log::new();

    // Comments only survive into the token dump, and only on request.
    let flags = if opts.emit == EmitStage::Tokens && opts.keep_comments {
        NodeFlags::NONE
    } else {
        NodeFlags::LEXER_SKIP_COMMENTS
    };

    if opts.verbose {
        println!("[1/3] Lexing {}", opts.file.display());
    }
    let mut lexer = Lexer::new(&mut log, src, flags);
    let lexed = lexer.tokenize();
    let tokens = lexer.into_tokens();

    if opts.emit == EmitStage::Tokens {
        for token in &tokens {
            println!("{}", token);
        }
        return Ok(finish(&log));
    }

    if !lexed {
        return Ok(finish(&log));
    }

    if opts.verbose {
        println!("[2/3] Parsing");
    }
    let mut program = Program::new();
    let mut parser = Parser::new(&mut log, tokens, SymbolTable::new());
    let parsed = parser.parse(&mut program);

    if opts.verbose {
        println!("[3/3] Emitting");
    }

    if parsed {
        match opts.emit {
            EmitStage::Ast => {
                let mut dump = AstDump::new();
                print!("{}", dump.dump(&program));
            }
            EmitStage::C => {
                let mut codegen = Codegen::new();
                print!("{}", codegen.generate(&program));
            }
            EmitStage::Tokens => unreachable!("handled above"),
        }
    }

    Ok(finish(&log))
}

/// Render accumulated diagnostics and produce the exit code.
fn finish(log: &Log) -> i32 {
    if !log.diagnostics().is_empty() {
        eprint!("{}", log.render());
    }
    log.exit_code()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
