use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use emberscript_diagnostics::{DocumentError, DocumentKind};
use emberscript_lexer::{tokenize, LanguageDefinition};
use tracing::{error, info, metadata::LevelFilter};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Stock keyword catalogue; projects extend this through the CLI flags.
const DEFAULT_KEYWORDS: &[&str] = &["if", "else", "while", "for", "return"];

/// Stock primitive types of the scripting runtime.
const DEFAULT_PRIMITIVE_TYPES: &[&str] = &["void", "bool", "int", "float", "string", "entity"];

#[derive(Debug, Parser)]
pub struct Args {
    /// The Emberscript source file to scan.
    script: Utf8PathBuf,

    /// Extra keywords to recognize on top of the built-in set.
    #[clap(short = 'k', long)]
    keyword: Vec<String>,

    /// Extra primitive type names to recognize on top of the built-in set,
    /// such as types exported by the open project's schema.
    #[clap(short = 't', long)]
    primitive_type: Vec<String>,

    /// Print the token stream with line and column information.
    #[clap(long)]
    dump_tokens: bool,
}

pub fn fallible_main(args: Args) -> anyhow::Result<()> {
    let extension = args.script.extension().unwrap_or_default();
    if DocumentKind::from_extension(extension) != DocumentKind::Script {
        return Err(DocumentError::UnsupportedExtension(args.script.to_string()).into());
    }

    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("cannot read source file at {:?}", args.script))?;

    let lang = LanguageDefinition::new(
        DEFAULT_KEYWORDS
            .iter()
            .map(|keyword| keyword.to_string())
            .chain(args.keyword),
        DEFAULT_PRIMITIVE_TYPES
            .iter()
            .map(|name| name.to_string())
            .chain(args.primitive_type),
    );

    let tokens = tokenize(&source, &lang);
    info!(token_count = tokens.len(), "lexical scan complete");

    if args.dump_tokens {
        for token in &tokens {
            println!("{token}");
        }
    }

    Ok(())
}

fn main() {
    let subscriber = tracing_subscriber::registry().with(
        tracing_subscriber::fmt::layer()
            .without_time()
            .with_writer(std::io::stderr)
            .with_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            ),
    );

    tracing::subscriber::set_global_default(subscriber)
        .expect("cannot set default tracing subscriber");

    match fallible_main(Args::parse()) {
        Ok(_) => (),
        Err(error) => error!("{error:?}"),
    }
}
