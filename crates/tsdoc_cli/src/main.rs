//! tsdoc: Check TSDoc comments from the command line.
//!
//! Usage:
//!   tsdoc [options] [file...]
//!
//! Every `/** ... */` comment in each file is parsed and its messages are
//! reported. With no files, standard input is read instead.

mod report;
mod tree;

use std::path::{Path, PathBuf};
use std::process;

use bumpalo::Bump;
use clap::Parser as ClapParser;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use tsdoc_ast::DocNodeRef;
use tsdoc_config::{TSDocConfigFile, TSDocConfiguration};
use tsdoc_core::{TextPos, TextRange};
use tsdoc_declref::DeclarationReference;
use tsdoc_emitter::TSDocEmitter;
use tsdoc_parser::TSDocParser;

use report::{CliError, MessageDiagnostic};

#[derive(ClapParser, Debug)]
#[command(name = "tsdoc", about = "Parse and check TSDoc doc comments")]
struct Cli {
    /// Files to check. Reads standard input when omitted.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Path to tsdoc.json.
    #[arg(long, value_name = "TSDOC_JSON")]
    config: Option<PathBuf>,

    /// Print each comment re-emitted in normalized form.
    #[arg(long)]
    emit: bool,

    /// Print the node tree of each comment.
    #[arg(long)]
    tree: bool,

    /// Accept tags that are not defined in the configuration.
    #[arg(long = "ignore-undefined-tags")]
    ignore_undefined_tags: bool,

    /// Check a declaration reference instead of parsing comments.
    #[arg(long, value_name = "TEXT")]
    reference: Option<String>,

    /// Number of worker threads.
    #[arg(short = 'j', long)]
    jobs: Option<usize>,
}

struct Input {
    name: String,
    text: String,
}

/// What checking one input produced, kept until every input is done so
/// results print in input order.
struct InputReport {
    output: String,
    diagnostics: Vec<MessageDiagnostic>,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Some(text) = &cli.reference {
        process::exit(run_reference(text));
    }

    match run_check(&cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(error) => {
            eprintln!("{:?}", miette::Report::new(error));
            process::exit(2);
        }
    }
}

/// Install a subscriber only when a filter is configured, so normal runs
/// print nothing but results.
fn init_logging() {
    let Some(directives) = ["TSDOC_LOG", "RUST_LOG"]
        .iter()
        .find_map(|name| std::env::var(name).ok())
    else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(directives);
    let json = std::env::var("TSDOC_LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_reference(text: &str) -> i32 {
    match DeclarationReference::parse(text) {
        Ok(reference) => {
            println!("{}", reference);
            0
        }
        Err(error) => {
            eprintln!("error: {}", error);
            1
        }
    }
}

fn run_check(cli: &Cli) -> Result<i32, CliError> {
    let configuration = load_configuration(cli)?;
    let inputs = read_inputs(&cli.files)?;
    tracing::debug!(inputs = inputs.len(), "checking inputs");

    let check = || -> Vec<InputReport> {
        inputs
            .par_iter()
            .map(|input| check_input(&configuration, input, cli))
            .collect()
    };
    let reports = match cli.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()?
            .install(check),
        None => check(),
    };

    let mut message_count = 0;
    for report in reports {
        print!("{}", report.output);
        message_count += report.diagnostics.len();
        for diagnostic in report.diagnostics {
            eprintln!("{:?}", miette::Report::new(diagnostic));
        }
    }

    if message_count > 0 {
        eprintln!(
            "Found {} message{}.",
            message_count,
            if message_count == 1 { "" } else { "s" }
        );
        return Ok(1);
    }
    Ok(0)
}

fn load_configuration(cli: &Cli) -> Result<TSDocConfiguration, CliError> {
    let mut configuration = TSDocConfiguration::new();

    let config_path = cli
        .config
        .clone()
        .or_else(|| Some(PathBuf::from("tsdoc.json")).filter(|path| path.exists()));
    if let Some(path) = config_path {
        TSDocConfigFile::load(&path)?.configure(&mut configuration)?;
    }

    if cli.ignore_undefined_tags {
        configuration.validation_mut().ignore_undefined_tags = true;
    }
    Ok(configuration)
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<Input>, CliError> {
    if files.is_empty() {
        let text = std::io::read_to_string(std::io::stdin()).map_err(CliError::Stdin)?;
        return Ok(vec![Input {
            name: "<stdin>".to_string(),
            text,
        }]);
    }
    files.iter().map(|path| read_input(path)).collect()
}

fn read_input(path: &Path) -> Result<Input, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Input {
        name: path.display().to_string(),
        text,
    })
}

fn check_input(configuration: &TSDocConfiguration, input: &Input, cli: &Cli) -> InputReport {
    let arena = Bump::new();
    let parser = TSDocParser::new(configuration);
    let mut report = InputReport {
        output: String::new(),
        diagnostics: Vec::new(),
    };

    for range in find_doc_comments(&input.text) {
        let context = parser.parse_range(&arena, range);
        report.diagnostics.extend(
            context
                .log
                .messages()
                .iter()
                .map(|message| MessageDiagnostic::new(&input.name, &input.text, message)),
        );

        if cli.tree {
            tree::write_tree(&mut report.output, DocNodeRef::Comment(&context.doc_comment), 0);
        }
        if cli.emit {
            report
                .output
                .push_str(&TSDocEmitter::new().render_comment(&context.doc_comment));
        }
    }

    tracing::debug!(
        input = %input.name,
        messages = report.diagnostics.len(),
        "checked input"
    );
    report
}

/// The range of every `/** ... */` comment in `text`.
///
/// An unterminated comment runs to the end of the text. When there is no
/// comment at all, the whole text is returned so the parser can report it.
fn find_doc_comments(text: &str) -> Vec<TextRange<'_>> {
    let mut ranges = Vec::new();
    let mut offset = 0;

    while let Some(found) = text[offset..].find("/**") {
        let pos = offset + found;
        let end = text[pos + 3..]
            .find("*/")
            .map_or(text.len(), |close| pos + 3 + close + 2);
        ranges.push(TextRange::from_string_range(text, pos as TextPos, end as TextPos));
        offset = end;
    }

    if ranges.is_empty() {
        ranges.push(TextRange::from_string(text));
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn comment_texts(text: &str) -> Vec<&str> {
        find_doc_comments(text)
            .iter()
            .map(|range| range.as_str())
            .collect()
    }

    #[test]
    fn test_find_doc_comments() {
        let source = "/** A */\nfunction a() {}\n/* plain */\n/**\n * B\n */\nfunction b() {}\n";
        assert_eq!(comment_texts(source), vec!["/** A */", "/**\n * B\n */"]);
    }

    #[test]
    fn test_find_doc_comments_unterminated() {
        assert_eq!(comment_texts("x /** open"), vec!["/** open"]);
    }

    #[test]
    fn test_find_doc_comments_without_comment() {
        assert_eq!(comment_texts("let x = 1;"), vec!["let x = 1;"]);
    }

    #[test]
    fn test_check_input_emits_in_order() {
        let cli = Cli::parse_from(["tsdoc", "--emit"]);
        let configuration = TSDocConfiguration::new();
        let input = Input {
            name: "a.ts".to_string(),
            text: "/** First */\nlet a;\n/** Second @beta */\n".to_string(),
        };

        let report = check_input(&configuration, &input, &cli);
        assert!(report.diagnostics.is_empty());
        assert_eq!(
            report.output,
            "/**\n * First\n */\n/**\n * Second\n *\n * @beta\n */\n"
        );
    }

    #[test]
    fn test_check_input_reports_messages() {
        let cli = Cli::parse_from(["tsdoc"]);
        let configuration = TSDocConfiguration::new();
        let input = Input {
            name: "a.ts".to_string(),
            text: "/** Uses @custom here */".to_string(),
        };
        assert_eq!(check_input(&configuration, &input, &cli).diagnostics.len(), 1);

        let cli = Cli::parse_from(["tsdoc", "--ignore-undefined-tags"]);
        let configuration = load_configuration(&cli).unwrap();
        assert!(check_input(&configuration, &input, &cli).diagnostics.is_empty());
    }
}
