// Command-line interface for relay
//
// This binary converts messages between review-platform Markdown and the chat
// platform's block model, using the relay-markup library.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension
// (.md, .json, .mrkdwn) and can be overridden with --from. Reading stdin ("-") requires --from.
// Usage:
//  relay <input> --to <format> [--from <format>] [--output <file>]           - Convert between formats (default)
//  relay convert <input> --to <format> [--from <format>] [--output <file>]   - Same as above (explicit)
//  relay inspect <input> [<stage>]                                           - Dump a pipeline stage (defaults to "blocks")
//  relay comment [<blocks.json>] --url <url> --author <name> [--text <text>] - Render an attributed comment body
//  relay --list-formats                                                      - List available formats
//
// Global Parameters:
//
//  --config <path>    layer a relay.toml over the built-in defaults (./relay.toml is picked up when present)
//  --max-depth <n>    override markdown.max_depth

mod inspect;

use clap::{Arg, ArgAction, Command, ValueHint};
use env_logger::Env;
use relay_config::{Loader, RelayConfig};
use relay_markup::formats::json::parse_blocks_json;
use relay_markup::formats::mrkdwn::downconvert;
use relay_markup::{text_or_blocks_to_markdown_with_options, ConvertOptions, FormatRegistry};
use std::fs;
use std::io::{self, Read};

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "comment", "help"];

fn build_cli() -> Command {
    Command::new("relay")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert messages between review Markdown and chat blocks")
        .long_about(
            "relay translates rich text between GitHub-flavoured Markdown and chat blocks.\n\n\
            Commands:\n  \
            - convert: Transform between formats (markdown, blocks, mrkdwn)\n  \
            - inspect: View the token stream or compiled blocks of a Markdown file\n  \
            - comment: Render a chat message as an attributed Markdown comment\n\n\
            Examples:\n  \
            relay review.md --to blocks              # Markdown to chat block JSON (stdout)\n  \
            relay message.json --to markdown         # Chat blocks back to Markdown\n  \
            relay inspect review.md tokens           # View the token stream\n  \
            relay comment message.json --url U --author ada",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a relay.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .value_name("N")
                .help("Deepest nesting converted before flattening to text")
                .value_parser(clap::value_parser!(usize))
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert messages between formats.\n\n\
                    Supported formats:\n  \
                    - markdown: GitHub-flavoured Markdown (.md)\n  \
                    - blocks:   Chat block JSON (.json); bare array, message or event envelope\n  \
                    - mrkdwn:   Chat mrkdwn markup (.mrkdwn, output only)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the pipeline stages of a Markdown file")
                .arg(
                    Arg::new("path")
                        .help("Path to the Markdown file, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("stage")
                        .help("Stage to print. Defaults to 'blocks'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            inspect::AVAILABLE_STAGES,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("comment")
                .about("Render a chat message as an attributed Markdown comment")
                .arg(
                    Arg::new("path")
                        .help("Block JSON of the message, or - for stdin (omit for text-only messages)")
                        .required(false)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("url")
                        .long("url")
                        .help("Permalink of the chat message")
                        .required(true)
                        .value_hint(ValueHint::Url),
                )
                .arg(
                    Arg::new("author")
                        .long("author")
                        .help("Display name of the message author")
                        .required(true),
                )
                .arg(
                    Arg::new("text")
                        .long("text")
                        .help("Plain text of the message, used when it has no blocks")
                        .default_value(""),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    // If no subcommand is given, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1
                && !args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_one::<usize>("max-depth").copied(),
    );
    let options = ConvertOptions::from(&config);
    log::debug!("conversion options: {options:?}");

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                fail("missing input path");
            };
            let Some(to) = sub_matches.get_one::<String>("to") else {
                fail("missing --to");
            };
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => detect_format(input),
            };
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &options);
        }
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                fail("missing input path");
            };
            let stage = sub_matches
                .get_one::<String>("stage")
                .map(|s| s.as_str())
                .unwrap_or("blocks");
            handle_inspect_command(path, stage, &options);
        }
        Some(("comment", sub_matches)) => {
            let path = sub_matches.get_one::<String>("path").map(|s| s.as_str());
            let (Some(url), Some(author)) = (
                sub_matches.get_one::<String>("url"),
                sub_matches.get_one::<String>("author"),
            ) else {
                fail("--url and --author are required");
            };
            let text = sub_matches
                .get_one::<String>("text")
                .map(|s| s.as_str())
                .unwrap_or("");
            handle_comment_command(path, url, author, text, &options);
        }
        _ => fail("Unknown subcommand. Use --help for usage information."),
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    options: &ConvertOptions,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist before reading anything
    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            fail(&format!("Error: {e}"));
        }
    }

    let source = read_input(input);
    let mut blocks = registry
        .parse(&source, from, options)
        .unwrap_or_else(|e| fail(&format!("Parse error: {e}")));

    if to == "blocks" && options.downconvert_rich_text {
        blocks = downconvert(blocks);
    }

    let result = registry
        .serialize(&blocks, to, options)
        .unwrap_or_else(|e| fail(&format!("Serialization error: {e}")));

    match output {
        Some(path) => fs::write(path, ensure_trailing_newline(result))
            .unwrap_or_else(|e| fail(&format!("Error writing file '{path}': {e}"))),
        None => print!("{}", ensure_trailing_newline(result)),
    }
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, stage: &str, options: &ConvertOptions) {
    let source = read_input(path);
    let output = inspect::execute_stage(&source, stage, options)
        .unwrap_or_else(|e| fail(&format!("Execution error: {e}")));
    print!("{}", ensure_trailing_newline(output));
}

/// Handle the comment command
fn handle_comment_command(
    path: Option<&str>,
    url: &str,
    author: &str,
    text: &str,
    options: &ConvertOptions,
) {
    let blocks = match path {
        Some(path) => parse_blocks_json(&read_input(path))
            .unwrap_or_else(|e| fail(&format!("Parse error: {e}"))),
        None => Vec::new(),
    };
    let body = text_or_blocks_to_markdown_with_options(url, author, text, &blocks, options);
    print!("{}", ensure_trailing_newline(body));
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let direction = match (format.supports_parsing(), format.supports_serialization()) {
            (true, true) => "read/write",
            (true, false) => "read",
            (false, true) => "write",
            (false, false) => "-",
        };
        println!(
            "  {name:<10} {direction:<11} .{:<10} {}",
            format.file_extensions().join(", ."),
            format.description()
        );
    }
}

fn detect_format(input: &str) -> String {
    if input == "-" {
        fail("Error: --from is required when reading stdin");
    }
    FormatRegistry::default()
        .detect_format_from_filename(input)
        .unwrap_or_else(|| {
            fail(&format!(
                "Error: Could not detect format from filename '{input}'\nPlease specify --from explicitly"
            ))
        })
}

fn read_input(path: &str) -> Vec<u8> {
    if path == "-" {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .unwrap_or_else(|e| fail(&format!("Error reading stdin: {e}")));
        return bytes;
    }
    fs::read(path).unwrap_or_else(|e| fail(&format!("Error reading file '{path}': {e}")))
}

fn load_cli_config(explicit_path: Option<&str>, max_depth: Option<usize>) -> RelayConfig {
    let loader = Loader::new().with_optional_file("relay.toml");
    let loader = match explicit_path {
        Some(path) => loader.with_file(path),
        None => loader,
    };
    let loader = match max_depth {
        Some(depth) => loader
            .set_override("markdown.max_depth", depth as i64)
            .unwrap_or_else(|err| fail(&format!("Invalid --max-depth: {err}"))),
        None => loader,
    };
    loader
        .build()
        .unwrap_or_else(|err| fail(&format!("Failed to load configuration: {err}")))
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
