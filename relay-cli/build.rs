use clap::{Arg, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the stages from src/inspect.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_STAGES: &[&str] = &["tokens", "tokens-simple", "blocks"];
const FORMATS: &[&str] = &["markdown", "blocks", "mrkdwn"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let format_arg = |name: &'static str| {
        Arg::new(name)
            .long(name)
            .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
            .value_hint(ValueHint::Other)
    };

    let mut cmd = Command::new("relay")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert messages between review Markdown and chat blocks")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(Arg::new("max-depth").long("max-depth").global(true))
        .subcommand(
            Command::new("convert")
                .arg(
                    Arg::new("input")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(format_arg("from"))
                .arg(format_arg("to"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .arg(Arg::new("path").index(1).value_hint(ValueHint::FilePath))
                .arg(
                    Arg::new("stage")
                        .index(2)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_STAGES,
                        )),
                ),
        )
        .subcommand(
            Command::new("comment")
                .arg(Arg::new("path").index(1).value_hint(ValueHint::FilePath))
                .arg(Arg::new("url").long("url").value_hint(ValueHint::Url))
                .arg(Arg::new("author").long("author"))
                .arg(Arg::new("text").long("text")),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "relay", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "relay", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "relay", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
