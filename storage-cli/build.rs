use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the formats registered by storage-babel's FormatRegistry
// We need to duplicate this here since build scripts can't access the library
const AVAILABLE_FORMATS: &[&str] = &["storage", "html", "markdown"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("md2storage")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to Confluence storage format and publish drafts")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a storage.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a Markdown file (default command)")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_FORMATS,
                        )),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("stdout").long("stdout").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("publish")
                .about("Publish a converted file as a draft page")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("parent").long("parent"))
                .arg(Arg::new("convert").long("convert").action(ArgAction::SetTrue)),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "md2storage", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "md2storage", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "md2storage", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
