// Command-line interface for md2storage
//
// This binary converts Markdown files to Confluence storage format and publishes the result as a
// draft page. All conversion work happens in the storage-babel crate; this is only the shell: it
// reads files, loads configuration, wires up logging and reports errors.
//
// Converting:
//
// The target format defaults to "storage". When -o is given without --to, the format is detected
// from the output file extension. Storage output goes to the configured artifact location
// (confluence_output/<stem>_xhtml.txt) unless -o or --stdout says otherwise; the other formats go
// to stdout.
// Usage:
//  md2storage <input> [--to <format>] [-o <file>] [--stdout]          - Convert (default)
//  md2storage convert <input> [--to <format>] [-o <file>] [--stdout]  - Same as above (explicit)
//  md2storage publish <input> [--title <title>] [--parent <title>] [--convert]
//  md2storage --list-formats                                         - List output formats
//
// Publishing:
//
// publish reads the artifact written by a previous convert (or converts in memory with --convert)
// and creates a draft page. Site, token and space come from the [publish] config section or the
// CONFLUENCE_URL, CONFLUENCE_API_TOKEN, CONFLUENCE_SPACE_KEY and CONFLUENCE_PARENT_PAGE_TITLE
// environment variables, which may also be kept in a .env file in the working directory.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::fs;
use std::path::{Path, PathBuf};
use storage_babel::export::{artifact_path, export, ExportArtifact, ExportSpec};
use storage_babel::publish::{draft_title, publish_draft, RestClient};
use storage_babel::{convert_with_options, ConvertOptions, FormatRegistry, PublishError};
use storage_config::{ConvertConfig, Loader, StorageConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "publish", "help"];

fn build_cli() -> Command {
    Command::new("md2storage")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to Confluence storage format and publish drafts")
        .long_about(
            "md2storage turns Markdown documents into Confluence storage format (XHTML).\n\n\
            Commands:\n  \
            - convert: Render a Markdown file (default command)\n  \
            - publish: Create a draft page from a converted file\n\n\
            Examples:\n  \
            md2storage guide.md                      # Write confluence_output/guide_xhtml.txt\n  \
            md2storage guide.md --stdout             # Print storage format\n  \
            md2storage guide.md --to html            # Print baseline HTML\n  \
            md2storage publish guide.md              # Publish the converted file as a draft",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .help("Log more (-v info, -vv debug); RUST_LOG takes precedence")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a Markdown file (default command)")
                .long_about(
                    "Render a Markdown file to one of the pipeline formats.\n\n\
                    Formats:\n  \
                    - storage:  Confluence storage format (default)\n  \
                    - html:     Baseline HTML before storage rewriting\n  \
                    - markdown: The source with its title line stripped\n\n\
                    Storage output is written to the configured output directory unless\n\
                    -o or --stdout is given. Other formats go to stdout by default.\n\n\
                    Examples:\n  \
                    md2storage convert notes.md                    # confluence_output/notes_xhtml.txt\n  \
                    md2storage convert notes.md -o page.xhtml      # Explicit output file\n  \
                    md2storage convert notes.md -o notes.html      # Format detected from extension\n  \
                    md2storage notes.md --stdout                   # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (storage, html, markdown)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("stdout")
                        .long("stdout")
                        .help("Write to stdout instead of a file")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("publish")
                .about("Publish a converted file as a draft page")
                .long_about(
                    "Create a draft page from the converted artifact of a Markdown file.\n\n\
                    The page title defaults to the file name with dashes turned into spaces,\n\
                    each word capitalized, and the configured suffix appended:\n\
                    my-first-post.md becomes \"My First Post (Draft)\".\n\n\
                    Publishing is not idempotent: every run creates a new draft.\n\n\
                    Examples:\n  \
                    md2storage publish notes.md                     # Publish converted notes\n  \
                    md2storage publish notes.md --convert           # Convert in memory first\n  \
                    md2storage publish notes.md --parent \"Team Home\"",
                )
                .arg(
                    Arg::new("input")
                        .help("Markdown file whose conversion is published")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Page title (derived from the file name by default)"),
                )
                .arg(
                    Arg::new("parent")
                        .long("parent")
                        .value_name("TITLE")
                        .help("Title of the page to nest under"),
                )
                .arg(
                    Arg::new("convert")
                        .long("convert")
                        .help("Convert the Markdown file instead of reading the artifact")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Arguments with `convert` injected when the first argument looks like a file.
fn implied_convert_args(args: &[String]) -> Option<Vec<String>> {
    let first = args.get(1)?;
    if first.starts_with('-') || SUBCOMMANDS.contains(&first.as_str()) {
        return None;
    }
    let mut new_args = vec![args[0].clone(), "convert".to_string()];
    new_args.extend_from_slice(&args[1..]);
    Some(new_args)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => match implied_convert_args(&args) {
            Some(new_args) => match cli.try_get_matches_from(&new_args) {
                Ok(m) => m,
                Err(e2) => e2.exit(),
            },
            None => e.exit(),
        },
    };

    init_logging(matches.get_count("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => handle_convert_command(sub_matches, &config),
        Some(("publish", sub_matches)) => handle_publish_command(sub_matches, &config),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn default_log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn init_logging(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbosity))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Where converted text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    Stdout,
    File(PathBuf),
}

/// Target format: `--to`, else detected from `-o`, else storage.
fn target_format(to: Option<&str>, output: Option<&str>) -> String {
    if let Some(to) = to {
        return to.to_string();
    }
    output
        .and_then(|path| FormatRegistry::default().detect_format_from_filename(path))
        .unwrap_or_else(|| "storage".to_string())
}

/// `--stdout` beats `-o`, which beats the configured artifact location.
fn destination(
    input: &str,
    format: &str,
    output: Option<&str>,
    stdout: bool,
    config: &ConvertConfig,
) -> Destination {
    match (stdout, output) {
        (true, _) => Destination::Stdout,
        (false, Some(path)) => Destination::File(PathBuf::from(path)),
        (false, None) if format == "storage" => Destination::File(artifact_path(
            input,
            &config.output_dir,
            &config.output_suffix,
        )),
        (false, None) => Destination::Stdout,
    }
}

fn handle_convert_command(matches: &ArgMatches, config: &StorageConfig) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let output = matches.get_one::<String>("output").map(|s| s.as_str());
    let format = target_format(matches.get_one::<String>("to").map(|s| s.as_str()), output);
    let destination = destination(
        input,
        &format,
        output,
        matches.get_flag("stdout"),
        &config.convert,
    );
    debug!(input = %input, format = %format, ?destination, "converting");

    let source = read_input(input);
    let mut spec =
        ExportSpec::new(&source, &format).with_options(ConvertOptions::from(&config.convert));
    if let Destination::File(path) = &destination {
        spec = spec.with_output_path(path);
    }

    let result = export(spec).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    match result.artifact {
        ExportArtifact::InMemory(text) => print!("{text}"),
        ExportArtifact::File(path) => println!("Converted {input} -> {}", path.display()),
    }
}

fn handle_publish_command(matches: &ArgMatches, config: &StorageConfig) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");

    let settings = config.publish.client_settings().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("Set them in storage.toml [publish], a .env file or the environment.");
        std::process::exit(1);
    });

    let body = if matches.get_flag("convert") {
        let source = read_input(input);
        convert_with_options(&source, &ConvertOptions::from(&config.convert))
    } else {
        read_artifact(input, &config.convert)
    };
    let client = RestClient::new(settings).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let title = matches
        .get_one::<String>("title")
        .cloned()
        .unwrap_or_else(|| draft_title(&file_stem(input), &config.publish.title_suffix));
    let parent = matches
        .get_one::<String>("parent")
        .map(|s| s.as_str())
        .or_else(|| config.publish.parent_title());

    match publish_draft(&client, &title, &body, parent) {
        Ok(page) => {
            println!("Created draft page '{}' (id {})", page.title, page.id);
            println!("{}", page.url);
        }
        Err(PublishError::Status { status, body }) => {
            eprintln!("Failed to create page: HTTP {status}");
            eprintln!("{body}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to create page: {e}");
            std::process::exit(1);
        }
    }
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn read_artifact(input: &str, config: &ConvertConfig) -> String {
    let path = artifact_path(input, &config.output_dir, &config.output_suffix);
    if !path.exists() {
        eprintln!(
            "Error: converted file '{}' not found. Run `md2storage convert {input}` first.",
            path.display()
        );
        std::process::exit(1);
    }
    read_input(&path.to_string_lossy())
}

fn file_stem(input: &str) -> String {
    Path::new(input)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    let registry = FormatRegistry::default();
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            println!(
                "  {name:<10} {} (.{})",
                format.description(),
                format.file_extensions().join(", .")
            );
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> StorageConfig {
    let loader = Loader::new().with_optional_file("storage.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    // Variables already set in the environment win over `.env`.
    let _ = dotenvy::from_path(Path::new(".env"));

    loader
        .with_env()
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}
