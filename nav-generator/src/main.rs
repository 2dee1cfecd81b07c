use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use nav_generator::codegen::{self, NavOutput};
use nav_generator::config::NavConfig;
use nav_generator::error::NavError;
use nav_generator::export;
use nav_generator::template::{BaseTemplate, DirTemplateSource, TemplateSource};
use nav_generator::update::ConfigUpdate;

#[derive(Parser)]
#[command(name = "navgen", version)]
#[command(about = "Responsive navigation bar generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge a configuration into the base component and emit HTML/CSS
    Generate {
        /// Component directory holding index.html and css/styles.css
        #[arg(long, default_value = "component")]
        template: PathBuf,

        /// JSON configuration file (defaults are used when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override a field, e.g. --set nav-align=center (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        overrides: Vec<String>,

        /// Write nav.html and nav.css into this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// What to print to stdout when --out-dir is not given
        #[arg(long, value_enum, default_value_t = Emit::Html)]
        emit: Emit,

        /// Strict mode: treat template warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Validate a component template without producing output
    Check {
        #[arg(long, default_value = "component")]
        template: PathBuf,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Write the default configuration
    Init {
        /// Output file (stdout when omitted)
        #[arg(short)]
        o: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Apply field updates to a configuration file
    Set {
        /// Configuration file; created with defaults if missing
        #[arg(long)]
        config: PathBuf,

        /// Updates in FIELD=VALUE form, applied in order
        #[arg(required = true, value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
    },

    /// Store an image file as a data URL in the profile image field
    EmbedImage {
        /// Image file to embed
        image: PathBuf,

        #[arg(long)]
        config: PathBuf,
    },

    /// Start a live-reload preview server for a component
    Dev {
        #[arg(long, default_value = "component")]
        template: PathBuf,

        /// Configuration file, re-read on every request
        #[arg(long)]
        config: Option<PathBuf>,

        /// Server port
        #[arg(long, default_value_t = 3333)]
        port: u16,
    },
}

/// Stdout format for the generate command.
#[derive(Clone, Copy, ValueEnum)]
enum Emit {
    /// Generated markup
    Html,
    /// Generated stylesheet
    Css,
    /// Styles and markup in one preview document
    Preview,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("navgen=info,nav_generator=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            template,
            config,
            overrides,
            out_dir,
            emit,
            strict,
        } => {
            let config = load_config(config.as_deref())?;
            let config = config
                .apply_all(
                    overrides
                        .iter()
                        .map(|a| ConfigUpdate::from_assignment(a))
                        .collect::<Result<Vec<_>, _>>()?,
                )
                .context("cannot apply --set overrides")?;

            let source = DirTemplateSource::new(&template);
            let base = source.fetch()?;
            let output = generate_or_exit(&source, &base, &config, strict);
            for w in &output.warnings {
                eprintln!("warning: {w}");
            }

            if let Some(dir) = out_dir {
                let (html_path, css_path) = export::write_outputs(&dir, &output)?;
                eprintln!("wrote {} ({} bytes)", html_path.display(), output.html.len());
                eprintln!("wrote {} ({} bytes)", css_path.display(), output.css.len());
            } else {
                let text = match emit {
                    Emit::Html => output.html,
                    Emit::Css => output.css,
                    Emit::Preview => export::preview_document(&output),
                };
                print!("{text}");
            }
        }

        Commands::Check { template, strict } => {
            let source = DirTemplateSource::new(&template);
            let base = source.fetch()?;
            let warnings = match codegen::validate_template(&base) {
                Ok(w) => w,
                Err(e) => {
                    print_template_error(&e, &source, &base);
                    process::exit(1);
                }
            };
            for w in &warnings {
                eprintln!("warning: {w}");
            }
            if warnings.is_empty() {
                eprintln!("{}: ok", template.display());
            } else if strict {
                bail!("{}: {} warning(s) in strict mode", template.display(), warnings.len());
            } else {
                eprintln!("{}: {} warning(s)", template.display(), warnings.len());
            }
        }

        Commands::Init { o, force } => {
            let json = NavConfig::default().to_json()?;
            match o {
                Some(path) => {
                    if path.exists() && !force {
                        bail!("'{}' already exists (use --force to overwrite)", path.display());
                    }
                    fs::write(&path, format!("{json}\n"))
                        .with_context(|| format!("cannot write '{}'", path.display()))?;
                    eprintln!("wrote default config to {}", path.display());
                }
                None => println!("{json}"),
            }
        }

        Commands::Set {
            config,
            assignments,
        } => {
            let current = load_config_or_default(&config)?;
            let updates = assignments
                .iter()
                .map(|a| ConfigUpdate::from_assignment(a))
                .collect::<Result<Vec<_>, _>>()?;
            let count = updates.len();
            let next = current.apply_all(updates)?;
            next.save(&config)?;
            eprintln!("{}: applied {count} update(s)", config.display());
        }

        Commands::EmbedImage { image, config } => {
            let url = export::image_data_url(&image)?;
            let current = load_config_or_default(&config)?;
            let next = current.apply(ConfigUpdate::ProfileImageUrl(url.clone()))?;
            next.save(&config)?;
            eprintln!(
                "embedded {} into {} ({} bytes)",
                image.display(),
                config.display(),
                url.len()
            );
        }

        Commands::Dev {
            template,
            config,
            port,
        } => {
            let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
            rt.block_on(async {
                nav_generator::server::run_dev_server(template, config, port)
                    .await
                    .map_err(|e| anyhow::anyhow!("dev server failed: {e}"))
            })?;
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<NavConfig> {
    match path {
        Some(path) => NavConfig::load(path)
            .with_context(|| format!("cannot load config '{}'", path.display())),
        None => Ok(NavConfig::default()),
    }
}

fn load_config_or_default(path: &Path) -> anyhow::Result<NavConfig> {
    if path.exists() {
        load_config(Some(path))
    } else {
        Ok(NavConfig::default())
    }
}

fn generate_or_exit(
    source: &DirTemplateSource,
    base: &BaseTemplate,
    config: &NavConfig,
    strict: bool,
) -> NavOutput {
    let result = if strict {
        codegen::generate_strict(base, config)
    } else {
        codegen::generate(base, config)
    };
    match result {
        Ok(output) => output,
        Err(e) => {
            print_template_error(&e, source, base);
            process::exit(1);
        }
    }
}

/// Print an error with a caret under the offending template text. Spans
/// point into whichever of the two template files failed to parse.
fn print_template_error(e: &NavError, source: &DirTemplateSource, base: &BaseTemplate) {
    if nav_generator::dom::parse(&base.html).is_err() {
        print_error(e, &source.html_path(), &base.html);
    } else {
        print_error(e, &source.css_path(), &base.css);
    }
}

fn print_error(e: &NavError, path: &Path, text: &str) {
    eprintln!("error: {e}");

    if let Some(span) = &e.span {
        if span.start <= text.len() && text.is_char_boundary(span.start) {
            let line_num = text[..span.start].chars().filter(|c| *c == '\n').count() + 1;
            let line_start = text[..span.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
            let line_end = text[span.start..]
                .find('\n')
                .map(|i| span.start + i)
                .unwrap_or(text.len());
            let line = &text[line_start..line_end];
            let col = text[line_start..span.start].chars().count();

            eprintln!("  --> {}:{line_num}:{}", path.display(), col + 1);
            eprintln!("  {line_num} | {line}");
            eprintln!(
                "  {} | {}^",
                " ".repeat(line_num.to_string().len()),
                " ".repeat(col)
            );
        }
    }
}
