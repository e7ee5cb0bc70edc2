//! resumark CLI - resume markup formatter

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use resumark::render::docx::entry_names;
use resumark::{
    compose, detect_format_from_bytes, ArtifactFormat, Identity, JsonFormat, LineKind,
    MarkupParser, PageSetup, Resumark, SofficeConverter, TailoredContent,
};

#[derive(Parser)]
#[command(name = "resumark")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Format resume markup into DOCX and PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markup file to DOCX and PDF
    Render {
        /// Input markup file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        identity: IdentityArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compose markup from tailored content JSON
    Compose {
        /// Tailored content JSON file
        #[arg(value_name = "FILE")]
        content: PathBuf,

        #[command(flatten)]
        identity: IdentityArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Compose markup from tailored content and render it
    Build {
        /// Tailored content JSON file
        #[arg(value_name = "FILE")]
        content: PathBuf,

        #[command(flatten)]
        identity: IdentityArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Also save the composed markup next to the outputs
        #[arg(long)]
        keep_markup: bool,
    },

    /// Show how a markup file is classified, or identify an artifact
    Inspect {
        /// Markup file, or a produced .docx/.pdf
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        identity: IdentityArgs,

        /// Print the laid-out document as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct IdentityArgs {
    /// Identity JSON file (name and contact details)
    #[arg(short, long, value_name = "FILE")]
    identity: Option<PathBuf>,

    /// Owner name, overrides the identity file
    #[arg(long)]
    name: Option<String>,
}

impl IdentityArgs {
    fn load(&self) -> Result<Identity, Box<dyn std::error::Error>> {
        let mut identity = match self.identity {
            Some(ref path) => Identity::from_json(&fs::read_to_string(path)?)?,
            None => Identity::default(),
        };
        if let Some(ref name) = self.name {
            identity.name = name.clone();
        }
        Ok(identity)
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Base name of the output files
    #[arg(long, default_value = "resume")]
    stem: String,

    /// Page size
    #[arg(long, value_enum, default_value = "letter")]
    page: PageSize,

    /// Skip PDF conversion
    #[arg(long)]
    docx_only: bool,

    /// Office suite executable used for PDF conversion
    #[arg(long, env = "RESUMARK_SOFFICE", default_value = "soffice")]
    soffice: PathBuf,

    /// PDF conversion time limit in seconds
    #[arg(long, env = "RESUMARK_TIMEOUT", default_value = "120")]
    timeout: u64,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSize {
    /// US Letter (8.5 x 11 in)
    Letter,
    /// ISO A4 (210 x 297 mm)
    A4,
}

impl From<PageSize> for PageSetup {
    fn from(size: PageSize) -> Self {
        match size {
            PageSize::Letter => PageSetup::letter(),
            PageSize::A4 => PageSetup::a4(),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            identity,
            output,
        }) => cmd_render(&input, &identity, &output),
        Some(Commands::Compose {
            content,
            identity,
            output,
        }) => cmd_compose(&content, &identity, output.as_deref()),
        Some(Commands::Build {
            content,
            identity,
            output,
            keep_markup,
        }) => cmd_build(&content, &identity, &output, keep_markup),
        Some(Commands::Inspect {
            input,
            identity,
            json,
            compact,
        }) => cmd_inspect(&input, &identity, json, compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: resumark <COMMAND> <FILE>".yellow());
            println!("       resumark --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_render(
    input: &Path,
    identity: &IdentityArgs,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let markup = fs::read_to_string(input)?;
    let identity = identity.load()?;
    write_outputs(&identity, &markup, output)
}

fn cmd_compose(
    content: &Path,
    identity: &IdentityArgs,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = TailoredContent::from_json(&fs::read_to_string(content)?)?;
    let markup = compose(&identity.load()?, &content);

    if let Some(path) = output {
        fs::write(path, &markup)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", markup);
    }

    Ok(())
}

fn cmd_build(
    content: &Path,
    identity: &IdentityArgs,
    output: &OutputArgs,
    keep_markup: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = TailoredContent::from_json(&fs::read_to_string(content)?)?;
    let identity = identity.load()?;
    let markup = compose(&identity, &content);

    if keep_markup {
        fs::create_dir_all(&output.output)?;
        let path = output.output.join(format!("{}.md", output.stem));
        fs::write(&path, &markup)?;
        println!("{} {}", "Saved to".green(), path.display());
    }

    write_outputs(&identity, &markup, output)
}

fn write_outputs(
    identity: &Identity,
    markup: &str,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(&output.output)?;
    let docx_path = output.output.join(format!("{}.docx", output.stem));
    let pdf_path = output.output.join(format!("{}.pdf", output.stem));

    let resume = Resumark::new()
        .with_page(output.page.into())
        .with_timeout(Duration::from_secs(output.timeout))
        .format(identity, markup);

    if output.docx_only {
        fs::write(&docx_path, resume.to_docx()?)?;
        println!("{} {}", "Saved to".green(), docx_path.display());
        return Ok(());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Rendering DOCX and converting to PDF...");

    let converter = SofficeConverter::with_program(&output.soffice);
    let result = resume.export(&docx_path, &pdf_path, &converter);
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            println!("{}", "Output files:".green().bold());
            println!("  {} {}", "├─".dimmed(), docx_path.display());
            println!("  {} {}", "└─".dimmed(), pdf_path.display());
            Ok(())
        }
        Err(e) if e.is_conversion() && docx_path.exists() => {
            println!("{} {}", "Saved to".green(), docx_path.display());
            println!(
                "{}",
                "PDF was not produced; the DOCX file is complete.".yellow()
            );
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_inspect(
    input: &Path,
    identity: &IdentityArgs,
    json: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;

    if let Ok(format) = detect_format_from_bytes(&data) {
        println!("{}", "Artifact Information".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "File".bold(), input.display());
        println!("{}: {}", "Format".bold(), format);
        println!("{}: {}", "Size".bold(), data.len());
        if format == ArtifactFormat::Docx {
            for name in entry_names(&data)? {
                println!("  {} {}", "·".dimmed(), name);
            }
        }
        return Ok(());
    }

    let markup = String::from_utf8(data).map_err(|_| "input is neither markup nor an artifact")?;
    let identity = identity.load()?;

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", Resumark::new().format(&identity, &markup).to_json(format)?);
        return Ok(());
    }

    println!("{}", "Line Classification".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for line in MarkupParser::new().parse(&markup) {
        if line.kind == LineKind::Blank {
            continue;
        }
        println!(
            "{} {} {}",
            format!("{:>4}", line.number).dimmed(),
            format!("{:<28}", format!("{:?}", line.kind)).yellow(),
            line.text
        );
    }

    let doc = resumark::format_document(&identity, &markup);
    println!();
    println!("{}", "Layout".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for block in &doc.blocks {
        println!("  {} {}", "·".dimmed(), block.kind_name());
    }
    println!("{}: {}", "Sections".bold(), doc.section_titles().join(", "));
    println!("{}: {}", "Blocks".bold(), doc.block_count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "resumark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Resume markup to DOCX and PDF formatter");
    println!();
    println!("License: MIT");
}
