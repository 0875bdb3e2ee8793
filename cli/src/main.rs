//! unexam CLI - exam question reconstruction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unexam::render::{self, ExtractionStats};
use unexam::{
    extract_batch, extract_file_with_options, ExtractOptions, Extraction, JsonFormat,
    PageSelection,
};

#[derive(Parser)]
#[command(name = "unexam")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild exam questions from two-column PDF page geometry", long_about = None)]
struct Cli {
    /// Input page-geometry dump (JSON or gzip-compressed JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract questions, tables and text into an output directory
    Extract {
        /// Input page-geometry dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Fail on the first page or table fault
        #[arg(long)]
        strict: bool,

        /// Year used when the header table prints none
        #[arg(long, env = "UNEXAM_YEAR")]
        year: Option<i32>,

        /// Semester used when the header table prints none
        #[arg(long, env = "UNEXAM_SEMESTER")]
        semester: Option<u32>,
    },

    /// Print the reconstructed exam as JSON
    Json {
        /// Input page-geometry dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Print the column text of every page
    Text {
        /// Input page-geometry dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show exam metadata and extraction statistics
    Info {
        /// Input page-geometry dump
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Extract several dumps in parallel, one output directory each
    Batch {
        /// Input page-geometry dumps
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Parent output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            pages,
            strict,
            year,
            semester,
        }) => cmd_extract(&input, output.as_deref(), pages.as_deref(), strict, year, semester),
        Some(Commands::Json {
            input,
            output,
            compact,
            pages,
        }) => {
            let result = cmd_json(&input, output.as_deref(), compact, pages.as_deref());
            if let Err(e) = result {
                log::error!("Failed to extract {}: {}", input.display(), e);
                println!("{}", render::failure_json(&e));
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Text {
            input,
            output,
            pages,
        }) => cmd_text(&input, output.as_deref(), pages.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Batch { inputs, output }) => cmd_batch(&inputs, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract if input is provided
            if let Some(input) = cli.input {
                cmd_extract(&input, cli.output.as_deref(), None, false, None, None)
            } else {
                println!("{}", "Usage: unexam <FILE> [OUTPUT]".yellow());
                println!("       unexam --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn page_selection(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    match pages {
        Some(p) => Ok(PageSelection::parse(p)?),
        None => Ok(PageSelection::All),
    }
}

fn default_output_dir(input: &Path) -> PathBuf {
    let name = input.file_name().unwrap_or_default().to_string_lossy();
    let stem = name
        .trim_end_matches(".gz")
        .trim_end_matches(".json")
        .trim_end_matches(".layout");
    PathBuf::from(format!("{}_output", stem))
}

/// Write `questions.json`, `tables.json` (when tables exist) and `extracted_text.txt`.
fn write_outputs(extraction: &Extraction, dir: &Path) -> Result<Vec<&'static str>, unexam::Error> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let json = render::to_json(&extraction.document, JsonFormat::Pretty)?;
    fs::write(dir.join("questions.json"), json)?;
    written.push("questions.json");

    if !extraction.document.tables.is_empty() {
        let tables = render::to_tables_json(&extraction.document.tables, JsonFormat::Pretty)?;
        fs::write(dir.join("tables.json"), tables)?;
        written.push("tables.json");
    }

    fs::write(
        dir.join("extracted_text.txt"),
        render::to_page_text(&extraction.pages),
    )?;
    written.push("extracted_text.txt");

    Ok(written)
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    strict: bool,
    year: Option<i32>,
    semester: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| default_output_dir(input));

    let mut options = ExtractOptions::new().with_pages(page_selection(pages)?);
    if strict {
        options = options.strict();
    }
    if year.is_some() || semester.is_some() {
        let defaults = ExtractOptions::default();
        options = options.with_term(
            year.unwrap_or(defaults.default_year),
            semester.unwrap_or(defaults.default_semester),
        );
    }

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Reconstructing questions...");
    let extraction = extract_file_with_options(input, &options)?;
    pb.inc(1);

    pb.set_message("Writing output...");
    let written = write_outputs(&extraction, &output_dir)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    print_summary(&extraction, &ExtractionStats::from_extraction(&extraction));

    println!("\n{} {}", "Output files:".green().bold(), output_dir.display());
    for (i, name) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(())
}

fn print_summary(extraction: &Extraction, stats: &ExtractionStats) {
    let doc = &extraction.document;

    println!();
    println!("{}", "Extraction Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "{}: {}",
        "Subject".bold(),
        doc.subject.as_deref().unwrap_or("-")
    );
    match stats.expected_questions {
        Some(expected) => println!(
            "{}: {}/{}",
            "Questions".bold(),
            stats.question_count,
            expected
        ),
        None => println!("{}: {}", "Questions".bold(), stats.question_count),
    }
    println!("{}: {}", "Table choices".bold(), stats.table_choice_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Instructions".bold(), stats.instruction_count);

    if let Some(rate) = stats.extraction_rate {
        let rate_text = format!("{:.1}%", rate);
        let rate_text = if stats.is_complete() {
            rate_text.green()
        } else {
            rate_text.yellow()
        };
        println!("{}: {}", "Extraction rate".bold(), rate_text);
    }
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
) -> Result<(), unexam::Error> {
    let pages = match pages {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    };
    let options = ExtractOptions::new().with_pages(pages);
    let extraction = extract_file_with_options(input, &options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&extraction.document, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExtractOptions::new().with_pages(page_selection(pages)?);
    let extraction = extract_file_with_options(input, &options)?;

    let text = render::to_page_text(&extraction.pages);

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", text);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = extract_file_with_options(input, &ExtractOptions::default())?;
    let doc = &extraction.document;
    let stats = ExtractionStats::from_extraction(&extraction);

    println!("{}", "Exam Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), stats.page_count);
    if let Some(ref subject) = doc.subject {
        println!("{}: {}", "Subject".bold(), subject);
    }
    if let Some(ref code) = doc.subject_code {
        println!("{}: {}", "Subject code".bold(), code);
    }
    println!("{}: {}", "Year".bold(), doc.year);
    println!("{}: {}", "Semester".bold(), doc.semester);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Questions".bold(), stats.question_count);
    if let Some(expected) = stats.expected_questions {
        println!("{}: {}", "Expected".bold(), expected);
    }
    println!("{}: {}", "Table choices".bold(), stats.table_choice_count);
    println!(
        "{}: {}",
        "Incomplete choices".bold(),
        stats.incomplete_choice_count
    );
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Instructions".bold(), stats.instruction_count);

    Ok(())
}

fn cmd_batch(inputs: &[PathBuf], output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let parent = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Reconstructing {} documents...", inputs.len()));

    let results = extract_batch(inputs, &ExtractOptions::default());
    spinner.finish_and_clear();

    let mut failures = 0;
    for (input, result) in inputs.iter().zip(results) {
        let dir = parent.join(default_output_dir(input));
        let outcome = result.and_then(|extraction| {
            write_outputs(&extraction, &dir)?;
            Ok(extraction.document.total_questions)
        });

        match outcome {
            Ok(count) => println!(
                "{} {} ({} questions) -> {}",
                "Extracted".green(),
                input.display(),
                count,
                dir.display()
            ),
            Err(e) => {
                failures += 1;
                log::error!("Failed to extract {}: {}", input.display(), e);
                println!("{} {}: {}", "Failed".red(), input.display(), e);
            }
        }
    }

    println!(
        "\n{} {} of {} documents extracted",
        "Done!".green().bold(),
        inputs.len() - failures,
        inputs.len()
    );

    if failures > 0 {
        return Err(format!("{} documents failed", failures).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unexam".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Exam question reconstruction tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("dir/exam.layout.json.gz")),
            PathBuf::from("exam_output")
        );
        assert_eq!(
            default_output_dir(Path::new("exam.json")),
            PathBuf::from("exam_output")
        );
    }

    #[test]
    fn test_page_selection() {
        assert_eq!(page_selection(None).unwrap(), PageSelection::All);
        assert!(page_selection(Some("3-1")).is_err());
    }

    #[test]
    fn test_write_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let layout = unexam::LayoutDocument::new(vec![unexam::source::LayoutPage::a4(1)
            .with_text_line(40.0, 80.0, "1. 질문입니다 ①가 ②나")]);
        let extraction =
            unexam::extract_document(&layout, &ExtractOptions::default()).unwrap();

        let written = write_outputs(&extraction, dir.path()).unwrap();
        assert_eq!(written, vec!["questions.json", "extracted_text.txt"]);
        assert!(dir.path().join("questions.json").exists());
        assert!(!dir.path().join("tables.json").exists());

        let text = fs::read_to_string(dir.path().join("extracted_text.txt")).unwrap();
        assert!(text.starts_with("===== 페이지 1 ====="));
    }
}
