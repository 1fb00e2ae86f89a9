//! Generate command: the curriculum ingestion pipeline.

use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::args::GenerateArgs;
use crate::config::CourseConfig;
use crate::curriculum::{Curriculum, CurriculumGenerator, GeminiGenerator, run_pipeline};
use crate::probe::Transport;

/// Read the source material (`-` is stdin).
fn read_source(args: &GenerateArgs) -> Result<String> {
    if args.source.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read source material from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(&args.source)
        .with_context(|| format!("Failed to read source material `{}`", args.source.display()))
}

/// Run the pipeline against `generator` and print the result.
pub async fn generate_with(
    generator: &dyn CurriculumGenerator,
    args: &GenerateArgs,
    source: &str,
) -> Result<Curriculum> {
    let curriculum = run_pipeline(generator, &args.topic, source)
        .await
        .context("generation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&curriculum)?);
    } else {
        print_curriculum(&curriculum);
    }
    Ok(curriculum)
}

/// Execute generate command
pub async fn run_generate(
    args: &GenerateArgs,
    config: &CourseConfig,
    transport: Arc<dyn Transport>,
) -> Result<Curriculum> {
    let source = read_source(args)?;
    let generator =
        GeminiGenerator::from_config(&config.generator, transport).context("generation failed")?;
    generate_with(&generator, args, &source).await
}

fn print_curriculum(curriculum: &Curriculum) {
    for week in &curriculum.weeks {
        println!();
        println!(
            "{}{}{} {}",
            "[".dimmed(),
            format!("week {}", week.week).cyan(),
            "]".dimmed(),
            week.title.bold()
        );
        println!("{}", week.description);
        for objective in &week.objectives {
            println!("{} {}", "-".dimmed(), objective);
        }
    }
}
