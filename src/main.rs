//! resume-ranker: rank resumes against a job description

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction};
use resume_ranker::config::{Config, OutputFormat};
use resume_ranker::demo;
use resume_ranker::input::file_detector::{FileType, SUPPORTED_EXTENSIONS};
use resume_ranker::input::InputManager;
use resume_ranker::output::formatter::{save_report_to_file, suggest_filename};
use resume_ranker::output::{RankingReport, ReportGenerator, SkippedInput};
use resume_ranker::processing::document::RawDocument;
use resume_ranker::processing::pipeline::RankingPipeline;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Reset and path must work even when the file on disk does not parse.
    if let Commands::Config {
        action: Some(action @ (ConfigAction::Reset | ConfigAction::Path)),
    } = &cli.command
    {
        let path = cli.config.clone().unwrap_or_else(Config::config_path);
        if let Err(e) = run_config_action(*action, &path) {
            error!("Command failed: {:#}", e);
            process::exit(1);
        }
        return;
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Could not read configuration from {}", path.display())),
        None => Ok(Config::load()?),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    match command {
        Commands::Rank {
            job,
            job_text,
            resumes,
            output,
            save,
            top,
            detailed,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let mut input_manager = InputManager::new().with_cache(config.input.enable_cache);

            let (job_description, job_name) = match (job, job_text) {
                (Some(path), _) => {
                    cli::validate_file_extension(&path, SUPPORTED_EXTENSIONS)
                        .map_err(|e| anyhow::anyhow!("Job description file: {}", e))?;
                    let text = input_manager
                        .extract_text(&path)
                        .await
                        .with_context(|| format!("Could not read job description {}", path.display()))?;
                    (text, path.display().to_string())
                }
                (None, Some(text)) => (text, "job".to_string()),
                (None, None) => bail!("A job description is required"),
            };

            if job_description.trim().is_empty() {
                bail!("Job description is empty");
            }

            let started = Instant::now();
            let (documents, skipped) =
                load_resumes(&mut input_manager, &resumes, config.input.min_text_chars).await;

            if documents.is_empty() {
                bail!("No valid resumes could be processed ({} skipped)", skipped.len());
            }

            let pipeline = RankingPipeline::new(&config)?;
            let results = pipeline.rank_documents(&documents, &job_description)?;
            let report = RankingReport::new(
                &job_description,
                results,
                skipped,
                started.elapsed().as_millis() as u64,
            );
            if let Some(best) = report.best() {
                info!("Best match: {} ({:.2}%)", best.label, best.percentage_match);
            }

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
                top.or(config.output.top_n),
            );
            let rendered = generator.generate_report(&report, &format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&format, &job_name, true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Demo { output } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let started = Instant::now();

            let pipeline = RankingPipeline::new(&config)?;
            let results = pipeline.rank_documents(&demo::demo_documents(), demo::DEMO_JOB_DESCRIPTION)?;
            let report = RankingReport::new(
                demo::DEMO_JOB_DESCRIPTION,
                results,
                Vec::new(),
                started.elapsed().as_millis() as u64,
            );

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                config.output.detailed,
                true,
                true,
                config.output.top_n,
            );
            println!("{}", generator.generate_report(&report, &format)?);
        }

        Commands::Skills { file } => {
            let mut input_manager = InputManager::new();
            let document = input_manager
                .load_document(&file)
                .await
                .with_context(|| format!("Could not read {}", file.display()))?;

            let pipeline = RankingPipeline::new(&config)?;
            let processed = pipeline.processor().process_document(&document);

            println!("{} skills found in {}", processed.skill_count, file.display());
            for skill in &processed.skills {
                println!("  • {}", skill);
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    println!("Configuration ({}):\n", path.display());
                    println!("{}", toml::to_string_pretty(&config)?);
                }
                other => run_config_action(other, &path)?,
            }
        }
    }

    Ok(())
}

fn run_config_action(action: ConfigAction, path: &Path) -> anyhow::Result<()> {
    match action {
        ConfigAction::Reset => {
            Config::reset(path).with_context(|| format!("Could not write {}", path.display()))?;
            info!("Configuration reset to defaults");
            println!("Configuration reset: {}", path.display());
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Show => bail!("show needs a loaded configuration"),
    }
    Ok(())
}

fn resolve_format(requested: Option<&str>, config: &Config) -> anyhow::Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(anyhow::Error::msg),
        None => Ok(config.output.format),
    }
}

/// Extract every resume, setting aside the ones that cannot be ranked.
async fn load_resumes(
    input_manager: &mut InputManager,
    paths: &[PathBuf],
    min_text_chars: usize,
) -> (Vec<RawDocument>, Vec<SkippedInput>) {
    let progress = ProgressBar::new(paths.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
        progress.set_style(style);
    }

    let mut documents = Vec::new();
    let mut skipped = Vec::new();

    for path in paths {
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        progress.set_message(label.clone());

        let outcome = if !FileType::from_path(path).is_supported() {
            Err(format!("unsupported format (supported: {})", SUPPORTED_EXTENSIONS.join(", ")))
        } else {
            match input_manager.load_document(path).await {
                Ok(document) if document.text.trim().chars().count() < min_text_chars => Err(format!(
                    "too little text (fewer than {} characters)",
                    min_text_chars
                )),
                Ok(document) => Ok(document),
                Err(e) => Err(e.to_string()),
            }
        };

        match outcome {
            Ok(document) => documents.push(document),
            Err(reason) => {
                warn!("Skipping {}: {}", path.display(), reason);
                skipped.push(SkippedInput { label, reason });
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    info!("Loaded {} resumes, skipped {}", documents.len(), skipped.len());
    (documents, skipped)
}
