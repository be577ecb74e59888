//! Resume screener: keyword-based resume scoring and ranking

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info};
use resume_screener::cli::{self, Cli, Commands, ConfigAction, JobSource, OutputOptions};
use resume_screener::config::Config;
use resume_screener::error::ScreenerError;
use resume_screener::input::manager::document_name;
use resume_screener::input::InputManager;
use resume_screener::output::{save_report_to_file, suggest_filename, ReportGenerator, ScreeningReport};
use resume_screener::processing::ranking::rank_extracted;
use resume_screener::processing::scorer::KeywordScorer;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Score { resume, job, output } => {
            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Resume file: {}", e)))?;

            screen(vec![resume], job, output, &config, false).await?;
        }

        Commands::Rank { resumes, job, output } => {
            for resume in &resumes {
                cli::validate_file_extension(resume, cli::RESUME_EXTENSIONS).map_err(|e| {
                    ScreenerError::InvalidInput(format!("Resume file {}: {}", resume.display(), e))
                })?;
            }

            screen(resumes, job, output, &config, true).await?;
        }

        Commands::Presets { show } => match show {
            Some(name) => {
                let preset = config.get_preset(&name)?;
                println!("💼 {}\n", preset.name);
                println!("{}", preset.description);
            }
            None => {
                println!("💼 Job Description Presets\n");
                for preset in &config.presets {
                    println!("  • {}", preset.name);
                }
                println!("\n💡 Use with: resume-screener score --resume <file> --preset \"<name>\"");
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Core Skills: {}", config.scoring.core_skills.join(", "));
                println!("Core Skill Weight: {}", config.scoring.core_skill_weight);
                println!("Excellent Threshold: {:.1}%", config.scoring.excellent_threshold);
                println!("Default Output: {:?}", config.output.format);
                println!("Presets: {}", config.presets.len());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save().context("Failed to write default configuration")?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

/// Extract, score, rank and render a batch of resumes.
async fn screen(
    resumes: Vec<PathBuf>,
    job: JobSource,
    options: OutputOptions,
    config: &Config,
    batch: bool,
) -> anyhow::Result<()> {
    let format = match &options.output {
        Some(name) => cli::parse_output_format(name).map_err(ScreenerError::InvalidInput)?,
        None => config.output.format,
    };
    let detailed = options.detailed || config.output.detailed;

    let scorer = KeywordScorer::from_config(&config.scoring)?;
    let mut input_manager = InputManager::new().with_progress(batch);

    let (job_source, job_text) = match (&job.job, &job.preset) {
        (Some(path), _) => {
            cli::validate_file_extension(path, cli::JOB_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;
            let text = input_manager
                .extract_text(path)
                .await
                .with_context(|| format!("Failed to read job description {}", path.display()))?;
            (document_name(path), text)
        }
        (None, Some(name)) => {
            let preset = config.get_preset(name)?;
            (preset.name.clone(), preset.description.clone())
        }
        (None, None) => {
            anyhow::bail!(ScreenerError::InvalidInput(
                "A job description file or preset is required".to_string()
            ));
        }
    };

    info!("Screening {} resume(s) against '{}'", resumes.len(), job_source);
    let documents = input_manager.extract_batch(&resumes).await;

    // A single unreadable resume fails the command instead of ranking nothing
    if !batch {
        if let Some((name, Err(e))) = documents.first() {
            anyhow::bail!("Failed to read resume {}: {}", name, e);
        }
    }

    let previews: HashMap<String, String> = if detailed {
        documents
            .iter()
            .filter_map(|(name, outcome)| outcome.as_ref().ok().map(|text| (name.clone(), text.clone())))
            .collect()
    } else {
        HashMap::new()
    };

    let outcome = rank_extracted(&scorer, &job_text, documents);
    let report = ScreeningReport::new(outcome, &scorer, &job_source)
        .with_previews(&previews, config.output.preview_chars);

    let saving = options.save.is_some();
    let generator = ReportGenerator::with_options(config.output.color_output && !saving, detailed, true, true);
    let rendered = generator.generate_report(&report, &format)?;

    match options.save {
        Some(path) => {
            let target = if path.is_dir() {
                path.join(suggest_filename(&format, &job_source, true))
            } else {
                path
            };
            save_report_to_file(&rendered, &target)
                .with_context(|| format!("Failed to save report to {}", target.display()))?;
            debug!("Saved {:?} report ({} bytes)", format, rendered.len());
            println!("✅ Report saved to {}", target.display());
        }
        None => print!("{}", rendered),
    }

    if !report.failures.is_empty() {
        eprintln!("⚠️  {} resume(s) could not be read and were not ranked", report.failures.len());
    }

    Ok(())
}
