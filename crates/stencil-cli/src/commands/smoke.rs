//! `stencil smoke` - generate a project from the template and run its
//! lifecycle subcommands.
//!
//! Dispatch sequence:
//! 1. Build a `SmokePlan` from flags and config
//! 2. Confirm removal of a stale project unless `--yes`
//! 3. Run `SmokeTestService`, rendering each step
//! 4. Print the outcome

use std::collections::BTreeMap;
use std::io::IsTerminal as _;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, instrument};

use stencil_adapters::{CookiecutterGenerator, LocalFilesystem, ProcessTaskRunner};
use stencil_core::{
    application::{SmokeOutcome, SmokeStep, SmokeTestService},
    domain::SmokePlan,
};

use crate::{
    cli::{OutputFormat, SmokeArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: SmokeArgs,
    root: &Path,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let assume_yes = args.yes;
    let plan = build_plan(args, root, &config);
    debug!(?plan, "Smoke plan built");

    let stale = plan.expected_project_dir();
    if stale.exists() && !assume_yes {
        output.warning(&format!(
            "A generated project already exists at {}",
            stale.display()
        ))?;
        if !confirm(&format!("Remove {}?", stale.display()))? {
            return Err(CliError::Cancelled);
        }
    }

    let service = SmokeTestService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(CookiecutterGenerator::new(&config.smoke.generator)),
        Box::new(ProcessTaskRunner::new(&config.smoke.runner)),
    );

    let mut spinner: Option<ProgressBar> = None;
    let result = service.run(&plan, &mut |step| {
        if let Some(pb) = spinner.take() {
            pb.finish_and_clear();
        }
        spinner = render_step(step, &config, &output);
    });
    if let Some(pb) = spinner.take() {
        pb.finish_and_clear();
    }

    show_outcome(&result?, &output)
}

/// Template variables come from flags, falling back to `[smoke]` config.
fn build_plan(args: SmokeArgs, root: &Path, config: &AppConfig) -> SmokePlan {
    let smoke = &config.smoke;
    let mut variables = BTreeMap::new();
    variables.insert(
        SmokePlan::PROJECT_NAME.to_owned(),
        args.name.unwrap_or_else(|| smoke.project_name.clone()),
    );
    variables.insert(
        "author".to_owned(),
        args.author.unwrap_or_else(|| smoke.author.clone()),
    );
    variables.insert(
        "email".to_owned(),
        args.email.unwrap_or_else(|| smoke.email.clone()),
    );

    SmokePlan {
        template_root: root.to_path_buf(),
        output_dir: root.join(&smoke.output_dir),
        variables,
        manifest_file: config.layout.manifest_file.clone(),
        subcommands: smoke.subcommands.clone(),
        keep: args.keep,
    }
}

/// Print one step; returns a spinner while generation is running.
fn render_step(
    step: &SmokeStep,
    config: &AppConfig,
    output: &OutputManager,
) -> Option<ProgressBar> {
    let printed = match step {
        SmokeStep::RemovingStale(path) => {
            output.warning(&format!("Removing stale project {}", path.display()))
        }
        SmokeStep::Generating if output.wants_progress() => {
            return Some(spinner("Generating project from template"));
        }
        SmokeStep::Generating => output.info("Generating project from template"),
        SmokeStep::Running(subcommand) => {
            output.info(&format!("Running '{} {}'", config.smoke.runner, subcommand))
        }
        SmokeStep::CleaningUp(path) => output.info(&format!("Removing {}", path.display())),
    };
    if let Err(e) = printed {
        debug!(error = %e, "Failed to print smoke step");
    }
    None
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn show_outcome(outcome: &SmokeOutcome, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        return output.json(outcome);
    }
    output.success(&format!(
        "Smoke test passed ({} subcommand(s))",
        outcome.subcommands.len()
    ))?;
    if outcome.kept {
        output.info(&format!(
            "Generated project kept at {}",
            outcome.project_dir.display()
        ))?;
    }
    Ok(())
}

/// Ask a yes/no question on the terminal.
///
/// Refuses when stdin is not a terminal so scripts never hang on a prompt.
fn confirm(prompt: &str) -> CliResult<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "stdin is not a terminal; pass --yes to remove the stale project".into(),
            source: None,
        });
    }
    prompt_yes_no(prompt)
}

#[cfg(feature = "interactive")]
fn prompt_yes_no(prompt: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: "failed to read confirmation".into(),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn prompt_yes_no(prompt: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    print!("{prompt} [y/N] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input == "y" || input == "yes")
}
