use std::sync::Arc;

use clap::Parser;
use tracing::debug;

use gym_coach_rs::cli::{Cli, Command, PlanArgs};
use gym_coach_rs::coach::PlanSession;
use gym_coach_rs::config::CoachConfig;
use gym_coach_rs::error::{CoachError, Result};
use gym_coach_rs::interface::{collect_profile_form, display_outcome, prompt_yes_no};
use gym_coach_rs::logging::init_logging;
use gym_coach_rs::provider::{ChatCompletionProvider, PlanProvider};
use gym_coach_rs::server;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = CoachConfig::load(cli.config.as_deref())?;
    init_logging(&config.logging, cli.verbose)?;
    debug!(provider = ?config.provider, "Loaded configuration");

    let command = cli.command.unwrap_or_default();
    match command {
        Command::Serve { bind } => cmd_serve(&config, bind).await,
        Command::Plan(args) => {
            let session = new_session(&config, cli.offline)?;
            cmd_plan(session, &args).await
        }
        Command::Wizard => {
            let session = new_session(&config, cli.offline)?;
            cmd_wizard(session).await
        }
    }
}

fn new_session(config: &CoachConfig, offline: bool) -> Result<PlanSession> {
    if offline {
        return Ok(PlanSession::offline());
    }
    let provider = config.build_provider(|key| std::env::var(key).ok())?;
    Ok(PlanSession::new(provider))
}

/// One plan from command-line answers.
async fn cmd_plan(mut session: PlanSession, args: &PlanArgs) -> Result<()> {
    let profile = args.to_form().into_profile()?;
    let outcome = session.submit(&profile).await?;

    if args.json {
        if outcome.provider_failed() {
            eprintln!("{}", gym_coach_rs::interface::FALLBACK_NOTICE);
        }
        println!("{}", serde_json::to_string_pretty(outcome.plan())?);
    } else {
        display_outcome(&outcome, profile.goal);
    }
    Ok(())
}

/// Interactive wizard; loops until the user declines to start over.
async fn cmd_wizard(mut session: PlanSession) -> Result<()> {
    loop {
        let profile = collect_profile_form()?.into_profile()?;

        println!();
        println!("Generating your plan...");
        let outcome = session.submit(&profile).await?;
        display_outcome(&outcome, profile.goal);

        if !prompt_yes_no("Start over?", false)? {
            break;
        }
        session.reset();
        println!();
    }
    Ok(())
}

/// Serve the plan endpoint. Needs a chat provider; there is no offline server.
async fn cmd_serve(config: &CoachConfig, bind: Option<String>) -> Result<()> {
    let settings = &config.provider;
    let api_key = std::env::var(&settings.api_key_env).map_err(|_| {
        CoachError::Config(format!(
            "{} must be set to serve the plan endpoint",
            settings.api_key_env
        ))
    })?;

    let provider: Arc<dyn PlanProvider> = Arc::new(ChatCompletionProvider::new(
        &settings.endpoint,
        &settings.model,
        api_key,
        settings.temperature,
        settings.timeouts(),
    )?);

    let addr = server::parse_bind(bind.as_deref().unwrap_or(&config.server.bind))?;
    let app = server::router(provider, &config.server.route);
    server::serve(addr, app).await
}
