use clap::{CommandFactory, Parser};
use lunch_buddies::domain::ports::Confirmer;
use lunch_buddies::utils::{logger, validation::Validate};
use lunch_buddies::{
    AppConfig, AutoConfirm, BuddyError, CliConfig, DrawEngine, DrawOutcome, FileCandidateSource,
    JsonHistoryStore, PromptConfirmer, Result,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting lunch-buddies");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let outcome = if config.auto_confirm {
        run_draw(&config, AutoConfirm)
    } else {
        run_draw(&config, PromptConfirmer::stdio())
    };

    match outcome {
        Ok(outcome) => {
            if outcome.round.is_some() && !outcome.history_written {
                eprintln!(
                    "⚠️ The pairing was confirmed but could not be saved to {}",
                    config.history_path
                );
            }
            tracing::info!("✅ Draw completed after {} attempt(s)", outcome.attempts);
            println!(
                "✅ {} pair(s) confirmed after {} attempt(s)",
                outcome.draw.pairs().len(),
                outcome.attempts
            );
        }
        Err(e) => exit_with(&e),
    }
}

fn run_draw<F: Confirmer>(config: &AppConfig, confirmer: F) -> Result<DrawOutcome> {
    let settings = config.draw_settings()?;
    let rng = match config.seed {
        Some(seed) => {
            tracing::info!("🎲 Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let candidates = FileCandidateSource::new(config.candidates_path()?);
    let history = JsonHistoryStore::new(&config.history_path);

    DrawEngine::new(candidates, history, confirmer, rng, settings).run()
}

fn exit_with(e: &BuddyError) -> ! {
    tracing::error!(
        "❌ lunch-buddies failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    eprintln!("❌ ERROR: {}", e.user_friendly_message());
    if matches!(e, BuddyError::MissingArgument { .. }) {
        eprintln!("{}", CliConfig::command().render_usage());
    } else {
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    }

    std::process::exit(e.exit_code());
}
