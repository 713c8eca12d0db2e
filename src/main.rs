use std::io;
use std::path::Path;

use anyhow::Context as _;
use clap::Parser;

use hashvault::cli::login::{LoginError, LoginSession, TerminalPrompter};
use hashvault::cli::{run_selectors, Args, Context};
use hashvault::{Config, CredentialStore, DigestEngine};

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level)
        .parse_env("RUST_LOG")
        .format_timestamp_secs()
        .format_module_path(true);

    if let Some(log_file) = &config.log_file {
        let file = std::fs::File::create(log_file)
            .with_context(|| format!("Cannot create log file {}", log_file.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn run_login(config: &Config, engine: DigestEngine) -> anyhow::Result<()> {
    let store = CredentialStore::load(&config.credential_store).into_store();
    log::debug!("Credential store holds {} user(s)", store.len());

    let mut session = LoginSession::new(&store, engine, TerminalPrompter)
        .with_max_attempts(config.max_login_attempts);

    match session.run() {
        Ok(_) => Ok(()),
        Err(LoginError::Aborted) => {
            println!("Login aborted.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();

    let mut config = Config::load();
    args.apply(&mut config);

    init_logging(&config)?;
    log::debug!("Loaded config: {:?}", config);

    // An unknown algorithm is a configuration error; nothing works without it
    let engine = DigestEngine::from_name(&config.digest_algorithm)?;
    log::info!("Using {} digests", engine.algorithm().name());

    if args.login {
        return run_login(&config, engine);
    }

    let ctx = Context::new(config, engine).with_color(!args.no_color && console::colors_enabled());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_selectors(&ctx, args.selectors.as_slice(), &mut out)?;

    Ok(())
}
