use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::{error, info, warn};

use scene_picker::repl::{parse_rows, Command as ReplCommand, Repl};
use scene_picker::{Config, HttpBackend, Language, SceneController, Translator};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("scene-picker")
        .version(env!("CARGO_PKG_VERSION"))
        .author("TigreRoll")
        .about("Analyze a video with the scene extraction service and download the scenes you pick")
        .arg(
            Arg::new("url")
                .value_name("URL")
                .help("Video URL to analyze (prompted for when omitted)")
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file (TOML)")
        )
        .arg(
            Arg::new("base-url")
                .short('b')
                .long("base-url")
                .value_name("URL")
                .help("Base URL of the scene extraction service")
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Directory downloads are saved into")
        )
        .arg(
            Arg::new("lang")
                .short('l')
                .long("lang")
                .value_name("CODE")
                .help("UI language")
                .value_parser(["en", "vi", "ar", "ar-ma"])
        )
        .arg(
            Arg::new("all")
                .long("all")
                .help("Download every scene without prompting")
                .action(clap::ArgAction::SetTrue)
                .conflicts_with("skip")
        )
        .arg(
            Arg::new("skip")
                .long("skip")
                .value_name("ROWS")
                .help("Comma separated rows to leave out, then download the rest without prompting")
        )
        .arg(
            Arg::new("save-thumbnails")
                .long("save-thumbnails")
                .help("Also write every analyzed scene as scene_N.jpg into the output directory")
                .action(clap::ArgAction::SetTrue)
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue)
        )
        .get_matches();

    // Initialize logging
    let filter = if matches.get_flag("verbose") {
        "scene_picker=debug,info"
    } else {
        "scene_picker=info,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => Config::load_from(&PathBuf::from(path))?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }),
    };

    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.backend.base_url = base_url.clone();
    }
    if let Some(dir) = matches.get_one::<String>("output-dir") {
        config.output.dir = PathBuf::from(dir);
    }
    if let Some(code) = matches.get_one::<String>("lang") {
        config.ui.language = code.parse::<Language>()?;
    }
    if matches.get_flag("save-thumbnails") {
        config.output.save_thumbnails = true;
    }
    config.validate()?;
    tracing::debug!("{}", config.summary());

    let backend = HttpBackend::new(&config.backend.base_url, config.timeout())?;
    info!("🔗 Scene service: {}", backend.base_url());

    let controller = SceneController::new(backend);
    let mut repl = Repl::new(controller, Translator::new(config.ui.language), config.output.dir.clone())
        .with_thumbnails(config.output.save_thumbnails);

    let url = matches.get_one::<String>("url");
    let export_all = matches.get_flag("all");
    let skip = match matches.get_one::<String>("skip") {
        Some(raw) => Some(parse_rows(raw).map_err(|e| anyhow::anyhow!(e))?),
        None => None,
    };

    if export_all || skip.is_some() {
        let url = url.ok_or_else(|| anyhow::anyhow!("--all and --skip need a URL"))?;

        let mut commands = vec![ReplCommand::Analyze(url.clone())];
        match skip {
            Some(rows) if !rows.is_empty() => {
                commands.push(ReplCommand::Deselect(rows));
                commands.push(ReplCommand::Export);
            }
            Some(_) => commands.push(ReplCommand::Export),
            None => commands.push(ReplCommand::ExportAll),
        }

        for command in commands {
            match repl.execute(command).await {
                Ok(text) => println!("{}", text.trim_end()),
                Err(e) => {
                    error!("{}", e);
                    eprintln!("⚠️  {}", repl.notification(&e));
                    return Err(e.into());
                }
            }
        }
        return Ok(());
    }

    if let Some(url) = url {
        match repl.execute(ReplCommand::Analyze(url.clone())).await {
            Ok(text) => println!("{}", text.trim_end()),
            Err(e) => eprintln!("⚠️  {}", repl.notification(&e)),
        }
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    repl.run(stdin, &mut stdout).await?;

    Ok(())
}
