use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use monoklout::{ClientConfig, InfluenceGraph, KloutClient, KloutIdentity, Score, Topic};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;

#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    /// Path to the authentication details file
    #[clap(short, long, default_value = "./auth.json")]
    auth: PathBuf,
    /// Klout API key (overrides the one in the auth file)
    #[clap(short, long)]
    key: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a Twitter username to a Klout identity
    Identity { username: String },
    /// Show the Klout score of a Twitter user
    Score { username: String },
    /// List the topics a Twitter user is influential about
    Topics { username: String },
    /// Show who influences, and is influenced by, a Twitter user
    Influence { username: String },
    /// Fetch identity, score, topics and influence in one go
    Report {
        username: String,
        /// Write the report to this file instead of stdout
        #[clap(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct Report {
    identity: KloutIdentity,
    score: Score,
    topics: Vec<Topic>,
    influence: InfluenceGraph,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = main2().await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn main2() -> anyhow::Result<()> {
    let args: Args = Args::parse();
    let config = load_config(&args).await?;
    let mut client = KloutClient::from_config(&config).context("Unable to create Klout client")?;

    let username = match &args.command {
        Command::Identity { username }
        | Command::Score { username }
        | Command::Topics { username }
        | Command::Influence { username }
        | Command::Report { username, .. } => username.clone(),
    };
    client.set_twitter_username(username.as_str());
    let identity = client
        .get_klout_identity()
        .await
        .with_context(|| format!("Unable to find Klout identity for {}", username))?;
    log::info!("{} has Klout id {}", username, identity.id);

    match args.command {
        Command::Identity { .. } => print_json(&identity),
        Command::Score { .. } => {
            print_json(&client.get_score().await.context("Unable to get score")?)
        }
        Command::Topics { .. } => print_json(
            &client
                .get_user_topics()
                .await
                .context("Unable to get topics")?,
        ),
        Command::Influence { .. } => print_json(
            &client
                .get_influence()
                .await
                .context("Unable to get influence")?,
        ),
        Command::Report { out, .. } => {
            let (score, topics, influence) = futures::try_join!(
                client.get_score(),
                client.get_user_topics(),
                client.get_influence()
            )
            .context("Unable to build report")?;
            let report = Report {
                identity,
                score,
                topics,
                influence,
            };
            match out {
                Some(path) => {
                    save_json(&report, &path)?;
                    log::info!("Saved report for {} to {}", username, path.display());
                    Ok(())
                }
                None => print_json(&report),
            }
        }
    }
}

async fn load_config(args: &Args) -> anyhow::Result<ClientConfig> {
    let mut config = if args.auth.exists() {
        let auth = fs::read_to_string(&args.auth)
            .await
            .context("Unable to read auth file")?;
        ClientConfig::from_json(&auth).context("Unable to deserialize auth file")?
    } else if let Some(key) = &args.key {
        ClientConfig::new(key.clone())
    } else {
        bail!(
            "No API key provided, pass --key or create {}",
            args.auth.display()
        )
    };
    if let Some(key) = &args.key {
        config.api_key = key.clone();
    }
    if config.api_key.is_empty() {
        bail!("API key must not be empty");
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{}", text);
    Ok(())
}

fn save_json<T: Serialize>(value: &T, destination: &Path) -> anyhow::Result<()> {
    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(parent).context("Unable to create temporary file")?;
    serde_json::to_writer_pretty(&mut temp, value)?;
    temp.flush()?;
    temp.persist(destination)
        .with_context(|| format!("Unable to write {}", destination.display()))?;
    Ok(())
}
