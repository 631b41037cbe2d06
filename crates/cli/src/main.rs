use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use healthchat_core::{
    config::resolve_data_dir,
    constants::{DISEASES_FILENAME, INTENTS_FILENAME},
    CatalogResult, ChatService, CoreConfig, ReplyFormat, ResponseStrategy, Session,
};

#[derive(Parser)]
#[command(name = "healthchat")]
#[command(about = "HealthChat disease information assistant")]
struct Cli {
    #[command(flatten)]
    catalogs: CatalogArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct CatalogArgs {
    /// Directory holding contagious_diseases_dataset.json and intents.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Disease catalog (JSON or YAML)
    #[arg(long, global = true)]
    diseases: Option<PathBuf>,
    /// Intent catalog (JSON or YAML)
    #[arg(long, global = true)]
    intents: Option<PathBuf>,
    /// Alias file (JSON or YAML); defaults to the built-in aliases
    #[arg(long, global = true)]
    aliases: Option<PathBuf>,
    /// Reply format: plain, markdown or html
    #[arg(long, global = true)]
    format: Option<ReplyFormat>,
    /// Canned response selection: first or random
    #[arg(long, global = true)]
    strategy: Option<ResponseStrategy>,
    /// Also match diseases by listed symptoms
    #[arg(long, global = true)]
    symptom_matching: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat (the default)
    Chat {
        /// Write the transcript to this file when the chat ends
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Answer a single message
    Ask {
        /// Message text
        message: String,
    },
    /// Show the intent tag for a message
    Classify {
        /// Message text
        message: String,
    },
    /// Show the disease a message resolves to
    Resolve {
        /// Message text
        message: String,
    },
    /// List intent tags
    Intents,
    /// List diseases
    Diseases,
}

fn build_config(args: &CatalogArgs) -> CatalogResult<CoreConfig> {
    let (diseases, intents) = match (&args.diseases, &args.intents) {
        (Some(diseases), Some(intents)) => (diseases.clone(), intents.clone()),
        (diseases, intents) => {
            let data_dir = resolve_data_dir(args.data_dir.clone())?;
            (
                diseases
                    .clone()
                    .unwrap_or_else(|| data_dir.join(DISEASES_FILENAME)),
                intents
                    .clone()
                    .unwrap_or_else(|| data_dir.join(INTENTS_FILENAME)),
            )
        }
    };

    CoreConfig::new(
        diseases,
        intents,
        args.aliases.clone(),
        args.format.unwrap_or_default(),
        args.strategy.unwrap_or_default(),
        args.symptom_matching,
    )
}

fn run_chat(service: ChatService, export: Option<PathBuf>) -> io::Result<()> {
    let mut session = Session::new(service);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("HealthChat (type 'quit' to exit)");

    let mut lines = stdin.lock().lines();
    while !session.is_ended() {
        print!("\nYou: ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        if let Some(reply) = session.submit(&line?) {
            println!("Bot: {}", reply.text);
        }
    }

    if let Some(path) = export {
        if session.export_transcript(&path) {
            println!("Exported chat to {}", path.display());
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("healthchat_core=warn".parse()?)
                .add_directive("healthchat=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cfg = build_config(&cli.catalogs)?;
    let service = ChatService::from_config(&cfg)?;
    tracing::debug!(
        diseases = service.knowledge().diseases().len(),
        intents = service.knowledge().intents().rules().len(),
        format = ?cfg.reply_format(),
        strategy = ?cfg.response_strategy(),
        symptom_matching = cfg.symptom_matching(),
        "catalogs loaded"
    );

    match cli.command {
        None => run_chat(service, None)?,
        Some(Commands::Chat { export }) => run_chat(service, export)?,
        Some(Commands::Ask { message }) => {
            println!("{}", service.reply_to_message(&message));
        }
        Some(Commands::Classify { message }) => {
            println!("{}", service.classify(&message));
        }
        Some(Commands::Resolve { message }) => {
            match service.resolver().resolve_with_tier(&message) {
                Some((record, tier)) => println!("{} (matched by {})", record.name, tier),
                None => println!("No disease found."),
            }
        }
        Some(Commands::Intents) => {
            for rule in service.knowledge().intents().rules() {
                println!(
                    "{}: {} patterns, {} responses",
                    rule.tag,
                    rule.patterns.len(),
                    rule.responses.len()
                );
            }
        }
        Some(Commands::Diseases) => {
            let diseases = service.knowledge().diseases();
            if diseases.is_empty() {
                println!("No diseases found.");
            }
            for record in diseases.records() {
                println!("{}: {}", record.name, record.symptoms.join(", "));
            }
        }
    }

    Ok(())
}
