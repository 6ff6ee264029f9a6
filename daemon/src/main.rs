//! VOX daemon — CLI front end for the poll node.
//!
//! A thin collaborator: parses arguments, calls the node facade, prints
//! results. No domain logic lives here.

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use vox_node::{NodeConfig, VoxNode};
use vox_poll::{PresentationKind, TieBreakKind};
use vox_types::{PollId, PollKind, Timestamp, TokenId, Username};
use vox_utils::format_duration;

#[derive(Parser)]
#[command(name = "vox-daemon", about = "VOX poll platform daemon")]
struct Cli {
    /// Data directory for the JSON snapshot stores.
    #[arg(long, env = "VOX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VOX_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "VOX_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Manage polls.
    Poll {
        #[command(subcommand)]
        action: PollAction,
    },
    /// Manage participation tokens.
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Manage users.
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(clap::Subcommand)]
enum PollAction {
    /// Create a new timed poll.
    Create {
        #[arg(long)]
        question: String,
        /// Option label; pass at least twice.
        #[arg(long = "option", required = true)]
        options: Vec<String>,
        /// Poll duration in seconds.
        #[arg(long, default_value_t = 60)]
        duration: u64,
        /// "simple" (one vote per voter) or "multiple".
        #[arg(long, default_value = "simple")]
        kind: PollKind,
    },
    /// List polls.
    List {
        /// Only show polls still accepting votes.
        #[arg(long)]
        active: bool,
    },
    /// Close a poll.
    Close { poll_id: PollId },
    /// Cast a vote.
    Vote {
        poll_id: PollId,
        #[arg(long)]
        user: String,
        #[arg(long)]
        option: String,
    },
    /// Show poll results.
    Results {
        poll_id: PollId,
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        /// Apply a tie-break policy to the leading options.
        #[arg(long, value_enum)]
        tie_break: Option<TieBreakArg>,
        /// Seed for the random tie-break (defaults to OS entropy).
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(clap::Subcommand)]
enum TokenAction {
    /// List the tokens a user holds.
    List {
        #[arg(long)]
        owner: String,
    },
    /// Transfer a token between users.
    Transfer {
        token_id: TokenId,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
}

#[derive(clap::Subcommand)]
enum UserAction {
    /// Register a new user.
    Register { name: String },
    /// Open a session and print its token.
    Login { name: String },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Text,
    Ascii,
    Json,
}

impl From<FormatArg> for PresentationKind {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => PresentationKind::Text,
            FormatArg::Ascii => PresentationKind::AsciiBars,
            FormatArg::Json => PresentationKind::Json,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum TieBreakArg {
    Alphabetical,
    Random,
    Extension,
}

impl From<TieBreakArg> for TieBreakKind {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Alphabetical => TieBreakKind::Alphabetical,
            TieBreakArg::Random => TieBreakKind::Random,
            TieBreakArg::Extension => TieBreakKind::Extension,
        }
    }
}

fn main() -> Result<()> {
    vox_utils::init_tracing();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => {
            let cfg = NodeConfig::from_toml_file(path)?;
            tracing::info!("loaded config from {}", path.display());
            cfg
        }
        None => NodeConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    config.log_level = cli.log_level;

    let node = VoxNode::open(config)?;

    match cli.command {
        Command::Poll { action } => run_poll(&node, action)?,
        Command::Token { action } => run_token(&node, action)?,
        Command::User { action } => run_user(&node, action)?,
    }

    Ok(())
}

fn run_poll(node: &VoxNode, action: PollAction) -> Result<()> {
    match action {
        PollAction::Create {
            question,
            options,
            duration,
            kind,
        } => {
            let poll = node.create_poll(&question, &options, duration, kind)?;
            println!("created poll {}", poll.id);
            println!("  question: {}", poll.question);
            println!("  options:  {}", poll.options.join(", "));
            println!("  expires:  {}", poll.expires_at);
        }
        PollAction::List { active } => {
            let polls = node.list_polls(active)?;
            if polls.is_empty() {
                println!("no polls");
                return Ok(());
            }
            let now = Timestamp::now();
            for poll in polls {
                let status = if poll.active {
                    let remaining = poll.expires_at.seconds_until(now).max(0) as u64;
                    format!("active, {} left", format_duration(remaining))
                } else {
                    "closed".to_string()
                };
                println!("{}  [{}]  {}  ({})", poll.id, poll.kind, poll.question, status);
            }
        }
        PollAction::Close { poll_id } => {
            if node.close_poll(&poll_id)? {
                println!("closed poll {poll_id}");
            } else {
                println!("poll {poll_id} was already closed");
            }
        }
        PollAction::Vote {
            poll_id,
            user,
            option,
        } => {
            let vote = node.vote(&poll_id, &Username::new(user), &option)?;
            println!("vote accepted, token {}", vote.token_id);
        }
        PollAction::Results {
            poll_id,
            format,
            tie_break,
            seed,
        } => {
            let poll = node.get_poll(&poll_id)?;
            println!("{}", poll.question);
            let rendered = match tie_break {
                Some(policy) => {
                    let mut rng = match seed {
                        Some(seed) => StdRng::seed_from_u64(seed),
                        None => StdRng::from_os_rng(),
                    };
                    node.get_presented_results(&poll_id, policy.into(), format.into(), &mut rng)?
                }
                None => node.get_presented_tally(&poll_id, format.into())?,
            };
            println!("{rendered}");
        }
    }
    Ok(())
}

fn run_token(node: &VoxNode, action: TokenAction) -> Result<()> {
    match action {
        TokenAction::List { owner } => {
            let tokens = node.list_tokens_by_owner(&Username::new(owner))?;
            if tokens.is_empty() {
                println!("no tokens");
                return Ok(());
            }
            for token in tokens {
                println!(
                    "{}  poll {}  option {:?}  issued {}",
                    token.token_id, token.poll_id, token.option, token.issued_at
                );
            }
        }
        TokenAction::Transfer { token_id, from, to } => {
            node.transfer_token(token_id, &Username::new(from), &Username::new(to.as_str()))?;
            println!("transferred {token_id} to {to}");
        }
    }
    Ok(())
}

fn run_user(node: &VoxNode, action: UserAction) -> Result<()> {
    match action {
        UserAction::Register { name } => {
            let user = node.directory().register(&Username::new(name))?;
            println!("registered {} ({})", user.name, user.id);
        }
        UserAction::Login { name } => {
            let token = node.directory().login(&Username::new(name))?;
            println!("session {token}");
        }
    }
    Ok(())
}
