#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dutyroster::{
    io,
    model::{Duty, DutyId},
    notification::{Notifier, StderrNotifier},
    scheduler::{classify, AssignError, AssignOptions, DutyStore},
};
use std::io::BufRead;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI d'affectation de services à un conducteur (sans persistance)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Univers des services (JSON ou CSV)
    #[arg(long, global = true, default_value = "duties.json")]
    duties: String,

    /// Repos minimal entre deux services, en heures
    #[arg(long, global = true, default_value_t = 8)]
    min_rest_hours: u32,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lister les deux pools
    List,

    /// Appliquer des assignations puis des désassignations
    Plan {
        /// liste "1,2,..." assignée dans l'ordre
        #[arg(long, value_delimiter = ',')]
        assign: Vec<u32>,
        /// liste "1,2,..." désassignée dans l'ordre, après les assignations
        #[arg(long, value_delimiter = ',')]
        unassign: Vec<u32>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Classer un service contre un ensemble de services
    Check {
        #[arg(long)]
        candidate: u32,
        #[arg(long, value_delimiter = ',')]
        against: Vec<u32>,
    },

    /// Session interactive : `assign <id>`, `unassign <id>`, `list`, `quit`
    Session,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let opts = AssignOptions {
        min_rest_hours: cli.min_rest_hours,
    };
    let universe = io::load_duties(&cli.duties)?;
    let mut store = DutyStore::with_notifier(universe, StderrNotifier)
        .with_context(|| format!("loading {}", cli.duties))?
        .with_options(opts);

    let code = match cli.cmd {
        Commands::List => {
            print_pools(&store);
            0
        }
        Commands::Plan {
            assign,
            unassign,
            out_json,
            out_csv,
        } => {
            let mut rejected = 0usize;
            for id in assign {
                match store.assign(DutyId::new(id)) {
                    Ok(()) => {}
                    // déjà notifié sur stderr
                    Err(AssignError::Conflict { .. }) => rejected += 1,
                    Err(err) => return Err(err.into()),
                }
            }
            for id in unassign {
                store.unassign(DutyId::new(id));
            }
            if let Some(path) = out_json {
                io::export_session_json(path, &store)?;
            }
            if let Some(path) = out_csv {
                io::export_duties_csv(path, store.assigned())?;
            }
            print_pools(&store);
            if rejected > 0 {
                eprintln!("{rejected} assignment(s) rejected");
                // Code 2 = WARNING/INCOMPLETE
                2
            } else {
                0
            }
        }
        Commands::Check { candidate, against } => {
            let candidate = find_duty(&store, candidate)?;
            let existing = against
                .into_iter()
                .map(|id| find_duty(&store, id).cloned())
                .collect::<Result<Vec<Duty>>>()?;
            match classify(candidate, &existing, opts) {
                None => {
                    println!("OK: no conflict");
                    0
                }
                Some(kind) => {
                    println!("{}: {}", kind, kind.message(opts));
                    2
                }
            }
        }
        Commands::Session => {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = line?;
                if !run_session_line(&mut store, line.trim()) {
                    break;
                }
            }
            0
        }
    };

    std::process::exit(code);
}

fn find_duty<N: Notifier>(store: &DutyStore<N>, id: u32) -> Result<&Duty> {
    store
        .get(DutyId::new(id))
        .ok_or_else(|| anyhow::anyhow!("unknown duty: {}", id))
}

/// Retourne `false` quand la session doit s'arrêter.
fn run_session_line<N: Notifier>(store: &mut DutyStore<N>, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let (cmd, arg) = (parts.next(), parts.next());
    let id = arg.map(|raw| raw.parse::<u32>().map(DutyId::new).map_err(|_| raw));
    match (cmd, id) {
        (None, _) => {}
        (Some("quit" | "exit"), _) => return false,
        (Some("list"), _) => print_pools(store),
        (Some("assign" | "unassign"), None) => eprintln!("missing duty id"),
        (Some("assign" | "unassign"), Some(Err(raw))) => eprintln!("invalid duty id: {raw}"),
        (Some("assign"), Some(Ok(id))) => match store.assign(id) {
            Ok(()) => println!("assigned {id}"),
            // déjà notifié sur stderr
            Err(AssignError::Conflict { .. }) => {}
            Err(err) => eprintln!("{err}"),
        },
        (Some("unassign"), Some(Ok(id))) => {
            if store.unassign(id) {
                println!("unassigned {id}");
            } else {
                eprintln!("duty not assigned: {id}");
            }
        }
        (Some(cmd), _) => eprintln!("unknown command: {cmd}"),
    }
    true
}

fn print_pools<N: Notifier>(store: &DutyStore<N>) {
    println!("Available duties:");
    print_duties(store.available());
    println!("Assigned duties:");
    print_duties(store.assigned());
}

fn print_duties(duties: &[Duty]) {
    if duties.is_empty() {
        println!("  -");
    }
    for d in duties {
        println!(
            "  {} | {} | {} | {} → {}",
            d.id(),
            d.name(),
            d.depot(),
            d.start().to_rfc3339(),
            d.end().to_rfc3339()
        );
    }
}
