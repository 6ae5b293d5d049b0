use clap::{Parser, Subcommand};
use std::path::PathBuf;

use facdash::achievements::validate_schema;
use facdash::fetch::fetch_dashboard;
use facdash::ranking;
use facdash::stats::FacultyFilter;
use facdash::store::{AnyStore, FacultyStore, LocalStore, RestStore};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the achievement leaderboard (default if no subcommand)
    List {
        /// Only faculty in this department
        #[arg(short, long)]
        department: Option<String>,
        /// Case-insensitive match against name or id
        #[arg(short, long)]
        search: Option<String>,
        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Show one faculty member with per-field counts and rank
    Show {
        /// Faculty id (defaults to the logged-in faculty)
        id: Option<String>,
    },
    /// Show the current top performer
    Top,
    /// Log in as a faculty member (name + id checked against the store)
    Login {
        /// Faculty name (prompted if omitted)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show who is currently logged in
    Whoami,
    /// Update one achievement counter (own record, or --id as admin)
    Set {
        /// Achievement field key, e.g. journalpublications
        field: String,
        /// New count
        value: u64,
        /// Edit this record instead of the logged-in one
        #[arg(long)]
        id: Option<String>,
    },
    /// Add a new faculty record
    Add {
        /// Unique faculty id
        id: String,
        /// Display name
        name: String,
        #[arg(long, default_value = "")]
        designation: String,
        #[arg(long, default_value = "")]
        department: String,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "facdash")]
#[command(about = "Faculty achievement ranking CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/facdash/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn build_store(config: &facdash::config::Config) -> anyhow::Result<AnyStore> {
    if let Some(data_file) = &config.store.data_file {
        return Ok(AnyStore::Local(LocalStore::new(data_file)));
    }

    let Some(url) = &config.store.url else {
        anyhow::bail!("Config must set either store.url or store.data_file.");
    };

    let Some(api_key) = facdash::config::effective_api_key(config) else {
        anyhow::bail!(
            "No API key. Set store.api_key in the config or the {} environment variable.",
            facdash::config::ENV_API_KEY_VAR
        );
    };

    Ok(AnyStore::Rest(RestStore::new(url, &api_key)?))
}

/// Load the live session or exit with a login hint.
fn require_session(config: &facdash::config::Config) -> facdash::session::Session {
    let ttl = match facdash::config::session_ttl(config) {
        Ok(ttl) => ttl,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    match facdash::session::load_session(ttl) {
        Ok(Some(session)) => session,
        Ok(None) => {
            eprintln!("Not logged in (or session expired). Run `facdash login` first.");
            std::process::exit(EXIT_AUTH);
        }
        Err(e) => {
            eprintln!("Session error: {}", e);
            std::process::exit(EXIT_AUTH);
        }
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::List {
        department: None,
        search: None,
        tsv: false,
    });

    // Init runs before config loading; everything else needs a config
    if matches!(command, Commands::Init) {
        let config_path = cli.config.clone().map(PathBuf::from);
        if let Err(e) = facdash::config::run_init_wizard(config_path) {
            eprintln!("Init failed: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config_path = cli.config.map(PathBuf::from);
    let config = match facdash::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate the achievement schema at startup
    let schema = facdash::config::effective_schema(&config);
    if let Err(errors) = validate_schema(&schema) {
        eprintln!("Achievement schema errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        let fields: Vec<_> = schema.keys().collect();
        eprintln!("Ranking on {} fields: {}", fields.len(), fields.join(", "));
    }

    let store = match build_store(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let use_colors = facdash::output::should_use_colors();

    match command {
        Commands::List {
            department,
            search,
            tsv,
        } => {
            let filter = FacultyFilter { search, department };
            let data = match fetch_dashboard(&store, &filter, cli.verbose).await {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Fetch failed: {}", e);
                    std::process::exit(EXIT_NETWORK);
                }
            };

            if cli.verbose {
                let departments = facdash::stats::departments(&data.faculty);
                eprintln!("Departments: {}", departments.join(", "));
            }

            let entries = ranking::rank(&data.faculty, &schema);

            if tsv {
                println!("{}", facdash::output::format_tsv(&entries));
            } else {
                println!("{}", facdash::output::format_leaderboard(&entries, use_colors));
                if let (Some(target), Some(leader)) = (&data.target, entries.first()) {
                    println!(
                        "{}",
                        facdash::output::format_target_comparison(
                            target,
                            &schema,
                            leader.total_achievements,
                            use_colors
                        )
                    );
                }
                if filter.is_empty() {
                    println!("{}", facdash::output::format_stats(&data.stats, use_colors));
                }
            }
        }
        Commands::Show { id } => {
            let id = id.unwrap_or_else(|| require_session(&config).faculty_id);

            let data = match fetch_dashboard(&store, &FacultyFilter::default(), cli.verbose).await {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Fetch failed: {}", e);
                    std::process::exit(EXIT_NETWORK);
                }
            };

            let record = data
                .faculty
                .iter()
                .find(|r| r.id == id)
                .or(data.target.as_ref().filter(|t| t.id == id));
            let Some(record) = record else {
                eprintln!("No faculty record with id '{}'", id);
                std::process::exit(EXIT_CONFIG);
            };

            let total = ranking::compute_total(record, &schema);
            let rank = ranking::lookup_rank(&data.faculty, &schema, &id);
            println!(
                "{}",
                facdash::output::format_detail(record, &schema, total, rank, use_colors)
            );
        }
        Commands::Top => {
            let data = match fetch_dashboard(&store, &FacultyFilter::default(), cli.verbose).await {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Fetch failed: {}", e);
                    std::process::exit(EXIT_NETWORK);
                }
            };

            let entries = ranking::rank(&data.faculty, &schema);
            let Some(top) = entries.first() else {
                println!("No faculty records found.");
                std::process::exit(EXIT_SUCCESS);
            };

            println!(
                "Top performer: {} ({}) - {} achievements",
                top.record.name, top.record.id, top.total_achievements
            );
            println!(
                "{}",
                facdash::output::format_detail(
                    top.record,
                    &schema,
                    top.total_achievements,
                    Some(top.rank),
                    use_colors
                )
            );
        }
        Commands::Login { name } => {
            let name = match name.map(Ok).unwrap_or_else(facdash::auth::prompt_for_name) {
                Ok(n) => n,
                Err(e) => {
                    eprintln!("Login failed: {}", e);
                    std::process::exit(EXIT_AUTH);
                }
            };
            let id = match facdash::auth::prompt_for_id() {
                Ok(i) => i,
                Err(e) => {
                    eprintln!("Login failed: {}", e);
                    std::process::exit(EXIT_AUTH);
                }
            };

            let session = match facdash::auth::login(&store, &name, &id).await {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Login failed: {}", e);
                    std::process::exit(EXIT_AUTH);
                }
            };

            if let Err(e) = facdash::session::save_session(&session) {
                eprintln!("Failed to save session: {}", e);
                std::process::exit(EXIT_AUTH);
            }

            println!("Logged in as {} ({})", session.name, session.faculty_id);
        }
        Commands::Logout => {
            if facdash::session::clear_session() {
                println!("Logged out.");
            } else {
                println!("No active session.");
            }
        }
        Commands::Whoami => {
            let ttl = match facdash::config::session_ttl(&config) {
                Ok(ttl) => ttl,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            match facdash::session::load_session(ttl) {
                Ok(Some(session)) => {
                    println!(
                        "{} ({}) - session {}",
                        session.name,
                        session.faculty_id,
                        session.format_remaining(ttl)
                    );
                }
                Ok(None) => println!("Not logged in."),
                Err(e) => {
                    eprintln!("Session error: {}", e);
                    std::process::exit(EXIT_AUTH);
                }
            }
        }
        Commands::Set { field, value, id } => {
            let (id, session) = match id {
                Some(id) => (id, None),
                None => {
                    let session = require_session(&config);
                    (session.faculty_id.clone(), Some(session))
                }
            };

            let record = match store.get_by_id(&id).await {
                Ok(Some(r)) => r,
                Ok(None) => {
                    eprintln!("No faculty record with id '{}'", id);
                    std::process::exit(EXIT_CONFIG);
                }
                Err(e) => {
                    eprintln!("Fetch failed: {}", e);
                    std::process::exit(EXIT_NETWORK);
                }
            };

            let mut record = record;
            if !record.set_achievement(&field, value) {
                eprintln!(
                    "Unknown achievement field '{}'. Known fields: {}",
                    field,
                    facdash::achievements::CANONICAL_KEYS.join(", ")
                );
                std::process::exit(EXIT_CONFIG);
            }

            if let Err(e) = store.upsert(&record).await {
                eprintln!("Update failed: {}", e);
                std::process::exit(EXIT_NETWORK);
            }

            // Activity refreshes the rolling session window
            if let Some(mut session) = session {
                session.touch();
                if let Err(e) = facdash::session::save_session(&session) {
                    eprintln!("Warning: failed to refresh session: {}", e);
                }
            }

            println!("Set {} = {} for {}", field, value, record.id);
        }
        Commands::Add {
            id,
            name,
            designation,
            department,
        } => {
            if id == facdash::faculty::TARGET_ID {
                eprintln!("'{}' is reserved for the benchmark row.", id);
                std::process::exit(EXIT_CONFIG);
            }

            match store.get_by_id(&id).await {
                Ok(Some(_)) => {
                    eprintln!("A faculty record with id '{}' already exists.", id);
                    std::process::exit(EXIT_CONFIG);
                }
                Ok(None) => {}
                Err(e) => {
                    eprintln!("Fetch failed: {}", e);
                    std::process::exit(EXIT_NETWORK);
                }
            }

            let record = facdash::faculty::FacultyRecord::new(&id, &name, &designation, &department);
            if let Err(e) = store.upsert(&record).await {
                eprintln!("Add failed: {}", e);
                std::process::exit(EXIT_NETWORK);
            }

            println!("Added {} ({})", record.name, record.id);
        }
        Commands::Init => unreachable!("handled above"),
    }

    std::process::exit(EXIT_SUCCESS);
}
