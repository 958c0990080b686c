use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cyclesync_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "cyclesync")]
#[command(about = "Personal cycle and family planning tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Track menstrual cycles
    Cycle {
        #[command(subcommand)]
        command: CycleCommands,
    },

    /// Log family planning methods
    Method {
        #[command(subcommand)]
        command: MethodCommands,
    },

    /// Log sexual activity
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },

    /// Track favorite foods
    Food {
        #[command(subcommand)]
        command: FoodCommands,
    },

    /// Browse educational guides
    Guides {
        /// Show the full content of one guide
        #[arg(long)]
        id: Option<String>,
    },

    /// Partner view of the latest shared cycle
    Partner,

    /// Export cycle history to CSV
    Export {
        /// Output file path
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum CycleCommands {
    /// Log a cycle from a start/end date pair
    Log {
        /// Cycle start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Cycle end date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },

    /// List logged cycles
    List {
        /// Show the full history instead of the recent window
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
enum MethodCommands {
    /// Log the start of a contraceptive method
    Log {
        /// Method id (see `method catalog`)
        #[arg(long)]
        method: String,

        /// Start date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,
    },

    /// List logged methods with renewal reminders
    List,

    /// Show the built-in method catalog
    Catalog,
}

#[derive(Subcommand)]
enum ActivityCommands {
    /// Log a sexual activity entry
    Log {
        /// Activity date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Protection used: protected or unprotected
        #[arg(long)]
        protection: String,

        /// Trying to conceive (suppresses risk alerts)
        #[arg(long)]
        trying: bool,
    },

    /// List logged activity
    List,

    /// Delete an entry by id
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum FoodCommands {
    /// Add a favorite food
    Add {
        #[arg(long)]
        name: String,

        /// Category: fruits, vegetables, grains, protein, dairy, snacks,
        /// sweets, beverages
        #[arg(long)]
        category: String,
    },

    /// List favorite foods
    List,

    /// Delete an entry by id
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

fn main() -> Result<()> {
    cyclesync_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let store = JsonFileStore::new(&data_dir);
    let mut state = AppState::hydrate(store);
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Cycle { command } => match command {
            CycleCommands::Log { start, end } => cmd_cycle_log(&mut state, start, end),
            CycleCommands::List { all } => cmd_cycle_list(&state, &config, all),
        },
        Commands::Method { command } => match command {
            MethodCommands::Log { method, start } => {
                cmd_method_log(&mut state, catalog, &method, start.unwrap_or(today), today)
            }
            MethodCommands::List => cmd_method_list(&state, &config, today),
            MethodCommands::Catalog => cmd_method_catalog(catalog),
        },
        Commands::Activity { command } => match command {
            ActivityCommands::Log {
                date,
                protection,
                trying,
            } => cmd_activity_log(&mut state, date.unwrap_or(today), &protection, trying, today),
            ActivityCommands::List => cmd_activity_list(&state, &config),
            ActivityCommands::Delete { id } => cmd_activity_delete(&mut state, id),
        },
        Commands::Food { command } => match command {
            FoodCommands::Add { name, category } => cmd_food_add(&mut state, &name, &category),
            FoodCommands::List => cmd_food_list(&state),
            FoodCommands::Delete { id } => cmd_food_delete(&mut state, id),
        },
        Commands::Guides { id } => cmd_guides(catalog, id.as_deref()),
        Commands::Partner => cmd_partner(&state, &config),
        Commands::Export { out } => cmd_export(&state, &out),
    }
}

fn cmd_cycle_log(
    state: &mut AppState<JsonFileStore>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<()> {
    let record = state.log_cycle(start, end)?;

    println!("✓ Cycle logged! Length: {} days", record.length);
    println!(
        "  Estimated fertile window: days {}",
        record.fertile_window
    );
    println!("  (Safe days outside this window; consult a doctor for accuracy.)");
    Ok(())
}

fn cmd_cycle_list(state: &AppState<JsonFileStore>, config: &Config, all: bool) -> Result<()> {
    println!("Cycles logged: {}", state.cycles.len());

    let shown: &[CycleRecord] = if all {
        &state.cycles
    } else {
        recent(&state.cycles, config.display.history_limit)
    };

    for cycle in shown {
        println!(
            "  [{}] {} to {} ({} days, fertile days {})",
            cycle.id, cycle.start, cycle.end, cycle.length, cycle.fertile_window
        );
    }

    if let Some(stats) = cycle_stats(&state.cycles) {
        println!(
            "  Average length: {:.1} days (shortest {}, longest {})",
            stats.average_length, stats.shortest, stats.longest
        );
    }
    Ok(())
}

fn cmd_method_log(
    state: &mut AppState<JsonFileStore>,
    catalog: &Catalog,
    method_arg: &str,
    start: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    let kind = parse_method(method_arg)?;
    let log = state.log_method(catalog, kind, start, today)?;

    println!("✓ Method logged!");
    println!("  Name: {}", log.name);
    println!("  Start: {}", log.start);
    println!("  Renewal: {}", log.renewal);
    println!(
        "  Effectiveness: {}% (typical), {}% (perfect)",
        log.typical_use_effectiveness, log.perfect_use_effectiveness
    );
    println!("  Effects: {}", log.effects);

    print_method_alerts(&state.fp_logs, today);
    Ok(())
}

fn cmd_method_list(
    state: &AppState<JsonFileStore>,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    println!("Methods logged: {}", state.fp_logs.len());
    for log in recent(&state.fp_logs, config.display.history_limit) {
        println!("  [{}] {}: {} (Renew: {})", log.id, log.name, log.start, log.renewal);
    }

    print_method_alerts(&state.fp_logs, today);
    Ok(())
}

fn cmd_method_catalog(catalog: &Catalog) -> Result<()> {
    println!("Available methods:");
    for profile in &catalog.methods {
        let duration = match profile.unit {
            DurationUnit::Months => format!("every {} month(s)", profile.duration),
            DurationUnit::Years => format!("every {} year(s)", profile.duration),
            DurationUnit::SingleUse => "single use".to_string(),
            DurationUnit::Permanent => "permanent".to_string(),
        };
        println!("  {} - {} ({})", profile.kind.id(), profile.name, duration);
        println!(
            "      {}% typical, {}% perfect use. Source: {}",
            profile.typical_use_effectiveness, profile.perfect_use_effectiveness, profile.source
        );
    }
    Ok(())
}

fn cmd_activity_log(
    state: &mut AppState<JsonFileStore>,
    date: NaiveDate,
    protection_arg: &str,
    trying: bool,
    today: NaiveDate,
) -> Result<()> {
    let protection = parse_protection(protection_arg)?;
    let (entry, assessment) = state.log_activity(date, protection, trying, today)?;

    println!("✓ Activity logged! (id {})", entry.id);
    if let Some(alert) = &assessment.alert {
        println!("⚠ {}", alert.message);
    }
    Ok(())
}

fn cmd_activity_list(state: &AppState<JsonFileStore>, config: &Config) -> Result<()> {
    println!("Activity entries: {}", state.sex_logs.len());
    for log in recent(&state.sex_logs, config.display.history_limit) {
        let protection = match log.protection {
            Protection::Protected => "protected",
            Protection::Unprotected => "unprotected",
        };
        let trying = if log.trying_pregnancy { " (Trying)" } else { "" };
        println!("  [{}] {}: {}{}", log.id, log.date, protection, trying);
    }
    Ok(())
}

fn cmd_activity_delete(state: &mut AppState<JsonFileStore>, id: Uuid) -> Result<()> {
    if state.delete_sex_log(id)? {
        println!("✓ Entry removed");
    } else {
        println!("No entry with id {} found", id);
    }
    Ok(())
}

fn cmd_food_add(state: &mut AppState<JsonFileStore>, name: &str, category_arg: &str) -> Result<()> {
    let category = FoodCategory::parse(category_arg)
        .ok_or_else(|| Error::Other(format!("Unknown food category: {}", category_arg)))?;

    let entry = state.add_food(name, category)?;
    println!("✓ {} added to favorites (id {})", entry.name, entry.id);
    Ok(())
}

fn cmd_food_list(state: &AppState<JsonFileStore>) -> Result<()> {
    println!("Foods logged: {}", state.favorite_foods.len());
    for food in &state.favorite_foods {
        println!("  [{}] {} ({:?})", food.id, food.name, food.category);
    }
    Ok(())
}

fn cmd_food_delete(state: &mut AppState<JsonFileStore>, id: Uuid) -> Result<()> {
    if state.delete_food(id)? {
        println!("✓ Entry removed");
    } else {
        println!("No entry with id {} found", id);
    }
    Ok(())
}

fn cmd_guides(catalog: &Catalog, id: Option<&str>) -> Result<()> {
    match id {
        Some(id) => {
            let guide = catalog
                .guide(id)
                .ok_or_else(|| Error::Other(format!("Unknown guide: {}", id)))?;
            println!("{}", guide.title);
            println!();
            println!("{}", guide.content);
        }
        None => {
            println!("Guides:");
            for guide in &catalog.guides {
                println!("  {} - {}", guide.id, guide.title);
            }
        }
    }
    Ok(())
}

fn cmd_partner(state: &AppState<JsonFileStore>, config: &Config) -> Result<()> {
    println!("Partner Dashboard");
    println!("  Shared cycles: {}", state.cycles.len());

    match state.cycles.last() {
        Some(cycle) => {
            println!("  Latest: {} to {}", cycle.start, cycle.end);
            println!("  Fertile window: days {}", cycle.fertile_window);
        }
        None => println!("  No cycle shared yet"),
    }

    // Simulated local alert; there is no real push channel
    let partner = config.partner.partner_name.as_deref().unwrap_or("Partner");
    let craving = state
        .favorite_foods
        .last()
        .map(|f| f.name.as_str())
        .unwrap_or("chocolate");
    println!("✓ Push sent! {} notified: Craving {}!", partner, craving);
    Ok(())
}

fn cmd_export(state: &AppState<JsonFileStore>, out: &PathBuf) -> Result<()> {
    let count = export_cycles_csv(&state.cycles, out)?;
    println!("✓ Exported {} cycles to {}", count, out.display());
    Ok(())
}

/// Renewal reminders and the standing overuse warning for the current list
fn print_method_alerts(logs: &[ContraceptiveLog], today: NaiveDate) {
    for alert in renewal_reminders(logs, today) {
        println!("⚠ Renewal reminder: {}", alert.message);
    }
    if let Some(warning) = ec_overuse_warning(logs, today) {
        println!("⚠ {}", warning.message);
    }
}

/// Last `limit` entries of a list, oldest first
fn recent<T>(items: &[T], limit: usize) -> &[T] {
    let skip = items.len().saturating_sub(limit);
    &items[skip..]
}

fn parse_method(s: &str) -> Result<MethodKind> {
    let normalized = s.to_lowercase().replace('-', "_");
    MethodKind::all()
        .iter()
        .copied()
        .find(|kind| kind.id() == normalized)
        .ok_or_else(|| {
            Error::Other(format!(
                "Unknown method: {}. See `cyclesync method catalog`.",
                s
            ))
        })
}

fn parse_protection(s: &str) -> Result<Protection> {
    match s.to_lowercase().as_str() {
        "protected" => Ok(Protection::Protected),
        "unprotected" => Ok(Protection::Unprotected),
        other => Err(Error::Other(format!(
            "Unknown protection type: {} (expected protected or unprotected)",
            other
        ))),
    }
}
