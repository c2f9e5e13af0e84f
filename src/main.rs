//! Employee Admin - command-line administration of employee records.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use employee_admin as app;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use app::config::{AppConfig, ConfigLoadResult, LoggingConfig};
use app::db;
use app::messages::{self, MessageCatalog};
use app::models::{DeleteFlag, EmployeeForm, Role};
use app::service::{EmployeeService, SaveOutcome};

/// Command-line administration of employee records.
#[derive(Parser)]
#[command(name = "employee-admin")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
    /// Show database version and employee counts
    Status,
    /// List employees
    List {
        /// Include logically deleted employees
        #[arg(long)]
        all: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one employee
    Show { id: i32 },
    /// Register a new employee
    Add {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
    },
    /// Update an employee; omitted fields keep their stored values
    Update {
        id: i32,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// New password (blank keeps the current one)
        #[arg(long)]
        password: Option<String>,
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
    },
    /// Logically delete an employee
    Delete { id: i32 },
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Admin,
    General,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => Role::Admin,
            RoleArg::General => Role::General,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    if let Command::Init { force } = cli.command {
        return init_config(&config_path, force);
    }

    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => config,
        ConfigLoadResult::Missing => {
            bail!("Config not found at {config_path:?}, run `employee-admin init` first")
        }
        ConfigLoadResult::Invalid(e) => bail!("Config invalid: {e}"),
    };

    let _guard = init_logging(&config.logging);
    tracing::info!("Config loaded from {:?}", config_path);

    if !messages::install(MessageCatalog::from_config(&config.messages)) {
        tracing::warn!("Message catalog already installed");
    }

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(run(cli.command, config))
}

/// Initialize logging to stderr, plus daily files when a directory is configured.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let stderr = fmt::layer().with_writer(std::io::stderr);

    match &config.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "employee-admin.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(filter).with(stderr).init();
            None
        }
    }
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("Config already exists at {path:?} (use --force to overwrite)");
    }

    let mut config = AppConfig::default();
    config.logging.directory = LoggingConfig::default_directory();
    config.save(path)?;

    println!("Wrote default config to {}", path.display());
    Ok(())
}

async fn run(command: Command, config: AppConfig) -> anyhow::Result<()> {
    let conn = db::connect(&config.database.connection_string())
        .await
        .context("Failed to connect to database")?;
    let service = EmployeeService::new(conn);

    match command {
        Command::Init { .. } => bail!("init does not use the database"),
        Command::Status => {
            let conn = service.db();
            db::test_connection(conn).await?;
            let version = db::get_version(conn).await?;
            let counts = db::get_employee_counts(conn).await?;
            println!("PostgreSQL: {version}");
            println!("Employees: {} ({} deleted)", counts.total, counts.deleted);
        }
        Command::List { all, json } => {
            let mut employees = service.list(all).await?;
            employees.iter_mut().for_each(redact);
            if json {
                println!("{}", serde_json::to_string_pretty(&employees)?);
            } else {
                for employee in &employees {
                    println!("{}", format_row(employee));
                }
                println!("{} employee(s)", employees.len());
            }
        }
        Command::Show { id } => match service.find(id).await? {
            Some(mut employee) => {
                redact(&mut employee);
                println!("{}", serde_json::to_string_pretty(&employee)?);
            }
            None => bail!("Employee {id} not found"),
        },
        Command::Add {
            code,
            name,
            password,
            role,
        } => {
            let form = EmployeeForm {
                code: Some(code),
                name: Some(name),
                password: Some(password),
                role: role.map(|r| Role::from(r).as_form()),
                ..Default::default()
            };
            report(service.register(form).await?)?;
        }
        Command::Update {
            id,
            code,
            name,
            password,
            role,
        } => {
            let Some(mut form) = service.find(id).await? else {
                bail!("Employee {id} not found");
            };
            if let Some(code) = code {
                form.code = Some(code);
            }
            if let Some(name) = name {
                form.name = Some(name);
            }
            form.password = password;
            if let Some(role) = role {
                form.role = Some(Role::from(role).as_form());
            }
            report(service.update(id, form).await?)?;
        }
        Command::Delete { id } => {
            if !service.remove(id).await? {
                bail!("Employee {id} not found");
            }
            println!("Employee {id} deleted");
        }
    }

    Ok(())
}

fn report(outcome: SaveOutcome) -> anyhow::Result<()> {
    match outcome {
        SaveOutcome::Saved(employee) => {
            println!("Saved: {}", format_row(&employee));
            Ok(())
        }
        SaveOutcome::Rejected(messages) => {
            for message in &messages {
                eprintln!("- {message}");
            }
            bail!("Employee not saved ({} problem(s))", messages.len())
        }
    }
}

/// Drop the password before printing.
fn redact(employee: &mut EmployeeForm) {
    employee.password = None;
}

fn format_row(employee: &EmployeeForm) -> String {
    let role = match employee.role.map(Role::from_form) {
        Some(Role::Admin) => "admin",
        Some(Role::General) => "general",
        None => "-",
    };
    let deleted = employee.delete_flag.map(DeleteFlag::from_form).is_some_and(DeleteFlag::is_deleted);

    format!(
        "{:>5}  {:<10}  {:<30}  {:<8}{}",
        employee.id.map(|id| id.to_string()).unwrap_or_default(),
        employee.code.as_deref().unwrap_or(""),
        employee.name.as_deref().unwrap_or(""),
        role,
        if deleted { "  (deleted)" } else { "" }
    )
}
