use std::path::PathBuf;

use chalkportal::modules::{ClassService, StudentService};
use chalkportal::state::PortalState;
use chalkportal_auth::{Role, Session, SessionContext};
use chalkportal_cache::{ResourceBackend, ResourceKey};
use chalkportal_cli::args::{fetch_params, parse_filter, parse_payload};
use chalkportal_cli::seeder::{self, SeedConfig};
use chalkportal_config::{ApiConfig, LoginRoutes, StorageConfig};
use chalkportal_models::Record;
use chalkportal_observability::init_tracing;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dialoguer::Password;
use dotenvy::dotenv;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "chalkportal-cli")]
#[command(about = "Chalkportal CLI - Read and write portal resources", long_about = None)]
struct Cli {
    /// Bearer token (prompted securely if not provided)
    #[arg(long, env = "PORTAL_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Role to assume when the token does not carry one
    #[arg(long, global = true)]
    role: Option<Role>,

    /// Read and write JSON files in this directory instead of the REST API
    #[arg(long, global = true)]
    local: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a whole collection
    Fetch {
        /// Resource key, e.g. `classes` or `attendance`
        resource: String,

        /// Parent identifier scoping the collection
        #[arg(short = 'p', long)]
        parent: Option<String>,

        /// Start of the date range (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End of the date range (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Extra filters as key=value
        #[arg(short = 'f', long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Create an entity from a JSON object
    Create {
        resource: String,

        #[arg(short = 'd', long)]
        data: String,
    },
    /// Update an entity from a JSON object
    Update {
        resource: String,
        id: String,

        #[arg(short = 'd', long)]
        data: String,
    },
    /// Delete an entity
    Delete { resource: String, id: String },
    /// Run a named action on a collection
    Action {
        resource: String,
        action: String,

        #[arg(short = 'd', long, default_value = "{}")]
        data: String,
    },
    /// List classes
    Classes,
    /// List the students enrolled in a class
    Students { class_id: String },
    /// Seed fake classes and students
    Seed {
        /// Number of classes to create
        #[arg(short = 'c', long, default_value = "3")]
        classes: usize,

        /// Number of students per class
        #[arg(short = 's', long, default_value = "20")]
        students: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.local.clone() {
        Some(dir) => {
            let session = build_session(cli.token.clone(), cli.role);
            let storage = StorageConfig::from_env();
            let storage = StorageConfig {
                base_dir: dir,
                ..storage
            };
            run(PortalState::local(storage, session), cli.command).await
        }
        None => {
            let token = cli.token.clone().or_else(prompt_token);
            let session = build_session(token, cli.role);
            match PortalState::http(ApiConfig::from_env(), LoginRoutes::from_env(), session) {
                Ok(state) => run(state, cli.command).await,
                Err(e) => Err(e.into()),
            }
        }
    };

    if let Err(e) = result {
        eprintln!("\n❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn prompt_token() -> Option<String> {
    let token: String = Password::new()
        .with_prompt("Access token (leave empty to continue signed out)")
        .allow_empty_password(true)
        .interact()
        .ok()?;
    let token = token.trim().to_string();
    (!token.is_empty()).then_some(token)
}

fn build_session(token: Option<String>, role: Option<Role>) -> SessionContext {
    let Some(token) = token else {
        return SessionContext::new();
    };

    let session = Session::from_token(token.clone()).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Token claims unreadable, using it as an opaque token");
        Session::new(token, None)
    });
    let session = match role {
        Some(role) => session.with_role(role),
        None => session,
    };
    SessionContext::with_session(session)
}

async fn run<B: ResourceBackend>(state: PortalState<B>, command: Commands) -> anyhow::Result<()> {
    state.store.on_auth_expired(|route: &str| {
        eprintln!("\n🔒 Session expired. Sign in again at {route}");
    });

    match command {
        Commands::Fetch {
            resource,
            parent,
            from,
            to,
            filters,
        } => {
            let key = ResourceKey::parse(&resource)?;
            let params = fetch_params(parent, from, to, filters);
            let records: Vec<Record> = state.store.fetch_all(&key, &params).await?;
            print_json(&records)?;
            eprintln!("✅ {} {} fetched", records.len(), key);
        }
        Commands::Create { resource, data } => {
            let key = ResourceKey::parse(&resource)?;
            let payload = parse_payload(&data)?;
            let created: Record = state.store.create(&key, &payload).await?;
            print_json(&created)?;
            eprintln!("✅ Created in {key}");
        }
        Commands::Update { resource, id, data } => {
            let key = ResourceKey::parse(&resource)?;
            let payload = parse_payload(&data)?;
            let updated: Record = state.store.update(&key, &id, &payload).await?;
            print_json(&updated)?;
            eprintln!("✅ Updated {key}/{id}");
        }
        Commands::Delete { resource, id } => {
            let key = ResourceKey::parse(&resource)?;
            state.store.delete::<Record>(&key, &id).await?;
            eprintln!("✅ Deleted {key}/{id}");
        }
        Commands::Action {
            resource,
            action,
            data,
        } => {
            let key = ResourceKey::parse(&resource)?;
            let payload = parse_payload(&data)?;
            let response: Value = state.store.perform(&key, &action, &payload).await?;
            print_json(&response)?;
            eprintln!("✅ {key}/{action} done");
        }
        Commands::Classes => {
            let classes = ClassService::fetch_classes(&state.store).await?;
            for class in &classes {
                println!(
                    "{}\t{}",
                    class.id.as_deref().unwrap_or("-"),
                    class.class_name
                );
            }
            eprintln!("✅ {} classes", classes.len());
        }
        Commands::Students { class_id } => {
            let students = StudentService::fetch_students(&state.store, &class_id).await?;
            for student in &students {
                println!("{}\t{}", student.roll_no, student.name);
            }
            eprintln!("✅ {} students in {class_id}", students.len());
        }
        Commands::Seed { classes, students } => {
            let config = SeedConfig::new(classes).with_students(students);
            seeder::seed_classrooms(&state.store, config).await?;
            println!("\n🎉 Seeding completed successfully!");
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch_command() {
        let cli = Cli::try_parse_from([
            "chalkportal-cli",
            "fetch",
            "attendance",
            "--parent",
            "c1",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
            "-f",
            "status=present",
        ])
        .unwrap();

        match cli.command {
            Commands::Fetch {
                resource,
                parent,
                from,
                to,
                filters,
            } => {
                assert_eq!(resource, "attendance");
                assert_eq!(parent.as_deref(), Some("c1"));
                assert_eq!(from, NaiveDate::from_ymd_opt(2024, 1, 1));
                assert_eq!(to, NaiveDate::from_ymd_opt(2024, 1, 31));
                assert_eq!(filters, vec![("status".to_string(), "present".to_string())]);
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "chalkportal-cli",
            "classes",
            "--local",
            "/tmp/portal",
            "--role",
            "teacher",
        ])
        .unwrap();
        assert_eq!(cli.local, Some(PathBuf::from("/tmp/portal")));
        assert_eq!(cli.role, Some(Role::Teacher));
    }

    #[test]
    fn test_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "chalkportal-cli",
            "fetch",
            "attendance",
            "--from",
            "01/02/2024",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_session_with_opaque_token() {
        let session = build_session(Some("opaque".into()), Some(Role::Student));
        assert_eq!(session.token().as_deref(), Some("opaque"));
        assert_eq!(session.role(), Some(Role::Student));

        assert!(!build_session(None, None).is_authenticated());
    }
}
