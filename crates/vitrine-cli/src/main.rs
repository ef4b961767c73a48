//! # Vitrine CLI
//!
//! Terminal front-end over the admin panel and the public site:
//! - session management (`login`, `logout`, `whoami`)
//! - content sections (`dashboard`, `list`, `show`, `delete`, `mark-read`)
//! - public pages and the contact form (`site`, `contact`)

mod terminal;

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use vitrine_admin::{AdminContext, AdminShell, Confirm, SessionState};
use vitrine_client::{ApiClient, FileTokenStore, PublicClient};
use vitrine_common::config::AppConfig;
use vitrine_common::models::{ContactSubmission, ProjectStatus, ResourceKind};
use vitrine_common::MediaResolver;
use vitrine_site::{ContactFormController, Site};

use terminal::{AssumeYes, PromptConfirm, TerminalNotifier};

const NOT_SIGNED_IN: &str = "Not signed in. Run `vitrine login` first.";

const PASSWORD_PROMPT: &str =
    "Password (input is visible; set VITRINE_PASSWORD to skip this prompt): ";

#[derive(Parser)]
#[command(name = "vitrine", version)]
#[command(about = "Manage Vitrine site content from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        username: String,

        /// Read from VITRINE_PASSWORD, or prompted for (visibly) when not given
        #[arg(long, env = "VITRINE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Show the headline content counts
    Dashboard,

    /// List one content section
    List {
        #[arg(value_parser = parse_kind)]
        resource: ResourceKind,
    },

    /// Print one record as JSON
    Show {
        #[arg(value_parser = parse_kind)]
        resource: ResourceKind,
        id: i64,
    },

    /// Delete one record
    Delete {
        #[arg(value_parser = parse_kind)]
        resource: ResourceKind,
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Mark a contact submission as read
    MarkRead { id: i64 },

    /// Render a public page as JSON
    Site {
        #[arg(value_enum)]
        page: Page,

        /// Portfolio status filter (completed, in_progress, future)
        #[arg(long, value_parser = parse_status)]
        status: Option<ProjectStatus>,
    },

    /// Send the public contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Page {
    Home,
    Services,
    Portfolio,
    Blog,
    About,
    Faqs,
    Contact,
    Licenses,
}

fn parse_kind(raw: &str) -> Result<ResourceKind, String> {
    raw.parse::<ResourceKind>().map_err(|e| {
        let known: Vec<&str> = ResourceKind::ALL.iter().map(|k| k.slug()).collect();
        format!("{e} (expected one of: {})", known.join(", "))
    })
}

fn parse_status(raw: &str) -> Result<ProjectStatus, String> {
    raw.parse::<ProjectStatus>().map_err(|e| e.to_string())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = vitrine_common::config::init().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine=info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(base_url = %config.api.base_url(), "vitrine v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Site { page, status } => {
            let site = Site::new(PublicClient::from_config(&config.api)?);
            render_page(&site, page, status).await
        }
        Command::Contact { name, email, subject, message } => {
            let form = ContactFormController::new(PublicClient::from_config(&config.api)?);
            form.edit(|f| {
                f.name = name;
                f.email = email;
                f.subject = subject;
                f.message = message;
            });
            let outcome = form.submit().await;
            if !outcome.is_sent() {
                bail!(outcome.message());
            }
            println!("{}", outcome.message());
            Ok(())
        }
        command => run_admin(command, config).await,
    }
}

async fn run_admin(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let confirm: Arc<dyn Confirm> = match &command {
        Command::Delete { yes: true, .. } => Arc::new(AssumeYes),
        _ => Arc::new(PromptConfirm),
    };
    let tokens = Arc::new(FileTokenStore::new(config.storage.token_path.clone()));
    let api = ApiClient::from_config(&config.api, tokens)?;
    let ctx = AdminContext::new(
        api,
        MediaResolver::new(config.api.upload_base()),
        Arc::new(TerminalNotifier),
        confirm,
    );
    let shell = AdminShell::new(ctx);
    shell.register_all();

    match command {
        Command::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => terminal::ask(PASSWORD_PROMPT)?,
            };
            shell.login(&username, &password).await?;
            let name = shell.session().user().map(|u| u.username).unwrap_or(username);
            println!("Signed in as {name}");
            if let Some(counts) = shell.dashboard() {
                print_dashboard(counts);
            }
        }
        Command::Logout => {
            shell.logout()?;
            println!("Signed out");
        }
        Command::Whoami => match shell.session().start().await {
            SessionState::Authenticated(user) => {
                let email = user.email.as_deref().unwrap_or("no email");
                println!("{} <{email}>", user.username);
            }
            _ => bail!(NOT_SIGNED_IN),
        },
        Command::Dashboard => {
            if !matches!(shell.start().await, SessionState::Authenticated(_)) {
                bail!(NOT_SIGNED_IN);
            }
            match shell.dashboard() {
                Some(counts) => print_dashboard(counts),
                None => bail!("Dashboard counts are unavailable right now"),
            }
        }
        Command::List { resource } => {
            require_session(&shell).await?;
            shell.navigate(resource).await?;
            let section = shell
                .section(resource)
                .context("section is not registered")?;
            let cards = section.cards();
            if cards.is_empty() {
                println!("No {} yet.", resource.title().to_lowercase());
            }
            for card in cards {
                println!("{card}");
            }
        }
        Command::Show { resource, id } => {
            require_session(&shell).await?;
            let record = shell.context().api.get_kind(resource, id).await?;
            print_json(&record)?;
        }
        Command::Delete { resource, id, .. } => {
            require_session(&shell).await?;
            let section = shell
                .section(resource)
                .context("section is not registered")?;
            if !section.delete(id).await? {
                println!("Cancelled");
            }
        }
        Command::MarkRead { id } => {
            require_session(&shell).await?;
            let inbox = shell.controller::<ContactSubmission>();
            inbox.list().await?;
            if !inbox.mark_read(id).await? {
                println!("Submission #{id} is already read");
            }
        }
        // Public commands never reach the admin session.
        Command::Site { .. } | Command::Contact { .. } => {}
    }

    Ok(())
}

/// Section commands only need a live session; the dashboard counts are skipped.
async fn require_session(shell: &AdminShell) -> anyhow::Result<()> {
    match shell.resume().await {
        SessionState::Authenticated(_) => Ok(()),
        _ => bail!(NOT_SIGNED_IN),
    }
}

fn print_dashboard(counts: vitrine_admin::DashboardCounts) {
    println!("Active carousel slides: {}", counts.active_carousel);
    println!("Active services:        {}", counts.active_services);
    println!("Active projects:        {}", counts.active_portfolio);
    println!("Unread messages:        {}", counts.unread_submissions);
}

async fn render_page(site: &Site, page: Page, status: Option<ProjectStatus>) -> anyhow::Result<()> {
    match page {
        Page::Home => print_json(&site.home().await),
        Page::Services => print_json(&site.services().await),
        Page::Portfolio => print_json(&site.portfolio(status).await),
        Page::Blog => print_json(&site.blog().await),
        Page::About => print_json(&site.about().await),
        Page::Faqs => print_json(&site.faqs().await),
        Page::Contact => print_json(&site.contact().await),
        Page::Licenses => print_json(&site.licenses().await),
    }
}
