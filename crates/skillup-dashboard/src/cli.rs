//! Command line interface for the admin console

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use skillup_client::ApiError;
use skillup_dashboard::pages::settings::SettingsError;
use skillup_dashboard::pages::{CoursesPage, DeleteOutcome, SaveError, SettingsPage, UsersPage};
use skillup_dashboard::{App, AppState, OpenOptions};
use skillup_protocol::{CourseForm, FormErrors, UserForm, validation};
use skillup_types::{CourseAction, LoginRequest, Role};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Command line interface for the `SkillUp` admin console
#[derive(Debug, Parser)]
#[command(
    name = "skillup-admin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Administrative console for the SkillUp learning platform",
    long_about = "Sign in as a platform administrator and manage users, courses, analytics and platform settings of a SkillUp backend."
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Backend base URL, including the `/api` prefix
    #[arg(long, value_name = "URL", env = "SKILLUP_API_URL")]
    pub api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    pub json: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in with an admin account
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "SKILLUP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Check whether the backend is reachable
    Health,

    /// Open a screen, e.g. `/dashboard/users`
    Open {
        /// Screen path
        #[arg(value_name = "PATH", default_value = "/dashboard")]
        path: String,

        /// One-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Search term
        #[arg(short, long)]
        search: Option<String>,

        /// Role filter for the users screen
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Manage user accounts
    Users {
        /// User subcommand
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage courses
    Courses {
        /// Course subcommand
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// List course categories
    Categories,

    /// Manage platform settings
    Settings {
        /// Settings subcommand
        #[command(subcommand)]
        action: SettingsCommands,
    },
}

/// Fields of the user form
#[derive(Debug, Args)]
pub struct UserFields {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Login email
    #[arg(long)]
    pub email: Option<String>,

    /// Password
    #[arg(long)]
    pub password: Option<String>,

    /// Role (ADMIN, INSTRUCTOR, STUDENT)
    #[arg(long)]
    pub role: Option<String>,

    /// Biography
    #[arg(long)]
    pub bio: Option<String>,
}

/// User management commands
#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// Create an account
    Create(UserFields),

    /// Update an account; omitted fields keep their value
    Update {
        /// Account id
        id: String,

        /// New values
        #[command(flatten)]
        fields: UserFields,
    },

    /// Delete an account
    Delete {
        /// Account id
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        confirm: bool,
    },
}

/// Course management commands
#[derive(Debug, Subcommand)]
pub enum CourseCommands {
    /// Create a course
    Create {
        /// Course title
        #[arg(long)]
        title: String,

        /// Description, at least 50 characters
        #[arg(long)]
        description: String,

        /// Category
        #[arg(long)]
        category: String,

        /// Thumbnail image URL
        #[arg(long)]
        thumbnail: Option<String>,
    },

    /// Delete a course
    Delete {
        /// Course id
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        confirm: bool,
    },

    /// Mark a course as featured
    Feature {
        /// Course id
        id: String,
    },

    /// Remove the featured mark
    Unfeature {
        /// Course id
        id: String,
    },

    /// Publish a course
    Activate {
        /// Course id
        id: String,
    },

    /// Unpublish a course
    Deactivate {
        /// Course id
        id: String,
    },
}

/// Settings commands
#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// Print the current settings
    Show,

    /// Change one setting, e.g. `general.siteName "SkillUp"`
    Set {
        /// Setting key as `section.field`
        key: String,

        /// New value
        value: String,
    },

    /// Restore the defaults
    Reset,
}

/// Run `command` against a freshly initialized console
pub async fn run(command: Commands, state: AppState) -> Result<()> {
    let mut app = App::new(state);

    match command {
        Commands::Login { email, password } => login(&app, &email, &password).await,
        Commands::Logout => {
            app.state().auth.logout();
            println!("Signed out");
            Ok(())
        }
        Commands::Health => {
            let client = &app.state().client;
            if client.health().await {
                println!("{}: up", client.base_url());
                Ok(())
            } else {
                bail!("{}: unreachable", client.base_url())
            }
        }
        Commands::Settings { action } => settings(&app, action),
        command => {
            app.initialize().await;
            run_signed_in(&mut app, command).await
        }
    }
}

async fn run_signed_in(app: &mut App, command: Commands) -> Result<()> {
    match command {
        Commands::Whoami => {
            let status = app.state().client.session_status();
            match app.state().auth.user() {
                Some(user) => println!(
                    "{} <{}> {} (token {})",
                    user.name,
                    user.email,
                    user.role,
                    status.masked.unwrap_or_default()
                ),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        Commands::Open {
            path,
            page,
            search,
            role,
        } => {
            let options = OpenOptions {
                page: page.saturating_sub(1),
                search,
                role: parse_role(role.as_deref())?,
            };
            let rendered = app.open(&path, &options).await;
            info!(route = %rendered.route, "screen rendered");
            print!("{}", rendered.text);
            Ok(())
        }
        Commands::Users { action } => users(app, action).await,
        Commands::Courses { action } => courses(app, action).await,
        Commands::Categories => {
            let mut page = CoursesPage::new(1, app.state().config.dashboard.delete_window());
            page.load_categories(&app.state().client).await;
            for category in page.categories {
                println!("{category}");
            }
            Ok(())
        }
        Commands::Login { .. } | Commands::Logout | Commands::Health | Commands::Settings { .. } => {
            Ok(())
        }
    }
}

async fn login(app: &App, email: &str, password: &str) -> Result<()> {
    let credentials = LoginRequest::new(email, password);
    let user = app
        .state()
        .auth
        .login(&credentials)
        .await
        .context("sign-in failed")?;
    println!("Signed in as {} <{}> ({})", user.name, user.email, user.role);
    Ok(())
}

fn require_login(app: &App) -> Result<()> {
    if app.state().auth.user().is_none() {
        bail!("Not signed in. Run `skillup-admin login` first.");
    }
    Ok(())
}

fn parse_role(raw: Option<&str>) -> Result<Option<Role>> {
    Ok(raw
        .map(|r| validation::validate_role(&r.to_ascii_uppercase()))
        .transpose()?)
}

fn apply_fields(form: &mut UserForm, fields: UserFields) -> Result<()> {
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(email) = fields.email {
        form.email = email;
    }
    if fields.password.is_some() {
        form.password = fields.password;
    }
    if let Some(role) = parse_role(fields.role.as_deref())? {
        form.role = role;
    }
    if fields.bio.is_some() {
        form.bio = fields.bio;
    }
    Ok(())
}

fn report_save_error(err: SaveError) -> anyhow::Error {
    match err {
        SaveError::Invalid(errors) => form_error(&errors),
        SaveError::Api(e) => api_error(e),
    }
}

fn form_error(errors: &FormErrors) -> anyhow::Error {
    let lines: Vec<String> = errors.iter().map(|(k, v)| format!("  {k}: {v}")).collect();
    anyhow::anyhow!("invalid input:\n{}", lines.join("\n"))
}

fn api_error(err: ApiError) -> anyhow::Error {
    if err.requires_login() {
        anyhow::Error::new(err).context("session ended, run `skillup-admin login`")
    } else {
        anyhow::Error::new(err)
    }
}

async fn users(app: &App, action: UserCommands) -> Result<()> {
    require_login(app)?;
    let state = app.state();
    let client = &state.client;
    let dashboard = &state.config.dashboard;
    let mut page = UsersPage::new(dashboard.users_page_size, dashboard.delete_window());

    match action {
        UserCommands::Create(fields) => {
            let mut form = UserForm::default();
            apply_fields(&mut form, fields)?;
            let user = page
                .save(client, None, &form)
                .await
                .map_err(report_save_error)?;
            println!("Created user {} ({})", user.id, user.email);
        }
        UserCommands::Update { id, fields } => {
            let existing = client.get_user(&id).await.map_err(api_error)?;
            let mut form = UserForm::edit(&existing);
            apply_fields(&mut form, fields)?;
            let user = page
                .save(client, Some(&id), &form)
                .await
                .map_err(report_save_error)?;
            println!("Updated user {} ({})", user.id, user.email);
        }
        UserCommands::Delete { id, confirm } => {
            let now = Instant::now();
            page.request_delete(client, &id, now).await.map_err(api_error)?;
            if !confirm {
                println!("Deleting user {id} needs confirmation; run again with --confirm");
                return Ok(());
            }
            match page.request_delete(client, &id, now).await.map_err(api_error)? {
                DeleteOutcome::Deleted => println!("Deleted user {id}"),
                DeleteOutcome::Armed => bail!("delete of user {id} was not confirmed"),
            }
        }
    }
    Ok(())
}

async fn courses(app: &App, action: CourseCommands) -> Result<()> {
    require_login(app)?;
    let state = app.state();
    let client = &state.client;
    let dashboard = &state.config.dashboard;
    let mut page = CoursesPage::new(dashboard.courses_page_size, dashboard.delete_window());

    let (id, action) = match action {
        CourseCommands::Create {
            title,
            description,
            category,
            thumbnail,
        } => {
            let form = CourseForm {
                title,
                description,
                category,
                thumbnail_url: thumbnail,
            };
            let course = page.create(client, &form).await.map_err(report_save_error)?;
            println!("Created course {} ({})", course.id, course.title);
            return Ok(());
        }
        CourseCommands::Delete { id, confirm } => {
            let now = Instant::now();
            page.request_delete(client, &id, now).await.map_err(api_error)?;
            if !confirm {
                println!("Deleting course {id} needs confirmation; run again with --confirm");
                return Ok(());
            }
            match page.request_delete(client, &id, now).await.map_err(api_error)? {
                DeleteOutcome::Deleted => println!("Deleted course {id}"),
                DeleteOutcome::Armed => bail!("delete of course {id} was not confirmed"),
            }
            return Ok(());
        }
        CourseCommands::Feature { id } => (id, CourseAction::Feature),
        CourseCommands::Unfeature { id } => (id, CourseAction::Unfeature),
        CourseCommands::Activate { id } => (id, CourseAction::Activate),
        CourseCommands::Deactivate { id } => (id, CourseAction::Deactivate),
    };

    let course = client
        .set_course_flag(&id, action)
        .await
        .map_err(api_error)?;
    println!(
        "Course {} is now {} and {}",
        course.id,
        if course.is_active { "active" } else { "inactive" },
        if course.is_featured { "featured" } else { "not featured" }
    );
    Ok(())
}

fn settings(app: &App, action: SettingsCommands) -> Result<()> {
    let store = &app.state().settings;
    let mut page = SettingsPage::open(store);
    match action {
        SettingsCommands::Show => {}
        SettingsCommands::Set { key, value } => {
            page.set(&key, &value)?;
            match page.save(store) {
                Ok(()) => {}
                Err(SettingsError::Invalid(errors)) => return Err(form_error(&errors)),
                Err(e) => return Err(e.into()),
            }
        }
        SettingsCommands::Reset => page.reset(store)?,
    }
    print!("{page}");
    Ok(())
}
