use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use rxpad_client::{ApiClient, ClientConfig, RoleFilter, UserQuery};
use rxpad_core::export::{DocumentSink, ExportJob, HtmlDirectorySink, OutputTarget};
use rxpad_core::models::{ClinicianProfile, PageRequest, PrescriptionDraft, UserStatus};
use rxpad_core::notice::{Notice, NoticeLevel};
use rxpad_core::render::{html, render_value, text, Document, RenderDefaults};
use rxpad_core::{PdfOptions, PrescriptionDesk, PrescriptionStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rxpad")]
#[command(about = "Draft, render and manage prescriptions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a prescription JSON file ({patientData, medicines, note})
    Render {
        file: PathBuf,
        /// Clinician profile JSON used for the header
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Write an HTML page here instead of printing text
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Write the print-ready page for the system print dialog
    Print {
        file: PathBuf,
        #[arg(long)]
        profile: Option<PathBuf>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Write the print-ready page for PDF conversion
    ExportPdf {
        file: PathBuf,
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        #[arg(long, default_value = "prescription.pdf")]
        filename: String,
    },
    /// Sign in and remember the session
    Login {
        email: String,
        #[arg(long, env = "RXPAD_PASSWORD")]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Save a prescription JSON file as a new prescription
    Save { file: PathBuf },
    /// List saved prescriptions
    List {
        #[arg(long, default_value = "")]
        search: String,
        /// Earliest prescription date (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        from: String,
        /// Latest prescription date (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        to: String,
    },
    /// Show a saved prescription as text
    Show { id: String },
    /// Delete a saved prescription
    Delete { id: String },
    /// List user accounts (admin)
    Users {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Activate or deactivate an account (admin)
    SetStatus {
        id: String,
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// A doctor's prescription history (admin)
    DoctorHistory {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Request a password reset email
    ForgotPassword { email: String },
    /// Set a new password from a reset token
    ResetPassword {
        token: String,
        password: String,
        confirm: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Doctor,
    Admin,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Active,
    Inactive,
}

impl From<RoleArg> for RoleFilter {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Doctor => RoleFilter::Doctor,
            RoleArg::Admin => RoleFilter::Admin,
        }
    }
}

impl From<StatusArg> for UserStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => UserStatus::Active,
            StatusArg::Inactive => UserStatus::Inactive,
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("rxpad=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render { file, profile, html: html_out } => {
            let document = render_file(&file, profile.as_deref())?;
            match html_out {
                Some(out) => {
                    std::fs::write(&out, html::to_html(&document))
                        .with_context(|| format!("writing {}", out.display()))?;
                    println!("Wrote {}", out.display());
                }
                None => print!("{}", text::to_text(&document)),
            }
        }
        Commands::Print {
            file,
            profile,
            out_dir,
        } => {
            let document = render_file(&file, profile.as_deref())?;
            let mut sink = HtmlDirectorySink::new(&out_dir);
            sink.submit(&ExportJob::print(document))?;
            for path in sink.written() {
                println!("Wrote {}", path.display());
            }
        }
        Commands::ExportPdf {
            file,
            profile,
            out_dir,
            filename,
        } => {
            let document = render_file(&file, profile.as_deref())?;
            let options = PdfOptions {
                filename,
                ..Default::default()
            };
            let mut sink = HtmlDirectorySink::new(&out_dir);
            sink.submit(&ExportJob::new(document, OutputTarget::Pdf(options)))?;
            for path in sink.written() {
                println!("Wrote {}", path.display());
            }
        }
        Commands::Login { email, password } => {
            let client = connect()?;
            let user = client.login(&email, &password)?;
            println!("Signed in as {} ({})", user.display_name(), user.role.as_str());
        }
        Commands::Logout => {
            connect()?.logout()?;
            println!("Signed out");
        }
        Commands::Whoami => {
            let client = connect()?;
            match client.restore()? {
                Some(user) => println!(
                    "{} <{}> {} {}",
                    user.display_name(),
                    user.email,
                    user.role.as_str(),
                    user.status.as_str()
                ),
                None => println!("Not signed in"),
            }
        }
        Commands::Save { file } => {
            let draft: PrescriptionDraft = read_json(&file)?;
            let mut desk = signed_in_desk()?;
            *desk.draft_mut() = draft;
            let saved = desk.save();
            report(desk.take_notices());
            match saved {
                Some(prescription) => println!("{}", prescription.id),
                None => bail!("prescription was not saved"),
            }
        }
        Commands::List { search, from, to } => {
            let mut desk = signed_in_desk()?;
            let listing = desk.listing_mut();
            listing.set_search(search);
            listing.set_from_date(from);
            listing.set_to_date(to);
            desk.apply_filters();
            report(desk.take_notices());

            let prescriptions = desk.listing().prescriptions();
            if prescriptions.is_empty() {
                println!("No prescriptions found.");
            }
            for p in prescriptions {
                println!(
                    "{}  {}  {:<24}  {} medicine(s)",
                    p.id,
                    rxpad_core::render::format_display_date(&p.patient_data.date),
                    p.patient_data.name,
                    p.medicines.iter().filter(|m| m.is_printable()).count()
                );
            }
        }
        Commands::Show { id } => {
            let client = connect()?;
            let profile = client.session().clinician_profile();
            let prescription = client.get(&id)?;
            let document =
                Document::from_prescription(&prescription, &profile, &RenderDefaults::default());
            print!("{}", text::to_text(&document));
        }
        Commands::Delete { id } => {
            let mut desk = signed_in_desk()?;
            let deleted = desk.delete(&id);
            report(desk.take_notices());
            if !deleted {
                bail!("prescription {id} was not deleted");
            }
        }
        Commands::Users {
            page,
            search,
            role,
            status,
        } => {
            let client = connect()?;
            let result = client.list_users(&UserQuery {
                page: PageRequest::new(page, rxpad_core::models::DEFAULT_PAGE_LIMIT),
                search,
                role: role.map(Into::into),
                status: status.map(Into::into),
            })?;
            for user in &result.items {
                println!(
                    "{}  {:<8}  {:<8}  {:<28}  {}",
                    user.id,
                    user.role.as_str(),
                    user.status.as_str(),
                    user.display_name(),
                    user.mobile.as_deref().unwrap_or("Not provided")
                );
            }
            println!(
                "Page {} of {} ({} users)",
                result.pagination.current_page,
                result.pagination.total_pages,
                result.pagination.total_items
            );
        }
        Commands::SetStatus { id, status } => {
            let user = connect()?.set_user_status(&id, status.into())?;
            println!("{} is now {}", user.display_name(), user.status.as_str());
        }
        Commands::DoctorHistory { id, page } => {
            let client = connect()?;
            let result = client.doctor_prescriptions(
                &id,
                PageRequest::new(page, rxpad_core::models::DEFAULT_PAGE_LIMIT),
            )?;
            for p in &result.items {
                println!(
                    "{}  {}  {}",
                    p.id,
                    rxpad_core::render::format_display_date(&p.patient_data.date),
                    p.patient_data.name
                );
            }
            println!(
                "Page {} of {} ({} prescriptions)",
                result.pagination.current_page,
                result.pagination.total_pages,
                result.pagination.total_items
            );
        }
        Commands::ForgotPassword { email } => {
            connect()?.forgot_password(&email)?;
            println!("Password reset email sent successfully");
        }
        Commands::ResetPassword {
            token,
            password,
            confirm,
        } => {
            connect()?.reset_password(&token, &password, &confirm)?;
            println!("Password reset successfully");
        }
    }

    Ok(())
}

fn connect() -> anyhow::Result<ApiClient> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(base_url = config.api_base_url(), "using backend");
    Ok(ApiClient::new(config)?)
}

fn signed_in_desk() -> anyhow::Result<PrescriptionDesk<ApiClient>> {
    let client = connect()?;
    if !client.session().is_authenticated() {
        bail!("not signed in; run `rxpad login <email>` first");
    }
    let profile = client.session().clinician_profile();
    Ok(PrescriptionDesk::new(client, profile))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn load_profile(path: Option<&Path>) -> anyhow::Result<ClinicianProfile> {
    match path {
        Some(path) => read_json(path),
        None => Ok(ClinicianProfile::default()),
    }
}

fn render_file(path: &Path, profile: Option<&Path>) -> anyhow::Result<Document> {
    let value: serde_json::Value = read_json(path)?;
    let profile = load_profile(profile)?;
    Ok(render_value(&value, &profile, &RenderDefaults::default())?)
}

fn report(notices: Vec<Notice>) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
            NoticeLevel::Success | NoticeLevel::Info => println!("{}", notice.message),
        }
    }
}
