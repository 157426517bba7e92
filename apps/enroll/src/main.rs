use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use enrollment_core::{
    load_settings, DispatchPolicy, EnrollmentController, EnrollmentDraft, InterestCapture, Screen,
    SheetClient, TemplatePlanSource,
};
use shared::domain::{CohortOption, ExperienceLevel, PaymentMethod, View};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "enroll", about = "Course landing page, enrollment and waitlist in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the course outline.
    Preview,
    /// Enroll in a cohort and print the personalised syllabus.
    Enroll {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// beginner, intermediate, advanced or expert
        #[arg(long, default_value = "beginner")]
        experience: ExperienceLevel,
        /// weekend or weekday (or the full cohort label)
        #[arg(long, default_value = "weekend")]
        cohort: CohortOption,
        /// upi, card or net-banking
        #[arg(long, default_value = "upi")]
        payment: PaymentMethod,
        /// Print the plan as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Join the waitlist without enrolling.
    Interest {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = load_settings().context("failed to load settings")?;
    if settings.is_demo_mode() {
        info!("no sheet script url configured; submissions are simulated");
    }
    let saver = Arc::new(SheetClient::from_settings(&settings));

    match cli.command {
        Command::Preview => render_landing(),
        Command::Enroll {
            name,
            email,
            phone,
            experience,
            cohort,
            payment,
            json,
        } => {
            // Detached tasks die with the runtime once the command returns.
            let dispatch = match settings.enrollment_dispatch {
                DispatchPolicy::Detached if !settings.is_demo_mode() => {
                    warn!("awaiting enrollment save so it completes before exit");
                    DispatchPolicy::Awaited
                }
                policy => policy,
            };
            let mut controller = EnrollmentController::new(
                Arc::new(TemplatePlanSource::from_settings(&settings)),
                saver,
            )
            .with_dispatch_policy(dispatch);

            let profile = EnrollmentDraft {
                name,
                email,
                phone,
                experience,
                cohort,
                payment_method: payment,
            }
            .into_profile()?;

            controller.start()?;
            let view = controller.submit(profile).await?;
            render_screen(controller.screen(), json)?;
            ensure_enrolled(view)?;
        }
        Command::Interest { name, email } => {
            let mut capture = InterestCapture::from_settings(saver, &settings);
            capture.open();
            capture.set_name(name)?;
            capture.set_email(email)?;
            capture.submit().await?;
            println!("You're on the list!");
            println!("We'll notify you when spots open up.");
            capture.finish_display().await?;
        }
    }

    Ok(())
}

/// Turns the Error view into a non-zero exit once its screen has been shown.
fn ensure_enrolled(view: View) -> Result<()> {
    if view == View::Error {
        bail!("enrollment finished without a syllabus");
    }
    Ok(())
}

fn render_landing() {
    println!("2025 AI Bootcamp: four weeks from foundations to shipped apps");
    println!();
    for week in syllabus::course_preview() {
        println!("Week {}: {}", week.week, week.title);
        println!("    {}", week.description);
    }
    println!();
    for cohort in CohortOption::ALL {
        println!("  * {} cohort: {}", cohort.key(), cohort.schedule_summary());
    }
}

fn render_screen(screen: Screen<'_>, json: bool) -> Result<()> {
    match screen {
        Screen::Landing => render_landing(),
        Screen::Enrolling => println!("Enrollment form open."),
        Screen::Generating => {
            println!("Finalizing Enrollment...");
            println!("Preparing your 2025 Standard Syllabus.");
        }
        Screen::Success { plan, profile } => {
            if json {
                println!("{}", serde_json::to_string_pretty(plan)?);
                return Ok(());
            }
            println!("{}", plan.welcome_message);
            println!("Confirmation will be sent to {} / {}", profile.email, profile.phone);
            println!("Payment: {}", profile.payment_method);
            for week in &plan.weeks {
                println!();
                println!("Week {}: {}", week.week_number, week.title);
                println!("    {}", week.description);
                for topic in &week.topics {
                    println!("    - {topic}");
                }
            }
        }
        Screen::Error => {
            println!("Something went wrong");
            println!("We couldn't generate your syllabus at this moment. Please try again.");
        }
    }
    Ok(())
}
