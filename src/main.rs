// src/main.rs
use std::env;

use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use loanlink::applications::ApplicationFilter;
use loanlink::common::{AppConfig, AppContext, AppStreams, NotifyLevel, Preferences, ThemeMode};
use loanlink::guards::ROUTES;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================
//
// Headless shell around the client core. Commands:
//
//   loanlink routes                  evaluate every route for the session
//   loanlink login <email> <pass>    sign in, resolve the role, re-evaluate
//   loanlink whoami                  current session + role
//   loanlink loans [page]            paginated loan catalog
//   loanlink my-loans                the signed-in user's applications
//   loanlink theme [light|dark]     show or persist the theme preference
//
// A stored refresh token (LOANLINK_REFRESH_TOKEN) restores the previous
// session before the command runs.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // CONFIGURATION AND CONTEXT
    // ========================================================================

    let config = AppConfig::from_env();
    let prefs_path = config.prefs_path.clone();
    let preferences = Preferences::load(&prefs_path).await;
    info!(theme = ?preferences.theme, "Preferences loaded");

    let (context, streams) = AppContext::bootstrap(config);
    let AppStreams {
        mut notifications,
        mut navigations,
    } = streams;

    // Toast surface of this shell: notifications land in the log.
    tokio::spawn(async move {
        while let Some(notification) = notifications.recv().await {
            match notification.level {
                NotifyLevel::Error => error!("{}", notification.message),
                NotifyLevel::Warning => warn!("{}", notification.message),
                _ => info!("{}", notification.message),
            }
        }
    });
    tokio::spawn(async move {
        while let Some(path) = navigations.recv().await {
            info!(path = %path, "Redirect requested");
        }
    });

    context
        .session
        .bootstrap(env::var("LOANLINK_REFRESH_TOKEN").ok())
        .await;

    // ========================================================================
    // COMMAND DISPATCH
    // ========================================================================

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("routes") => {
            print_route_decisions(&context).await;
        }
        Some("login") if args.len() >= 3 => {
            match context
                .session
                .login_with_credentials(&args[1], &args[2])
                .await
            {
                Ok(identity) => {
                    info!(email = %identity.email, "Login successful");
                    print_route_decisions(&context).await;
                }
                Err(e) => error!(error = %e, "Login failed"),
            }
        }
        Some("whoami") => {
            let session = context.session.current();
            match session.identity {
                Some(identity) => {
                    let name = identity.display_name.unwrap_or_else(|| "-".into());
                    match context.roles.require().await {
                        Ok(role) => println!("{} ({}) role={}", identity.email, name, role),
                        Err(e) => println!("{} ({}) role unavailable: {}", identity.email, name, e),
                    }
                }
                None => println!("signed out"),
            }
        }
        Some("loans") => {
            let page = args
                .get(1)
                .and_then(|p| p.parse::<u32>().ok())
                .unwrap_or(1);
            match context.loans.list(page, 9).await {
                Ok(listing) => {
                    println!("page {page} of {}", listing.total_pages);
                    for loan in listing.loans {
                        println!(
                            "  {}  {}  {:.1}% up to {:.0}",
                            loan.id, loan.loan_title, loan.interest_rate, loan.max_loan_limit
                        );
                    }
                }
                Err(e) => error!(error = %e, "Loan listing failed"),
            }
        }
        Some("my-loans") => match context.session.current().email() {
            Some(email) => {
                let filter = ApplicationFilter::for_email(email);
                match context.applications.list(&filter).await {
                    Ok(applications) => {
                        for app in applications {
                            println!(
                                "  {}  {}  {}  {:.0}",
                                app.id,
                                app.loan_title.as_deref().unwrap_or("General Loan"),
                                app.status,
                                app.loan_amount
                            );
                        }
                    }
                    Err(e) => error!(error = %e, "Application listing failed"),
                }
            }
            None => println!("signed out"),
        },
        Some("theme") => match args.get(1).map(String::as_str) {
            Some("light") | Some("dark") => {
                let theme = if args[1] == "dark" {
                    ThemeMode::Dark
                } else {
                    ThemeMode::Light
                };
                let updated = Preferences { theme };
                updated.save(&prefs_path).await?;
                info!(theme = ?theme, "Theme preference saved");
            }
            _ => println!("theme: {:?}", preferences.theme),
        },
        Some(other) => {
            warn!(command = %other, "Unknown command");
            println!("usage: loanlink [routes|login <email> <pass>|whoami|loans [page]|my-loans|theme [light|dark]]");
        }
    }

    Ok(())
}

async fn print_route_decisions(context: &AppContext) {
    for entry in ROUTES {
        let decision = context.navigate(entry.pattern).await;
        println!("  {:<35} {:?}", entry.pattern, decision);
    }
}
