use clap::Parser;
use loan_tracker::client::{
    render, ClientConfig, Dashboard, LoanApiClient, LoginPage, Page, RegisterPage, SubmitOutcome,
    Transition,
};
use loan_tracker::models::LoanStatus;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "loan-tracker-cli")]
#[command(about = "Terminal client for the loan tracker", long_about = None)]
struct Cli {
    /// Backend base URL (defaults to LOAN_TRACKER_BACKEND_URL)
    #[arg(short, long)]
    backend_url: Option<String>,

    /// Disable colored status badges
    #[arg(long)]
    no_color: bool,
}

fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt_password(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    rpassword::read_password()
}

fn confirm(question: &str) -> bool {
    matches!(
        prompt(&format!("{} [y/N]", question)),
        Ok(Some(answer)) if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    )
}

/// Shows an alert and waits for it to be dismissed.
fn alert(message: &str) -> io::Result<()> {
    println!("\n  ! {}", message);
    prompt("  Press Enter to continue").map(|_| ())
}

fn follow(transition: Transition) -> io::Result<Option<Page>> {
    if let Some(message) = transition.alert {
        alert(&message)?;
    }
    Ok(Some(transition.page))
}

async fn login_page(api: &LoanApiClient) -> io::Result<Option<Page>> {
    println!("\n== Login ==");
    println!("Don't have an account? Enter 'register' as the email. Enter 'quit' to exit.");

    let Some(email) = prompt("Email")? else {
        return Ok(None);
    };
    match email.as_str() {
        "register" => return Ok(Some(Page::Register)),
        "quit" => return Ok(None),
        _ => {}
    }
    let password = prompt_password("Password")?;

    follow(LoginPage { email, password }.submit(api).await)
}

async fn register_page(api: &LoanApiClient) -> io::Result<Option<Page>> {
    println!("\n== Register ==");
    println!("Already have an account? Enter 'login' as the name.");

    let Some(name) = prompt("Name")? else {
        return Ok(None);
    };
    if name == "login" {
        return Ok(Some(Page::Login));
    }
    let email = prompt("Email")?.unwrap_or_default();
    let password = prompt_password("Password")?;
    let confirm_password = prompt_password("Confirm password")?;

    let page = RegisterPage {
        name,
        email,
        password,
        confirm_password,
    };
    follow(page.submit(api).await)
}

fn read_status(current: LoanStatus) -> io::Result<LoanStatus> {
    let options: Vec<&str> = LoanStatus::ALL.iter().map(LoanStatus::as_str).collect();
    let answer = prompt(&format!("Status ({}) [{}]", options.join("/"), current))?
        .unwrap_or_default();
    if answer.is_empty() {
        return Ok(current);
    }
    Ok(LoanStatus::ALL
        .into_iter()
        .find(|s| s.as_str().eq_ignore_ascii_case(&answer))
        .unwrap_or(current))
}

async fn edit_form(dashboard: &mut Dashboard, api: &LoanApiClient) -> io::Result<()> {
    println!("-- {} --", dashboard.form.submit_label());

    let borrower = prompt(&format!("Borrower Name [{}]", dashboard.form.borrower))?
        .unwrap_or_default();
    if !borrower.is_empty() {
        dashboard.form.borrower = borrower;
    }
    let amount = prompt(&format!("Amount [{}]", dashboard.form.amount))?.unwrap_or_default();
    if !amount.is_empty() {
        dashboard.form.amount = amount;
    }
    dashboard.form.status = read_status(dashboard.form.status)?;

    match dashboard.submit(api).await {
        SubmitOutcome::Saved => println!("Saved."),
        SubmitOutcome::Incomplete => alert("Borrower and amount are required")?,
        SubmitOutcome::Failed => println!("Not saved."),
    }
    Ok(())
}

fn pick_row(dashboard: &Dashboard, arg: Option<&str>) -> Option<usize> {
    let index: usize = arg?.parse().ok()?;
    (1..=dashboard.loans().len()).contains(&index).then(|| index - 1)
}

async fn dashboard_page(api: &LoanApiClient, color: bool) -> io::Result<Option<Page>> {
    let mut dashboard = Dashboard::open(api).await;

    loop {
        println!("\n== Loan Dashboard ==");
        print!("{}", render::loan_table(dashboard.loans(), color));
        println!(
            "[a] {}  [e N] edit  [d N] delete  [c] cancel  [r] refresh  [l] logout  [q] quit",
            dashboard.form.submit_label()
        );

        let Some(line) = prompt(">")? else {
            return Ok(None);
        };
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let arg = parts.next();

        match command {
            "a" | "u" => edit_form(&mut dashboard, api).await?,
            "e" => match pick_row(&dashboard, arg) {
                Some(i) => {
                    let loan = dashboard.loans()[i].clone();
                    dashboard.begin_edit(&loan);
                    edit_form(&mut dashboard, api).await?;
                }
                None => println!("No such row."),
            },
            "d" => match pick_row(&dashboard, arg) {
                Some(i) => {
                    let id = dashboard.loans()[i].id.clone();
                    dashboard.delete(api, &id, confirm).await;
                }
                None => println!("No such row."),
            },
            "c" => dashboard.reset_form(),
            "r" => dashboard.refresh(api).await,
            "l" => return Ok(Some(dashboard.logout())),
            "q" => return Ok(None),
            "" => {}
            other => println!("Unknown command: {}", other),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loan_tracker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::resolve(cli.backend_url);
    let api = LoanApiClient::new(config.backend_url);
    tracing::debug!("Using backend {}", api.base_url());

    let mut page = Some(Page::Login);
    while let Some(current) = page {
        page = match current {
            Page::Login => login_page(&api).await?,
            Page::Register => register_page(&api).await?,
            Page::Dashboard => dashboard_page(&api, !cli.no_color).await?,
        };
    }

    Ok(())
}
