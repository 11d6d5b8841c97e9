//! ScholarLink sign-in CLI.
//!
//! Connects to a ScholarLink backend, restores or establishes a session,
//! and prints the signed-in profile. Tokens persist in a shared file, so
//! separate invocations (and other local clients) see the same session.

use anyhow::{Context, Result, bail};
use pico_args::Arguments;
use scholar_link::auth::{LoginRequest, RegisterRequest, Role};
use scholar_link::session::SessionManager;
use scholar_link::store::FileTokenStore;
use sl_client::api_client::ApiClient;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

const HELP: &str = "\
Sign in to a ScholarLink server

USAGE:
  sl_client [OPTIONS]

OPTIONS:
  --server URL          Server URL  [default: http://localhost:8000]
  --email EMAIL         Email for login
  --password PASS       Password for login
  --token-file PATH     Token file  [default: ~/.scholar_link/tokens.json]
  --register            Create an account instead of signing in
  --logout              Sign out and clear the stored tokens

FLAGS:
  -h, --help            Print help information
";

struct Args {
    server_url: String,
    email: Option<String>,
    password: Option<String>,
    token_file: PathBuf,
    register: bool,
    logout: bool,
}

fn default_token_file() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".scholar_link").join("tokens.json"),
        None => std::env::temp_dir().join("scholar_link_tokens.json"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        server_url: pargs
            .value_from_str("--server")
            .unwrap_or_else(|_| "http://localhost:8000".to_string()),
        email: pargs.opt_value_from_str("--email").ok().flatten(),
        password: pargs.opt_value_from_str("--password").ok().flatten(),
        token_file: pargs
            .opt_value_from_str("--token-file")
            .ok()
            .flatten()
            .unwrap_or_else(default_token_file),
        register: pargs.contains("--register"),
        logout: pargs.contains("--logout"),
    };

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let service = Arc::new(ApiClient::new(args.server_url.clone()));
    let store = Arc::new(FileTokenStore::new(args.token_file.clone()));
    let session = SessionManager::new(service, store);

    session.initialize().await;

    if args.logout {
        session.logout().await;
        log::info!("cleared stored tokens at {}", args.token_file.display());
        println!("Signed out.");
        return Ok(());
    }

    if session.snapshot().is_authenticated() {
        log::info!("restored session from {}", args.token_file.display());
        print_profile(&session);
        return Ok(());
    }
    if let Some(error) = session.snapshot().error {
        log::warn!("session restore failed: {error}");
        println!("Stored session could not be restored: {error}");
    }

    let email = match args.email {
        Some(email) => email,
        None => prompt("Email")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => prompt("Password")?,
    };

    if args.register {
        let first_name = prompt("First name")?;
        let last_name = prompt("Last name")?;
        let role = prompt_role()?;
        println!("Creating account for {email}...");
        session
            .register(RegisterRequest {
                email,
                password,
                first_name,
                last_name,
                role,
            })
            .await
            .map_err(|err| anyhow::anyhow!(err.client_message()))
            .context("Registration failed")?;
        println!("Account created!");
    } else {
        println!("Signing in as {email}...");
        session
            .login(LoginRequest { email, password })
            .await
            .map_err(|err| anyhow::anyhow!(err.client_message()))
            .context("Sign-in failed")?;
        println!("Signed in!");
    }

    print_profile(&session);
    Ok(())
}

fn print_profile(session: &SessionManager) {
    let snapshot = session.snapshot();
    let Some(user) = snapshot.user else {
        println!("Not signed in.");
        return;
    };
    println!("\n{} <{}>", user.full_name(), user.email);
    println!("  Role:    {}", user.role);
    println!("  Landing: {}", user.role.landing_path());
    if !user.is_active {
        println!("  Note: this account is deactivated");
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_role() -> Result<Role> {
    let answer = prompt("Role (student/writer)")?;
    match answer.to_lowercase().as_str() {
        "" | "student" => Ok(Role::Student),
        "writer" => Ok(Role::Writer),
        other => bail!("Unknown role '{other}' (admin accounts are provisioned server-side)"),
    }
}
