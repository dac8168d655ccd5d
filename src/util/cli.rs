use crate::auth::redirect::{parse_redirect, RedirectError};
use crate::core::models::{AuthRequest, Field};
use crate::core::types::{GrantType, ResponseType, State};
use crate::form::{AuthForm, Notice};
use crate::output::{Browser, Clipboard, SystemBrowser, SystemClipboard};
use crate::util::config::Config;
use crate::{auth, auth::SessionFactory, auth::DEFAULT_API_BASE, ui};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(
    name = "fyers-auth",
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION")
)]
pub struct Options {
    #[clap(long, env = "FYERS_API_URL", default_value = DEFAULT_API_BASE)]
    api_url: String,
    #[clap(flatten)]
    credentials: Credentials,
    #[clap(subcommand)]
    command: Option<SubCommand>,
}

/// Values used to pre-fill the form.
#[derive(Args, Debug, Default)]
struct Credentials {
    #[clap(long, env = "FYERS_CLIENT_ID")]
    client_id: Option<String>,
    #[clap(long, env = "FYERS_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,
    #[clap(long, env = "FYERS_REDIRECT_URI")]
    redirect_uri: Option<String>,
    #[clap(long = "fyers-id", env = "FYERS_ID")]
    account_id: Option<String>,
    #[clap(long, env = "FYERS_PIN", hide_env_values = true)]
    pin: Option<String>,
    #[clap(long, env = "FYERS_TOTP_KEY", hide_env_values = true)]
    totp_key: Option<String>,
}

impl Credentials {
    fn values(&self) -> [(Field, &Option<String>); 6] {
        [
            (Field::ClientId, &self.client_id),
            (Field::SecretKey, &self.secret_key),
            (Field::RedirectUri, &self.redirect_uri),
            (Field::AccountId, &self.account_id),
            (Field::Pin, &self.pin),
            (Field::TotpKey, &self.totp_key),
        ]
    }

    fn fill<F, B, C>(&self, form: &mut AuthForm<F, B, C>)
    where
        F: SessionFactory,
        B: Browser,
        C: Clipboard,
    {
        for (field, value) in self.values() {
            if let Some(value) = value {
                form.set(field, value.as_str());
            }
        }
    }
}

#[derive(Subcommand)]
enum SubCommand {
    /// Fill in the form interactively (the default)
    Interactive,
    /// Generate the authorization URL from flags or environment
    Generate(Generate),
    /// Read the auth code from the URL the broker redirected to
    ExtractCode(ExtractCode),
}

#[derive(Args)]
struct Generate {
    /// Open the URL in the default browser
    #[clap(long)]
    open: bool,
    /// Copy the URL to the clipboard
    #[clap(long)]
    copy: bool,
    #[clap(long)]
    json: bool,
}

#[derive(Args)]
struct ExtractCode {
    url: String,
    #[clap(long)]
    json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Auth(#[from] auth::Error),
    #[error("{0}")]
    Notice(Notice),
    #[error(transparent)]
    Redirect(#[from] RedirectError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Prompt(#[from] inquire::InquireError),
}

impl From<Notice> for CliError {
    fn from(n: Notice) -> Self {
        Self::Notice(n)
    }
}

#[derive(serde::Serialize)]
struct GeneratedUrl<'a> {
    url: &'a str,
    response_type: ResponseType,
    grant_type: GrantType,
    state: &'a State,
}

impl<'a> GeneratedUrl<'a> {
    fn new(url: &'a str, request: &'a AuthRequest) -> Self {
        Self {
            url,
            response_type: request.response_type,
            grant_type: request.grant_type,
            state: &request.state,
        }
    }
}

fn into_result(notice: Option<Notice>) -> Result<(), CliError> {
    match notice {
        Some(n) if n.is_error() => Err(n.into()),
        Some(n) => {
            eprintln!("{}", n);
            Ok(())
        }
        None => Ok(()),
    }
}

fn generate(g: &Generate, opts: &Options, config: &Config) -> Result<(), CliError> {
    let mut form = AuthForm::new(
        config.session_factory()?,
        SystemBrowser,
        SystemClipboard::default(),
    );
    opts.credentials.fill(&mut form);

    into_result(form.generate())?;
    let url = form.url().unwrap_or_default().to_string();

    if g.json {
        let out = GeneratedUrl::new(&url, form.request());
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", url);
    }

    if g.open {
        into_result(form.open_in_browser())?;
    }
    if g.copy {
        into_result(form.copy_url())?;
    }
    Ok(())
}

fn extract_code(e: &ExtractCode) -> Result<(), CliError> {
    let redirect = parse_redirect(&e.url, &State::default())?;
    if e.json {
        println!("{}", serde_json::to_string_pretty(&redirect)?);
    } else {
        println!("{}", redirect.auth_code.as_ref());
    }
    Ok(())
}

fn interactive(opts: &Options, config: &Config) -> Result<(), CliError> {
    let mut form = AuthForm::new(
        config.session_factory()?,
        SystemBrowser,
        SystemClipboard::default(),
    );
    opts.credentials.fill(&mut form);
    ui::run(&mut form)?;
    Ok(())
}

/// Logs go to stderr so that stdout only carries command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run_cli_action(opts: Options) -> Result<(), CliError> {
    let config = Config {
        api_base: opts.api_url.clone(),
    };

    match &opts.command {
        None | Some(SubCommand::Interactive) => interactive(&opts, &config),
        Some(SubCommand::Generate(g)) => generate(g, &opts, &config),
        Some(SubCommand::ExtractCode(e)) => extract_code(e),
    }
}
