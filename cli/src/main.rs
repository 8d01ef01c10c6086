mod transport;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use helenite::config::ConfigError;
use helenite::guard::GuardDecision;
use helenite::loader::{self, LoaderError};
use helenite::mutation::settings::SettingsChange;
use helenite::mutation::{self, MutationError, MutationOutcome, Navigation};
use helenite::navigation::{Navigator, PageData, RouteRender};
use helenite::net::transport::FileUpload;
use helenite::storage::FileStore;
use helenite::validation::{LoginForm, RegisterForm};
use helenite::{ApiClient, ClientConfig, Route, SessionContext};
use serde::Serialize;

use transport::ReqwestTransport;

type Session = SessionContext<FileStore>;
type Api = ApiClient<ReqwestTransport>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Mutation(#[from] MutationError),
    #[error("load failed: {0}")]
    Loader(#[from] LoaderError),
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("navigation was cancelled")]
    Cancelled,
    #[error("not signed in; run `helenite login` first (redirected to {0})")]
    NotSignedIn(Route),
}

#[derive(Parser, Debug)]
#[command(name = "helenite", about = "Helenite social network CLI")]
struct Cli {
    /// Credential file shared across invocations.
    #[arg(long, env = "HELENITE_CREDENTIALS", default_value = ".helenite-credentials.json")]
    credentials: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        username: String,
        #[arg(long, env = "HELENITE_PASSWORD")]
        password: String,
    },
    Logout,
    Register(RegisterArgs),
    /// Show the stored session and cached profile.
    Whoami,
    Feed,
    Discover,
    Profile {
        username: String,
    },
    Friends {
        username: String,
    },
    Search {
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,
    },
    Post(PostCommand),
    Settings(SettingsCommand),
    /// Send a friend request, or accept one the user already sent you.
    FriendRequest {
        username: String,
    },
    /// Render any client route, e.g. `/profile/ada` or `/search?q=ada`.
    Open {
        path: String,
    },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    slug: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// `YYYY-MM-DD`
    #[arg(long)]
    birthday: String,
    /// Country name or ISO code.
    #[arg(long)]
    birth_place: String,
    #[arg(long, env = "HELENITE_PASSWORD")]
    password: String,
    #[arg(long)]
    confirm_password: Option<String>,
    #[arg(long, default_value_t = false)]
    hide_birthday: bool,
    #[arg(long, default_value_t = false)]
    private: bool,
    #[arg(long)]
    pfp: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PostCommand {
    #[command(subcommand)]
    command: PostSubcommand,
}

#[derive(Subcommand, Debug)]
enum PostSubcommand {
    Show {
        post_id: String,
    },
    New {
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Like {
        post_id: String,
    },
    Comment {
        post_id: String,
        text: String,
    },
    Delete {
        post_id: String,
    },
}

#[derive(Args, Debug)]
struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    Show,
    Change(ChangeArgs),
}

#[derive(Args, Debug)]
struct ChangeArgs {
    #[arg(long)]
    private: Option<bool>,
    #[arg(long)]
    show_birthday: Option<bool>,
    #[arg(long, default_value = "")]
    old_password: String,
    #[arg(long, default_value = "")]
    new_password: String,
    #[arg(long, default_value = "")]
    confirm_password: String,
    #[arg(long)]
    pfp: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    tracing::debug!(api = %config.api_url, credentials = %cli.credentials.display(), "starting");
    let api = ApiClient::new(ReqwestTransport::new(reqwest::Client::new()), &config.api_url);
    let mut session = SessionContext::new(FileStore::new(cli.credentials), config);

    match cli.command {
        Command::Login { username, password } => {
            let form = LoginForm { username, password };
            let outcome = mutation::auth::login(&mut session, &api, &form).await?;
            report(&outcome);
            Ok(())
        }
        Command::Logout => {
            report(&mutation::auth::logout(&mut session, &api).await);
            Ok(())
        }
        Command::Register(args) => run_register(&session, &api, args).await,
        Command::Whoami => run_whoami(&session),
        Command::Feed => {
            let token = gate(&mut session, &Route::Feed)?;
            print_json(&loader::feed(&api, token.as_deref()).await?)
        }
        Command::Discover => {
            let token = gate(&mut session, &Route::Discover)?;
            print_json(&loader::discover(&api, token.as_deref()).await?)
        }
        Command::Profile { username } => {
            let token = gate(&mut session, &Route::Profile { username: username.clone() })?;
            print_json(&loader::profile(&api, token.as_deref(), &username).await?)
        }
        Command::Friends { username } => {
            let token = gate(&mut session, &Route::Friends { username: username.clone() })?;
            print_json(&loader::friends(&api, token.as_deref(), &username).await?)
        }
        Command::Search { terms } => {
            let query = terms.join(" ");
            let token = gate(&mut session, &Route::Search { query: query.clone() })?;
            print_json(&loader::search(&api, token.as_deref(), &query).await?)
        }
        Command::Post(post) => {
            gate(&mut session, &Route::Feed)?;
            run_post(&session, &api, post).await
        }
        Command::Settings(settings) => {
            gate(&mut session, &Route::Feed)?;
            run_settings(&mut session, &api, settings).await
        }
        Command::FriendRequest { username } => {
            gate(&mut session, &Route::Profile { username: username.clone() })?;
            let outcome = mutation::friends::friend_request(&session, &api, &username).await?;
            report(&outcome);
            Ok(())
        }
        Command::Open { path } => run_open(&mut session, api, &path).await,
    }
}

/// Run the route guard and hand back the token to send.
fn gate(session: &mut Session, route: &Route) -> Result<Option<String>, CliError> {
    match session.guard(route) {
        GuardDecision::Open => Ok(session.bearer_token()),
        GuardDecision::Redirect(target) => Err(CliError::NotSignedIn(target)),
    }
}

async fn run_register(session: &Session, api: &Api, args: RegisterArgs) -> Result<(), CliError> {
    let pfp = args.pfp.as_deref().map(read_upload).transpose()?;
    let form = RegisterForm {
        username: args.username,
        email: args.email,
        custom_slug_profile: args.slug,
        first_name: args.first_name,
        last_name: args.last_name,
        birthday: args.birthday,
        show_birthday: !args.hide_birthday,
        birth_place: args.birth_place,
        confirmation_password: args.confirm_password.unwrap_or_else(|| args.password.clone()),
        password: args.password,
        private_profile: args.private,
        pfp,
    };
    let outcome = mutation::auth::register(session, api, &form).await?;
    report(&outcome);
    Ok(())
}

fn run_whoami(session: &Session) -> Result<(), CliError> {
    #[derive(Serialize)]
    struct Whoami<'a> {
        logged_in: bool,
        expiration: Option<String>,
        profile: &'a helenite::profile::UserProfileSummary,
    }
    let state = session.session();
    print_json(&Whoami {
        logged_in: state.is_logged_in(),
        expiration: state.expiration().map(|e| e.to_string()),
        profile: session.profile(),
    })
}

async fn run_post(session: &Session, api: &Api, post: PostCommand) -> Result<(), CliError> {
    let token = session.bearer_token();
    let outcome = match post.command {
        PostSubcommand::Show { post_id } => {
            return print_json(&loader::post(api, token.as_deref(), &post_id).await?);
        }
        PostSubcommand::New { text, image } => {
            let image = image.as_deref().map(read_upload).transpose()?;
            mutation::post::new_post(session, api, &text, image).await?
        }
        PostSubcommand::Like { post_id } => mutation::post::like(session, api, &post_id).await?,
        PostSubcommand::Comment { post_id, text } => {
            let detail = loader::post(api, token.as_deref(), &post_id).await?;
            mutation::post::comment(session, api, &detail.post.endpoint, &text).await?
        }
        PostSubcommand::Delete { post_id } => {
            let detail = loader::post(api, token.as_deref(), &post_id).await?;
            mutation::post::delete_post(session, api, &detail.post).await?
        }
    };
    report(&outcome);
    Ok(())
}

async fn run_settings(session: &mut Session, api: &Api, settings: SettingsCommand) -> Result<(), CliError> {
    match settings.command {
        SettingsSubcommand::Show => {
            let profile = session.profile();
            let ident = if profile.profile_slug.is_empty() { &profile.username } else { &profile.profile_slug };
            print_json(&loader::settings(api, session.bearer_token().as_deref(), ident).await?)
        }
        SettingsSubcommand::Change(args) => {
            let change = SettingsChange {
                private_profile: args.private,
                show_birthday: args.show_birthday,
                old_password: args.old_password,
                new_password: args.new_password,
                confirm_password: args.confirm_password,
                pfp: args.pfp.as_deref().map(read_upload).transpose()?,
            };
            let outcome = mutation::settings::change_settings(session, api, &change).await?;
            report(&outcome);
            Ok(())
        }
    }
}

async fn run_open(session: &mut Session, api: Api, path: &str) -> Result<(), CliError> {
    let navigator = Navigator::new(api);
    let route = Route::parse(path);
    tracing::info!(%route, "opening");
    let render = navigator.navigate(session, route).await.ok_or(CliError::Cancelled)?;
    match render {
        RouteRender::Redirect(route) => {
            println!("redirect {route}");
            Ok(())
        }
        RouteRender::NotFound => {
            println!("not found");
            Ok(())
        }
        RouteRender::Error(err) => Err(err.into()),
        RouteRender::Page(page) => print_page(&page),
    }
}

fn print_page(page: &PageData) -> Result<(), CliError> {
    match page {
        PageData::Landing | PageData::Login | PageData::Register | PageData::AboutUs => {
            println!("{page:?}");
            Ok(())
        }
        PageData::Feed(feed) | PageData::Discover(feed) => print_json(feed),
        PageData::Profile(profile) => print_json(profile),
        PageData::Settings(settings) => print_json(settings),
        PageData::Friends(profiles) | PageData::Search(profiles) => print_json(profiles),
        PageData::Post(detail) => print_json(detail),
    }
}

/// Human-readable next step for a finished flow.
fn describe_navigation(navigation: &Navigation) -> Option<String> {
    match navigation {
        Navigation::Stay => None,
        Navigation::Reload => Some("reload".to_owned()),
        Navigation::To(route) => Some(format!("next: {route}")),
        Navigation::ToAfter { route, delay } => Some(format!("next: {route} (after {}ms)", delay.as_millis())),
    }
}

fn report(outcome: &MutationOutcome) {
    if let Some(notice) = &outcome.notice {
        println!("{}", notice.message);
    }
    if let Some(next) = describe_navigation(&outcome.navigation) {
        eprintln!("{next}");
    }
}

fn read_upload(path: &Path) -> Result<FileUpload, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::ReadFile { path: path.to_owned(), source })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let content_type = match path.extension().map(|e| e.to_string_lossy().to_ascii_lowercase()).as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    };
    Ok(FileUpload { file_name, content_type: content_type.to_owned(), bytes })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
