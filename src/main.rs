//! Interactive demo shell for the view router.
//!
//! # Architecture Overview
//!
//! ```text
//!   stdin command            ┌──────────────────────────────────────────┐
//!   ─────────────────────────┼─▶ RouterHandle ──▶ location (watch)      │
//!                            │                        │                 │
//!                            │                        ▼                 │
//!                            │   guards ──▶ dispatch ──▶ route table    │
//!                            │                │                         │
//!                            │     teardown ◀─┤                         │
//!   terminal output          │                ▼                         │
//!   ◀────────────────────────┼── surface ◀── view factory ◀── directory │
//!                            └──────────────────────────────────────────┘
//! ```
//!
//! Views render into a terminal surface and read from an in-memory
//! document directory standing in for the remote data service. Commands:
//! `/path` navigates, `login`/`logout` flip the auth state, `quit` exits.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use futures_util::future::BoxFuture;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hash_router::config::load_config;
use hash_router::guards::{AuthGuard, AuthState};
use hash_router::lifecycle::signals;
use hash_router::{
    HashLocation, ProgressIndicator, RouteParams, Router, RouterConfig, Shutdown, Surface,
    SurfaceBackend, Teardown, View, ViewError,
};

#[derive(Parser, Debug)]
#[command(name = "hash-router", version, about = "Interactive demo shell for the view router")]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Renders the mounted view as a framed block on stdout.
struct TerminalSurface;

impl SurfaceBackend for TerminalSurface {
    fn replace(&self, body: &str) {
        println!("----------------------------------------");
        println!("{body}");
        println!("----------------------------------------");
    }
}

struct TerminalIndicator;

impl ProgressIndicator for TerminalIndicator {
    fn show(&self) {
        println!("loading...");
    }

    fn hide(&self) {}
}

/// In-memory document directory standing in for the remote data service.
struct Directory {
    users: HashMap<String, Value>,
    posts: Vec<Value>,
}

impl Directory {
    fn seed() -> Self {
        let mut users = HashMap::new();
        users.insert(
            "42".to_string(),
            json!({ "displayName": "Ada", "bio": "Writes compilers for fun." }),
        );
        users.insert(
            "7".to_string(),
            json!({ "displayName": "Lin", "bio": "Mostly here for the cat pictures." }),
        );

        let posts = vec![
            json!({ "id": "p1", "author": "Ada", "text": "Shipped the new parser today." }),
            json!({ "id": "p2", "author": "Lin", "text": "Cat picture #4018." }),
        ];

        Self { users, posts }
    }

    fn user(&self, id: &str) -> Option<&Value> {
        self.users.get(id)
    }

    fn post(&self, id: &str) -> Option<&Value> {
        self.posts.iter().find(|p| p["id"] == id)
    }
}

struct FeedView {
    directory: Arc<Directory>,
}

impl View for FeedView {
    fn mount(
        &self,
        surface: Surface,
        _params: RouteParams,
    ) -> BoxFuture<'static, Result<Teardown, ViewError>> {
        let directory = self.directory.clone();
        Box::pin(async move {
            let mut body = String::from("FEED\n");
            for post in &directory.posts {
                let id = post["id"].as_str().unwrap_or("");
                let author = post["author"].as_str().unwrap_or("?");
                let text = post["text"].as_str().unwrap_or("");
                body.push_str(&format!("[{id}] {author}: {text}\n"));
            }
            body.push_str("(open a post with /post/<id>)");
            surface.replace(&body);

            Ok(Teardown::sync(|| {
                tracing::debug!("feed listener unsubscribed");
            }))
        })
    }
}

struct UserProfileView {
    directory: Arc<Directory>,
}

impl View for UserProfileView {
    fn mount(
        &self,
        surface: Surface,
        params: RouteParams,
    ) -> BoxFuture<'static, Result<Teardown, ViewError>> {
        let directory = self.directory.clone();
        Box::pin(async move {
            let id = params.get("userId").unwrap_or("").to_string();
            let Some(user) = directory.user(&id) else {
                return Err(format!("no profile document for user {id}").into());
            };
            let name = user["displayName"].as_str().unwrap_or("unknown");
            let bio = user["bio"].as_str().unwrap_or("");
            surface.replace(&format!("PROFILE: {name}\n{bio}"));

            Ok(Teardown::sync(move || {
                tracing::debug!(user = %id, "profile listener unsubscribed");
            }))
        })
    }
}

struct PostView {
    directory: Arc<Directory>,
}

impl View for PostView {
    fn mount(
        &self,
        surface: Surface,
        params: RouteParams,
    ) -> BoxFuture<'static, Result<Teardown, ViewError>> {
        let directory = self.directory.clone();
        Box::pin(async move {
            let id = params.get("postId").unwrap_or("").to_string();
            let Some(post) = directory.post(&id) else {
                return Err(format!("no post document {id}").into());
            };
            let author = post["author"].as_str().unwrap_or("?");
            let text = post["text"].as_str().unwrap_or("");
            surface.replace(&format!("POST {id} by {author}\n{text}"));

            Ok(Teardown::sync(move || {
                tracing::debug!(post = %id, "comment listener unsubscribed");
            }))
        })
    }
}

fn login_view() -> impl View {
    |surface: Surface, _params: RouteParams| async move {
        surface.replace("SIGN IN\nType `login` to sign in.");
        Ok::<Teardown, ViewError>(Teardown::none())
    }
}

fn profile_view() -> impl View {
    |surface: Surface, _params: RouteParams| async move {
        surface.replace("YOUR PROFILE\n(see other users at /user-profile/<id>)");
        Ok::<Teardown, ViewError>(Teardown::none())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hash_router=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    tracing::info!(default_path = %config.default_path, "Configuration loaded");

    let directory = Arc::new(Directory::seed());
    let (auth_tx, auth_rx) = watch::channel(AuthState::SignedOut);
    let location = Arc::new(HashLocation::new(""));
    let surface = Surface::new(Arc::new(TerminalSurface));

    let mut router = Router::new(config.clone(), surface, location)
        .with_indicator(Arc::new(TerminalIndicator));

    router.register("/", login_view())?;
    router.register("/login", login_view())?;
    router.register(
        "/feed",
        FeedView {
            directory: directory.clone(),
        },
    )?;
    router.register("/profile", profile_view())?;
    router.register(
        "/user-profile/:userId",
        UserProfileView {
            directory: directory.clone(),
        },
    )?;
    router.register(
        "/post/:postId",
        PostView {
            directory: directory.clone(),
        },
    )?;

    router.guard(AuthGuard::new(auth_rx, "/login", &config.default_path).entry("/"));

    let handle = router.handle();
    let shutdown = Shutdown::new();
    signals::trigger_on_ctrl_c(shutdown.clone());

    let router_task = tokio::spawn(router.run(shutdown.clone()));

    println!("commands: /<path>, login, logout, quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "login" => {
                let _ = auth_tx.send(AuthState::SignedIn);
                println!("signed in");
                handle.navigate(&config.default_path);
            }
            "logout" => {
                let _ = auth_tx.send(AuthState::SignedOut);
                println!("signed out");
                handle.navigate("/login");
            }
            path if path.starts_with('/') => handle.navigate(path),
            _ => println!("commands: /<path>, login, logout, quit"),
        }
    }

    shutdown.trigger();
    router_task.await??;

    tracing::info!("goodbye");
    Ok(())
}
