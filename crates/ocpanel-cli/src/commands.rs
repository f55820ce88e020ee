//! Command handlers. Every action navigates to the route that owns it first,
//! so the navigation guard decides whether it may run.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use ocpanel_core::router::{Navigation, ROUTES};
use ocpanel_core::views::{ConfigView, LoginView, ServicesView, UsersView};
use ocpanel_core::{ClientRegistry, Config, Router};
use tracing::warn;

use crate::cli::Command;
use crate::format::{format_time, render};

/// Environment variable read instead of prompting for a password
const PASSWORD_ENV: &str = "OCPANEL_PASSWORD";

pub struct Panel {
    config: Config,
    registry: Arc<ClientRegistry>,
    router: Router,
}

impl Panel {
    pub fn new(config: Config) -> Result<Self> {
        let session = config.open_session()?;
        let registry = ClientRegistry::shared(&config.base_address, session)
            .context("Invalid server base address")?;
        let router = Router::new(Arc::clone(&registry));
        Ok(Self {
            config,
            registry,
            router,
        })
    }

    /// Navigate to `path`, failing when the guard sends us to login instead
    fn enter(&mut self, path: &str) -> Result<()> {
        match self.router.navigate(path)? {
            Navigation::Allowed { .. } => Ok(()),
            Navigation::Redirected { requested, .. } => {
                bail!("Not logged in: {requested} requires a session. Run `ocpanel login` first.")
            }
        }
    }

    pub async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Login { account } => self.login(account).await,
            Command::Logout => self.logout(),
            Command::Status => self.status(),
            Command::Routes => {
                print_routes();
                Ok(())
            }
            Command::Open { path, json } => self.open(&path, json).await,
            Command::SetStatus { status, reason } => {
                self.enter("/services")?;
                ServicesView::new(Arc::clone(&self.registry))
                    .set_status(status.into(), &reason)
                    .await?;
                println!("Server status set to {:?}", status);
                Ok(())
            }
            Command::Ban {
                user_id,
                seconds,
                reason,
            } => {
                self.enter("/users")?;
                UsersView::new(Arc::clone(&self.registry))
                    .ban(user_id, seconds.map(Duration::from_secs), reason)
                    .await?;
                match seconds {
                    Some(seconds) => println!("User {user_id} banned for {seconds}s"),
                    None => println!("User {user_id} banned"),
                }
                Ok(())
            }
            Command::Unban { user_id } => {
                self.enter("/users")?;
                UsersView::new(Arc::clone(&self.registry))
                    .unban(user_id)
                    .await?;
                println!("User {user_id} unbanned");
                Ok(())
            }
            Command::DeleteAccount { user_id } => {
                self.enter("/users")?;
                UsersView::new(Arc::clone(&self.registry))
                    .delete_account(user_id)
                    .await?;
                println!("Account {user_id} deleted");
                Ok(())
            }
            Command::Announce { title, content } => {
                self.enter("/services")?;
                let id = ServicesView::new(Arc::clone(&self.registry))
                    .announce(&title, &content)
                    .await?;
                println!("Announcement {id} published");
                Ok(())
            }
            Command::GetConfig => {
                self.enter("/config")?;
                let raw = ConfigView::new(Arc::clone(&self.registry)).get().await?;
                println!("{raw}");
                Ok(())
            }
            Command::SetConfig { file } => {
                self.enter("/config")?;
                let content = std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                ConfigView::new(Arc::clone(&self.registry))
                    .set(&content)
                    .await?;
                println!("Server config updated from {}", file.display());
                Ok(())
            }
        }
    }

    async fn login(&mut self, account: Option<String>) -> Result<()> {
        self.enter("/login")?;

        let account = match account.or_else(|| self.config.last_account.clone()) {
            Some(account) => account,
            None => prompt_account()?,
        };
        let password = match std::env::var(PASSWORD_ENV) {
            Ok(password) if !password.is_empty() => password,
            _ => rpassword::prompt_password("Password: ")?,
        };

        let outcome = LoginView::new(Arc::clone(&self.registry))
            .submit(&account, &password)
            .await?;

        // Save against the on-disk config so flag and env overrides stay out of it
        let mut saved = Config::load().unwrap_or_default();
        saved.remember_login(account.trim());
        if let Err(e) = saved.save() {
            warn!(error = %e, "Failed to save config");
        }

        println!("Logged in as {} (user id {})", account.trim(), outcome.user_id);
        Ok(())
    }

    fn logout(&mut self) -> Result<()> {
        LoginView::new(Arc::clone(&self.registry))
            .logout()
            .context("Failed to clear session token")?;
        println!("Logged out");
        Ok(())
    }

    fn status(&self) -> Result<()> {
        let logged_in = self
            .registry
            .session()
            .get_token()
            .context("Failed to read session token")?
            .is_some();

        println!("Server:     {}", self.config.base_address);
        println!("Storage:    {}", self.config.storage);
        println!(
            "Session:    {}",
            if logged_in { "logged in" } else { "logged out" }
        );
        if let Some(ref account) = self.config.last_account {
            println!(
                "Last login: {} at {}",
                account,
                format_time(self.config.last_login)
            );
        }
        Ok(())
    }

    async fn open(&mut self, path: &str, json: bool) -> Result<()> {
        let opened = self.router.open(path)?;
        if let Navigation::Redirected { ref requested, to } = opened.navigation {
            eprintln!("{requested} requires a session, showing {to} instead");
        }

        let data = opened.view.load().await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&data)?);
        } else {
            print!("{}", render(&data));
        }
        Ok(())
    }
}

fn print_routes() {
    for route in &ROUTES {
        let access = if route.requires_auth() {
            "session"
        } else {
            "public"
        };
        println!(
            "{:<10} {:<10} {:<8} {}",
            route.path,
            route.name,
            access,
            route.name.title()
        );
    }
}

fn prompt_account() -> Result<String> {
    print!("Account (OCID or email): ");
    io::stdout().flush()?;

    let mut account = String::new();
    io::stdin().read_line(&mut account)?;
    Ok(account.trim().to_string())
}
