//! CLI layer - clap command tree and dispatch to the command handlers.
//!
//! ```sh
//! barstock login ada
//! barstock items list --search beer --sort selling-price --order desc
//! barstock items transfer 64f0c2 12
//! barstock sales record --user 64f0d9 64f0c2:2 64f0c7:3
//! barstock sales log --from 2024-05-01 --to 2024-05-31
//! barstock dashboard
//! ```

/// Command handlers (items, sales, users, general)
pub mod commands;

use crate::{
    api::{ApiClient, Session},
    config::AppConfig,
    core::query::{SortKey, SortOrder},
    errors::{Error, Result},
    models::{ItemDraft, MainCategory, NewUser, Position},
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use commands::{general, items, sales, users};

/// Inventory and sales client for the bar back office.
#[derive(Parser, Debug)]
#[command(
    name = "barstock",
    version,
    about = "Manage bar inventory, record sales and administer staff accounts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        username: String,
        /// Password (read from BARSTOCK_PASSWORD when omitted)
        #[arg(long, env = "BARSTOCK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the sign-in state and access level
    Whoami,
    /// Item catalog and stock
    #[command(subcommand)]
    Items(ItemsCommand),
    /// Sales entry and the sales log
    #[command(subcommand)]
    Sales(SalesCommand),
    /// Staff accounts
    #[command(subcommand)]
    Users(UsersCommand),
    /// Head counts and stock overview
    Dashboard {
        /// Flag drinks with this many units or fewer
        #[arg(long, default_value_t = 5)]
        low_stock: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemsCommand {
    /// List items
    List {
        /// Case-insensitive match on name or subcategory
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only show food or drinks
        #[arg(short, long)]
        category: Option<MainCategory>,
        /// name, cost-price or selling-price
        #[arg(long)]
        sort: Option<SortKey>,
        /// asc or desc
        #[arg(long, default_value = "asc")]
        order: SortOrder,
    },
    /// Show one item
    Show { id: String },
    /// Add an item
    Add(ItemFields),
    /// Change fields of an item
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        sub_category: Option<String>,
        #[arg(long)]
        cost_price: Option<f64>,
        #[arg(long)]
        selling_price: Option<f64>,
        #[arg(long)]
        store: Option<u32>,
        #[arg(long)]
        bar: Option<u32>,
    },
    /// Delete an item
    Delete { id: String },
    /// Move units from the store to the bar
    Transfer {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// List drinks running low
    LowStock {
        #[arg(long, default_value_t = 5)]
        threshold: u64,
    },
}

#[derive(Args, Debug)]
pub struct ItemFields {
    pub name: String,
    /// food or drinks
    #[arg(short, long)]
    pub category: MainCategory,
    /// Defaults to the first subcategory configured for the category
    #[arg(long)]
    pub sub_category: Option<String>,
    #[arg(long)]
    pub cost_price: f64,
    #[arg(long)]
    pub selling_price: f64,
    /// Drinks only
    #[arg(long)]
    pub store: Option<u32>,
    /// Drinks only
    #[arg(long)]
    pub bar: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum SalesCommand {
    /// Record a sale from ITEM_ID:QUANTITY pairs
    Record {
        /// Id of the user making the sale
        #[arg(short, long)]
        user: Option<String>,
        #[arg(required = true, allow_hyphen_values = true)]
        lines: Vec<String>,
    },
    /// List recorded sales
    Log {
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Show one sale with its items
    Show { id: String },
    /// Delete a sale
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List staff accounts
    List,
    /// Create an account
    Add {
        name: String,
        username: String,
        #[arg(long, env = "BARSTOCK_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        /// manager, bar-man or staff
        #[arg(long)]
        position: Position,
    },
    /// Change an account's profile
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        /// New password; omit to keep the current one
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        position: Option<Position>,
    },
    /// Enable or disable an account
    Toggle { id: String },
    /// Delete an account
    Delete { id: String },
}

/// Everything a command needs: settings and the authenticated client.
pub struct CliContext {
    pub config: AppConfig,
    pub client: ApiClient,
}

impl CliContext {
    #[must_use]
    pub fn new(config: AppConfig, session: Session) -> Self {
        let client = ApiClient::new(config.api.base_url.clone(), session);
        Self { config, client }
    }

    fn require_session(&self) -> Result<()> {
        if self.client.session().is_signed_in() {
            Ok(())
        } else {
            Err(Error::NotSignedIn)
        }
    }
}

/// Runs one command and returns the text to print.
///
/// # Errors
/// Returns the first error raised by the handler; nothing is retried.
pub async fn dispatch(ctx: &CliContext, command: Command) -> Result<String> {
    let client = &ctx.client;
    match command {
        Command::Login { username, password } => {
            general::login(client, &ctx.config.session_file, &username, &password).await
        }
        Command::Logout => general::logout(&ctx.config.session_file),
        Command::Whoami => general::whoami(client, client.session()).await,
        Command::Items(command) => {
            ctx.require_session()?;
            dispatch_items(ctx, command).await
        }
        Command::Sales(command) => {
            ctx.require_session()?;
            dispatch_sales(client, command).await
        }
        Command::Users(command) => {
            ctx.require_session()?;
            dispatch_users(client, command).await
        }
        Command::Dashboard { low_stock } => {
            ctx.require_session()?;
            general::dashboard(client, low_stock).await
        }
    }
}

async fn dispatch_items(ctx: &CliContext, command: ItemsCommand) -> Result<String> {
    let client = &ctx.client;
    match command {
        ItemsCommand::List {
            search,
            category,
            sort,
            order,
        } => items::list(client, &search, category, sort.map(|key| (key, order))).await,
        ItemsCommand::Show { id } => items::show(client, &id).await,
        ItemsCommand::Add(fields) => {
            let draft = draft_from_fields(&ctx.config, fields);
            items::add(client, &ctx.config.catalog, draft).await
        }
        ItemsCommand::Edit {
            id,
            name,
            sub_category,
            cost_price,
            selling_price,
            store,
            bar,
        } => {
            let changes = items::ItemChanges {
                name,
                sub_category,
                cost_price,
                selling_price,
                store_quantity: store,
                bar_quantity: bar,
            };
            items::edit(client, &id, changes).await
        }
        ItemsCommand::Delete { id } => items::delete(client, &id).await,
        ItemsCommand::Transfer { id, quantity } => items::transfer(client, &id, quantity).await,
        ItemsCommand::LowStock { threshold } => items::low_stock(client, threshold).await,
    }
}

/// Fills the subcategory from the catalog default when none was given.
fn draft_from_fields(config: &AppConfig, fields: ItemFields) -> ItemDraft {
    let sub_category = fields.sub_category.unwrap_or_else(|| {
        config
            .catalog
            .default_sub_category(fields.category)
            .unwrap_or_default()
            .to_string()
    });
    ItemDraft {
        name: fields.name,
        main_category: fields.category,
        sub_category,
        cost_price: fields.cost_price,
        selling_price: fields.selling_price,
        store_quantity: fields.store,
        bar_quantity: fields.bar,
    }
}

async fn dispatch_sales(client: &ApiClient, command: SalesCommand) -> Result<String> {
    match command {
        SalesCommand::Record { user, lines } => sales::record(client, user.as_deref(), &lines).await,
        SalesCommand::Log { from, to } => sales::log(client, from, to).await,
        SalesCommand::Show { id } => sales::show(client, &id).await,
        SalesCommand::Delete { id } => sales::delete(client, &id).await,
    }
}

async fn dispatch_users(client: &ApiClient, command: UsersCommand) -> Result<String> {
    match command {
        UsersCommand::List => users::list(client).await,
        UsersCommand::Add {
            name,
            username,
            password,
            position,
        } => {
            let new_user = NewUser {
                name,
                username,
                password,
                position,
            };
            users::add(client, new_user).await
        }
        UsersCommand::Edit {
            id,
            name,
            username,
            password,
            position,
        } => {
            let changes = users::UserChanges {
                name,
                username,
                password,
                position,
            };
            users::edit(client, &id, changes).await
        }
        UsersCommand::Toggle { id } => users::toggle(client, &id).await,
        UsersCommand::Delete { id } => users::delete(client, &id).await,
    }
}
