//! Command line front end for the marketplace dashboards.

mod render;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio::sync::watch;
use tracing::info;

use propdesk::api::{
    Actor, HttpClient, ListingAction, ListingScope, ListingView, ListingsApi, LocationClient,
    NotificationBackend, NotificationsApi, RejectionReason, UsersApi,
};
use propdesk::filters::{parse_bound, Availability, Category, Furnishing, Preference};
use propdesk::models::ProfileUpdate;
use propdesk::notifications::{NotificationCenter, UnreadCounter, UnreadPoller};
use propdesk::pagination::PageWindow;
use propdesk::routes::{Route, ROUTES};
use propdesk::session::{Session, SessionStore};
use propdesk::views::{ListingDetail, ListingList, RejectDialog};
use propdesk::{Config, Filters, ValidationError};

#[derive(Debug, Parser)]
#[command(name = "propdesk", version, about = "Property marketplace dashboards in the terminal")]
pub struct Cli {
    /// Backend base URL, overrides PROPDESK_API_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Session file, defaults to the user config directory
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Remember the agent and/or buyer id for dashboard calls
    Login {
        #[arg(long)]
        agent_id: Option<String>,
        #[arg(long)]
        buyer_id: Option<String>,
    },
    /// Forget the stored ids
    Logout,
    /// List the dashboard paths
    Routes,
    /// Render a dashboard path such as /admin/pending or /property/12
    Open {
        path: String,
        #[command(flatten)]
        filters: FilterArgs,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Items per page, defaults to PROPDESK_PAGE_SIZE
        #[arg(long)]
        size: Option<usize>,
    },
    /// Run an action on a listing and show the result
    Act {
        #[arg(value_enum)]
        action: ActionArg,
        id: i64,
        #[arg(long = "as", value_enum, default_value_t = Dashboard::Admin)]
        dashboard: Dashboard,
        /// Required for reject
        #[arg(long)]
        reason: Option<String>,
    },
    /// Review a seller's KYC submission
    Kyc {
        #[arg(value_enum)]
        decision: KycDecision,
        user_id: String,
        /// Required for reject
        #[arg(long)]
        reason: Option<String>,
    },
    /// Update the agent or buyer profile of the stored session
    Profile {
        #[arg(long = "as", value_enum, default_value_t = ProfileOwner::Agent)]
        owner: ProfileOwner,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        agency_name: Option<String>,
        #[arg(long)]
        rera_number: Option<String>,
    },
    /// Show notifications
    Notifications {
        #[arg(long = "as", value_enum, default_value_t = Dashboard::Admin)]
        dashboard: Dashboard,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Open one notification, marking it read
    Read {
        id: i64,
        #[arg(long = "as", value_enum, default_value_t = Dashboard::Admin)]
        dashboard: Dashboard,
    },
    /// Mark every notification read
    ReadAll {
        #[arg(long = "as", value_enum, default_value_t = Dashboard::Admin)]
        dashboard: Dashboard,
    },
    /// Print the unread count whenever it changes
    Watch {
        #[arg(long = "as", value_enum, default_value_t = Dashboard::Admin)]
        dashboard: Dashboard,
    },
    /// States of a country for the location filter
    States {
        #[arg(long, default_value = "IN")]
        country: String,
    },
    /// Cities of a state for the location filter
    Cities {
        state_iso: String,
        #[arg(long, default_value = "IN")]
        country: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Dashboard {
    Admin,
    Agent,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileOwner {
    Agent,
    Buyer,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ActionArg {
    Approve,
    Reject,
    Vip,
    Rera,
    Sold,
    Renew,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KycDecision {
    Approve,
    Reject,
}

/// Listing filters as command line flags
#[derive(Debug, Default, Args)]
struct FilterArgs {
    #[arg(long)]
    category: Option<Category>,
    /// Repeatable
    #[arg(long = "type")]
    property_types: Vec<String>,
    #[arg(long)]
    preference: Option<Preference>,
    #[arg(long)]
    price_min: Option<String>,
    #[arg(long)]
    price_max: Option<String>,
    #[arg(long)]
    furnishing: Option<Furnishing>,
    /// State name as the backend stores it
    #[arg(long)]
    state: Option<String>,
    /// ISO code of --state
    #[arg(long)]
    state_iso: Option<String>,
    #[arg(long)]
    city: Option<String>,
    /// Repeatable
    #[arg(long = "amenity")]
    amenities: Vec<String>,
    #[arg(long)]
    availability: Option<Availability>,
    #[arg(long)]
    area_min: Option<String>,
    #[arg(long)]
    area_max: Option<String>,
    /// Repeatable
    #[arg(long = "age")]
    age_ranges: Vec<String>,
}

impl FilterArgs {
    fn into_filters(self) -> Filters {
        let mut filters = Filters {
            property_types: self.property_types,
            amenities: self.amenities,
            age_ranges: self.age_ranges,
            price_min: self.price_min.as_deref().and_then(parse_bound),
            price_max: self.price_max.as_deref().and_then(parse_bound),
            area_min: self.area_min.as_deref().and_then(parse_bound),
            area_max: self.area_max.as_deref().and_then(parse_bound),
            ..Filters::default()
        };
        if let Some(preference) = self.preference {
            filters.preference = preference;
        }
        if let Some(category) = self.category {
            filters.set_category(category);
        }
        if let Some(furnishing) = self.furnishing {
            filters.furnishing = furnishing;
        }
        if let Some(availability) = self.availability {
            filters.availability = availability;
        }
        if let Some(state) = self.state {
            filters.set_state(self.state_iso.unwrap_or_default(), state);
        }
        if let Some(city) = self.city {
            filters.city = city;
        }
        filters
    }
}

struct App {
    config: Config,
    store: SessionStore,
    session: Session,
    http: HttpClient,
}

impl App {
    fn dashboard_actor(&self, dashboard: Dashboard) -> anyhow::Result<Actor> {
        match dashboard {
            Dashboard::Admin => Ok(Actor::Admin),
            Dashboard::Agent => Ok(self.session.agent()?),
        }
    }

    fn agent_id(&self) -> Result<&str, ValidationError> {
        self.session.agent_id.as_deref().ok_or(ValidationError::NoSession)
    }

    fn listings(&self) -> Arc<ListingsApi> {
        Arc::new(ListingsApi::new(self.http.clone()))
    }

    fn notifications(&self, actor: &Actor) -> anyhow::Result<Arc<dyn NotificationBackend>> {
        Ok(Arc::new(NotificationsApi::new(self.http.clone(), actor)?))
    }

    fn users(&self) -> UsersApi {
        UsersApi::new(self.http.clone())
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    let store = cli
        .session_file
        .map(SessionStore::new)
        .unwrap_or_else(SessionStore::default_location);
    let session = store.load().context("Could not read session")?;
    let http = HttpClient::new(&config).context("Could not build HTTP client")?;
    let ctx = App {
        config,
        store,
        session,
        http,
    };

    match cli.command {
        Command::Login { agent_id, buyer_id } => login(&ctx, agent_id, buyer_id),
        Command::Logout => {
            ctx.store.clear()?;
            info!("👋 Session cleared");
            Ok(())
        }
        Command::Routes => {
            for (pattern, title) in ROUTES {
                println!("{:24} {}", pattern, title);
            }
            Ok(())
        }
        Command::Open {
            path,
            filters,
            page,
            size,
        } => {
            let size = size.unwrap_or(ctx.config.page_size);
            open(&ctx, &path, filters.into_filters(), page.saturating_sub(1), size).await
        }
        Command::Act {
            action,
            id,
            dashboard,
            reason,
        } => act(&ctx, action, id, dashboard, reason).await,
        Command::Kyc {
            decision,
            user_id,
            reason,
        } => kyc(&ctx, decision, &user_id, reason).await,
        Command::Profile {
            owner,
            name,
            email,
            phone,
            agency_name,
            rera_number,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                phone,
                agency_name,
                rera_number,
            };
            update_profile(&ctx, owner, &update).await
        }
        Command::Notifications { dashboard, page } => {
            let mut center = load_center(&ctx, dashboard).await?;
            center.set_page(page.saturating_sub(1));
            render::notifications("Notifications", &center);
            Ok(())
        }
        Command::Read { id, dashboard } => {
            let mut center = load_center(&ctx, dashboard).await?;
            let Some(opened) = center.open(id).await else {
                bail!("Notification {} not found", id);
            };
            let n = &opened.notification;
            println!("#{} {}", n.id, n.kind.as_deref().unwrap_or("NOTIFICATION"));
            println!("{}", n.message);
            println!();
            println!("{} unread", center.counter().get());
            opened
                .synced
                .with_context(|| format!("Could not mark notification {} as read", id))
        }
        Command::ReadAll { dashboard } => {
            let mut center = load_center(&ctx, dashboard).await?;
            center.mark_all_read().await?;
            println!("{} unread", center.counter().get());
            Ok(())
        }
        Command::Watch { dashboard } => watch(&ctx, dashboard).await,
        Command::States { country } => {
            let client = LocationClient::new(&ctx.config)?;
            for state in client.states(&country).await? {
                println!("{:6} {}", state.iso2, state.name);
            }
            Ok(())
        }
        Command::Cities { state_iso, country } => {
            let client = LocationClient::new(&ctx.config)?;
            for city in client.cities(&country, &state_iso).await? {
                println!("{}", city.name);
            }
            Ok(())
        }
    }
}

fn login(ctx: &App, agent_id: Option<String>, buyer_id: Option<String>) -> anyhow::Result<()> {
    if agent_id.is_none() && buyer_id.is_none() {
        bail!("Pass --agent-id and/or --buyer-id");
    }
    let mut session = ctx.session.clone();
    if agent_id.is_some() {
        session.agent_id = agent_id;
    }
    if buyer_id.is_some() {
        session.buyer_id = buyer_id;
    }
    ctx.store.save(&session)?;
    info!("🔑 Session saved to {}", ctx.store.path().display());
    Ok(())
}

async fn open(
    ctx: &App,
    path: &str,
    filters: Filters,
    page: usize,
    size: usize,
) -> anyhow::Result<()> {
    let route = Route::parse(path);
    let actor = route.actor(&ctx.session)?;
    let title = route.title();

    match route {
        Route::Home => show_list(ctx, &title, actor, ListingView::All, filters, page, size).await,
        Route::AdminListings(view) | Route::AgentListings(view) => {
            show_list(ctx, &title, actor, view, filters, page, size).await
        }
        Route::PublicListing(id) | Route::AdminListing(id) | Route::AgentListing(id) => {
            let mut detail = ListingDetail::new(ctx.listings(), actor, id);
            detail.load().await?;
            render::fields(&title, &detail.fields());
            Ok(())
        }
        Route::AdminNotifications | Route::AgentNotifications => {
            let mut center = NotificationCenter::new(ctx.notifications(&actor)?, UnreadCounter::default(), size);
            center.load().await?;
            center.set_page(page);
            render::notifications(&title, &center);
            Ok(())
        }
        Route::AdminUsers => {
            let users = ctx.users().list_users(page, size).await?;
            println!("{}", title);
            println!();
            render::users(&users.items, PageWindow::for_index(page, users.total_pages), users.total_elements);
            println!();
            println!("Agents");
            println!();
            render::agents(&ctx.users().list_agents().await?);
            Ok(())
        }
        Route::AdminKyc => {
            println!("{}", title);
            println!();
            render::kyc_queue(&ctx.users().pending_kyc().await?);
            Ok(())
        }
        Route::AgentProfile => {
            let agent_id = ctx.agent_id()?;
            render::agent_profile(&ctx.users().agent_profile(agent_id).await?);
            Ok(())
        }
        Route::BuyerProfile => {
            let buyer_id = ctx.session.buyer_id()?;
            render::user_profile(&ctx.users().buyer_profile(buyer_id).await?);
            Ok(())
        }
        Route::NotFound(path) => bail!("No page at {}", path),
    }
}

async fn show_list(
    ctx: &App,
    title: &str,
    actor: Actor,
    view: ListingView,
    filters: Filters,
    page: usize,
    size: usize,
) -> anyhow::Result<()> {
    let scope = ListingScope::new(actor, view)?;
    if !filters.is_default() && !scope.accepts_filters() {
        info!("{} has no server-side filters, filtering the fetched page locally", scope);
    }
    let mut list = ListingList::new(ctx.listings(), scope, size)
        .with_filters(filters)
        .with_page(page);
    list.refresh().await?;
    render::listing_page(title, &list);
    Ok(())
}

async fn act(
    ctx: &App,
    action: ActionArg,
    id: i64,
    dashboard: Dashboard,
    reason: Option<String>,
) -> anyhow::Result<()> {
    let action = match action {
        ActionArg::Approve => ListingAction::Approve,
        ActionArg::Reject => {
            let dialog = RejectDialog {
                property_id: id,
                text: reason.unwrap_or_default(),
            };
            dialog.submit()?
        }
        ActionArg::Vip => ListingAction::ToggleVip,
        ActionArg::Rera => ListingAction::ToggleRera,
        ActionArg::Sold => ListingAction::MarkSold,
        ActionArg::Renew => ListingAction::Renew,
    };
    let actor = ctx.dashboard_actor(dashboard)?;
    let mut detail = ListingDetail::new(ctx.listings(), actor, id);
    detail
        .perform(&action)
        .await
        .with_context(|| format!("Could not {} property {}", action.name(), id))?;
    render::fields("Updated listing", &detail.fields());
    Ok(())
}

async fn kyc(
    ctx: &App,
    decision: KycDecision,
    user_id: &str,
    reason: Option<String>,
) -> anyhow::Result<()> {
    match decision {
        KycDecision::Approve => ctx.users().approve_kyc(user_id).await?,
        KycDecision::Reject => {
            let reason = RejectionReason::new(reason.as_deref().unwrap_or_default())?;
            ctx.users().reject_kyc(user_id, &reason).await?
        }
    }
    render::kyc_queue(&ctx.users().pending_kyc().await?);
    Ok(())
}

async fn update_profile(ctx: &App, owner: ProfileOwner, update: &ProfileUpdate) -> anyhow::Result<()> {
    match owner {
        ProfileOwner::Agent => {
            let agent_id = ctx.agent_id()?;
            let agent = ctx.users().update_agent_profile(agent_id, update).await?;
            info!("✅ Profile updated");
            render::agent_profile(&agent);
        }
        ProfileOwner::Buyer => {
            let buyer_id = ctx.session.buyer_id()?;
            let user = ctx.users().update_buyer_profile(buyer_id, update).await?;
            info!("✅ Profile updated");
            render::user_profile(&user);
        }
    }
    Ok(())
}

async fn load_center(ctx: &App, dashboard: Dashboard) -> anyhow::Result<NotificationCenter> {
    let actor = ctx.dashboard_actor(dashboard)?;
    let mut center = NotificationCenter::new(
        ctx.notifications(&actor)?,
        UnreadCounter::default(),
        ctx.config.page_size,
    );
    center.load().await?;
    Ok(center)
}

async fn watch(ctx: &App, dashboard: Dashboard) -> anyhow::Result<()> {
    let actor = ctx.dashboard_actor(dashboard)?;
    let counter = UnreadCounter::default();
    let rx = counter.subscribe();
    let _poller = UnreadPoller::spawn(ctx.notifications(&actor)?, counter, ctx.config.poll_interval);
    info!("👀 Watching unread notifications every {:?}", ctx.config.poll_interval);

    let stop = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Stopped watching");
    };
    follow_unread(rx, stop, |count| println!("🔔 {} unread", count)).await;
    Ok(())
}

/// Emit the current count, then every change until `stop` resolves or the
/// counter goes away
async fn follow_unread<F>(mut rx: watch::Receiver<u64>, stop: F, mut emit: impl FnMut(u64))
where
    F: Future<Output = ()>,
{
    emit(*rx.borrow_and_update());
    tokio::pin!(stop);
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    return;
                }
                emit(*rx.borrow_and_update());
            }
            _ = &mut stop => return,
        }
    }
}
