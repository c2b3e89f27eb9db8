//! Browse Conference Alert listings from the terminal.
//!
//! ```text
//! browse search /search/india/topic/robotics [page]
//! browse event global-ai-summit-k3m9x2q7w1p8z4r
//! browse upcoming
//! browse calendar 2025 3
//! browse blogs [query]
//! ```
//!
//! Reads `CONFERENCE_ALERT_BASE_URL` and friends from the environment or a
//! `.env` file.

use anyhow::{Context, bail};
use conference_alert_client::PocketBaseClient;
use conference_alert_core::pagination::{DEFAULT_PAGE_SIZE, SEARCH_PAGE_SIZE};
use conference_alert_core::route::SearchRoute;
use conference_alert_core::{Event, Page, PageRequest, SearchCriteria};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: browse <search PATH [PAGE] | event SLUG | upcoming | calendar YEAR MONTH | blogs [QUERY]>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "browse=info,conference_alert_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let client = PocketBaseClient::from_env().context("building client")?;
    tracing::info!(base_url = %client.config().base_url, "Browsing");

    match args.as_slice() {
        ["search", path, rest @ ..] => search(&client, path, rest.first().copied()).await,
        ["event", slug] => event(&client, slug).await,
        ["upcoming"] => upcoming(&client).await,
        ["calendar", year, month] => calendar(&client, year, month).await,
        ["blogs", query @ ..] => blogs(&client, &query.join(" ")).await,
        _ => bail!(USAGE),
    }
}

async fn search(client: &PocketBaseClient, path: &str, page: Option<&str>) -> anyhow::Result<()> {
    let Some(route) = SearchRoute::from_path(path) else {
        bail!("{path} is not a search path");
    };
    let page = page.map(str::parse::<u32>).transpose().context("page must be a number")?.unwrap_or(1);

    println!("=== {} ===", route.title());
    let results = client
        .find_events(&route.criteria(), PageRequest::new(page, SEARCH_PAGE_SIZE))
        .await?;
    print_events(&results);
    Ok(())
}

async fn event(client: &PocketBaseClient, slug: &str) -> anyhow::Result<()> {
    let Some(event) = client.get_event_by_slug(slug).await? else {
        bail!("no event at {slug}");
    };

    println!("=== {} ===", event.name);
    println!("Topic:    {}", event.topic);
    println!("Where:    {}", location(&event));
    if let Some(start) = event.start_date {
        println!("Starts:   {}", start.format("%d %b %Y"));
    }
    if let Some(url) = client.event_thumbnail_url(&event) {
        println!("Image:    {url}");
    }
    println!("Link:     /event/{}", PocketBaseClient::event_slug(&event));
    Ok(())
}

async fn upcoming(client: &PocketBaseClient) -> anyhow::Result<()> {
    println!("=== Upcoming ===");
    for event in client.upcoming_events(DEFAULT_PAGE_SIZE).await? {
        println!("  {}", summary(&event));
    }
    Ok(())
}

async fn calendar(client: &PocketBaseClient, year: &str, month: &str) -> anyhow::Result<()> {
    let year: i32 = year.parse().context("year must be a number")?;
    let month: u32 = month.parse().context("month must be a number")?;

    println!("=== {year}-{month:02} ===");
    let results = client
        .monthly_events(year, month, SearchCriteria::new(), PageRequest::first(SEARCH_PAGE_SIZE))
        .await?;
    print_events(&results);
    Ok(())
}

async fn blogs(client: &PocketBaseClient, query: &str) -> anyhow::Result<()> {
    let request = PageRequest::first(DEFAULT_PAGE_SIZE);
    let posts = if query.trim().is_empty() {
        client.list_blogs(request).await?
    } else {
        client.search_blogs(query, request).await?
    };

    println!("=== Blog ({} posts) ===", posts.total_items);
    for post in &posts.items {
        let category = post.category.as_ref().map(ToString::to_string).unwrap_or_default();
        println!("  {} [{category}] /blog/{}", post.title, PocketBaseClient::blog_slug(post));
    }
    Ok(())
}

fn print_events(page: &Page<Event>) {
    println!("{} events, page {} of {}", page.total_items, page.page, page.total_pages.max(1));
    for event in &page.items {
        println!("  {}", summary(event));
    }
    if page.has_next() {
        println!("  ... more on page {}", page.page + 1);
    }
}

fn summary(event: &Event) -> String {
    let date = event
        .start_date
        .map(|start| start.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "TBA".to_string());
    format!("{date}  {}  ({})", event.name, location(event))
}

fn location(event: &Event) -> String {
    [event.city.as_str(), event.state.as_str(), event.country.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
