//! Item collection commands - list, collections, analytics, alerts, claims.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use clap::Args;
use console::style;
use serde_json::json;
use tracing::{info, warn};

use homeops_core::warranty::{ClaimLetter, ClaimReason};
use homeops_core::{
    AlertScheduler, AnalyticsSnapshot, CategoryCatalog, CollectionSnapshot, EngineConfig, Insight,
    Item, ItemAggregator, ItemFilter, ItemId, ItemLibrary, SortOrder, TagCatalog, WarrantyBucket,
    WarrantyClock,
};

use super::scan::OutputFormat;

/// Where the item collection comes from and when "now" is.
#[derive(Args)]
pub struct ItemSource {
    /// JSON file holding an array of items
    #[arg(short, long)]
    items: PathBuf,

    /// Reference date (YYYY-MM-DD); defaults to the current local time
    #[arg(long)]
    now: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReportFormat {
    /// Human-readable report
    Text,
    /// JSON output
    Json,
}

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    source: ItemSource,

    /// Case-insensitive text matched against name or category
    #[arg(short, long)]
    search: Option<String>,

    /// Exact category name
    #[arg(long)]
    category: Option<String>,

    /// Sort order (date-desc, date-asc, name-asc, name-desc, expiring-first, price-desc, price-asc)
    #[arg(long, default_value = "date-desc")]
    sort: SortOrder,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Arguments for the collections command.
#[derive(Args)]
pub struct CollectionsArgs {
    #[command(flatten)]
    source: ItemSource,

    #[arg(short, long, value_enum, default_value = "text")]
    format: ReportFormat,
}

/// Arguments for the analytics command.
#[derive(Args)]
pub struct AnalyticsArgs {
    #[command(flatten)]
    source: ItemSource,

    #[arg(short, long, value_enum, default_value = "text")]
    format: ReportFormat,
}

/// Arguments for the alerts command.
#[derive(Args)]
pub struct AlertsArgs {
    #[command(flatten)]
    source: ItemSource,

    /// Only show alerts firing within this many days
    #[arg(long)]
    within: Option<i64>,

    #[arg(short, long, value_enum, default_value = "text")]
    format: ReportFormat,
}

/// Arguments for the claim command.
#[derive(Args)]
pub struct ClaimArgs {
    #[command(flatten)]
    source: ItemSource,

    /// Id of the item being claimed
    #[arg(long)]
    id: ItemId,

    /// Claim reason (defective, stopped-working, damaged, missing-parts, other)
    #[arg(short, long, default_value = "defective")]
    reason: ClaimReason,

    /// Description of the issue
    #[arg(short, long)]
    description: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "text")]
    format: ReportFormat,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    #[arg(short, long, value_enum, default_value = "text")]
    format: ReportFormat,
}

/// A loaded collection plus everything needed to evaluate it.
struct Workspace {
    config: EngineConfig,
    snapshot: Arc<CollectionSnapshot>,
    now: NaiveDateTime,
}

impl Workspace {
    fn load(source: &ItemSource, config_path: Option<&str>) -> anyhow::Result<Self> {
        let config = super::load_config(config_path)?;

        if !source.items.exists() {
            anyhow::bail!("Items file not found: {}", source.items.display());
        }
        let content = fs::read_to_string(&source.items)?;
        let items: Vec<Item> = serde_json::from_str(&content)?;

        let catalog = CategoryCatalog::with_custom(config.catalog.custom_categories.clone());
        for item in &items {
            if !catalog.contains(&item.category) {
                warn!("Item '{}' uses unknown category '{}'", item.name, item.category);
            }
        }

        let library = ItemLibrary::with_items(items)?;
        let snapshot = library.snapshot();
        info!(
            "Loaded {} items from {}",
            snapshot.len(),
            source.items.display()
        );

        let now = match source.now {
            Some(date) => date.and_time(NaiveTime::MIN),
            None => Local::now().naive_local(),
        };

        Ok(Self {
            config,
            snapshot,
            now,
        })
    }

    fn items(&self) -> &[Item] {
        self.snapshot.items()
    }
}

pub fn list(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let ws = Workspace::load(&args.source, config_path)?;
    let aggregator = ItemAggregator::from_config(&ws.config);

    let filter = ItemFilter {
        search: args.search,
        category: args.category,
    };
    let found = aggregator.query(ws.items(), &filter, args.sort, ws.now);
    let clock = aggregator.clock();

    match args.format {
        OutputFormat::Json => {
            let rows: Vec<_> = found
                .iter()
                .map(|item| json!({ "item": item, "warranty": clock.state(item, ws.now) }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => print!("{}", format_items_csv(&found, clock, ws.now)?),
        OutputFormat::Text => {
            if found.is_empty() {
                println!("{} No items found.", style("ℹ").blue());
            }
            for item in &found {
                let state = clock.state(item, ws.now);
                let status = match state.bucket {
                    WarrantyBucket::Active => style(state.bucket.label()).green(),
                    WarrantyBucket::ExpiringSoon => style(state.bucket.label()).yellow(),
                    WarrantyBucket::Expired => style(state.bucket.label()).red(),
                };
                println!(
                    "{:<30} {:<16} {}  {:>5}d  {:?}  {}",
                    item.name,
                    item.category,
                    state.expiration_date,
                    state.days_remaining,
                    WarrantyClock::urgency(state.days_remaining),
                    status
                );
            }
        }
    }

    Ok(())
}

fn format_items_csv(items: &[&Item], clock: &WarrantyClock, now: NaiveDateTime) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "id",
        "name",
        "category",
        "purchase_date",
        "expiration_date",
        "days_remaining",
        "status",
        "price",
        "store_name",
        "location",
    ])?;

    for item in items {
        let state = clock.state(item, now);
        wtr.write_record([
            item.id.to_string(),
            item.name.clone(),
            item.category.clone(),
            item.purchase_date.to_string(),
            state.expiration_date.to_string(),
            state.days_remaining.to_string(),
            state.bucket.label().to_string(),
            item.purchase_price.map(|p| p.to_string()).unwrap_or_default(),
            item.store_name.clone().unwrap_or_default(),
            item.location.clone().unwrap_or_default(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn collections(args: CollectionsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let ws = Workspace::load(&args.source, config_path)?;
    let aggregator = ItemAggregator::from_config(&ws.config);
    let buckets = aggregator.smart_collections(ws.items(), ws.now);

    match args.format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&buckets)?),
        ReportFormat::Text => {
            for bucket in &buckets {
                println!("{} ({})", style(&bucket.title).bold(), bucket.len());
                for item in &bucket.items {
                    println!("  - {}", item.name);
                }
            }
        }
    }

    Ok(())
}

pub fn analytics(args: AnalyticsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let ws = Workspace::load(&args.source, config_path)?;
    let aggregator = ItemAggregator::from_config(&ws.config);
    let snapshot = aggregator.analytics(ws.items(), ws.now);
    let insights = aggregator.insights(&snapshot);

    match args.format {
        ReportFormat::Json => {
            let insights: Vec<_> = insights
                .iter()
                .map(|i| {
                    json!({
                        "severity": i.severity(),
                        "title": i.title(),
                        "message": i.message(),
                        "detail": i,
                    })
                })
                .collect();
            let report = json!({ "analytics": snapshot, "insights": insights });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ReportFormat::Text => print!("{}", format_analytics_text(&snapshot, &insights)),
    }

    Ok(())
}

fn format_analytics_text(snapshot: &AnalyticsSnapshot, insights: &[Insight]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", style("Overview").bold()));
    output.push_str(&format!("  Items:              {}\n", snapshot.total_items));
    output.push_str(&format!("  Total value:        {:.2}\n", snapshot.total_value));
    output.push_str(&format!("  Average value:      {:.2}\n", snapshot.average_value));
    output.push_str(&format!("  Highest value:      {:.2}\n", snapshot.highest_value));
    output.push_str(&format!("  Avg warranty:       {} months\n", snapshot.average_warranty_months));
    output.push_str(&format!("  Added this month:   {}\n", snapshot.added_this_month));
    output.push_str(&format!("  Added in 6 months:  {}\n", snapshot.added_last_six_months));
    output.push('\n');

    output.push_str(&format!("{}\n", style("Warranty status").bold()));
    output.push_str(&format!("  Active:             {}\n", snapshot.buckets.active));
    output.push_str(&format!("  Expiring soon:      {}\n", snapshot.buckets.expiring_soon));
    output.push_str(&format!("  Expired:            {}\n", snapshot.buckets.expired));
    output.push('\n');

    if !snapshot.category_histogram.is_empty() {
        output.push_str(&format!("{}\n", style("Categories").bold()));
        for entry in &snapshot.category_histogram {
            output.push_str(&format!("  {:<20}{}\n", entry.category, entry.count));
        }
        output.push('\n');
    }

    output.push_str(&format!("{}\n", style("Monthly purchases").bold()));
    for month in &snapshot.monthly_purchases {
        output.push_str(&format!("  {} {}  {}\n", month.label, month.year, month.count));
    }

    if !snapshot.top_value.is_empty() {
        output.push('\n');
        output.push_str(&format!("{}\n", style("Top value").bold()));
        for entry in &snapshot.top_value {
            output.push_str(&format!("  {:<30}{:.2}\n", entry.name, entry.price));
        }
    }

    if !insights.is_empty() {
        output.push('\n');
        output.push_str(&format!("{}\n", style("Insights").bold()));
        for insight in insights {
            output.push_str(&format!("  {}: {}\n", style(insight.title()).cyan(), insight.message()));
        }
    }

    output
}

pub fn alerts(args: AlertsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let ws = Workspace::load(&args.source, config_path)?;
    let scheduler = AlertScheduler::from_config(&ws.config.warranty);

    let horizon = match args.within {
        Some(days) => Some(
            TimeDelta::try_days(days)
                .and_then(|window| ws.now.date().checked_add_signed(window))
                .ok_or_else(|| anyhow::anyhow!("--within {} days is out of range", days))?,
        ),
        None => None,
    };

    let mut alerts = scheduler.upcoming(ws.items(), ws.now);
    if let Some(horizon) = horizon {
        alerts.retain(|alert| alert.fire_at <= horizon);
    }

    match args.format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&alerts)?),
        ReportFormat::Text => {
            if alerts.is_empty() {
                println!("{} No upcoming alerts.", style("ℹ").blue());
            }
            for alert in &alerts {
                println!(
                    "{}  {}  {}",
                    alert.fire_at,
                    style(&alert.title).bold(),
                    alert.body
                );
            }
        }
    }

    Ok(())
}

pub fn claim(args: ClaimArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let ws = Workspace::load(&args.source, config_path)?;

    let item = ws
        .snapshot
        .get(args.id)
        .ok_or_else(|| anyhow::anyhow!("No item with id {}", args.id))?;

    let state = WarrantyClock::from_config(&ws.config.warranty).state(item, ws.now);
    let letter = ClaimLetter::compose(item, args.reason, &args.description, &state);

    if letter.expired {
        eprintln!(
            "{} The warranty for '{}' expired on {}.",
            style("!").yellow(),
            item.name,
            state.expiration_date
        );
    }

    let output = match args.format {
        ReportFormat::Json => serde_json::to_string_pretty(&letter)?,
        ReportFormat::Text => format!(
            "To: {}\nSubject: {}\n\n{}\n",
            letter.recipient, letter.subject, letter.body
        ),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Claim written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    Ok(())
}

pub fn categories(args: CategoriesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let categories = CategoryCatalog::with_custom(config.catalog.custom_categories.clone());
    let tags = TagCatalog::with_custom(config.catalog.custom_tags.clone());

    match args.format {
        ReportFormat::Json => {
            let all: Vec<_> = categories.all().collect();
            let report = json!({ "categories": all, "tags": tags.all() });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ReportFormat::Text => {
            println!("{}", style("Categories").bold());
            for category in categories.all() {
                let marker = if category.is_custom { " (custom)" } else { "" };
                println!("  {:<20} {}{}", category.name, style(&category.icon).dim(), marker);
            }
            println!();
            println!("{}", style("Tags").bold());
            for tag in tags.all() {
                println!("  {}", tag);
            }
        }
    }

    Ok(())
}
