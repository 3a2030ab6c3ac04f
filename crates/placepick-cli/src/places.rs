//! Command handlers that talk to a placepick server.

use placepick_client::{Geolocator, LoadPhase, PaginationController, PlacepickClient, StaticLocation};
use placepick_core::registry::is_known_region;
use placepick_core::{Category, Coords, FilterAction, FilterState, LocationMode, SortOrder};

use crate::output;

/// `--x`/`--y`/`--radius` as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct LocationFlags {
    pub x: Option<String>,
    pub y: Option<String>,
    pub radius: Option<u32>,
}

#[derive(Debug, Clone)]
pub(crate) struct BrowseOptions {
    pub region: Option<String>,
    pub sub: Option<String>,
    pub sort: String,
    pub size: u32,
    pub pages: u32,
    pub location: LocationFlags,
}

/// Resolves explicit coordinates through the same geolocation path a device
/// fix would take. `None` when no coordinates were given.
async fn resolve_coords(flags: &LocationFlags) -> anyhow::Result<Option<Coords>> {
    let (Some(x), Some(y)) = (flags.x.as_deref(), flags.y.as_deref()) else {
        return Ok(None);
    };
    let coords = Coords::parse(x, y)
        .ok_or_else(|| anyhow::anyhow!("invalid coordinates: x={x} y={y}"))?;
    let geolocator = Geolocator::new(StaticLocation::at(coords));
    Ok(Some(geolocator.current_position().await?))
}

fn warn_unknown_region(region: &str) {
    if !is_known_region(region) {
        tracing::warn!(region, "region is not one of the offered regions; searching anyway");
    }
}

/// Folds command-line flags into a filter the way the filter sheet would.
pub(crate) async fn browse_filter(
    category: Category,
    opts: &BrowseOptions,
) -> anyhow::Result<FilterState> {
    let mut filter = FilterState::new(category).apply(FilterAction::SetSize(opts.size));

    if let Some(region) = opts.region.as_deref() {
        warn_unknown_region(region);
        filter = filter.apply(FilterAction::SetRegion(Some(region.to_string())));
    } else if let Some(coords) = resolve_coords(&opts.location).await? {
        filter = filter
            .apply(FilterAction::UseMyLocation(coords))
            .apply(FilterAction::SetRadius(opts.location.radius));
    }

    let sort = SortOrder::from_param(Some(opts.sort.as_str()));
    if sort == SortOrder::Distance && !filter.location.uses_my_location() {
        tracing::warn!("distance sort needs --x/--y; using accuracy");
    }

    Ok(filter
        .apply(FilterAction::SetSubFilter(opts.sub.clone()))
        .apply(FilterAction::SetSort(sort)))
}

/// Loads the first page, then keeps loading more until `pages` pages have
/// been shown or the listing ends.
pub(crate) async fn run_browse(
    client: &PlacepickClient,
    category: Category,
    opts: &BrowseOptions,
) -> anyhow::Result<()> {
    let filter = browse_filter(category, opts).await?;
    let mut ctrl = PaginationController::new();
    let mut ticket = ctrl.load(filter);
    let mut shown = 0;
    let mut remaining = opts.pages.max(1);

    loop {
        let result = client.fetch_page(&ticket).await;
        ctrl.resolve(&ticket, result);

        if ctrl.phase() == LoadPhase::Error {
            let message = ctrl.error().unwrap_or("unknown error").to_string();
            if !ctrl.is_partial_error() {
                anyhow::bail!("failed to load {}: {message}", category.label());
            }
            eprintln!("stopped after page {}: {message}", ctrl.page());
            break;
        }

        for (index, place) in ctrl.items().iter().enumerate().skip(shown) {
            output::print_place(index + 1, place);
        }
        shown = ctrl.items().len();

        remaining -= 1;
        if remaining == 0 {
            break;
        }
        match ctrl.load_more() {
            Some(next) => ticket = next,
            None => break,
        }
    }

    if shown == 0 {
        println!("no places found");
    } else {
        println!(
            "showing {shown} of {} {}",
            ctrl.total(),
            if ctrl.is_end() { "(end of results)" } else { "(more available)" }
        );
    }
    Ok(())
}

pub(crate) async fn run_search(
    client: &PlacepickClient,
    query: &str,
    page: u32,
    size: u32,
) -> anyhow::Result<()> {
    let result = client.search(query, page, size).await?;
    if result.documents.is_empty() {
        println!("no places matched '{query}'");
        return Ok(());
    }
    let offset = (page.max(1) as usize - 1) * size as usize;
    for (index, place) in result.documents.iter().enumerate() {
        output::print_place(offset + index + 1, place);
    }
    println!("{} matches", result.meta.total_count);
    Ok(())
}

pub(crate) async fn run_featured(
    client: &PlacepickClient,
    naver: bool,
    region: Option<&str>,
    location: &LocationFlags,
) -> anyhow::Result<()> {
    if let Some(region) = region {
        warn_unknown_region(region);
    }

    let featured = if naver {
        if location.x.is_some() {
            tracing::warn!("Naver featured ignores coordinates");
        }
        client.naver_featured(region).await?
    } else {
        let mode = match (region, resolve_coords(location).await?) {
            (Some(region), _) => LocationMode::ByRegion(region.to_string()),
            (None, Some(coords)) => LocationMode::ByCoordinates {
                coords,
                radius: location.radius,
            },
            (None, None) => LocationMode::Unfiltered,
        };
        client.featured(&mode).await?
    };

    println!("{}", featured.category.label());
    output::print_place(1, &featured.place);
    if let Some(thumbnail) = &featured.place.thumbnail {
        println!("   {thumbnail}");
    }
    Ok(())
}

pub(crate) async fn run_detail(
    client: &PlacepickClient,
    category: Category,
    title: &str,
    thumbnail: Option<&str>,
) -> anyhow::Result<()> {
    let detail = client.detail(category, title, thumbnail).await?;
    output::print_detail(&detail);
    Ok(())
}

pub(crate) async fn run_health(client: &PlacepickClient) -> anyhow::Result<()> {
    let health = client.health().await?;
    println!("server: {} ({})", client.base_url(), health.status);
    println!("kakao:  {}", output::configured(health.kakao));
    println!("naver:  {}", output::configured(health.naver));
    Ok(())
}
