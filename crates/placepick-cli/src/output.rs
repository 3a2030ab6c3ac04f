//! Plain-text rendering for command output.

use placepick_client::PlaceDetailView;
use placepick_core::place::format_distance;
use placepick_core::registry::{RADIUS_OPTIONS, REGIONS};
use placepick_core::{Category, PlaceResult};

/// Titles longer than this are cut with `...`.
const MAX_TITLE_CHARS: usize = 40;

pub(crate) fn configured(flag: bool) -> &'static str {
    if flag {
        "configured"
    } else {
        "not configured"
    }
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

/// One line per place plus an indented address line.
pub(crate) fn place_lines(index: usize, place: &PlaceResult) -> (String, String) {
    let tags = place.tags().join(" · ");
    let distance = place.distance.map(format_distance).unwrap_or_default();

    let mut headline = format!("{index:>3}. {}", truncate(&place.name, MAX_TITLE_CHARS));
    if !tags.is_empty() {
        headline.push_str(&format!("  [{tags}]"));
    }
    if !distance.is_empty() {
        headline.push_str(&format!("  {distance}"));
    }

    let mut detail = format!("     {}", place.short_address());
    if !place.phone.is_empty() {
        detail.push_str(&format!("  {}", place.phone));
    }
    (headline, detail)
}

pub(crate) fn print_place(index: usize, place: &PlaceResult) {
    let (headline, detail) = place_lines(index, place);
    println!("{headline}");
    println!("{detail}");
}

pub(crate) fn print_detail(detail: &PlaceDetailView) {
    println!("{}", detail.title);
    println!("image: {}", detail.hero_image);

    println!();
    if detail.blogs.is_empty() {
        println!("no blog reviews found");
    } else {
        println!("{:<12}{:<18}TITLE", "DATE", "BLOGGER");
        for blog in &detail.blogs {
            println!(
                "{:<12}{:<18}{}",
                blog.postdate,
                truncate(&blog.bloggername, 16),
                truncate(&blog.title, MAX_TITLE_CHARS)
            );
            println!("{:<30}{}", "", blog.link);
        }
    }

    if !detail.images.is_empty() {
        println!();
        println!("photos:");
        for image in &detail.images {
            println!("  {}", image.link);
        }
    }
}

pub(crate) fn print_categories() {
    for category in Category::ALL {
        let entry = category.entry();
        println!("{category} ({}, {})", entry.label, entry.provider_code);
        let subs: Vec<&str> = entry.sub_filters.iter().map(|sf| sf.keyword).collect();
        println!("  sub-filters: {}", subs.join(", "));
    }
    println!();
    println!("regions: {}", REGIONS.join(", "));
    let radii: Vec<&str> = RADIUS_OPTIONS.iter().map(|opt| opt.label).collect();
    println!("radius:  {}", radii.join(", "));
}
