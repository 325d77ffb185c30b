use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span, warn};

use labfon_citation::{CitationFormatter, HtmlSanitizer, to_plain_text};
use labfon_model::{PublicationsDocument, SiteDocument};
use labfon_query::{Facet, FacetFilter, FacetIndex};
use labfon_render::site::PUBLICATIONS_REGION;
use labfon_render::{
    MemoryPreferences, PublicationsSection, RenderOutcome, SharedPreferences, Site, SkipReason,
    TomlPreferenceStore,
};

use crate::cli::{CiteArgs, FacetsArgs, PublicationsArgs, SiteArgs};
use crate::types::{ListingResult, ListingRow, SiteResult};

/// Opens the preference store at `path`, or at the default location.
/// Without a usable location the preferences live only for this run.
pub fn open_preferences(path: Option<&Path>) -> SharedPreferences {
    match path {
        Some(path) => SharedPreferences::new(TomlPreferenceStore::open(path)),
        None => match TomlPreferenceStore::open_default() {
            Ok(store) => SharedPreferences::new(store),
            Err(error) => {
                warn!("Preferences will not be saved: {error}");
                SharedPreferences::new(MemoryPreferences::new())
            }
        },
    }
}

pub fn run_site(args: &SiteArgs, preferences: SharedPreferences) -> Result<SiteResult> {
    let span = info_span!("site", data = %args.data.display());
    let _guard = span.enter();

    let document = SiteDocument::from_path(&args.data)
        .with_context(|| format!("load site data {}", args.data.display()))?;
    let mut site = Site::new(preferences);
    let report = site.render(&document);

    let publications = match &args.publications {
        Some(path) => {
            let document = load_publications(path)?;
            Some(site.render_publications(&document))
        }
        None => None,
    };

    let html = site.page().to_html().context("write page markup")?;
    if let Some(path) = &args.output {
        fs::write(path, &html).with_context(|| format!("write {}", path.display()))?;
        info!(output = %path.display(), "page written");
    }
    Ok(SiteResult {
        report,
        publications,
        output: args.output.clone(),
        html,
    })
}

pub fn run_publications(
    args: &PublicationsArgs,
    preferences: SharedPreferences,
) -> Result<ListingResult> {
    let span = info_span!("publications", document = %args.publications.display());
    let _guard = span.enter();

    let document = load_publications(&args.publications)?;
    let mut site = Site::new(preferences);
    let initial = site.render_publications(&document);
    // Nothing to query when the document held no records.
    let outcome = match site.update_publications(|section| apply_listing_args(section, args)) {
        RenderOutcome::Skipped(SkipReason::NotRendered) => initial,
        outcome => outcome,
    };

    let markup = site
        .page()
        .region(PUBLICATIONS_REGION)
        .map(|region| region.content().to_string())
        .unwrap_or_default();
    let announcement = site.page().announcer().last().map(str::to_string);
    let section = site.publications().template();
    let catalog = section.catalog();
    let window = catalog.window();
    let formatter = CitationFormatter::<HtmlSanitizer>::default();
    let rows = catalog
        .visible()
        .into_iter()
        .enumerate()
        .map(|(offset, publication)| ListingRow {
            position: window.start + offset + 1,
            id: publication.id.clone(),
            year: publication.year_facet_value(),
            kind: publication.type_label(),
            citation: to_plain_text(&formatter.short(publication)),
        })
        .collect();

    info!(
        matches = catalog.result_count(),
        page = window.current_page,
        pages = window.total_pages,
        "publications queried"
    );
    Ok(ListingResult {
        outcome,
        markup,
        announcement,
        headline: catalog.statistics().headline(),
        current_page: window.current_page,
        total_pages: window.total_pages,
        rows,
    })
}

/// Applies the query flags. The page is set last since every other
/// change returns to the first page.
fn apply_listing_args(section: &mut PublicationsSection, args: &PublicationsArgs) {
    if let Some(per_page) = args.per_page {
        section.set_items_per_page(per_page);
    }
    if let Some(view) = args.view {
        section.set_view_mode(view.into());
    }
    if let Some(text) = &args.search {
        section.set_search_text(text);
    }
    let facets = [
        (Facet::Year, &args.year),
        (Facet::Type, &args.kind),
        (Facet::Author, &args.author),
    ];
    for (facet, value) in facets {
        if let Some(value) = value {
            section.set_facet(facet, FacetFilter::value(value.as_str()));
        }
    }
    if let Some(sort) = args.sort {
        section.set_sort_key(sort.into());
    }
    section.set_page(args.page);
}

pub fn run_cite(args: &CiteArgs) -> Result<String> {
    let document = load_publications(&args.publications)?;
    let publications = document
        .publications()
        .context("decode publications")?;
    let publication = publications
        .iter()
        .find(|publication| publication.id == args.id)
        .ok_or_else(|| anyhow!("no publication with id `{}`", args.id))?;
    Ok(CitationFormatter::<HtmlSanitizer>::default().format(publication, args.style.into()))
}

pub fn run_facets(args: &FacetsArgs) -> Result<FacetIndex> {
    let document = load_publications(&args.publications)?;
    let publications = document
        .publications()
        .context("decode publications")?;
    Ok(FacetIndex::build(&publications))
}

fn load_publications(path: &Path) -> Result<PublicationsDocument> {
    PublicationsDocument::from_path(path)
        .with_context(|| format!("load publications {}", path.display()))
}
