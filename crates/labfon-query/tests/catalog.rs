//! Integration tests for the publication catalog state machine.

use labfon_model::{Publication, PublicationType};
use labfon_query::{
    Facet, FacetFilter, FilterKind, PageMarker, PublicationCatalog, QueryState, SortKey,
    filter_and_sort,
};

/// Twelve publications, three per year from 2020 to 2023, in ascending order.
fn twelve_by_year() -> Vec<Publication> {
    (0..12)
        .map(|i| {
            let year = 2020 + i / 3;
            Publication::new(format!("p{i}"), format!("Estudo {i}"))
                .with_year(year)
                .with_kind(PublicationType::ArticleJournal)
                .with_author("Silva", "Ana")
        })
        .collect()
}

fn sample() -> Vec<Publication> {
    vec![
        Publication::new("a", "Análise fonética do português")
            .with_year(2021)
            .with_kind(PublicationType::ArticleJournal)
            .with_author("Souza", "Carla")
            .with_container("Revista de Letras"),
        Publication::new("b", "Prosódia e entonação")
            .with_year(2019)
            .with_kind(PublicationType::MasterThesis)
            .with_author("Álvares", "Bruno"),
        Publication::new("c", "Vogais médias")
            .with_kind(PublicationType::Chapter)
            .with_author("Alves", "Diego")
            .with_author("Souza", "Carla"),
        Publication::new("d", "Ritmo da fala").with_year(2021),
    ]
}

fn ids<'a>(items: impl IntoIterator<Item = &'a Publication>) -> Vec<&'a str> {
    items.into_iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn test_year_desc_pagination_scenario() {
    let catalog = PublicationCatalog::new(twelve_by_year(), 10);

    let window = catalog.window();
    assert_eq!(window.total_pages, 2);
    assert_eq!(catalog.visible().len(), 10);

    let groups = catalog.year_groups().unwrap();
    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["2023", "2022", "2021", "2020"]);
    let sizes: Vec<usize> = groups.iter().map(|g| g.items.len()).collect();
    assert_eq!(sizes, vec![3, 3, 3, 1]);
}

#[test]
fn test_second_page_continues_partial_group() {
    let mut catalog = PublicationCatalog::new(twelve_by_year(), 10);
    catalog.set_page(2);

    let groups = catalog.year_groups().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, "2020");
    assert_eq!(groups[0].items.len(), 2);
}

#[test]
fn test_year_groups_only_for_year_sorts() {
    let mut catalog = PublicationCatalog::new(twelve_by_year(), 10);
    catalog.set_sort_key(SortKey::TitleAsc);
    assert!(catalog.year_groups().is_none());
}

#[test]
fn test_query_changes_reset_page() {
    let mut catalog = PublicationCatalog::new(twelve_by_year(), 5);
    catalog.set_page(3);
    assert_eq!(catalog.page_state().current_page(), 3);

    catalog.set_sort_key(SortKey::YearAsc);
    assert_eq!(catalog.page_state().current_page(), 1);

    catalog.set_page(2);
    catalog.set_search_text("estudo");
    assert_eq!(catalog.page_state().current_page(), 1);

    catalog.set_page(2);
    catalog.set_facet(Facet::Author, FacetFilter::value("Silva"));
    assert_eq!(catalog.page_state().current_page(), 1);

    catalog.set_page(2);
    catalog.set_items_per_page(20);
    assert_eq!(catalog.page_state().current_page(), 1);
}

#[test]
fn test_set_page_keeps_query() {
    let mut catalog = PublicationCatalog::new(twelve_by_year(), 5);
    catalog.set_search_text("estudo");
    catalog.set_sort_key(SortKey::YearAsc);
    let before = catalog.query().clone();

    catalog.set_page(3);
    assert_eq!(catalog.query(), &before);
    assert_eq!(catalog.page_state().current_page(), 3);
}

#[test]
fn test_set_page_clamps() {
    let mut catalog = PublicationCatalog::new(twelve_by_year(), 5);
    catalog.set_page(99);
    assert_eq!(catalog.page_state().current_page(), 3);
    catalog.set_page(0);
    assert_eq!(catalog.page_state().current_page(), 1);
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let mut catalog = PublicationCatalog::new(sample(), 10);
    catalog.set_search_text("  FONÉTICA ");
    assert_eq!(ids(catalog.results()), vec!["a"]);

    catalog.set_search_text("revista de letras");
    assert_eq!(ids(catalog.results()), vec!["a"]);

    // Author display names are searched in "SURNAME, Given" form.
    catalog.set_search_text("souza, carla");
    assert_eq!(ids(catalog.results()), vec!["a", "c"]);
}

#[test]
fn test_search_without_matches_is_empty() {
    let mut catalog = PublicationCatalog::new(sample(), 10);
    catalog.set_search_text("fonologia gerativa");
    assert_eq!(catalog.result_count(), 0);
    assert!(catalog.visible().is_empty());
    assert_eq!(catalog.window().total_pages, 1);
}

#[test]
fn test_facets_combine_with_and() {
    let mut catalog = PublicationCatalog::new(sample(), 10);
    catalog.set_facet(Facet::Author, FacetFilter::value("Souza"));
    assert_eq!(ids(catalog.results()), vec!["a", "c"]);

    catalog.set_facet(Facet::Type, FacetFilter::value("chapter"));
    assert_eq!(ids(catalog.results()), vec!["c"]);

    catalog.set_facet(Facet::Year, FacetFilter::value("2021"));
    assert!(ids(catalog.results()).is_empty());
}

#[test]
fn test_year_facet_matches_no_date_sentinel() {
    let mut catalog = PublicationCatalog::new(sample(), 10);
    catalog.set_facet(Facet::Year, FacetFilter::value("sem data"));
    assert_eq!(ids(catalog.results()), vec!["c"]);
}

#[test]
fn test_facet_index_ignores_filters() {
    let mut catalog = PublicationCatalog::new(sample(), 10);
    let before = catalog.facets().clone();
    catalog.set_facet(Facet::Type, FacetFilter::value("chapter"));
    assert_eq!(catalog.facets(), &before);
    assert_eq!(before.years(), ["2021", "2019", "sem data"]);
}

#[test]
fn test_sort_orders() {
    let records = sample();

    let query = QueryState::new().with_sort(SortKey::YearDesc);
    assert_eq!(ids(filter_and_sort(&records, &query)), vec!["a", "d", "b", "c"]);

    let query = QueryState::new().with_sort(SortKey::YearAsc);
    assert_eq!(ids(filter_and_sort(&records, &query)), vec!["c", "b", "a", "d"]);

    // Missing surname sorts as the empty string.
    let query = QueryState::new().with_sort(SortKey::AuthorAsc);
    assert_eq!(ids(filter_and_sort(&records, &query)), vec!["d", "b", "c", "a"]);

    let query = QueryState::new().with_sort(SortKey::TitleAsc);
    assert_eq!(ids(filter_and_sort(&records, &query)), vec!["a", "b", "d", "c"]);

    // Artigo < Capítulo de livro < Dissertação < Publicação
    let query = QueryState::new().with_sort(SortKey::Type);
    assert_eq!(ids(filter_and_sort(&records, &query)), vec!["a", "c", "b", "d"]);
}

#[test]
fn test_reset_filters_keeps_sort() {
    let mut catalog = PublicationCatalog::new(sample(), 10);
    catalog.set_sort_key(SortKey::TitleAsc);
    catalog.set_search_text("vogais");
    catalog.set_facet(Facet::Type, FacetFilter::value("chapter"));

    catalog.reset_filters();
    assert!(!catalog.query().has_filters());
    assert_eq!(catalog.query().sort_key(), SortKey::TitleAsc);
    assert_eq!(catalog.result_count(), 4);
}

#[test]
fn test_replace_records_resets_query() {
    let mut catalog = PublicationCatalog::new(sample(), 20);
    catalog.set_sort_key(SortKey::TitleAsc);
    catalog.set_search_text("vogais");

    catalog.replace_records(twelve_by_year());
    assert_eq!(catalog.query(), &QueryState::default());
    assert_eq!(catalog.page_state().items_per_page(), 20);
    assert_eq!(catalog.result_count(), 12);
}

#[test]
fn test_statistics() {
    let mut catalog = PublicationCatalog::new(sample(), 10);
    let stats = catalog.statistics();
    assert_eq!(stats.headline(), "Exibindo 4 publicações");
    assert_eq!(
        stats.breakdown_text().as_deref(),
        Some("Artigo: 1 | Publicação: 1 | Dissertação: 1 | Capítulo de livro: 1")
    );

    catalog.set_facet(Facet::Type, FacetFilter::value("chapter"));
    let stats = catalog.statistics();
    assert_eq!(stats.headline(), "Exibindo 1 de 4 publicação");
    assert_eq!(stats.breakdown, None);
}

#[test]
fn test_active_filters() {
    let mut catalog = PublicationCatalog::new(sample(), 10);
    assert!(catalog.active_filters().is_empty());

    catalog.set_search_text("vogais");
    catalog.set_facet(Facet::Type, FacetFilter::value("chapter"));
    let texts: Vec<String> = catalog.active_filters().iter().map(|f| f.text()).collect();
    assert_eq!(texts, vec!["Busca: \"vogais\"", "Tipo: Capítulo de livro"]);

    catalog.remove_filter(FilterKind::Search);
    assert_eq!(catalog.active_filters().len(), 1);
    assert_eq!(catalog.query().search_text(), "");
}

#[test]
fn test_page_numbers_follow_window() {
    let records: Vec<Publication> = (0..100)
        .map(|i| Publication::new(format!("p{i}"), "T").with_year(2000))
        .collect();
    let mut catalog = PublicationCatalog::new(records, 10);
    catalog.set_page(5);
    assert_eq!(
        catalog.page_numbers(),
        vec![
            PageMarker::Page(1),
            PageMarker::Ellipsis,
            PageMarker::Page(4),
            PageMarker::Page(5),
            PageMarker::Page(6),
            PageMarker::Ellipsis,
            PageMarker::Page(10),
        ]
    );
}
