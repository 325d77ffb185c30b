//! Section templates rendered through the view renderer.

use labfon_query::{Facet, FacetFilter, SortKey};
use labfon_render::sections::publications::{
    FILTERED_EMPTY_MESSAGE, ITEMS_PER_PAGE_KEY, VIEW_MODE_KEY,
};
use labfon_render::{
    ClipboardError, MemoryClipboard, MemoryPreferences, NotificationKind, Page,
    PartnershipsSection, PeopleSection, PeopleViewMode, PreferenceStore, PublicationViewMode,
    PublicationsSection, RenderOutcome, RenderStatus, ResearchLinesSection, SharedPreferences,
    SkipReason, ViewRenderer,
};
use serde_json::{Value, json};

const REGION: &str = "region";

fn page() -> Page {
    Page::new("Teste").with_region(REGION, None)
}

fn content(page: &Page) -> &str {
    page.region(REGION).unwrap().content()
}

/// Twelve articles, three per year from 2020 to 2023.
fn twelve_publications() -> Value {
    Value::Array(
        (0..12)
            .map(|i| {
                json!({
                    "id": format!("p{i}"),
                    "title": format!("Estudo {i}"),
                    "type": "article-journal",
                    "authors": [{"family_name": "Silva", "given_name": "Ana"}],
                    "container": {"title": "Revista de Letras"},
                    "imprint": {"date": 2020 + i / 3},
                    "access": {"url": "https://example.org/p"}
                })
            })
            .collect(),
    )
}

fn publications_renderer(
    preferences: &SharedPreferences,
) -> ViewRenderer<PublicationsSection> {
    ViewRenderer::new(
        REGION,
        PublicationsSection::new(Box::new(preferences.clone())),
    )
}

#[test]
fn test_publications_first_page() {
    let preferences = SharedPreferences::new(MemoryPreferences::new());
    let mut page = page();
    let mut renderer = publications_renderer(&preferences);

    let outcome = renderer.render(&mut page, Some(&twelve_publications()));

    assert_eq!(outcome, RenderOutcome::Rendered);
    let html = content(&page);
    assert_eq!(html.matches(r#"<article class="publication-card""#).count(), 10);
    assert_eq!(html.matches(r#"<section class="year-group">"#).count(), 4);
    assert!(html.contains(r#"<span class="stat-item">Exibindo 12 publicações</span>"#));
    assert!(html.contains(r#"<span class="stat-breakdown">Artigo: 12</span>"#));
    assert!(html.contains(r#"data-page="2""#));
    assert!(html.contains(r#"<option value="year-desc" selected="selected">Ano (mais recente)</option>"#));
    assert_eq!(page.announcer().last(), Some("12 publicações encontradas"));
}

#[test]
fn test_second_page_holds_remaining_items() {
    let preferences = SharedPreferences::new(MemoryPreferences::new());
    let mut page = page();
    let mut renderer = publications_renderer(&preferences);
    renderer.render(&mut page, Some(&twelve_publications()));

    let outcome = renderer.update(&mut page, |section| section.set_page(2));

    assert_eq!(outcome, RenderOutcome::Rendered);
    let html = content(&page);
    assert_eq!(html.matches(r#"<article class="publication-card""#).count(), 2);
    assert!(html.contains(r#"data-index="10""#));
    assert!(html.contains(r#"<h3 class="year-heading">2020</h3>"#));
}

#[test]
fn test_zero_matches_show_empty_state() {
    let preferences = SharedPreferences::new(MemoryPreferences::new());
    let mut page = page();
    let mut renderer = publications_renderer(&preferences);
    renderer.render(&mut page, Some(&twelve_publications()));

    let outcome = renderer.update(&mut page, |section| section.set_search_text("fonética"));

    assert_eq!(outcome, RenderOutcome::Empty);
    assert_eq!(page.region(REGION).unwrap().status(), RenderStatus::Empty);
    assert!(content(&page).contains(FILTERED_EMPTY_MESSAGE));
    assert_eq!(page.announcer().last(), Some("Nenhuma publicação encontrada"));

    let outcome = renderer.update(&mut page, |section| section.reset_filters());
    assert_eq!(outcome, RenderOutcome::Rendered);
}

#[test]
fn test_malformed_fields_degrade_without_failing_the_listing() {
    let preferences = SharedPreferences::new(MemoryPreferences::new());
    let mut page = page();
    let mut renderer = publications_renderer(&preferences);

    let data = json!([
        {"id": "a", "title": "Estudo válido"},
        {"id": "b", "title": "Autores soltos", "authors": "Silva"},
        {"id": "c", "title": "Tipo numérico", "type": 5},
        {"id": 7, "title": "Identificador numérico"},
        {"id": "d", "title": "Revista solta", "container": "Revista", "imprint": 2020}
    ]);
    let outcome = renderer.render(&mut page, Some(&data));

    assert_eq!(outcome, RenderOutcome::Rendered);
    let html = content(&page);
    assert_eq!(html.matches(r#"<article class="publication-card""#).count(), 5);
    assert!(html.contains("Estudo válido"));
    assert!(html.contains(r#"data-pub-id="7""#));
    let section = renderer.template();
    assert!(section.find("b").unwrap().authors.is_empty());
    assert_eq!(section.find("c").unwrap().kind, None);
    assert_eq!(section.find("c").unwrap().type_label(), "Publicação");
    assert_eq!(section.find("d").unwrap().container.title, None);
    assert_eq!(section.find("d").unwrap().year(), None);
}

#[test]
fn test_replacing_with_empty_input_resets_listing_state() {
    let preferences = SharedPreferences::new(MemoryPreferences::new());
    let mut page = page();
    let mut renderer = publications_renderer(&preferences);
    renderer.render(&mut page, Some(&twelve_publications()));
    renderer.update(&mut page, |section| {
        section.set_search_text("Estudo");
        section.set_page(2);
    });

    assert_eq!(renderer.render(&mut page, Some(&json!([]))), RenderOutcome::Empty);
    assert_eq!(
        renderer.update(&mut page, |section| section.set_page(1)),
        RenderOutcome::Skipped(SkipReason::NotRendered)
    );

    let catalog = renderer.template().catalog();
    assert!(catalog.records().is_empty());
    assert_eq!(catalog.query().search_text(), "");
    assert_eq!(catalog.window().current_page, 1);
    assert!(!content(&page).contains("Estudo"));
}

#[test]
fn test_facet_and_sort_changes() {
    let preferences = SharedPreferences::new(MemoryPreferences::new());
    let mut page = page();
    let mut renderer = publications_renderer(&preferences);
    renderer.render(&mut page, Some(&twelve_publications()));

    renderer.update(&mut page, |section| {
        section.set_facet(Facet::Year, FacetFilter::value("2021"));
        section.set_sort_key(SortKey::TitleAsc);
    });

    let html = content(&page);
    assert_eq!(html.matches(r#"<article class="publication-card""#).count(), 3);
    assert!(!html.contains("year-group"));
    assert!(html.contains("Ano: 2021"));
    assert!(html.contains(r#"aria-label="Remover filtro Ano: 2021""#));
    assert!(html.contains("Exibindo 3 de 12 publicações"));
    assert_eq!(page.announcer().last(), Some("3 publicações encontradas"));
}

#[test]
fn test_view_mode_is_read_persisted_and_announced() {
    let mut store = MemoryPreferences::new();
    store.set(VIEW_MODE_KEY, "compact").unwrap();
    store.set(ITEMS_PER_PAGE_KEY, "20").unwrap();
    let preferences = SharedPreferences::new(store);
    let mut page = page();
    let mut renderer = publications_renderer(&preferences);

    assert_eq!(renderer.template().view_mode(), PublicationViewMode::Compact);
    assert_eq!(
        renderer.template().catalog().page_state().items_per_page(),
        20
    );

    renderer.render(&mut page, Some(&twelve_publications()));
    assert!(content(&page).contains("view-compact"));
    assert!(content(&page).contains(r#"<p class="pub-citation">SILVA. Estudo 11. 2023.</p>"#));

    renderer.update(&mut page, |section| {
        section.set_view_mode(PublicationViewMode::Detailed);
    });
    assert!(content(&page).contains("view-detailed"));
    assert_eq!(page.announcer().last(), Some("Visualização detalhada ativada"));
    assert_eq!(preferences.get(VIEW_MODE_KEY).as_deref(), Some("detailed"));
}

#[test]
fn test_invalid_stored_preferences_fall_back() {
    let mut store = MemoryPreferences::new();
    store.set(VIEW_MODE_KEY, "grid").unwrap();
    store.set(ITEMS_PER_PAGE_KEY, "0").unwrap();
    let section = PublicationsSection::new(Box::new(store));

    assert_eq!(section.view_mode(), PublicationViewMode::Detailed);
    assert_eq!(section.catalog().page_state().items_per_page(), 10);
}

#[test]
fn test_items_per_page_is_persisted() {
    let preferences = SharedPreferences::new(MemoryPreferences::new());
    let mut section = PublicationsSection::new(Box::new(preferences.clone()));

    section.set_items_per_page(50);

    assert_eq!(preferences.get(ITEMS_PER_PAGE_KEY).as_deref(), Some("50"));
}

#[test]
fn test_copy_citation_notifies_without_touching_render_state() {
    let preferences = SharedPreferences::new(MemoryPreferences::new());
    let mut page = page();
    let mut renderer = publications_renderer(&preferences);
    renderer.render(&mut page, Some(&twelve_publications()));
    let before = content(&page).to_string();

    let section = renderer.template();
    let publication = section.find("p0").unwrap();

    let mut clipboard = MemoryClipboard::new();
    section
        .copy_citation(publication, &mut clipboard, page.notifier_mut())
        .unwrap();
    assert_eq!(
        clipboard.contents(),
        Some("SILVA, Ana. Estudo 0. Revista de Letras, 2020.")
    );
    let notification = page.notifier().last().unwrap();
    assert_eq!(notification.message, "Citação copiada!");
    assert_eq!(notification.kind, NotificationKind::Success);

    let mut broken = MemoryClipboard::failing(ClipboardError::Unavailable);
    let result = section.export_bibtex(publication, &mut broken, page.notifier_mut());
    assert_eq!(result, Err(ClipboardError::Unavailable));
    let notification = page.notifier().last().unwrap();
    assert_eq!(notification.message, "Erro ao copiar BibTeX");
    assert_eq!(notification.kind, NotificationKind::Error);

    assert_eq!(content(&page), before);
    assert_eq!(page.region(REGION).unwrap().status(), RenderStatus::Rendered);
}

#[test]
fn test_people_card() {
    let mut page = page();
    let mut renderer = ViewRenderer::new(
        REGION,
        PeopleSection::new(Box::new(MemoryPreferences::new())),
    );
    let data = json!([{
        "nome": "Ana Souza",
        "cargo": "Docente",
        "email": "ana@ufrj.br",
        "bio": "Fonética experimental.",
        "lattes": "http://lattes.cnpq.br/123",
        "categoria": "docentes"
    }]);

    assert_eq!(renderer.render(&mut page, Some(&data)), RenderOutcome::Rendered);
    insta::assert_snapshot!(
        content(&page),
        @r#"<section id="categoria-docentes" class="categoria-section"><div class="pesquisadores-grid view-grid"><article class="pesquisador-card" role="article" aria-label="Pesquisador: Ana Souza"><figure class="pesquisador-foto"><img src="assets/images/placeholder-avatar.jpg" alt="Foto de Ana Souza" loading="lazy"/></figure><div class="pesquisador-content"><header class="pesquisador-header"><h3 class="pesquisador-nome">Ana Souza</h3><span class="pesquisador-cargo">Docente</span></header><p class="pesquisador-bio">Fonética experimental.</p><div class="pesquisador-links"><a href="http://lattes.cnpq.br/123" target="_blank" rel="noopener noreferrer" class="btn btn-secondary" aria-label="Currículo Lattes de Ana Souza">Currículo Lattes</a><a href="mailto:ana@ufrj.br" class="btn btn-secondary" aria-label="Email de Ana Souza">Email</a></div></div></article></div></section>"#
    );
    assert_eq!(page.announcer().last(), Some("Um pesquisador carregado"));
}

#[test]
fn test_people_degrade_and_group() {
    let mut page = page();
    let mut renderer = ViewRenderer::new(
        REGION,
        PeopleSection::new(Box::new(MemoryPreferences::new())),
    );
    let long_bio = "a".repeat(200);
    let data = json!([
        {"nome": "Bia", "categoria": "egressos", "lattes": "javascript:alert(1)"},
        {"categoria": "coordenacao", "bio": long_bio},
    ]);

    renderer.render(&mut page, Some(&data));

    let html = content(&page);
    let coordination = html.find("categoria-coordenacao").unwrap();
    let alumni = html.find("categoria-egressos").unwrap();
    assert!(coordination < alumni);
    assert!(html.contains("Nome não informado"));
    assert!(html.contains(&format!("{}...", "a".repeat(150))));
    assert!(!html.contains("javascript:"));
    assert_eq!(page.announcer().last(), Some("2 pesquisadores carregados"));
}

#[test]
fn test_people_view_mode_persists() {
    let preferences = SharedPreferences::new(MemoryPreferences::new());
    let mut section = PeopleSection::new(Box::new(preferences.clone()));
    assert_eq!(section.view_mode(), PeopleViewMode::Grid);

    section.set_view_mode(PeopleViewMode::List);

    assert_eq!(preferences.get("people-view-mode").as_deref(), Some("list"));
    let reopened = PeopleSection::new(Box::new(preferences));
    assert_eq!(reopened.view_mode(), PeopleViewMode::List);
}

#[test]
fn test_research_line_card() {
    let mut page = page();
    let mut renderer = ViewRenderer::new(REGION, ResearchLinesSection::new());
    let data = json!([
        {"nome": "Prosódia", "descricao": "Estudo da entoação", "estudantes": 1, "pesquisadores": 3, "ordem": 1},
        {"nome": "Variação", "descricao": "[Descrição pendente]", "ordem": 2},
    ]);

    renderer.render(&mut page, Some(&data));

    let html = content(&page);
    insta::assert_snapshot!(
        &html[..html.find(r#"<div class="research-line"><div class="research-line-icon"><i class="fa-solid fa-flask" aria-hidden="true"></i></div><div class="research-line-content"><div class="research-line-header"><h3 class="research-line-title">Variação"#).unwrap()],
        @r#"<div class="research-line"><div class="research-line-icon"><i class="fa-solid fa-flask" aria-hidden="true"></i></div><div class="research-line-content"><div class="research-line-header"><h3 class="research-line-title">Prosódia</h3></div><p class="research-line-description">Estudo da entoação</p></div><div class="research-line-stats"><div class="research-stat"><div class="research-stat-number">1</div><div class="research-stat-label">Estudante</div></div><div class="research-stat"><div class="research-stat-number">3</div><div class="research-stat-label">Pesquisadores</div></div></div></div>"#
    );
    assert!(!html.contains("Descrição pendente"));
    assert!(html.contains(r#"<div class="research-stat-number">0</div><div class="research-stat-label">Estudantes</div>"#));
}

#[test]
fn test_partnership_cards() {
    let mut page = page();
    let mut renderer = ViewRenderer::new(REGION, PartnershipsSection::new());
    let data = json!([
        {
            "nome": "Universidade Federal do Rio de Janeiro",
            "sigla": "UFRJ",
            "localizacao": "Rio de Janeiro, RJ",
            "tipo": "universidade",
            "url": "https://ufrj.br"
        },
        {"nome": "Grupo Local", "tipo": null, "url": "javascript:alert(1)"}
    ]);

    renderer.render(&mut page, Some(&data));

    let html = content(&page);
    let split = html.find(r#"<article class="parceria-card" data-tipo="parceria">"#).unwrap();
    insta::assert_snapshot!(
        &html[..split],
        @r#"<article class="parceria-card" data-tipo="universidade" data-tipo-label="Instituição de Ensino"><div class="parceria-header"><div class="parceria-name-wrapper"><h3 class="parceria-nome">Universidade Federal do Rio de Janeiro</h3><span class="parceria-sigla">UFRJ</span></div><p class="parceria-localizacao"><i class="fa-solid fa-location-dot" aria-hidden="true"></i> Rio de Janeiro, RJ</p></div><div class="parceria-link-wrapper"><a class="parceria-link" href="https://ufrj.br/" target="_blank" rel="noopener noreferrer" aria-label="Visitar website de Universidade Federal do Rio de Janeiro">Visitar website <i class="fa-solid fa-arrow-up-right-from-square" aria-hidden="true"></i></a></div></article>"#
    );
    assert!(!html[split..].contains("parceria-link"));
    assert_eq!(page.announcer().last(), Some("2 parcerias carregadas"));
}
