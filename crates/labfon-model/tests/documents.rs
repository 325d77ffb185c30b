//! Integration tests for document loading and lenient record decoding.

use std::io::Write;

use labfon_model::{
    ModelError, Publication, PublicationType, PublicationsDocument, ResearchLine, SectionKey,
    SiteDocument, TeamMember, decode_records,
};

const PUBLICATIONS: &str = r#"{
  "references": [
    {
      "id": "silva2021",
      "title": "Vogais nasais no português",
      "type": "article-journal",
      "authors": [{"family_name": "Silva", "given_name": "Maria"}],
      "container": {"title": "Revista de Fonética", "volume": 12, "issue": "2"},
      "imprint": {"date": "2021"},
      "page_range": "10-25",
      "access": {"url": "https://example.org/silva"}
    },
    {
      "id": "bare",
      "title": null,
      "authors": null,
      "container": null,
      "imprint": {"date": "sem data"}
    }
  ]
}"#;

#[test]
fn test_publications_document_decodes_records() {
    let document = PublicationsDocument::from_json_str(PUBLICATIONS).unwrap();
    let publications = document.publications().unwrap();

    assert_eq!(publications.len(), 2);
    let first = &publications[0];
    assert_eq!(first.kind, Some(PublicationType::ArticleJournal));
    assert_eq!(first.year(), Some(2021));
    assert_eq!(first.container.volume.as_deref(), Some("12"));
    assert_eq!(first.access.url.as_deref(), Some("https://example.org/silva"));
}

#[test]
fn test_missing_fields_degrade_to_defaults() {
    let document = PublicationsDocument::from_json_str(PUBLICATIONS).unwrap();
    let bare: &Publication = &document.publications().unwrap()[1];

    assert_eq!(bare.title, None);
    assert!(bare.authors.is_empty());
    assert_eq!(bare.kind, None);
    assert_eq!(bare.year(), None);
    assert_eq!(bare.sort_year(), 0);
    assert_eq!(bare.year_facet_value(), "sem data");
    assert_eq!(bare.type_label(), "Publicação");
}

#[test]
fn test_wrong_field_types_degrade_to_defaults() {
    let document = PublicationsDocument::from_json_str(
        r#"{"references": [
            {"id": "a", "title": "Ok"},
            {"id": "b", "title": "T", "authors": "Silva"},
            {"id": "c", "title": "T", "type": 5},
            {"id": 7, "title": "T"},
            {"id": "d", "title": "T", "container": "Revista", "access": ["x"],
             "authors": [{"family_name": "Lima"}, "Souza"]}
        ]}"#,
    )
    .unwrap();
    let publications = document.publications().unwrap();

    assert_eq!(publications.len(), 5);
    assert!(publications[1].authors.is_empty());
    assert_eq!(publications[2].kind, None);
    assert_eq!(publications[3].id, "7");
    assert_eq!(publications[4].container, Default::default());
    assert_eq!(publications[4].access.url, None);
    assert_eq!(publications[4].authors.len(), 1);
    assert_eq!(publications[4].authors[0].family(), Some("Lima"));
}

#[test]
fn test_missing_references_is_empty() {
    let document = PublicationsDocument::from_json_str(r#"{"other": 1}"#).unwrap();
    assert!(document.references().is_none());
    assert!(document.publications().unwrap().is_empty());
}

#[test]
fn test_references_must_be_an_array() {
    let document = PublicationsDocument::from_json_str(r#"{"references": {"a": 1}}"#).unwrap();
    let err = document.publications().unwrap_err();
    assert!(matches!(
        err,
        ModelError::InvalidShape {
            expected: "array",
            found: "object",
            ..
        }
    ));
}

#[test]
fn test_site_document_sections_are_optional() {
    let document = SiteDocument::from_json_str(
        r#"{"equipe": [{"nome": "Ana", "categoria": "docentes"}], "parcerias": null, "extra": []}"#,
    )
    .unwrap();

    assert!(document.section(SectionKey::Team).is_some());
    assert!(document.section(SectionKey::Partnerships).is_none());
    assert!(document.section(SectionKey::ResearchLines).is_none());
    assert_eq!(document.unknown_keys(), vec!["extra"]);

    let members: Vec<TeamMember> =
        decode_records("equipe", document.section(SectionKey::Team).unwrap()).unwrap();
    assert_eq!(members[0].name.as_deref(), Some("Ana"));
    assert_eq!(members[0].category_key(), "docentes");
}

#[test]
fn test_site_document_rejects_non_object() {
    let err = SiteDocument::from_json_str("[1, 2]").unwrap_err();
    assert!(matches!(err, ModelError::InvalidShape { found: "array", .. }));
}

#[test]
fn test_malformed_record_reports_index() {
    let value = serde_json::json!([{"nome": "A"}, "not a record"]);
    let err = decode_records::<ResearchLine>("linhas_pesquisa", &value).unwrap_err();
    assert!(matches!(err, ModelError::InvalidRecord { index: 1, .. }));
}

#[test]
fn test_from_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PUBLICATIONS.as_bytes()).unwrap();

    let document = PublicationsDocument::from_path(file.path()).unwrap();
    assert_eq!(document.publications().unwrap().len(), 2);
}

#[test]
fn test_from_path_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SiteDocument::from_path(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ModelError::Read { .. }));
}
