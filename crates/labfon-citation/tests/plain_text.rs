//! Property tests: plain text keeps every literal character of the
//! decorated citation and drops the markup.

use labfon_citation::{format_citation, to_plain_text};
use labfon_model::{Publication, PublicationType};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn publication_strategy() -> impl Strategy<Value = Publication> {
    (
        "[A-Za-zÀ-ú][A-Za-zÀ-ú &.,-]{0,20}",
        proptest::option::of("[A-Za-z ]{1,12}"),
        proptest::option::of(1950_i32..2030),
        0_usize..PublicationType::all().len(),
        proptest::collection::vec(("[A-Za-z]{0,8}", "[A-Za-z]{0,8}"), 0..4),
        proptest::option::of("[0-9]{1,3}-[0-9]{1,3}"),
    )
        .prop_map(|(title, container, year, kind, authors, pages)| {
            let mut publication = Publication::new("p", title);
            publication.kind = Some(PublicationType::all()[kind]);
            publication.container.title = container;
            publication.imprint.date = year;
            publication.page_range = pages;
            for (family, given) in authors {
                publication = publication.with_author(&family, &given);
            }
            publication
        })
}

fn strip_known_markup(citation: &str) -> String {
    citation
        .replace("<strong>", "")
        .replace("</strong>", "")
        .replace("<em>", "")
        .replace("</em>", "")
        .replace("&amp;", "&")
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn plain_text_has_no_markup(publication in publication_strategy()) {
        let full = format_citation(&publication);
        let plain = to_plain_text(&full);

        prop_assert!(!plain.contains('<'));
        prop_assert!(!plain.contains('>'));
        prop_assert_eq!(&plain, &strip_known_markup(&full));

        let title = publication.title.clone().unwrap_or_default();
        prop_assert!(plain.contains(&title));
    }

    #[test]
    fn no_date_token_tracks_missing_year(publication in publication_strategy()) {
        let full = format_citation(&publication);
        prop_assert_eq!(publication.year().is_none(), full.contains("[sem data]"));
    }
}
