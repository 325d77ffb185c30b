//! CLI argument definitions for the lab website renderer.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use labfon_citation::CitationStyle;
use labfon_query::SortKey;
use labfon_render::PublicationViewMode;

#[derive(Parser)]
#[command(
    name = "labfon",
    version,
    about = "Laboratório de Fonética - render the lab website from its JSON data",
    long_about = "Render the lab website sections (team, research lines, partnerships\n\
                  and publications) from their JSON documents.\n\n\
                  Also queries the publication list and prints citations in ABNT,\n\
                  plain-text or BibTeX form."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Preferences file (default: preferences.toml in the user config directory).
    #[arg(long = "prefs-file", value_name = "PATH", global = true)]
    pub prefs_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render every section into an HTML page.
    Site(SiteArgs),

    /// Query the publication list and print the current page.
    Publications(PublicationsArgs),

    /// Print the citation of one publication.
    Cite(CiteArgs),

    /// List the facet values of the publication list.
    Facets(FacetsArgs),
}

#[derive(Parser)]
pub struct SiteArgs {
    /// Site data document with `equipe`, `linhas_pesquisa` and `parcerias`.
    #[arg(value_name = "DATA_JSON")]
    pub data: PathBuf,

    /// Publications document with a `references` array.
    #[arg(long = "publications", value_name = "PUBS_JSON")]
    pub publications: Option<PathBuf>,

    /// Write the page to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PublicationsArgs {
    /// Publications document with a `references` array.
    #[arg(value_name = "PUBS_JSON")]
    pub publications: PathBuf,

    /// Case-insensitive text search over title, subtitle, authors and venue.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Only publications from this year (`"sem data"` for undated ones).
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<String>,

    /// Only publications of this type identifier (e.g. `article-journal`).
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Only publications with an author of this surname.
    #[arg(long = "author", value_name = "SURNAME")]
    pub author: Option<String>,

    /// Result order.
    #[arg(long = "sort", value_enum)]
    pub sort: Option<SortArg>,

    /// Page to show, starting at 1.
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Page size; stored as the new default.
    #[arg(
        long = "per-page",
        value_name = "N",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub per_page: Option<usize>,

    /// Card layout for HTML output; stored as the new default.
    #[arg(long = "view", value_enum)]
    pub view: Option<ViewArg>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "html")]
    pub format: ListingFormatArg,
}

#[derive(Parser)]
pub struct CiteArgs {
    /// Publications document with a `references` array.
    #[arg(value_name = "PUBS_JSON")]
    pub publications: PathBuf,

    /// Identifier of the publication to cite.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Citation style.
    #[arg(long = "style", value_enum, default_value = "full")]
    pub style: StyleArg,
}

#[derive(Parser)]
pub struct FacetsArgs {
    /// Publications document with a `references` array.
    #[arg(value_name = "PUBS_JSON")]
    pub publications: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    YearDesc,
    YearAsc,
    AuthorAsc,
    TitleAsc,
    Type,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::YearDesc => SortKey::YearDesc,
            SortArg::YearAsc => SortKey::YearAsc,
            SortArg::AuthorAsc => SortKey::AuthorAsc,
            SortArg::TitleAsc => SortKey::TitleAsc,
            SortArg::Type => SortKey::Type,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Compact,
    Detailed,
}

impl From<ViewArg> for PublicationViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Compact => PublicationViewMode::Compact,
            ViewArg::Detailed => PublicationViewMode::Detailed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    Full,
    Short,
    Plain,
    Bibtex,
}

impl From<StyleArg> for CitationStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Full => CitationStyle::Full,
            StyleArg::Short => CitationStyle::Short,
            StyleArg::Plain => CitationStyle::Plain,
            StyleArg::Bibtex => CitationStyle::BibTex,
        }
    }
}

/// Publication listing output choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListingFormatArg {
    /// Markup of the publications region.
    Html,
    /// Current page as a terminal table.
    Table,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
