use super::*;
use crate::error::CatalogError;
use std::fs;
use tempfile::tempdir;

fn r(title: &str, genre: &str, year: i32) -> Record {
    Record::new(title, genre, year).unwrap()
}

#[test]
fn record_normalizes_title_and_defaults_genre() {
    let rec = Record::new("  The   Big\tLebowski  ", "  ", 0).unwrap();
    assert_eq!(rec.title(), "The Big Lebowski");
    assert_eq!(rec.genre(), UNKNOWN_GENRE);
    assert_eq!(rec.year(), 0);
}

#[test]
fn record_rejects_blank_title() {
    assert!(matches!(Record::new("   ", "Drama", 1999), Err(CatalogError::EmptyTitle)));
    assert!(matches!(Record::from_line(" | Drama | 1999"), Err(CatalogError::EmptyTitle)));
}

#[test]
fn record_capitalizes_genre_first_letter_only() {
    assert_eq!(r("Alien", "horror", 1979).genre(), "Horror");
    assert_eq!(r("Dune", "sci-Fi", 1984).genre(), "Sci-Fi");
    assert_eq!(r("Amélie", "été", 2001).genre(), "Été");
}

#[test]
fn record_line_survives_a_save_and_reload() {
    let rec = r("Blade  Runner", "sci-fi", 1982);
    let back = Record::from_line(&rec.to_line()).unwrap();
    assert_eq!(back.title(), "Blade Runner");
    assert_eq!(back.genre(), "Sci-fi");
    assert_eq!(back.year(), 1982);
    assert_eq!(back, rec);
}

#[test]
fn from_line_parses_three_fields() {
    let rec = Record::from_line("Dune | Sci-Fi | 1984").unwrap();
    assert_eq!(rec.title(), "Dune");
    assert_eq!(rec.genre(), "Sci-Fi");
    assert_eq!(rec.year(), 1984);
    assert_eq!(rec.to_string(), "Dune (Sci-Fi, 1984)");
}

#[test]
fn from_line_accepts_legacy_title_only() {
    let rec = Record::from_line("  Casablanca ").unwrap();
    assert_eq!(rec.title(), "Casablanca");
    assert_eq!(rec.genre(), "Unknown");
    assert_eq!(rec.year(), 0);
    assert_eq!(rec.to_string(), "Casablanca (Unknown)");
}

#[test]
fn from_line_with_two_parts_keeps_only_title() {
    let rec = Record::from_line("Heat | Crime").unwrap();
    assert_eq!(rec.title(), "Heat");
    assert_eq!(rec.genre(), "Unknown");
    assert_eq!(rec.year(), 0);
}

#[test]
fn from_line_bad_year_falls_back_to_zero() {
    let rec = Record::from_line("Heat | Crime | nineteen").unwrap();
    assert_eq!(rec.year(), 0);
    assert_eq!(rec.year_label(), "");

    let rec = Record::from_line("Heat | Crime | 1995 | extra").unwrap();
    assert_eq!(rec.year(), 1995);
    assert_eq!(rec.year_label(), "1995");
}

#[test]
fn catalog_blank_name_uses_default_and_creates_dir() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("nested").join("catalogs");

    let cat = Catalog::new("   ", &base).unwrap();
    assert_eq!(cat.name(), DEFAULT_CATALOG_NAME);
    assert_eq!(cat.path(), base.join("catalogo.txt"));
    assert!(base.is_dir());
    assert!(!cat.path().exists());
}

#[test]
fn list_on_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let cat = Catalog::new("never", dir.path()).unwrap();
    assert!(cat.list().unwrap().is_empty());
    assert_eq!(cat.records().unwrap().count(), 0);
}

#[test]
fn add_rejects_duplicate_title_ignoring_case() {
    let dir = tempdir().unwrap();
    let cat = Catalog::new("Horror", dir.path()).unwrap();

    assert!(cat.add(&r("The Thing", "Horror", 0)).unwrap());
    assert!(!cat.add(&r("the thing", "Horror", 0)).unwrap());
    assert!(!cat.add(&r("THE  THING", "Comedy", 1982)).unwrap());

    let all = cat.list().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].to_string(), "The Thing (Horror)");
}

#[test]
fn list_sorts_by_title_ignoring_case() {
    let dir = tempdir().unwrap();
    let cat = Catalog::new("mixed", dir.path()).unwrap();
    for t in ["zodiac", "Alien", "brazil", "Memento"] {
        cat.add(&r(t, "", 0)).unwrap();
    }

    let titles: Vec<String> = cat
        .list()
        .unwrap()
        .iter()
        .map(|r| r.title().to_string())
        .collect();
    assert_eq!(titles, vec!["Alien", "brazil", "Memento", "zodiac"]);
}

#[test]
fn list_skips_blank_and_titleless_lines_and_reads_legacy() {
    let dir = tempdir().unwrap();
    let cat = Catalog::new("old", dir.path()).unwrap();
    fs::write(
        cat.path(),
        "Vertigo\n\n   \nDune | Sci-Fi | 1984\n | Drama | 2000\nHeat | Crime | xx\n",
    )
    .unwrap();

    let all = cat.list().unwrap();
    let shown: Vec<String> = all.iter().map(|r| r.to_string()).collect();
    assert_eq!(
        shown,
        vec!["Dune (Sci-Fi, 1984)", "Heat (Crime)", "Vertigo (Unknown)"]
    );
}

#[test]
fn add_appends_one_line_per_record() {
    let dir = tempdir().unwrap();
    let cat = Catalog::new("lines", dir.path()).unwrap();
    cat.add(&r("Alien", "horror", 1979)).unwrap();
    cat.add(&r("Heat", "", 0)).unwrap();

    let text = fs::read_to_string(cat.path()).unwrap();
    assert_eq!(text, "Alien | Horror | 1979\nHeat | Unknown | 0\n");
}

#[test]
fn delete_all_reports_whether_file_existed() {
    let dir = tempdir().unwrap();
    let cat = Catalog::new("gone", dir.path()).unwrap();

    assert!(!cat.delete_all().unwrap());
    cat.add(&r("Alien", "", 0)).unwrap();
    assert!(cat.delete_all().unwrap());
    assert!(!cat.delete_all().unwrap());
    assert!(cat.list().unwrap().is_empty());
}

#[test]
fn create_empty_only_once() {
    let dir = tempdir().unwrap();
    let cat = Catalog::new("fresh", dir.path()).unwrap();

    assert!(cat.create_empty().unwrap());
    assert!(cat.path().is_file());
    assert!(!cat.create_empty().unwrap());
    assert!(cat.list().unwrap().is_empty());
    assert_eq!(list_catalogs(dir.path()).unwrap(), vec!["fresh".to_string()]);
}

#[test]
fn replace_all_rewrites_the_file() {
    let dir = tempdir().unwrap();
    let cat = Catalog::new("edit", dir.path()).unwrap();
    for t in ["Alien", "Brazil", "Casino"] {
        cat.add(&r(t, "", 0)).unwrap();
    }

    let keep: Vec<Record> = cat
        .list()
        .unwrap()
        .into_iter()
        .filter(|r| r.title() != "Brazil")
        .collect();
    cat.replace_all(&keep).unwrap();

    let titles: Vec<String> = cat.list().unwrap().iter().map(|r| r.title().into()).collect();
    assert_eq!(titles, vec!["Alien", "Casino"]);
}

#[test]
fn records_can_be_restarted() {
    let dir = tempdir().unwrap();
    let cat = Catalog::new("again", dir.path()).unwrap();
    cat.add(&r("Alien", "", 0)).unwrap();
    cat.add(&r("Brazil", "", 0)).unwrap();

    assert_eq!(cat.records().unwrap().count(), 2);
    let first = cat.records().unwrap().next().unwrap().unwrap();
    assert_eq!(first.title(), "Alien");
}

#[test]
fn record_rejects_separator_in_title_or_genre() {
    assert!(matches!(
        Record::new("AC|DC Live", "Concert", 1992),
        Err(CatalogError::Separator)
    ));
    assert!(matches!(
        Record::new("Stop Making Sense", "Concert | Live", 1984),
        Err(CatalogError::Separator)
    ));

    let rec = r("AC/DC Live", "Concert", 1992);
    assert_eq!(Record::from_line(&rec.to_line()).unwrap(), rec);
}

fn assert_io_on(err: CatalogError, expected: &std::path::Path) {
    match err {
        CatalogError::Io { path, .. } => assert_eq!(path, expected),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn io_failures_propagate_with_the_catalog_path() {
    let dir = tempdir().unwrap();
    let cat = Catalog::new("blocked", dir.path()).unwrap();
    // A directory sits where the catalog file belongs.
    fs::create_dir(cat.path()).unwrap();

    assert_io_on(cat.list().unwrap_err(), cat.path());
    assert_io_on(cat.add(&r("Alien", "", 0)).unwrap_err(), cat.path());
    assert_io_on(cat.delete_all().unwrap_err(), cat.path());
    assert_io_on(cat.replace_all(&[r("Alien", "", 0)]).unwrap_err(), cat.path());
    assert!(cat.path().is_dir());
}
