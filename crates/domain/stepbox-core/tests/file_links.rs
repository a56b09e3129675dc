use stepbox_core::{file_location_to_href, FileLink, Materialization};

#[test]
fn absolute_path_becomes_file_link() {
    assert_eq!(
        file_location_to_href("/var/data/out.csv"),
        "file:///var/data/out.csv"
    );
    assert_eq!(
        FileLink::from_location("/var/data/out.csv"),
        FileLink::LocalPath {
            href: "file:///var/data/out.csv".into(),
            path: "/var/data/out.csv".into(),
        }
    );
}

#[test]
fn urls_pass_through_untouched() {
    let link = FileLink::from_location("https://example.com/out.csv");
    assert_eq!(
        link,
        FileLink::Url {
            href: "https://example.com/out.csv".into()
        }
    );
    assert!(!link.is_local());
    assert_eq!(link.href(), "https://example.com/out.csv");
}

#[test]
fn path_is_not_escaped_when_building_the_href() {
    let link = FileLink::from_location("/tmp/my report #1.csv");
    assert_eq!(link.href(), "file:///tmp/my report #1.csv");
    match link {
        FileLink::LocalPath { path, .. } => assert_eq!(path, "/tmp/my report #1.csv"),
        other => panic!("expected local path, got {other:?}"),
    }
}

#[test]
fn relative_or_malformed_locations_are_treated_as_urls() {
    for location in ["out.csv", "s3://bucket/key", "", "C:\\data\\out.csv"] {
        assert!(!FileLink::from_location(location).is_local(), "{location}");
    }
}

#[test]
fn location_already_using_file_scheme_is_still_opened_by_host() {
    let link = FileLink::from_location("file:///srv/out.parquet");
    assert_eq!(
        link,
        FileLink::LocalPath {
            href: "file:///srv/out.parquet".into(),
            path: "/srv/out.parquet".into(),
        }
    );
}

#[test]
fn materialization_resolves_its_own_link() {
    let m = Materialization::new("/data/a.json", "a.json");
    assert!(m.link().is_local());
}
