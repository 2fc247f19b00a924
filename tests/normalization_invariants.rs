use engagement_core::identity::{normalize, CanonicalIdentity, IdentityError};
use proptest::prelude::*;

#[test]
fn invariant_equivalence_class() {
    let variants = ["@Ayse.Yilmaz", "ayse_yilmaz", " AYSE-YILMAZ ", "ayse yilmaz", "@@ayse..yilmaz"];
    for raw in variants {
        assert_eq!(normalize(raw), "ayseyilmaz", "input {raw:?}");
    }
}

#[test]
fn invariant_empty_and_absent_inputs() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize(None::<&str>), "");
    assert_eq!(normalize("   \t\n"), "");
    assert_eq!(normalize("@"), "");
    assert_eq!(normalize("._-"), "");
    assert!(CanonicalIdentity::parse(None::<&str>).is_none());
    assert!(CanonicalIdentity::parse("!!!").is_none());
}

#[test]
fn mixed_formats_from_real_uploads() {
    let cases = [
        ("cmile.ozdmrr", "cmileozdmrr"),
        ("@cmile.ozdmrr", "cmileozdmrr"),
        ("Mehmet_Kaya", "mehmetkaya"),
        ("fatma demir", "fatmademir"),
        ("Ali-Ozkan", "aliozkan"),
        ("zeynep_123", "zeynep123"),
        ("BURAK.TWITTER", "buraktwitter"),
        ("selin   medya", "selinmedya"),
        ("user#1!", "user1"),
    ];
    for (raw, expected) in cases {
        assert_eq!(normalize(raw), expected, "input {raw:?}");
    }
}

#[test]
fn manual_entry_rejects_empty_key() {
    assert_eq!(CanonicalIdentity::try_from_raw("  @  "), Err(IdentityError::Empty));
    let id = CanonicalIdentity::try_from_raw("@Selin.Medya").unwrap();
    assert_eq!(id.as_str(), "selinmedya");
}

proptest! {
    /// Normalizing a canonical key again changes nothing.
    #[test]
    fn normalize_is_idempotent(raw in "\\PC*") {
        let once = normalize(raw.as_str());
        let twice = normalize(once.as_str());
        prop_assert_eq!(once, twice);
    }

    /// Output alphabet is lowercase ASCII letters and digits only.
    #[test]
    fn output_is_lowercase_ascii_alphanumeric(raw in "\\PC*") {
        let key = normalize(raw.as_str());
        prop_assert!(key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()), "{:?}", key);
    }

    /// Case, surrounding whitespace and `@` never affect the key.
    #[test]
    fn decoration_does_not_change_key(core in "[A-Za-z0-9._-]{1,20}", pad in " {0,3}") {
        let decorated = format!("{pad}@{}{pad}", core.to_uppercase());
        prop_assert_eq!(normalize(decorated.as_str()), normalize(core.as_str()));
    }

    #[test]
    fn parse_is_some_exactly_when_key_is_non_empty(raw in "\\PC*") {
        let key = normalize(raw.as_str());
        prop_assert_eq!(CanonicalIdentity::parse(raw.as_str()).is_some(), !key.is_empty());
    }
}
