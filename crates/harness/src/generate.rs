//! Randomized entity generation
//!
//! Every composite field of a generated record traces back to a vocabulary
//! entry or a fixed enumeration; only numeric suffixes come from
//! unconstrained randomness. The random source is injected so tests can
//! force determinism, and the clock-dependent variant takes an explicit
//! timestamp for the same reason.

use chrono::{DateTime, Datelike, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::error::{HarnessError, HarnessResult};
use crate::fixture::{ContentItem, Vocabulary};
use crate::fold::fold_ascii;

pub const EMAIL_DOMAINS: [&str; 3] = ["@gmail.com", "@outlook.com", "@yahoo.com"];
pub const PHONE_PREFIXES: [&str; 9] = [
    "091", "090", "093", "094", "096", "097", "098", "032", "033",
];
pub const CITY_SUFFIX: &str = "TP.HCM";

/// Minimum generated age; the offset drawn on top is in [0, 8).
pub const MIN_AGE: i32 = 18;
pub const AGE_SPREAD: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// The label shown next to the radio control in the add/edit dialog.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Nam",
            Gender::Female => "Nữ",
            Gender::Other => "Khác",
        }
    }
}

/// A synthetic student record ready to be typed into the add dialog.
///
/// `dob` is kept in the generator's display format `MM/DD/YYYY`; the form
/// helper rewrites it to the native input format on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub full_name: String,
    pub code: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub address: String,
    pub gender: Gender,
}

fn pick<'a, R: Rng>(rng: &mut R, items: &'a [String], category: &str) -> HarnessResult<&'a str> {
    items
        .choose(rng)
        .map(String::as_str)
        .ok_or_else(|| HarnessError::EmptyVocabulary {
            category: category.to_string(),
        })
}

/// Generate a person record using the current wall clock.
pub fn generate_person<R: Rng>(vocab: &Vocabulary, rng: &mut R) -> HarnessResult<PersonRecord> {
    generate_person_at(vocab, rng, Utc::now())
}

/// Generate a person record at an explicit point in time.
///
/// The identifier is a time-based suffix, unique enough for one test run
/// but not globally.
pub fn generate_person_at<R: Rng>(
    vocab: &Vocabulary,
    rng: &mut R,
    now: DateTime<Utc>,
) -> HarnessResult<PersonRecord> {
    // Family name first, per the source locale.
    let full_name = format!(
        "{} {} {}",
        pick(rng, &vocab.last_names, "lastName")?,
        pick(rng, &vocab.middle_names, "middleName")?,
        pick(rng, &vocab.first_names, "firstName")?,
    );

    let code = format!("SV{}", now.timestamp_millis() % 100_000);

    // The given name is the rightmost token of the full name.
    let given = full_name.rsplit(' ').next().unwrap_or(&full_name);
    let domain = EMAIL_DOMAINS[rng.gen_range(0..EMAIL_DOMAINS.len())];
    let email = format!("{}.{}{}", fold_ascii(given), code.to_lowercase(), domain);

    let prefix = PHONE_PREFIXES[rng.gen_range(0..PHONE_PREFIXES.len())];
    let phone = format!("{}{:07}", prefix, rng.gen_range(0..10_000_000));

    let year = now.year() - (MIN_AGE + rng.gen_range(0..AGE_SPREAD));
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    let dob = format!("{month:02}/{day:02}/{year}");

    let address = generate_address(vocab, rng)?;
    let gender = Gender::ALL[rng.gen_range(0..Gender::ALL.len())];

    let record = PersonRecord {
        full_name,
        code,
        email,
        phone,
        dob,
        address,
        gender,
    };
    info!(
        name = %record.full_name,
        code = %record.code,
        email = %record.email,
        "generated student"
    );
    Ok(record)
}

/// Compose a street address from the location vocabulary.
pub fn generate_address<R: Rng>(vocab: &Vocabulary, rng: &mut R) -> HarnessResult<String> {
    let house = rng.gen_range(1..=500);
    Ok(format!(
        "{} {}, {}, {}",
        house,
        pick(rng, &vocab.streets, "street")?,
        pick(rng, &vocab.districts, "district")?,
        CITY_SUFFIX,
    ))
}

/// Sample `count` distinct items from the catalog, preserving draw order.
///
/// Indices are redrawn until `count` distinct ones have been collected, so
/// the request must not exceed the catalog size.
pub fn select_content_items<R: Rng>(
    catalog: &[ContentItem],
    rng: &mut R,
    count: usize,
) -> HarnessResult<Vec<ContentItem>> {
    if count > catalog.len() {
        return Err(HarnessError::CatalogExhausted {
            requested: count,
            available: catalog.len(),
        });
    }

    let mut used: Vec<usize> = Vec::with_capacity(count);
    while used.len() < count {
        let idx = rng.gen_range(0..catalog.len());
        if !used.contains(&idx) {
            used.push(idx);
        }
    }
    Ok(used.into_iter().map(|i| catalog[i].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn vocab() -> Vocabulary {
        Vocabulary {
            last_names: vec!["Nguyễn".into(), "Trần".into(), "Lê".into()],
            middle_names: vec!["Văn".into(), "Thị".into()],
            first_names: vec!["An".into(), "Dũng".into(), "Hương".into()],
            streets: vec!["Lê Lợi".into(), "Nguyễn Huệ".into()],
            districts: vec!["Quận 1".into(), "Bình Thạnh".into()],
        }
    }

    #[test]
    fn every_component_comes_from_the_vocabulary() {
        let vocab = vocab();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let person = generate_person(&vocab, &mut rng).unwrap();
            let parts: Vec<&str> = person.full_name.split(' ').collect();
            assert_eq!(parts.len(), 3);
            assert!(vocab.last_names.iter().any(|n| n == parts[0]));
            assert!(vocab.middle_names.iter().any(|n| n == parts[1]));
            assert!(vocab.first_names.iter().any(|n| n == parts[2]));
            assert!(Gender::ALL.contains(&person.gender));
            assert!(EMAIL_DOMAINS.iter().any(|d| person.email.ends_with(d)));
            assert!(PHONE_PREFIXES.iter().any(|p| person.phone.starts_with(p)));
            assert_eq!(person.phone.len(), 10);
            assert!(person.address.ends_with(CITY_SUFFIX));
        }
    }

    #[test]
    fn birth_year_stays_in_the_age_window() {
        let vocab = vocab();
        let mut rng = StdRng::seed_from_u64(11);
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        for _ in 0..50 {
            let person = generate_person_at(&vocab, &mut rng, now).unwrap();
            let year: i32 = person.dob.rsplit('/').next().unwrap().parse().unwrap();
            assert!((2026 - 26..=2026 - 18).contains(&year), "year {year}");
        }
    }

    #[test]
    fn code_is_prefix_plus_truncated_millis() {
        let vocab = vocab();
        let mut rng = StdRng::seed_from_u64(3);
        let now = Utc.timestamp_millis_opt(1_720_000_123_456).unwrap();
        let person = generate_person_at(&vocab, &mut rng, now).unwrap();
        assert_eq!(person.code, format!("SV{}", 1_720_000_123_456u64 % 100_000));
    }

    #[test]
    fn email_local_part_is_folded_given_name() {
        let vocab = Vocabulary {
            last_names: vec!["Nguyễn".into()],
            middle_names: vec!["Văn".into()],
            first_names: vec!["Dũng".into()],
            ..vocab()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let person = generate_person(&vocab, &mut rng).unwrap();
        assert!(
            person.email.starts_with("dung."),
            "email was {}",
            person.email
        );
        assert!(person.email.is_ascii());
    }

    #[test]
    fn empty_category_is_reported() {
        let vocab = Vocabulary {
            first_names: vec![],
            ..vocab()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_person(&vocab, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::EmptyVocabulary { ref category } if category == "firstName"
        ));
    }

    fn catalog(n: usize) -> Vec<ContentItem> {
        (0..n)
            .map(|i| ContentItem {
                title: format!("Bài {i}"),
                description: format!("Nội dung {i}"),
            })
            .collect()
    }

    #[test]
    fn sampling_yields_distinct_catalog_items() {
        let catalog = catalog(5);
        let mut rng = StdRng::seed_from_u64(9);
        for k in 0..=5 {
            let picked = select_content_items(&catalog, &mut rng, k).unwrap();
            assert_eq!(picked.len(), k);
            for (i, item) in picked.iter().enumerate() {
                assert!(catalog.contains(item));
                assert!(!picked[..i].contains(item), "duplicate at {i}");
            }
        }
    }

    #[test]
    fn oversampling_is_rejected() {
        let catalog = catalog(2);
        let mut rng = StdRng::seed_from_u64(9);
        let err = select_content_items(&catalog, &mut rng, 3).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::CatalogExhausted {
                requested: 3,
                available: 2
            }
        ));
    }
}
