//! The purchasable bundle catalog. Spec §3 describes `CreditPackage` as
//! sourced from the payments provider's own product catalog, mapped to
//! `{credits, price}` via bundle metadata or, failing that, by parsing the
//! bundle's display name as an integer. The four bundles below mirror
//! `original_source`'s `stripe_service.py::CREDIT_PACKAGES` exactly (same
//! ids, credit counts and cent prices); a real deployment would instead list
//! these from the provider's product API, but the provider-adapter interface
//! (`PaymentsProvider::list_packages`) is what's authoritative here, not this
//! table — this is its fallback/offline content.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CreditPackage {
    pub id: String,
    pub name: String,
    pub credits: i32,
    pub price_minor: i64,
    pub currency: String,
    pub popular: bool,
}

pub fn default_catalog() -> Vec<CreditPackage> {
    vec![
        CreditPackage {
            id: "starter".to_string(),
            name: "Starter".to_string(),
            credits: 10,
            price_minor: 499,
            currency: "usd".to_string(),
            popular: false,
        },
        CreditPackage {
            id: "popular".to_string(),
            name: "Popular".to_string(),
            credits: 50,
            price_minor: 1999,
            currency: "usd".to_string(),
            popular: true,
        },
        CreditPackage {
            id: "pro".to_string(),
            name: "Pro".to_string(),
            credits: 100,
            price_minor: 3499,
            currency: "usd".to_string(),
            popular: false,
        },
        CreditPackage {
            id: "enterprise".to_string(),
            name: "Enterprise".to_string(),
            credits: 500,
            price_minor: 14999,
            currency: "usd".to_string(),
            popular: false,
        },
    ]
}

pub fn find_package(id: &str) -> Option<CreditPackage> {
    default_catalog().into_iter().find(|p| p.id == id)
}

/// Metadata-first, name-parse-fallback credit resolution for a bundle that
/// didn't originate from `default_catalog` (spec §3's provider-catalog path).
pub fn resolve_credits(metadata_credits: Option<i32>, display_name: &str) -> Option<i32> {
    metadata_credits.or_else(|| {
        display_name
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect::<String>()
            .parse()
            .ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_a_known_package_by_id() {
        let p = find_package("popular").unwrap();
        assert_eq!(p.credits, 50);
        assert_eq!(p.price_minor, 1999);
        assert!(p.popular);
    }

    #[test]
    fn unknown_package_id_is_none() {
        assert!(find_package("does-not-exist").is_none());
    }

    #[test]
    fn resolve_credits_prefers_metadata_over_name_parsing() {
        assert_eq!(resolve_credits(Some(25), "Bundle 50"), Some(25));
    }

    #[test]
    fn resolve_credits_falls_back_to_parsing_the_display_name() {
        assert_eq!(resolve_credits(None, "Bundle 50 Credits"), Some(50));
    }

    #[test]
    fn resolve_credits_is_none_when_neither_source_has_a_number() {
        assert_eq!(resolve_credits(None, "Bundle"), None);
    }
}
