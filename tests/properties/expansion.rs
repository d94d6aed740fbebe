//! Property tests for identifier string expansion.

use proptest::prelude::*;

use mendel::{Configuration, Property, PropertyValue};

/// (is_default, independent, insignificant, extra_aliases)
type DimensionSpec = (bool, bool, bool, usize);

fn dimensions() -> impl Strategy<Value = Vec<DimensionSpec>> {
    proptest::collection::vec(
        (any::<bool>(), any::<bool>(), any::<bool>(), 0usize..=2),
        0..=4,
    )
}

/// Spellings are unique within and across dimensions by construction.
fn build_configuration(specs: &[DimensionSpec]) -> Configuration {
    let values = specs
        .iter()
        .enumerate()
        .map(|(index, &(is_default, independent, insignificant, extra_aliases))| {
            let mut property = Property::new(format!("P{index}"), format!("P{index}def"));
            if independent {
                property = property.independent();
            }
            if insignificant {
                property = property.insignificant();
            }
            let spelling = if is_default {
                format!("P{index}def")
            } else {
                format!("P{index}val")
            };
            let mut value = PropertyValue::new(property, spelling);
            for alias in 0..extra_aliases {
                value = value.with_alias(format!("P{index}alias{alias}"));
            }
            value
        })
        .collect();
    Configuration::new(values)
}

fn alias_product<F>(specs: &[DimensionSpec], eligible: F) -> usize
where
    F: Fn(&DimensionSpec) -> bool,
{
    specs
        .iter()
        .copied()
        .filter(|spec| eligible(spec))
        .map(|(_, _, _, extra_aliases)| extra_aliases + 1)
        .product()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The listing is the omit-defaults cross-product, plus the
    /// defaults-included cross-product exactly when a default is present.
    #[test]
    fn property_listing_cardinality_is_the_alias_product(specs in dimensions()) {
        let configuration = build_configuration(&specs);
        let first_pass = alias_product(&specs, |&(is_default, independent, _, _)| {
            !independent && !is_default
        });
        let second_pass = if specs.iter().any(|&(is_default, ..)| is_default) {
            alias_product(&specs, |&(_, independent, _, _)| !independent)
        } else {
            0
        };
        prop_assert_eq!(
            configuration.configuration_strings().count(),
            first_pass + second_pass
        );
    }

    /// PROPERTY: Without a default value the listing never repeats itself.
    #[test]
    fn property_single_pass_listings_are_duplicate_free(specs in dimensions()) {
        prop_assume!(specs.iter().all(|&(is_default, ..)| !is_default));
        let configuration = build_configuration(&specs);
        let listing: Vec<String> = configuration.configuration_strings().collect();
        let unique: std::collections::HashSet<&String> = listing.iter().collect();
        prop_assert_eq!(unique.len(), listing.len());
    }

    /// PROPERTY: Re-iteration yields the identical listing.
    #[test]
    fn property_listing_is_restartable(specs in dimensions()) {
        let configuration = build_configuration(&specs);
        let first: Vec<String> = configuration.configuration_strings().collect();
        let second: Vec<String> = configuration.configuration_strings().collect();
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: The canonical identifier heads the listing.
    #[test]
    fn property_listing_starts_with_the_canonical_identifier(specs in dimensions()) {
        let configuration = build_configuration(&specs);
        prop_assert_eq!(
            configuration.configuration_strings().next(),
            Some(configuration.default_configuration_string())
        );
    }

    /// PROPERTY: The defaults-included rendering joins every
    /// non-independent canonical spelling in order.
    #[test]
    fn property_full_rendering_is_an_ordered_join(specs in dimensions()) {
        let configuration = build_configuration(&specs);
        let expected = configuration
            .values()
            .iter()
            .filter(|value| !value.property().is_independent())
            .map(|value| value.value())
            .collect::<Vec<_>>()
            .join("-");
        prop_assert_eq!(configuration.configuration_string(false, true), expected);
    }
}
