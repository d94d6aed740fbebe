//! Property tests for configuration identity and fingerprints.

use proptest::prelude::*;

use mendel::{Configuration, Property, PropertyValue};

/// One entry per dimension: (canonical spelling, insignificant)
fn entries() -> impl Strategy<Value = Vec<(String, bool)>> {
    proptest::collection::vec(
        (
            proptest::string::string_regex("[A-Za-z0-9_]{1,8}").unwrap(),
            any::<bool>(),
        ),
        0..=5,
    )
}

fn build_values(entries: &[(String, bool)]) -> Vec<PropertyValue> {
    entries
        .iter()
        .enumerate()
        .map(|(index, (spelling, insignificant))| {
            let mut property = Property::new(format!("P{index}"), format!("P{index}def"));
            if *insignificant {
                property = property.insignificant();
            }
            PropertyValue::new(property, spelling.clone())
        })
        .collect()
}

proptest! {
    /// PROPERTY: Fingerprints ignore value order.
    #[test]
    fn property_fingerprint_is_permutation_invariant(entries in entries()) {
        let forward = Configuration::new(build_values(&entries));
        let mut reversed_values = build_values(&entries);
        reversed_values.reverse();
        let reversed = Configuration::new(reversed_values);
        prop_assert_eq!(forward.fingerprint(), reversed.fingerprint());
    }

    /// PROPERTY: Structurally equal sequences are equal configurations
    /// with equal fingerprints.
    #[test]
    fn property_equal_sequences_are_equal(entries in entries()) {
        let first = Configuration::new(build_values(&entries));
        let second = Configuration::new(build_values(&entries));
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.fingerprint(), second.fingerprint());
    }

    /// PROPERTY: Alias decorations never change identity.
    #[test]
    fn property_aliases_are_not_identity(entries in entries()) {
        let plain = Configuration::new(build_values(&entries));
        let decorated = Configuration::new(
            build_values(&entries)
                .into_iter()
                .map(|value| value.with_alias("extra"))
                .collect(),
        );
        prop_assert_eq!(&plain, &decorated);
        prop_assert_eq!(plain.fingerprint(), decorated.fingerprint());
    }

    /// PROPERTY: Compatible identity sees exactly the significant values.
    #[test]
    fn property_compatible_identity_strips_insignificant_values(entries in entries()) {
        let full = Configuration::new(build_values(&entries));
        let stripped = Configuration::new(
            build_values(&entries)
                .into_iter()
                .filter(|value| !value.property().is_insignificant())
                .collect(),
        );
        prop_assert!(full.compatible_eq(&stripped));
        prop_assert_eq!(
            full.compatible_fingerprint(),
            stripped.compatible_fingerprint()
        );
    }

    /// PROPERTY: Flattening distinct property names succeeds in order.
    #[test]
    fn property_flattening_unique_names_succeeds(entries in entries()) {
        let configuration = Configuration::new(build_values(&entries));
        let flattened = configuration.properties().unwrap();
        prop_assert_eq!(flattened.len(), entries.len());
        for (index, (name, _)) in flattened.iter().enumerate() {
            prop_assert_eq!(name, &format!("P{index}"));
        }
    }
}
