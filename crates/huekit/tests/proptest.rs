//! Property-based tests for debouncing and class name derivation.

use std::time::{Duration, Instant};

use huekit::{css_class_name, Debouncer};
use proptest::prelude::*;

proptest! {
    /// A burst of pushes closer together than the delay settles exactly once,
    /// on the last value.
    #[test]
    fn burst_settles_on_last_value(
        values in prop::collection::vec(any::<u32>(), 1..20),
        gaps in prop::collection::vec(0u64..100, 20),
    ) {
        let delay = Duration::from_millis(100);
        let t0 = Instant::now();
        let mut d = Debouncer::new(0u32, delay);

        let mut at = t0;
        for (value, gap) in values.iter().zip(&gaps) {
            at += Duration::from_millis(*gap);
            prop_assert_eq!(d.poll(at), None);
            d.push(*value, at);
        }

        let last = *values.last().unwrap();
        prop_assert_eq!(d.poll(at + delay).copied(), Some(last));
        prop_assert_eq!(d.poll(at + delay * 10), None);
        prop_assert_eq!(*d.value(), last);
    }

    /// Derived class names never contain whitespace or uppercase letters.
    #[test]
    fn class_names_are_slugs(name in "[A-Za-z ]{1,24}", millis in 0i64..=i64::from(u32::MAX)) {
        let class = css_class_name(&name, millis);
        if name.trim().is_empty() {
            prop_assert_eq!(class, "[your-theme-name]");
        } else {
            prop_assert!(class.starts_with("theme-"));
            let suffix = format!("_{}", millis);
            prop_assert!(class.ends_with(&suffix));
            prop_assert!(!class.chars().any(|c| c.is_whitespace() || c.is_uppercase()));
            prop_assert!(!class.contains("--"));
        }
    }
}
