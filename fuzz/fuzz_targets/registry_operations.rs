#![no_main]

use libfuzzer_sys::fuzz_target;
use lucid_ioc::{IocError, Registry};
use std::collections::HashSet;
use std::sync::Arc;

const NAMES: [&str; 4] = ["a", "b", "c", "d"];

// Each byte is one operation on a single abstraction; the model tracks which
// names are configured so every lookup result can be checked.
fuzz_target!(|data: &[u8]| {
    let mut registry = Registry::new();
    let mut configured: HashSet<Option<&str>> = HashSet::new();

    for &op in data {
        let name = match op & 0b111 {
            0..=3 => Some(NAMES[(op & 0b11) as usize]),
            _ => None,
        };

        match op >> 3 {
            0..=9 => {
                let context = registry.configure_with::<u8, _>(move || Arc::new(op));
                let context = if op & 0b1000_0000 != 0 { context.as_singleton() } else { context };
                match name {
                    Some(name) => drop(context.named(name)),
                    None => drop(context),
                }
                configured.insert(name);
            }
            10..=24 => {
                let result = match name {
                    Some(name) => registry.get_named_instance::<u8>(name),
                    None => registry.get_instance::<u8>(),
                };
                match (name, result) {
                    (_, Err(IocError::NotConfigured(_))) => assert!(configured.is_empty()),
                    (Some(_), Err(IocError::NotFound { .. })) => assert!(!configured.contains(&name)),
                    (None, Err(IocError::Ambiguous { matches, .. })) => {
                        assert!(!configured.contains(&None));
                        assert_eq!(matches, configured.len());
                    }
                    (_, Ok(_)) => {}
                    (_, Err(error)) => panic!("unexpected error: {}", error),
                }
            }
            _ => {
                registry.reset();
                configured.clear();
            }
        }

        assert_eq!(registry.is_configured::<u8>(), !configured.is_empty());
    }
});
