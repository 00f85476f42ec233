/// Tests for the process-wide registry.
///
/// Every test starts with a reset and runs serially, since they all share
/// the same registry.

use lucid_ioc::{global, implements, Dispose, IocError};
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

trait Clock: Send + Sync {
    fn zone(&self) -> &'static str;
}

#[derive(Default)]
struct Utc;

impl Clock for Utc {
    fn zone(&self) -> &'static str {
        "UTC"
    }
}

#[derive(Default)]
struct Local;

impl Clock for Local {
    fn zone(&self) -> &'static str {
        "local"
    }
}

implements!(dyn Clock => Utc, Local);

#[test]
#[serial]
fn test_global_configure_and_resolve() {
    global().reset();

    global().configure::<dyn Clock, Utc>().as_singleton();
    global().configure::<dyn Clock, Local>().named("local");

    let utc = global().get_instance::<dyn Clock>().unwrap();
    let again = global().get_instance::<dyn Clock>().unwrap();
    assert_eq!(utc.zone(), "UTC");
    assert!(Arc::ptr_eq(&utc, &again));

    let local = global().get_named_instance::<dyn Clock>("local").unwrap();
    assert_eq!(local.zone(), "local");
}

#[test]
#[serial]
fn test_global_reset_clears_state() {
    global().reset();
    global().configure::<dyn Clock, Utc>();
    assert!(global().is_configured::<dyn Clock>());

    global().reset();

    assert!(!global().is_configured::<dyn Clock>());
    assert!(matches!(
        global().get_instance::<dyn Clock>(),
        Err(IocError::NotConfigured(_))
    ));
}

#[test]
#[serial]
fn test_global_reset_disposes_singletons() {
    static DISPOSED: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct Pool;

    impl Dispose for Pool {
        fn dispose(&self) {
            DISPOSED.fetch_add(1, Ordering::SeqCst);
        }
    }

    global().reset();
    global().configure_disposable::<Pool, Pool>().as_singleton();
    let _pool = global().get_instance::<Pool>().unwrap();

    global().reset();
    assert_eq!(DISPOSED.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_global_singleton_shared_across_threads() {
    global().reset();
    global().configure::<dyn Clock, Utc>().as_singleton();

    let expected = global().get_instance::<dyn Clock>().unwrap();
    let matches = AtomicUsize::new(0);

    crossbeam_utils::thread::scope(|s| {
        for _ in 0..8 {
            let expected = &expected;
            let matches = &matches;
            s.spawn(move |_| {
                for _ in 0..100 {
                    let clock = global().get_instance::<dyn Clock>().unwrap();
                    if Arc::ptr_eq(&clock, expected) {
                        matches.fetch_add(1, Ordering::SeqCst);
                    }
                }
            });
        }
    })
    .unwrap();

    assert_eq!(matches.load(Ordering::SeqCst), 800);
}

#[test]
#[serial]
fn test_global_concurrent_configuration() {
    global().reset();

    crossbeam_utils::thread::scope(|s| {
        for i in 0..8 {
            s.spawn(move |_| {
                global()
                    .configure_with::<String, _>(move || Arc::new(format!("worker-{}", i)))
                    .named(format!("worker-{}", i));
            });
        }
    })
    .unwrap();

    let collection_len = global().collection::<String>().map(|c| c.len());
    assert_eq!(collection_len, Some(8));

    for i in 0..8 {
        let name = format!("worker-{}", i);
        let value = global().get_named_instance::<String>(&name).unwrap();
        assert_eq!(*value, name);
    }

    global().reset();
}
