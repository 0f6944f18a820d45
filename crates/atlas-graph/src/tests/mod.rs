//! Crate-level test suites.
//!
//! `smoke_tests` are fast, deterministic scenario tests that exercise the
//! whole engine surface through the registry. `property_tests` verify graph
//! invariants across generated catalogs and require the `proptest` feature.
