pub mod snapshot_tests;
