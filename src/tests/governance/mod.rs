pub mod delay_tests;
