//! Integration tests for the Bookshelf server

mod live_tests;
mod pg_tests;
