//! End-to-end tests of the report pipeline against a local HTTP server.

mod support;
